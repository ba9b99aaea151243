use serde::Deserialize;

// Module for deserializing string or numeric values as float
pub mod string_or_float {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringOrFloat;

        impl<'de> serde::de::Visitor<'de> for StringOrFloat {
            type Value = f64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a float or a string containing a float")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse::<f64>().map_err(serde::de::Error::custom)
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                self.visit_str(&value)
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(value)
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(value as f64)
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(value as f64)
            }
        }

        deserializer.deserialize_any(StringOrFloat)
    }
}

/// `string_or_float` for optional fields.
pub mod string_or_float_opt {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wrapper(#[serde(with = "super::string_or_float")] f64);

        Option::<Wrapper>::deserialize(deserializer).map(|opt| opt.map(|w| w.0))
    }
}

/// CoinGecko `simple/price?ids=solana&vs_currencies=usd` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinGeckoSimplePrice {
    pub solana: Option<CoinGeckoUsd>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinGeckoUsd {
    pub usd: f64,
}

/// DexScreener token-pairs response. `priceUsd` arrives string-encoded.
#[derive(Debug, Clone, Deserialize)]
pub struct DexScreenerResponse {
    pub pairs: Option<Vec<DexScreenerPair>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DexScreenerPair {
    #[serde(
        default,
        rename = "priceUsd",
        deserialize_with = "string_or_float_opt::deserialize"
    )]
    pub price_usd: Option<f64>,
}

/// Jupiter portfolio positions response (snake_case API).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioPositions {
    #[serde(default)]
    pub total_value_usd: Option<f64>,
    #[serde(default)]
    pub positions: Vec<PortfolioPosition>,
    #[serde(default)]
    pub perp_positions: Vec<PortfolioPosition>,
    #[serde(default)]
    pub limit_orders: Vec<PortfolioPosition>,
    #[serde(default)]
    pub dca: Vec<PortfolioPosition>,
}

impl PortfolioPositions {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
            && self.perp_positions.is_empty()
            && self.limit_orders.is_empty()
            && self.dca.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioPosition {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub value_usd: Option<f64>,
    #[serde(default)]
    pub size_usd: Option<f64>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub amount: Option<f64>,
}

impl PortfolioPosition {
    /// USD value regardless of position flavor (spot / perp / limit).
    pub fn display_value(&self) -> f64 {
        self.value_usd
            .or(self.size_usd)
            .or(self.value)
            .unwrap_or(0.0)
    }
}

/// Staked JUP response (camelCase API).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakedJup {
    #[serde(default)]
    pub staked_amount: Option<f64>,
    #[serde(default)]
    pub unstaking: Vec<UnstakingEntry>,
}

impl StakedJup {
    pub fn unstaking_total(&self) -> f64 {
        self.unstaking.iter().map(|entry| entry.amount).sum()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnstakingEntry {
    #[serde(default)]
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dexscreener_price_parses_from_string() {
        let response: DexScreenerResponse = serde_json::from_str(
            r#"{"pairs":[{"priceUsd":"1.2345","dexId":"raydium"},{"priceUsd":0.5}]}"#,
        )
        .unwrap();

        let pairs = response.pairs.unwrap();
        assert_eq!(pairs[0].price_usd, Some(1.2345));
        assert_eq!(pairs[1].price_usd, Some(0.5));
    }

    #[test]
    fn dexscreener_tolerates_missing_pairs() {
        let response: DexScreenerResponse = serde_json::from_str(r#"{"pairs":null}"#).unwrap();
        assert!(response.pairs.is_none());
    }

    #[test]
    fn portfolio_positions_value_prefers_value_usd() {
        let position: PortfolioPosition =
            serde_json::from_str(r#"{"name":"JUP","value_usd":12.5,"value":3.0}"#).unwrap();
        assert_eq!(position.display_value(), 12.5);

        let perp: PortfolioPosition = serde_json::from_str(r#"{"size_usd":40.0}"#).unwrap();
        assert_eq!(perp.display_value(), 40.0);
    }

    #[test]
    fn staked_jup_sums_unstaking_entries() {
        let staked: StakedJup = serde_json::from_str(
            r#"{"stakedAmount":100.0,"unstaking":[{"amount":5.0},{"amount":2.5}]}"#,
        )
        .unwrap();

        assert_eq!(staked.staked_amount, Some(100.0));
        assert_eq!(staked.unstaking_total(), 7.5);
    }
}
