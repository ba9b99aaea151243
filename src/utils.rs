use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use regex::Regex;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

// Validate Solana address
pub fn validate_solana_address(address: &str) -> bool {
    Pubkey::from_str(address).is_ok()
}

// Parse Solana address and convert to pubkey
pub fn parse_solana_address(address: &str) -> Result<Pubkey> {
    Pubkey::from_str(address).map_err(|_| anyhow!("Invalid Solana address format"))
}

// Parse amount and token from input string
pub fn parse_amount_and_token(input: &str) -> Option<(f64, &str)> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^(\d+(?:\.\d+)?)\s+([A-Za-z0-9]+)$").unwrap();
    }

    RE.captures(input.trim()).and_then(|cap| {
        let amount_str = cap.get(1)?.as_str();
        let token = cap.get(2)?.as_str();

        amount_str.parse::<f64>().ok().map(|amount| (amount, token))
    })
}

// Validate an email address for the ZeroAlpha login flow
pub fn validate_email(input: &str) -> bool {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }

    RE.is_match(input.trim())
}

// OTP codes issued by the backend are exactly six digits
pub fn validate_otp_code(input: &str) -> bool {
    let code = input.trim();
    code.len() == 6 && code.chars().all(|c| c.is_ascii_digit())
}

// Format amount with appropriate precision
pub fn format_amount(amount: f64, token: &str) -> String {
    match token.to_uppercase().as_str() {
        "SOL" => format!("{:.9}", amount),           // 9 decimals
        "USDC" | "USDT" => format!("{:.6}", amount), // 6 decimals
        _ => format!("{:.6}", amount),               // Default to 6 decimals
    }
}

// Shorten address for display
pub fn shorten_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }

    let start = &address[..5];
    let end = &address[address.len() - 5..];

    format!("{}...{}", start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_address() {
        assert!(validate_solana_address(
            "So11111111111111111111111111111111111111112"
        ));
    }

    #[test]
    fn rejects_malformed_address() {
        assert!(!validate_solana_address("not-an-address"));
        assert!(!validate_solana_address(""));
        assert!(!validate_solana_address("0x52908400098527886E0F7030069857D2E4169EE7"));
    }

    #[test]
    fn parses_amount_and_token() {
        assert_eq!(parse_amount_and_token("0.5 SOL"), Some((0.5, "SOL")));
        assert_eq!(parse_amount_and_token("100 USDC"), Some((100.0, "USDC")));
        assert_eq!(parse_amount_and_token("  1.25 BONK "), Some((1.25, "BONK")));
        assert_eq!(parse_amount_and_token("SOL 0.5"), None);
        assert_eq!(parse_amount_and_token("-1 SOL"), None);
        assert_eq!(parse_amount_and_token("0.5"), None);
    }

    #[test]
    fn validates_otp_codes() {
        assert!(validate_otp_code("123456"));
        assert!(validate_otp_code(" 123456 "));
        assert!(!validate_otp_code("12345"));
        assert!(!validate_otp_code("1234567"));
        assert!(!validate_otp_code("12345a"));
    }

    #[test]
    fn validates_emails() {
        assert!(validate_email("user@example.com"));
        assert!(!validate_email("user@example"));
        assert!(!validate_email("example.com"));
    }

    #[test]
    fn shortens_long_addresses_only() {
        assert_eq!(shorten_address("abc"), "abc");
        assert_eq!(
            shorten_address("So11111111111111111111111111111111111111112"),
            "So111...11112"
        );
    }
}
