// Constants for conversion
pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// Convert lamports to SOL
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL
}

/// Convert SOL to lamports
pub fn sol_to_lamports(sol: f64) -> u64 {
    (sol * LAMPORTS_PER_SOL) as u64
}

/// Convert a human amount to base token units for the given decimals.
pub fn to_base_units(amount: f64, decimals: u8) -> u64 {
    (amount * 10_f64.powi(decimals as i32)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_between_sol_and_lamports() {
        assert_eq!(sol_to_lamports(1.5), 1_500_000_000);
        assert_eq!(lamports_to_sol(250_000_000), 0.25);
    }

    #[test]
    fn truncates_fractional_base_units() {
        assert_eq!(to_base_units(1.2345678, 6), 1_234_567);
        assert_eq!(to_base_units(0.1, 9), 100_000_000);
    }
}
