//! Display strings for money and percentages.

/// `$12.5M` from one million up, `$850K` below.
pub fn compact_currency(amount: f64) -> String {
    if amount >= 1_000_000.0 {
        format!("${:.1}M", amount / 1_000_000.0)
    } else {
        format!("${:.0}K", amount / 1_000.0)
    }
}

/// One decimal, with an explicit `+` for positive values.
pub fn signed_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.1}%")
    } else {
        format!("{value:.1}%")
    }
}

pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_switches_unit_at_one_million() {
        assert_eq!(compact_currency(12_500_000.0), "$12.5M");
        assert_eq!(compact_currency(1_000_000.0), "$1.0M");
        assert_eq!(compact_currency(999_000.0), "$999K");
        assert_eq!(compact_currency(850_000.0), "$850K");
        assert_eq!(compact_currency(0.0), "$0K");
    }

    #[test]
    fn percent_signs() {
        assert_eq!(signed_percent(3.2), "+3.2%");
        assert_eq!(signed_percent(-1.5), "-1.5%");
        assert_eq!(signed_percent(0.0), "0.0%");
        assert_eq!(percent(28.0), "28.0%");
    }
}
