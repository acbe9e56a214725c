//! Report and analytics data for printable views.

mod analytics;
mod summary;

pub use analytics::*;
pub use summary::*;

/// `round(value / total * 100)`, clamped to 0-100. A non-positive total
/// yields 0.
pub fn percentage(value: f64, total: f64) -> u8 {
    if total <= 0.0 || !total.is_finite() || !value.is_finite() {
        return 0;
    }
    (value / total * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Format a dollar amount as `$1,234.56`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let remainder = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{remainder:02}")
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1.0, 3.0), 33);
        assert_eq!(percentage(2.0, 3.0), 67);
        assert_eq!(percentage(5.0, 5.0), 100);
        assert_eq!(percentage(7.0, 5.0), 100);
        assert_eq!(percentage(-1.0, 5.0), 0);
        assert_eq!(percentage(3.0, 0.0), 0);
        assert_eq!(percentage(f64::NAN, 5.0), 0);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(5.5), "$5.50");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1234.56), "$1,234.56");
        assert_eq!(format_currency(1234567.0), "$1,234,567.00");
        assert_eq!(format_currency(-250.0), "-$250.00");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn test_csv_escaping() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
    }

    proptest! {
        #[test]
        fn prop_percentage_bounded(value in 0u32..10_000, total in 1u32..10_000) {
            let pct = percentage(value as f64, total as f64);
            prop_assert!(pct <= 100);
            let expected = ((value as f64 / total as f64) * 100.0).round().min(100.0) as u8;
            prop_assert_eq!(pct, expected);
        }

        #[test]
        fn prop_currency_round_trips_cents(cents in 0u64..1_000_000_000) {
            let formatted = format_currency(cents as f64 / 100.0);
            let digits: String = formatted.chars().filter(|c| c.is_ascii_digit()).collect();
            prop_assert_eq!(digits.parse::<u64>().unwrap(), cents);
        }
    }
}
