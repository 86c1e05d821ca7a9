//! Number formatting for metric display.
//!
//! Integers are shown with comma thousands separators (`4,555`). Decimals keep
//! their shortest round-trip form and always carry a fractional part (`3.0`,
//! `2.84`), so a multiplier never collapses into an integer-looking label.

/// Format an integer with comma thousands separators
#[must_use]
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a decimal in its shortest round-trip form
#[must_use]
pub fn plain_decimal(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Format a decimal with comma thousands separators on the integer part
#[must_use]
pub fn group_decimal(value: f64) -> String {
    let plain = plain_decimal(value);
    match plain.split_once('.') {
        Some((int_part, frac)) => match int_part.parse::<i64>() {
            Ok(n) if int_part != "-0" => format!("{}.{}", group_thousands(n), frac),
            _ => plain,
        },
        None => plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_small_values() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(21), "21");
        assert_eq!(group_thousands(847), "847");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(4555), "4,555");
        assert_eq!(group_thousands(1513), "1,513");
        assert_eq!(group_thousands(1_000_000), "1,000,000");
        assert_eq!(group_thousands(123_456_789), "123,456,789");
    }

    #[test]
    fn test_group_negative() {
        assert_eq!(group_thousands(-1234), "-1,234");
        assert_eq!(group_thousands(-12), "-12");
    }

    #[test]
    fn test_group_extremes() {
        assert_eq!(group_thousands(i64::MIN), "-9,223,372,036,854,775,808");
        assert_eq!(group_thousands(i64::MAX), "9,223,372,036,854,775,807");
    }

    #[test]
    fn test_plain_decimal() {
        assert_eq!(plain_decimal(2.84), "2.84");
        assert_eq!(plain_decimal(3.21), "3.21");
        assert_eq!(plain_decimal(3.0), "3.0");
        assert_eq!(plain_decimal(0.5), "0.5");
    }

    #[test]
    fn test_group_decimal() {
        assert_eq!(group_decimal(1234.5), "1,234.5");
        assert_eq!(group_decimal(2.84), "2.84");
        assert_eq!(group_decimal(-98765.25), "-98,765.25");
        assert_eq!(group_decimal(4000.0), "4,000.0");
    }

    proptest::proptest! {
        #[test]
        fn prop_grouping_preserves_digits(value: i64) {
            let grouped = group_thousands(value);
            let stripped: String = grouped.chars().filter(|c| *c != ',').collect();
            proptest::prop_assert_eq!(stripped, value.to_string());
        }

        #[test]
        fn prop_groups_are_three_wide(value in 0i64..i64::MAX) {
            let grouped = group_thousands(value);
            let mut parts = grouped.split(',');
            let head = parts.next().unwrap_or_default();
            proptest::prop_assert!(!head.is_empty() && head.len() <= 3);
            for part in parts {
                proptest::prop_assert_eq!(part.len(), 3);
            }
        }
    }
}
