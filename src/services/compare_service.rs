use std::cmp::Ordering;

use crate::models::RateColor;

/// Parse a decimal-comma rate (`"73,5050"`) into a number
///
/// Returns `None` for anything `f64` cannot represent, including NaN.
pub fn parse_rate(value: &str) -> Option<f64> {
    value
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
}

/// Order the current rate against the target rate
///
/// `None` means indeterminate: at least one side is not a number and no
/// decision should be taken.
pub fn compare(current: &str, target: &str) -> Option<Ordering> {
    let current = parse_rate(current)?;
    let target = parse_rate(target)?;
    current.partial_cmp(&target)
}

/// Label color for the live rate; ties are not highlighted
pub fn decide_color(current: &str, target: &str) -> Option<RateColor> {
    compare(current, target).map(|ordering| match ordering {
        Ordering::Greater => RateColor::Green,
        Ordering::Less | Ordering::Equal => RateColor::Red,
    })
}

/// Whether the current rate is strictly above the target
pub fn is_above_target(current: &str, target: &str) -> bool {
    compare(current, target) == Some(Ordering::Greater)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("73,5050"), Some(73.505));
        assert_eq!(parse_rate("73.5050"), Some(73.505));
        assert_eq!(parse_rate("00.0000"), Some(0.0));
        assert_eq!(parse_rate("1x,00"), None);
        assert_eq!(parse_rate(""), None);
        assert_eq!(parse_rate("NaN"), None);
    }

    #[test]
    fn test_compare() {
        assert_eq!(compare("80,5000", "75,1000"), Some(Ordering::Greater));
        assert_eq!(compare("70,5000", "75,1000"), Some(Ordering::Less));
        assert_eq!(compare("75,1000", "75,1000"), Some(Ordering::Equal));
    }

    #[test]
    fn test_compare_is_numeric() {
        // "9,0" sorts after "10,0" as text
        assert_eq!(compare("9,0000", "10,0000"), Some(Ordering::Less));
        assert_eq!(compare("100,0000", "99,9999"), Some(Ordering::Greater));
    }

    #[test]
    fn test_compare_indeterminate() {
        assert_eq!(compare("1x,00", "75,0000"), None);
        assert_eq!(compare("75,0000", ""), None);
        assert_eq!(compare("75,0000", "1,2,3"), None);
    }

    #[test]
    fn test_decide_color() {
        assert_eq!(decide_color("80,5000", "75,1000"), Some(RateColor::Green));
        assert_eq!(decide_color("70,5000", "75,1000"), Some(RateColor::Red));
        assert_eq!(decide_color("75,1000", "75,1000"), Some(RateColor::Red));
        assert_eq!(decide_color("80,5000", ""), None);
    }

    #[test]
    fn test_is_above_target() {
        assert!(is_above_target("80,5000", "75,1000"));
        assert!(!is_above_target("75,1000", "75,1000"));
        assert!(!is_above_target("abc", "75,1000"));
    }
}
