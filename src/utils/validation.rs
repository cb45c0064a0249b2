use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Target rate typed by the user
    /// Format: 2 or 3 integer digits without a leading zero, a comma, 4 fraction digits
    static ref RATE_INPUT_REGEX: Regex =
        Regex::new(r"^(([1-9][0-9][0-9])|([1-9][0-9])),([0-9]{4})$")
            .expect("Invalid regex pattern");
}

/// Check a user-entered rate such as `75,1234`
///
/// Only strings passing this check may be persisted as the target rate.
pub fn is_valid_rate(input: &str) -> bool {
    RATE_INPUT_REGEX.is_match(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_rates() {
        assert!(is_valid_rate("75,1234"));
        assert!(is_valid_rate("123,0000"));
        assert!(is_valid_rate("10,0000"));
        assert!(is_valid_rate("71,2345"));
    }

    #[test]
    fn test_rejects_dot_decimal() {
        assert!(!is_valid_rate("75.1234"));
    }

    #[test]
    fn test_rejects_wrong_integer_part() {
        assert!(!is_valid_rate("7,1234"));
        assert!(!is_valid_rate("075,1234"));
        assert!(!is_valid_rate("1234,1234"));
        assert!(!is_valid_rate(",1234"));
    }

    #[test]
    fn test_rejects_wrong_fraction_part() {
        assert!(!is_valid_rate("123,12345"));
        assert!(!is_valid_rate("75,123"));
        assert!(!is_valid_rate("75,"));
        assert!(!is_valid_rate("75"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(!is_valid_rate(""));
        assert!(!is_valid_rate("abc"));
        assert!(!is_valid_rate(" 75,1234"));
        assert!(!is_valid_rate("75,1234\n"));
        assert!(!is_valid_rate("7a,1234"));
    }
}
