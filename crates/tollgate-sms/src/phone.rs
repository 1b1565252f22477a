//! Phone number normalization.
//!
//! Numbers are stored and sent in E.164 form. Bare national numbers get
//! the +91 country code after leading zeros are dropped.

/// Normalize a phone number to E.164.
///
/// Strips every character except digits and a leading `+`. A number
/// without a country code is treated as Indian national format.
pub fn normalize_number(raw: &str) -> String {
    let has_plus = raw.trim_start().starts_with('+');
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if has_plus {
        format!("+{digits}")
    } else {
        format!("+91{}", digits.trim_start_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_national_number_gets_country_code() {
        assert_eq!(normalize_number("9876543210"), "+919876543210");
    }

    #[test]
    fn test_leading_zeros_dropped() {
        assert_eq!(normalize_number("09876543210"), "+919876543210");
    }

    #[test]
    fn test_existing_country_code_kept() {
        assert_eq!(normalize_number("+14155552671"), "+14155552671");
        assert_eq!(normalize_number("+91 98765 43210"), "+919876543210");
    }

    #[test]
    fn test_punctuation_stripped() {
        assert_eq!(normalize_number("098-765 (43210)"), "+919876543210");
    }
}
