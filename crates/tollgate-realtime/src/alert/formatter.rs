//! Alert message text: construction, cleanup, and channel limits.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum SMS body length accepted by the gateway.
const SMS_BODY_LIMIT: usize = 160;

/// Maximum stored length for a gateway error diagnostic.
const SMS_ERROR_LIMIT: usize = 200;

/// Tag prefixed to every outbound SMS.
const SMS_TAG: &str = "TollAlert: ";

/// Matches a trailing ISO-8601 timestamp fragment left by upstream
/// formatting bugs, e.g. `"... 2024-01-01T10:00:00.000Z"`.
static TRAILING_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z\s*$").expect("valid regex")
});

/// Strip a trailing ISO-8601 timestamp from an alert message.
pub fn clean_message(message: &str) -> String {
    TRAILING_TIMESTAMP.replace(message, "").trim().to_string()
}

/// Low-balance alert text.
pub fn low_balance_message(balance: f64, threshold: f64) -> String {
    format!("Low balance: ₹{balance}. Minimum threshold: ₹{threshold}")
}

/// Plaza-approach alert text, distance rounded to one decimal.
pub fn approaching_message(plaza_name: &str, distance_km: f64, toll_fee: f64) -> String {
    format!("Approaching {plaza_name} ({distance_km:.1}km away). Fee: ₹{toll_fee}")
}

/// Build the SMS body: tagged and truncated to the channel limit.
pub fn sms_body(message: &str) -> String {
    let truncated: String = message.chars().take(SMS_BODY_LIMIT).collect();
    format!("{SMS_TAG}{truncated}")
}

/// Truncate a gateway error for storage on the record.
pub fn sms_error_text(error: &str) -> String {
    error.chars().take(SMS_ERROR_LIMIT).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_timestamp_stripped() {
        assert_eq!(
            clean_message("Low balance: ₹150. Minimum threshold: ₹200 2024-01-01T10:00:00.000Z"),
            "Low balance: ₹150. Minimum threshold: ₹200"
        );
    }

    #[test]
    fn test_message_without_timestamp_untouched() {
        assert_eq!(
            clean_message("Approaching Kherki Daula (1.5km away). Fee: ₹65"),
            "Approaching Kherki Daula (1.5km away). Fee: ₹65"
        );
    }

    #[test]
    fn test_timestamp_in_the_middle_kept() {
        let msg = "Recharged on 2024-01-01T10:00:00.000Z via UPI";
        assert_eq!(clean_message(msg), msg);
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(clean_message("  hello  "), "hello");
    }

    #[test]
    fn test_low_balance_message_formats_whole_rupees() {
        assert_eq!(
            low_balance_message(150.0, 200.0),
            "Low balance: ₹150. Minimum threshold: ₹200"
        );
    }

    #[test]
    fn test_approaching_message_one_decimal() {
        assert_eq!(
            approaching_message("Kherki Daula", 1.5012, 65.0),
            "Approaching Kherki Daula (1.5km away). Fee: ₹65"
        );
        assert_eq!(
            approaching_message("Ghalaunda", 2.0, 110.0),
            "Approaching Ghalaunda (2.0km away). Fee: ₹110"
        );
    }

    #[test]
    fn test_sms_body_tagged_and_truncated() {
        let body = sms_body(&"x".repeat(300));
        assert!(body.starts_with(SMS_TAG));
        assert_eq!(body.len(), SMS_TAG.len() + SMS_BODY_LIMIT);
    }

    #[test]
    fn test_sms_error_truncated() {
        assert_eq!(sms_error_text(&"e".repeat(500)).len(), SMS_ERROR_LIMIT);
        assert_eq!(sms_error_text("bad number"), "bad number");
    }
}
