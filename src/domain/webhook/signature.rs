//! HMAC-SHA256 webhook signature verification.
//!
//! Providers sign the raw request body with a shared secret and send the
//! lowercase hex digest alongside an epoch-seconds timestamp header. Both the
//! digest and the timestamp must check out before any byte of the body is
//! decoded.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Maximum allowed distance between the signing timestamp and now (5 minutes).
pub const MAX_TIMESTAMP_SKEW_SECS: i64 = 300;

/// Reasons a webhook signature check fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("Missing timestamp header")]
    MissingTimestamp,

    #[error("Invalid timestamp header")]
    InvalidTimestamp,

    #[error("Timestamp outside the allowed window ({skew_secs}s)")]
    StaleTimestamp { skew_secs: i64 },

    #[error("Missing signature header")]
    MissingSignature,

    #[error("Invalid signature")]
    InvalidSignature,
}

/// Parses an epoch-seconds timestamp header.
pub fn parse_timestamp(header: Option<&str>) -> Result<i64, SignatureError> {
    let value = header
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(SignatureError::MissingTimestamp)?;

    value
        .parse::<i64>()
        .map_err(|_| SignatureError::InvalidTimestamp)
}

/// Rejects timestamps further than `max_skew_secs` from `now` in either direction.
pub fn check_freshness(timestamp: i64, now: i64, max_skew_secs: i64) -> Result<(), SignatureError> {
    let skew = now.saturating_sub(timestamp);
    if skew > max_skew_secs || skew < -max_skew_secs {
        return Err(SignatureError::StaleTimestamp { skew_secs: skew });
    }
    Ok(())
}

/// Computes the raw HMAC-SHA256 digest of `message` keyed with `secret`.
pub fn hmac_sha256(secret: &[u8], message: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}

/// Computes the lowercase hex HMAC-SHA256 signature of a raw body.
pub fn compute_signature(secret: &str, raw_body: &[u8]) -> String {
    hex::encode(hmac_sha256(secret.as_bytes(), raw_body))
}

/// Performs constant-time comparison of two byte slices.
///
/// Length is not secret; only the content comparison is constant time.
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Checks a body signature and its timestamp, reporting why verification failed.
///
/// The timestamp is validated first so stale replays are rejected without
/// computing a digest.
pub fn check(
    secret: &str,
    signature_header: Option<&str>,
    raw_body: &[u8],
    timestamp_header: Option<&str>,
    now: i64,
    max_skew_secs: i64,
) -> Result<(), SignatureError> {
    let timestamp = parse_timestamp(timestamp_header)?;
    check_freshness(timestamp, now, max_skew_secs)?;

    let provided = signature_header
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(SignatureError::MissingSignature)?;

    let expected = compute_signature(secret, raw_body);
    if !constant_time_compare(expected.as_bytes(), provided.as_bytes()) {
        return Err(SignatureError::InvalidSignature);
    }

    Ok(())
}

/// Returns true iff the signature matches the body and the timestamp is fresh.
pub fn verify(
    secret: &str,
    signature_header: Option<&str>,
    raw_body: &[u8],
    timestamp_header: Option<&str>,
    now: i64,
    max_skew_secs: i64,
) -> bool {
    check(
        secret,
        signature_header,
        raw_body,
        timestamp_header,
        now,
        max_skew_secs,
    )
    .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SECRET: &str = "didit_webhook_secret";
    const NOW: i64 = 1_760_000_000;
    const BODY: &[u8] = br#"{"session_id":"sess_1","status":"Approved","webhook_type":"status.updated"}"#;

    fn ts(offset: i64) -> String {
        (NOW + offset).to_string()
    }

    #[test]
    fn valid_signature_and_timestamp_verify() {
        let signature = compute_signature(SECRET, BODY);
        assert!(verify(
            SECRET,
            Some(&signature),
            BODY,
            Some(&ts(0)),
            NOW,
            MAX_TIMESTAMP_SKEW_SECS
        ));
    }

    #[test]
    fn signature_is_lowercase_hex_sha256() {
        let signature = compute_signature(SECRET, BODY);
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn wrong_secret_fails() {
        let signature = compute_signature("other_secret", BODY);
        let result = check(SECRET, Some(&signature), BODY, Some(&ts(0)), NOW, 300);
        assert_eq!(result, Err(SignatureError::InvalidSignature));
    }

    #[test]
    fn reserialized_body_fails() {
        let signature = compute_signature(SECRET, BODY);
        let value: serde_json::Value = serde_json::from_slice(BODY).unwrap();
        let reserialized = serde_json::to_vec_pretty(&value).unwrap();

        assert!(!verify(SECRET, Some(&signature), &reserialized, Some(&ts(0)), NOW, 300));
    }

    #[test]
    fn skew_at_boundary_is_accepted() {
        let signature = compute_signature(SECRET, BODY);
        assert!(verify(SECRET, Some(&signature), BODY, Some(&ts(-300)), NOW, 300));
        assert!(verify(SECRET, Some(&signature), BODY, Some(&ts(300)), NOW, 300));
    }

    #[test]
    fn skew_past_boundary_is_rejected() {
        let signature = compute_signature(SECRET, BODY);
        let past = check(SECRET, Some(&signature), BODY, Some(&ts(-301)), NOW, 300);
        assert_eq!(past, Err(SignatureError::StaleTimestamp { skew_secs: 301 }));

        let future = check(SECRET, Some(&signature), BODY, Some(&ts(301)), NOW, 300);
        assert_eq!(future, Err(SignatureError::StaleTimestamp { skew_secs: -301 }));
    }

    #[test]
    fn missing_timestamp_fails_closed() {
        let signature = compute_signature(SECRET, BODY);
        assert_eq!(
            check(SECRET, Some(&signature), BODY, None, NOW, 300),
            Err(SignatureError::MissingTimestamp)
        );
        assert_eq!(
            check(SECRET, Some(&signature), BODY, Some("  "), NOW, 300),
            Err(SignatureError::MissingTimestamp)
        );
    }

    #[test]
    fn unparsable_timestamp_fails_closed() {
        let signature = compute_signature(SECRET, BODY);
        assert_eq!(
            check(SECRET, Some(&signature), BODY, Some("yesterday"), NOW, 300),
            Err(SignatureError::InvalidTimestamp)
        );
        assert_eq!(
            check(SECRET, Some(&signature), BODY, Some("1.5e9"), NOW, 300),
            Err(SignatureError::InvalidTimestamp)
        );
    }

    #[test]
    fn missing_signature_fails_closed() {
        assert_eq!(
            check(SECRET, None, BODY, Some(&ts(0)), NOW, 300),
            Err(SignatureError::MissingSignature)
        );
    }

    #[test]
    fn uppercase_signature_is_not_accepted() {
        let signature = compute_signature(SECRET, BODY).to_uppercase();
        assert!(!verify(SECRET, Some(&signature), BODY, Some(&ts(0)), NOW, 300));
    }

    #[test]
    fn constant_time_compare_handles_lengths() {
        assert!(constant_time_compare(b"abc", b"abc"));
        assert!(!constant_time_compare(b"abc", b"abd"));
        assert!(!constant_time_compare(b"abc", b"abcd"));
        assert!(constant_time_compare(b"", b""));
    }

    proptest! {
        #[test]
        fn flipping_any_body_byte_fails(index in 0usize..BODY.len(), mask in 1u8..=255) {
            let signature = compute_signature(SECRET, BODY);
            let mut tampered = BODY.to_vec();
            tampered[index] ^= mask;
            prop_assert!(!verify(SECRET, Some(&signature), &tampered, Some(&ts(0)), NOW, 300));
        }

        #[test]
        fn flipping_any_signature_byte_fails(index in 0usize..64, mask in 1u8..=127) {
            let signature = compute_signature(SECRET, BODY);
            let mut tampered = signature.into_bytes();
            tampered[index] ^= mask;
            let tampered = String::from_utf8_lossy(&tampered).into_owned();
            prop_assert!(!verify(SECRET, Some(&tampered), BODY, Some(&ts(0)), NOW, 300));
        }

        #[test]
        fn freshness_matches_absolute_skew(offset in -1000i64..1000) {
            let fresh = check_freshness(NOW + offset, NOW, 300).is_ok();
            prop_assert_eq!(fresh, offset.abs() <= 300);
        }
    }
}
