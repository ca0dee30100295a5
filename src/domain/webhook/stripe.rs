//! Stripe webhook signature verification.
//!
//! Stripe signs `"<timestamp>.<raw body>"` and sends the result in the
//! `Stripe-Signature` header as `t=<timestamp>,v1=<hex>[,v1=<hex>...]`.
//! Several `v1` entries appear while a signing secret is being rolled.

use super::signature::{
    check_freshness, constant_time_compare, hmac_sha256, SignatureError, MAX_TIMESTAMP_SKEW_SECS,
};

/// Parsed components from the Stripe-Signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripeSignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// v1 signatures (HMAC-SHA256), decoded from hex.
    pub v1_signatures: Vec<Vec<u8>>,
}

impl StripeSignatureHeader {
    /// Parses a Stripe-Signature header string.
    ///
    /// Unknown keys (including the legacy `v0`) are ignored.
    pub fn parse(header: &str) -> Result<Self, SignatureError> {
        if header.trim().is_empty() {
            return Err(SignatureError::MissingSignature);
        }

        let mut timestamp: Option<i64> = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                return Err(SignatureError::InvalidSignature);
            };

            match key.trim() {
                "t" => {
                    timestamp = Some(
                        value
                            .trim()
                            .parse()
                            .map_err(|_| SignatureError::InvalidTimestamp)?,
                    );
                }
                "v1" => {
                    let decoded =
                        hex::decode(value.trim()).map_err(|_| SignatureError::InvalidSignature)?;
                    v1_signatures.push(decoded);
                }
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(SignatureError::MissingTimestamp)?;
        if v1_signatures.is_empty() {
            return Err(SignatureError::MissingSignature);
        }

        Ok(Self {
            timestamp,
            v1_signatures,
        })
    }
}

/// Verifier for Stripe webhook signatures.
pub struct StripeWebhookVerifier {
    secret: String,
    tolerance_secs: i64,
}

impl StripeWebhookVerifier {
    /// Creates a new verifier with the given webhook signing secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            tolerance_secs: MAX_TIMESTAMP_SKEW_SECS,
        }
    }

    /// Verifies the header against the exact raw payload bytes.
    pub fn verify(&self, payload: &[u8], signature_header: &str, now: i64) -> Result<(), SignatureError> {
        let header = StripeSignatureHeader::parse(signature_header)?;
        check_freshness(header.timestamp, now, self.tolerance_secs)?;

        let expected = self.compute_signature(header.timestamp, payload);
        let matched = header
            .v1_signatures
            .iter()
            .any(|candidate| constant_time_compare(&expected, candidate));

        if !matched {
            return Err(SignatureError::InvalidSignature);
        }
        Ok(())
    }

    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Vec<u8> {
        let mut signed_payload = format!("{}.", timestamp).into_bytes();
        signed_payload.extend_from_slice(payload);
        hmac_sha256(self.secret.as_bytes(), &signed_payload)
    }
}

/// Builds a valid Stripe-Signature header value, for test fixtures.
#[cfg(test)]
pub fn sign_for_test(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let verifier = StripeWebhookVerifier::new(secret);
    format!(
        "t={},v1={}",
        timestamp,
        hex::encode(verifier.compute_signature(timestamp, payload))
    )
}
