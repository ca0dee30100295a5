//! Identity provider webhook payload.

use serde::{Deserialize, Deserializer};

use super::{VerificationDecision, VerificationStatus};

/// Decision block nested in the webhook body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WebhookDecision {
    #[serde(deserialize_with = "null_as_default")]
    pub session_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
}

/// Body of a verification status webhook.
///
/// Absent and `null` fields both decode to their empty value, so partially
/// filled deliveries still decode; the reconciler decides what to do with
/// missing values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VerificationWebhookPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub session_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub webhook_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub decision: WebhookDecision,
    #[serde(deserialize_with = "null_as_default")]
    pub reason: String,
}

/// In-progress updates carry `"decision": null` and `"reason": null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl VerificationWebhookPayload {
    /// Extracts an actionable decision.
    ///
    /// Returns `None` when the session id, status or webhook type is empty.
    pub fn decision(&self) -> Option<VerificationDecision> {
        if self.session_id.is_empty() || self.status.is_empty() || self.webhook_type.is_empty() {
            return None;
        }
        Some(VerificationDecision {
            session_id: self.session_id.clone(),
            status: VerificationStatus::parse(&self.status),
            reason: self.reason.clone(),
        })
    }
}
