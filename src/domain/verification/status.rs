//! Identity verification status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verification status stored on a user.
///
/// The identity provider reports more statuses than the three the
/// marketplace acts on ("in review", "expired", ...). Those are kept verbatim,
/// lower-cased, in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
    Other(String),
}

impl VerificationStatus {
    /// Parses a provider or stored status, normalizing case.
    pub fn parse(value: &str) -> Self {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "pending" => VerificationStatus::Pending,
            "approved" => VerificationStatus::Approved,
            "rejected" => VerificationStatus::Rejected,
            _ => VerificationStatus::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Rejected => "rejected",
            VerificationStatus::Other(value) => value,
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, VerificationStatus::Approved)
    }
}

impl From<String> for VerificationStatus {
    fn from(value: String) -> Self {
        VerificationStatus::parse(&value)
    }
}

impl From<VerificationStatus> for String {
    fn from(status: VerificationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
