//! Payment status and its transition rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a checkout attempt.
///
/// ```text
/// created ──► paid
///    │
///    └─────► failed
/// ```
///
/// `paid` and `failed` are terminal inside this system; the payment provider
/// never reports a reversal between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Created,
    Paid,
    Failed,
}

/// Result of asking a status to move to a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// The status changes; a write is required.
    Apply,
    /// Already at the target; nothing to write.
    Unchanged,
    /// The move would reverse a terminal state.
    Rejected,
}

impl PaymentStatus {
    /// Decides whether moving to `target` is a write, a no-op, or forbidden.
    pub fn change_to(self, target: PaymentStatus) -> StatusChange {
        match (self, target) {
            (current, target) if current == target => StatusChange::Unchanged,
            (PaymentStatus::Created, _) => StatusChange::Apply,
            _ => StatusChange::Rejected,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Created => "created",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }

    /// Parses a stored status value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "created" => Some(PaymentStatus::Created),
            "paid" => Some(PaymentStatus::Paid),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_moves_to_paid_or_failed() {
        assert_eq!(
            PaymentStatus::Created.change_to(PaymentStatus::Paid),
            StatusChange::Apply
        );
        assert_eq!(
            PaymentStatus::Created.change_to(PaymentStatus::Failed),
            StatusChange::Apply
        );
    }

    #[test]
    fn same_status_is_unchanged() {
        for status in [PaymentStatus::Created, PaymentStatus::Paid, PaymentStatus::Failed] {
            assert_eq!(status.change_to(status), StatusChange::Unchanged);
        }
    }

    #[test]
    fn terminal_states_never_reverse() {
        assert_eq!(
            PaymentStatus::Paid.change_to(PaymentStatus::Failed),
            StatusChange::Rejected
        );
        assert_eq!(
            PaymentStatus::Failed.change_to(PaymentStatus::Paid),
            StatusChange::Rejected
        );
        assert_eq!(
            PaymentStatus::Paid.change_to(PaymentStatus::Created),
            StatusChange::Rejected
        );
    }

    #[test]
    fn status_round_trips_through_storage_value() {
        for status in [PaymentStatus::Created, PaymentStatus::Paid, PaymentStatus::Failed] {
            assert_eq!(PaymentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PaymentStatus::parse("refunded"), None);
    }
}
