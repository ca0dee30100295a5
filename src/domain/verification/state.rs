//! Verification state carried on a user record.

use serde::{Deserialize, Serialize};

use super::VerificationStatus;

/// Identity verification fields of a user.
///
/// `session_id` is the correlation key the identity provider echoes back in
/// its webhooks. A user who never started verification has all three unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationState {
    pub session_id: Option<String>,
    pub status: Option<VerificationStatus>,
    pub reason: Option<String>,
}

/// A provider decision extracted from a webhook payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationDecision {
    pub session_id: String,
    pub status: VerificationStatus,
    /// Raw reason from the provider; empty when none was sent.
    pub reason: String,
}

impl VerificationState {
    /// State after a new verification session was opened.
    pub fn started(session_id: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            status: Some(VerificationStatus::Pending),
            reason: None,
        }
    }

    /// Computes the state after applying a provider decision.
    ///
    /// Returns `None` when (status, reason, session id) would be unchanged,
    /// meaning no write is needed. The stored reason is only overwritten by a
    /// non-empty one.
    pub fn apply(&self, decision: &VerificationDecision) -> Option<VerificationState> {
        let reason = if decision.reason.is_empty() {
            self.reason.clone()
        } else {
            Some(decision.reason.clone())
        };

        let next = VerificationState {
            session_id: Some(decision.session_id.clone()),
            status: Some(decision.status.clone()),
            reason,
        };

        (next != *self).then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decision(status: &str, reason: &str) -> VerificationDecision {
        VerificationDecision {
            session_id: "sess_1".to_string(),
            status: VerificationStatus::parse(status),
            reason: reason.to_string(),
        }
    }

    #[test]
    fn started_state_is_pending_without_reason() {
        let state = VerificationState::started("sess_1");
        assert_eq!(state.session_id.as_deref(), Some("sess_1"));
        assert_eq!(state.status, Some(VerificationStatus::Pending));
        assert!(state.reason.is_none());
    }

    #[test]
    fn approval_changes_status() {
        let state = VerificationState::started("sess_1");
        let next = state.apply(&decision("Approved", "")).unwrap();
        assert_eq!(next.status, Some(VerificationStatus::Approved));
        assert!(next.reason.is_none());
    }

    #[test]
    fn same_decision_twice_needs_no_write() {
        let state = VerificationState::started("sess_1");
        let next = state.apply(&decision("Approved", "")).unwrap();
        assert!(next.apply(&decision("approved", "")).is_none());
    }

    #[test]
    fn empty_reason_keeps_stored_reason() {
        let state = VerificationState::started("sess_1");
        let rejected = state.apply(&decision("Rejected", "document expired")).unwrap();
        assert_eq!(rejected.reason.as_deref(), Some("document expired"));

        // A later delivery without a reason leaves the stored one in place.
        assert!(rejected.apply(&decision("Rejected", "")).is_none());
        let approved = rejected.apply(&decision("Approved", "")).unwrap();
        assert_eq!(approved.reason.as_deref(), Some("document expired"));
    }

    #[test]
    fn non_empty_reason_overwrites() {
        let state = VerificationState::started("sess_1");
        let first = state.apply(&decision("Rejected", "blurry photo")).unwrap();
        let second = first.apply(&decision("Rejected", "document expired")).unwrap();
        assert_eq!(second.reason.as_deref(), Some("document expired"));
    }
}
