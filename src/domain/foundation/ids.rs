//! Strongly-typed identifier value objects.
//!
//! Record identifiers are assigned by the record store and are opaque to the
//! domain, so every id wraps a non-empty string rather than a UUID.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new id, returning error if empty.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(id))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a user record (client or freelancer).
    UserId,
    "user_id"
);

record_id!(
    /// Identifier of a project record.
    ProjectId,
    "project_id"
);

record_id!(
    /// Identifier of a proposal record.
    ProposalId,
    "proposal_id"
);

record_id!(
    /// Identifier of a payment record; echoed back by the payment provider as
    /// the `payment_id` correlation metadata.
    PaymentId,
    "payment_id"
);

record_id!(
    /// Identifier of a conversation (channel mapping) record.
    ConversationId,
    "conversation_id"
);
