//! Response bodies for verification endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::verification::StartVerificationResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartVerificationResponse {
    pub verification_url: String,
    pub session_id: String,
}

impl From<StartVerificationResult> for StartVerificationResponse {
    fn from(result: StartVerificationResult) -> Self {
        Self {
            verification_url: result.verification_url,
            session_id: result.session_id,
        }
    }
}
