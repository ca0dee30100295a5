//! Request and response bodies for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::payment::{CreateCheckoutCommand, CreateCheckoutResult};

/// Request to open a checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCheckoutRequest {
    pub project_id: String,
    pub freelancer_id: String,
    /// Minor currency units.
    pub amount: i64,
    #[serde(default)]
    pub currency: Option<String>,
}

impl From<CreateCheckoutRequest> for CreateCheckoutCommand {
    fn from(req: CreateCheckoutRequest) -> Self {
        Self {
            project_id: req.project_id,
            freelancer_id: req.freelancer_id,
            amount: req.amount,
            currency: req.currency,
        }
    }
}

/// Response with the hosted checkout URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub checkout_url: String,
    pub payment_id: String,
}

impl From<CreateCheckoutResult> for CheckoutResponse {
    fn from(result: CreateCheckoutResult) -> Self {
        Self {
            checkout_url: result.checkout_url,
            payment_id: result.payment_id.to_string(),
        }
    }
}
