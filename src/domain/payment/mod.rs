//! Payment domain: checkout attempts, platform fees, and provider outcomes.

mod aggregate;
mod errors;
mod fee;
mod status;

pub use aggregate::{NewPayment, Payment};
pub use errors::{CheckoutError, PaymentWebhookError};
pub use fee::{normalize_currency, platform_fee, FeePercent, DEFAULT_CURRENCY};
pub use status::{PaymentStatus, StatusChange};
