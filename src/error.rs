//! Shop error types.

use thiserror::Error;

/// Errors that can occur in cart and checkout operations.
#[derive(Error, Debug)]
pub enum ShopError {
    /// Required checkout input is missing or malformed.
    #[error("Missing required fields: {0}")]
    Validation(String),

    /// Checkout was attempted with no lines in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// No authenticated user; orders must be attributable to an account.
    #[error("You must be logged in to place an order")]
    NotAuthenticated,

    /// Quantity is negative.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds the per-line maximum.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Customization payload violates a field rule.
    #[error("Invalid customization: {0}")]
    InvalidCustomization(String),

    /// A submission is already in flight for this checkout.
    #[error("An order submission is already in progress")]
    CheckoutInProgress,

    /// The external order service rejected or failed the submission.
    #[error("Order placement failed: {0}")]
    OrderSubmission(#[from] OrderSubmissionError),

    /// Arithmetic overflow in a money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ShopError {
    fn from(e: serde_json::Error) -> Self {
        ShopError::Serialization(e.to_string())
    }
}

/// Failure reported by the external order service.
///
/// The order-creation contract is atomic: when this error is returned, no
/// order record exists and the cart must be left untouched so the user can
/// retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct OrderSubmissionError {
    /// Human-readable reason, surfaced to the user.
    pub message: String,
}

impl OrderSubmissionError {
    /// Create a new submission error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure reported by the confirmation notification side effect.
///
/// Notification is best-effort: this error is logged and never surfaced on
/// the checkout success path. The order is already durably committed when
/// notification runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct NotificationError {
    /// Human-readable reason, for the log only.
    pub message: String,
}

impl NotificationError {
    /// Create a new notification error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
