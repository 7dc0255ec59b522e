//! External service contracts consumed by the checkout orchestrator.

use crate::checkout::order::NewOrder;
use crate::error::{NotificationError, OrderSubmissionError};
use crate::ids::OrderId;
use async_trait::async_trait;

/// Durable order creation, provided by the external persistence service.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Create the order record and all of its line items as a single
    /// atomic operation.
    ///
    /// Callers must never observe a state where the order exists but some
    /// of its lines do not, or vice versa. On error, no order exists.
    async fn create_order(&self, order: NewOrder) -> Result<OrderId, OrderSubmissionError>;
}

/// Best-effort order confirmation dispatch (email), fire-and-forget.
#[async_trait]
pub trait ConfirmationNotifier: Send + Sync {
    /// Send the confirmation for a freshly created order.
    ///
    /// Failures are logged by the caller and never retried here; any retry
    /// policy belongs to the external service.
    async fn order_confirmation(&self, order_id: &OrderId) -> Result<(), NotificationError>;
}
