//! Checkout module.
//!
//! Contains the shipping/payment input types, the order submission payload,
//! the external service contracts, and the checkout orchestrator.

mod forms;
mod order;
mod orchestrator;
mod service;

pub use forms::{format_card_number, format_cvv, format_expiry_date, PaymentInfo, ShippingInfo};
pub use order::{NewOrder, OrderLineRequest};
pub use orchestrator::{CheckoutOrchestrator, CheckoutState};
pub use service::{ConfirmationNotifier, OrderService};
