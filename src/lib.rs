//! Storefront cart and checkout domain for a jersey shop.
//!
//! This crate provides the parts of the storefront with real invariants:
//!
//! - **Catalog**: read-only product entities plus browse sorting/filtering
//! - **Cart**: line-item store with customization pricing and derived totals
//! - **Checkout**: input shaping/validation and the order-submission state
//!   machine, wired to external order and notification services
//!
//! Rendering, routing, authentication screens and catalog CRUD are external
//! concerns; the crate consumes their results (a [`catalog::Product`], a
//! signed-in [`auth::Principal`]) and produces a [`checkout::NewOrder`] for
//! the external order service.
//!
//! # Example
//!
//! ```rust,ignore
//! use jersey_commerce::prelude::*;
//!
//! let mut cart = CartStore::new();
//! cart.add_standard(&product)?;
//! cart.add_customized(&product, customization)?;
//!
//! let snapshot = cart.snapshot()?;
//! println!("Total: {}", snapshot.totals.total.display());
//!
//! let orchestrator = CheckoutOrchestrator::new(order_service, notifier);
//! let order_id = orchestrator
//!     .place_order(&mut cart, &shipping, &payment, Some(&user))
//!     .await?;
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod ids;
pub mod money;

pub use error::ShopError;
pub use ids::{LineId, OrderId, ProductId, UserId};
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{NotificationError, OrderSubmissionError, ShopError};
    pub use crate::ids::{LineId, OrderId, ProductId, UserId};
    pub use crate::money::{Currency, Money};

    pub use crate::auth::Principal;
    pub use crate::catalog::{Product, SortBy};

    pub use crate::cart::{
        CartEvent, CartLine, CartSnapshot, CartStore, CartTotals, Customization,
    };

    pub use crate::checkout::{
        CheckoutOrchestrator, CheckoutState, ConfirmationNotifier, NewOrder, OrderLineRequest,
        OrderService, PaymentInfo, ShippingInfo,
    };
}
