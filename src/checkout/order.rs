//! Order submission payload.
//!
//! Built from a live cart snapshot at submission time; once submitted the
//! order is an immutable record owned by the external order service.

use crate::cart::{CartSnapshot, Customization};
use crate::checkout::forms::ShippingInfo;
use crate::error::ShopError;
use crate::ids::{ProductId, UserId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One line of an order-creation request.
///
/// Always references the catalog product, never the synthetic cart-line id,
/// so customized lines keep their link back to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    /// Catalog product reference.
    pub product_id: ProductId,
    /// Quantity ordered.
    pub quantity: i64,
    /// Unit price as charged, surcharge included.
    pub price: Money,
    /// Customization payload, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customization: Option<Customization>,
}

/// The atomic order-creation request sent to the external order service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// The authenticated account the order is attributed to.
    pub user_id: UserId,
    /// Immutable list of order lines.
    pub line_items: Vec<OrderLineRequest>,
    /// Shipping info as an opaque structured payload.
    pub shipping_info: serde_json::Value,
    /// Authoritative charge amount, recomputed from the live cart.
    pub total: Money,
}

impl NewOrder {
    /// Build the request from a cart snapshot taken at submission time.
    pub fn from_snapshot(
        user_id: UserId,
        snapshot: &CartSnapshot,
        shipping: &ShippingInfo,
    ) -> Result<Self, ShopError> {
        let line_items = snapshot
            .lines
            .iter()
            .map(|line| OrderLineRequest {
                product_id: line.product_id,
                quantity: line.quantity,
                price: line.unit_price,
                customization: line.customization.clone(),
            })
            .collect();

        Ok(Self {
            user_id,
            line_items,
            shipping_info: serde_json::to_value(shipping)?,
            total: snapshot.totals.total,
        })
    }

    /// Total item count across all lines.
    pub fn item_count(&self) -> i64 {
        self.line_items.iter().map(|l| l.quantity).sum()
    }
}
