//! Cart store: the mutable line collection owned by the active session.
//!
//! All reads and writes go through the store's own operations; the browsing
//! UI and the checkout orchestrator both observe it only via [`CartStore::snapshot`].
//! The cart is volatile client state; losing it on restart is expected.

use crate::cart::customization::Customization;
use crate::cart::pricing::{cart_totals, effective_unit_price, CartTotals};
use crate::catalog::Product;
use crate::error::ShopError;
use crate::ids::{LineId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

/// Maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_LINE: i64 = 9999;

/// User-visible confirmation event emitted by cart mutations.
///
/// Delivery is best-effort and never gates the mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// An item was added to the cart.
    ItemAdded {
        /// Product name, or product name plus customization label.
        description: String,
        /// Whether the added line carries a customization.
        customized: bool,
    },
}

/// One entry in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Synthetic line identity, unique within the process lifetime.
    pub id: LineId,
    /// The catalog product this line references, kept for order creation.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Image reference (denormalized for display).
    pub image_url: String,
    /// Unit price frozen at insertion time, surcharge included.
    pub unit_price: Money,
    /// Quantity, always >= 1. A zero-quantity line never exists.
    pub quantity: i64,
    /// Customization payload, if any.
    pub customization: Option<Customization>,
}

impl CartLine {
    /// Check if this line carries a customization.
    pub fn is_customized(&self) -> bool {
        self.customization.is_some()
    }

    /// Line total (unit price x quantity), None on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.try_multiply(self.quantity)
    }
}

/// Read-only, internally consistent view of the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSnapshot {
    /// Lines in insertion order.
    pub lines: Vec<CartLine>,
    /// Totals derived from exactly these lines.
    pub totals: CartTotals,
}

/// In-memory cart, scoped to one session.
#[derive(Debug)]
pub struct CartStore {
    lines: Vec<CartLine>,
    currency: Currency,
    events: Option<UnboundedSender<CartEvent>>,
}

impl CartStore {
    /// Create an empty cart in the default store currency.
    pub fn new() -> Self {
        Self::with_currency(Currency::default())
    }

    /// Create an empty cart in the given currency.
    pub fn with_currency(currency: Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
            events: None,
        }
    }

    /// Attach a sink for user-visible confirmation events.
    pub fn set_event_sink(&mut self, sink: UnboundedSender<CartEvent>) {
        self.events = Some(sink);
    }

    /// The cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Add one unit of a product without customization.
    ///
    /// Two uncustomized lines for the same product never coexist: a
    /// duplicate add increments the existing line's quantity instead.
    pub fn add_standard(&mut self, product: &Product) -> Result<LineId, ShopError> {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id && !l.is_customized())
        {
            let quantity = line.quantity.checked_add(1).ok_or(ShopError::Overflow)?;
            if quantity > MAX_QUANTITY_PER_LINE {
                return Err(ShopError::QuantityExceedsLimit(
                    quantity,
                    MAX_QUANTITY_PER_LINE,
                ));
            }
            line.quantity = quantity;
            let id = line.id;
            self.emit(CartEvent::ItemAdded {
                description: product.name.clone(),
                customized: false,
            });
            return Ok(id);
        }

        let line = CartLine {
            id: LineId::generate(),
            product_id: product.id,
            name: product.name.clone(),
            image_url: product.image_url.clone(),
            unit_price: effective_unit_price(product, None),
            quantity: 1,
            customization: None,
        };
        let id = line.id;
        self.lines.push(line);
        self.emit(CartEvent::ItemAdded {
            description: product.name.clone(),
            customized: false,
        });
        Ok(id)
    }

    /// Add one unit of a product with a customization.
    ///
    /// Always appends a new line, even when an identical customization of
    /// the same product is already in the cart. The surcharge is frozen
    /// into the unit price at insertion.
    pub fn add_customized(
        &mut self,
        product: &Product,
        customization: Customization,
    ) -> Result<LineId, ShopError> {
        customization.validate()?;

        let description = format!("{} - {}", product.name, customization.label());
        let line = CartLine {
            id: LineId::generate(),
            product_id: product.id,
            name: product.name.clone(),
            image_url: product.image_url.clone(),
            unit_price: effective_unit_price(product, Some(&customization)),
            quantity: 1,
            customization: Some(customization),
        };
        let id = line.id;
        self.lines.push(line);
        self.emit(CartEvent::ItemAdded {
            description,
            customized: true,
        });
        Ok(id)
    }

    /// Replace a line's quantity.
    ///
    /// Zero removes the line; negative quantities are rejected. Returns
    /// whether a line was affected.
    pub fn update_quantity(&mut self, line_id: LineId, quantity: i64) -> Result<bool, ShopError> {
        if quantity < 0 {
            return Err(ShopError::InvalidQuantity(quantity));
        }
        if quantity == 0 {
            return Ok(self.remove(line_id));
        }
        if quantity > MAX_QUANTITY_PER_LINE {
            return Err(ShopError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_LINE,
            ));
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.id == line_id) {
            line.quantity = quantity;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Remove a line. Removing an absent id is a no-op.
    pub fn remove(&mut self, line_id: LineId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.id != line_id);
        self.lines.len() < len_before
    }

    /// Empty the cart. Used after confirmed order placement.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Get a line by id.
    pub fn get(&self, line_id: LineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    /// Read-only view combining lines with freshly computed totals.
    pub fn snapshot(&self) -> Result<CartSnapshot, ShopError> {
        let totals = cart_totals(&self.lines, self.currency)?;
        Ok(CartSnapshot {
            lines: self.lines.clone(),
            totals,
        })
    }

    fn emit(&self, event: CartEvent) {
        if let Some(sink) = &self.events {
            if sink.send(event).is_err() {
                tracing::debug!("cart event sink closed; confirmation event dropped");
            }
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}
