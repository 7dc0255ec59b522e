//! Pure pricing engine.
//!
//! Stateless functions over products, customizations and cart lines. No
//! error conditions beyond arithmetic overflow; inputs are pre-validated
//! by the cart store.

use crate::cart::customization::Customization;
use crate::cart::store::CartLine;
use crate::catalog::Product;
use crate::error::ShopError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Flat surcharge applied whenever customization is requested at all.
pub const CUSTOMIZATION_BASE_FEE: i64 = 1245;

/// Additional fee for a printed player name.
pub const CUSTOMIZATION_NAME_FEE: i64 = 415;

/// Additional fee for a printed player number.
pub const CUSTOMIZATION_NUMBER_FEE: i64 = 415;

/// Subtotal at or above which shipping is free.
pub const FREE_SHIPPING_THRESHOLD: i64 = 8300;

/// Flat shipping fee below the free-shipping threshold.
pub const FLAT_SHIPPING_FEE: i64 = 829;

/// Tax, as a percentage of the subtotal.
pub const TAX_RATE_PERCENT: f64 = 8.0;

/// Compute the surcharge for a customization request.
///
/// `None` costs nothing; any payload costs the base fee plus a fee per
/// populated attribute.
pub fn customization_surcharge(
    customization: Option<&Customization>,
    currency: Currency,
) -> Money {
    let Some(c) = customization else {
        return Money::zero(currency);
    };
    let mut fee = CUSTOMIZATION_BASE_FEE;
    if c.has_name() {
        fee += CUSTOMIZATION_NAME_FEE;
    }
    if c.has_number() {
        fee += CUSTOMIZATION_NUMBER_FEE;
    }
    Money::new(fee, currency)
}

/// Compute the unit price a line freezes at insertion time.
///
/// Later catalog price changes never reprice lines already in the cart.
pub fn effective_unit_price(product: &Product, customization: Option<&Customization>) -> Money {
    let surcharge = customization_surcharge(customization, product.price.currency);
    Money::new(
        product.price.amount_minor + surcharge.amount_minor,
        product.price.currency,
    )
}

/// Derived totals for the current cart contents.
///
/// Never stored; recomputed on every read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of unit price x quantity over all lines.
    pub subtotal: Money,
    /// Flat fee, or zero at and above the free-shipping threshold.
    pub shipping: Money,
    /// Fixed percentage of the subtotal.
    pub tax: Money,
    /// Grand total.
    pub total: Money,
}

impl CartTotals {
    /// Totals for an empty cart in the given currency.
    pub fn empty(currency: Currency) -> Self {
        Self {
            subtotal: Money::zero(currency),
            shipping: Money::new(FLAT_SHIPPING_FEE, currency),
            tax: Money::zero(currency),
            total: Money::new(FLAT_SHIPPING_FEE, currency),
        }
    }

    /// Check if the order ships free.
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// Compute cart totals from the line collection.
///
/// Order-independent: permuting the lines never changes the result.
pub fn cart_totals(lines: &[CartLine], currency: Currency) -> Result<CartTotals, ShopError> {
    let mut subtotal = Money::zero(currency);
    for line in lines {
        let line_total = line
            .unit_price
            .try_multiply(line.quantity)
            .ok_or(ShopError::Overflow)?;
        subtotal = subtotal.try_add(&line_total).ok_or(ShopError::Overflow)?;
    }

    let shipping = if subtotal.amount_minor >= FREE_SHIPPING_THRESHOLD {
        Money::zero(currency)
    } else {
        Money::new(FLAT_SHIPPING_FEE, currency)
    };
    let tax = subtotal.percentage(TAX_RATE_PERCENT);

    let total = subtotal
        .try_add(&shipping)
        .and_then(|t| t.try_add(&tax))
        .ok_or(ShopError::Overflow)?;

    Ok(CartTotals {
        subtotal,
        shipping,
        tax,
        total,
    })
}
