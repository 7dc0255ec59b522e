//! Shopping cart module.
//!
//! Contains the customization payload, the pure pricing engine, and the
//! cart store state machine.

mod customization;
mod pricing;
mod store;

pub use customization::{Customization, MAX_PLAYER_NAME_LEN, MAX_PLAYER_NUMBER};
pub use pricing::{
    cart_totals, customization_surcharge, effective_unit_price, CartTotals,
    CUSTOMIZATION_BASE_FEE, CUSTOMIZATION_NAME_FEE, CUSTOMIZATION_NUMBER_FEE, FLAT_SHIPPING_FEE,
    FREE_SHIPPING_THRESHOLD, TAX_RATE_PERCENT,
};
pub use store::{CartEvent, CartLine, CartSnapshot, CartStore, MAX_QUANTITY_PER_LINE};
