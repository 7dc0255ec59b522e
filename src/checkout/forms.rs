//! Shipping and payment input types.
//!
//! The formatting helpers are input-shaping only: card numbers are grouped
//! for display, expiry is normalized to MM/YY, CVV is restricted to digits.
//! No Luhn check and no authorization happen here; no real charge occurs
//! anywhere in this crate.

use crate::error::ShopError;
use serde::{Deserialize, Serialize};

/// Shipping information collected at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State/province.
    pub state: String,
    /// Postal code.
    pub zip_code: String,
    /// Country.
    pub country: String,
}

impl Default for ShippingInfo {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: "United States".to_string(),
        }
    }
}

impl ShippingInfo {
    /// Validate that every required field is non-empty.
    ///
    /// Reports all missing fields at once.
    pub fn validate(&self) -> Result<(), ShopError> {
        let mut missing = Vec::new();
        for (value, label) in [
            (&self.first_name, "first name"),
            (&self.last_name, "last name"),
            (&self.email, "email"),
            (&self.address, "address"),
            (&self.city, "city"),
            (&self.state, "state"),
            (&self.zip_code, "zip code"),
        ] {
            if value.trim().is_empty() {
                missing.push(label);
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ShopError::Validation(missing.join(", ")))
        }
    }

    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payment information collected at checkout. Shape-validated only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    /// Card number, display-formatted in groups of 4.
    pub card_number: String,
    /// Expiry, normalized to MM/YY.
    pub expiry_date: String,
    /// CVV, digits only, at most 4.
    pub cvv: String,
    /// Name printed on the card.
    pub name_on_card: String,
}

impl PaymentInfo {
    /// Validate that every required field is non-empty.
    pub fn validate(&self) -> Result<(), ShopError> {
        let mut missing = Vec::new();
        for (value, label) in [
            (&self.name_on_card, "name on card"),
            (&self.card_number, "card number"),
            (&self.expiry_date, "expiry date"),
            (&self.cvv, "cvv"),
        ] {
            if value.trim().is_empty() {
                missing.push(label);
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ShopError::Validation(missing.join(", ")))
        }
    }

    /// Store a card number, applying display formatting.
    pub fn set_card_number(&mut self, raw: &str) {
        self.card_number = format_card_number(raw);
    }

    /// Store an expiry date, normalizing to MM/YY.
    pub fn set_expiry_date(&mut self, raw: &str) {
        self.expiry_date = format_expiry_date(raw);
    }

    /// Store a CVV, keeping digits only.
    pub fn set_cvv(&mut self, raw: &str) {
        self.cvv = format_cvv(raw);
    }
}

/// Group a card number in blocks of 4, capped at 19 characters
/// (16 digits plus 3 separators).
pub fn format_card_number(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let mut out = String::new();
    for (i, c) in stripped.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out.chars().take(19).collect()
}

/// Normalize an expiry date to MM/YY.
pub fn format_expiry_date(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(4).collect();
    if digits.len() <= 2 {
        digits
    } else {
        format!("{}/{}", &digits[..2], &digits[2..])
    }
}

/// Keep CVV digits only, at most 4.
pub fn format_cvv(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(4).collect()
}
