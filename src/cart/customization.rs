//! Jersey customization payload.

use crate::error::ShopError;
use serde::{Deserialize, Serialize};

/// Maximum player name length, in characters.
pub const MAX_PLAYER_NAME_LEN: usize = 15;

/// Maximum player number.
pub const MAX_PLAYER_NUMBER: u32 = 99;

/// Customization attached to a cart line.
///
/// Presence of the payload itself is what triggers the base surcharge; the
/// name and number fields each add their own fee only when non-empty after
/// trimming. A payload with every field blank is still a customization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    /// Selected jersey color, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Player name printed on the back.
    #[serde(default)]
    pub player_name: String,
    /// Player number printed on the back, as entered (digits).
    #[serde(default)]
    pub player_number: String,
}

impl Customization {
    /// Create an empty customization (base surcharge only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a printable name was entered.
    pub fn has_name(&self) -> bool {
        !self.player_name.trim().is_empty()
    }

    /// Check if a printable number was entered.
    pub fn has_number(&self) -> bool {
        !self.player_number.trim().is_empty()
    }

    /// Validate the field rules.
    ///
    /// Name: at most [`MAX_PLAYER_NAME_LEN`] characters after trimming.
    /// Number: digits only, value 0..=[`MAX_PLAYER_NUMBER`].
    pub fn validate(&self) -> Result<(), ShopError> {
        let name = self.player_name.trim();
        if name.chars().count() > MAX_PLAYER_NAME_LEN {
            return Err(ShopError::InvalidCustomization(format!(
                "player name exceeds {} characters",
                MAX_PLAYER_NAME_LEN
            )));
        }

        let number = self.player_number.trim();
        if !number.is_empty() {
            if number.len() > 2 || !number.chars().all(|c| c.is_ascii_digit()) {
                return Err(ShopError::InvalidCustomization(
                    "player number must be at most two digits".to_string(),
                ));
            }
            let value: u32 = number.parse().map_err(|_| {
                ShopError::InvalidCustomization("player number is not a number".to_string())
            })?;
            if value > MAX_PLAYER_NUMBER {
                return Err(ShopError::InvalidCustomization(format!(
                    "player number must be 0-{}",
                    MAX_PLAYER_NUMBER
                )));
            }
        }

        Ok(())
    }

    /// Short label for confirmation messages.
    pub fn label(&self) -> &str {
        let name = self.player_name.trim();
        if name.is_empty() {
            "Custom"
        } else {
            name
        }
    }
}
