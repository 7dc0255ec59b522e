//! Authenticated principal, as exposed by the external auth collaborator.
//!
//! The core only ever reads this; session management, login screens and the
//! privilege check itself live outside the crate.

use crate::ids::UserId;
use serde::{Deserialize, Serialize};

/// The currently signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Principal {
    /// Opaque account identifier; every order is attributed to one.
    pub id: UserId,
    /// Account email.
    pub email: String,
    /// Derived privilege flag from the auth collaborator.
    pub is_admin: bool,
}

impl Principal {
    /// Create a regular (non-admin) principal.
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            is_admin: false,
        }
    }
}
