//! Order quantity value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// A count of units in an order line.
///
/// Storefront orders are whole-unit counts, so this wraps an unsigned
/// integer rather than a decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Zero quantity (never valid for an order; useful as a sentinel).
    pub const ZERO: Self = Self(0);

    /// Create a new quantity.
    #[must_use]
    pub const fn new(units: u32) -> Self {
        Self(units)
    }

    /// Get the unit count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Check that this quantity is usable on an order.
    ///
    /// # Errors
    ///
    /// Returns error if the quantity is zero.
    pub fn validate_for_order(&self) -> Result<(), DomainError> {
        if self.0 == 0 {
            return Err(DomainError::InvalidValue {
                field: "quantity".to_string(),
                message: "Quantity must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
