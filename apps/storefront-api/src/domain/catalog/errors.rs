//! Catalog errors.

use std::fmt;

/// Errors from the product catalog collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// Product does not exist.
    NotFound {
        /// Product ID.
        product_id: String,
    },

    /// Product exists but is not available for purchase.
    Inactive {
        /// Product ID.
        product_id: String,
    },

    /// Requested quantity exceeds available stock.
    OutOfStock {
        /// Product ID.
        product_id: String,
        /// Units requested.
        requested: u32,
        /// Units available at the time of the request.
        available: u32,
    },

    /// Underlying store failed.
    Storage {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for ProductError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { product_id } => {
                write!(f, "Product not found: {product_id}")
            }
            Self::Inactive { product_id } => {
                write!(f, "Product is not available: {product_id}")
            }
            Self::OutOfStock {
                product_id,
                requested,
                available,
            } => {
                write!(
                    f,
                    "Insufficient stock for {product_id}: requested {requested}, only {available} available"
                )
            }
            Self::Storage { message } => {
                write!(f, "Catalog storage error: {message}")
            }
        }
    }
}

impl std::error::Error for ProductError {}
