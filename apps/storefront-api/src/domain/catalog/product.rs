//! Product read model and stock ledger operations.
//!
//! The catalog owns the product record; the order core only reads it and
//! moves its `stock` through [`Product::reserve`] and [`Product::restock`].

use serde::{Deserialize, Serialize};

use super::errors::ProductError;
use crate::domain::shared::{Money, ProductId, Quantity};

/// A catalog product as seen by the order core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    stock: u32,
    is_active: bool,
}

impl Product {
    /// Create a product record.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        stock: u32,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            is_active,
        }
    }

    /// Get the product ID.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    /// Get the product name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the unit price.
    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    /// Get the available stock.
    #[must_use]
    pub const fn stock(&self) -> u32 {
        self.stock
    }

    /// Whether the product is available for purchase.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Whether the given quantity can currently be satisfied.
    #[must_use]
    pub const fn has_stock(&self, quantity: Quantity) -> bool {
        self.stock >= quantity.get()
    }

    /// Take `quantity` units out of stock.
    ///
    /// The check and the decrement happen on the same record; the repository
    /// must call this inside its write-side critical section.
    ///
    /// # Errors
    ///
    /// Returns `OutOfStock` if fewer than `quantity` units remain.
    pub fn reserve(&mut self, quantity: Quantity) -> Result<(), ProductError> {
        let requested = quantity.get();
        if self.stock < requested {
            return Err(ProductError::OutOfStock {
                product_id: self.id.as_str().to_string(),
                requested,
                available: self.stock,
            });
        }
        self.stock -= requested;
        Ok(())
    }

    /// Return `quantity` units to stock (compensation for a cancelled order).
    pub fn restock(&mut self, quantity: Quantity) {
        self.stock = self.stock.saturating_add(quantity.get());
    }
}
