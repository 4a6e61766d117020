//! Product Repository Trait
//!
//! Persistence abstraction for the catalog collaborator. The stock ledger
//! operations are the only writes the order core performs against it.

use async_trait::async_trait;

use super::errors::ProductError;
use super::product::Product;
use crate::domain::shared::{ProductId, Quantity};

/// Repository trait for Product lookup and the stock ledger.
///
/// `reserve_stock` and `release_stock` must each execute as a single atomic
/// read-modify-write: two concurrent reservations against the same product
/// must never both pass a stale stock check.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find a product by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError>;

    /// Atomically take `quantity` units out of stock.
    ///
    /// # Errors
    ///
    /// Returns `OutOfStock` if fewer units remain, `NotFound` if the product
    /// does not exist.
    async fn reserve_stock(&self, id: &ProductId, quantity: Quantity) -> Result<(), ProductError>;

    /// Atomically return `quantity` units to stock.
    ///
    /// Idempotency is the caller's responsibility: the order state machine
    /// makes the cancelled state reachable at most once per order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product does not exist.
    async fn release_stock(&self, id: &ProductId, quantity: Quantity) -> Result<(), ProductError>;
}
