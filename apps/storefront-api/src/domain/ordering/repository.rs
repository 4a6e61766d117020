//! Order Repository Trait
//!
//! Defines the persistence abstraction for orders, including the query set
//! behind the user dashboards and the admin surface. Implemented by
//! adapters in the infrastructure layer.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::aggregate::Order;
use super::errors::OrderError;
use super::value_objects::OrderStatus;
use crate::domain::shared::{Money, OrderId, UserId};

/// A page request (1-based).
#[derive(Debug, Clone, Copy)]
pub struct Page {
    /// Page number, starting at 1.
    pub number: u32,
    /// Items per page.
    pub size: u32,
}

impl Page {
    /// Default page size.
    pub const DEFAULT_SIZE: u32 = 10;

    /// Largest allowed page size.
    pub const MAX_SIZE: u32 = 100;

    /// Create a page request, clamping out-of-range values.
    #[must_use]
    pub fn new(number: u32, size: u32) -> Self {
        Self {
            number: number.max(1),
            size: size.clamp(1, Self::MAX_SIZE),
        }
    }

    /// Number of items to skip.
    #[must_use]
    pub const fn offset(&self) -> usize {
        ((self.number - 1) * self.size) as usize
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            size: Self::DEFAULT_SIZE,
        }
    }
}

/// One page of orders plus pagination metadata.
#[derive(Debug, Clone)]
pub struct PagedOrders {
    /// The page of orders.
    pub orders: Vec<Order>,
    /// Total matching orders across all pages.
    pub total: u64,
    /// Page number served.
    pub page: u32,
    /// Total number of pages.
    pub pages: u32,
}

/// Per-status slice of the order statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBreakdown {
    /// Status being counted.
    pub status: OrderStatus,
    /// Number of orders in this status.
    pub count: u64,
    /// Summed total price of orders in this status.
    pub total_value: Money,
}

/// Aggregated order statistics for the admin dashboard.
#[derive(Debug, Clone)]
pub struct OrderStatistics {
    /// Count and value per status (statuses with no orders omitted).
    pub breakdown: Vec<StatusBreakdown>,
    /// Total number of orders ever placed.
    pub total_orders: u64,
    /// Sum of total price over delivered orders.
    pub total_revenue: Money,
}

/// Repository trait for Order persistence.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a newly placed order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the id already exists or the write fails.
    async fn insert(&self, order: &Order) -> Result<(), OrderError>;

    /// Find an order by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError>;

    /// Persist a mutated order, conditional on the stored status.
    ///
    /// The write succeeds only if the stored copy's status still equals
    /// `expected`; otherwise `ConcurrentModification` is returned and
    /// nothing changes. This is the lost-update guard for racing
    /// transitions (for example a simultaneous cancel and admin confirm).
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `ConcurrentModification`, or a storage error.
    async fn update_if_status(
        &self,
        order: &Order,
        expected: OrderStatus,
    ) -> Result<(), OrderError>;

    /// Page through a user's orders, newest first, optionally filtered to a
    /// single status.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_user(
        &self,
        user_id: &UserId,
        status: Option<OrderStatus>,
        page: Page,
    ) -> Result<PagedOrders, OrderError>;

    /// A user's upcoming orders: purchase date on or after `today` and a
    /// non-terminal status, ascending by purchase date.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_upcoming(
        &self,
        user_id: &UserId,
        today: NaiveDate,
    ) -> Result<Vec<Order>, OrderError>;

    /// A user's past orders: delivered or cancelled, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_past(&self, user_id: &UserId) -> Result<Vec<Order>, OrderError>;

    /// Page through all orders (admin), newest first, optionally filtered by
    /// status and by a case-insensitive search over username, product name,
    /// and tracking number.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_all(
        &self,
        status: Option<OrderStatus>,
        search: Option<&str>,
        page: Page,
    ) -> Result<PagedOrders, OrderError>;

    /// Aggregate statistics over all orders (admin).
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn statistics(&self) -> Result<OrderStatistics, OrderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_clamps_number_and_size() {
        let page = Page::new(0, 0);
        assert_eq!(page.number, 1);
        assert_eq!(page.size, 1);

        let page = Page::new(2, 1000);
        assert_eq!(page.size, Page::MAX_SIZE);
    }

    #[test]
    fn page_offset() {
        assert_eq!(Page::new(1, 10).offset(), 0);
        assert_eq!(Page::new(3, 10).offset(), 20);
    }

    #[test]
    fn page_default() {
        let page = Page::default();
        assert_eq!(page.number, 1);
        assert_eq!(page.size, Page::DEFAULT_SIZE);
    }
}
