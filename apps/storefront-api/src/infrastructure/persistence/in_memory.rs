//! In-memory repositories.
//!
//! RwLock-backed stores implementing the domain repository traits. The
//! stock ledger operations and the conditional status update each run
//! entirely inside one write-side critical section, which is what makes
//! them atomic with respect to concurrent requests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};

use crate::domain::catalog::{Product, ProductError, ProductRepository};
use crate::domain::ordering::aggregate::Order;
use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::repository::{
    OrderRepository, OrderStatistics, Page, PagedOrders, StatusBreakdown,
};
use crate::domain::ordering::value_objects::OrderStatus;
use crate::domain::shared::{Money, OrderId, ProductId, Quantity, UserId};

// ============================================================================
// Products
// ============================================================================

/// In-memory implementation of `ProductRepository`.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<String, Product>>,
}

impl InMemoryProductRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: RwLock::new(HashMap::new()),
        }
    }

    /// Add a product to the catalog (seeding and test setup).
    pub fn add(&self, product: Product) {
        let mut products = self.products.write().unwrap();
        products.insert(product.id().as_str().to_string(), product);
    }

    /// Get the number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.read().unwrap().len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.read().unwrap().is_empty()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        let products = self.products.read().unwrap();
        Ok(products.get(id.as_str()).cloned())
    }

    async fn reserve_stock(&self, id: &ProductId, quantity: Quantity) -> Result<(), ProductError> {
        // Check and decrement under the same write lock; two concurrent
        // reservations serialize here instead of both reading stale stock.
        let mut products = self.products.write().unwrap();
        let product = products
            .get_mut(id.as_str())
            .ok_or_else(|| ProductError::NotFound {
                product_id: id.as_str().to_string(),
            })?;
        product.reserve(quantity)
    }

    async fn release_stock(&self, id: &ProductId, quantity: Quantity) -> Result<(), ProductError> {
        let mut products = self.products.write().unwrap();
        let product = products
            .get_mut(id.as_str())
            .ok_or_else(|| ProductError::NotFound {
                product_id: id.as_str().to_string(),
            })?;
        product.restock(quantity);
        Ok(())
    }
}

// ============================================================================
// Orders
// ============================================================================

/// In-memory implementation of `OrderRepository`.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<String, Order>>,
}

impl InMemoryOrderRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
        }
    }

    /// Get the number of stored orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.read().unwrap().len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.read().unwrap().is_empty()
    }

    fn paginate(mut matching: Vec<Order>, page: Page) -> PagedOrders {
        // Newest first, id as a stable tie-break
        matching.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().as_str().cmp(a.id().as_str()))
        });

        let total = matching.len() as u64;
        let size = u64::from(page.size);
        let pages = (total.div_ceil(size)) as u32;
        let orders = matching
            .into_iter()
            .skip(page.offset())
            .take(page.size as usize)
            .collect();

        PagedOrders {
            orders,
            total,
            page: page.number,
            pages,
        }
    }

    fn build_matcher(search: &str) -> Result<Regex, OrderError> {
        RegexBuilder::new(&regex::escape(search))
            .case_insensitive(true)
            .build()
            .map_err(|e| OrderError::InvalidParameters {
                field: "search".to_string(),
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: &Order) -> Result<(), OrderError> {
        let mut orders = self.orders.write().unwrap();
        let key = order.id().as_str().to_string();
        if orders.contains_key(&key) {
            return Err(OrderError::Storage {
                message: format!("Duplicate order id: {key}"),
            });
        }
        orders.insert(key, order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        let orders = self.orders.read().unwrap();
        Ok(orders.get(id.as_str()).cloned())
    }

    async fn update_if_status(
        &self,
        order: &Order,
        expected: OrderStatus,
    ) -> Result<(), OrderError> {
        // Compare-and-swap on the stored status, all under the write lock.
        let mut orders = self.orders.write().unwrap();
        let stored = orders
            .get_mut(order.id().as_str())
            .ok_or_else(|| OrderError::NotFound {
                order_id: order.id().as_str().to_string(),
            })?;

        if stored.status() != expected {
            return Err(OrderError::ConcurrentModification {
                order_id: order.id().as_str().to_string(),
            });
        }

        *stored = order.clone();
        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
        status: Option<OrderStatus>,
        page: Page,
    ) -> Result<PagedOrders, OrderError> {
        let orders = self.orders.read().unwrap();
        let matching: Vec<Order> = orders
            .values()
            .filter(|o| o.user_id() == user_id)
            .filter(|o| status.is_none_or(|s| o.status() == s))
            .cloned()
            .collect();
        Ok(Self::paginate(matching, page))
    }

    async fn find_upcoming(
        &self,
        user_id: &UserId,
        today: NaiveDate,
    ) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read().unwrap();
        let mut matching: Vec<Order> = orders
            .values()
            .filter(|o| o.user_id() == user_id && o.is_upcoming(today))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            a.purchase_date()
                .cmp(&b.purchase_date())
                .then_with(|| a.created_at().cmp(&b.created_at()))
        });
        Ok(matching)
    }

    async fn find_past(&self, user_id: &UserId) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read().unwrap();
        let mut matching: Vec<Order> = orders
            .values()
            .filter(|o| o.user_id() == user_id && o.is_past())
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(matching)
    }

    async fn find_all(
        &self,
        status: Option<OrderStatus>,
        search: Option<&str>,
        page: Page,
    ) -> Result<PagedOrders, OrderError> {
        let matcher = search.map(Self::build_matcher).transpose()?;

        let orders = self.orders.read().unwrap();
        let matching: Vec<Order> = orders
            .values()
            .filter(|o| status.is_none_or(|s| o.status() == s))
            .filter(|o| {
                matcher.as_ref().is_none_or(|m| {
                    m.is_match(o.username())
                        || m.is_match(o.product_name())
                        || m.is_match(o.tracking_number().as_str())
                })
            })
            .cloned()
            .collect();
        Ok(Self::paginate(matching, page))
    }

    async fn statistics(&self) -> Result<OrderStatistics, OrderError> {
        let orders = self.orders.read().unwrap();

        let mut breakdown = Vec::new();
        for status in OrderStatus::ALL {
            let mut count = 0u64;
            let mut total_value = Money::ZERO;
            for order in orders.values().filter(|o| o.status() == status) {
                count += 1;
                total_value = total_value + order.total_price();
            }
            if count > 0 {
                breakdown.push(StatusBreakdown {
                    status,
                    count,
                    total_value,
                });
            }
        }

        let total_revenue = orders
            .values()
            .filter(|o| o.status() == OrderStatus::Delivered)
            .map(Order::total_price)
            .sum();

        Ok(OrderStatistics {
            breakdown,
            total_orders: orders.len() as u64,
            total_revenue,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{Days, NaiveDate, Utc};

    use crate::domain::ordering::aggregate::NewOrderParams;

    fn product(stock: u32) -> Product {
        Product::new(
            ProductId::new("prod-1"),
            "Ceylon Tea 500g",
            Money::from_f64(10.0),
            stock,
            true,
        )
    }

    fn order_for(user: &str, purchase_date: NaiveDate) -> Order {
        Order::place(NewOrderParams {
            user_id: UserId::new(user),
            username: user.to_string(),
            product_id: ProductId::new("prod-1"),
            product_name: "Ceylon Tea 500g".to_string(),
            unit_price: Money::from_f64(10.0),
            quantity: Quantity::new(2),
            purchase_date,
            delivery_time: "10 AM".to_string(),
            delivery_location: "Colombo".to_string(),
            message: String::new(),
        })
        .unwrap()
    }

    fn future_date() -> NaiveDate {
        Utc::now().date_naive() + Days::new(7)
    }

    #[tokio::test]
    async fn reserve_and_release_round_trip() {
        let repo = InMemoryProductRepository::new();
        repo.add(product(5));
        let id = ProductId::new("prod-1");

        repo.reserve_stock(&id, Quantity::new(3)).await.unwrap();
        assert_eq!(repo.find_by_id(&id).await.unwrap().unwrap().stock(), 2);

        repo.release_stock(&id, Quantity::new(3)).await.unwrap();
        assert_eq!(repo.find_by_id(&id).await.unwrap().unwrap().stock(), 5);
    }

    #[tokio::test]
    async fn reserve_fails_atomically_when_insufficient() {
        let repo = InMemoryProductRepository::new();
        repo.add(product(2));
        let id = ProductId::new("prod-1");

        let err = repo.reserve_stock(&id, Quantity::new(3)).await.unwrap_err();
        assert!(matches!(err, ProductError::OutOfStock { available: 2, .. }));
        assert_eq!(repo.find_by_id(&id).await.unwrap().unwrap().stock(), 2);
    }

    #[tokio::test]
    async fn reserve_unknown_product_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let err = repo
            .reserve_stock(&ProductId::new("ghost"), Quantity::new(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound { .. }));
    }

    #[tokio::test]
    async fn concurrent_reservations_never_oversell() {
        let repo = Arc::new(InMemoryProductRepository::new());
        repo.add(product(4));
        let id = ProductId::new("prod-1");

        let mut handles = Vec::new();
        for _ in 0..8 {
            let repo = Arc::clone(&repo);
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                repo.reserve_stock(&id, Quantity::new(1)).await
            }));
        }

        let mut successes = 0;
        let mut failures = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => successes += 1,
                Err(ProductError::OutOfStock { .. }) => failures += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(successes, 4);
        assert_eq!(failures, 4);
        assert_eq!(repo.find_by_id(&id).await.unwrap().unwrap().stock(), 0);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let repo = InMemoryOrderRepository::new();
        let order = order_for("user-1", future_date());

        repo.insert(&order).await.unwrap();
        let err = repo.insert(&order).await.unwrap_err();
        assert!(matches!(err, OrderError::Storage { .. }));
    }

    #[tokio::test]
    async fn update_if_status_applies_on_match() {
        let repo = InMemoryOrderRepository::new();
        let mut order = order_for("user-1", future_date());
        repo.insert(&order).await.unwrap();

        order.transition_to(OrderStatus::Confirmed).unwrap();
        repo.update_if_status(&order, OrderStatus::Pending)
            .await
            .unwrap();

        let stored = repo.find_by_id(order.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), OrderStatus::Confirmed);
    }

    #[tokio::test]
    async fn update_if_status_rejects_on_mismatch() {
        let repo = InMemoryOrderRepository::new();
        let order = order_for("user-1", future_date());
        repo.insert(&order).await.unwrap();

        // Another writer confirmed the order first
        let mut confirmed = order.clone();
        confirmed.transition_to(OrderStatus::Confirmed).unwrap();
        repo.update_if_status(&confirmed, OrderStatus::Pending)
            .await
            .unwrap();

        // A stale cancel, still expecting Pending, must lose
        let mut cancelled = order.clone();
        cancelled.cancel("too slow").unwrap();
        let err = repo
            .update_if_status(&cancelled, OrderStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::ConcurrentModification { .. }));

        let stored = repo.find_by_id(order.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), OrderStatus::Confirmed);
    }

    #[tokio::test]
    async fn find_by_user_filters_and_paginates() {
        let repo = InMemoryOrderRepository::new();
        for _ in 0..3 {
            repo.insert(&order_for("user-1", future_date())).await.unwrap();
        }
        repo.insert(&order_for("user-2", future_date())).await.unwrap();

        let page = repo
            .find_by_user(&UserId::new("user-1"), None, Page::new(1, 2))
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.pages, 2);
        assert_eq!(page.orders.len(), 2);

        let page2 = repo
            .find_by_user(&UserId::new("user-1"), None, Page::new(2, 2))
            .await
            .unwrap();
        assert_eq!(page2.orders.len(), 1);
    }

    #[tokio::test]
    async fn find_by_user_status_filter() {
        let repo = InMemoryOrderRepository::new();
        let mut cancelled = order_for("user-1", future_date());
        cancelled.cancel("n/a").unwrap();
        repo.insert(&cancelled).await.unwrap();
        repo.insert(&order_for("user-1", future_date())).await.unwrap();

        let page = repo
            .find_by_user(
                &UserId::new("user-1"),
                Some(OrderStatus::Cancelled),
                Page::default(),
            )
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.orders[0].status(), OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn upcoming_sorted_ascending_by_purchase_date() {
        let repo = InMemoryOrderRepository::new();
        let today = Utc::now().date_naive();

        let late = order_for("user-1", today + Days::new(10));
        let soon = order_for("user-1", today + Days::new(2));
        repo.insert(&late).await.unwrap();
        repo.insert(&soon).await.unwrap();

        let upcoming = repo
            .find_upcoming(&UserId::new("user-1"), today)
            .await
            .unwrap();
        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].id(), soon.id());
        assert_eq!(upcoming[1].id(), late.id());
    }

    #[tokio::test]
    async fn past_purchase_date_excluded_from_upcoming() {
        let repo = InMemoryOrderRepository::new();
        let today = Utc::now().date_naive();

        // Placed for yesterday (validation happened at placement time)
        let stale = order_for("user-1", today - Days::new(1));
        repo.insert(&stale).await.unwrap();

        let upcoming = repo
            .find_upcoming(&UserId::new("user-1"), today)
            .await
            .unwrap();
        assert!(upcoming.is_empty());
    }

    #[tokio::test]
    async fn find_past_returns_terminal_orders_only() {
        let repo = InMemoryOrderRepository::new();

        let open = order_for("user-1", future_date());
        repo.insert(&open).await.unwrap();

        let mut cancelled = order_for("user-1", future_date());
        cancelled.cancel("n/a").unwrap();
        repo.insert(&cancelled).await.unwrap();

        let past = repo.find_past(&UserId::new("user-1")).await.unwrap();
        assert_eq!(past.len(), 1);
        assert_eq!(past[0].id(), cancelled.id());
    }

    #[tokio::test]
    async fn find_all_search_is_case_insensitive() {
        let repo = InMemoryOrderRepository::new();
        repo.insert(&order_for("Nimal", future_date())).await.unwrap();
        repo.insert(&order_for("kamal", future_date())).await.unwrap();

        let page = repo
            .find_all(None, Some("NIMAL"), Page::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.orders[0].username(), "Nimal");

        // Product name matches too
        let page = repo
            .find_all(None, Some("ceylon"), Page::default())
            .await
            .unwrap();
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn find_all_search_by_tracking_number() {
        let repo = InMemoryOrderRepository::new();
        let order = order_for("user-1", future_date());
        repo.insert(&order).await.unwrap();

        let page = repo
            .find_all(None, Some(order.tracking_number().as_str()), Page::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn statistics_group_by_status_and_revenue() {
        let repo = InMemoryOrderRepository::new();

        repo.insert(&order_for("user-1", future_date())).await.unwrap();

        let mut delivered = order_for("user-2", future_date());
        delivered.transition_to(OrderStatus::Confirmed).unwrap();
        delivered.transition_to(OrderStatus::Processing).unwrap();
        delivered.transition_to(OrderStatus::Shipped).unwrap();
        delivered.transition_to(OrderStatus::Delivered).unwrap();
        repo.insert(&delivered).await.unwrap();

        let stats = repo.statistics().await.unwrap();
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_revenue, Money::from_f64(20.0));

        let pending = stats
            .breakdown
            .iter()
            .find(|b| b.status == OrderStatus::Pending)
            .unwrap();
        assert_eq!(pending.count, 1);
        assert_eq!(pending.total_value, Money::from_f64(20.0));

        // Empty statuses are omitted
        assert!(
            !stats
                .breakdown
                .iter()
                .any(|b| b.status == OrderStatus::Shipped)
        );
    }
}
