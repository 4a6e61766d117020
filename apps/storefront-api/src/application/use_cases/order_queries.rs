//! Order Queries Use Case
//!
//! Read-side operations: single order fetch, the user's paginated history,
//! upcoming/past classification views, the admin listing with search, and
//! aggregate statistics.

use std::sync::Arc;

use chrono::Utc;

use super::UseCaseError;
use crate::application::current_user::CurrentUser;
use crate::domain::ordering::aggregate::Order;
use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::repository::{OrderRepository, OrderStatistics, Page, PagedOrders};
use crate::domain::ordering::value_objects::OrderStatus;
use crate::domain::shared::OrderId;

/// Parse a status filter string; `"all"` (or empty) means no filter.
///
/// # Errors
///
/// Returns a parameter error for an unknown status name.
fn parse_status_filter(filter: Option<&str>) -> Result<Option<OrderStatus>, OrderError> {
    match filter {
        None | Some("all" | "") => Ok(None),
        Some(value) => value
            .parse::<OrderStatus>()
            .map(Some)
            .map_err(|e| OrderError::InvalidParameters {
                field: "status".to_string(),
                message: e.to_string(),
            }),
    }
}

/// Use case for order read operations.
pub struct OrderQueriesUseCase<O>
where
    O: OrderRepository,
{
    orders: Arc<O>,
}

impl<O> OrderQueriesUseCase<O>
where
    O: OrderRepository,
{
    /// Create a new `OrderQueriesUseCase`.
    pub const fn new(orders: Arc<O>) -> Self {
        Self { orders }
    }

    /// Fetch one order, visible to its owner or an admin.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `AccessDenied`.
    pub async fn get_order(
        &self,
        requester: &CurrentUser,
        order_id: &str,
    ) -> Result<Order, UseCaseError> {
        let id = OrderId::new(order_id);
        let order = self
            .orders
            .find_by_id(&id)
            .await?
            .ok_or_else(|| OrderError::NotFound {
                order_id: order_id.to_string(),
            })?;

        if !requester.can_access(order.user_id()) {
            return Err(OrderError::AccessDenied {
                order_id: order_id.to_string(),
            }
            .into());
        }

        Ok(order)
    }

    /// The requester's own orders, newest first, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns a parameter error for an unknown status filter.
    pub async fn list_for_user(
        &self,
        requester: &CurrentUser,
        page: Page,
        status_filter: Option<&str>,
    ) -> Result<PagedOrders, UseCaseError> {
        let status = parse_status_filter(status_filter)?;
        Ok(self
            .orders
            .find_by_user(&requester.id, status, page)
            .await?)
    }

    /// The requester's upcoming orders, ascending by purchase date.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub async fn list_upcoming(&self, requester: &CurrentUser) -> Result<Vec<Order>, UseCaseError> {
        let today = Utc::now().date_naive();
        Ok(self.orders.find_upcoming(&requester.id, today).await?)
    }

    /// The requester's delivered and cancelled orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub async fn list_past(&self, requester: &CurrentUser) -> Result<Vec<Order>, UseCaseError> {
        Ok(self.orders.find_past(&requester.id).await?)
    }

    /// All orders (admin), optionally filtered by status and search term.
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied` for non-admins or a parameter error for an
    /// unknown status filter.
    pub async fn list_all(
        &self,
        requester: &CurrentUser,
        page: Page,
        status_filter: Option<&str>,
        search: Option<&str>,
    ) -> Result<PagedOrders, UseCaseError> {
        if !requester.is_admin() {
            return Err(OrderError::AccessDenied {
                order_id: String::new(),
            }
            .into());
        }
        let status = parse_status_filter(status_filter)?;
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        Ok(self.orders.find_all(status, search, page).await?)
    }

    /// Aggregate statistics over all orders (admin).
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied` for non-admins.
    pub async fn statistics(
        &self,
        requester: &CurrentUser,
    ) -> Result<OrderStatistics, UseCaseError> {
        if !requester.is_admin() {
            return Err(OrderError::AccessDenied {
                order_id: String::new(),
            }
            .into());
        }
        Ok(self.orders.statistics().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    use crate::application::current_user::Role;
    use crate::domain::ordering::aggregate::NewOrderParams;
    use crate::domain::shared::{Money, ProductId, Quantity, UserId};
    use crate::infrastructure::persistence::InMemoryOrderRepository;

    fn customer(id: &str) -> CurrentUser {
        CurrentUser {
            id: UserId::new(id),
            username: id.to_string(),
            role: Role::User,
        }
    }

    fn admin() -> CurrentUser {
        CurrentUser {
            id: UserId::new("admin-1"),
            username: "admin".to_string(),
            role: Role::Admin,
        }
    }

    fn order_for(user: &str, purchase_date: NaiveDate) -> Order {
        Order::place(NewOrderParams {
            user_id: UserId::new(user),
            username: user.to_string(),
            product_id: ProductId::new("prod-1"),
            product_name: "Ceylon Tea 500g".to_string(),
            unit_price: Money::from_f64(10.0),
            quantity: Quantity::new(1),
            purchase_date,
            delivery_time: "10 AM".to_string(),
            delivery_location: "Colombo".to_string(),
            message: String::new(),
        })
        .unwrap()
    }

    async fn seeded_queries() -> (OrderQueriesUseCase<InMemoryOrderRepository>, Vec<Order>) {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let future = Utc::now().date_naive() + Days::new(7);

        let mut orders = Vec::new();
        for user in ["user-1", "user-1", "user-2"] {
            let order = order_for(user, future);
            repo.insert(&order).await.unwrap();
            orders.push(order);
        }

        (OrderQueriesUseCase::new(repo), orders)
    }

    #[tokio::test]
    async fn owner_reads_own_order() {
        let (queries, orders) = seeded_queries().await;
        let found = queries
            .get_order(&customer("user-1"), orders[0].id().as_str())
            .await
            .unwrap();
        assert_eq!(found.id(), orders[0].id());
    }

    #[tokio::test]
    async fn stranger_cannot_read_order() {
        let (queries, orders) = seeded_queries().await;
        let err = queries
            .get_order(&customer("user-2"), orders[0].id().as_str())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UseCaseError::Order(OrderError::AccessDenied { .. })
        ));
    }

    #[tokio::test]
    async fn admin_reads_any_order() {
        let (queries, orders) = seeded_queries().await;
        assert!(
            queries
                .get_order(&admin(), orders[0].id().as_str())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn list_for_user_sees_only_own_orders() {
        let (queries, _) = seeded_queries().await;
        let page = queries
            .list_for_user(&customer("user-1"), Page::default(), None)
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert!(page.orders.iter().all(|o| o.username() == "user-1"));
    }

    #[tokio::test]
    async fn status_filter_all_means_no_filter() {
        let (queries, _) = seeded_queries().await;
        let page = queries
            .list_for_user(&customer("user-1"), Page::default(), Some("all"))
            .await
            .unwrap();
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn unknown_status_filter_is_rejected() {
        let (queries, _) = seeded_queries().await;
        let err = queries
            .list_for_user(&customer("user-1"), Page::default(), Some("refunded"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UseCaseError::Order(OrderError::InvalidParameters { .. })
        ));
    }

    #[tokio::test]
    async fn list_all_requires_admin() {
        let (queries, _) = seeded_queries().await;
        let err = queries
            .list_all(&customer("user-1"), Page::default(), None, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UseCaseError::Order(OrderError::AccessDenied { .. })
        ));

        let page = queries
            .list_all(&admin(), Page::default(), None, None)
            .await
            .unwrap();
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn statistics_requires_admin() {
        let (queries, _) = seeded_queries().await;
        assert!(queries.statistics(&customer("user-1")).await.is_err());

        let stats = queries.statistics(&admin()).await.unwrap();
        assert_eq!(stats.total_orders, 3);
    }

    #[tokio::test]
    async fn upcoming_and_past_split() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let future = Utc::now().date_naive() + Days::new(7);

        let open = order_for("user-1", future);
        repo.insert(&open).await.unwrap();

        let mut delivered = order_for("user-1", future);
        delivered.transition_to(OrderStatus::Confirmed).unwrap();
        delivered.transition_to(OrderStatus::Processing).unwrap();
        delivered.transition_to(OrderStatus::Shipped).unwrap();
        delivered.transition_to(OrderStatus::Delivered).unwrap();
        repo.insert(&delivered).await.unwrap();

        let queries = OrderQueriesUseCase::new(repo);
        let user = customer("user-1");

        let upcoming = queries.list_upcoming(&user).await.unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id(), open.id());

        let past = queries.list_past(&user).await.unwrap();
        assert_eq!(past.len(), 1);
        assert_eq!(past[0].id(), delivered.id());
    }
}
