//! Order data transfer objects for API boundaries.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ordering::aggregate::Order;
use crate::domain::ordering::repository::{OrderStatistics, PagedOrders};
use crate::domain::ordering::value_objects::{OrderStatus, PaymentStatus};

/// Flat representation of an order for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDto {
    /// Order identifier.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Username snapshot.
    pub username: String,
    /// Product identifier.
    pub product_id: String,
    /// Product name snapshot.
    pub product_name: String,
    /// Unit price snapshot.
    pub unit_price: Decimal,
    /// Units ordered.
    pub quantity: u32,
    /// Total price.
    pub total_price: Decimal,
    /// Requested delivery date.
    pub purchase_date: NaiveDate,
    /// Delivery time slot.
    pub delivery_time: String,
    /// Delivery region.
    pub delivery_location: String,
    /// Customer message.
    pub message: String,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Payment status.
    pub payment_status: PaymentStatus,
    /// Tracking number.
    pub tracking_number: String,
    /// Delivery timestamp, if delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<DateTime<Utc>>,
    /// Cancellation timestamp, if cancelled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Cancellation reason, if cancelled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl OrderDto {
    /// Build a DTO from a domain order.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id().as_str().to_string(),
            user_id: order.user_id().as_str().to_string(),
            username: order.username().to_string(),
            product_id: order.product_id().as_str().to_string(),
            product_name: order.product_name().to_string(),
            unit_price: order.unit_price().amount(),
            quantity: order.quantity().get(),
            total_price: order.total_price().amount(),
            purchase_date: order.purchase_date(),
            delivery_time: order.delivery_time().to_string(),
            delivery_location: order.delivery_location().to_string(),
            message: order.message().to_string(),
            status: order.status(),
            payment_status: order.payment_status(),
            tracking_number: order.tracking_number().as_str().to_string(),
            delivery_date: order.delivery_date(),
            cancelled_at: order.cancelled_at(),
            cancel_reason: order.cancel_reason().map(ToString::to_string),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationDto {
    /// Page number served (1-based).
    pub page: u32,
    /// Total number of pages.
    pub pages: u32,
    /// Total matching orders.
    pub total: u64,
}

/// One page of orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedOrdersDto {
    /// The page of orders.
    pub orders: Vec<OrderDto>,
    /// Pagination metadata.
    pub pagination: PaginationDto,
}

impl PagedOrdersDto {
    /// Build a DTO from a repository page.
    #[must_use]
    pub fn from_page(page: &PagedOrders) -> Self {
        Self {
            orders: page.orders.iter().map(OrderDto::from_order).collect(),
            pagination: PaginationDto {
                page: page.page,
                pages: page.pages,
                total: page.total,
            },
        }
    }
}

/// Per-status statistics entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusBreakdownDto {
    /// Status being counted.
    pub status: OrderStatus,
    /// Number of orders.
    pub count: u64,
    /// Summed total price.
    pub total_value: Decimal,
}

/// Aggregated order statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsDto {
    /// Count and value per status.
    pub status_breakdown: Vec<StatusBreakdownDto>,
    /// Total number of orders.
    pub total_orders: u64,
    /// Revenue over delivered orders.
    pub total_revenue: Decimal,
}

impl StatisticsDto {
    /// Build a DTO from repository statistics.
    #[must_use]
    pub fn from_statistics(stats: &OrderStatistics) -> Self {
        Self {
            status_breakdown: stats
                .breakdown
                .iter()
                .map(|b| StatusBreakdownDto {
                    status: b.status,
                    count: b.count,
                    total_value: b.total_value.amount(),
                })
                .collect(),
            total_orders: stats.total_orders,
            total_revenue: stats.total_revenue.amount(),
        }
    }
}
