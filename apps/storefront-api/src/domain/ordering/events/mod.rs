//! Order domain events.
//!
//! Raised by the aggregate on placement and status movement, drained by the
//! use cases and handed to the event publisher port.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ordering::value_objects::OrderStatus;
use crate::domain::shared::{Money, OrderId, ProductId, Quantity, UserId};

/// An order was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    /// Order identifier.
    pub order_id: OrderId,
    /// Owning user.
    pub user_id: UserId,
    /// Product ordered.
    pub product_id: ProductId,
    /// Units reserved.
    pub quantity: Quantity,
    /// Total order value.
    pub total_price: Money,
    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,
}

/// An order moved to a new status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusChanged {
    /// Order identifier.
    pub order_id: OrderId,
    /// Previous status.
    pub from: OrderStatus,
    /// New status.
    pub to: OrderStatus,
    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,
}

/// An order was cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelled {
    /// Order identifier.
    pub order_id: OrderId,
    /// Product whose stock is to be restored.
    pub product_id: ProductId,
    /// Units to restore.
    pub quantity: Quantity,
    /// Reason given by the requester.
    pub reason: String,
    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,
}

/// Domain events emitted by the Order aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEvent {
    /// Order placed.
    Placed(OrderPlaced),
    /// Status changed.
    StatusChanged(OrderStatusChanged),
    /// Order cancelled.
    Cancelled(OrderCancelled),
}
