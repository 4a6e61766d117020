//! HTTP request DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body for placing an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderBody {
    /// Product to order.
    pub product_id: String,
    /// Units to order.
    pub quantity: u32,
    /// Requested delivery date (`YYYY-MM-DD`).
    pub purchase_date: NaiveDate,
    /// Delivery time slot.
    pub delivery_time: String,
    /// Delivery region.
    pub delivery_location: String,
    /// Optional customer message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Body for editing a pending order. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrderBody {
    /// New delivery date.
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    /// New delivery time slot.
    #[serde(default)]
    pub delivery_time: Option<String>,
    /// New delivery region.
    #[serde(default)]
    pub delivery_location: Option<String>,
    /// New customer message.
    #[serde(default)]
    pub message: Option<String>,
    /// New unit count.
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Body for cancelling an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CancelOrderBody {
    /// Optional reason shown to the customer and staff.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Body for the admin status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStatusBody {
    /// Target status name (lowercase).
    pub status: String,
}

/// Query parameters for order listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOrdersQuery {
    /// Page number (1-based).
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page.
    #[serde(default)]
    pub page_size: Option<u32>,
    /// Status filter; `all` or absent means no filter.
    #[serde(default)]
    pub status: Option<String>,
    /// Admin search over username, product name, and tracking number.
    #[serde(default)]
    pub search: Option<String>,
}
