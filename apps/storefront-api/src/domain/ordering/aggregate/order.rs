//! Order Aggregate Root
//!
//! Manages the complete lifecycle of a storefront order: placement with
//! product snapshots, status transitions, cancellation, and pending-only
//! field edits. Derived state (total price, tracking number) is computed
//! explicitly at construction and update time, never by storage hooks.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::events::{
    OrderCancelled, OrderEvent, OrderPlaced, OrderStatusChanged,
};
use crate::domain::ordering::services::OrderStateMachine;
use crate::domain::ordering::value_objects::{OrderStatus, PaymentStatus, TrackingNumber};
use crate::domain::shared::{Money, OrderId, ProductId, Quantity, UserId};

/// Maximum length of the optional customer message.
pub const MAX_MESSAGE_LEN: usize = 500;

/// Maximum length of a cancellation reason.
pub const MAX_CANCEL_REASON_LEN: usize = 200;

/// Validated input for placing a new order.
///
/// The product fields are snapshots taken by the placement use case; later
/// catalog edits never reach back into historical orders.
#[derive(Debug, Clone)]
pub struct NewOrderParams {
    /// Owning user.
    pub user_id: UserId,
    /// Username snapshot at order time.
    pub username: String,
    /// Product ordered.
    pub product_id: ProductId,
    /// Product name snapshot at order time.
    pub product_name: String,
    /// Unit price snapshot at order time.
    pub unit_price: Money,
    /// Units ordered.
    pub quantity: Quantity,
    /// Requested delivery date.
    pub purchase_date: NaiveDate,
    /// Chosen delivery time slot.
    pub delivery_time: String,
    /// Chosen delivery region.
    pub delivery_location: String,
    /// Optional customer message.
    pub message: String,
}

impl NewOrderParams {
    /// Validate the policy-independent parameters.
    ///
    /// Schedule-dependent rules (date, slot, region) are validated by the
    /// placement use case against the configured delivery policy.
    ///
    /// # Errors
    ///
    /// Returns error if the quantity is zero or the message is too long.
    pub fn validate(&self) -> Result<(), OrderError> {
        self.quantity
            .validate_for_order()
            .map_err(|e| OrderError::InvalidParameters {
                field: "quantity".to_string(),
                message: e.to_string(),
            })?;

        if self.message.chars().count() > MAX_MESSAGE_LEN {
            return Err(OrderError::InvalidParameters {
                field: "message".to_string(),
                message: format!("Message cannot exceed {MAX_MESSAGE_LEN} characters"),
            });
        }

        Ok(())
    }
}

/// Pending-only edits to an order.
///
/// Unset fields are left unchanged. The unit price is never editable after
/// placement.
#[derive(Debug, Clone, Default)]
pub struct OrderChanges {
    /// New delivery date.
    pub purchase_date: Option<NaiveDate>,
    /// New delivery time slot.
    pub delivery_time: Option<String>,
    /// New delivery region.
    pub delivery_location: Option<String>,
    /// New customer message.
    pub message: Option<String>,
    /// New unit count.
    pub quantity: Option<Quantity>,
}

/// Order Aggregate Root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    user_id: UserId,
    username: String,
    product_id: ProductId,
    product_name: String,
    unit_price: Money,
    quantity: Quantity,
    total_price: Money,
    purchase_date: NaiveDate,
    delivery_time: String,
    delivery_location: String,
    message: String,
    status: OrderStatus,
    payment_status: PaymentStatus,
    tracking_number: TrackingNumber,
    delivery_date: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
    cancel_reason: Option<String>,
    #[serde(skip)]
    events: Vec<OrderEvent>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Place a new order from validated parameters.
    ///
    /// Computes the total price, generates the id and tracking number, and
    /// raises an `OrderPlaced` event.
    ///
    /// # Errors
    ///
    /// Returns error if parameter validation fails.
    pub fn place(params: NewOrderParams) -> Result<Self, OrderError> {
        params.validate()?;

        let id = OrderId::generate();
        let now = Utc::now();
        let total_price = params.unit_price.times(params.quantity);

        let mut order = Self {
            id: id.clone(),
            user_id: params.user_id.clone(),
            username: params.username,
            product_id: params.product_id.clone(),
            product_name: params.product_name,
            unit_price: params.unit_price,
            quantity: params.quantity,
            total_price,
            purchase_date: params.purchase_date,
            delivery_time: params.delivery_time,
            delivery_location: params.delivery_location,
            message: params.message,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            tracking_number: TrackingNumber::generate(now),
            delivery_date: None,
            cancelled_at: None,
            cancel_reason: None,
            events: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        order.events.push(OrderEvent::Placed(OrderPlaced {
            order_id: id,
            user_id: params.user_id,
            product_id: params.product_id,
            quantity: params.quantity,
            total_price,
            occurred_at: now,
        }));

        Ok(order)
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Get the order ID.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Get the owning user's ID.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Get the username snapshot.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Get the ordered product's ID.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Get the product name snapshot.
    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Get the unit price snapshot.
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Get the unit count.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Get the total price (`quantity * unit_price`).
    #[must_use]
    pub const fn total_price(&self) -> Money {
        self.total_price
    }

    /// Get the requested delivery date.
    #[must_use]
    pub const fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }

    /// Get the delivery time slot.
    #[must_use]
    pub fn delivery_time(&self) -> &str {
        &self.delivery_time
    }

    /// Get the delivery region.
    #[must_use]
    pub fn delivery_location(&self) -> &str {
        &self.delivery_location
    }

    /// Get the customer message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the current status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Get the payment status.
    #[must_use]
    pub const fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    /// Get the tracking number.
    #[must_use]
    pub const fn tracking_number(&self) -> &TrackingNumber {
        &self.tracking_number
    }

    /// Get the delivery timestamp, if delivered.
    #[must_use]
    pub const fn delivery_date(&self) -> Option<DateTime<Utc>> {
        self.delivery_date
    }

    /// Get the cancellation timestamp, if cancelled.
    #[must_use]
    pub const fn cancelled_at(&self) -> Option<DateTime<Utc>> {
        self.cancelled_at
    }

    /// Get the cancellation reason, if cancelled.
    #[must_use]
    pub fn cancel_reason(&self) -> Option<&str> {
        self.cancel_reason.as_deref()
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ========================================================================
    // Classification
    // ========================================================================

    /// Whether this order belongs to the given user.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Whether the order counts as upcoming relative to `today`.
    #[must_use]
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.purchase_date >= today && self.status.is_open()
    }

    /// Whether the order counts as past (delivered or cancelled).
    #[must_use]
    pub const fn is_past(&self) -> bool {
        self.status.is_terminal()
    }

    // ========================================================================
    // State Transitions
    // ========================================================================

    /// Move the order forward to `to`.
    ///
    /// Entering `Delivered` stamps the delivery date and flips the payment
    /// status to `Paid`. Cancellation carries extra bookkeeping (timestamp,
    /// reason, stock release) and must go through [`Order::cancel`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` if the edge is not in the table, or
    /// a parameter error if `to` is `Cancelled`.
    pub fn transition_to(&mut self, to: OrderStatus) -> Result<(), OrderError> {
        if to == OrderStatus::Cancelled {
            return Err(OrderError::InvalidParameters {
                field: "status".to_string(),
                message: "Use the cancel operation to cancel an order".to_string(),
            });
        }

        OrderStateMachine::validate_transition(self.status, to)?;

        let from = self.status;
        self.status = to;
        self.updated_at = Utc::now();

        if to == OrderStatus::Delivered {
            self.delivery_date = Some(self.updated_at);
            self.payment_status = PaymentStatus::Paid;
        }

        self.events.push(OrderEvent::StatusChanged(OrderStatusChanged {
            order_id: self.id.clone(),
            from,
            to,
            occurred_at: self.updated_at,
        }));

        Ok(())
    }

    /// Cancel the order.
    ///
    /// Stamps the cancellation time and reason. The caller is responsible
    /// for releasing the reserved stock exactly once after the cancelled
    /// state has been persisted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless the status is pending or
    /// confirmed, or a parameter error if the reason is too long.
    pub fn cancel(&mut self, reason: impl Into<String>) -> Result<(), OrderError> {
        let reason = reason.into();
        if reason.chars().count() > MAX_CANCEL_REASON_LEN {
            return Err(OrderError::InvalidParameters {
                field: "reason".to_string(),
                message: format!("Cancel reason cannot exceed {MAX_CANCEL_REASON_LEN} characters"),
            });
        }

        OrderStateMachine::validate_transition(self.status, OrderStatus::Cancelled)?;

        self.status = OrderStatus::Cancelled;
        self.updated_at = Utc::now();
        self.cancelled_at = Some(self.updated_at);
        self.cancel_reason = Some(reason.clone());

        self.events.push(OrderEvent::Cancelled(OrderCancelled {
            order_id: self.id.clone(),
            product_id: self.product_id.clone(),
            quantity: self.quantity,
            reason,
            occurred_at: self.updated_at,
        }));

        Ok(())
    }

    /// Apply pending-only field edits.
    ///
    /// A quantity change recomputes the total price; the unit price snapshot
    /// never changes. The caller validates schedule-dependent fields against
    /// the delivery policy and adjusts the stock reservation by the quantity
    /// delta.
    ///
    /// # Errors
    ///
    /// Returns `NotEditable` unless the status is pending, or a parameter
    /// error for an invalid quantity or overlong message.
    pub fn apply_changes(&mut self, changes: OrderChanges) -> Result<(), OrderError> {
        if self.status != OrderStatus::Pending {
            return Err(OrderError::NotEditable {
                status: self.status,
            });
        }

        if let Some(quantity) = changes.quantity {
            quantity
                .validate_for_order()
                .map_err(|e| OrderError::InvalidParameters {
                    field: "quantity".to_string(),
                    message: e.to_string(),
                })?;
        }

        if let Some(ref message) = changes.message {
            if message.chars().count() > MAX_MESSAGE_LEN {
                return Err(OrderError::InvalidParameters {
                    field: "message".to_string(),
                    message: format!("Message cannot exceed {MAX_MESSAGE_LEN} characters"),
                });
            }
        }

        if let Some(date) = changes.purchase_date {
            self.purchase_date = date;
        }
        if let Some(slot) = changes.delivery_time {
            self.delivery_time = slot;
        }
        if let Some(region) = changes.delivery_location {
            self.delivery_location = region;
        }
        if let Some(message) = changes.message {
            self.message = message;
        }
        if let Some(quantity) = changes.quantity {
            self.quantity = quantity;
            self.total_price = self.unit_price.times(self.quantity);
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Drain accumulated domain events.
    pub fn drain_events(&mut self) -> Vec<OrderEvent> {
        std::mem::take(&mut self.events)
    }

    /// Get pending events without draining.
    #[must_use]
    pub fn pending_events(&self) -> &[OrderEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_params() -> NewOrderParams {
        NewOrderParams {
            user_id: UserId::new("user-1"),
            username: "nimal".to_string(),
            product_id: ProductId::new("prod-1"),
            product_name: "Ceylon Tea 500g".to_string(),
            unit_price: Money::from_f64(10.0),
            quantity: Quantity::new(3),
            purchase_date: NaiveDate::from_ymd_opt(2030, 6, 3).unwrap(),
            delivery_time: "10 AM".to_string(),
            delivery_location: "Colombo".to_string(),
            message: String::new(),
        }
    }

    #[test]
    fn place_computes_total_and_defaults() {
        let order = Order::place(make_params()).unwrap();

        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.payment_status(), PaymentStatus::Pending);
        assert_eq!(order.total_price(), Money::from_f64(30.0));
        assert!(order.tracking_number().as_str().starts_with("TRK"));
        assert!(order.delivery_date().is_none());
        assert!(order.cancelled_at().is_none());
    }

    #[test]
    fn place_raises_placed_event() {
        let order = Order::place(make_params()).unwrap();
        assert_eq!(order.pending_events().len(), 1);
        assert!(matches!(order.pending_events()[0], OrderEvent::Placed(_)));
    }

    #[test]
    fn place_rejects_zero_quantity() {
        let mut params = make_params();
        params.quantity = Quantity::ZERO;
        let err = Order::place(params).unwrap_err();
        assert!(matches!(
            err,
            OrderError::InvalidParameters { ref field, .. } if field == "quantity"
        ));
    }

    #[test]
    fn place_rejects_overlong_message() {
        let mut params = make_params();
        params.message = "x".repeat(MAX_MESSAGE_LEN + 1);
        assert!(Order::place(params).is_err());
    }

    #[test]
    fn full_path_to_delivered_flips_payment() {
        let mut order = Order::place(make_params()).unwrap();
        order.drain_events();

        order.transition_to(OrderStatus::Confirmed).unwrap();
        order.transition_to(OrderStatus::Processing).unwrap();
        order.transition_to(OrderStatus::Shipped).unwrap();
        order.transition_to(OrderStatus::Delivered).unwrap();

        assert_eq!(order.status(), OrderStatus::Delivered);
        assert_eq!(order.payment_status(), PaymentStatus::Paid);
        assert!(order.delivery_date().is_some());
        assert_eq!(order.pending_events().len(), 4);
    }

    #[test]
    fn pending_cannot_skip_to_delivered() {
        let mut order = Order::place(make_params()).unwrap();
        let err = order.transition_to(OrderStatus::Delivered).unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidStateTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered,
            }
        );
    }

    #[test]
    fn transition_to_cancelled_is_rejected() {
        let mut order = Order::place(make_params()).unwrap();
        assert!(order.transition_to(OrderStatus::Cancelled).is_err());
        // State untouched
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn cancel_from_pending_stamps_fields() {
        let mut order = Order::place(make_params()).unwrap();
        order.drain_events();

        order.cancel("Changed my mind").unwrap();

        assert_eq!(order.status(), OrderStatus::Cancelled);
        assert!(order.cancelled_at().is_some());
        assert_eq!(order.cancel_reason(), Some("Changed my mind"));
        assert!(matches!(
            order.pending_events()[0],
            OrderEvent::Cancelled(_)
        ));
    }

    #[test]
    fn cancel_from_confirmed_is_allowed() {
        let mut order = Order::place(make_params()).unwrap();
        order.transition_to(OrderStatus::Confirmed).unwrap();
        assert!(order.cancel("no longer needed").is_ok());
    }

    #[test]
    fn cancel_from_processing_is_rejected() {
        let mut order = Order::place(make_params()).unwrap();
        order.transition_to(OrderStatus::Confirmed).unwrap();
        order.transition_to(OrderStatus::Processing).unwrap();

        let err = order.cancel("too late").unwrap_err();
        assert!(matches!(err, OrderError::InvalidStateTransition { .. }));
    }

    #[test]
    fn cancel_twice_fails() {
        let mut order = Order::place(make_params()).unwrap();
        order.cancel("first").unwrap();
        let err = order.cancel("second").unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidStateTransition {
                from: OrderStatus::Cancelled,
                to: OrderStatus::Cancelled,
            }
        );
    }

    #[test]
    fn cancel_rejects_overlong_reason() {
        let mut order = Order::place(make_params()).unwrap();
        let err = order.cancel("x".repeat(MAX_CANCEL_REASON_LEN + 1)).unwrap_err();
        assert!(matches!(err, OrderError::InvalidParameters { .. }));
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn quantity_change_recomputes_total() {
        let mut order = Order::place(make_params()).unwrap();

        order
            .apply_changes(OrderChanges {
                quantity: Some(Quantity::new(5)),
                ..OrderChanges::default()
            })
            .unwrap();

        assert_eq!(order.quantity(), Quantity::new(5));
        assert_eq!(order.total_price(), Money::from_f64(50.0));
        // Unit price snapshot never moves
        assert_eq!(order.unit_price(), Money::from_f64(10.0));
    }

    #[test]
    fn edits_rejected_after_confirmation() {
        let mut order = Order::place(make_params()).unwrap();
        order.transition_to(OrderStatus::Confirmed).unwrap();

        let err = order
            .apply_changes(OrderChanges {
                message: Some("hello".to_string()),
                ..OrderChanges::default()
            })
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::NotEditable {
                status: OrderStatus::Confirmed,
            }
        );
    }

    #[test]
    fn apply_changes_updates_delivery_fields() {
        let mut order = Order::place(make_params()).unwrap();
        let new_date = NaiveDate::from_ymd_opt(2030, 6, 10).unwrap();

        order
            .apply_changes(OrderChanges {
                purchase_date: Some(new_date),
                delivery_time: Some("11 AM".to_string()),
                delivery_location: Some("Kandy".to_string()),
                message: Some("leave at the gate".to_string()),
                quantity: None,
            })
            .unwrap();

        assert_eq!(order.purchase_date(), new_date);
        assert_eq!(order.delivery_time(), "11 AM");
        assert_eq!(order.delivery_location(), "Kandy");
        assert_eq!(order.message(), "leave at the gate");
        // Total untouched when quantity unchanged
        assert_eq!(order.total_price(), Money::from_f64(30.0));
    }

    #[test]
    fn classification_upcoming_and_past() {
        let today = NaiveDate::from_ymd_opt(2030, 6, 1).unwrap();
        let mut order = Order::place(make_params()).unwrap();

        assert!(order.is_upcoming(today));
        assert!(!order.is_past());

        order.transition_to(OrderStatus::Confirmed).unwrap();
        order.transition_to(OrderStatus::Processing).unwrap();
        order.transition_to(OrderStatus::Shipped).unwrap();
        assert!(order.is_upcoming(today));

        order.transition_to(OrderStatus::Delivered).unwrap();
        assert!(!order.is_upcoming(today));
        assert!(order.is_past());
    }

    #[test]
    fn cancelled_order_is_past_even_with_future_date() {
        let today = NaiveDate::from_ymd_opt(2030, 6, 1).unwrap();
        let mut order = Order::place(make_params()).unwrap();
        order.cancel("n/a").unwrap();

        assert!(!order.is_upcoming(today));
        assert!(order.is_past());
    }

    #[test]
    fn order_serde_roundtrip() {
        let order = Order::place(make_params()).unwrap();

        let json = serde_json::to_string(&order).unwrap();
        let parsed: Order = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id(), order.id());
        assert_eq!(parsed.status(), order.status());
        assert_eq!(parsed.total_price(), order.total_price());
        assert!(parsed.pending_events().is_empty());
    }

    #[test]
    fn ownership_check() {
        let order = Order::place(make_params()).unwrap();
        assert!(order.is_owned_by(&UserId::new("user-1")));
        assert!(!order.is_owned_by(&UserId::new("user-2")));
    }
}
