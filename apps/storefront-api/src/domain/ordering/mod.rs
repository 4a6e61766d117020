//! Ordering bounded context: the order lifecycle core.

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{MAX_CANCEL_REASON_LEN, MAX_MESSAGE_LEN, NewOrderParams, Order, OrderChanges};
pub use errors::OrderError;
pub use repository::{
    OrderRepository, OrderStatistics, Page, PagedOrders, StatusBreakdown,
};
pub use services::{DeliverySchedule, OrderStateMachine};
pub use value_objects::{OrderStatus, ParseOrderStatusError, PaymentStatus, TrackingNumber};
