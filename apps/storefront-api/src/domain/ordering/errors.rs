//! Ordering errors.

use std::fmt;

use super::value_objects::OrderStatus;

/// Errors that can occur in the order lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Invalid status transition attempted.
    InvalidStateTransition {
        /// Current order status.
        from: OrderStatus,
        /// Attempted status.
        to: OrderStatus,
    },

    /// Edit attempted while the order is no longer pending.
    NotEditable {
        /// Current status.
        status: OrderStatus,
    },

    /// Requester is neither the owner nor an admin.
    AccessDenied {
        /// Order ID.
        order_id: String,
    },

    /// Order not found.
    NotFound {
        /// Order ID.
        order_id: String,
    },

    /// Invalid order parameters.
    InvalidParameters {
        /// Field with invalid value.
        field: String,
        /// Error message.
        message: String,
    },

    /// Purchase date violates the delivery schedule policy.
    InvalidDeliverySchedule {
        /// Error message.
        message: String,
    },

    /// Conditional write lost against a concurrent transition.
    ConcurrentModification {
        /// Order ID.
        order_id: String,
    },

    /// Underlying store failed.
    Storage {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStateTransition { from, to } => {
                write!(f, "Cannot transition order from {from} to {to}")
            }
            Self::NotEditable { status } => {
                write!(f, "Order can only be updated while pending (status: {status})")
            }
            Self::AccessDenied { order_id } => {
                write!(f, "Access denied for order {order_id}")
            }
            Self::NotFound { order_id } => {
                write!(f, "Order not found: {order_id}")
            }
            Self::InvalidParameters { field, message } => {
                write!(f, "Invalid order parameter '{field}': {message}")
            }
            Self::InvalidDeliverySchedule { message } => {
                write!(f, "Invalid delivery schedule: {message}")
            }
            Self::ConcurrentModification { order_id } => {
                write!(f, "Order {order_id} was modified concurrently")
            }
            Self::Storage { message } => {
                write!(f, "Order storage error: {message}")
            }
        }
    }
}

impl std::error::Error for OrderError {}
