//! Order State Machine Service
//!
//! Validates status transitions before any mutation is applied.

use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::value_objects::OrderStatus;

/// Order state machine for validating transitions.
///
/// The transition table is checked explicitly, as a lookup, so every
/// mutation path goes through the same single source of truth:
///
/// `pending -> confirmed -> processing -> shipped -> delivered`, with
/// `cancelled` reachable only from `pending` or `confirmed`. Delivered and
/// cancelled are terminal.
pub struct OrderStateMachine;

impl OrderStateMachine {
    /// Check if a status transition is valid.
    #[must_use]
    pub const fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
        matches!(
            (from, to),
            (OrderStatus::Pending, OrderStatus::Confirmed)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                | (OrderStatus::Confirmed, OrderStatus::Processing)
                | (OrderStatus::Confirmed, OrderStatus::Cancelled)
                | (OrderStatus::Processing, OrderStatus::Shipped)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
        )
    }

    /// Validate a status transition.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` naming source and target if the
    /// transition is not in the table.
    pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> Result<(), OrderError> {
        if Self::is_valid_transition(from, to) {
            Ok(())
        } else {
            Err(OrderError::InvalidStateTransition { from, to })
        }
    }

    /// Get all valid next statuses from a given status.
    #[must_use]
    pub fn valid_next_states(from: OrderStatus) -> Vec<OrderStatus> {
        match from {
            OrderStatus::Pending => vec![OrderStatus::Confirmed, OrderStatus::Cancelled],
            OrderStatus::Confirmed => vec![OrderStatus::Processing, OrderStatus::Cancelled],
            OrderStatus::Processing => vec![OrderStatus::Shipped],
            OrderStatus::Shipped => vec![OrderStatus::Delivered],
            // Terminal states
            OrderStatus::Delivered | OrderStatus::Cancelled => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(OrderStatus::Pending, OrderStatus::Confirmed)]
    #[test_case(OrderStatus::Pending, OrderStatus::Cancelled)]
    #[test_case(OrderStatus::Confirmed, OrderStatus::Processing)]
    #[test_case(OrderStatus::Confirmed, OrderStatus::Cancelled)]
    #[test_case(OrderStatus::Processing, OrderStatus::Shipped)]
    #[test_case(OrderStatus::Shipped, OrderStatus::Delivered)]
    fn legal_edges(from: OrderStatus, to: OrderStatus) {
        assert!(OrderStateMachine::is_valid_transition(from, to));
    }

    #[test_case(OrderStatus::Pending, OrderStatus::Delivered)]
    #[test_case(OrderStatus::Pending, OrderStatus::Shipped)]
    #[test_case(OrderStatus::Processing, OrderStatus::Cancelled)]
    #[test_case(OrderStatus::Shipped, OrderStatus::Cancelled)]
    #[test_case(OrderStatus::Confirmed, OrderStatus::Pending)]
    #[test_case(OrderStatus::Shipped, OrderStatus::Processing)]
    fn illegal_edges(from: OrderStatus, to: OrderStatus) {
        assert!(!OrderStateMachine::is_valid_transition(from, to));
    }

    #[test]
    fn no_transitions_from_terminal_states() {
        for terminal in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            assert!(OrderStateMachine::valid_next_states(terminal).is_empty());
            for to in OrderStatus::ALL {
                assert!(!OrderStateMachine::is_valid_transition(terminal, to));
            }
        }
    }

    #[test]
    fn no_self_transitions() {
        for status in OrderStatus::ALL {
            assert!(!OrderStateMachine::is_valid_transition(status, status));
        }
    }

    #[test]
    fn validate_transition_returns_typed_error() {
        let err = OrderStateMachine::validate_transition(
            OrderStatus::Pending,
            OrderStatus::Delivered,
        )
        .unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidStateTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered,
            }
        );
    }

    #[test]
    fn valid_next_states_matches_table() {
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let in_list = OrderStateMachine::valid_next_states(from).contains(&to);
                assert_eq!(in_list, OrderStateMachine::is_valid_transition(from, to));
            }
        }
    }
}
