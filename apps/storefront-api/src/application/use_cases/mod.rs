//! Application use cases orchestrating the order lifecycle.

mod cancel_order;
mod order_queries;
mod place_order;
mod set_order_status;
mod update_order;

pub use cancel_order::CancelOrderUseCase;
pub use order_queries::OrderQueriesUseCase;
pub use place_order::{PlaceOrderRequest, PlaceOrderUseCase};
pub use set_order_status::SetOrderStatusUseCase;
pub use update_order::{UpdateOrderRequest, UpdateOrderUseCase};

use crate::domain::catalog::ProductError;
use crate::domain::ordering::OrderError;

/// Business error surfaced by a use case.
///
/// Wraps the two domain taxonomies so every operation returns one error
/// type at the service boundary; the HTTP layer maps each kind to a status
/// code without inspecting strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UseCaseError {
    /// Order lifecycle error.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// Catalog collaborator error.
    #[error(transparent)]
    Product(#[from] ProductError),
}
