//! Shared domain kernel: typed identifiers, money, quantities, errors.

mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::{Money, OrderId, ProductId, Quantity, UserId};
