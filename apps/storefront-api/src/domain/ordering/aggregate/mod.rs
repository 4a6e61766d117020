//! Order aggregate.

mod order;

pub use order::{MAX_CANCEL_REASON_LEN, MAX_MESSAGE_LEN, NewOrderParams, Order, OrderChanges};
