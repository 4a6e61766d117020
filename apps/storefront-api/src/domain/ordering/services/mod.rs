//! Domain services of the ordering context.

mod delivery_schedule;
mod order_state_machine;

pub use delivery_schedule::DeliverySchedule;
pub use order_state_machine::OrderStateMachine;
