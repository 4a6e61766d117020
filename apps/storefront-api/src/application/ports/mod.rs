//! Application ports: interfaces to systems outside the core.

mod event_publisher_port;

pub use event_publisher_port::{EventPublishError, EventPublisherPort, NoOpEventPublisher};
