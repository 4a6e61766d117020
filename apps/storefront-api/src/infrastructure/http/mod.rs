//! HTTP adapter: axum router, identity extraction, envelopes.

mod auth;
mod controller;
mod request;
mod response;

pub use auth::{ROLE_HEADER, USER_ID_HEADER, USERNAME_HEADER};
pub use controller::{AppState, create_router};
pub use request::{
    CancelOrderBody, CreateOrderBody, ListOrdersQuery, SetStatusBody, UpdateOrderBody,
};
pub use response::{ApiError, ErrorBody, HealthResponse, SuccessBody};
