//! HTTP response envelopes and error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::dto::OrderDto;
use crate::application::use_cases::UseCaseError;
use crate::domain::catalog::ProductError;
use crate::domain::ordering::OrderError;

/// Success envelope: `{ "status": "success", "message"?, "data": ... }`.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessBody<T> {
    /// Always `success`.
    pub status: &'static str,
    /// Human-readable note for mutations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload.
    pub data: T,
}

impl<T> SuccessBody<T> {
    /// Envelope without a message.
    pub const fn of(data: T) -> Self {
        Self {
            status: "success",
            message: None,
            data,
        }
    }

    /// Envelope with a message.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            message: Some(message.into()),
            data,
        }
    }
}

/// Error envelope: `{ "status": "error", "message": ... }`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Always `error`.
    pub status: &'static str,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorBody {
    /// Build an error envelope.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}

/// Payload wrapper for a single order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderBody {
    /// The order.
    pub order: OrderDto,
}

/// Payload wrapper for a plain order list.
#[derive(Debug, Clone, Serialize)]
pub struct OrdersBody {
    /// The orders.
    pub orders: Vec<OrderDto>,
}

/// Payload wrapper for the delivery region list.
#[derive(Debug, Clone, Serialize)]
pub struct LocationsBody {
    /// Configured delivery regions.
    pub locations: Vec<String>,
}

/// Payload wrapper for the delivery time slot list.
#[derive(Debug, Clone, Serialize)]
pub struct TimesBody {
    /// Configured delivery time slots.
    pub times: Vec<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Status.
    pub status: &'static str,
    /// Application version.
    pub version: String,
}

/// Business error mapped to an HTTP status code.
///
/// All business errors convert to a structured envelope here; internal
/// failures are logged and surfaced as a generic message without detail.
#[derive(Debug)]
pub struct ApiError(UseCaseError);

impl From<UseCaseError> for ApiError {
    fn from(err: UseCaseError) -> Self {
        Self(err)
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        Self(UseCaseError::Order(err))
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        Self(UseCaseError::Product(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, message) = match &self.0 {
            UseCaseError::Order(err) => match err {
                OrderError::InvalidParameters { .. }
                | OrderError::InvalidDeliverySchedule { .. }
                | OrderError::InvalidStateTransition { .. }
                | OrderError::NotEditable { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                OrderError::AccessDenied { .. } => (StatusCode::FORBIDDEN, err.to_string()),
                OrderError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
                OrderError::ConcurrentModification { .. } => {
                    (StatusCode::CONFLICT, err.to_string())
                }
                OrderError::Storage { message } => {
                    tracing::error!(error = %message, "Order storage failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
            UseCaseError::Product(err) => match err {
                ProductError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
                ProductError::Inactive { .. } | ProductError::OutOfStock { .. } => {
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                ProductError::Storage { message } => {
                    tracing::error!(error = %message, "Catalog storage failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
        };

        (code, Json(ErrorBody::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ordering::value_objects::OrderStatus;

    #[test]
    fn success_envelope_serializes_status() {
        let body = SuccessBody::of(42);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"], 42);
        assert!(json.get("message").is_none());
    }

    #[test]
    fn error_envelope_serializes_message() {
        let body = ErrorBody::new("boom");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "boom");
    }

    #[test]
    fn illegal_transition_maps_to_bad_request() {
        let err = ApiError::from(OrderError::InvalidStateTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Delivered,
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn access_denied_maps_to_forbidden() {
        let err = ApiError::from(OrderError::AccessDenied {
            order_id: "ord-1".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn storage_error_maps_to_internal_without_detail() {
        let err = ApiError::from(OrderError::Storage {
            message: "disk on fire".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn out_of_stock_maps_to_bad_request() {
        let err = ApiError::from(ProductError::OutOfStock {
            product_id: "prod-1".to_string(),
            requested: 3,
            available: 2,
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
