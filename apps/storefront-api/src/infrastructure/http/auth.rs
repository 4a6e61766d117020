//! Identity extraction.
//!
//! Authentication itself is handled by the upstream identity collaborator;
//! by the time a request reaches this service the gateway has attached the
//! authenticated identity as headers. This extractor only reads them.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};

use super::response::ErrorBody;
use crate::application::{CurrentUser, Role};
use crate::domain::shared::UserId;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the authenticated username.
pub const USERNAME_HEADER: &str = "x-username";

/// Header carrying the authenticated role (`user` or `admin`).
pub const ROLE_HEADER: &str = "x-user-role";

/// Rejection for missing or malformed identity headers.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    /// A required identity header is absent or not valid UTF-8.
    #[error("Missing or invalid identity header: {0}")]
    MissingIdentity(&'static str),

    /// The role header holds an unknown role name.
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorBody::new("Authentication required")),
        )
            .into_response()
    }
}

fn header_str<'a>(parts: &'a Parts, name: &'static str) -> Result<&'a str, AuthError> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or(AuthError::MissingIdentity(name))
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = header_str(parts, USER_ID_HEADER)?;
        let username = header_str(parts, USERNAME_HEADER)?;
        let role = match header_str(parts, ROLE_HEADER)? {
            "admin" => Role::Admin,
            "user" => Role::User,
            other => return Err(AuthError::UnknownRole(other.to_string())),
        };

        Ok(Self {
            id: UserId::new(id),
            username: username.to_string(),
            role,
        })
    }
}
