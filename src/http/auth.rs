use super::handlers::ErrorResponse;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Json, Response},
};
use tracing::warn;

/// Header set by the authenticating proxy in front of the API
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity of an already-authenticated caller
///
/// Requests without a non-empty `x-user-id` header are rejected with 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        match user_id {
            Some(id) => Ok(CallerId(id.to_string())),
            None => {
                warn!("Rejected unauthenticated request to {}", parts.uri.path());
                Err((
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse::new("Unauthorized")),
                )
                    .into_response())
            }
        }
    }
}
