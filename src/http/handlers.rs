use super::auth::CallerId;
use super::state::AppState;
use crate::analytics;
use crate::session::{NewSession, SessionEntry, SessionRecord};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub success: bool,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    /// Newest first
    pub sessions: Vec<SessionEntry>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    /// Which rule a rejected payload broke
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /analytics
/// Emotional patterns over all of the caller's sessions
pub async fn get_analytics(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
) -> impl IntoResponse {
    let entries = match state.store.find_all_for_user(&user_id).await {
        Ok(entries) => entries,
        Err(e) => {
            error!("Failed to compute analytics for {}: {:#}", user_id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to load analytics")),
            )
                .into_response();
        }
    };

    let records: Vec<SessionRecord> = entries.iter().map(SessionEntry::record).collect();
    let result = analytics::aggregate(&records, state.clock.now());

    info!(
        "Analytics for {}: {} sessions, streak {} days",
        user_id, result.total_sessions, result.streak_days
    );

    (StatusCode::OK, Json(result)).into_response()
}

/// POST /sessions
/// Store one completed voice session
///
/// The body is read as JSON whatever its content type. Only undecodable
/// bodies are "Invalid JSON"; well-formed bodies with bad fields fail
/// validation instead.
pub async fn create_session(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
    body: Bytes,
) -> impl IntoResponse {
    let body: Value = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(e) => {
            warn!("Rejected session body from {}: {}", user_id, e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Invalid JSON")),
            )
                .into_response();
        }
    };

    let session = match NewSession::from_json(body).and_then(NewSession::validate) {
        Ok(session) => session,
        Err(e) => {
            warn!("Rejected session from {}: {}", user_id, e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Missing or invalid required fields".to_string(),
                    detail: Some(e.to_string()),
                }),
            )
                .into_response();
        }
    };

    match state.store.insert(&user_id, session, state.clock.now()).await {
        Ok(entry) => {
            info!("Saved session {} ({}) for {}", entry.id, entry.emotion, user_id);
            (
                StatusCode::CREATED,
                Json(CreateSessionResponse {
                    success: true,
                    id: entry.id,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to save session for {}: {:#}", user_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to save session")),
            )
                .into_response()
        }
    }
}

/// GET /sessions
/// The caller's session history, newest first
pub async fn list_sessions(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
) -> impl IntoResponse {
    match state.store.find_all_for_user(&user_id).await {
        Ok(mut sessions) => {
            sessions.reverse();
            (StatusCode::OK, Json(SessionListResponse { sessions })).into_response()
        }
        Err(e) => {
            error!("Failed to fetch sessions for {}: {:#}", user_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch sessions")),
            )
                .into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            service: state.service_name.clone(),
        }),
    )
}
