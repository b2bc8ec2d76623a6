//! HTTP API for the voice client and the dashboard
//!
//! This module provides a REST API over stored sessions:
//! - GET /analytics - Emotion analytics for the caller
//! - POST /sessions - Store a completed voice session
//! - GET /sessions - Caller's session history, newest first
//! - GET /health - Health check
//!
//! Authentication happens upstream; the proxy forwards the caller's identity
//! in the `x-user-id` header.

mod auth;
mod handlers;
mod routes;
mod state;

pub use auth::{CallerId, USER_ID_HEADER};
pub use handlers::ErrorResponse;
pub use routes::{cors_layer, create_router};
pub use state::AppState;
