//! Voice session records
//!
//! This module provides the session types shared by the store, the HTTP API
//! and analytics:
//! - `SessionEntry`: a stored session (transcript, emotion, reply, timestamp)
//! - `SessionRecord`: the projection analytics consumes
//! - `NewSession`: the ingestion payload and its validation rules

mod new_session;
mod record;

pub use new_session::{NewSession, ValidSession, ValidationError};
pub use record::{SessionEntry, SessionRecord};
