//! Shared response payload types for API handlers.

use serde::Serialize;

/// Standard `{ "message": ... }` confirmation payload.
///
/// Used where an endpoint acknowledges an action without returning an
/// entity, e.g. the delete confirmation.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
