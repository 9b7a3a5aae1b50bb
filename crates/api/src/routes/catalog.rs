//! Route table for the catalog tree.
//!
//! Mounted at the server root by `build_app_router`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes.
///
/// ```text
/// GET    /all          -> list_all
/// POST   /imports      -> import
/// GET    /nodes/{id}   -> get_node
/// DELETE /delete/{id}  -> delete_node
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/all", get(catalog::list_all))
        .route("/imports", post(catalog::import))
        .route("/nodes/{id}", get(catalog::get_node))
        .route("/delete/{id}", delete(catalog::delete_node))
}
