pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::document::handlers as document;
use crate::export::handlers as export;
use crate::state::AppState;
use crate::store::handlers as store;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions
        .route("/api/v1/sessions", post(store::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(store::handle_get_session).delete(store::handle_end_session),
        )
        .route(
            "/api/v1/sessions/:id/identity",
            get(store::handle_get_identity).put(store::handle_set_identity),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section",
            get(store::handle_list_section).post(store::handle_append_entry),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section/:index",
            patch(store::handle_update_entry).delete(store::handle_remove_entry),
        )
        // Document + preview
        .route(
            "/api/v1/sessions/:id/document",
            get(document::handle_get_document),
        )
        .route(
            "/api/v1/sessions/:id/preview",
            get(document::handle_get_preview),
        )
        // Export API
        .route(
            "/api/v1/sessions/:id/export",
            post(export::handle_start_export),
        )
        .route(
            "/api/v1/exports/:job_id/status",
            get(export::handle_export_status),
        )
        .route("/api/v1/exports/:job_id", get(export::handle_download_export))
        .with_state(state)
}
