//! Shift API Module

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shifts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/workspace/{workspace_id}", get(handler::list_workspace_month))
        .route("/day", post(handler::record_day))
        .route("/range", post(handler::record_range))
        .route("/{employee_id}", get(handler::get_month))
}
