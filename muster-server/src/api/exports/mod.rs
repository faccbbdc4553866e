//! Export API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/exports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/{workspace_id}", get(handler::export_month))
}
