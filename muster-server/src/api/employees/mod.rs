//! Employee API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/employees", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/workspace/{workspace_id}", get(handler::list))
        .route("/workspace/{workspace_id}/all", get(handler::list_with_inactive))
        .route("/", axum::routing::post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
