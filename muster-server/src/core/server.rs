//! HTTP Server bootstrap

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::core::ServerState;

pub struct Server {
    state: ServerState,
}

impl Server {
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    /// Assemble the full application router
    pub fn router(state: ServerState) -> Router {
        Router::new()
            .merge(api::health::router())
            .merge(api::workspaces::router())
            .merge(api::settings::router())
            .merge(api::employees::router())
            .merge(api::attendance::router())
            .merge(api::shifts::router())
            .merge(api::exports::router())
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Bind and serve until shutdown
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.state.config.bind_addr();
        let app = Self::router(self.state);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("Listening on http://{}", addr);
        axum::serve(listener, app).await?;
        Ok(())
    }
}
