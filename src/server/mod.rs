//! HTTP server boundary
//!
//! Exposes the AI generation proxy and meeting CRUD over axum. The GLM API
//! key stays server-side; browser clients only ever talk to these routes.

pub mod ai;
pub mod meetings;

use crate::error::{AppError, Result};
use crate::generation::GenerationClient;
use crate::ports::storage::StoragePort;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StoragePort>,
    pub client: Arc<GenerationClient>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidKind(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // propagate the upstream status when the provider reported one
            AppError::Provider { status, .. } => status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/ai/generate", post(ai::generate))
        .route("/api/ai/generate-all", post(ai::generate_all))
        .route(
            "/api/meetings",
            post(meetings::create_meeting).get(meetings::list_meetings),
        )
        .route(
            "/api/meetings/:id",
            get(meetings::get_meeting)
                .put(meetings::update_meeting)
                .delete(meetings::delete_meeting),
        )
        .route("/api/meetings/:id/content", put(meetings::update_content))
        .route("/health", get(health_check))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind and serve until ctrl-c
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("meeting planner listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            log::info!("shutting down");
        })
        .await?;
    Ok(())
}
