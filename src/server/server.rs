use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::time::Instant;
use tracing::info;

use crate::cache::registry::CacheRegistry;

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CacheRegistry>,
}

#[derive(Debug, Serialize)]
struct ItemResponse {
    content: String,
    expires_in: i64,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/item/{name}", get(handle_item))
        .with_state(state)
}

/// Serve the cached entry for `name`. Unknown, not-yet-populated, and
/// expired all collapse into a single 404.
async fn handle_item(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match state.cache.get(&name) {
        Some(entry) => {
            let body = ItemResponse {
                content: entry.content.clone(),
                expires_in: entry.remaining_secs(Instant::now()),
            };
            Json(body).into_response()
        }
        None => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

/// Bind and serve until ctrl-c.
pub async fn start(bind_addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}
