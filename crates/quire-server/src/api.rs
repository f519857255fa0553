use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use quire_shared::{Category, Content, Media};
use quire_store::Store;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::handlers::{
    category_by_slug, content_by_slug, create_entity, delete_entity, get_entity, list_content,
    list_entities, update_entity,
};

/// Shared state handed to every handler.
///
/// The store is the single writer for all CMS data; the mutex serialises
/// every request that touches it.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<Store>>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Store, config: ServerConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AnyOrigin);

    let max_body_bytes = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health_check))
        // Content
        .route(
            "/api/content",
            get(list_content).post(create_entity::<Content>),
        )
        .route("/api/content/slug/:slug", get(content_by_slug))
        .route(
            "/api/content/:id",
            get(get_entity::<Content>)
                .patch(update_entity::<Content>)
                .delete(delete_entity::<Content>),
        )
        // Categories
        .route(
            "/api/categories",
            get(list_entities::<Category>).post(create_entity::<Category>),
        )
        .route("/api/categories/slug/:slug", get(category_by_slug))
        .route(
            "/api/categories/:id",
            get(get_entity::<Category>)
                .patch(update_entity::<Category>)
                .delete(delete_entity::<Category>),
        )
        // Media
        .route(
            "/api/media",
            get(list_entities::<Media>).post(create_entity::<Media>),
        )
        .route(
            "/api/media/:id",
            get(get_entity::<Media>)
                .patch(update_entity::<Media>)
                .delete(delete_entity::<Media>),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(DefaultBodyLimit::max(max_body_bytes)),
        )
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let cause = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    ServerError::Internal(cause).into_response()
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
