use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::{Config, StoreMode};
use crate::error::ApiError;
use crate::relay_core::{
    ChatMessage, CompletionClient, MemoryStore, Message, MessageStore, Relay, SqliteStore,
};

#[derive(Clone)]
pub struct AppState {
    relay: Arc<Relay>,
}

#[derive(Deserialize)]
pub struct SendRequest {
    content: String,
}

pub fn router(relay: Arc<Relay>) -> Router {
    Router::new()
        .route("/api/messages/latest", get(latest_messages))
        .route("/api/messages/history", get(chat_history))
        .route("/api/messages/send", post(send_message))
        .with_state(AppState { relay })
}

/// The latest exchange: up to the two most recent messages, newest first.
async fn latest_messages(State(state): State<AppState>) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = state.relay.store().latest(2)?;
    if messages.is_empty() {
        return Err(ApiError::NotFound("No messages found.".to_string()));
    }
    Ok(Json(messages))
}

async fn chat_history(State(state): State<AppState>) -> Result<Json<Vec<Message>>, ApiError> {
    Ok(Json(state.relay.store().all()?))
}

async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<SendRequest>,
) -> Result<Json<ChatMessage>, ApiError> {
    let reply = state.relay.send(&request.content).await?;
    Ok(Json(reply))
}

fn cors_layer(allowed_origin: &str) -> Result<CorsLayer> {
    let origin: HeaderValue = allowed_origin.parse()?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}

pub async fn start_server() -> Result<()> {
    let config = Config::from_env()?;

    let store: Arc<dyn MessageStore> = match config.store_mode {
        StoreMode::Sqlite => Arc::new(SqliteStore::connect(&config.database_url)?),
        StoreMode::Memory => Arc::new(MemoryStore::new()),
    };
    let completion = CompletionClient::new(config.api_key, config.api_base);
    let relay = Arc::new(Relay::new(store, completion));

    let app = router(relay).layer(cors_layer(&config.allowed_origin)?);

    info!(addr = %config.listen_addr, store = ?config.store_mode, "listening");

    axum::Server::bind(&config.listen_addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
