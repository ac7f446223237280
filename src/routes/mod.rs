// src/routes/mod.rs
pub mod chat;
pub mod predict;

use crate::{error::handle_panic, state::SharedState};
use axum::{
    Router,
    routing::{get, post},
};
use chat::chat_handler;
use predict::predict_handler;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub const HEALTH_MESSAGE: &str = "AI Crop Yield Backend is running!";

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/", get(|| async { HEALTH_MESSAGE }))
        .route("/chat", post(chat_handler))
        .route("/predict", post(predict_handler))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}
