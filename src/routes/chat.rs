use axum::{Json, extract::rejection::JsonRejection};

use crate::{
    error::{AppError, AppResult},
    message::{ChatRequest, ChatResponse},
    services::chatbot::{detect_intent, generate_reply},
};

pub async fn chat_handler(
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(payload) = payload?;

    let Some(message) = payload.text() else {
        return Err(AppError::BadRequest("Message is required.".to_string()));
    };

    tracing::debug!(intent = ?detect_intent(message), "chat message classified");
    let reply = generate_reply(message);

    Ok(Json(ChatResponse { reply }))
}
