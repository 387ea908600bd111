use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::assistant::language::{LanguageProfile, LANGUAGES};
use crate::assistant::relay::{ChatReply, ChatRequest};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/chat-assistant
///
/// A body that fails to decode is reported as an internal error, matching the
/// relay's `{ error }` contract instead of axum's plain-text rejection.
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Internal(e.body_text()))?;
    let reply = state.relay.respond(request).await?;
    Ok(Json(reply))
}

/// GET /api/v1/languages
pub async fn handle_languages() -> Json<&'static [LanguageProfile]> {
    Json(LANGUAGES)
}
