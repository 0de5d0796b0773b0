//! Chatbot handler.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::{
    error::{Error, Result},
    models::requests::ChatQueryRequest,
    services::chat,
    state::AppState,
};

/// POST /api/chatbot/query
///
/// Answers a free-text question about events. The current event snapshot
/// is embedded into the model's instruction prompt.
///
/// # Request Body
/// - `query`: The question (required)
/// - `userId`: Optional caller identifier, used for logging only
///
/// # HTTP Status Codes
/// - `200 OK`: Body carries the generated `response` and `eventCount`
/// - `400 BAD_REQUEST`: Missing query
/// - `500 INTERNAL_SERVER_ERROR`: Upstream completion failure; detail is
///   included only in development mode
pub async fn query(
    State(state): State<AppState>,
    Json(request): Json<ChatQueryRequest>,
) -> Result<Json<serde_json::Value>> {
    let question = request
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| Error::Validation("Query is required".to_string()))?;

    tracing::info!(
        user_id = request.user_id.as_deref().unwrap_or("anonymous"),
        "chatbot query received"
    );

    let mut conn = super::acquire(&state).await?;
    let answer = chat::answer_query(&mut conn, &state.chat, question, state.config.development)
        .await?;

    Ok(Json(serde_json::json!({
        "query": question,
        "response": answer.response,
        "timestamp": Utc::now(),
        "eventCount": answer.event_count,
    })))
}
