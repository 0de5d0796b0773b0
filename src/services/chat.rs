//! Chat query handler: answers free-text questions about events through an
//! OpenAI-compatible chat-completions endpoint.

use chrono::NaiveDate;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DbConn;
use crate::{
    config::ChatConfig,
    error::{Error, Result},
    models::events::Event,
    queries::events,
};

/// Generic message returned to the caller when the upstream call fails.
const FALLBACK_MESSAGE: &str =
    "Sorry, I'm having trouble processing your request right now. Please try again later.";

/// The event snapshot embedded in the chat context.
#[derive(Debug, Clone, Serialize)]
pub struct EventContext {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub venue: String,
    pub description: Option<String>,
    pub category: String,
}

impl From<&Event> for EventContext {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            name: event.name.clone(),
            date: event.date,
            venue: event.venue.clone(),
            description: event.description.clone(),
            category: event
                .category
                .clone()
                .unwrap_or_else(|| "General".to_string()),
        }
    }
}

/// The generated answer plus the number of events included in context.
#[derive(Debug, Clone)]
pub struct ChatAnswer {
    pub response: String,
    pub event_count: usize,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

impl ChatClient {
    pub fn new(config: &ChatConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    /// Sends a system prompt and a user message, returning the generated
    /// text of the first choice.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Chat completion request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "Chat completion returned status {}",
                response.status()
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Invalid chat completion response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::Upstream("Chat completion returned no choices".to_string()))
    }
}

/// Builds the instruction prompt embedding the event snapshot and today's
/// date.
pub fn build_system_prompt(events: &[EventContext], today: NaiveDate) -> String {
    let snapshot = serde_json::to_string_pretty(events).unwrap_or_else(|_| "[]".to_string());

    format!(
        "You are an AI assistant for a college event management system. Today's date: {today}.\n\
         \n\
         Available events: {snapshot}\n\
         \n\
         Guidelines:\n\
         - Help students find information about events\n\
         - Be conversational and helpful\n\
         - For \"upcoming events\", filter by dates after today\n\
         - Include event names, dates, venues, and brief descriptions\n\
         - Keep responses concise but informative\n\
         - Use friendly, student-appropriate language"
    )
}

/// Answers a free-text question using the current event snapshot as
/// context.
///
/// Upstream failure is reported as a generic apologetic message; the
/// underlying error detail is appended only in development mode.
pub async fn answer_query(
    conn: &mut DbConn,
    client: &ChatClient,
    question: &str,
    development: bool,
) -> Result<ChatAnswer> {
    let events = events::list_events(conn).await?;
    let context: Vec<EventContext> = events.iter().map(EventContext::from).collect();

    let system_prompt = build_system_prompt(&context, chrono::Utc::now().date_naive());

    let response = client
        .complete(&system_prompt, question)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "chat completion failed");
            if development {
                Error::Upstream(format!("{} ({})", FALLBACK_MESSAGE, e))
            } else {
                Error::Upstream(FALLBACK_MESSAGE.to_string())
            }
        })?;

    Ok(ChatAnswer {
        response,
        event_count: context.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_event(category: Option<&str>) -> Event {
        Event {
            id: Uuid::now_v7(),
            name: "Tech Fest".to_string(),
            description: Some("Annual tech showcase".to_string()),
            date: NaiveDate::from_ymd_opt(2999, 1, 1).unwrap(),
            venue: "Main Hall".to_string(),
            capacity: 100,
            category: category.map(str::to_string),
            created_at: Utc::now(),
            created_by: "admin".to_string(),
        }
    }

    #[test]
    fn test_event_context_defaults_category_to_general() {
        let event = sample_event(None);
        let context = EventContext::from(&event);
        assert_eq!(context.category, "General");

        let event = sample_event(Some("Workshops"));
        let context = EventContext::from(&event);
        assert_eq!(context.category, "Workshops");
    }

    #[test]
    fn test_system_prompt_embeds_events_and_date() {
        let event = sample_event(None);
        let context = vec![EventContext::from(&event)];
        let today = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();

        let prompt = build_system_prompt(&context, today);
        assert!(prompt.contains("2026-08-24"));
        assert!(prompt.contains("Tech Fest"));
        assert!(prompt.contains("Main Hall"));
    }

    #[test]
    fn test_system_prompt_with_no_events() {
        let prompt = build_system_prompt(&[], NaiveDate::from_ymd_opt(2026, 8, 24).unwrap());
        assert!(prompt.contains("Available events: []"));
    }
}
