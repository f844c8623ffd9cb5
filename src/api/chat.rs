//! Chat accessors.
//!
//! The service is stateless about conversations: each global turn carries
//! the full prior transcript as `history` plus the new `message` as a
//! distinct field. Opportunity-scoped chat carries no history — the
//! opportunity id in the path is the whole context.

use serde::Serialize;

use super::{ApiClient, ApiError};
use crate::api::types::{ChatMessage, ChatReply};

/// Request body for `POST /chat`.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    history: &'a [ChatMessage],
}

/// Request body for `POST /chat/opportunity/{id}`.
#[derive(Debug, Serialize)]
struct OpportunityChatRequest<'a> {
    message: &'a str,
}

/// `POST /chat` — one conversation turn with the prior transcript.
pub fn send_message(
    client: &ApiClient,
    message: &str,
    history: &[ChatMessage],
) -> Result<ChatReply, ApiError> {
    client.post_json("/chat", &ChatRequest { message, history })
}

/// `POST /chat/opportunity/{id}` — ask about one opportunity.
pub fn chat_about_opportunity(
    client: &ApiClient,
    opportunity_id: &str,
    message: &str,
) -> Result<ChatReply, ApiError> {
    client.post_json(
        &format!("/chat/opportunity/{opportunity_id}"),
        &OpportunityChatRequest { message },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_carries_message_and_history() {
        let history = vec![
            ChatMessage::user("what's hot?"),
            ChatMessage::assistant("permitting tools"),
        ];
        let body = ChatRequest {
            message: "tell me more",
            history: &history,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["message"], "tell me more");
        assert_eq!(json["history"].as_array().unwrap().len(), 2);
        assert_eq!(json["history"][0]["role"], "user");
        assert_eq!(json["history"][1]["role"], "assistant");
    }

    #[test]
    fn empty_history_serializes_as_empty_array() {
        let body = ChatRequest {
            message: "first turn",
            history: &[],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["history"], serde_json::json!([]));
    }

    #[test]
    fn opportunity_chat_request_has_only_message() {
        let body = OpportunityChatRequest { message: "risks?" };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "risks?" }));
    }
}
