//! Conversation transcript manager.
//!
//! The transcript is ordered and append-only: one user message, then
//! exactly one assistant message (the reply, or the fixed fallback), per
//! turn. Turns are serialized by the in-flight flag — a submit while a
//! send is outstanding is dropped, not queued. A failed send never
//! retracts the user's message; it only substitutes the fallback reply.

use crate::api::ApiError;
use crate::api::types::ChatMessage;

/// Synthetic assistant reply injected when a send fails.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Outcome of one [`ChatThread::send_turn`].
#[derive(Debug)]
pub enum TurnOutcome {
    /// Empty/whitespace input, or a send already in flight. Nothing was
    /// appended and no request was issued.
    Rejected,
    /// The assistant replied.
    Replied,
    /// The send failed; the fallback reply was appended instead.
    FellBack(ApiError),
}

/// Ordered, append-only chat transcript plus the in-flight flag.
#[derive(Debug, Default)]
pub struct ChatThread {
    messages: Vec<ChatMessage>,
    in_flight: bool,
}

impl ChatThread {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Start a turn: validate the input, append the user message, and
    /// claim the in-flight flag.
    ///
    /// Returns the trimmed message to send, or `None` when the input is
    /// blank or a send is already outstanding (in which case the
    /// transcript is untouched).
    pub fn begin_turn(&mut self, input: &str) -> Option<String> {
        let message = input.trim();
        if message.is_empty() || self.in_flight {
            return None;
        }
        self.messages.push(ChatMessage::user(message));
        self.in_flight = true;
        Some(message.to_string())
    }

    /// The history payload for the turn in progress: the transcript as it
    /// stood *before* the pending user message was appended. The new
    /// message travels as its own field, not as part of history.
    pub fn pending_history(&self) -> &[ChatMessage] {
        if self.in_flight {
            &self.messages[..self.messages.len() - 1]
        } else {
            &self.messages
        }
    }

    /// Finish the turn: append the assistant reply (or the fallback) and
    /// release the in-flight flag. Runs on every outcome.
    pub fn complete_turn(&mut self, result: Result<String, ApiError>) -> TurnOutcome {
        if !self.in_flight {
            return TurnOutcome::Rejected;
        }
        self.in_flight = false;
        match result {
            Ok(reply) => {
                self.messages.push(ChatMessage::assistant(reply));
                TurnOutcome::Replied
            }
            Err(cause) => {
                self.messages.push(ChatMessage::assistant(FALLBACK_REPLY));
                TurnOutcome::FellBack(cause)
            }
        }
    }

    /// Run one full turn through a transport closure.
    ///
    /// The closure receives the message and the pre-turn history and
    /// returns the assistant's reply text.
    pub fn send_turn<F>(&mut self, input: &str, transport: F) -> TurnOutcome
    where
        F: FnOnce(&str, &[ChatMessage]) -> Result<String, ApiError>,
    {
        let Some(message) = self.begin_turn(input) else {
            return TurnOutcome::Rejected;
        };
        let result = transport(&message, self.pending_history());
        self.complete_turn(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Role;
    use std::cell::Cell;

    fn transport_err() -> ApiError {
        ApiError::Status {
            status: 502,
            message: "Bad Gateway".to_string(),
        }
    }

    #[test]
    fn turn_appends_user_then_assistant() {
        let mut thread = ChatThread::new();
        let outcome = thread.send_turn("what's the top opportunity?", |msg, history| {
            assert_eq!(msg, "what's the top opportunity?");
            assert!(history.is_empty());
            Ok("permitting automation".to_string())
        });
        assert!(matches!(outcome, TurnOutcome::Replied));
        assert_eq!(thread.len(), 2);
        assert_eq!(thread.messages()[0].role, Role::User);
        assert_eq!(thread.messages()[1].role, Role::Assistant);
        assert!(!thread.in_flight());
    }

    #[test]
    fn history_excludes_the_pending_message() {
        let mut thread = ChatThread::new();
        thread.send_turn("first", |_, _| Ok("reply one".to_string()));

        thread.send_turn("second", |msg, history| {
            assert_eq!(msg, "second");
            // Pre-turn history: the first exchange only.
            assert_eq!(history.len(), 2);
            assert_eq!(history[0].content, "first");
            assert_eq!(history[1].content, "reply one");
            Ok("reply two".to_string())
        });
        assert_eq!(thread.len(), 4);
    }

    #[test]
    fn blank_input_appends_nothing_and_sends_nothing() {
        let mut thread = ChatThread::new();
        let sent = Cell::new(false);
        for input in ["", "   ", "\n\t"] {
            let outcome = thread.send_turn(input, |_, _| {
                sent.set(true);
                Ok(String::new())
            });
            assert!(matches!(outcome, TurnOutcome::Rejected));
        }
        assert!(!sent.get());
        assert!(thread.is_empty());
    }

    #[test]
    fn second_submit_while_in_flight_is_dropped() {
        let mut thread = ChatThread::new();
        thread.begin_turn("slow question").unwrap();

        let sent = Cell::new(false);
        let outcome = thread.send_turn("impatient resubmit", |_, _| {
            sent.set(true);
            Ok(String::new())
        });
        assert!(matches!(outcome, TurnOutcome::Rejected));
        assert!(!sent.get());
        // Only the original pending user message is present.
        assert_eq!(thread.len(), 1);
    }

    #[test]
    fn failure_keeps_user_message_and_appends_fallback() {
        let mut thread = ChatThread::new();
        let outcome = thread.send_turn("anything new?", |_, _| Err(transport_err()));
        assert!(matches!(outcome, TurnOutcome::FellBack(_)));
        assert_eq!(thread.len(), 2);
        assert_eq!(thread.messages()[0].content, "anything new?");
        assert_eq!(thread.messages()[1].content, FALLBACK_REPLY);
        assert!(!thread.in_flight());
    }

    #[test]
    fn transcript_grows_by_two_per_turn_in_any_mix() {
        let mut thread = ChatThread::new();
        let outcomes: [Result<String, ApiError>; 3] = [
            Ok("a".to_string()),
            Err(transport_err()),
            Ok("b".to_string()),
        ];
        for (i, result) in outcomes.into_iter().enumerate() {
            thread.send_turn(&format!("turn {i}"), |_, _| result);
        }
        assert_eq!(thread.len(), 6);
        // User messages stay in submission order.
        let user_contents: Vec<&str> = thread
            .messages()
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(user_contents, vec!["turn 0", "turn 1", "turn 2"]);
    }

    #[test]
    fn trimmed_message_is_what_gets_recorded_and_sent() {
        let mut thread = ChatThread::new();
        thread.send_turn("  padded question  ", |msg, _| {
            assert_eq!(msg, "padded question");
            Ok("ok".to_string())
        });
        assert_eq!(thread.messages()[0].content, "padded question");
    }
}
