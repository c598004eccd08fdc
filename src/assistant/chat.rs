use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::assistant::responder::ResponseProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

pub struct ChatSession<P: ResponseProvider> {
    provider: P,
    messages: Vec<ChatMessage>,
    message_counter: u64,
    /// True while a reply is outstanding.
    pub pending: bool,
}

impl<P: ResponseProvider> ChatSession<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            messages: Vec::new(),
            message_counter: 0,
            pending: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Post a prompt and wait for the reply. Blank prompts are ignored and
    /// return `Ok(None)`. On provider failure the user message stays in the
    /// log and the error is returned.
    pub async fn send(&mut self, prompt: &str) -> Result<Option<&ChatMessage>> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Ok(None);
        }

        self.push(Role::User, prompt.to_string());
        self.pending = true;
        debug!("Awaiting assistant reply ({} chars)", prompt.len());

        let reply = self.provider.respond(prompt).await;
        self.pending = false;

        match reply {
            Ok(text) => {
                self.push(Role::Assistant, text);
                Ok(self.messages.last())
            }
            Err(e) => {
                warn!("Assistant reply failed: {}", e);
                Err(e)
            }
        }
    }

    /// Drop the conversation. Message ids keep counting up.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    fn push(&mut self, role: Role, content: String) {
        self.message_counter += 1;
        self.messages.push(ChatMessage {
            id: self.message_counter,
            role,
            content,
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl ResponseProvider for Echo {
        async fn respond(&self, prompt: &str) -> Result<String> {
            Ok(format!("echo: {}", prompt))
        }
    }

    struct Offline;

    #[async_trait]
    impl ResponseProvider for Offline {
        async fn respond(&self, _prompt: &str) -> Result<String> {
            anyhow::bail!("backend unavailable")
        }
    }

    #[tokio::test]
    async fn send_appends_user_then_assistant() {
        let mut chat = ChatSession::new(Echo);
        let reply = chat.send("  show my records ").await.unwrap().unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "echo: show my records");

        let roles: Vec<Role> = chat.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
        assert_eq!(chat.messages()[1].id, 2);
        assert!(!chat.pending);
    }

    #[tokio::test]
    async fn blank_prompt_is_ignored() {
        let mut chat = ChatSession::new(Echo);
        assert!(chat.send("   ").await.unwrap().is_none());
        assert!(chat.messages().is_empty());
    }

    #[tokio::test]
    async fn provider_error_keeps_user_message() {
        let mut chat = ChatSession::new(Offline);
        let err = chat.send("hello").await.unwrap_err();
        assert!(err.to_string().contains("unavailable"));
        assert_eq!(chat.messages().len(), 1);
        assert!(!chat.pending);
    }

    #[tokio::test]
    async fn clear_empties_log_but_ids_keep_counting() {
        let mut chat = ChatSession::new(Echo);
        chat.send("first").await.unwrap();
        chat.clear();
        assert!(chat.messages().is_empty());

        let reply = chat.send("second").await.unwrap().unwrap();
        assert_eq!(reply.id, 4);
        assert_eq!(chat.messages().len(), 2);
    }
}
