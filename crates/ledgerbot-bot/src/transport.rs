//! Chat transport boundary
//!
//! The actual chat service client lives out of tree; the engine talks
//! to it through [`ChatApi`]. The bundled [`ConsoleTransport`] writes to
//! stdout so the binary runs end-to-end without credentials.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BotResult;

/// Identifier of one chat. For direct chats it equals the user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// What the user sent: free text or a button press carrying the
/// button's opaque token.
#[derive(Debug, Clone)]
pub enum Payload {
    Text(String),
    Button(String),
}

/// One inbound chat update
#[derive(Debug, Clone)]
pub struct Update {
    pub chat: ChatId,
    pub user_id: String,
    pub display_name: String,
    pub payload: Payload,
}

/// An inline button: a visible label and the token delivered back when
/// the button is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub token: String,
}

impl Button {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

/// Shared transport reference type
pub type ChatRef = Arc<dyn ChatApi>;

/// Outbound side of the chat transport
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Send a plain text message
    async fn send_text(&self, chat: ChatId, text: &str) -> BotResult<()>;

    /// Send a text message with rows of inline buttons attached
    async fn send_buttons(
        &self,
        chat: ChatId,
        text: &str,
        rows: Vec<Vec<Button>>,
    ) -> BotResult<()>;
}

/// Stdout-backed transport for console mode. Buttons are printed with
/// the `btn:<token>` line a user can type back to press them.
pub struct ConsoleTransport;

#[async_trait]
impl ChatApi for ConsoleTransport {
    async fn send_text(&self, chat: ChatId, text: &str) -> BotResult<()> {
        println!("[chat {}] {}", chat.0, text);
        Ok(())
    }

    async fn send_buttons(
        &self,
        chat: ChatId,
        text: &str,
        rows: Vec<Vec<Button>>,
    ) -> BotResult<()> {
        println!("[chat {}] {}", chat.0, text);
        for row in rows {
            for button in row {
                println!("    {} -> btn:{}", button.label, button.token);
            }
        }
        Ok(())
    }
}
