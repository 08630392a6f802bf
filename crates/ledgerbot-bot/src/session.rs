//! Per-chat dialog sessions
//!
//! One dialog at most per chat. The host transport delivers updates for
//! a single chat in order, so entries are taken out for the duration of
//! one turn and re-inserted when the dialog continues.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::dialogs::Dialog;
use crate::transport::ChatId;

/// Map of chat id to its active dialog, if any
#[derive(Default)]
pub struct SessionMap {
    sessions: Mutex<HashMap<ChatId, Dialog>>,
}

impl SessionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the dialog for a chat, replacing any previous one
    pub async fn insert(&self, chat: ChatId, dialog: Dialog) {
        self.sessions.lock().await.insert(chat, dialog);
    }

    /// Remove and return the chat's dialog
    pub async fn take(&self, chat: ChatId) -> Option<Dialog> {
        self.sessions.lock().await.remove(&chat)
    }

    /// Drop the chat's dialog, if any
    pub async fn clear(&self, chat: ChatId) {
        self.sessions.lock().await.remove(&chat);
    }

    /// Whether the chat has a dialog in progress
    pub async fn is_active(&self, chat: ChatId) -> bool {
        self.sessions.lock().await.contains_key(&chat)
    }
}
