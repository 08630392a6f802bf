//! Conversation engine and report scheduler
//!
//! This crate turns inbound chat updates into ledger operations:
//! - transport: the chat-service boundary and the console transport
//! - session: per-chat dialog storage
//! - dialogs: the six dialog state machines
//! - router: command dispatch and cancellation
//! - render: message bodies and keyboards
//! - scheduler: recurring report broadcasts

pub mod dialogs;
pub mod error;
pub mod render;
pub mod router;
pub mod scheduler;
pub mod session;
pub mod transport;

pub use dialogs::{Dialog, DialogCtx, Reply, Step};
pub use error::{BotError, BotResult};
pub use router::Engine;
pub use scheduler::Trigger;
pub use session::SessionMap;
pub use transport::{Button, ChatApi, ChatId, ChatRef, ConsoleTransport, Payload, Update};
