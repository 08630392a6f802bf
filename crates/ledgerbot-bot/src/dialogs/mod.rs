//! Dialog state machines
//!
//! Six independent linear dialogs, each a tagged-state enum whose
//! variants carry the fields collected so far. A dialog consumes one
//! update at a time and either continues with a new state or finishes;
//! the router owns session storage and cancellation.

use std::sync::Arc;

use chrono_tz::Tz;

use ledgerbot_store::{CategoryRegistry, LedgerStore};

use crate::error::BotResult;
use crate::transport::{Button, Update};

pub mod categories;
pub mod delete_entry;
pub mod edit_entry;
pub mod new_entry;
pub mod report;

pub use categories::{AddCategoryDialog, DeleteCategoryDialog};
pub use delete_entry::DeleteEntryDialog;
pub use edit_entry::EditEntryDialog;
pub use new_entry::NewEntryDialog;
pub use report::ReportDialog;

/// Shared collaborators handed to every dialog turn
pub struct DialogCtx {
    pub ledger: Arc<LedgerStore>,
    pub categories: Arc<CategoryRegistry>,
    pub tz: Tz,
    /// How many recent entries the edit/delete pickers list
    pub listing_limit: usize,
}

/// What to send back to the chat after a turn
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Buttons {
        text: String,
        rows: Vec<Vec<Button>>,
    },
}

/// Outcome of one dialog turn
pub enum Step {
    /// Dialog stays active in the given state
    Continue(Dialog, Reply),
    /// Dialog is over, session slot is freed
    Finish(Reply),
}

/// Any dialog in progress for one chat
pub enum Dialog {
    NewEntry(NewEntryDialog),
    EditEntry(EditEntryDialog),
    DeleteEntry(DeleteEntryDialog),
    Report(ReportDialog),
    AddCategory(AddCategoryDialog),
    DeleteCategory(DeleteCategoryDialog),
}

impl Dialog {
    /// Feed one update into the active dialog
    pub async fn handle(self, update: &Update, ctx: &DialogCtx) -> BotResult<Step> {
        match self {
            Dialog::NewEntry(dialog) => dialog.handle(update, ctx).await,
            Dialog::EditEntry(dialog) => dialog.handle(update, ctx).await,
            Dialog::DeleteEntry(dialog) => dialog.handle(update, ctx).await,
            Dialog::Report(dialog) => dialog.handle(update, ctx).await,
            Dialog::AddCategory(dialog) => dialog.handle(update, ctx).await,
            Dialog::DeleteCategory(dialog) => dialog.handle(update, ctx).await,
        }
    }
}

/// Selection buttons for the user's recent entries, most recent first.
/// None when the user has no entries. Tokens are `<prefix><id>`.
pub(crate) async fn entry_buttons(
    ctx: &DialogCtx,
    user_id: &str,
    token_prefix: &str,
) -> BotResult<Option<Vec<Vec<Button>>>> {
    let mut entries = ctx.ledger.last_entries(user_id, ctx.listing_limit).await?;
    if entries.is_empty() {
        return Ok(None);
    }
    entries.reverse();
    Ok(Some(
        entries
            .iter()
            .map(|entry| {
                vec![Button::new(
                    crate::render::entry_label(entry),
                    format!("{}{}", token_prefix, entry.id),
                )]
            })
            .collect(),
    ))
}

/// Resolve a `<prefix><id>` selection token against the user's entries
pub(crate) async fn selected_entry(
    ctx: &DialogCtx,
    user_id: &str,
    token: &str,
    token_prefix: &str,
) -> BotResult<Option<ledgerbot_core::LedgerEntry>> {
    let id = match token.strip_prefix(token_prefix).and_then(|s| s.parse::<u64>().ok()) {
        Some(id) => id,
        None => return Ok(None),
    };
    Ok(ctx
        .ledger
        .entries_for_user(user_id)
        .await?
        .into_iter()
        .find(|entry| entry.id == id))
}
