//! Delete-entry dialog: pick an entry, confirm, remove

use ledgerbot_core::LedgerEntry;
use ledgerbot_store::StoreError;

use crate::dialogs::new_entry::confirmed;
use crate::dialogs::{entry_buttons, selected_entry, Dialog, DialogCtx, Reply, Step};
use crate::render;
use crate::transport::{Payload, Update};
use crate::BotResult;

const TOKEN_PREFIX: &str = "del:";
const GONE: &str = "That entry no longer exists.";

pub enum DeleteEntryDialog {
    SelectEntry,
    Confirm { entry: LedgerEntry },
}

pub async fn start(update: &Update, ctx: &DialogCtx) -> BotResult<Step> {
    match entry_buttons(ctx, &update.user_id, TOKEN_PREFIX).await? {
        Some(rows) => Ok(Step::Continue(
            Dialog::DeleteEntry(DeleteEntryDialog::SelectEntry),
            Reply::Buttons {
                text: "Which entry do you want to delete?".to_string(),
                rows,
            },
        )),
        None => Ok(Step::Finish(Reply::Text(
            "You have no entries to delete yet.".to_string(),
        ))),
    }
}

impl DeleteEntryDialog {
    pub async fn handle(self, update: &Update, ctx: &DialogCtx) -> BotResult<Step> {
        match self {
            DeleteEntryDialog::SelectEntry => match &update.payload {
                Payload::Button(token) if token.starts_with(TOKEN_PREFIX) => {
                    match selected_entry(ctx, &update.user_id, token, TOKEN_PREFIX).await? {
                        Some(entry) => {
                            let text =
                                format!("Delete this entry?\n\n{}", render::entry_summary(&entry));
                            Ok(Step::Continue(
                                Dialog::DeleteEntry(DeleteEntryDialog::Confirm { entry }),
                                Reply::Buttons {
                                    text,
                                    rows: render::confirm_row(),
                                },
                            ))
                        }
                        None => Ok(Step::Finish(Reply::Text(GONE.to_string()))),
                    }
                }
                _ => start(update, ctx).await,
            },

            DeleteEntryDialog::Confirm { entry } => {
                if !confirmed(&update.payload) {
                    return Ok(Step::Finish(Reply::Text(
                        "Discarded, the entry was kept.".to_string(),
                    )));
                }
                match ctx.ledger.delete(entry.id).await {
                    Ok(()) => Ok(Step::Finish(Reply::Text(format!(
                        "Deleted entry #{}.",
                        entry.id
                    )))),
                    Err(StoreError::EntryNotFound { .. }) => {
                        Ok(Step::Finish(Reply::Text(GONE.to_string())))
                    }
                    Err(err) => Err(err.into()),
                }
            }
        }
    }
}
