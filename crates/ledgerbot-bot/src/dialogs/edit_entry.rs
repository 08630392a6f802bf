//! Edit-entry dialog: pick an entry, re-enter its mutable fields,
//! confirm against a before/after diff

use rust_decimal::Decimal;

use ledgerbot_core::{format_amount, parse_amount, LedgerEntry};
use ledgerbot_store::StoreError;

use crate::dialogs::new_entry::{confirmed, normalize_description};
use crate::dialogs::{entry_buttons, selected_entry, Dialog, DialogCtx, Reply, Step};
use crate::render;
use crate::transport::{Payload, Update};
use crate::BotResult;

const TOKEN_PREFIX: &str = "edit:";
const GONE: &str = "That entry no longer exists.";

pub enum EditEntryDialog {
    SelectEntry,
    EnterAmount {
        original: LedgerEntry,
    },
    ChooseCategory {
        original: LedgerEntry,
        amount: Decimal,
    },
    EnterDescription {
        original: LedgerEntry,
        amount: Decimal,
        category: String,
    },
    Confirm {
        original: LedgerEntry,
        amount: Decimal,
        category: String,
        description: String,
    },
}

pub async fn start(update: &Update, ctx: &DialogCtx) -> BotResult<Step> {
    match entry_buttons(ctx, &update.user_id, TOKEN_PREFIX).await? {
        Some(rows) => Ok(Step::Continue(
            Dialog::EditEntry(EditEntryDialog::SelectEntry),
            Reply::Buttons {
                text: "Which entry do you want to edit?".to_string(),
                rows,
            },
        )),
        None => Ok(Step::Finish(Reply::Text(
            "You have no entries to edit yet.".to_string(),
        ))),
    }
}

impl EditEntryDialog {
    pub async fn handle(self, update: &Update, ctx: &DialogCtx) -> BotResult<Step> {
        match self {
            EditEntryDialog::SelectEntry => match &update.payload {
                Payload::Button(token) if token.starts_with(TOKEN_PREFIX) => {
                    match selected_entry(ctx, &update.user_id, token, TOKEN_PREFIX).await? {
                        Some(original) => {
                            let prompt = format!(
                                "New amount (currently {}):",
                                format_amount(original.amount)
                            );
                            Ok(Step::Continue(
                                Dialog::EditEntry(EditEntryDialog::EnterAmount { original }),
                                Reply::Text(prompt),
                            ))
                        }
                        None => Ok(Step::Finish(Reply::Text(GONE.to_string()))),
                    }
                }
                _ => start(update, ctx).await,
            },

            EditEntryDialog::EnterAmount { original } => match &update.payload {
                Payload::Text(text) => match parse_amount(text) {
                    Ok(amount) => category_step(ctx, original, amount).await,
                    Err(_) => {
                        let prompt = format!(
                            "That is not a positive amount. New amount (currently {}):",
                            format_amount(original.amount)
                        );
                        Ok(Step::Continue(
                            Dialog::EditEntry(EditEntryDialog::EnterAmount { original }),
                            Reply::Text(prompt),
                        ))
                    }
                },
                Payload::Button(_) => Ok(Step::Continue(
                    Dialog::EditEntry(EditEntryDialog::EnterAmount { original }),
                    Reply::Text("Send the new amount as text:".to_string()),
                )),
            },

            EditEntryDialog::ChooseCategory { original, amount } => match &update.payload {
                Payload::Button(category) if !category.is_empty() => {
                    let prompt = format!(
                        "New description (currently {}), or - for none:",
                        if original.description.is_empty() {
                            "-"
                        } else {
                            original.description.as_str()
                        }
                    );
                    Ok(Step::Continue(
                        Dialog::EditEntry(EditEntryDialog::EnterDescription {
                            original,
                            amount,
                            category: category.clone(),
                        }),
                        Reply::Text(prompt),
                    ))
                }
                _ => category_step(ctx, original, amount).await,
            },

            EditEntryDialog::EnterDescription {
                original,
                amount,
                category,
            } => match &update.payload {
                Payload::Text(text) => {
                    let description = normalize_description(text);
                    let diff = render::edit_diff(&original, amount, &category, &description);
                    Ok(Step::Continue(
                        Dialog::EditEntry(EditEntryDialog::Confirm {
                            original,
                            amount,
                            category,
                            description,
                        }),
                        Reply::Buttons {
                            text: diff,
                            rows: render::confirm_row(),
                        },
                    ))
                }
                Payload::Button(_) => Ok(Step::Continue(
                    Dialog::EditEntry(EditEntryDialog::EnterDescription {
                        original,
                        amount,
                        category,
                    }),
                    Reply::Text("Send the new description as text, or - for none:".to_string()),
                )),
            },

            EditEntryDialog::Confirm {
                original,
                amount,
                category,
                description,
            } => {
                if !confirmed(&update.payload) {
                    return Ok(Step::Finish(Reply::Text(
                        "Discarded, the entry was not changed.".to_string(),
                    )));
                }
                match ctx
                    .ledger
                    .update(original.id, amount, &category, &description)
                    .await
                {
                    Ok(()) => Ok(Step::Finish(Reply::Text(format!(
                        "Updated entry #{}.",
                        original.id
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

async fn category_step(
    ctx: &DialogCtx,
    original: LedgerEntry,
    amount: Decimal,
) -> BotResult<Step> {
    let names = ctx.categories.list().await?;
    if names.is_empty() {
        return Ok(Step::Finish(Reply::Text(
            "There are no categories yet. Use /addcategory to create one first.".to_string(),
        )));
    }
    let text = format!("New category (currently {}):", original.category);
    Ok(Step::Continue(
        Dialog::EditEntry(EditEntryDialog::ChooseCategory { original, amount }),
        Reply::Buttons {
            text,
            rows: render::category_rows(&names),
        },
    ))
}
