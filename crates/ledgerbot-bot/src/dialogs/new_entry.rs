//! New-entry dialog: kind, amount, category, description, confirm

use rust_decimal::Decimal;

use ledgerbot_core::{format_amount, parse_amount, EntryKind, NewEntry};

use crate::dialogs::{Dialog, DialogCtx, Reply, Step};
use crate::render;
use crate::transport::{Button, Payload, Update};
use crate::BotResult;

const AMOUNT_PROMPT: &str = "Enter the amount, e.g. 12.50 or 12,50:";
const AMOUNT_RETRY: &str = "That is not a positive amount. Try again, e.g. 12.50 or 12,50:";
const DESCRIPTION_PROMPT: &str = "Describe the entry, or send - for none:";

/// States of the new-entry dialog; each carries what was collected
pub enum NewEntryDialog {
    ChooseKind,
    EnterAmount {
        kind: EntryKind,
    },
    ChooseCategory {
        kind: EntryKind,
        amount: Decimal,
    },
    EnterDescription {
        kind: EntryKind,
        amount: Decimal,
        category: String,
    },
    Confirm {
        kind: EntryKind,
        amount: Decimal,
        category: String,
        description: String,
    },
}

pub async fn start(_update: &Update, _ctx: &DialogCtx) -> BotResult<Step> {
    Ok(Step::Continue(
        Dialog::NewEntry(NewEntryDialog::ChooseKind),
        kind_prompt(),
    ))
}

impl NewEntryDialog {
    pub async fn handle(self, update: &Update, ctx: &DialogCtx) -> BotResult<Step> {
        match self {
            NewEntryDialog::ChooseKind => match &update.payload {
                Payload::Button(token) => match token.parse::<EntryKind>() {
                    Ok(kind) => Ok(Step::Continue(
                        Dialog::NewEntry(NewEntryDialog::EnterAmount { kind }),
                        Reply::Text(AMOUNT_PROMPT.to_string()),
                    )),
                    Err(_) => Ok(Step::Continue(
                        Dialog::NewEntry(NewEntryDialog::ChooseKind),
                        kind_prompt(),
                    )),
                },
                Payload::Text(_) => Ok(Step::Continue(
                    Dialog::NewEntry(NewEntryDialog::ChooseKind),
                    kind_prompt(),
                )),
            },

            NewEntryDialog::EnterAmount { kind } => match &update.payload {
                Payload::Text(text) => match parse_amount(text) {
                    Ok(amount) => category_step(ctx, kind, amount).await,
                    Err(_) => Ok(Step::Continue(
                        Dialog::NewEntry(NewEntryDialog::EnterAmount { kind }),
                        Reply::Text(AMOUNT_RETRY.to_string()),
                    )),
                },
                Payload::Button(_) => Ok(Step::Continue(
                    Dialog::NewEntry(NewEntryDialog::EnterAmount { kind }),
                    Reply::Text(AMOUNT_PROMPT.to_string()),
                )),
            },

            NewEntryDialog::ChooseCategory { kind, amount } => match &update.payload {
                Payload::Button(category) if !category.is_empty() => Ok(Step::Continue(
                    Dialog::NewEntry(NewEntryDialog::EnterDescription {
                        kind,
                        amount,
                        category: category.clone(),
                    }),
                    Reply::Text(DESCRIPTION_PROMPT.to_string()),
                )),
                _ => category_step(ctx, kind, amount).await,
            },

            NewEntryDialog::EnterDescription {
                kind,
                amount,
                category,
            } => match &update.payload {
                Payload::Text(text) => {
                    let description = normalize_description(text);
                    let summary = format!(
                        "Save this entry?\nKind: {}\nAmount: {}\nCategory: {}\nDescription: {}",
                        kind,
                        format_amount(amount),
                        category,
                        if description.is_empty() {
                            "-"
                        } else {
                            description.as_str()
                        }
                    );
                    Ok(Step::Continue(
                        Dialog::NewEntry(NewEntryDialog::Confirm {
                            kind,
                            amount,
                            category,
                            description,
                        }),
                        Reply::Buttons {
                            text: summary,
                            rows: render::confirm_row(),
                        },
                    ))
                }
                Payload::Button(_) => Ok(Step::Continue(
                    Dialog::NewEntry(NewEntryDialog::EnterDescription {
                        kind,
                        amount,
                        category,
                    }),
                    Reply::Text(DESCRIPTION_PROMPT.to_string()),
                )),
            },

            NewEntryDialog::Confirm {
                kind,
                amount,
                category,
                description,
            } => {
                if confirmed(&update.payload) {
                    let id = ctx
                        .ledger
                        .append(NewEntry {
                            user_id: update.user_id.clone(),
                            display_name: update.display_name.clone(),
                            kind,
                            amount,
                            category,
                            description,
                        })
                        .await?;
                    Ok(Step::Finish(Reply::Text(format!("Saved entry #{}.", id))))
                } else {
                    Ok(Step::Finish(Reply::Text(
                        "Discarded, nothing was saved.".to_string(),
                    )))
                }
            }
        }
    }
}

/// Move to category selection, or end the dialog when the registry is
/// empty.
async fn category_step(ctx: &DialogCtx, kind: EntryKind, amount: Decimal) -> BotResult<Step> {
    let names = ctx.categories.list().await?;
    if names.is_empty() {
        return Ok(Step::Finish(Reply::Text(
            "There are no categories yet. Use /addcategory to create one first.".to_string(),
        )));
    }
    Ok(Step::Continue(
        Dialog::NewEntry(NewEntryDialog::ChooseCategory { kind, amount }),
        Reply::Buttons {
            text: "Pick a category:".to_string(),
            rows: render::category_rows(&names),
        },
    ))
}

fn kind_prompt() -> Reply {
    Reply::Buttons {
        text: "Is this an expense or income?".to_string(),
        rows: vec![vec![
            Button::new("Expense", EntryKind::Expense.to_string()),
            Button::new("Income", EntryKind::Income.to_string()),
        ]],
    }
}

pub(crate) fn normalize_description(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed == "-" {
        String::new()
    } else {
        trimmed.to_string()
    }
}

pub(crate) fn confirmed(payload: &Payload) -> bool {
    matches!(payload, Payload::Button(token) if token == "yes")
}
