//! Category CRUD dialogs: add by name, delete by selection

use crate::dialogs::new_entry::confirmed;
use crate::dialogs::{Dialog, DialogCtx, Reply, Step};
use crate::render;
use crate::transport::{Payload, Update};
use crate::BotResult;

// ==== Add category ====

pub enum AddCategoryDialog {
    EnterName,
    Confirm { name: String },
}

pub async fn start_add(_update: &Update, _ctx: &DialogCtx) -> BotResult<Step> {
    Ok(Step::Continue(
        Dialog::AddCategory(AddCategoryDialog::EnterName),
        Reply::Text("Send the name of the new category:".to_string()),
    ))
}

impl AddCategoryDialog {
    pub async fn handle(self, update: &Update, ctx: &DialogCtx) -> BotResult<Step> {
        match self {
            AddCategoryDialog::EnterName => match &update.payload {
                Payload::Text(text) if !text.trim().is_empty() => {
                    let name = text.trim().to_string();
                    Ok(Step::Continue(
                        Dialog::AddCategory(AddCategoryDialog::Confirm { name: name.clone() }),
                        Reply::Buttons {
                            text: format!("Add category \"{}\"?", name),
                            rows: render::confirm_row(),
                        },
                    ))
                }
                _ => Ok(Step::Continue(
                    Dialog::AddCategory(AddCategoryDialog::EnterName),
                    Reply::Text("Send the name of the new category:".to_string()),
                )),
            },

            AddCategoryDialog::Confirm { name } => {
                if !confirmed(&update.payload) {
                    return Ok(Step::Finish(Reply::Text(
                        "Discarded, no category was added.".to_string(),
                    )));
                }
                let text = if ctx.categories.add(&name).await? {
                    format!("Added category \"{}\".", name)
                } else {
                    format!("Category \"{}\" already exists.", name)
                };
                Ok(Step::Finish(Reply::Text(text)))
            }
        }
    }
}

// ==== Delete category ====

pub enum DeleteCategoryDialog {
    SelectCategory,
    Confirm { name: String },
}

pub async fn start_delete(_update: &Update, ctx: &DialogCtx) -> BotResult<Step> {
    let names = ctx.categories.list().await?;
    if names.is_empty() {
        return Ok(Step::Finish(Reply::Text(
            "There are no categories to delete.".to_string(),
        )));
    }
    Ok(Step::Continue(
        Dialog::DeleteCategory(DeleteCategoryDialog::SelectCategory),
        Reply::Buttons {
            text: "Which category should be removed?".to_string(),
            rows: render::category_rows(&names),
        },
    ))
}

impl DeleteCategoryDialog {
    pub async fn handle(self, update: &Update, ctx: &DialogCtx) -> BotResult<Step> {
        match self {
            DeleteCategoryDialog::SelectCategory => match &update.payload {
                Payload::Button(name) if !name.is_empty() => Ok(Step::Continue(
                    Dialog::DeleteCategory(DeleteCategoryDialog::Confirm { name: name.clone() }),
                    Reply::Buttons {
                        text: format!(
                            "Remove category \"{}\"? Entries already tagged with it keep the tag.",
                            name
                        ),
                        rows: render::confirm_row(),
                    },
                )),
                _ => start_delete(update, ctx).await,
            },

            DeleteCategoryDialog::Confirm { name } => {
                if !confirmed(&update.payload) {
                    return Ok(Step::Finish(Reply::Text(
                        "Discarded, no category was removed.".to_string(),
                    )));
                }
                let text = if ctx.categories.delete(&name).await? {
                    format!("Removed category \"{}\".", name)
                } else {
                    format!("Category \"{}\" was not found.", name)
                };
                Ok(Step::Finish(Reply::Text(text)))
            }
        }
    }
}
