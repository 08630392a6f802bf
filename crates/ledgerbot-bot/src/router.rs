//! Update routing: commands, active dialogs, cancellation

use std::sync::Arc;

use chrono_tz::Tz;

use ledgerbot_store::{CategoryRegistry, LedgerStore};

use crate::dialogs::{self, DialogCtx, Reply, Step};
use crate::error::BotResult;
use crate::render;
use crate::session::SessionMap;
use crate::transport::{ChatId, ChatRef, Payload, Update};

/// The conversation engine: one instance serves every chat
pub struct Engine {
    chat: ChatRef,
    sessions: SessionMap,
    ctx: DialogCtx,
}

impl Engine {
    pub fn new(
        ledger: Arc<LedgerStore>,
        categories: Arc<CategoryRegistry>,
        chat: ChatRef,
        tz: Tz,
        listing_limit: usize,
    ) -> Self {
        Self {
            chat,
            sessions: SessionMap::new(),
            ctx: DialogCtx {
                ledger,
                categories,
                tz,
                listing_limit,
            },
        }
    }

    /// Handle one inbound update end to end
    pub async fn dispatch(&self, update: Update) -> BotResult<()> {
        if is_cancel(&update.payload) {
            self.sessions.clear(update.chat).await;
            let text = format!("Cancelled.\n\n{}", render::main_menu());
            return self.send(update.chat, Reply::Text(text)).await;
        }

        if let Some(dialog) = self.sessions.take(update.chat).await {
            let step = dialog.handle(&update, &self.ctx).await?;
            return self.apply(update.chat, step).await;
        }

        match &update.payload {
            Payload::Button(token) => {
                log::debug!("ignoring stray button press: {}", token);
                Ok(())
            }
            Payload::Text(text) => {
                let text = text.trim().to_string();
                self.route_text(&update, &text).await
            }
        }
    }

    async fn route_text(&self, update: &Update, text: &str) -> BotResult<()> {
        let chat = update.chat;
        let step = match text {
            "/start" => {
                return self.send(chat, Reply::Text(render::main_menu())).await;
            }
            "/help" => {
                return self.send(chat, Reply::Text(render::help_text())).await;
            }
            "/categories" => {
                let names = self.ctx.categories.list().await?;
                return self
                    .send(chat, Reply::Text(render::category_list(&names)))
                    .await;
            }
            "/new" | render::LABEL_NEW => dialogs::new_entry::start(update, &self.ctx).await?,
            "/edit" | render::LABEL_EDIT => dialogs::edit_entry::start(update, &self.ctx).await?,
            "/delete" | render::LABEL_DELETE => {
                dialogs::delete_entry::start(update, &self.ctx).await?
            }
            "/report" | render::LABEL_REPORT => dialogs::report::start(update, &self.ctx).await?,
            "/addcategory" | render::LABEL_ADD_CATEGORY => {
                dialogs::categories::start_add(update, &self.ctx).await?
            }
            "/delcategory" | render::LABEL_DEL_CATEGORY => {
                dialogs::categories::start_delete(update, &self.ctx).await?
            }
            _ => {
                return self
                    .send(
                        chat,
                        Reply::Text("I did not understand that. Send /help for the menu.".to_string()),
                    )
                    .await;
            }
        };
        self.apply(chat, step).await
    }

    async fn apply(&self, chat: ChatId, step: Step) -> BotResult<()> {
        match step {
            Step::Continue(dialog, reply) => {
                self.sessions.insert(chat, dialog).await;
                self.send(chat, reply).await
            }
            Step::Finish(reply) => self.send(chat, reply).await,
        }
    }

    async fn send(&self, chat: ChatId, reply: Reply) -> BotResult<()> {
        match reply {
            Reply::Text(text) => self.chat.send_text(chat, &text).await,
            Reply::Buttons { text, rows } => self.chat.send_buttons(chat, &text, rows).await,
        }
    }
}

/// The cancellation command wins over every dialog state
fn is_cancel(payload: &Payload) -> bool {
    matches!(payload, Payload::Text(text) if matches!(text.trim(), "/cancel" | "Cancel"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ledgerbot_store::{initialize, MemorySheets, StoreRef};
    use tokio::sync::Mutex;

    use crate::transport::{Button, ChatApi};

    /// Transport double recording everything the engine sends
    #[derive(Default)]
    struct RecordingChat {
        sent: Mutex<Vec<String>>,
    }

    impl RecordingChat {
        async fn last(&self) -> String {
            self.sent.lock().await.last().cloned().unwrap_or_default()
        }

        async fn count(&self) -> usize {
            self.sent.lock().await.len()
        }
    }

    #[async_trait]
    impl ChatApi for RecordingChat {
        async fn send_text(&self, _chat: ChatId, text: &str) -> BotResult<()> {
            self.sent.lock().await.push(text.to_string());
            Ok(())
        }

        async fn send_buttons(
            &self,
            _chat: ChatId,
            text: &str,
            rows: Vec<Vec<Button>>,
        ) -> BotResult<()> {
            let tokens: Vec<String> = rows
                .into_iter()
                .flatten()
                .map(|button| button.token)
                .collect();
            self.sent
                .lock()
                .await
                .push(format!("{}\n[{}]", text, tokens.join(" ")));
            Ok(())
        }
    }

    struct Fixture {
        engine: Engine,
        chat: Arc<RecordingChat>,
        ledger: Arc<LedgerStore>,
        categories: Arc<CategoryRegistry>,
    }

    async fn fixture() -> Fixture {
        let store: StoreRef = Arc::new(MemorySheets::new());
        initialize(&store).await.unwrap();
        let ledger = Arc::new(LedgerStore::new(store.clone(), chrono_tz::UTC));
        let categories = Arc::new(CategoryRegistry::new(store));
        let chat = Arc::new(RecordingChat::default());
        let engine = Engine::new(
            ledger.clone(),
            categories.clone(),
            chat.clone(),
            chrono_tz::UTC,
            10,
        );
        Fixture {
            engine,
            chat,
            ledger,
            categories,
        }
    }

    fn text(s: &str) -> Update {
        Update {
            chat: ChatId(1),
            user_id: "1".to_string(),
            display_name: "Alice".to_string(),
            payload: Payload::Text(s.to_string()),
        }
    }

    fn button(token: &str) -> Update {
        Update {
            chat: ChatId(1),
            user_id: "1".to_string(),
            display_name: "Alice".to_string(),
            payload: Payload::Button(token.to_string()),
        }
    }

    async fn run(fx: &Fixture, updates: &[Update]) {
        for update in updates {
            fx.engine.dispatch(update.clone()).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_new_entry_walkthrough() {
        let fx = fixture().await;
        run(
            &fx,
            &[
                text("/new"),
                button("Expense"),
                text("12,50"),
                button("Groceries"),
                text("lunch"),
                button("yes"),
            ],
        )
        .await;

        assert_eq!(fx.chat.last().await, "Saved entry #1.");
        let entries = fx.ledger.entries_for_user("1").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].amount, "12.50".parse().unwrap());
        assert_eq!(entries[0].category, "Groceries");
        assert_eq!(entries[0].description, "lunch");
    }

    #[tokio::test]
    async fn test_invalid_amount_reprompts_and_keeps_draft() {
        let fx = fixture().await;
        run(&fx, &[text("/new"), button("Expense"), text("abc")]).await;
        assert!(fx.chat.last().await.contains("not a positive amount"));

        run(&fx, &[text("-3"), text("5.00")]).await;
        assert!(fx.chat.last().await.contains("Pick a category"));
    }

    #[tokio::test]
    async fn test_dash_description_stored_empty() {
        let fx = fixture().await;
        run(
            &fx,
            &[
                text("/new"),
                button("Income"),
                text("100"),
                button("Other"),
                text("-"),
                button("yes"),
            ],
        )
        .await;

        let entries = fx.ledger.entries_for_user("1").await.unwrap();
        assert_eq!(entries[0].description, "");
    }

    #[tokio::test]
    async fn test_confirm_no_discards() {
        let fx = fixture().await;
        run(
            &fx,
            &[
                text("/new"),
                button("Expense"),
                text("5"),
                button("Other"),
                text("x"),
                button("no"),
            ],
        )
        .await;

        assert!(fx.chat.last().await.contains("Discarded"));
        assert!(fx.ledger.entries_for_user("1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_clears_session_without_store_mutation() {
        let fx = fixture().await;
        run(
            &fx,
            &[text("/new"), button("Expense"), text("5"), text("/cancel")],
        )
        .await;
        assert!(fx.chat.last().await.contains("Cancelled"));
        assert!(fx.ledger.entries_for_user("1").await.unwrap().is_empty());

        // next free text hits the idle fallback, not a dialog state
        run(&fx, &[text("hello")]).await;
        assert!(fx.chat.last().await.contains("/help"));
    }

    #[tokio::test]
    async fn test_cancel_at_edit_confirm_keeps_entry_unchanged() {
        let fx = fixture().await;
        run(
            &fx,
            &[
                text("/new"),
                button("Expense"),
                text("10"),
                button("Groceries"),
                text("old"),
                button("yes"),
            ],
        )
        .await;

        // full edit draft collected, cancelled at the confirm gate
        run(
            &fx,
            &[
                text("/edit"),
                button("edit:1"),
                text("99.00"),
                button("Transport"),
                text("new"),
                text("/cancel"),
            ],
        )
        .await;
        assert!(fx.chat.last().await.contains("Cancelled"));

        let entry = &fx.ledger.entries_for_user("1").await.unwrap()[0];
        assert_eq!(entry.amount, "10.00".parse().unwrap());
        assert_eq!(entry.category, "Groceries");
        assert_eq!(entry.description, "old");

        // the confirm button no longer belongs to a dialog
        run(&fx, &[button("yes")]).await;
        let entry = &fx.ledger.entries_for_user("1").await.unwrap()[0];
        assert_eq!(entry.amount, "10.00".parse().unwrap());
    }

    #[tokio::test]
    async fn test_empty_registry_ends_new_entry_dialog() {
        let fx = fixture().await;
        for name in fx.categories.list().await.unwrap() {
            fx.categories.delete(&name).await.unwrap();
        }

        run(&fx, &[text("/new"), button("Expense"), text("5")]).await;
        assert!(fx.chat.last().await.contains("/addcategory"));

        // dialog ended, session is free again
        run(&fx, &[text("hi")]).await;
        assert!(fx.chat.last().await.contains("/help"));
    }

    #[tokio::test]
    async fn test_edit_entry_partial_update() {
        let fx = fixture().await;
        run(
            &fx,
            &[
                text("/new"),
                button("Expense"),
                text("10"),
                button("Groceries"),
                text("old"),
                button("yes"),
            ],
        )
        .await;

        run(
            &fx,
            &[
                text("/edit"),
                button("edit:1"),
                text("12.00"),
                button("Transport"),
                text("new"),
                button("yes"),
            ],
        )
        .await;

        assert_eq!(fx.chat.last().await, "Updated entry #1.");
        let entry = &fx.ledger.entries_for_user("1").await.unwrap()[0];
        assert_eq!(entry.amount, "12.00".parse().unwrap());
        assert_eq!(entry.category, "Transport");
        assert_eq!(entry.description, "new");
        assert_eq!(entry.id, 1);
    }

    #[tokio::test]
    async fn test_edit_vanished_entry_is_surfaced() {
        let fx = fixture().await;
        run(
            &fx,
            &[
                text("/new"),
                button("Expense"),
                text("10"),
                button("Groceries"),
                text("-"),
                button("yes"),
            ],
        )
        .await;

        run(&fx, &[text("/edit"), button("edit:99")]).await;
        assert!(fx.chat.last().await.contains("no longer exists"));
    }

    #[tokio::test]
    async fn test_delete_entry_walkthrough() {
        let fx = fixture().await;
        run(
            &fx,
            &[
                text("/new"),
                button("Expense"),
                text("10"),
                button("Groceries"),
                text("-"),
                button("yes"),
            ],
        )
        .await;

        run(&fx, &[text("/delete"), button("del:1"), button("yes")]).await;
        assert_eq!(fx.chat.last().await, "Deleted entry #1.");
        assert!(fx.ledger.entries_for_user("1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_with_no_entries_finishes_immediately() {
        let fx = fixture().await;
        run(&fx, &[text("/delete")]).await;
        assert!(fx.chat.last().await.contains("no entries"));
    }

    #[tokio::test]
    async fn test_report_dialog_renders_totals() {
        let fx = fixture().await;
        run(
            &fx,
            &[
                text("/new"),
                button("Expense"),
                text("10"),
                button("Groceries"),
                text("-"),
                button("yes"),
            ],
        )
        .await;

        run(&fx, &[text("/report"), button("Monthly")]).await;
        let body = fx.chat.last().await;
        assert!(body.contains("Monthly expense report"));
        assert!(body.contains("Total expenses: 10.00"));
        assert!(body.contains("- Groceries: 10.00"));
        assert!(body.contains("- Alice: 10.00"));
    }

    #[tokio::test]
    async fn test_add_category_reports_already_exists() {
        let fx = fixture().await;
        run(&fx, &[text("/addcategory"), text("Groceries"), button("yes")]).await;
        assert!(fx.chat.last().await.contains("already exists"));

        run(&fx, &[text("/addcategory"), text("Streaming"), button("yes")]).await;
        assert!(fx.chat.last().await.contains("Added category"));
        assert!(fx
            .categories
            .list()
            .await
            .unwrap()
            .contains(&"Streaming".to_string()));
    }

    #[tokio::test]
    async fn test_delete_category_walkthrough() {
        let fx = fixture().await;
        run(&fx, &[text("/delcategory"), button("Pet"), button("yes")]).await;
        assert!(fx.chat.last().await.contains("Removed category"));
        assert!(!fx
            .categories
            .list()
            .await
            .unwrap()
            .contains(&"Pet".to_string()));
    }

    #[tokio::test]
    async fn test_idle_button_press_is_ignored() {
        let fx = fixture().await;
        run(&fx, &[button("yes")]).await;
        assert_eq!(fx.chat.count().await, 0);
    }

    #[tokio::test]
    async fn test_menu_labels_enter_dialogs() {
        let fx = fixture().await;
        run(&fx, &[text("New entry")]).await;
        assert!(fx.chat.last().await.contains("expense or income"));
        run(&fx, &[text("/cancel")]).await;

        run(&fx, &[text("Report")]).await;
        assert!(fx.chat.last().await.contains("Which period"));
    }

    #[tokio::test]
    async fn test_categories_command_lists_inline() {
        let fx = fixture().await;
        run(&fx, &[text("/categories")]).await;
        let body = fx.chat.last().await;
        assert!(body.starts_with("Categories:"));
        assert!(body.contains("- Groceries"));
    }
}
