//! Report dialog: one period choice, report rendered inline

use chrono::Utc;

use ledgerbot_core::{build_report, period_window, ReportPeriod};

use crate::dialogs::{Dialog, DialogCtx, Reply, Step};
use crate::render;
use crate::transport::{Button, Payload, Update};
use crate::BotResult;

pub enum ReportDialog {
    ChoosePeriod,
}

pub async fn start(_update: &Update, _ctx: &DialogCtx) -> BotResult<Step> {
    Ok(Step::Continue(
        Dialog::Report(ReportDialog::ChoosePeriod),
        period_prompt(),
    ))
}

impl ReportDialog {
    pub async fn handle(self, update: &Update, ctx: &DialogCtx) -> BotResult<Step> {
        match &update.payload {
            Payload::Button(token) => match token.parse::<ReportPeriod>() {
                Ok(period) => {
                    let now = Utc::now().with_timezone(&ctx.tz);
                    let window = period_window(period, now);
                    let entries = ctx.ledger.all_entries().await?;
                    let report = build_report(period, window, &entries);
                    Ok(Step::Finish(Reply::Text(render::render_report(&report))))
                }
                Err(_) => Ok(Step::Continue(
                    Dialog::Report(ReportDialog::ChoosePeriod),
                    period_prompt(),
                )),
            },
            Payload::Text(_) => Ok(Step::Continue(
                Dialog::Report(ReportDialog::ChoosePeriod),
                period_prompt(),
            )),
        }
    }
}

fn period_prompt() -> Reply {
    Reply::Buttons {
        text: "Which period?".to_string(),
        rows: vec![vec![
            Button::new("Weekly", ReportPeriod::Weekly.to_string()),
            Button::new("Fortnightly", ReportPeriod::Fortnightly.to_string()),
            Button::new("Monthly", ReportPeriod::Monthly.to_string()),
        ]],
    }
}
