//! Scheduled report broadcasts
//!
//! Three calendar triggers, each tied to one report period. Fire
//! instants are computed with plain calendar math against the
//! configured zone; the run loop sleeps until the earliest upcoming
//! fire, broadcasts, and repeats.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use ledgerbot_core::time::last_day_of_month;
use ledgerbot_core::{build_report, period_window, ReportPeriod};
use ledgerbot_store::LedgerStore;

use crate::error::BotResult;
use crate::render;
use crate::transport::{ChatId, ChatRef};

/// One recurring broadcast trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Monday 09:00
    WeeklyReport,
    /// Days 1 and 15 at 09:00
    FortnightReport,
    /// Last day of the month at 18:00
    MonthlyReport,
}

pub const TRIGGERS: [Trigger; 3] = [
    Trigger::WeeklyReport,
    Trigger::FortnightReport,
    Trigger::MonthlyReport,
];

impl Trigger {
    pub fn period(&self) -> ReportPeriod {
        match self {
            Trigger::WeeklyReport => ReportPeriod::Weekly,
            Trigger::FortnightReport => ReportPeriod::Fortnightly,
            Trigger::MonthlyReport => ReportPeriod::Monthly,
        }
    }

    /// Earliest fire instant strictly after `after`.
    ///
    /// Local times that do not exist on a given day (DST gap) skip that
    /// day's candidate; ambiguous ones resolve to the earlier instant.
    pub fn next_fire(&self, after: DateTime<Tz>) -> DateTime<Tz> {
        let tz = after.timezone();
        let mut date = after.date_naive();
        // 62 days is enough to reach the next firing of any trigger.
        for _ in 0..62 {
            if let Some(time) = self.fire_time(date) {
                if let Some(fire) = tz.from_local_datetime(&date.and_time(time)).earliest() {
                    if fire > after {
                        return fire;
                    }
                }
            }
            date = date.succ_opt().unwrap_or(date);
        }
        after + Duration::days(1)
    }

    fn fire_time(&self, date: NaiveDate) -> Option<NaiveTime> {
        match self {
            Trigger::WeeklyReport if date.weekday() == Weekday::Mon => {
                NaiveTime::from_hms_opt(9, 0, 0)
            }
            Trigger::FortnightReport if matches!(date.day(), 1 | 15) => {
                NaiveTime::from_hms_opt(9, 0, 0)
            }
            Trigger::MonthlyReport if date == last_day_of_month(date) => {
                NaiveTime::from_hms_opt(18, 0, 0)
            }
            _ => None,
        }
    }
}

/// Build the period report once and push it to every user known to the
/// ledger. A failed send to one recipient is logged and skipped; the
/// rest of the batch still goes out.
pub async fn broadcast(
    trigger: Trigger,
    ledger: &LedgerStore,
    chat: &ChatRef,
    tz: Tz,
) -> BotResult<()> {
    let period = trigger.period();
    let now = Utc::now().with_timezone(&tz);
    let window = period_window(period, now);
    let entries = ledger.all_entries().await?;
    let body = render::render_report(&build_report(period, window, &entries));

    for user in ledger.user_ids().await? {
        let chat_id = match user.parse::<i64>() {
            Ok(id) => ChatId(id),
            Err(_) => {
                log::warn!("skipping broadcast to non-numeric user id {:?}", user);
                continue;
            }
        };
        if let Err(err) = chat.send_text(chat_id, &body).await {
            log::warn!("broadcast to chat {} failed: {}", chat_id.0, err);
        }
    }
    log::info!("{:?} broadcast done", trigger);
    Ok(())
}

/// Run the trigger loop forever. Spawned as a background task.
pub async fn run(ledger: Arc<LedgerStore>, chat: ChatRef, tz: Tz) {
    loop {
        let now = Utc::now().with_timezone(&tz);
        let (trigger, fire) = TRIGGERS
            .iter()
            .map(|t| (*t, t.next_fire(now)))
            .min_by_key(|(_, fire)| *fire)
            .unwrap_or((Trigger::WeeklyReport, now + Duration::days(1)));

        log::info!("next scheduled broadcast: {:?} at {}", trigger, fire);
        let wait = (fire - now).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        if let Err(err) = broadcast(trigger, &ledger, &chat, tz).await {
            log::error!("scheduled {:?} broadcast failed: {}", trigger, err);
        }
    }
}
