//! Daily "you haven't journaled yet" reminder.
//!
//! The server decides *whether* a reminder is due; the page displays it
//! through the browser notification API after picking it up from the feed.

use crate::errors::{JournalError, Result};
use crate::journal::Journal;
use crate::models::Entry;
use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, error, info};

pub const REMINDER_TAG: &str = "daily-journal-reminder";

/// True at the reminder hour when nothing has been written on `now`'s day.
pub fn should_notify<Tz: TimeZone>(
    entries: &[Entry],
    now: NaiveDateTime,
    reminder_hour: u32,
    tz: &Tz,
) -> bool {
    if now.hour() != reminder_hour {
        return false;
    }
    let today = now.date();
    !entries.iter().any(|entry| entry.day_in(tz) == today)
}

/// Browser notification permission as reported by the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    #[default]
    Default,
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub title: String,
    pub body: String,
    pub tag: String,
    pub date: NaiveDate,
}

impl Reminder {
    pub fn for_day(date: NaiveDate) -> Self {
        Self {
            title: "📸 Journal Reminder".to_string(),
            body: "You haven't journaled today! Capture a moment before the day ends.".to_string(),
            tag: REMINDER_TAG.to_string(),
            date,
        }
    }
}

/// Permission state plus at most one undelivered reminder.
#[derive(Debug, Default)]
pub struct ReminderFeed {
    permission: RwLock<Permission>,
    pending: Mutex<Option<Reminder>>,
}

impl ReminderFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn permission(&self) -> Permission {
        *self.permission.read().await
    }

    pub async fn set_permission(&self, permission: Permission) {
        *self.permission.write().await = permission;
        if permission != Permission::Granted {
            self.pending.lock().await.take();
        }
    }

    pub async fn publish(&self, reminder: Reminder) {
        *self.pending.lock().await = Some(reminder);
    }

    /// Hands the pending reminder to exactly one caller, provided it is
    /// for `today` and nothing has been written on that day since it was
    /// published. A stale reminder is dropped.
    pub async fn take_due<Tz: TimeZone>(
        &self,
        entries: &[Entry],
        today: NaiveDate,
        tz: &Tz,
    ) -> Option<Reminder> {
        let reminder = self.pending.lock().await.take()?;
        if reminder.date != today {
            debug!(date = %reminder.date, "dropping reminder from an earlier day");
            return None;
        }
        if entries.iter().any(|entry| entry.day_in(tz) == reminder.date) {
            debug!(date = %reminder.date, "dropping reminder, the day already has an entry");
            return None;
        }
        Some(reminder)
    }
}

pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

#[derive(Debug)]
pub enum ReminderCommand {
    /// Run a check immediately and report whether a reminder was published
    CheckNow(oneshot::Sender<bool>),
    Stop,
}

pub struct ReminderScheduler {
    reminder_hour: u32,
    interval: Duration,
    clock: Clock,
    command_tx: Option<mpsc::Sender<ReminderCommand>>,
    task: Option<JoinHandle<()>>,
}

impl ReminderScheduler {
    pub fn new(reminder_hour: u32, interval: Duration) -> Self {
        Self {
            reminder_hour,
            interval,
            clock: Arc::new(|| Local::now().naive_local()),
            command_tx: None,
            task: None,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Spawns the polling loop. The first check runs right away.
    pub fn start(&mut self, journal: Arc<Mutex<Journal>>, feed: Arc<ReminderFeed>) -> Result<()> {
        if self.task.is_some() {
            return Err(JournalError::Scheduler {
                message: "reminder scheduler is already running".to_string(),
            });
        }
        if self.interval.is_zero() {
            return Err(JournalError::Scheduler {
                message: "reminder interval must be positive".to_string(),
            });
        }

        let (command_tx, mut command_rx) = mpsc::channel(8);
        let check = Check {
            journal,
            feed,
            clock: Arc::clone(&self.clock),
            reminder_hour: self.reminder_hour,
        };
        let period = self.interval;

        let task = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        check.run().await;
                    }
                    command = command_rx.recv() => match command {
                        Some(ReminderCommand::CheckNow(reply)) => {
                            let published = check.run().await;
                            let _ = reply.send(published);
                        }
                        Some(ReminderCommand::Stop) | None => {
                            debug!("reminder scheduler stopping");
                            break;
                        }
                    }
                }
            }
        });

        info!(
            hour = self.reminder_hour,
            every_secs = self.interval.as_secs(),
            "reminder scheduler started"
        );
        self.command_tx = Some(command_tx);
        self.task = Some(task);
        Ok(())
    }

    pub async fn check_now(&self) -> Result<bool> {
        let Some(command_tx) = &self.command_tx else {
            return Err(JournalError::Scheduler {
                message: "reminder scheduler is not running".to_string(),
            });
        };

        let (reply_tx, reply_rx) = oneshot::channel();
        command_tx
            .send(ReminderCommand::CheckNow(reply_tx))
            .await
            .map_err(|err| JournalError::Scheduler {
                message: format!("failed to send check command: {err}"),
            })?;
        reply_rx.await.map_err(|err| JournalError::Scheduler {
            message: format!("check was dropped: {err}"),
        })
    }

    pub async fn stop(&mut self) -> Result<()> {
        let Some(task) = self.task.take() else {
            debug!("reminder scheduler is not running");
            return Ok(());
        };

        if let Some(command_tx) = self.command_tx.take() {
            if let Err(err) = command_tx.send(ReminderCommand::Stop).await {
                error!("failed to send stop command to reminder scheduler: {err}");
            }
        }

        task.await.map_err(|err| JournalError::Scheduler {
            message: format!("failed to stop reminder scheduler: {err}"),
        })?;
        info!("reminder scheduler stopped");
        Ok(())
    }
}

struct Check {
    journal: Arc<Mutex<Journal>>,
    feed: Arc<ReminderFeed>,
    clock: Clock,
    reminder_hour: u32,
}

impl Check {
    async fn run(&self) -> bool {
        let now = (self.clock)();
        let due = {
            let journal = self.journal.lock().await;
            should_notify(journal.entries(), now, self.reminder_hour, &Local)
        };
        if !due {
            return false;
        }

        let permission = self.feed.permission().await;
        if permission != Permission::Granted {
            debug!(?permission, "reminder due but notifications are not granted");
            return false;
        }

        self.feed.publish(Reminder::for_day(now.date())).await;
        info!(date = %now.date(), "published journal reminder");
        true
    }
}
