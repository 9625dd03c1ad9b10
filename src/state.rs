use crate::journal::Journal;
use crate::reminder::ReminderFeed;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub journal: Arc<Mutex<Journal>>,
    pub reminders: Arc<ReminderFeed>,
}

impl AppState {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal: Arc::new(Mutex::new(journal)),
            reminders: Arc::new(ReminderFeed::new()),
        }
    }
}
