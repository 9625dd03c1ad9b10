pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod journal;
pub mod models;
pub mod reminder;
pub mod state;
pub mod storage;
pub mod streak;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use errors::{AppError, JournalError};
pub use journal::Journal;
pub use reminder::{ReminderFeed, ReminderScheduler};
pub use state::AppState;
pub use storage::JsonFileStore;
