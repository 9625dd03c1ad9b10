use crate::errors::{JournalError, Result};
use crate::models::{Entry, NewEntry};
use crate::storage::JsonFileStore;
use crate::streak::{compute_streak, compute_streak_at};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tracing::{info, warn};
use uuid::Uuid;

pub const KEY_PREFIX: &str = "journal:";

pub fn entry_key(id: &str) -> String {
    format!("{KEY_PREFIX}{id}")
}

/// The entry collection, mirrored one-to-one onto the `journal:` keys of
/// its store and kept newest first.
#[derive(Debug)]
pub struct Journal {
    store: JsonFileStore,
    entries: Vec<Entry>,
}

impl Journal {
    pub fn load(store: JsonFileStore) -> Self {
        let mut entries = Vec::new();
        for key in store.keys_with_prefix(KEY_PREFIX) {
            let Some(value) = store.get(key) else {
                continue;
            };
            match serde_json::from_value::<Entry>(value.clone()) {
                Ok(entry) if entry_key(&entry.id) == key => entries.push(entry),
                Ok(entry) => warn!("skipping record {key}: id {} does not match its key", entry.id),
                Err(err) => warn!("skipping malformed record {key}: {err}"),
            }
        }

        sort_newest_first(&mut entries);
        info!("loaded {} journal entries", entries.len());
        Self { store, entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn streak(&self) -> u32 {
        compute_streak(&self.entries)
    }

    pub fn streak_at<Tz: TimeZone>(&self, today: NaiveDate, tz: &Tz) -> u32 {
        compute_streak_at(&self.entries, today, tz)
    }

    pub fn has_entry_on<Tz: TimeZone>(&self, day: NaiveDate, tz: &Tz) -> bool {
        self.entries.iter().any(|entry| entry.day_in(tz) == day)
    }

    /// Validates the draft, writes it, and only then adds it to the
    /// collection.
    pub async fn create(&mut self, draft: NewEntry, now: DateTime<Utc>) -> Result<Entry> {
        validate(&draft)?;

        let entry = Entry {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            content: draft.content,
            mood: draft.mood,
            photo: draft.photo.filter(|photo| !photo.is_empty()),
            date: now,
        };

        let value = serde_json::to_value(&entry)?;
        self.store.put(entry_key(&entry.id), value).await?;

        let position = self.entries.partition_point(|existing| existing.date >= entry.date);
        self.entries.insert(position, entry.clone());
        info!(id = %entry.id, mood = entry.mood.as_str(), "saved journal entry");
        Ok(entry)
    }

    pub async fn delete(&mut self, id: &str) -> Result<()> {
        let Some(position) = self.entries.iter().position(|entry| entry.id == id) else {
            return Err(JournalError::NotFound { id: id.to_string() });
        };

        if !self.store.remove(&entry_key(id)).await? {
            warn!(id, "entry had no stored record, dropping it from memory only");
        }
        self.entries.remove(position);
        info!(id, "deleted journal entry");
        Ok(())
    }
}

fn validate(draft: &NewEntry) -> Result<()> {
    if draft.title.trim().is_empty() || draft.content.trim().is_empty() {
        return Err(JournalError::Validation {
            message: "Please fill in both title and content".to_string(),
        });
    }
    Ok(())
}

fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
}
