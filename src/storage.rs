use crate::errors::{JournalError, Result};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, error};

/// Key-value store persisted as one flat JSON object.
///
/// Every mutation is written through to disk before it returns. A failed
/// write rolls the in-memory map back, so callers never observe a key that
/// is not on disk (or the reverse).
#[derive(Debug, Default)]
pub struct JsonFileStore {
    path: Option<PathBuf>,
    records: Map<String, Value>,
}

impl JsonFileStore {
    /// Store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = match fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Map::new(),
            Ok(bytes) => match serde_json::from_slice::<Value>(&bytes)? {
                Value::Object(records) => records,
                other => {
                    return Err(JournalError::InvalidStore {
                        message: format!(
                            "{} holds a JSON {} instead of an object",
                            path.display(),
                            json_kind(&other)
                        ),
                    });
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no store at {}, starting empty", path.display());
                Map::new()
            }
            Err(err) => {
                error!("failed to read store {}: {err}", path.display());
                return Err(err.into());
            }
        };

        Ok(Self {
            path: Some(path),
            records,
        })
    }

    pub fn keys_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.records
            .keys()
            .map(String::as_str)
            .filter(move |key| key.starts_with(prefix))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.records.get(key)
    }

    pub async fn put(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        let key = key.into();
        let previous = self.records.insert(key.clone(), value);

        if let Err(err) = self.persist().await {
            match previous {
                Some(previous) => self.records.insert(key, previous),
                None => self.records.remove(&key),
            };
            return Err(err);
        }
        Ok(())
    }

    /// Returns `false` when the key was absent; nothing is written then.
    pub async fn remove(&mut self, key: &str) -> Result<bool> {
        let Some(previous) = self.records.remove(key) else {
            return Ok(false);
        };

        if let Err(err) = self.persist().await {
            self.records.insert(key.to_string(), previous);
            return Err(err);
        }
        Ok(true)
    }

    async fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let payload = serde_json::to_vec_pretty(&self.records)?;
        fs::write(path, payload).await?;
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn unique_temp_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("photo_journal_{tag}_{}_{}.json", std::process::id(), nanos));
        path
    }

    #[tokio::test]
    async fn missing_file_opens_empty() {
        let path = unique_temp_path("missing");
        let store = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(store.keys_with_prefix("").count(), 0);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn writes_survive_reopen() {
        let path = unique_temp_path("reopen");
        let mut store = JsonFileStore::open(&path).await.unwrap();
        store.put("journal:1", json!({ "title": "one" })).await.unwrap();
        store.put("other:1", json!(true)).await.unwrap();

        let reopened = JsonFileStore::open(&path).await.unwrap();
        let keys: Vec<&str> = reopened.keys_with_prefix("journal:").collect();
        assert_eq!(keys, vec!["journal:1"]);
        assert_eq!(reopened.get("journal:1"), Some(&json!({ "title": "one" })));

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn failed_write_rolls_back() {
        let mut path = unique_temp_path("no_such_dir");
        path.push("store.json");
        let mut store = JsonFileStore::open(&path).await.unwrap();

        assert!(store.put("journal:1", json!({})).await.is_err());
        assert!(store.get("journal:1").is_none());
    }

    #[tokio::test]
    async fn remove_reports_absent_keys() {
        let mut store = JsonFileStore::in_memory();
        store.put("journal:1", json!({})).await.unwrap();

        assert!(store.remove("journal:1").await.unwrap());
        assert!(!store.remove("journal:1").await.unwrap());
    }

    #[tokio::test]
    async fn non_object_file_is_rejected() {
        let path = unique_temp_path("array");
        std::fs::write(&path, b"[1, 2, 3]").unwrap();

        let err = JsonFileStore::open(&path).await.unwrap_err();
        assert!(matches!(err, JournalError::InvalidStore { .. }));

        let _ = std::fs::remove_file(path);
    }
}
