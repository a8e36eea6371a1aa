use rusqlite::Connection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{
    AppetiteEntry, DatedRecord, JournalEntry, MoodEntry, PetType, SleepEntry, StressEntry,
    TodoTask, UserPreferences,
};
use crate::utils;

/// Prefix shared by every MoodGarden storage key
pub const KEY_PREFIX: &str = "moodGarden_";
/// Global key holding the serialized [`UserPreferences`]
pub const PREFERENCES_KEY: &str = "moodGarden_preferences";
/// Global key holding the cleartext chat API credential
pub const API_KEY_KEY: &str = "moodGarden_openai_key";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create storage directory: {0}")]
    DirectoryError(String),
    #[error("Failed to serialize collection: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// The key-value storage engine. A single `kv` table plays the role the
/// browser's localStorage plays in the original application: every value is
/// a JSON-serialized collection, written wholesale.
pub struct KvStore {
    conn: Connection,
}

impl KvStore {
    /// Open (or create) the store at the given path and initialize the schema
    pub fn new(path: &str) -> Result<Self, StoreError> {
        let db_path = PathBuf::from(path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::DirectoryError(e.to_string()))?;
            }
        }

        let conn = Connection::open(&db_path)?;
        let store = KvStore { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open a transient in-memory store
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = KvStore { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(rusqlite::params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::from(e)),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", rusqlite::params![key])?;
        Ok(())
    }

    /// List every key starting with the given prefix, sorted.
    /// Matching happens here rather than via LIKE, whose `_` wildcard would
    /// collide with the underscores in our key layout.
    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key ASC")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys.into_iter().filter(|k| k.starts_with(prefix)).collect())
    }
}

/// The six tracking collections, each persisted under its own namespaced key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Mood,
    Stress,
    Sleep,
    Appetite,
    Journal,
    Todos,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Mood => "mood",
            Collection::Stress => "stress",
            Collection::Sleep => "sleep",
            Collection::Appetite => "appetite",
            Collection::Journal => "journal",
            Collection::Todos => "todos",
        }
    }
}

/// Ties an entity type to the collection it is stored under, so a mood
/// entry cannot be saved into the stress collection by mistake
pub trait Tracked: Serialize + DeserializeOwned {
    const COLLECTION: Collection;
}

impl Tracked for MoodEntry {
    const COLLECTION: Collection = Collection::Mood;
}
impl Tracked for StressEntry {
    const COLLECTION: Collection = Collection::Stress;
}
impl Tracked for SleepEntry {
    const COLLECTION: Collection = Collection::Sleep;
}
impl Tracked for AppetiteEntry {
    const COLLECTION: Collection = Collection::Appetite;
}
impl Tracked for JournalEntry {
    const COLLECTION: Collection = Collection::Journal;
}
impl Tracked for TodoTask {
    const COLLECTION: Collection = Collection::Todos;
}

/// Replace the record sharing `entry`'s date, keeping the original record's
/// id, or append the entry if no record for that date exists. After any
/// sequence of calls exactly one record per date is reachable.
pub fn upsert_by_date<T: DatedRecord>(entries: &mut Vec<T>, mut entry: T) {
    if let Some(existing) = entries.iter_mut().find(|e| e.date() == entry.date()) {
        entry.set_id(existing.id().to_string());
        *existing = entry;
    } else {
        entries.push(entry);
    }
}

/// Storage scoped to the active companion profile. Collection keys derive
/// from (species, sanitized name); with no selected profile reads come back
/// empty and writes are skipped rather than erroring.
pub struct ProfileStore {
    kv: KvStore,
    preferences: UserPreferences,
    namespace: Option<String>,
}

fn namespace_for(preferences: &UserPreferences) -> Option<String> {
    if !preferences.has_selected_pet() {
        return None;
    }
    let species = preferences.pet_type?;
    Some(format!(
        "{}{}_{}",
        KEY_PREFIX,
        species.as_str(),
        utils::sanitize_name(&preferences.pet_name)
    ))
}

impl ProfileStore {
    /// Wrap a [`KvStore`], loading the persisted preferences to derive the
    /// active namespace. Malformed preferences fall back to defaults.
    pub fn new(kv: KvStore) -> Result<Self, StoreError> {
        let preferences = match kv.get(PREFERENCES_KEY)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(prefs) => prefs,
                Err(e) => {
                    warn!(error = %e, "stored preferences are malformed, starting fresh");
                    UserPreferences::default()
                }
            },
            None => UserPreferences::default(),
        };
        let namespace = namespace_for(&preferences);
        Ok(Self {
            kv,
            preferences,
            namespace,
        })
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn has_profile(&self) -> bool {
        self.namespace.is_some()
    }

    /// Select the active companion profile. Data written under a previous
    /// profile stays in its own namespace, untouched.
    pub fn set_profile(&mut self, pet_type: PetType, pet_name: String) -> Result<(), StoreError> {
        self.preferences.pet_type = Some(pet_type);
        self.preferences.pet_name = pet_name;
        self.save_preferences()?;
        self.namespace = namespace_for(&self.preferences);
        Ok(())
    }

    pub fn set_theme(&mut self, theme: crate::models::AppTheme) -> Result<(), StoreError> {
        self.preferences.theme = theme;
        self.save_preferences()
    }

    fn save_preferences(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.preferences)?;
        self.kv.set(PREFERENCES_KEY, &raw)
    }

    /// Storage key for a collection under the active profile, or `None`
    /// when no profile is selected
    pub fn storage_key(&self, collection: Collection) -> Option<String> {
        self.namespace
            .as_ref()
            .map(|ns| format!("{}_{}", ns, collection.as_str()))
    }

    /// Load a whole collection. A missing key yields an empty collection;
    /// malformed stored JSON is discarded for that collection alone.
    pub fn load_collection<T: Tracked>(&self) -> Result<Vec<T>, StoreError> {
        let Some(key) = self.storage_key(T::COLLECTION) else {
            return Ok(Vec::new());
        };
        match self.kv.get(&key)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => Ok(entries),
                Err(e) => {
                    warn!(key, error = %e, "discarding malformed stored collection");
                    Ok(Vec::new())
                }
            },
            None => Ok(Vec::new()),
        }
    }

    /// Serialize and write a whole collection under the active profile.
    /// With no profile selected the write is skipped.
    pub fn save_collection<T: Tracked>(&self, entries: &[T]) -> Result<(), StoreError> {
        let Some(key) = self.storage_key(T::COLLECTION) else {
            debug!(
                collection = T::COLLECTION.as_str(),
                "no companion profile selected, skipping write"
            );
            return Ok(());
        };
        let raw = serde_json::to_string(entries)?;
        self.kv.set(&key, &raw)
    }

    /// Upsert a per-day entry and persist the whole collection
    pub fn upsert_entry<T: Tracked + DatedRecord>(&self, entry: T) -> Result<Vec<T>, StoreError> {
        let mut entries = self.load_collection::<T>()?;
        upsert_by_date(&mut entries, entry);
        self.save_collection(&entries)?;
        Ok(entries)
    }

    /// Append a journal entry (multiple entries per date are allowed)
    pub fn add_journal(&self, entry: JournalEntry) -> Result<(), StoreError> {
        let mut entries = self.load_collection::<JournalEntry>()?;
        entries.push(entry);
        self.save_collection(&entries)
    }

    /// Delete a journal entry by id, returning whether anything was removed
    pub fn delete_journal(&self, id: &str) -> Result<bool, StoreError> {
        let mut entries = self.load_collection::<JournalEntry>()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        let removed = entries.len() != before;
        if removed {
            self.save_collection(&entries)?;
        }
        Ok(removed)
    }

    pub fn add_todo(&self, task: TodoTask) -> Result<(), StoreError> {
        let mut tasks = self.load_collection::<TodoTask>()?;
        tasks.push(task);
        self.save_collection(&tasks)
    }

    /// Set a task's completion flag, stamping or clearing its completion
    /// date. Returns the updated task, or `None` if the id is unknown.
    pub fn set_todo_completed(
        &self,
        id: &str,
        completed: bool,
    ) -> Result<Option<TodoTask>, StoreError> {
        let mut tasks = self.load_collection::<TodoTask>()?;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        task.set_completed(completed);
        let updated = task.clone();
        self.save_collection(&tasks)?;
        Ok(Some(updated))
    }

    pub fn delete_todo(&self, id: &str) -> Result<bool, StoreError> {
        let mut tasks = self.load_collection::<TodoTask>()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        let removed = tasks.len() != before;
        if removed {
            self.save_collection(&tasks)?;
        }
        Ok(removed)
    }

    /// Stored chat API credential, if any
    pub fn api_key(&self) -> Result<Option<String>, StoreError> {
        self.kv.get(API_KEY_KEY)
    }

    pub fn set_api_key(&self, key: &str) -> Result<(), StoreError> {
        self.kv.set(API_KEY_KEY, key.trim())
    }

    pub fn clear_api_key(&self) -> Result<(), StoreError> {
        self.kv.remove(API_KEY_KEY)
    }

    /// Remove every MoodGarden key except the preferences, wiping tracker
    /// data for all profiles. Returns the number of keys removed.
    pub fn reset_data(&self) -> Result<usize, StoreError> {
        let keys = self.kv.keys_with_prefix(KEY_PREFIX)?;
        let mut removed = 0;
        for key in keys {
            if key.contains("preferences") {
                continue;
            }
            self.kv.remove(&key)?;
            removed += 1;
        }
        Ok(removed)
    }
}
