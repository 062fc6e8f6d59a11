//! Flat-file JSON storage under the platform data directory

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::Settings;

const SETTINGS_FILE: &str = "settings.json";
const NOTES_FILE: &str = "notes.json";
const DAILY_TASKS_FILE: &str = "daily_tasks.json";
const EVENTS_FILE: &str = "events.json";

/// One checkable item, used for both daily tasks and dated events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub text: String,
    pub completed: bool,
}

impl TaskItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

/// Flat-file store: one JSON document per concern, rewritten wholesale
/// on every save.
///
/// Loads never fail the caller; a missing or unreadable file yields the
/// type's default so the app always starts.
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open the store in the platform data directory, creating it if needed.
    pub fn open() -> Result<Self> {
        let root = dirs::data_dir()
            .context("Failed to get data directory")?
            .join("PocketShell");
        std::fs::create_dir_all(&root)
            .context(format!("Failed to create data directory {:?}", root))?;

        info!("Store opened at {:?}", root);
        Ok(Self { root })
    }

    /// Open the store at an explicit root. Nothing is touched on disk
    /// until the first save.
    pub fn at(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // === Settings ===

    pub fn load_settings(&self) -> Settings {
        self.read_or_default(SETTINGS_FILE)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.write_json(SETTINGS_FILE, settings)
    }

    // === Notes ===

    /// Notes keyed by title.
    pub fn load_notes(&self) -> BTreeMap<String, String> {
        self.read_or_default(NOTES_FILE)
    }

    pub fn save_notes(&self, notes: &BTreeMap<String, String>) -> Result<()> {
        self.write_json(NOTES_FILE, notes)
    }

    // === Planner ===

    pub fn load_daily_tasks(&self) -> Vec<TaskItem> {
        self.read_or_default(DAILY_TASKS_FILE)
    }

    pub fn save_daily_tasks(&self, tasks: &[TaskItem]) -> Result<()> {
        self.write_json(DAILY_TASKS_FILE, &tasks)
    }

    /// Events keyed by ISO date (`YYYY-MM-DD`).
    pub fn load_events(&self) -> BTreeMap<String, Vec<TaskItem>> {
        self.read_or_default(EVENTS_FILE)
    }

    pub fn save_events(&self, events: &BTreeMap<String, Vec<TaskItem>>) -> Result<()> {
        self.write_json(EVENTS_FILE, events)
    }

    // === Helpers ===

    fn read_or_default<T: DeserializeOwned + Default>(&self, file: &str) -> T {
        let path = self.root.join(file);
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No {} yet, starting empty", file);
                return T::default();
            }
            Err(e) => {
                warn!("Failed to read {:?}: {}", path, e);
                return T::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to parse {:?}, starting empty: {}", path, e);
                T::default()
            }
        }
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .context(format!("Failed to create data directory {:?}", self.root))?;

        let path = self.root.join(file);
        let json = serde_json::to_string_pretty(value).context("Failed to serialize")?;
        std::fs::write(&path, json).context(format!("Failed to write {:?}", path))?;

        debug!("{} saved", file);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Theme;

    fn temp_store(name: &str) -> Store {
        let root = std::env::temp_dir().join(format!(
            "pocketshell-store-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&root);
        Store::at(root)
    }

    #[test]
    fn missing_files_load_as_defaults() {
        let store = temp_store("missing");
        assert_eq!(store.load_settings(), Settings::default());
        assert!(store.load_notes().is_empty());
        assert!(store.load_daily_tasks().is_empty());
        assert!(store.load_events().is_empty());
    }

    #[test]
    fn first_save_creates_the_file() {
        let store = temp_store("first-save");
        assert!(!store.root().join("notes.json").exists());

        let mut notes = BTreeMap::new();
        notes.insert("New Note 1".to_string(), "hello".to_string());
        store.save_notes(&notes).unwrap();

        assert!(store.root().join("notes.json").exists());
        assert_eq!(store.load_notes(), notes);
    }

    #[test]
    fn settings_survive_a_round_trip() {
        let store = temp_store("settings");
        let mut settings = Settings::default();
        settings.theme = Theme::Light;
        store.save_settings(&settings).unwrap();

        assert_eq!(store.load_settings(), settings);
    }

    #[test]
    fn corrupt_file_falls_back_to_default() {
        let store = temp_store("corrupt");
        std::fs::create_dir_all(store.root()).unwrap();
        std::fs::write(store.root().join("settings.json"), "{not json").unwrap();

        assert_eq!(store.load_settings(), Settings::default());
    }

    #[test]
    fn daily_tasks_keep_completion_state() {
        let store = temp_store("tasks");
        let tasks = vec![
            TaskItem {
                text: "water plants".to_string(),
                completed: true,
            },
            TaskItem::new("buy milk"),
        ];
        store.save_daily_tasks(&tasks).unwrap();

        assert_eq!(store.load_daily_tasks(), tasks);
    }

    #[test]
    fn events_are_keyed_by_date() {
        let store = temp_store("events");
        let mut events = BTreeMap::new();
        events.insert("2025-03-14".to_string(), vec![TaskItem::new("dentist")]);
        store.save_events(&events).unwrap();

        let loaded = store.load_events();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["2025-03-14"][0].text, "dentist");
    }
}
