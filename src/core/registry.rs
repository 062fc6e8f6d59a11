//! App registry - declared mini-app descriptors and startup-time discovery

use std::sync::mpsc::Sender;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use super::settings::{Settings, SettingsEvent};
use crate::persistence::Store;

/// Everything a mini-app factory gets to work with: an immutable settings
/// snapshot, the shared flat-file store, and the sender half of the
/// settings-change channel.
pub struct AppEnv {
    pub settings: Settings,
    pub store: Arc<Store>,
    pub settings_tx: Sender<SettingsEvent>,
}

/// A self-contained mini-app living on its own screen.
///
/// Implementors own all their state; the shell only ever calls `update`
/// for the visible screen and `settings_changed` when the settings
/// snapshot is re-broadcast.
pub trait MiniApp {
    /// Render one frame into the screen area.
    fn update(&mut self, ui: &mut egui::Ui);

    /// Observe a new settings snapshot. Most apps ignore it.
    fn settings_changed(&mut self, _settings: &Settings) {}
}

/// Constructor signature every registered app exposes.
pub type AppFactory = fn(&AppEnv) -> Result<Box<dyn MiniApp>>;

/// Immutable metadata for one registered mini-app. Created at discovery
/// time, never modified afterwards.
#[derive(Clone, Copy)]
pub struct AppDescriptor {
    /// Stable identifier, `[a-z0-9_-]+`.
    pub key: &'static str,
    /// Display name shown in the drawer.
    pub name: &'static str,
    /// Icon glyph shown in the drawer and dock.
    pub icon: &'static str,
    /// Constructs the app's screen.
    pub factory: AppFactory,
}

impl std::fmt::Debug for AppDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppDescriptor")
            .field("key", &self.key)
            .field("name", &self.name)
            .finish()
    }
}

fn key_is_valid(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

/// The set of usable apps, assembled once at startup.
pub struct AppRegistry {
    apps: Vec<AppDescriptor>,
}

impl AppRegistry {
    /// Validate the candidate list and keep every well-formed entry.
    ///
    /// A malformed candidate (bad key, empty name or icon, duplicate key)
    /// is skipped with a warning; one broken app never fails discovery
    /// for the rest.
    pub fn discover(candidates: Vec<AppDescriptor>) -> Self {
        let mut apps: Vec<AppDescriptor> = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            if !key_is_valid(candidate.key) {
                warn!("Skipping app with invalid key {:?}", candidate.key);
                continue;
            }
            if candidate.name.is_empty() || candidate.icon.is_empty() {
                warn!("Skipping app {:?}: missing name or icon", candidate.key);
                continue;
            }
            if apps.iter().any(|a| a.key == candidate.key) {
                warn!("Skipping app {:?}: duplicate key", candidate.key);
                continue;
            }
            apps.push(candidate);
        }

        info!("Discovered {} apps", apps.len());
        Self { apps }
    }

    /// Look up a descriptor by key.
    pub fn get(&self, key: &str) -> Option<&AppDescriptor> {
        self.apps.iter().find(|a| a.key == key)
    }

    /// All descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &AppDescriptor> {
        self.apps.iter()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn discover_keeps_well_formed_candidates() {
        let registry = AppRegistry::discover(vec![descriptor("calculator"), descriptor("notes")]);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("calculator").is_some());
        assert!(registry.get("notes").is_some());
    }

    #[test]
    fn discover_skips_malformed_candidate_keeps_rest() {
        // One well-formed app and one with a broken key: exactly one survives.
        let registry = AppRegistry::discover(vec![descriptor("calculator"), descriptor("")]);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("calculator").is_some());
    }

    #[test]
    fn discover_rejects_uppercase_and_spaces() {
        let registry =
            AppRegistry::discover(vec![descriptor("Snake"), descriptor("my app"), descriptor("ok_app-2")]);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("ok_app-2").is_some());
    }

    #[test]
    fn discover_skips_duplicate_keys() {
        let registry = AppRegistry::discover(vec![
            descriptor("clock"),
            descriptor("clock"),
            descriptor("weather"),
        ]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn discover_skips_empty_name() {
        let broken = AppDescriptor {
            key: "gallery",
            name: "",
            icon: "\u{1F5BC}",
            factory: null_factory,
        };
        let registry = AppRegistry::discover(vec![broken, descriptor("browser")]);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("gallery").is_none());
    }

    #[test]
    fn lookup_of_unknown_key_is_none() {
        let registry = AppRegistry::discover(vec![descriptor("notes")]);
        assert!(registry.get("chess").is_none());
    }

    #[test]
    fn iteration_preserves_declaration_order() {
        let registry = AppRegistry::discover(vec![
            descriptor("calculator"),
            descriptor("notes"),
            descriptor("snake"),
        ]);
        let keys: Vec<&str> = registry.iter().map(|a| a.key).collect();
        assert_eq!(keys, ["calculator", "notes", "snake"]);
    }
}
