//! App instance cache - constructs each mini-app at most once

use std::collections::{HashMap, HashSet};

use tracing::{debug, error, info, warn};

use super::navigation::ScreenIndex;
use super::registry::{AppEnv, AppRegistry, MiniApp};
use super::settings::Settings;

/// Owns every constructed mini-app and the key-to-screen table.
///
/// Screens are handed out sequentially from [`ScreenIndex::APP_BASE`]
/// in first-launch order and never reused or invalidated.
#[derive(Default)]
pub struct Launcher {
    instances: Vec<Box<dyn MiniApp>>,
    table: HashMap<&'static str, ScreenIndex>,
    failed: HashSet<&'static str>,
}

impl Launcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the screen for `key`, constructing the app on first launch.
    ///
    /// Returns `None` for unknown keys and for apps whose factory failed;
    /// a failed key stays failed so a broken app cannot spam errors on
    /// every tap.
    pub fn get_or_create(
        &mut self,
        key: &str,
        registry: &AppRegistry,
        env: &AppEnv,
    ) -> Option<ScreenIndex> {
        if let Some(index) = self.table.get(key) {
            return Some(*index);
        }
        if self.failed.contains(key) {
            debug!("Ignoring launch of previously failed app {key:?}");
            return None;
        }

        let Some(descriptor) = registry.get(key) else {
            warn!("Launch of unregistered app {key:?}");
            return None;
        };
        match (descriptor.factory)(env) {
            Ok(instance) => {
                let index = ScreenIndex(ScreenIndex::APP_BASE + self.instances.len());
                self.instances.push(instance);
                self.table.insert(descriptor.key, index);
                info!("Launched {} on screen {}", descriptor.key, index.0);
                Some(index)
            }
            Err(e) => {
                error!("Failed to construct app {:?}: {e:#}", descriptor.key);
                self.failed.insert(descriptor.key);
                None
            }
        }
    }

    /// The cached screen for `key`, if the app has been launched.
    pub fn screen_of(&self, key: &str) -> Option<ScreenIndex> {
        self.table.get(key).copied()
    }

    /// The app occupying `index`, if any.
    pub fn get_mut(&mut self, index: ScreenIndex) -> Option<&mut Box<dyn MiniApp>> {
        index
            .0
            .checked_sub(ScreenIndex::APP_BASE)
            .and_then(|slot| self.instances.get_mut(slot))
    }

    /// Push a fresh settings snapshot to every constructed app.
    pub fn broadcast_settings(&mut self, settings: &Settings) {
        for instance in &mut self.instances {
            instance.settings_changed(settings);
        }
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::Result;

    use super::super::registry::test_support::{descriptor, env, failing_factory, NullApp};
    use super::super::registry::{AppDescriptor, AppEnv};
    use super::*;

    #[test]
    fn launch_is_idempotent() {
        let registry = AppRegistry::discover(vec![descriptor("calculator")]);
        let env = env();
        let mut launcher = Launcher::new();

        let first = launcher.get_or_create("calculator", &registry, &env);
        let second = launcher.get_or_create("calculator", &registry, &env);

        assert_eq!(first, second);
        assert_eq!(launcher.instance_count(), 1);
    }

    #[test]
    fn screens_are_assigned_in_first_launch_order() {
        let registry = AppRegistry::discover(vec![descriptor("calculator"), descriptor("notes")]);
        let env = env();
        let mut launcher = Launcher::new();

        let calc = launcher.get_or_create("calculator", &registry, &env).unwrap();
        let notes = launcher.get_or_create("notes", &registry, &env).unwrap();

        assert_eq!(calc, ScreenIndex(ScreenIndex::APP_BASE));
        assert_eq!(notes, ScreenIndex(ScreenIndex::APP_BASE + 1));
    }

    #[test]
    fn unknown_key_yields_no_screen() {
        let registry = AppRegistry::discover(vec![descriptor("notes")]);
        let env = env();
        let mut launcher = Launcher::new();

        assert_eq!(launcher.get_or_create("chess", &registry, &env), None);
        assert_eq!(launcher.instance_count(), 0);
    }

    #[test]
    fn factory_failure_is_contained() {
        let broken = AppDescriptor {
            key: "weather",
            name: "Weather",
            icon: "\u{2600}",
            factory: failing_factory,
        };
        let registry = AppRegistry::discover(vec![broken, descriptor("notes")]);
        let env = env();
        let mut launcher = Launcher::new();

        assert_eq!(launcher.get_or_create("weather", &registry, &env), None);
        // The rest of the registry keeps working.
        assert!(launcher.get_or_create("notes", &registry, &env).is_some());
        assert_eq!(launcher.instance_count(), 1);
    }

    #[test]
    fn failed_factory_is_not_retried() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        fn counting_failure(_env: &AppEnv) -> Result<Box<dyn MiniApp>> {
            CALLS.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("still broken")
        }

        let broken = AppDescriptor {
            key: "snake",
            name: "Snake",
            icon: "S",
            factory: counting_failure,
        };
        let registry = AppRegistry::discover(vec![broken]);
        let env = env();
        let mut launcher = Launcher::new();

        assert_eq!(launcher.get_or_create("snake", &registry, &env), None);
        assert_eq!(launcher.get_or_create("snake", &registry, &env), None);
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn get_mut_maps_screen_back_to_instance() {
        let registry = AppRegistry::discover(vec![descriptor("clock")]);
        let env = env();
        let mut launcher = Launcher::new();

        let screen = launcher.get_or_create("clock", &registry, &env).unwrap();
        assert!(launcher.get_mut(screen).is_some());
        assert!(launcher.get_mut(ScreenIndex(screen.0 + 1)).is_none());
        assert!(launcher.get_mut(ScreenIndex::HOME).is_none());
    }

    #[test]
    fn broadcast_reaches_every_instance() {
        static SEEN: AtomicUsize = AtomicUsize::new(0);

        struct Observer;
        impl MiniApp for Observer {
            fn update(&mut self, _ui: &mut egui::Ui) {}
            fn settings_changed(&mut self, _settings: &Settings) {
                SEEN.fetch_add(1, Ordering::SeqCst);
            }
        }
        fn observer_factory(_env: &AppEnv) -> Result<Box<dyn MiniApp>> {
            Ok(Box::new(Observer))
        }
        fn null_factory2(_env: &AppEnv) -> Result<Box<dyn MiniApp>> {
            Ok(Box::new(NullApp))
        }

        let registry = AppRegistry::discover(vec![
            AppDescriptor { key: "a", name: "A", icon: "a", factory: observer_factory },
            AppDescriptor { key: "b", name: "B", icon: "b", factory: observer_factory },
            AppDescriptor { key: "c", name: "C", icon: "c", factory: null_factory2 },
        ]);
        let env = env();
        let mut launcher = Launcher::new();
        launcher.get_or_create("a", &registry, &env);
        launcher.get_or_create("b", &registry, &env);
        launcher.get_or_create("c", &registry, &env);

        launcher.broadcast_settings(&Settings::default());
        assert_eq!(SEEN.load(Ordering::SeqCst), 2);
    }
}
