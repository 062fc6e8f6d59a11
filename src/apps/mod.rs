//! Built-in apps. Each module exposes a `create` factory; the list below
//! is the entire app catalog the registry discovers at startup.

mod browser;
mod calculator;
mod clock;
mod gallery;
mod notes;
mod planner;
mod settings_app;
mod snake;
mod weather;

use crate::core::AppDescriptor;

/// Descriptors for every built-in app, in drawer order.
pub fn builtin() -> Vec<AppDescriptor> {
    vec![
        AppDescriptor {
            key: "calculator",
            name: "Calculator",
            icon: "🔢",
            factory: calculator::create,
        },
        AppDescriptor {
            key: "notes",
            name: "Notes",
            icon: "📝",
            factory: notes::create,
        },
        AppDescriptor {
            key: "planner",
            name: "Planner",
            icon: "📅",
            factory: planner::create,
        },
        AppDescriptor {
            key: "clock",
            name: "Clock",
            icon: "⏰",
            factory: clock::create,
        },
        AppDescriptor {
            key: "snake",
            name: "Snake",
            icon: "🐍",
            factory: snake::create,
        },
        AppDescriptor {
            key: "weather",
            name: "Weather",
            icon: "⛅",
            factory: weather::create,
        },
        AppDescriptor {
            key: "gallery",
            name: "Gallery",
            icon: "📷",
            factory: gallery::create,
        },
        AppDescriptor {
            key: "browser",
            name: "Browser",
            icon: "🌐",
            factory: browser::create,
        },
        AppDescriptor {
            key: "settings",
            name: "Settings",
            icon: "⚙",
            factory: settings_app::create,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AppRegistry;

    #[test]
    fn every_builtin_passes_discovery() {
        let registry = AppRegistry::discover(builtin());
        assert_eq!(registry.len(), builtin().len());
    }

    #[test]
    fn keys_are_unique() {
        let apps = builtin();
        for (i, a) in apps.iter().enumerate() {
            for b in &apps[i + 1..] {
                assert_ne!(a.key, b.key, "duplicate app key {}", a.key);
            }
        }
    }

    #[test]
    fn dock_apps_exist() {
        let registry = AppRegistry::discover(builtin());
        for key in ["gallery", "browser", "calculator"] {
            assert!(registry.get(key).is_some(), "missing dock app {key}");
        }
    }
}
