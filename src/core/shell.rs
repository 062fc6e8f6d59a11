//! The shell - registry, navigation, launched apps and settings in one place

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use anyhow::Result;
use tracing::warn;

use super::launcher::Launcher;
use super::navigation::{Navigator, ScreenIndex};
use super::registry::{AppEnv, AppRegistry, MiniApp};
use super::settings::{Settings, SettingsEvent};
use crate::persistence::Store;

/// Everything behind the phone's screen area. The UI layer renders what
/// the shell says is current and reports taps back as method calls.
pub struct Shell {
    registry: AppRegistry,
    navigator: Navigator,
    launcher: Launcher,
    settings: Settings,
    store: Arc<Store>,
    settings_tx: Sender<SettingsEvent>,
    settings_rx: Receiver<SettingsEvent>,
}

impl Shell {
    pub fn new(registry: AppRegistry, settings: Settings, store: Arc<Store>) -> Self {
        let (settings_tx, settings_rx) = channel();
        Self {
            registry,
            navigator: Navigator::new(),
            launcher: Launcher::new(),
            settings,
            store,
            settings_tx,
            settings_rx,
        }
    }

    pub fn registry(&self) -> &AppRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn current_screen(&self) -> ScreenIndex {
        self.navigator.current()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// The environment handed to app factories: a settings snapshot, the
    /// shared store and the sender half of the settings channel.
    pub fn app_env(&self) -> AppEnv {
        AppEnv {
            settings: self.settings.clone(),
            store: Arc::clone(&self.store),
            settings_tx: self.settings_tx.clone(),
        }
    }

    /// Launch the app registered under `key`: construct it on first use,
    /// then display its screen. Unknown or broken apps leave the display
    /// unchanged.
    pub fn launch(&mut self, key: &str) {
        let env = self.app_env();
        if let Some(screen) = self.launcher.get_or_create(key, &self.registry, &env) {
            self.navigator.navigate_to(screen);
        }
    }

    pub fn back(&mut self) {
        self.navigator.back();
    }

    pub fn go_home(&mut self) {
        self.navigator.go_home();
    }

    pub fn open_drawer(&mut self) {
        self.navigator.go_to_drawer();
    }

    /// The mini-app occupying the current screen, if the current screen
    /// is an app screen.
    pub fn current_app_mut(&mut self) -> Option<&mut Box<dyn MiniApp>> {
        let screen = self.navigator.current();
        self.launcher.get_mut(screen)
    }

    /// Apply every queued settings event. On any real change the record
    /// is persisted and the new snapshot is pushed to all launched apps.
    /// Returns whether the settings changed, so the caller can re-apply
    /// theme and fonts.
    pub fn drain_settings_events(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.settings_rx.try_recv() {
            if self.settings.apply(&event) {
                changed = true;
            }
        }

        if changed {
            if let Err(e) = self.store.save_settings(&self.settings) {
                warn!("Failed to persist settings: {e:#}");
            }
            self.launcher.broadcast_settings(&self.settings);
        }
        changed
    }

    /// Write the current settings record out, whether or not anything
    /// changed. Called on shutdown.
    pub fn persist_settings(&self) -> Result<()> {
        self.store.save_settings(&self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::super::registry::test_support::descriptor;
    use super::super::settings::Theme;
    use super::*;

    fn test_shell(name: &str) -> Shell {
        let registry = AppRegistry::discover(vec![descriptor("calculator"), descriptor("notes")]);
        let root = std::env::temp_dir().join(format!(
            "pocketshell-shell-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&root);
        Shell::new(registry, Settings::default(), Arc::new(Store::at(root)))
    }

    #[test]
    fn launch_and_back_out_to_home() {
        let mut shell = test_shell("scenario");
        assert_eq!(shell.current_screen(), ScreenIndex::HOME);

        shell.launch("calculator");
        let calc = shell.current_screen();
        assert!(calc.is_app());

        shell.launch("notes");
        let notes = shell.current_screen();
        assert!(notes.is_app());
        assert_ne!(calc, notes);

        shell.back();
        assert_eq!(shell.current_screen(), calc);
        shell.back();
        assert_eq!(shell.current_screen(), ScreenIndex::HOME);
        shell.back();
        assert_eq!(shell.current_screen(), ScreenIndex::HOME);
        assert_eq!(shell.navigator().depth(), 1);
    }

    #[test]
    fn relaunching_the_visible_app_changes_nothing() {
        let mut shell = test_shell("relaunch");
        shell.launch("calculator");
        let depth = shell.navigator().depth();

        shell.launch("calculator");
        assert_eq!(shell.navigator().depth(), depth);
    }

    #[test]
    fn second_launch_reuses_the_cached_screen() {
        let mut shell = test_shell("reuse");
        shell.launch("calculator");
        let first = shell.current_screen();

        shell.go_home();
        shell.launch("calculator");
        assert_eq!(shell.current_screen(), first);
    }

    #[test]
    fn unknown_key_leaves_the_display_unchanged() {
        let mut shell = test_shell("unknown");
        shell.launch("chess");
        assert_eq!(shell.current_screen(), ScreenIndex::HOME);
        assert_eq!(shell.navigator().depth(), 1);
    }

    #[test]
    fn back_from_an_app_returns_to_the_drawer() {
        let mut shell = test_shell("drawer");
        shell.open_drawer();
        shell.launch("notes");
        shell.back();
        assert_eq!(shell.current_screen(), ScreenIndex::DRAWER);
    }

    #[test]
    fn settings_events_are_applied_and_persisted() {
        let mut shell = test_shell("drain");
        let env = shell.app_env();

        env.settings_tx
            .send(SettingsEvent::ThemeChanged(Theme::Light))
            .unwrap();
        assert!(shell.drain_settings_events());
        assert_eq!(shell.settings().theme, Theme::Light);
        assert!(env.store.root().join("settings.json").exists());
    }

    #[test]
    fn persist_settings_writes_even_without_changes() {
        let shell = test_shell("persist");
        let env = shell.app_env();

        shell.persist_settings().unwrap();
        assert!(env.store.root().join("settings.json").exists());
    }

    #[test]
    fn draining_nothing_reports_no_change() {
        let mut shell = test_shell("drain-empty");
        assert!(!shell.drain_settings_events());
    }

    #[test]
    fn no_op_event_is_not_persisted() {
        let mut shell = test_shell("drain-noop");
        let env = shell.app_env();

        // Dark is already the default theme.
        env.settings_tx
            .send(SettingsEvent::ThemeChanged(Theme::Dark))
            .unwrap();
        assert!(!shell.drain_settings_events());
        assert!(!env.store.root().join("settings.json").exists());
    }
}
