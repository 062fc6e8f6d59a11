//! Core module - Navigation, app registry, launching and shell state

mod battery;
mod launcher;
mod navigation;
mod registry;
mod shell;
pub mod settings;

pub use battery::Battery;
pub use launcher::Launcher;
pub use navigation::{Navigator, ScreenIndex};
pub use registry::{AppDescriptor, AppEnv, AppFactory, AppRegistry, MiniApp};
pub use settings::{ClockFormat, FontFamily, FontSize, Settings, SettingsEvent, Theme, Wallpaper};
pub use shell::Shell;
