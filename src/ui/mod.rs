//! UI layer

mod app;
mod drawer;
mod home;
mod nav_bar;
mod status_bar;
pub mod theme;

pub use app::PocketShellApp;
pub use theme::{Icons, Theme};
