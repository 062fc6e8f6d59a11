//! PocketShell - a desktop phone simulator
//!
//! Boots the persistent store, discovers the built-in apps, and runs the
//! shell in a fixed phone-sized window.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod apps;
mod core;
mod persistence;
mod ui;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::{AppRegistry, Shell};
use crate::persistence::Store;
use crate::ui::PocketShellApp;

const APP_NAME: &str = "PocketShell";
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed window size. The shell is a phone, not a resizable desktop app.
const SCREEN_WIDTH: f32 = 380.0;
const SCREEN_HEIGHT: f32 = 800.0;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pocketshell=info,eframe=warn,egui=warn,wgpu=error"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Procedural window icon: a phone slab with a lit screen and home dot.
fn load_app_icon() -> egui::IconData {
    const SIZE: usize = 64;
    let mut rgba = vec![0u8; SIZE * SIZE * 4];

    let body = |x: usize, y: usize| (16..48).contains(&x) && (6..58).contains(&y);
    let screen = |x: usize, y: usize| (19..45).contains(&x) && (11..50).contains(&y);
    let home_dot = |x: usize, y: usize| {
        let dx = x as i32 - 32;
        let dy = y as i32 - 53;
        dx * dx + dy * dy <= 4
    };

    for y in 0..SIZE {
        for x in 0..SIZE {
            let i = (y * SIZE + x) * 4;
            let (r, g, b, a) = if screen(x, y) {
                (99, 102, 241, 255)
            } else if home_dot(x, y) {
                (200, 200, 215, 255)
            } else if body(x, y) {
                (30, 30, 45, 255)
            } else {
                (0, 0, 0, 0)
            };
            rgba[i] = r;
            rgba[i + 1] = g;
            rgba[i + 2] = b;
            rgba[i + 3] = a;
        }
    }

    egui::IconData {
        rgba,
        width: SIZE as u32,
        height: SIZE as u32,
    }
}

fn main() -> Result<()> {
    init_logging();
    info!("Starting {} v{}", APP_NAME, APP_VERSION);

    let store = Arc::new(Store::open()?);
    let settings = store.load_settings();
    let registry = AppRegistry::discover(apps::builtin());
    let shell = Shell::new(registry, settings, Arc::clone(&store));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([SCREEN_WIDTH, SCREEN_HEIGHT])
            .with_min_inner_size([SCREEN_WIDTH, SCREEN_HEIGHT])
            .with_max_inner_size([SCREEN_WIDTH, SCREEN_HEIGHT])
            .with_resizable(false)
            .with_icon(load_app_icon()),
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(PocketShellApp::new(cc, shell)))),
    )
    .map_err(|e| anyhow!("Failed to start {}: {}", APP_NAME, e))
}
