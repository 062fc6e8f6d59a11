//! Root application: window chrome, screen dispatch and the settings pump

use std::time::{Duration, Instant};

use egui::{CentralPanel, Frame, TopBottomPanel};
use tracing::warn;

use crate::core::{Battery, ScreenIndex, Shell};
use crate::ui::drawer::AppDrawer;
use crate::ui::home::HomeScreen;
use crate::ui::nav_bar::{NavAction, NavBar};
use crate::ui::status_bar::StatusBar;
use crate::ui::theme::Theme;

pub struct PocketShellApp {
    shell: Shell,
    battery: Battery,
}

impl PocketShellApp {
    pub fn new(cc: &eframe::CreationContext<'_>, shell: Shell) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        Theme::apply(&cc.egui_ctx, shell.settings());

        Self {
            shell,
            battery: Battery::new(Instant::now()),
        }
    }
}

impl eframe::App for PocketShellApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.battery.tick(Instant::now());

        // Apply any settings the Settings app posted since last frame.
        if self.shell.drain_settings_events() {
            Theme::apply(ctx, self.shell.settings());
        }

        TopBottomPanel::top("status_bar")
            .exact_height(StatusBar::HEIGHT)
            .frame(Frame::none().fill(Theme::STATUS_BAR_BG))
            .show(ctx, |ui| {
                StatusBar::show(ui, self.shell.settings(), &self.battery);
            });

        TopBottomPanel::bottom("nav_bar")
            .exact_height(NavBar::HEIGHT)
            .frame(Frame::none().fill(Theme::NAV_BAR_BG))
            .show(ctx, |ui| {
                if let Some(action) = NavBar::show(ui) {
                    match action {
                        NavAction::Back => self.shell.back(),
                        NavAction::Home => self.shell.go_home(),
                        NavAction::Drawer => self.shell.open_drawer(),
                    }
                }
            });

        let screen = self.shell.current_screen();
        if screen == ScreenIndex::HOME {
            CentralPanel::default()
                .frame(Frame::none())
                .show(ctx, |ui| {
                    let tapped = HomeScreen::show(ui, self.shell.settings(), self.shell.registry());
                    if let Some(key) = tapped {
                        self.shell.launch(key);
                    }
                });
        } else if screen == ScreenIndex::DRAWER {
            CentralPanel::default().show(ctx, |ui| {
                if let Some(key) = AppDrawer::show(ui, self.shell.registry()) {
                    self.shell.launch(key);
                }
            });
        } else {
            CentralPanel::default().show(ctx, |ui| {
                match self.shell.current_app_mut() {
                    Some(app) => app.update(ui),
                    // A stale history entry should never survive navigation,
                    // but render something sane rather than panicking.
                    None => {
                        ui.centered_and_justified(|ui| {
                            ui.label("This app is no longer available.");
                        });
                    }
                }
            });
        }

        // Keep the status bar clock and battery gauge moving even when
        // nothing else requests a repaint.
        ctx.request_repaint_after(Duration::from_secs(1));
    }

    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        // App data is written through on every change; settings get one
        // final write on the way out.
        if let Err(e) = self.shell.persist_settings() {
            warn!("Failed to save settings on exit: {e:#}");
        }
    }
}
