//! Settings app - posts change events for the shell to apply

use std::sync::mpsc::Sender;

use anyhow::Result;
use egui::{ComboBox, RichText};
use tracing::warn;

use crate::core::{
    AppEnv, ClockFormat, FontFamily, FontSize, MiniApp, Settings, SettingsEvent, Theme, Wallpaper,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsPage {
    Appearance,
    Clock,
}

/// The app never touches shared state: every control posts a
/// [`SettingsEvent`] and waits for the shell to broadcast the applied
/// snapshot back.
pub struct SettingsApp {
    settings: Settings,
    settings_tx: Sender<SettingsEvent>,
    page: SettingsPage,
    wallpaper_color: [u8; 3],
}

pub fn create(env: &AppEnv) -> Result<Box<dyn MiniApp>> {
    let wallpaper_color = match &env.settings.wallpaper {
        Wallpaper::Color(rgb) => *rgb,
        Wallpaper::Image(_) => [16, 20, 38],
    };
    Ok(Box::new(SettingsApp {
        settings: env.settings.clone(),
        settings_tx: env.settings_tx.clone(),
        page: SettingsPage::Appearance,
        wallpaper_color,
    }))
}

impl SettingsApp {
    fn send(&self, event: SettingsEvent) {
        if let Err(e) = self.settings_tx.send(event) {
            warn!("Settings channel closed: {e}");
        }
    }

    fn apply_color(&mut self) {
        self.send(SettingsEvent::WallpaperChanged(Wallpaper::Color(
            self.wallpaper_color,
        )));
    }

    fn choose_wallpaper_image(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg"])
            .pick_file();
        if let Some(path) = picked {
            self.send(SettingsEvent::WallpaperChanged(Wallpaper::Image(path)));
        }
    }

    fn render_appearance(&mut self, ui: &mut egui::Ui) {
        ui.label("Theme");
        let mut theme = self.settings.theme;
        ComboBox::from_id_salt("theme_combo")
            .selected_text(theme.label())
            .show_ui(ui, |ui| {
                for option in Theme::all() {
                    ui.selectable_value(&mut theme, *option, option.label());
                }
            });
        if theme != self.settings.theme {
            self.settings.theme = theme;
            self.send(SettingsEvent::ThemeChanged(theme));
        }

        ui.add_space(8.0);
        ui.label("Font Family");
        let mut family = self.settings.font_family;
        ComboBox::from_id_salt("font_family_combo")
            .selected_text(family.label())
            .show_ui(ui, |ui| {
                for option in FontFamily::all() {
                    ui.selectable_value(&mut family, *option, option.label());
                }
            });
        if family != self.settings.font_family {
            self.settings.font_family = family;
            self.send(SettingsEvent::FontFamilyChanged(family));
        }

        ui.add_space(8.0);
        ui.label("Font Size");
        let mut size = self.settings.font_size;
        ComboBox::from_id_salt("font_size_combo")
            .selected_text(size.label())
            .show_ui(ui, |ui| {
                for option in FontSize::all() {
                    ui.selectable_value(&mut size, *option, option.label());
                }
            });
        if size != self.settings.font_size {
            self.settings.font_size = size;
            self.send(SettingsEvent::FontSizeChanged(size));
        }

        ui.add_space(8.0);
        ui.label("Wallpaper");
        ui.horizontal(|ui| {
            ui.color_edit_button_srgb(&mut self.wallpaper_color);
            if ui.button("Set Color").clicked() {
                self.apply_color();
            }
        });
        if ui.button("Choose Image...").clicked() {
            self.choose_wallpaper_image();
        }
    }

    fn render_clock(&mut self, ui: &mut egui::Ui) {
        ui.label("Homescreen Clock Format");
        let mut format = self.settings.clock_format;
        ComboBox::from_id_salt("clock_format_combo")
            .selected_text(format.label())
            .show_ui(ui, |ui| {
                for option in ClockFormat::all() {
                    ui.selectable_value(&mut format, *option, option.label());
                }
            });
        if format != self.settings.clock_format {
            self.settings.clock_format = format;
            self.send(SettingsEvent::ClockFormatChanged(format));
        }
    }
}

impl MiniApp for SettingsApp {
    fn update(&mut self, ui: &mut egui::Ui) {
        let body_height = ui.available_height();
        ui.horizontal(|ui| {
            ui.set_min_height(body_height);

            ui.vertical(|ui| {
                ui.set_width(100.0);
                for (page, label) in [
                    (SettingsPage::Appearance, "Appearance"),
                    (SettingsPage::Clock, "Clock"),
                ] {
                    if ui.selectable_label(self.page == page, label).clicked() {
                        self.page = page;
                    }
                }
            });
            ui.separator();

            ui.vertical(|ui| match self.page {
                SettingsPage::Appearance => self.render_appearance(ui),
                SettingsPage::Clock => self.render_clock(ui),
            });
        });

        ui.with_layout(
            egui::Layout::bottom_up(egui::Align::Min),
            |ui| {
                ui.label(
                    RichText::new("Changes apply immediately and are saved.")
                        .small()
                        .weak(),
                );
            },
        );
    }

    fn settings_changed(&mut self, settings: &Settings) {
        self.settings = settings.clone();
        if let Wallpaper::Color(rgb) = settings.wallpaper {
            self.wallpaper_color = rgb;
        }
    }
}
