//! Top status bar: clock on the left, connectivity and battery on the right

use chrono::Local;
use egui::{Align, Layout, RichText, Ui};

use crate::core::{Battery, Settings};
use crate::ui::theme::{Icons, Theme};

pub struct StatusBar;

impl StatusBar {
    pub const HEIGHT: f32 = 35.0;

    pub fn show(ui: &mut Ui, settings: &Settings, battery: &Battery) {
        let time = Local::now()
            .format(settings.clock_format.time_format())
            .to_string();

        ui.horizontal_centered(|ui| {
            ui.add_space(12.0);
            ui.label(
                RichText::new(time)
                    .size(13.0)
                    .strong()
                    .color(Theme::TEXT_PRIMARY),
            );

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.add_space(12.0);
                ui.label(
                    RichText::new(format!("{}%", battery.percent()))
                        .size(12.0)
                        .color(Theme::TEXT_SECONDARY),
                );
                let glyph = if battery.is_charging() {
                    Icons::CHARGING
                } else {
                    Icons::BATTERY
                };
                ui.label(RichText::new(glyph).size(12.0));
                ui.label(RichText::new(Icons::WIFI).size(12.0));
            });
        });
    }
}
