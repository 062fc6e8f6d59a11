//! Home screen: wallpaper, the big clock and the dock

use chrono::Local;
use egui::{Button, Color32, Layout, RichText, Rounding, Ui, Vec2};

use crate::core::{AppRegistry, Settings, Wallpaper};
use crate::ui::theme::Theme;

/// Apps pinned to the dock, left to right. Keys missing from the
/// registry are skipped rather than rendered dead.
pub const DOCK_KEYS: [&str; 3] = ["gallery", "browser", "calculator"];

const DOCK_BUTTON: f32 = 56.0;
const DOCK_GAP: f32 = 22.0;

pub struct HomeScreen;

impl HomeScreen {
    /// Render the home screen and report the dock app tapped, if any.
    pub fn show(ui: &mut Ui, settings: &Settings, registry: &AppRegistry) -> Option<&'static str> {
        Self::paint_wallpaper(ui, settings);

        let now = Local::now();
        ui.vertical_centered(|ui| {
            ui.add_space(96.0);
            ui.label(
                RichText::new(now.format(settings.clock_format.time_format()).to_string())
                    .size(56.0)
                    .strong()
                    .color(Theme::TEXT_PRIMARY),
            );
            ui.label(
                RichText::new(now.format("%A, %B %-d").to_string())
                    .size(15.0)
                    .color(Theme::TEXT_SECONDARY),
            );
        });

        let mut launch = None;
        ui.with_layout(Layout::bottom_up(egui::Align::Min), |ui| {
            ui.add_space(20.0);
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = DOCK_GAP;

                let docked: Vec<_> = DOCK_KEYS.iter().filter_map(|k| registry.get(k)).collect();
                let count = docked.len() as f32;
                let dock_width = count * DOCK_BUTTON + (count - 1.0).max(0.0) * DOCK_GAP;
                ui.add_space((ui.available_width() - dock_width).max(0.0) / 2.0);

                // Each button is bound to its own descriptor here. Binding
                // them all to a shared loop variable after the fact would
                // launch the last app for every tap.
                for descriptor in docked {
                    let button = Button::new(RichText::new(descriptor.icon).size(26.0))
                        .min_size(Vec2::splat(DOCK_BUTTON))
                        .rounding(Rounding::same(16.0))
                        .fill(Color32::from_black_alpha(140));
                    if ui.add(button).clicked() {
                        launch = Some(descriptor.key);
                    }
                }
            });
        });
        launch
    }

    fn paint_wallpaper(ui: &mut Ui, settings: &Settings) {
        let rect = ui.max_rect();
        match &settings.wallpaper {
            Wallpaper::Color(rgb) => {
                ui.painter()
                    .rect_filled(rect, 0.0, Color32::from_rgb(rgb[0], rgb[1], rgb[2]));
            }
            Wallpaper::Image(path) => {
                // Solid backdrop so a missing or still-loading file never
                // leaves the panel background showing through.
                ui.painter().rect_filled(rect, 0.0, Theme::BG_PRIMARY);
                egui::Image::from_uri(format!("file://{}", path.display())).paint_at(ui, rect);
            }
        }
    }
}
