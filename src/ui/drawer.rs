//! App drawer: a scrollable grid of everything the registry discovered

use egui::{Button, RichText, Rounding, ScrollArea, Ui, Vec2};

use crate::core::AppRegistry;
use crate::ui::theme::Theme;

const GRID_COLUMNS: usize = 4;

pub struct AppDrawer;

impl AppDrawer {
    /// Render the drawer and report the app tapped, if any.
    pub fn show(ui: &mut Ui, registry: &AppRegistry) -> Option<&'static str> {
        let mut launch = None;

        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("Apps")
                    .size(16.0)
                    .strong()
                    .color(Theme::TEXT_PRIMARY),
            );
        });
        ui.add_space(10.0);

        ScrollArea::vertical()
            .id_salt("app_drawer")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let apps: Vec<_> = registry.iter().collect();
                for row in apps.chunks(GRID_COLUMNS) {
                    ui.columns(GRID_COLUMNS, |cols| {
                        for (col, descriptor) in cols.iter_mut().zip(row) {
                            col.vertical_centered(|ui| {
                                let button =
                                    Button::new(RichText::new(descriptor.icon).size(24.0))
                                        .min_size(Vec2::splat(52.0))
                                        .rounding(Rounding::same(14.0));
                                if ui.add(button).clicked() {
                                    launch = Some(descriptor.key);
                                }
                                ui.label(
                                    RichText::new(descriptor.name)
                                        .size(11.0)
                                        .color(Theme::TEXT_SECONDARY),
                                );
                            });
                        }
                    });
                    ui.add_space(12.0);
                }
            });

        launch
    }
}
