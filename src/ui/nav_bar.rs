//! Bottom navigation bar with the three standard controls

use egui::{Button, RichText, Ui, Vec2};

use crate::ui::theme::{Icons, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Back,
    Home,
    Drawer,
}

pub struct NavBar;

impl NavBar {
    pub const HEIGHT: f32 = 50.0;

    /// Render the bar and report which control was tapped, if any.
    pub fn show(ui: &mut Ui) -> Option<NavAction> {
        let mut action = None;

        ui.columns(3, |cols| {
            let controls = [
                (Icons::BACK, NavAction::Back),
                (Icons::HOME, NavAction::Home),
                (Icons::APPS, NavAction::Drawer),
            ];
            for (col, (glyph, control)) in cols.iter_mut().zip(controls) {
                col.vertical_centered(|ui| {
                    ui.add_space((Self::HEIGHT - 36.0) / 2.0);
                    let button = Button::new(
                        RichText::new(glyph)
                            .size(17.0)
                            .color(Theme::TEXT_SECONDARY),
                    )
                    .frame(false)
                    .min_size(Vec2::new(64.0, 36.0));
                    if ui.add(button).clicked() {
                        action = Some(control);
                    }
                });
            }
        });

        action
    }
}
