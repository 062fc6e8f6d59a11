//! Theme and styling for the shell

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

use crate::core::settings::{self, Settings};

/// Application color palette
pub struct Theme;

impl Theme {
    // Primary colors - refined indigo/violet accent
    pub const PRIMARY: Color32 = Color32::from_rgb(99, 102, 241); // Indigo-500
    pub const PRIMARY_DARK: Color32 = Color32::from_rgb(67, 56, 202); // Indigo-700

    // Status colors
    pub const SUCCESS: Color32 = Color32::from_rgb(16, 185, 129); // Emerald-500
    pub const WARNING: Color32 = Color32::from_rgb(245, 158, 11); // Amber-500
    pub const ERROR: Color32 = Color32::from_rgb(244, 63, 94); // Rose-500
    pub const INFO: Color32 = Color32::from_rgb(6, 182, 212); // Cyan-500

    // Neutral colors (dark theme) - modern charcoal palette
    pub const BG_PRIMARY: Color32 = Color32::from_rgb(17, 17, 27); // Deep charcoal
    pub const BG_SECONDARY: Color32 = Color32::from_rgb(24, 24, 37); // Card background
    pub const BG_TERTIARY: Color32 = Color32::from_rgb(35, 35, 52); // Elevated elements
    pub const BG_HOVER: Color32 = Color32::from_rgb(45, 45, 65); // Hover state
    pub const BG_ELEVATED: Color32 = Color32::from_rgb(30, 30, 45); // Modals/dropdowns

    // Text colors
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(250, 250, 255); // Near white
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(161, 161, 180); // Gray-400
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(113, 113, 132); // Gray-500

    // Border colors
    pub const BORDER: Color32 = Color32::from_rgb(50, 50, 70); // Subtle border
    pub const BORDER_LIGHT: Color32 = Color32::from_rgb(38, 38, 55); // Lighter border

    // Fixed chrome colors, same in both themes
    pub const STATUS_BAR_BG: Color32 = Color32::from_rgb(10, 10, 18);
    pub const NAV_BAR_BG: Color32 = Color32::from_rgb(10, 10, 18);

    /// Apply the theme selected in `settings`, including font family and
    /// base size.
    pub fn apply(ctx: &egui::Context, settings: &Settings) {
        match settings.theme {
            settings::Theme::Dark => Self::apply_dark(ctx, settings),
            settings::Theme::Light => Self::apply_light(ctx, settings),
        }
    }

    /// Apply dark theme to egui
    pub fn apply_dark(ctx: &egui::Context, settings: &Settings) {
        let mut style = (*ctx.style()).clone();

        let mut visuals = Visuals::dark();

        visuals.panel_fill = Self::BG_PRIMARY;
        visuals.window_fill = Self::BG_ELEVATED;
        visuals.extreme_bg_color = Self::BG_PRIMARY;
        visuals.faint_bg_color = Self::BG_TERTIARY;

        // Non-interactive widgets (labels, etc.)
        visuals.widgets.noninteractive.bg_fill = Self::BG_SECONDARY;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(0.5, Self::BORDER_LIGHT);
        visuals.widgets.noninteractive.rounding = Rounding::same(6.0);

        // Inactive interactive widgets (buttons at rest)
        visuals.widgets.inactive.bg_fill = Self::BG_TERTIARY;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Self::TEXT_SECONDARY);
        visuals.widgets.inactive.bg_stroke = Stroke::new(0.5, Self::BORDER);
        visuals.widgets.inactive.rounding = Rounding::same(6.0);

        // Hovered widgets
        visuals.widgets.hovered.bg_fill = Self::BG_HOVER;
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, Self::PRIMARY.linear_multiply(0.6));
        visuals.widgets.hovered.rounding = Rounding::same(6.0);
        visuals.widgets.hovered.expansion = 1.0;

        // Active/pressed widgets
        visuals.widgets.active.bg_fill = Self::PRIMARY;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);
        visuals.widgets.active.bg_stroke = Stroke::new(1.0, Self::PRIMARY_DARK);
        visuals.widgets.active.rounding = Rounding::same(6.0);

        // Open widgets (like ComboBox when open)
        visuals.widgets.open.bg_fill = Self::BG_ELEVATED;
        visuals.widgets.open.fg_stroke = Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.open.bg_stroke = Stroke::new(1.0, Self::PRIMARY.linear_multiply(0.5));
        visuals.widgets.open.rounding = Rounding::same(6.0);

        // Selection colors
        visuals.selection.bg_fill = Self::PRIMARY.linear_multiply(0.25);
        visuals.selection.stroke = Stroke::new(1.0, Self::PRIMARY);

        visuals.window_rounding = Rounding::same(10.0);
        visuals.window_stroke = Stroke::new(0.5, Self::BORDER);
        visuals.window_shadow = egui::Shadow {
            offset: egui::vec2(0.0, 8.0),
            blur: 24.0,
            spread: 6.0,
            color: Color32::from_black_alpha(120),
        };
        visuals.popup_shadow = egui::Shadow {
            offset: egui::vec2(0.0, 6.0),
            blur: 16.0,
            spread: 4.0,
            color: Color32::from_black_alpha(100),
        };
        visuals.menu_rounding = Rounding::same(8.0);
        visuals.striped = true;

        style.visuals = visuals;
        Self::set_typography(&mut style, settings);
        Self::set_spacing(&mut style);

        ctx.set_style(style);
    }

    /// Apply light theme to egui
    pub fn apply_light(ctx: &egui::Context, settings: &Settings) {
        let mut style = (*ctx.style()).clone();
        let mut visuals = Visuals::light();

        // Light theme background colors
        let bg_primary = Color32::from_rgb(249, 250, 251); // Gray-50
        let bg_secondary = Color32::from_rgb(243, 244, 246); // Gray-100
        let bg_tertiary = Color32::from_rgb(229, 231, 235); // Gray-200
        let bg_hover = Color32::from_rgb(209, 213, 219); // Gray-300
        let text_primary = Color32::from_rgb(17, 24, 39); // Gray-900
        let text_secondary = Color32::from_rgb(75, 85, 99); // Gray-600
        let border = Color32::from_rgb(209, 213, 219); // Gray-300

        visuals.panel_fill = bg_primary;
        visuals.window_fill = Color32::WHITE;
        visuals.extreme_bg_color = Color32::WHITE;
        visuals.faint_bg_color = bg_secondary;

        visuals.widgets.noninteractive.bg_fill = bg_secondary;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text_primary);
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(0.5, border);
        visuals.widgets.noninteractive.rounding = Rounding::same(6.0);

        visuals.widgets.inactive.bg_fill = bg_tertiary;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text_secondary);
        visuals.widgets.inactive.bg_stroke = Stroke::new(0.5, border);
        visuals.widgets.inactive.rounding = Rounding::same(6.0);

        visuals.widgets.hovered.bg_fill = bg_hover;
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, text_primary);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, Self::PRIMARY.linear_multiply(0.7));
        visuals.widgets.hovered.rounding = Rounding::same(6.0);
        visuals.widgets.hovered.expansion = 1.0;

        visuals.widgets.active.bg_fill = Self::PRIMARY;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);
        visuals.widgets.active.bg_stroke = Stroke::new(1.0, Self::PRIMARY_DARK);
        visuals.widgets.active.rounding = Rounding::same(6.0);

        visuals.widgets.open.bg_fill = Color32::WHITE;
        visuals.widgets.open.fg_stroke = Stroke::new(1.0, text_primary);
        visuals.widgets.open.bg_stroke = Stroke::new(1.0, Self::PRIMARY.linear_multiply(0.6));
        visuals.widgets.open.rounding = Rounding::same(6.0);

        visuals.selection.bg_fill = Self::PRIMARY.linear_multiply(0.15);
        visuals.selection.stroke = Stroke::new(1.0, Self::PRIMARY);

        visuals.window_rounding = Rounding::same(10.0);
        visuals.window_stroke = Stroke::new(0.5, border);
        visuals.window_shadow = egui::Shadow {
            offset: egui::vec2(0.0, 6.0),
            blur: 18.0,
            spread: 3.0,
            color: Color32::from_black_alpha(20),
        };
        visuals.popup_shadow = egui::Shadow {
            offset: egui::vec2(0.0, 4.0),
            blur: 12.0,
            spread: 2.0,
            color: Color32::from_black_alpha(15),
        };
        visuals.menu_rounding = Rounding::same(8.0);
        visuals.striped = true;

        style.visuals = visuals;
        Self::set_typography(&mut style, settings);
        Self::set_spacing(&mut style);

        ctx.set_style(style);
    }

    /// Text styles scaled by the configured base size, in the configured
    /// family. The Monospace style keeps its fixed-width face either way.
    fn set_typography(style: &mut Style, settings: &Settings) {
        let scale = settings.font_size.scale();
        let family = match settings.font_family {
            settings::FontFamily::Default => FontFamily::Proportional,
            settings::FontFamily::Monospace => FontFamily::Monospace,
        };

        style.text_styles = [
            (TextStyle::Small, FontId::new(11.0 * scale, family.clone())),
            (TextStyle::Body, FontId::new(14.0 * scale, family.clone())),
            (TextStyle::Button, FontId::new(14.0 * scale, family.clone())),
            (TextStyle::Heading, FontId::new(19.0 * scale, family)),
            (
                TextStyle::Monospace,
                FontId::new(13.0 * scale, FontFamily::Monospace),
            ),
        ]
        .into();
    }

    /// Spacing tuned for a 380 pixel wide touch-style screen.
    fn set_spacing(style: &mut Style) {
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        style.spacing.window_margin = egui::Margin::same(12.0);
        style.spacing.button_padding = egui::vec2(12.0, 7.0);
        style.spacing.indent = 18.0;
        style.spacing.combo_width = 140.0;
        style.spacing.icon_width = 18.0;
        style.spacing.icon_spacing = 6.0;
        style.interaction.tooltip_delay = 0.3;
    }
}

/// Icon characters (using Unicode symbols)
pub struct Icons;

impl Icons {
    pub const BACK: &'static str = "◀";
    pub const HOME: &'static str = "●";
    pub const APPS: &'static str = "▦";
    pub const WIFI: &'static str = "📶";
    pub const BATTERY: &'static str = "🔋";
    pub const CHARGING: &'static str = "⚡";
    pub const PLAY: &'static str = "▶";
    pub const PAUSE: &'static str = "⏸";
    pub const RESTART: &'static str = "↻";
    pub const CLOSE: &'static str = "✕";
    pub const ADD: &'static str = "+";
    pub const TRASH: &'static str = "🗑";
    pub const SEARCH: &'static str = "🔍";
    pub const FOLDER: &'static str = "📁";
    pub const CHEVRON_LEFT: &'static str = "◀";
    pub const CHEVRON_RIGHT: &'static str = "▶";
    pub const CHECK: &'static str = "✓";
}
