//! Shell settings - the persisted key-value record and its change events

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Shell color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    pub fn all() -> &'static [Theme] {
        &[Theme::Dark, Theme::Light]
    }
}

/// Font family choice. egui bundles a proportional and a monospace face;
/// system font enumeration is not available here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FontFamily {
    #[default]
    Default,
    Monospace,
}

impl FontFamily {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Monospace => "Monospace",
        }
    }

    pub fn all() -> &'static [FontFamily] {
        &[FontFamily::Default, FontFamily::Monospace]
    }
}

/// Base font size for the whole shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }

    pub fn all() -> &'static [FontSize] {
        &[FontSize::Small, FontSize::Medium, FontSize::Large]
    }

    /// Multiplier applied to every text style when the theme is (re)applied.
    pub fn scale(&self) -> f32 {
        match self {
            Self::Small => 0.88,
            Self::Medium => 1.0,
            Self::Large => 1.15,
        }
    }
}

/// Clock format for the status bar and the home screen clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClockFormat {
    #[default]
    TwelveHour,
    TwentyFourHour,
}

impl ClockFormat {
    pub fn label(&self) -> &'static str {
        match self {
            Self::TwelveHour => "12-Hour",
            Self::TwentyFourHour => "24-Hour",
        }
    }

    pub fn all() -> &'static [ClockFormat] {
        &[ClockFormat::TwelveHour, ClockFormat::TwentyFourHour]
    }

    /// chrono format string for an hour:minute clock in this format.
    pub fn time_format(&self) -> &'static str {
        match self {
            Self::TwelveHour => "%-I:%M",
            Self::TwentyFourHour => "%H:%M",
        }
    }
}

/// Home screen wallpaper: a solid color or an image file on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Wallpaper {
    Color([u8; 3]),
    Image(PathBuf),
}

impl Default for Wallpaper {
    fn default() -> Self {
        // Deep night blue, matching the dark theme
        Self::Color([16, 20, 38])
    }
}

/// The persisted settings record. Read once at startup and rewritten
/// wholesale on every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    pub theme: Theme,
    pub font_family: FontFamily,
    pub font_size: FontSize,
    pub wallpaper: Wallpaper,
    pub clock_format: ClockFormat,
}

/// A single settings change, posted by the Settings app on the shell's
/// channel. Components never mutate shared settings directly; the shell
/// applies events, persists the record, and re-broadcasts the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsEvent {
    ThemeChanged(Theme),
    FontFamilyChanged(FontFamily),
    FontSizeChanged(FontSize),
    WallpaperChanged(Wallpaper),
    ClockFormatChanged(ClockFormat),
}

impl Settings {
    /// Apply one change event, returning whether anything actually changed.
    pub fn apply(&mut self, event: &SettingsEvent) -> bool {
        match event {
            SettingsEvent::ThemeChanged(theme) => {
                let changed = self.theme != *theme;
                self.theme = *theme;
                changed
            }
            SettingsEvent::FontFamilyChanged(family) => {
                let changed = self.font_family != *family;
                self.font_family = *family;
                changed
            }
            SettingsEvent::FontSizeChanged(size) => {
                let changed = self.font_size != *size;
                self.font_size = *size;
                changed
            }
            SettingsEvent::WallpaperChanged(wallpaper) => {
                let changed = self.wallpaper != *wallpaper;
                self.wallpaper = wallpaper.clone();
                changed
            }
            SettingsEvent::ClockFormatChanged(format) => {
                let changed = self.clock_format != *format;
                self.clock_format = *format;
                changed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_dark_twelve_hour() {
        let settings = Settings::default();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.clock_format, ClockFormat::TwelveHour);
        assert_eq!(settings.font_size, FontSize::Medium);
    }

    #[test]
    fn apply_reports_change() {
        let mut settings = Settings::default();
        assert!(settings.apply(&SettingsEvent::ThemeChanged(Theme::Light)));
        assert_eq!(settings.theme, Theme::Light);
        // Re-applying the same value is a no-op
        assert!(!settings.apply(&SettingsEvent::ThemeChanged(Theme::Light)));
    }

    #[test]
    fn settings_round_trip_json() {
        let mut settings = Settings::default();
        settings.theme = Theme::Light;
        settings.wallpaper = Wallpaper::Image(PathBuf::from("/tmp/wall.png"));
        settings.clock_format = ClockFormat::TwentyFourHour;

        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn unknown_fields_do_not_break_deserialization() {
        // An older or newer record with extra keys must still load.
        let json = r#"{"theme":"Dark","font_family":"Default","font_size":"Medium",
                       "wallpaper":{"Color":[1,2,3]},"clock_format":"TwelveHour",
                       "legacy_key":true}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.wallpaper, Wallpaper::Color([1, 2, 3]));
    }
}
