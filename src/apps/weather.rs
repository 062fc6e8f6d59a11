//! Weather app - city search over a built-in forecast source

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use egui::{Grid, Key, RichText, TextEdit};
use thiserror::Error;

use crate::core::{AppEnv, MiniApp};
use crate::ui::{Icons, Theme};

#[derive(Debug, Error, PartialEq)]
enum WeatherError {
    #[error("Error: city not found")]
    UnknownCity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AirQuality {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

impl AirQuality {
    fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct WeatherReport {
    city: String,
    temp_c: i32,
    description: String,
    humidity: u32,
    wind_m_s: f32,
    precipitation_mm: f32,
    air_quality: AirQuality,
}

/// Source of weather reports. The shell ships with a generated local
/// source; a networked one would slot in here.
trait WeatherProvider {
    fn fetch(&self, city: &str, date: NaiveDate) -> Result<WeatherReport, WeatherError>;
}

/// Known cities and their rough annual mean in Celsius.
const CITIES: &[(&str, f32)] = &[
    ("Kathmandu", 18.0),
    ("Lalitpur", 18.0),
    ("New York", 12.0),
    ("London", 10.0),
    ("Paris", 12.0),
    ("Berlin", 10.0),
    ("Moscow", 4.0),
    ("Tokyo", 16.0),
    ("Mumbai", 27.0),
    ("Singapore", 27.0),
    ("Cairo", 25.0),
    ("Sydney", 18.0),
];

const DESCRIPTIONS: &[&str] = &[
    "Clear Sky",
    "Few Clouds",
    "Scattered Clouds",
    "Overcast Clouds",
    "Light Rain",
];

fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for &b in bytes {
        hash ^= u32::from(b);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

/// Generates stable, plausible conditions: the same city and date always
/// produce the same report.
struct LocalForecast;

impl WeatherProvider for LocalForecast {
    fn fetch(&self, city: &str, date: NaiveDate) -> Result<WeatherReport, WeatherError> {
        let query = city.trim();
        let (name, base_temp) = CITIES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(query))
            .ok_or(WeatherError::UnknownCity)?;

        let seed = fnv1a(name.to_ascii_lowercase().as_bytes())
            .wrapping_add(date.ordinal())
            .wrapping_mul(0x9E37_79B9);

        let seasonal = 8.0
            * (std::f32::consts::TAU * (date.ordinal() as f32 - 196.0) / 365.0).cos()
            * -1.0;
        let jitter = (seed % 7) as f32 - 3.0;
        let temp_c = (base_temp + seasonal + jitter).round() as i32;

        let description = DESCRIPTIONS[(seed / 7 % DESCRIPTIONS.len() as u32) as usize];
        let rainy = description.contains("Rain");

        Ok(WeatherReport {
            city: (*name).to_string(),
            temp_c,
            description: description.to_string(),
            humidity: 40 + (seed / 31 % 51),
            wind_m_s: (seed / 13 % 80) as f32 / 10.0,
            precipitation_mm: if rainy {
                (seed / 17 % 40) as f32 / 10.0
            } else {
                0.0
            },
            air_quality: match seed / 23 % 5 {
                0 => AirQuality::Good,
                1 => AirQuality::Fair,
                2 => AirQuality::Moderate,
                3 => AirQuality::Poor,
                _ => AirQuality::VeryPoor,
            },
        })
    }
}

fn icon_for(description: &str) -> &'static str {
    match description {
        "Clear Sky" => "☀",
        "Few Clouds" => "⛅",
        "Light Rain" => "☔",
        _ => "☁",
    }
}

pub struct WeatherApp {
    provider: Box<dyn WeatherProvider>,
    input: String,
    report: Option<WeatherReport>,
    error: Option<String>,
}

pub fn create(_env: &AppEnv) -> Result<Box<dyn MiniApp>> {
    let mut app = WeatherApp {
        provider: Box::new(LocalForecast),
        input: String::new(),
        report: None,
        error: None,
    };
    app.search("Kathmandu");
    Ok(Box::new(app))
}

impl WeatherApp {
    /// Look up `city`. On failure the previous report stays on screen
    /// under the error line, like any phone weather app.
    fn search(&mut self, city: &str) {
        if city.trim().is_empty() {
            return;
        }
        match self.provider.fetch(city, Local::now().date_naive()) {
            Ok(report) => {
                self.report = Some(report);
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

impl MiniApp for WeatherApp {
    fn update(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let input = TextEdit::singleline(&mut self.input)
                .hint_text("Enter city name...")
                .desired_width(ui.available_width() - 80.0);
            let response = ui.add(input);
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            if ui.button(format!("{} Search", Icons::SEARCH)).clicked() || submitted {
                let city = self.input.clone();
                self.search(&city);
            }
        });

        if let Some(error) = &self.error {
            ui.label(RichText::new(error).color(Theme::ERROR));
        }

        if let Some(report) = &self.report {
            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(&report.city).size(24.0).strong());
                ui.label(RichText::new(icon_for(&report.description)).size(48.0));
                ui.label(RichText::new(format!("{}°C", report.temp_c)).size(64.0));
                ui.label(
                    RichText::new(&report.description)
                        .size(15.0)
                        .color(Theme::TEXT_SECONDARY),
                );
            });

            ui.add_space(14.0);
            Grid::new("weather_details")
                .num_columns(2)
                .striped(true)
                .spacing([24.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Humidity:");
                    ui.label(format!("{}%", report.humidity));
                    ui.end_row();

                    ui.label("Wind Speed:");
                    ui.label(format!("{:.1} m/s", report.wind_m_s));
                    ui.end_row();

                    ui.label("Precipitation (1h):");
                    ui.label(format!("{:.1} mm", report.precipitation_mm));
                    ui.end_row();

                    ui.label("Air Quality:");
                    ui.label(report.air_quality.label());
                    ui.end_row();
                });
        }
    }
}
