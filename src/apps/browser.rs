//! Browser app - bookmarks and a URL bar that open the system browser

use anyhow::Result;
use egui::{Button, Key, RichText, ScrollArea, TextEdit};
use tracing::warn;

use crate::core::{AppEnv, MiniApp};
use crate::ui::Theme;

const BOOKMARKS: [(&str, &str); 6] = [
    ("Google", "https://www.google.com"),
    ("Wikipedia", "https://www.wikipedia.org"),
    ("BBC News", "https://www.bbc.com/news"),
    ("Hacker News", "https://news.ycombinator.com"),
    ("YouTube", "https://www.youtube.com"),
    ("GitHub", "https://github.com"),
];

const HISTORY_LIMIT: usize = 10;

fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

pub struct BrowserApp {
    url_input: String,
    history: Vec<String>,
}

pub fn create(_env: &AppEnv) -> Result<Box<dyn MiniApp>> {
    Ok(Box::new(BrowserApp {
        url_input: String::new(),
        history: Vec::new(),
    }))
}

impl BrowserApp {
    fn record(&mut self, url: &str) {
        self.history.retain(|h| h != url);
        self.history.insert(0, url.to_string());
        self.history.truncate(HISTORY_LIMIT);
    }

    /// Hand the URL to the OS default browser.
    fn open_url(&mut self, raw: &str) {
        if raw.trim().is_empty() {
            return;
        }
        let url = normalize_url(raw);
        if let Err(e) = open::that_detached(&url) {
            warn!("Failed to open {}: {}", url, e);
            return;
        }
        self.record(&url);
    }
}

impl MiniApp for BrowserApp {
    fn update(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let input = TextEdit::singleline(&mut self.url_input)
                .hint_text("Enter URL...")
                .desired_width(ui.available_width() - 50.0);
            let response = ui.add(input);
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            if ui.button("Go").clicked() || submitted {
                let url = self.url_input.clone();
                self.open_url(&url);
            }
        });
        ui.separator();

        ui.label(RichText::new("Bookmarks").strong());
        let width = (ui.available_width() - ui.spacing().item_spacing.x) / 2.0;
        for pair in BOOKMARKS.chunks(2) {
            ui.horizontal(|ui| {
                for (name, url) in pair {
                    if ui.add_sized([width, 34.0], Button::new(*name)).clicked() {
                        self.open_url(url);
                    }
                }
            });
        }

        if !self.history.is_empty() {
            ui.add_space(8.0);
            ui.label(RichText::new("Recent").strong());
            ScrollArea::vertical()
                .id_salt("browser_history")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let history = self.history.clone();
                    for url in history {
                        if ui
                            .link(RichText::new(&url).color(Theme::INFO))
                            .clicked()
                        {
                            self.open_url(&url);
                        }
                    }
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hosts_get_a_scheme() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("  example.com  "), "https://example.com");
    }

    #[test]
    fn existing_schemes_are_kept() {
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
    }

    #[test]
    fn history_is_newest_first_and_deduplicated() {
        let mut app = BrowserApp {
            url_input: String::new(),
            history: Vec::new(),
        };
        app.record("https://a.example");
        app.record("https://b.example");
        app.record("https://a.example");

        assert_eq!(app.history, ["https://a.example", "https://b.example"]);
    }

    #[test]
    fn history_is_capped() {
        let mut app = BrowserApp {
            url_input: String::new(),
            history: Vec::new(),
        };
        for i in 0..20 {
            app.record(&format!("https://site{i}.example"));
        }
        assert_eq!(app.history.len(), HISTORY_LIMIT);
        assert_eq!(app.history[0], "https://site19.example");
    }
}
