//! Gallery app - thumbnail grid over a folder of images

use std::path::{Path, PathBuf};

use anyhow::Result;
use egui::{Button, Image, ImageButton, Key, RichText, ScrollArea};
use tracing::warn;

use crate::core::{AppEnv, MiniApp};
use crate::ui::{Icons, Theme};

const THUMBNAIL: f32 = 100.0;
const COLUMNS: usize = 3;

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "png" | "jpg" | "jpeg"
            )
        })
}

/// Image files in `folder`, sorted by name. Unreadable folders yield an
/// empty gallery.
fn scan_folder(folder: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to read gallery folder {:?}: {}", folder, e);
            return Vec::new();
        }
    };

    let mut images: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_image_file(path))
        .collect();
    images.sort();
    images
}

fn file_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

pub struct GalleryApp {
    folder: Option<PathBuf>,
    images: Vec<PathBuf>,
    /// Index into `images` while the full view is open.
    selected: Option<usize>,
}

pub fn create(_env: &AppEnv) -> Result<Box<dyn MiniApp>> {
    let folder = dirs::picture_dir().filter(|dir| dir.is_dir());
    let images = folder.as_deref().map(scan_folder).unwrap_or_default();
    Ok(Box::new(GalleryApp {
        folder,
        images,
        selected: None,
    }))
}

impl GalleryApp {
    fn pick_folder(&mut self) {
        if let Some(folder) = rfd::FileDialog::new().pick_folder() {
            self.images = scan_folder(&folder);
            self.folder = Some(folder);
            self.selected = None;
        }
    }

    fn render_grid(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .button(format!("{} Choose Folder", Icons::FOLDER))
                .clicked()
            {
                self.pick_folder();
            }
            let folder_name = self
                .folder
                .as_ref()
                .and_then(|f| f.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "no folder".to_string());
            ui.label(RichText::new(folder_name).color(Theme::TEXT_MUTED));
        });
        ui.separator();

        if self.images.is_empty() {
            ui.add_space(30.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("No images found.").color(Theme::TEXT_MUTED));
            });
            return;
        }

        ScrollArea::vertical()
            .id_salt("gallery_grid")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let mut clicked = None;
                for (row_index, row) in self.images.chunks(COLUMNS).enumerate() {
                    ui.horizontal(|ui| {
                        for (col_index, path) in row.iter().enumerate() {
                            let thumb = Image::from_uri(file_uri(path))
                                .fit_to_exact_size(egui::vec2(THUMBNAIL, THUMBNAIL))
                                .rounding(4.0);
                            if ui.add(ImageButton::new(thumb)).clicked() {
                                clicked = Some(row_index * COLUMNS + col_index);
                            }
                        }
                    });
                }
                if clicked.is_some() {
                    self.selected = clicked;
                }
            });
    }

    fn step_selection(&mut self, delta: i32) {
        if let Some(index) = self.selected {
            let stepped = index as i32 + delta;
            if (0..self.images.len() as i32).contains(&stepped) {
                self.selected = Some(stepped as usize);
            }
        }
    }

    fn render_full(&mut self, ui: &mut egui::Ui, index: usize) {
        let Some(path) = self.images.get(index).cloned() else {
            self.selected = None;
            return;
        };

        if ui
            .add_sized(
                [ui.available_width(), 28.0],
                Button::new("Back to Gallery"),
            )
            .clicked()
        {
            self.selected = None;
            return;
        }

        ui.horizontal(|ui| {
            if ui.button(Icons::CHEVRON_LEFT).clicked() {
                self.step_selection(-1);
            }
            ui.with_layout(
                egui::Layout::right_to_left(egui::Align::Center),
                |ui| {
                    if ui.button(Icons::CHEVRON_RIGHT).clicked() {
                        self.step_selection(1);
                    }
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            RichText::new(format!("{} / {}", index + 1, self.images.len()))
                                .color(Theme::TEXT_MUTED),
                        );
                    });
                },
            );
        });

        ui.input(|i| {
            if i.key_pressed(Key::ArrowLeft) {
                self.step_selection(-1);
            }
            if i.key_pressed(Key::ArrowRight) {
                self.step_selection(1);
            }
        });

        ui.add_space(4.0);
        ui.centered_and_justified(|ui| {
            ui.add(
                Image::from_uri(file_uri(&path))
                    .max_size(ui.available_size())
                    .rounding(4.0),
            );
        });
    }
}

impl MiniApp for GalleryApp {
    fn update(&mut self, ui: &mut egui::Ui) {
        match self.selected {
            Some(index) => self.render_full(ui, index),
            None => self.render_grid(ui),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_folder(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pocketshell-gallery-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn image_extensions_are_case_insensitive() {
        assert!(is_image_file(Path::new("a.png")));
        assert!(is_image_file(Path::new("B.JPG")));
        assert!(is_image_file(Path::new("c.JpEg")));
        assert!(!is_image_file(Path::new("d.txt")));
        assert!(!is_image_file(Path::new("no_extension")));
    }

    #[test]
    fn scan_keeps_only_images_sorted_by_name() {
        let dir = temp_folder("scan");
        for name in ["b.png", "a.jpg", "notes.txt", "c.jpeg"] {
            std::fs::write(dir.join(name), b"").unwrap();
        }

        let images = scan_folder(&dir);
        let names: Vec<_> = images
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["a.jpg", "b.png", "c.jpeg"]);
    }

    #[test]
    fn a_missing_folder_scans_empty() {
        let dir = temp_folder("missing").join("nope");
        assert!(scan_folder(&dir).is_empty());
    }

    #[test]
    fn uris_are_file_scheme() {
        assert!(file_uri(Path::new("/tmp/a.png")).starts_with("file:///tmp/"));
    }

    #[test]
    fn stepping_stops_at_both_ends() {
        let mut app = GalleryApp {
            folder: None,
            images: vec![
                PathBuf::from("a.png"),
                PathBuf::from("b.png"),
                PathBuf::from("c.png"),
            ],
            selected: Some(0),
        };

        app.step_selection(-1);
        assert_eq!(app.selected, Some(0));

        app.step_selection(1);
        app.step_selection(1);
        assert_eq!(app.selected, Some(2));
        app.step_selection(1);
        assert_eq!(app.selected, Some(2));
    }

    #[test]
    fn stepping_without_a_selection_is_a_no_op() {
        let mut app = GalleryApp {
            folder: None,
            images: vec![PathBuf::from("a.png")],
            selected: None,
        };
        app.step_selection(1);
        assert_eq!(app.selected, None);
    }
}
