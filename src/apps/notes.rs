//! Notes app - titled plain-text notes with a list and an editor

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use egui::{ScrollArea, TextEdit};
use tracing::warn;

use crate::core::{AppEnv, MiniApp};
use crate::persistence::Store;
use crate::ui::Icons;

const BASE_TITLE: &str = "New Note";

/// First free title in the `New Note`, `New Note 1`, `New Note 2`, ...
/// sequence.
fn next_title(notes: &BTreeMap<String, String>) -> String {
    if !notes.contains_key(BASE_TITLE) {
        return BASE_TITLE.to_string();
    }
    let mut i = 1;
    loop {
        let title = format!("{BASE_TITLE} {i}");
        if !notes.contains_key(&title) {
            return title;
        }
        i += 1;
    }
}

pub struct NotesApp {
    store: Arc<Store>,
    notes: BTreeMap<String, String>,
    selected: Option<String>,
    editor: String,
}

pub fn create(env: &AppEnv) -> Result<Box<dyn MiniApp>> {
    Ok(Box::new(NotesApp {
        notes: env.store.load_notes(),
        store: Arc::clone(&env.store),
        selected: None,
        editor: String::new(),
    }))
}

impl NotesApp {
    fn persist(&self) {
        if let Err(e) = self.store.save_notes(&self.notes) {
            warn!("Failed to save notes: {e:#}");
        }
    }

    fn new_note(&mut self) {
        let title = next_title(&self.notes);
        self.notes.insert(title.clone(), String::new());
        self.selected = Some(title);
        self.editor.clear();
        self.persist();
    }

    fn delete_selected(&mut self) {
        if let Some(title) = self.selected.take() {
            self.notes.remove(&title);
            self.editor.clear();
            self.persist();
        }
    }

    fn select(&mut self, title: String) {
        self.editor = self.notes.get(&title).cloned().unwrap_or_default();
        self.selected = Some(title);
    }

    /// Write the editor buffer back to the selected note.
    fn commit_editor(&mut self) {
        if let Some(title) = &self.selected {
            self.notes.insert(title.clone(), self.editor.clone());
            self.persist();
        }
    }
}

impl MiniApp for NotesApp {
    fn update(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(format!("{} New Note", Icons::ADD)).clicked() {
                self.new_note();
            }
            let delete = egui::Button::new(format!("{} Delete", Icons::TRASH));
            if ui.add_enabled(self.selected.is_some(), delete).clicked() {
                self.delete_selected();
            }
        });
        ui.separator();

        let body_height = ui.available_height();
        ui.horizontal(|ui| {
            ui.set_min_height(body_height);

            ui.vertical(|ui| {
                ui.set_width(120.0);
                ScrollArea::vertical()
                    .id_salt("note_list")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let titles: Vec<String> = self.notes.keys().cloned().collect();
                        for title in titles {
                            let is_selected = self.selected.as_deref() == Some(title.as_str());
                            if ui.selectable_label(is_selected, &title).clicked() {
                                self.select(title);
                            }
                        }
                    });
            });
            ui.separator();

            ui.vertical(|ui| {
                let editor = TextEdit::multiline(&mut self.editor)
                    .hint_text("Select a note or create a new one.")
                    .frame(false);
                let response = ui.add_sized(ui.available_size(), editor);
                if response.changed() {
                    self.commit_editor();
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(name: &str) -> NotesApp {
        let root = std::env::temp_dir().join(format!(
            "pocketshell-notes-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&root);
        NotesApp {
            store: Arc::new(Store::at(root)),
            notes: BTreeMap::new(),
            selected: None,
            editor: String::new(),
        }
    }

    #[test]
    fn titles_follow_the_new_note_sequence() {
        let mut notes = BTreeMap::new();
        assert_eq!(next_title(&notes), "New Note");

        notes.insert("New Note".to_string(), String::new());
        assert_eq!(next_title(&notes), "New Note 1");

        notes.insert("New Note 1".to_string(), String::new());
        assert_eq!(next_title(&notes), "New Note 2");
    }

    #[test]
    fn a_deleted_number_is_reused() {
        let mut notes = BTreeMap::new();
        notes.insert("New Note".to_string(), String::new());
        notes.insert("New Note 2".to_string(), String::new());
        assert_eq!(next_title(&notes), "New Note 1");
    }

    #[test]
    fn creating_a_note_selects_it_and_persists() {
        let mut app = test_app("create");
        app.new_note();

        assert_eq!(app.selected.as_deref(), Some("New Note"));
        assert!(app.store.load_notes().contains_key("New Note"));
    }

    #[test]
    fn edits_are_written_through_to_the_store() {
        let mut app = test_app("edit");
        app.new_note();
        app.editor = "shopping list".to_string();
        app.commit_editor();

        assert_eq!(app.store.load_notes()["New Note"], "shopping list");
    }

    #[test]
    fn deleting_clears_the_selection() {
        let mut app = test_app("delete");
        app.new_note();
        app.editor = "text".to_string();
        app.commit_editor();

        app.delete_selected();
        assert!(app.selected.is_none());
        assert!(app.editor.is_empty());
        assert!(app.store.load_notes().is_empty());
    }

    #[test]
    fn selecting_loads_the_note_body() {
        let mut app = test_app("select");
        app.notes
            .insert("groceries".to_string(), "milk, eggs".to_string());
        app.select("groceries".to_string());

        assert_eq!(app.editor, "milk, eggs");
    }
}
