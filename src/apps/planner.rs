//! Planner app - daily task list and a calendar event planner

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use egui::{Button, Key, RichText, ScrollArea, TextEdit};
use tracing::warn;

use crate::core::{AppEnv, MiniApp};
use crate::persistence::{Store, TaskItem};
use crate::ui::{Icons, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlannerTab {
    Daily,
    Events,
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

/// Offset of the month's first day in a Monday-first week row.
fn first_weekday_offset(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.weekday().num_days_from_monday())
        .unwrap_or(0)
}

fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let mut y = year;
    let mut m = month as i32 + delta;
    while m < 1 {
        m += 12;
        y -= 1;
    }
    while m > 12 {
        m -= 12;
        y += 1;
    }
    (y, m as u32)
}

pub struct PlannerApp {
    store: Arc<Store>,
    tab: PlannerTab,
    daily: Vec<TaskItem>,
    daily_input: String,
    events: BTreeMap<String, Vec<TaskItem>>,
    event_input: String,
    selected_date: NaiveDate,
    visible_year: i32,
    visible_month: u32,
}

pub fn create(env: &AppEnv) -> Result<Box<dyn MiniApp>> {
    let today = Local::now().date_naive();
    Ok(Box::new(PlannerApp {
        daily: env.store.load_daily_tasks(),
        events: env.store.load_events(),
        store: Arc::clone(&env.store),
        tab: PlannerTab::Daily,
        daily_input: String::new(),
        event_input: String::new(),
        selected_date: today,
        visible_year: today.year(),
        visible_month: today.month(),
    }))
}

impl PlannerApp {
    fn persist_daily(&self) {
        if let Err(e) = self.store.save_daily_tasks(&self.daily) {
            warn!("Failed to save daily tasks: {e:#}");
        }
    }

    fn persist_events(&self) {
        if let Err(e) = self.store.save_events(&self.events) {
            warn!("Failed to save events: {e:#}");
        }
    }

    fn add_daily_task(&mut self) {
        let text = self.daily_input.trim();
        if !text.is_empty() {
            self.daily.push(TaskItem::new(text));
            self.daily_input.clear();
            self.persist_daily();
        }
    }

    fn delete_completed(&mut self) {
        self.daily.retain(|task| !task.completed);
        self.persist_daily();
    }

    fn add_event(&mut self) {
        let text = self.event_input.trim();
        if !text.is_empty() {
            self.events
                .entry(date_key(self.selected_date))
                .or_default()
                .push(TaskItem::new(text));
            self.event_input.clear();
            self.persist_events();
        }
    }

    fn has_events(&self, date: NaiveDate) -> bool {
        self.events
            .get(&date_key(date))
            .is_some_and(|events| !events.is_empty())
    }

    fn render_daily(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let input = TextEdit::singleline(&mut self.daily_input)
                .hint_text("Enter a daily task...")
                .desired_width(ui.available_width() - 60.0);
            let response = ui.add(input);
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            if ui.button("Add").clicked() || submitted {
                self.add_daily_task();
            }
        });

        let list_height = ui.available_height() - 40.0;
        ScrollArea::vertical()
            .id_salt("daily_tasks")
            .max_height(list_height)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let mut changed = false;
                for task in &mut self.daily {
                    if ui.checkbox(&mut task.completed, task.text.clone()).changed() {
                        changed = true;
                    }
                }
                if changed {
                    self.persist_daily();
                }
            });

        if ui
            .add_sized(
                [ui.available_width(), 30.0],
                Button::new(format!("{} Delete Completed", Icons::TRASH)),
            )
            .clicked()
        {
            self.delete_completed();
        }
    }

    fn render_calendar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(Icons::CHEVRON_LEFT).clicked() {
                let (y, m) = shift_month(self.visible_year, self.visible_month, -1);
                self.visible_year = y;
                self.visible_month = m;
            }
            let title = NaiveDate::from_ymd_opt(self.visible_year, self.visible_month, 1)
                .map(|d| d.format("%B %Y").to_string())
                .unwrap_or_default();
            ui.with_layout(
                egui::Layout::right_to_left(egui::Align::Center),
                |ui| {
                    if ui.button(Icons::CHEVRON_RIGHT).clicked() {
                        let (y, m) = shift_month(self.visible_year, self.visible_month, 1);
                        self.visible_year = y;
                        self.visible_month = m;
                    }
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new(title).strong());
                    });
                },
            );
        });

        let spacing = ui.spacing().item_spacing.x;
        let cell = (ui.available_width() - 6.0 * spacing) / 7.0;

        ui.horizontal(|ui| {
            for day in ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"] {
                ui.add_sized(
                    [cell, 18.0],
                    egui::Label::new(RichText::new(day).small().color(Theme::TEXT_MUTED)),
                );
            }
        });

        let today = Local::now().date_naive();
        let offset = first_weekday_offset(self.visible_year, self.visible_month);
        let days = days_in_month(self.visible_year, self.visible_month);

        let mut cells: Vec<Option<u32>> = vec![None; offset as usize];
        cells.extend((1..=days).map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }

        for week in cells.chunks(7) {
            ui.horizontal(|ui| {
                for slot in week {
                    match slot {
                        None => {
                            ui.add_sized([cell, 30.0], egui::Label::new(""));
                        }
                        Some(day) => {
                            let date = NaiveDate::from_ymd_opt(
                                self.visible_year,
                                self.visible_month,
                                *day,
                            );
                            let Some(date) = date else { continue };

                            let mut text = RichText::new(day.to_string());
                            if self.has_events(date) {
                                text = text.color(Theme::INFO).strong();
                            } else if date == today {
                                text = text.color(Theme::SUCCESS);
                            }

                            let mut button = Button::new(text);
                            if date == self.selected_date {
                                button = button.fill(Theme::PRIMARY);
                            }
                            if ui.add_sized([cell, 30.0], button).clicked() {
                                self.selected_date = date;
                            }
                        }
                    }
                }
            });
        }
    }

    fn render_events(&mut self, ui: &mut egui::Ui) {
        self.render_calendar(ui);
        ui.separator();
        ui.label(format!(
            "Events for {}",
            self.selected_date.format("%B %-d, %Y")
        ));

        let list_height = (ui.available_height() - 40.0).max(40.0);
        ScrollArea::vertical()
            .id_salt("event_list")
            .max_height(list_height)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let key = date_key(self.selected_date);
                let mut changed = false;
                if let Some(events) = self.events.get_mut(&key) {
                    for event in events.iter_mut() {
                        if ui
                            .checkbox(&mut event.completed, event.text.clone())
                            .changed()
                        {
                            changed = true;
                        }
                    }
                } else {
                    ui.label(RichText::new("No events.").color(Theme::TEXT_MUTED));
                }
                if changed {
                    self.persist_events();
                }
            });

        ui.horizontal(|ui| {
            let input = TextEdit::singleline(&mut self.event_input)
                .hint_text("New event...")
                .desired_width(ui.available_width() - 60.0);
            let response = ui.add(input);
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            if ui.button("Add").clicked() || submitted {
                self.add_event();
            }
        });
    }
}

impl MiniApp for PlannerApp {
    fn update(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .selectable_label(self.tab == PlannerTab::Daily, "Daily List")
                .clicked()
            {
                self.tab = PlannerTab::Daily;
            }
            if ui
                .selectable_label(self.tab == PlannerTab::Events, "Event Planner")
                .clicked()
            {
                self.tab = PlannerTab::Events;
            }
        });
        ui.separator();

        match self.tab {
            PlannerTab::Daily => self.render_daily(ui),
            PlannerTab::Events => self.render_events(ui),
        }
    }
}
