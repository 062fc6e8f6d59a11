//! Clock app - world clock, stopwatch and countdown timer

use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{FixedOffset, Utc};
use egui::{Align, Button, DragValue, Layout, ProgressBar, RichText, ScrollArea};

use crate::core::{AppEnv, MiniApp};
use crate::ui::{Icons, Theme};

/// Standard-time offsets in seconds east of UTC; daylight saving is not
/// modelled.
const WORLD_CITIES: [(&str, i32); 3] = [
    ("Kathmandu", 5 * 3600 + 45 * 60),
    ("New York", -5 * 3600),
    ("London", 0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClockTab {
    World,
    Stopwatch,
    Timer,
}

fn format_stopwatch(elapsed: Duration) -> String {
    let ms = elapsed.as_millis();
    format!("{:02}:{:02}:{:03}", ms / 60_000, (ms / 1000) % 60, ms % 1000)
}

fn format_hms(total_seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        total_seconds / 3600,
        (total_seconds % 3600) / 60,
        total_seconds % 60
    )
}

#[derive(Default)]
struct Stopwatch {
    accumulated: Duration,
    started_at: Option<Instant>,
    laps: Vec<Duration>,
}

impl Stopwatch {
    fn elapsed(&self, now: Instant) -> Duration {
        let running = self
            .started_at
            .map(|s| now.saturating_duration_since(s))
            .unwrap_or_default();
        self.accumulated + running
    }

    fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    fn stop(&mut self, now: Instant) {
        if let Some(started) = self.started_at.take() {
            self.accumulated += now.saturating_duration_since(started);
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Newest lap first, like a phone stopwatch.
    fn lap(&mut self, now: Instant) {
        self.laps.insert(0, self.elapsed(now));
    }
}

#[derive(Default)]
struct Countdown {
    total: Duration,
    remaining: Duration,
    running_since: Option<Instant>,
}

impl Countdown {
    fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    fn is_paused(&self) -> bool {
        self.running_since.is_none() && !self.remaining.is_zero()
    }

    fn start(&mut self, total: Duration, now: Instant) {
        if !total.is_zero() {
            self.total = total;
            self.remaining = total;
            self.running_since = Some(now);
        }
    }

    fn resume(&mut self, now: Instant) {
        if self.is_paused() {
            self.running_since = Some(now);
        }
    }

    fn pause(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.remaining = self
                .remaining
                .saturating_sub(now.saturating_duration_since(since));
        }
    }

    fn remaining_at(&self, now: Instant) -> Duration {
        match self.running_since {
            Some(since) => self
                .remaining
                .saturating_sub(now.saturating_duration_since(since)),
            None => self.remaining,
        }
    }

    /// Latch the finished state once the deadline passes.
    fn tick(&mut self, now: Instant) {
        if self.is_running() && self.remaining_at(now).is_zero() {
            self.running_since = None;
            self.remaining = Duration::ZERO;
        }
    }

    fn progress(&self, now: Instant) -> f32 {
        if self.total.is_zero() {
            0.0
        } else {
            self.remaining_at(now).as_secs_f32() / self.total.as_secs_f32()
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

pub struct ClockApp {
    tab: ClockTab,
    stopwatch: Stopwatch,
    countdown: Countdown,
    timer_h: u32,
    timer_m: u32,
    timer_s: u32,
}

pub fn create(_env: &AppEnv) -> Result<Box<dyn MiniApp>> {
    Ok(Box::new(ClockApp {
        tab: ClockTab::World,
        stopwatch: Stopwatch::default(),
        countdown: Countdown::default(),
        timer_h: 0,
        timer_m: 0,
        timer_s: 0,
    }))
}

impl ClockApp {
    fn input_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.timer_h) * 3600 + u64::from(self.timer_m) * 60 + u64::from(self.timer_s))
    }

    fn render_world(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        for (city, offset_secs) in WORLD_CITIES {
            let offset = FixedOffset::east_opt(offset_secs);
            let time = match offset {
                Some(offset) => Utc::now()
                    .with_timezone(&offset)
                    .format("%H:%M:%S")
                    .to_string(),
                None => "--:--:--".to_string(),
            };
            ui.label(RichText::new(time).size(28.0).strong());
            ui.label(RichText::new(city).size(15.0).color(Theme::TEXT_SECONDARY));
            ui.add_space(16.0);
        }
        ui.ctx().request_repaint_after(Duration::from_millis(250));
    }

    fn render_stopwatch(&mut self, ui: &mut egui::Ui) {
        let now = Instant::now();

        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(format_stopwatch(self.stopwatch.elapsed(now)))
                    .size(38.0)
                    .strong()
                    .monospace(),
            );
        });

        let lap_height = (ui.available_height() - 50.0).max(40.0);
        ScrollArea::vertical()
            .id_salt("laps")
            .max_height(lap_height)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let count = self.stopwatch.laps.len();
                for (i, lap) in self.stopwatch.laps.iter().enumerate() {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!("Lap {}", count - i))
                                .color(Theme::TEXT_MUTED),
                        );
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            ui.label(RichText::new(format_stopwatch(*lap)).monospace());
                        });
                    });
                }
            });

        let width = (ui.available_width() - 3.0 * ui.spacing().item_spacing.x) / 4.0;
        ui.horizontal(|ui| {
            if ui
                .add_sized([width, 30.0], Button::new(format!("{} Start", Icons::PLAY)))
                .clicked()
            {
                self.stopwatch.start(now);
            }
            if ui
                .add_sized([width, 30.0], Button::new(format!("{} Stop", Icons::PAUSE)))
                .clicked()
            {
                self.stopwatch.stop(now);
            }
            if ui
                .add_sized([width, 30.0], Button::new(format!("{} Reset", Icons::RESTART)))
                .clicked()
            {
                self.stopwatch.reset();
            }
            if ui.add_sized([width, 30.0], Button::new("Lap")).clicked() {
                self.stopwatch.lap(now);
            }
        });

        if self.stopwatch.is_running() {
            ui.ctx().request_repaint_after(Duration::from_millis(33));
        }
    }

    fn render_timer(&mut self, ui: &mut egui::Ui) {
        let now = Instant::now();
        self.countdown.tick(now);

        ui.add_space(12.0);
        if self.countdown.is_running() || self.countdown.is_paused() {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(format_hms(self.countdown.remaining_at(now).as_secs()))
                        .size(38.0)
                        .strong()
                        .monospace(),
                );
            });
        } else {
            ui.horizontal(|ui| {
                ui.add(DragValue::new(&mut self.timer_h).range(0..=23).suffix("h"));
                ui.add(DragValue::new(&mut self.timer_m).range(0..=59).suffix("m"));
                ui.add(DragValue::new(&mut self.timer_s).range(0..=59).suffix("s"));
            });
        }

        ui.add(ProgressBar::new(self.countdown.progress(now)).fill(Theme::PRIMARY));

        let width = (ui.available_width() - 2.0 * ui.spacing().item_spacing.x) / 3.0;
        ui.horizontal(|ui| {
            if ui
                .add_sized([width, 30.0], Button::new(format!("{} Start", Icons::PLAY)))
                .clicked()
            {
                if self.countdown.is_paused() {
                    self.countdown.resume(now);
                } else {
                    self.countdown.start(self.input_duration(), now);
                }
            }
            if ui
                .add_sized([width, 30.0], Button::new(format!("{} Pause", Icons::PAUSE)))
                .clicked()
            {
                self.countdown.pause(now);
            }
            if ui
                .add_sized([width, 30.0], Button::new(format!("{} Reset", Icons::RESTART)))
                .clicked()
            {
                self.countdown.reset();
                self.timer_h = 0;
                self.timer_m = 0;
                self.timer_s = 0;
            }
        });

        if self.countdown.is_running() {
            ui.ctx().request_repaint_after(Duration::from_millis(250));
        }
    }
}

impl MiniApp for ClockApp {
    fn update(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for (tab, label) in [
                (ClockTab::World, "World Clock"),
                (ClockTab::Stopwatch, "Stopwatch"),
                (ClockTab::Timer, "Timer"),
            ] {
                if ui.selectable_label(self.tab == tab, label).clicked() {
                    self.tab = tab;
                }
            }
        });
        ui.separator();

        match self.tab {
            ClockTab::World => self.render_world(ui),
            ClockTab::Stopwatch => self.render_stopwatch(ui),
            ClockTab::Timer => self.render_timer(ui),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopwatch_accumulates_across_stops() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::default();

        sw.start(t0);
        sw.stop(t0 + Duration::from_secs(5));
        assert_eq!(sw.elapsed(t0 + Duration::from_secs(60)), Duration::from_secs(5));

        sw.start(t0 + Duration::from_secs(60));
        assert_eq!(
            sw.elapsed(t0 + Duration::from_secs(63)),
            Duration::from_secs(8)
        );
    }

    #[test]
    fn stopwatch_laps_are_newest_first() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::default();
        sw.start(t0);
        sw.lap(t0 + Duration::from_secs(1));
        sw.lap(t0 + Duration::from_secs(3));

        assert_eq!(sw.laps, vec![Duration::from_secs(3), Duration::from_secs(1)]);
    }

    #[test]
    fn stopwatch_reset_clears_everything() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::default();
        sw.start(t0);
        sw.lap(t0 + Duration::from_secs(1));
        sw.reset();

        assert!(!sw.is_running());
        assert!(sw.laps.is_empty());
        assert_eq!(sw.elapsed(t0 + Duration::from_secs(9)), Duration::ZERO);
    }

    #[test]
    fn countdown_ignores_a_zero_duration() {
        let t0 = Instant::now();
        let mut cd = Countdown::default();
        cd.start(Duration::ZERO, t0);
        assert!(!cd.is_running());
    }

    #[test]
    fn countdown_counts_down_and_finishes() {
        let t0 = Instant::now();
        let mut cd = Countdown::default();
        cd.start(Duration::from_secs(90), t0);

        assert_eq!(
            cd.remaining_at(t0 + Duration::from_secs(30)),
            Duration::from_secs(60)
        );

        cd.tick(t0 + Duration::from_secs(120));
        assert!(!cd.is_running());
        assert_eq!(cd.remaining_at(t0 + Duration::from_secs(120)), Duration::ZERO);
    }

    #[test]
    fn countdown_pause_freezes_the_remaining_time() {
        let t0 = Instant::now();
        let mut cd = Countdown::default();
        cd.start(Duration::from_secs(60), t0);
        cd.pause(t0 + Duration::from_secs(20));

        assert!(cd.is_paused());
        assert_eq!(
            cd.remaining_at(t0 + Duration::from_secs(500)),
            Duration::from_secs(40)
        );

        cd.resume(t0 + Duration::from_secs(500));
        assert_eq!(
            cd.remaining_at(t0 + Duration::from_secs(510)),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn displays_format_like_a_phone() {
        assert_eq!(format_stopwatch(Duration::from_millis(83_207)), "01:23:207");
        assert_eq!(format_hms(3_725), "01:02:05");
        assert_eq!(format_hms(0), "00:00:00");
    }
}
