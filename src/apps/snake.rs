//! Snake app - the classic 20x20 snake game

use std::collections::VecDeque;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use egui::{Align2, Button, Color32, FontId, Key, Rect, RichText, Sense, Stroke};

use crate::core::{AppEnv, MiniApp};
use crate::ui::Theme;

const BOARD_WIDTH: i32 = 20;
const BOARD_HEIGHT: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    /// Milliseconds between steps.
    fn tick_ms(&self) -> u64 {
        match self {
            Self::Easy => 150,
            Self::Medium => 100,
            Self::Hard => 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn opposite(&self) -> Direction {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    fn delta(&self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameState {
    Menu,
    Playing,
    GameOver,
}

struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    fn gen_below(&mut self, n: u32) -> u32 {
        self.next() % n
    }
}

/// Game rules with no rendering attached. The head is the front of the
/// deque.
struct SnakeGame {
    state: GameState,
    snake: VecDeque<(i32, i32)>,
    direction: Direction,
    /// At most one turn is applied per step, so the snake can never
    /// reverse into itself with two quick key presses.
    pending_turn: Option<Direction>,
    apple: (i32, i32),
    score: u32,
    rng: XorShift32,
}

impl SnakeGame {
    fn new(seed: u32) -> Self {
        Self {
            state: GameState::Menu,
            snake: VecDeque::new(),
            direction: Direction::Right,
            pending_turn: None,
            apple: (0, 0),
            score: 0,
            rng: XorShift32::new(seed),
        }
    }

    fn start(&mut self) {
        self.state = GameState::Playing;
        self.score = 0;
        self.direction = Direction::Right;
        self.pending_turn = None;
        self.snake = VecDeque::from([(5, 5), (4, 5), (3, 5)]);
        self.place_apple();
    }

    fn to_menu(&mut self) {
        self.state = GameState::Menu;
    }

    fn steer(&mut self, direction: Direction) {
        if self.state == GameState::Playing && direction != self.direction.opposite() {
            self.pending_turn = Some(direction);
        }
    }

    fn place_apple(&mut self) {
        loop {
            let apple = (
                self.rng.gen_below(BOARD_WIDTH as u32) as i32,
                self.rng.gen_below(BOARD_HEIGHT as u32) as i32,
            );
            if !self.snake.contains(&apple) {
                self.apple = apple;
                return;
            }
        }
    }

    /// Advance one tick: turn, move, eat or die.
    fn step(&mut self) {
        if self.state != GameState::Playing {
            return;
        }

        if let Some(turn) = self.pending_turn.take() {
            if turn != self.direction.opposite() {
                self.direction = turn;
            }
        }

        let (dx, dy) = self.direction.delta();
        let head = match self.snake.front() {
            Some(&(x, y)) => (x + dx, y + dy),
            None => return,
        };

        if !(0..BOARD_WIDTH).contains(&head.0) || !(0..BOARD_HEIGHT).contains(&head.1) {
            self.state = GameState::GameOver;
            return;
        }

        let eats = head == self.apple;
        // The tail cell vacates this tick unless the snake grows into it.
        let body_len = if eats {
            self.snake.len()
        } else {
            self.snake.len().saturating_sub(1)
        };
        if self.snake.iter().take(body_len).any(|&cell| cell == head) {
            self.state = GameState::GameOver;
            return;
        }

        self.snake.push_front(head);
        if eats {
            self.score += 1;
            self.place_apple();
        } else {
            self.snake.pop_back();
        }
    }
}

pub struct SnakeApp {
    game: SnakeGame,
    tick: Duration,
    last_step: Instant,
}

pub fn create(_env: &AppEnv) -> Result<Box<dyn MiniApp>> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0x5EED);
    Ok(Box::new(SnakeApp {
        game: SnakeGame::new(seed),
        tick: Duration::from_millis(Difficulty::Medium.tick_ms()),
        last_step: Instant::now(),
    }))
}

impl SnakeApp {
    fn start(&mut self, difficulty: Difficulty) {
        self.tick = Duration::from_millis(difficulty.tick_ms());
        self.game.start();
        self.last_step = Instant::now();
    }

    fn handle_keys(&mut self, ui: &egui::Ui) {
        ui.input(|i| {
            if i.key_pressed(Key::ArrowUp) {
                self.game.steer(Direction::Up);
            }
            if i.key_pressed(Key::ArrowDown) {
                self.game.steer(Direction::Down);
            }
            if i.key_pressed(Key::ArrowLeft) {
                self.game.steer(Direction::Left);
            }
            if i.key_pressed(Key::ArrowRight) {
                self.game.steer(Direction::Right);
            }
        });
    }

    fn render_menu(&mut self, ui: &mut egui::Ui) {
        ui.add_space(60.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("SNAKE").size(32.0).strong().color(Theme::SUCCESS));
            ui.add_space(30.0);
            for difficulty in Difficulty::all() {
                if ui
                    .add_sized([150.0, 36.0], Button::new(difficulty.label()))
                    .clicked()
                {
                    self.start(*difficulty);
                }
                ui.add_space(6.0);
            }
        });
    }

    fn render_board(&mut self, ui: &mut egui::Ui) {
        ui.label(format!("Score: {}", self.game.score));

        let side = ui.available_width().min(ui.available_height() - 40.0);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(side, side), Sense::hover());
        let painter = ui.painter_at(rect);

        painter.rect_filled(rect, 4.0, Color32::BLACK);
        painter.rect_stroke(rect, 4.0, Stroke::new(1.0, Theme::BORDER));

        let cell = side / BOARD_WIDTH as f32;
        let cell_rect = |(x, y): (i32, i32)| {
            Rect::from_min_size(
                rect.min + egui::vec2(x as f32 * cell, y as f32 * cell),
                egui::vec2(cell - 1.0, cell - 1.0),
            )
        };

        painter.rect_filled(cell_rect(self.game.apple), 2.0, Theme::ERROR);
        for &segment in &self.game.snake {
            painter.rect_filled(cell_rect(segment), 2.0, Theme::SUCCESS);
        }

        if self.game.state == GameState::GameOver {
            painter.rect_filled(rect, 4.0, Color32::from_black_alpha(170));
            painter.text(
                rect.center() - egui::vec2(0.0, 20.0),
                Align2::CENTER_CENTER,
                "Game Over",
                FontId::proportional(26.0),
                Color32::WHITE,
            );
            painter.text(
                rect.center() + egui::vec2(0.0, 10.0),
                Align2::CENTER_CENTER,
                format!("Final Score: {}", self.game.score),
                FontId::proportional(16.0),
                Color32::WHITE,
            );

            ui.vertical_centered(|ui| {
                if ui.add_sized([150.0, 32.0], Button::new("Restart")).clicked() {
                    self.game.to_menu();
                }
            });
        }
    }
}

impl MiniApp for SnakeApp {
    fn update(&mut self, ui: &mut egui::Ui) {
        match self.game.state {
            GameState::Menu => self.render_menu(ui),
            GameState::Playing => {
                self.handle_keys(ui);

                let now = Instant::now();
                while now.saturating_duration_since(self.last_step) >= self.tick {
                    self.game.step();
                    self.last_step += self.tick;
                }

                self.render_board(ui);
                ui.ctx().request_repaint_after(self.tick);
            }
            GameState::GameOver => self.render_board(ui),
        }
    }
}
