//! Calculator app - four-function expression calculator

use anyhow::Result;
use egui::{Align, Button, Color32, Frame, Layout, Margin, RichText, Rounding};
use thiserror::Error;
use tracing::debug;

use crate::core::{AppEnv, MiniApp};
use crate::ui::Theme;

#[derive(Debug, Error, PartialEq)]
enum EvalError {
    #[error("nothing to evaluate")]
    Incomplete,
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("malformed number {0:?}")]
    MalformedNumber(String),
    #[error("division by zero")]
    DivideByZero,
}

#[derive(Debug, PartialEq)]
enum Token {
    Number(f64),
    Op(char),
}

fn precedence(op: char) -> u8 {
    match op {
        '*' | '/' => 2,
        _ => 1,
    }
}

/// Split an expression into numbers and operators.
///
/// A `-` where an operand is expected is taken as the number's sign, so
/// `5*-3` works the way a calculator user expects.
fn tokenize(expr: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();
    let mut expect_operand = true;

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if expect_operand {
            let mut literal = String::new();
            if c == '-' {
                literal.push('-');
                chars.next();
            }
            let mut saw_digit = false;
            while let Some(&d) = chars.peek() {
                if d.is_ascii_digit() || d == '.' {
                    saw_digit |= d.is_ascii_digit();
                    literal.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            if !saw_digit {
                return Err(EvalError::UnexpectedChar(c));
            }
            let value: f64 = literal
                .parse()
                .map_err(|_| EvalError::MalformedNumber(literal.clone()))?;
            tokens.push(Token::Number(value));
            expect_operand = false;
        } else {
            match c {
                '+' | '-' | '*' | '/' => {
                    tokens.push(Token::Op(c));
                    chars.next();
                    expect_operand = true;
                }
                _ => return Err(EvalError::UnexpectedChar(c)),
            }
        }
    }

    // Empty input or a trailing operator leaves an operand missing.
    if expect_operand {
        return Err(EvalError::Incomplete);
    }
    Ok(tokens)
}

fn apply_op(output: &mut Vec<f64>, op: char) -> Result<(), EvalError> {
    let b = output.pop().ok_or(EvalError::Incomplete)?;
    let a = output.pop().ok_or(EvalError::Incomplete)?;
    let value = match op {
        '+' => a + b,
        '-' => a - b,
        '*' => a * b,
        '/' => {
            if b == 0.0 {
                return Err(EvalError::DivideByZero);
            }
            a / b
        }
        _ => return Err(EvalError::UnexpectedChar(op)),
    };
    output.push(value);
    Ok(())
}

/// Evaluate a `+ - * /` expression with ordinary precedence and left
/// associativity.
fn evaluate(expr: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(expr)?;
    let mut output: Vec<f64> = Vec::new();
    let mut ops: Vec<char> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(value) => output.push(value),
            Token::Op(op) => {
                while let Some(&top) = ops.last() {
                    if precedence(top) < precedence(op) {
                        break;
                    }
                    ops.pop();
                    apply_op(&mut output, top)?;
                }
                ops.push(op);
            }
        }
    }
    while let Some(op) = ops.pop() {
        apply_op(&mut output, op)?;
    }

    output.pop().ok_or(EvalError::Incomplete)
}

/// Render a result without float noise: integers without a decimal
/// point, everything else trimmed of trailing zeros.
fn format_result(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{:.10}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

const KEY_ROWS: [[&str; 4]; 4] = [
    ["7", "8", "9", "/"],
    ["4", "5", "6", "*"],
    ["1", "2", "3", "-"],
    ["0", ".", "=", "+"],
];

pub struct CalculatorApp {
    display: String,
}

pub fn create(_env: &AppEnv) -> Result<Box<dyn MiniApp>> {
    Ok(Box::new(CalculatorApp {
        display: String::new(),
    }))
}

impl CalculatorApp {
    fn press(&mut self, key: &str) {
        match key {
            "=" => {
                self.display = match evaluate(&self.display) {
                    Ok(value) => format_result(value),
                    Err(e) => {
                        debug!("Calculator input rejected: {}", e);
                        "Error".to_string()
                    }
                };
            }
            "C" => self.display.clear(),
            _ => {
                if self.display == "Error" {
                    self.display.clear();
                }
                self.display.push_str(key);
            }
        }
    }
}

impl MiniApp for CalculatorApp {
    fn update(&mut self, ui: &mut egui::Ui) {
        let spacing = 6.0;
        ui.spacing_mut().item_spacing = egui::vec2(spacing, spacing);

        // Display
        Frame::none()
            .fill(Theme::BG_SECONDARY)
            .rounding(Rounding::same(8.0))
            .inner_margin(Margin::same(12.0))
            .show(ui, |ui| {
                ui.set_min_height(64.0);
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let shown = if self.display.is_empty() {
                        "0"
                    } else {
                        &self.display
                    };
                    let color = if shown == "Error" {
                        Theme::ERROR
                    } else {
                        Color32::WHITE
                    };
                    ui.label(RichText::new(shown).size(36.0).monospace().color(color));
                });
            });

        ui.add_space(spacing);

        let button_width = (ui.available_width() - 3.0 * spacing) / 4.0;
        let mut pressed: Option<&str> = None;

        for row in KEY_ROWS {
            ui.horizontal(|ui| {
                for key in row {
                    let label = RichText::new(key).size(22.0);
                    if ui
                        .add_sized([button_width, 52.0], Button::new(label))
                        .clicked()
                    {
                        pressed = Some(key);
                    }
                }
            });
        }

        let clear = Button::new(RichText::new("C").size(22.0));
        if ui
            .add_sized([ui.available_width(), 48.0], clear)
            .clicked()
        {
            pressed = Some("C");
        }

        if let Some(key) = pressed {
            self.press(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(evaluate("2+3*4"), Ok(14.0));
        assert_eq!(evaluate("3*4+2"), Ok(14.0));
    }

    #[test]
    fn same_precedence_evaluates_left_to_right() {
        assert_eq!(evaluate("8-3-2"), Ok(3.0));
        assert_eq!(evaluate("20/4/5"), Ok(1.0));
    }

    #[test]
    fn decimals_and_leading_dot_parse() {
        assert_eq!(evaluate("1.5*2"), Ok(3.0));
        assert_eq!(evaluate(".5+.5"), Ok(1.0));
    }

    #[test]
    fn minus_doubles_as_a_sign() {
        assert_eq!(evaluate("-5+3"), Ok(-2.0));
        assert_eq!(evaluate("5*-3"), Ok(-15.0));
        assert_eq!(evaluate("-2*-2"), Ok(4.0));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(evaluate("7/0"), Err(EvalError::DivideByZero));
        assert_eq!(evaluate("1/0.0"), Err(EvalError::DivideByZero));
    }

    #[test]
    fn incomplete_expressions_are_rejected() {
        assert_eq!(evaluate(""), Err(EvalError::Incomplete));
        assert_eq!(evaluate("7+"), Err(EvalError::Incomplete));
        assert_eq!(evaluate("+"), Err(EvalError::UnexpectedChar('+')));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(evaluate("7+a").is_err());
        assert_eq!(
            evaluate("1.2.3"),
            Err(EvalError::MalformedNumber("1.2.3".to_string()))
        );
    }

    #[test]
    fn results_format_without_float_noise() {
        assert_eq!(format_result(10.0), "10");
        assert_eq!(format_result(2.5), "2.5");
        assert_eq!(evaluate("0.1+0.2").map(format_result).as_deref(), Ok("0.3"));
    }

    #[test]
    fn pressing_keys_builds_and_evaluates() {
        let mut app = CalculatorApp {
            display: String::new(),
        };
        for key in ["1", "2", "+", "3", "="] {
            app.press(key);
        }
        assert_eq!(app.display, "15");

        app.press("C");
        assert_eq!(app.display, "");
    }

    #[test]
    fn error_state_clears_on_next_digit() {
        let mut app = CalculatorApp {
            display: String::new(),
        };
        for key in ["9", "/", "0", "="] {
            app.press(key);
        }
        assert_eq!(app.display, "Error");

        app.press("4");
        assert_eq!(app.display, "4");
    }
}
