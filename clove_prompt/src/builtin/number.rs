use std::fmt::Display;
use std::str::FromStr;

use crate::action::{Action, PromptAction, UserInput};
use crate::builtin::frame;
use crate::engine::Prompt;

/// The state of a numeric prompt: the text typed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberState {
    buffer: String,
}

impl NumberState {
    /// The text typed so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

pub(crate) trait Numeric: FromStr + Display + Default + Copy + 'static {
    const NAME: &'static str;
    const DECIMAL: bool;

    fn step(self, up: bool) -> Self;
}

impl Numeric for i64 {
    const NAME: &'static str = "integer";
    const DECIMAL: bool = false;

    fn step(self, up: bool) -> Self {
        if up {
            self.saturating_add(1)
        } else {
            self.saturating_sub(1)
        }
    }
}

impl Numeric for f64 {
    const NAME: &'static str = "number";
    const DECIMAL: bool = true;

    fn step(self, up: bool) -> Self {
        if up {
            self + 1.0
        } else {
            self - 1.0
        }
    }
}

impl Prompt<i64> {
    /// Prompt for a whole number.
    /// The up/down keys step the current value by one.
    pub fn integer(message: impl Into<String>) -> Self {
        number(message.into())
    }
}

impl Prompt<f64> {
    /// Prompt for a decimal number.
    /// The up/down keys step the current value by one.
    pub fn float(message: impl Into<String>) -> Self {
        number(message.into())
    }
}

fn number<N: Numeric>(message: String) -> Prompt<N> {
    Prompt::custom(
        NumberState::default(),
        move |state: &NumberState, action| frame(&message, &state.buffer, action),
        process::<N>,
    )
}

pub(crate) fn process<N: Numeric>(
    input: &UserInput,
    state: &NumberState,
) -> PromptAction<NumberState, N> {
    let buffer = &state.buffer;

    match input.kind() {
        Action::Character => {
            let accepted = input.value().chars().all(|c| {
                c.is_ascii_digit()
                    || (c == '-' && buffer.is_empty())
                    || (c == '.' && N::DECIMAL && !buffer.contains('.'))
            });

            if accepted && !input.value().is_empty() {
                PromptAction::NextFrame(NumberState {
                    buffer: format!("{buffer}{}", input.value()),
                })
            } else {
                PromptAction::Beep
            }
        }
        Action::Backspace if !buffer.is_empty() => {
            let mut next = buffer.clone();
            next.pop();
            PromptAction::NextFrame(NumberState { buffer: next })
        }
        Action::CursorUp | Action::CursorDown => {
            let current = if buffer.is_empty() {
                N::default()
            } else {
                match N::from_str(buffer) {
                    Ok(value) => value,
                    Err(_) => return PromptAction::Beep,
                }
            };
            let next = current.step(input.kind() == Action::CursorUp);
            PromptAction::NextFrame(NumberState {
                buffer: next.to_string(),
            })
        }
        Action::Submit => match N::from_str(buffer) {
            Ok(value) => PromptAction::Submit(value),
            Err(_) => PromptAction::Error(format!("'{buffer}' is not a valid {}.", N::NAME)),
        },
        _ => PromptAction::Beep,
    }
}
