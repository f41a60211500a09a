use std::collections::VecDeque;
use std::io;

use crate::action::UserInput;
use crate::terminal::{PromptError, Terminal};

/// *Available using 'unit_test' crate feature only.*</br></br>
/// A [`Terminal`] which replays a fixed script of inputs and records every displayed frame.
///
/// ### Example
/// ```
/// use clove_prompt::{Action, Prompt, ScriptedTerminal, UserInput};
///
/// let mut inputs = UserInput::keystrokes("hi");
/// inputs.push(UserInput::action(Action::Submit));
/// let mut terminal = ScriptedTerminal::new(inputs);
///
/// let value = Prompt::text("Greeting").run(&mut terminal).unwrap();
/// assert_eq!(value, "hi");
/// ```
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    inputs: VecDeque<UserInput>,
    frames: Vec<String>,
}

impl ScriptedTerminal {
    /// Create a terminal which will answer `user_input` from `inputs`, in order.
    pub fn new(inputs: impl IntoIterator<Item = UserInput>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            frames: Vec::default(),
        }
    }

    /// Every frame displayed so far.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// The most recently displayed frame.
    pub fn last_frame(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }

    /// How many scripted inputs have not been consumed.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Terminal for ScriptedTerminal {
    fn display(&mut self, frame: &str) -> Result<(), PromptError> {
        self.frames.push(frame.to_string());
        Ok(())
    }

    fn user_input(&mut self) -> Result<UserInput, PromptError> {
        self.inputs.pop_front().ok_or_else(|| {
            PromptError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "scripted terminal has no more input",
            ))
        })
    }
}
