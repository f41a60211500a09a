//! Interactive terminal prompts for `clove`.
//!
//! A [`Prompt`] is a value describing a sequence of frames: each frame renders the current state, reads one
//! [`UserInput`], and processes it into a [`PromptAction`].
//! Prompts compose with [`Prompt::and_then`] and [`Prompt::map`], and run against any [`Terminal`].
//!
//! ### Example
//! ```no_run
//! use clove_prompt::Prompt;
//!
//! let prompt = Prompt::text("Remote name")
//!     .and_then(|name| Prompt::confirm("Fetch now?", true).map(move |fetch| (name, fetch)));
//! let (name, fetch) = prompt.run_interactive().unwrap();
//! ```
#![deny(missing_docs)]
mod action;
mod builtin;
mod engine;
#[cfg(any(test, feature = "unit_test"))]
mod scripted;
mod terminal;

pub use action::{Action, PromptAction, UserInput};
pub use builtin::{NumberState, SelectState, TextState};
pub use engine::Prompt;
#[cfg(any(test, feature = "unit_test"))]
pub use scripted::ScriptedTerminal;
pub use terminal::{CrosstermTerminal, PromptError, Terminal};
