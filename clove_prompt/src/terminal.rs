use std::io::{self, Stdout, Write};

use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use thiserror::Error;

use crate::action::{Action, UserInput};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Failure while running a prompt against a terminal.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The terminal could not be read from or written to.
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),

    /// The user abandoned the prompt.
    #[error("prompt interrupted by the user.")]
    Interrupted,
}

/// The terminal collaborator of the prompt engine.
pub trait Terminal {
    /// Replace the currently displayed frame with `frame`.
    fn display(&mut self, frame: &str) -> Result<(), PromptError>;

    /// Block until the next input event is available.
    fn user_input(&mut self) -> Result<UserInput, PromptError>;
}

struct RawMode;

impl RawMode {
    fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Terminal raw mode enabled.");
        }
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        // Nothing sensible can be done if the terminal refuses to leave raw mode.
        let _ = terminal::disable_raw_mode();
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Terminal raw mode released.");
        }
    }
}

/// A [`Terminal`] over stdin/stdout, in raw mode for as long as it is alive.
pub struct CrosstermTerminal {
    out: Stdout,
    lines: u16,
    // Declared last so the frame cleanup in `drop` runs while still in raw mode.
    _raw: RawMode,
}

impl CrosstermTerminal {
    /// Start a terminal session.
    /// Raw mode is released when the session is dropped, regardless of how the prompt ended.
    pub fn session() -> Result<Self, PromptError> {
        let raw = RawMode::acquire()?;
        Ok(Self {
            out: io::stdout(),
            lines: 0,
            _raw: raw,
        })
    }

    fn clear_frame(&mut self) -> io::Result<()> {
        self.out.queue(MoveToColumn(0))?;

        if self.lines > 1 {
            self.out.queue(MoveUp(self.lines - 1))?;
        }

        self.out.queue(Clear(ClearType::FromCursorDown))?;
        Ok(())
    }
}

impl Terminal for CrosstermTerminal {
    fn display(&mut self, frame: &str) -> Result<(), PromptError> {
        if self.lines > 0 {
            self.clear_frame()?;
        }

        // Raw mode does not translate a line feed into a carriage return.
        self.out.queue(Print(frame.replace('\n', "\r\n")))?;
        self.out.flush()?;
        self.lines = u16::try_from(frame.lines().count().max(1)).unwrap_or(u16::MAX);
        Ok(())
    }

    fn user_input(&mut self) -> Result<UserInput, PromptError> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    return Ok(decode(key));
                }
            }
        }
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        let _ = self.out.queue(Print("\r\n"));
        let _ = self.out.flush();
    }
}

fn decode(key: KeyEvent) -> UserInput {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => UserInput::action(Action::Exit),
            _ => UserInput::action(Action::Unsupported),
        };
    }

    match key.code {
        KeyCode::Backspace => UserInput::action(Action::Backspace),
        KeyCode::Delete => UserInput::action(Action::Delete),
        KeyCode::Up => UserInput::action(Action::CursorUp),
        KeyCode::Down => UserInput::action(Action::CursorDown),
        KeyCode::Left => UserInput::action(Action::CursorLeft),
        KeyCode::Right => UserInput::action(Action::CursorRight),
        KeyCode::Home => UserInput::action(Action::Home),
        KeyCode::End => UserInput::action(Action::End),
        KeyCode::Tab | KeyCode::BackTab => UserInput::action(Action::Tab),
        KeyCode::Enter => UserInput::action(Action::Submit),
        KeyCode::Esc => UserInput::action(Action::Exit),
        KeyCode::Char(c) => UserInput::character(c),
        _ => UserInput::action(Action::Unsupported),
    }
}
