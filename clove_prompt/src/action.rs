/// The named action decoded from a single keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Delete the character before the cursor.
    Backspace,
    /// Delete the character under the cursor.
    Delete,
    /// Move the cursor (or selection) up.
    CursorUp,
    /// Move the cursor (or selection) down.
    CursorDown,
    /// Move the cursor left.
    CursorLeft,
    /// Move the cursor right.
    CursorRight,
    /// Move the cursor to the start of the input.
    Home,
    /// Move the cursor to the end of the input.
    End,
    /// The tab key.
    Tab,
    /// Confirm the current frame (the enter key).
    Submit,
    /// Abandon the prompt (ctrl-c, ctrl-d or escape).
    Exit,
    /// A printable character; see [`UserInput::value`].
    Character,
    /// Any keystroke without a named action.
    Unsupported,
}

/// One decoded terminal input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    action: Action,
    value: String,
}

impl UserInput {
    /// Create an input event from a named action.
    pub fn new(action: Action, value: impl Into<String>) -> Self {
        Self {
            action,
            value: value.into(),
        }
    }

    /// Create an input event for a named action which carries no raw text.
    pub fn action(action: Action) -> Self {
        Self::new(action, "")
    }

    /// Create an input event for a printable character.
    pub fn character(value: char) -> Self {
        Self::new(Action::Character, value.to_string())
    }

    /// The events for typing `text` one character at a time.
    pub fn keystrokes(text: &str) -> Vec<Self> {
        text.chars().map(Self::character).collect()
    }

    /// The named action of this event.
    pub fn kind(&self) -> Action {
        self.action
    }

    /// The raw text of this event (empty for non-character actions).
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The outcome of processing one input event against the current prompt state.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptAction<S, O> {
    /// The keystroke is invalid here; redraw the same state.
    Beep,
    /// The keystroke produced a validation failure; redraw the same state annotated by the message.
    Error(String),
    /// Advance to the next state and redraw.
    NextFrame(S),
    /// Finish the prompt with this value.
    Submit(O),
}

impl<S, O> PromptAction<S, O> {
    /// Whether this action terminates the prompt loop.
    pub fn is_submit(&self) -> bool {
        matches!(self, PromptAction::Submit(_))
    }
}
