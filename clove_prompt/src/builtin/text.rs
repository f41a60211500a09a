use crate::action::{Action, PromptAction, UserInput};
use crate::builtin::frame;
use crate::engine::Prompt;

/// The state of a [`Prompt::text`] prompt: the buffered characters and the cursor within them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextState {
    value: Vec<char>,
    cursor: usize,
}

impl TextState {
    /// A state holding `value`, with the cursor at its end.
    pub fn new(value: &str) -> Self {
        let value: Vec<char> = value.chars().collect();
        let cursor = value.len();
        Self { value, cursor }
    }

    /// The buffered text.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// The cursor position, counted in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn with(&self, value: Vec<char>, cursor: usize) -> Self {
        Self { value, cursor }
    }
}

type Validator = Box<dyn Fn(&str) -> Result<(), String>>;

impl Prompt<String> {
    /// Prompt for a line of free text.
    pub fn text(message: impl Into<String>) -> Self {
        Self::text_validated(message, |_| Ok(()))
    }

    /// Prompt for a line of text, which must satisfy `validate` before it can be submitted.
    ///
    /// ### Example
    /// ```no_run
    /// use clove_prompt::Prompt;
    ///
    /// let prompt = Prompt::text_validated("Branch", |value| {
    ///     if value.contains(' ') {
    ///         Err("Branch names cannot contain spaces.".to_string())
    ///     } else {
    ///         Ok(())
    ///     }
    /// });
    /// ```
    pub fn text_validated(
        message: impl Into<String>,
        validate: impl Fn(&str) -> Result<(), String> + 'static,
    ) -> Self {
        let message = message.into();
        let validate: Validator = Box::new(validate);
        Prompt::custom(
            TextState::default(),
            move |state, action| frame(&message, &state.value(), action),
            move |input, state| process(input, state, validate.as_ref()),
        )
    }
}

pub(crate) fn process(
    input: &UserInput,
    state: &TextState,
    validate: &dyn Fn(&str) -> Result<(), String>,
) -> PromptAction<TextState, String> {
    let TextState { value, cursor } = state;
    let cursor = *cursor;

    match input.kind() {
        Action::Character => {
            let typed: Vec<char> = input.value().chars().collect();
            let mut next = value.clone();
            next.splice(cursor..cursor, typed.iter().copied());
            PromptAction::NextFrame(state.with(next, cursor + typed.len()))
        }
        Action::Backspace if cursor > 0 => {
            let mut next = value.clone();
            next.remove(cursor - 1);
            PromptAction::NextFrame(state.with(next, cursor - 1))
        }
        Action::Delete if cursor < value.len() => {
            let mut next = value.clone();
            next.remove(cursor);
            PromptAction::NextFrame(state.with(next, cursor))
        }
        Action::CursorLeft if cursor > 0 => {
            PromptAction::NextFrame(state.with(value.clone(), cursor - 1))
        }
        Action::CursorRight if cursor < value.len() => {
            PromptAction::NextFrame(state.with(value.clone(), cursor + 1))
        }
        Action::Home => PromptAction::NextFrame(state.with(value.clone(), 0)),
        Action::End => PromptAction::NextFrame(state.with(value.clone(), value.len())),
        Action::Submit => {
            let text = state.value();
            match validate(&text) {
                Ok(()) => PromptAction::Submit(text),
                Err(message) => PromptAction::Error(message),
            }
        }
        _ => PromptAction::Beep,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripted::ScriptedTerminal;
    use rstest::rstest;

    fn accept(_: &str) -> Result<(), String> {
        Ok(())
    }

    #[test]
    fn typed_then_submit() {
        let mut inputs = UserInput::keystrokes("hi");
        inputs.push(UserInput::action(Action::Submit));
        let mut terminal = ScriptedTerminal::new(inputs);

        let value = Prompt::text("Say").run(&mut terminal).unwrap();

        assert_eq!(value, "hi");
        assert_eq!(
            terminal.frames(),
            &["? Say › ", "? Say › h", "? Say › hi", "✔ Say · hi"]
        );
    }

    #[test]
    fn backspace_empty_beeps() {
        let state = TextState::default();

        let action = process(&UserInput::action(Action::Backspace), &state, &accept);

        assert_eq!(action, PromptAction::Beep);
    }

    #[rstest]
    #[case("abc", 3, Action::Backspace, "ab", 2)]
    #[case("abc", 1, Action::Backspace, "bc", 0)]
    #[case("abc", 1, Action::Delete, "ac", 1)]
    #[case("abc", 3, Action::CursorLeft, "abc", 2)]
    #[case("abc", 1, Action::CursorRight, "abc", 2)]
    #[case("abc", 2, Action::Home, "abc", 0)]
    #[case("abc", 0, Action::End, "abc", 3)]
    fn editing(
        #[case] value: &str,
        #[case] cursor: usize,
        #[case] action: Action,
        #[case] expected_value: &str,
        #[case] expected_cursor: usize,
    ) {
        let state = TextState {
            value: value.chars().collect(),
            cursor,
        };

        let next = process(&UserInput::action(action), &state, &accept);

        assert_eq!(
            next,
            PromptAction::NextFrame(TextState {
                value: expected_value.chars().collect(),
                cursor: expected_cursor,
            })
        );
    }

    #[rstest]
    #[case(0, Action::CursorLeft)]
    #[case(3, Action::CursorRight)]
    #[case(3, Action::Delete)]
    #[case(1, Action::CursorUp)]
    #[case(1, Action::Tab)]
    fn editing_beeps(#[case] cursor: usize, #[case] action: Action) {
        let state = TextState {
            value: "abc".chars().collect(),
            cursor,
        };

        let next = process(&UserInput::action(action), &state, &accept);

        assert_eq!(next, PromptAction::Beep);
    }

    #[test]
    fn insert_mid_cursor() {
        let state = TextState {
            value: "ac".chars().collect(),
            cursor: 1,
        };

        let next = process(&UserInput::character('ß'), &state, &accept);

        assert_eq!(
            next,
            PromptAction::NextFrame(TextState {
                value: "aßc".chars().collect(),
                cursor: 2,
            })
        );
    }

    #[test]
    fn validation_error() {
        let mut inputs = vec![UserInput::action(Action::Submit)];
        inputs.extend(UserInput::keystrokes("x"));
        inputs.push(UserInput::action(Action::Submit));
        let mut terminal = ScriptedTerminal::new(inputs);
        let prompt = Prompt::text_validated("Name", |value| {
            if value.is_empty() {
                Err("A name is required.".to_string())
            } else {
                Ok(())
            }
        });

        let value = prompt.run(&mut terminal).unwrap();

        assert_eq!(value, "x");
        assert_eq!(terminal.frames()[1], "? Name › \n  A name is required.");
    }
}
