use std::rc::Rc;

use crate::action::{Action, PromptAction, UserInput};
use crate::builtin::frame;
use crate::engine::Prompt;

/// The state of a [`Prompt::select`] prompt: the highlighted choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectState {
    cursor: usize,
}

impl SelectState {
    /// The index of the highlighted choice.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl<T: Clone + 'static> Prompt<T> {
    /// Prompt to pick one of `choices` (label, value) with the up/down keys.
    /// The cursor wraps around at both ends.
    ///
    /// ### Example
    /// ```no_run
    /// use clove_prompt::Prompt;
    ///
    /// let level: u8 = Prompt::select("Level", vec![("low", 1), ("high", 9)])
    ///     .run_interactive()
    ///     .unwrap();
    /// ```
    pub fn select(message: impl Into<String>, choices: Vec<(impl Into<String>, T)>) -> Self {
        let message = message.into();
        let choices: Rc<Vec<(String, T)>> = Rc::new(
            choices
                .into_iter()
                .map(|(label, value)| (label.into(), value))
                .collect(),
        );
        let labels: Vec<String> = choices.iter().map(|(label, _)| label.clone()).collect();

        Prompt::custom(
            SelectState::default(),
            move |state, action| render(&message, &labels, state, action),
            move |input, state| process(input, state, &choices),
        )
    }
}

fn render<T>(
    message: &str,
    labels: &[String],
    state: &SelectState,
    action: &PromptAction<SelectState, T>,
) -> String {
    let current = labels.get(state.cursor).map(String::as_str).unwrap_or("");

    if action.is_submit() {
        return frame(message, current, action);
    }

    let mut out = frame(message, "", action);

    for (i, label) in labels.iter().enumerate() {
        let marker = if i == state.cursor { "›" } else { " " };
        out.push_str(&format!("\n{marker} {label}"));
    }

    out
}

pub(crate) fn process<T: Clone>(
    input: &UserInput,
    state: &SelectState,
    choices: &[(String, T)],
) -> PromptAction<SelectState, T> {
    if choices.is_empty() {
        return PromptAction::Beep;
    }

    let last = choices.len() - 1;

    match input.kind() {
        Action::CursorUp => PromptAction::NextFrame(SelectState {
            cursor: if state.cursor == 0 {
                last
            } else {
                state.cursor - 1
            },
        }),
        Action::CursorDown | Action::Tab => PromptAction::NextFrame(SelectState {
            cursor: if state.cursor >= last {
                0
            } else {
                state.cursor + 1
            },
        }),
        Action::Submit => PromptAction::Submit(choices[state.cursor].1.clone()),
        _ => PromptAction::Beep,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripted::ScriptedTerminal;
    use rstest::rstest;

    fn choices() -> Vec<(String, char)> {
        vec![
            ("a".to_string(), 'a'),
            ("b".to_string(), 'b'),
            ("c".to_string(), 'c'),
        ]
    }

    #[rstest]
    #[case(0, Action::CursorUp, 2)]
    #[case(2, Action::CursorUp, 1)]
    #[case(0, Action::CursorDown, 1)]
    #[case(2, Action::CursorDown, 0)]
    #[case(2, Action::Tab, 0)]
    fn cursor_wraps(#[case] cursor: usize, #[case] action: Action, #[case] expected: usize) {
        let next = process(
            &UserInput::action(action),
            &SelectState { cursor },
            &choices(),
        );
        assert_eq!(next, PromptAction::NextFrame(SelectState { cursor: expected }));
    }

    #[test]
    fn no_choices_beeps() {
        let next = process::<u8>(
            &UserInput::action(Action::Submit),
            &SelectState::default(),
            &[],
        );
        assert_eq!(next, PromptAction::Beep);
    }

    #[test]
    fn select_run() {
        let mut terminal = ScriptedTerminal::new(vec![
            UserInput::action(Action::CursorDown),
            UserInput::character('x'),
            UserInput::action(Action::Submit),
        ]);

        let value = Prompt::select("Pick", choices()).run(&mut terminal).unwrap();

        assert_eq!(value, 'b');
        assert_eq!(terminal.frames()[0], "? Pick › \n› a\n  b\n  c");
        assert_eq!(terminal.frames()[1], "? Pick › \n  a\n› b\n  c");
        assert_eq!(terminal.last_frame(), Some("✔ Pick · b"));
    }
}
