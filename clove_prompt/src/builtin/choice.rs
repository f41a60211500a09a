use crate::action::{Action, PromptAction, UserInput};
use crate::builtin::frame;
use crate::engine::Prompt;

impl Prompt<bool> {
    /// Prompt for a yes/no answer.
    /// `y`/`n` submit immediately; the arrow keys flip the answer and enter submits it.
    pub fn confirm(message: impl Into<String>, default: bool) -> Self {
        let message = format!(
            "{} {}",
            message.into(),
            if default { "(Y/n)" } else { "(y/N)" }
        );
        Prompt::custom(
            default,
            move |state: &bool, action| {
                let answer = match action {
                    PromptAction::Submit(value) => *value,
                    _ => *state,
                };
                frame(&message, if answer { "yes" } else { "no" }, action)
            },
            process_confirm,
        )
    }

    /// Prompt to switch between two labelled states, `active` (true) and `inactive` (false).
    pub fn toggle(
        message: impl Into<String>,
        initial: bool,
        active: impl Into<String>,
        inactive: impl Into<String>,
    ) -> Self {
        let message = message.into();
        let active = active.into();
        let inactive = inactive.into();
        Prompt::custom(
            initial,
            move |state: &bool, action| {
                let body = if let PromptAction::Submit(value) = action {
                    if *value { active.clone() } else { inactive.clone() }
                } else if *state {
                    format!("[{active}] / {inactive}")
                } else {
                    format!("{active} / [{inactive}]")
                };
                frame(&message, &body, action)
            },
            process_toggle,
        )
    }
}

pub(crate) fn process_confirm(input: &UserInput, state: &bool) -> PromptAction<bool, bool> {
    match input.kind() {
        Action::Character => match input.value() {
            "y" | "Y" => PromptAction::Submit(true),
            "n" | "N" => PromptAction::Submit(false),
            _ => PromptAction::Beep,
        },
        Action::CursorLeft
        | Action::CursorRight
        | Action::CursorUp
        | Action::CursorDown
        | Action::Tab => PromptAction::NextFrame(!state),
        Action::Submit => PromptAction::Submit(*state),
        _ => PromptAction::Beep,
    }
}

pub(crate) fn process_toggle(input: &UserInput, state: &bool) -> PromptAction<bool, bool> {
    match input.kind() {
        Action::CursorLeft => PromptAction::NextFrame(true),
        Action::CursorRight => PromptAction::NextFrame(false),
        Action::CursorUp | Action::CursorDown | Action::Tab => PromptAction::NextFrame(!state),
        Action::Character if input.value() == " " => PromptAction::NextFrame(!state),
        Action::Submit => PromptAction::Submit(*state),
        _ => PromptAction::Beep,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripted::ScriptedTerminal;
    use rstest::rstest;

    #[rstest]
    #[case(UserInput::character('y'), false, PromptAction::Submit(true))]
    #[case(UserInput::character('N'), true, PromptAction::Submit(false))]
    #[case(UserInput::character('q'), true, PromptAction::Beep)]
    #[case(UserInput::action(Action::CursorLeft), true, PromptAction::NextFrame(false))]
    #[case(UserInput::action(Action::Submit), true, PromptAction::Submit(true))]
    #[case(UserInput::action(Action::Backspace), true, PromptAction::Beep)]
    fn confirm_keys(
        #[case] input: UserInput,
        #[case] state: bool,
        #[case] expected: PromptAction<bool, bool>,
    ) {
        assert_eq!(process_confirm(&input, &state), expected);
    }

    #[rstest]
    #[case(UserInput::action(Action::CursorLeft), false, PromptAction::NextFrame(true))]
    #[case(UserInput::action(Action::CursorRight), true, PromptAction::NextFrame(false))]
    #[case(UserInput::action(Action::Tab), true, PromptAction::NextFrame(false))]
    #[case(UserInput::character(' '), false, PromptAction::NextFrame(true))]
    #[case(UserInput::character('x'), false, PromptAction::Beep)]
    fn toggle_keys(
        #[case] input: UserInput,
        #[case] state: bool,
        #[case] expected: PromptAction<bool, bool>,
    ) {
        assert_eq!(process_toggle(&input, &state), expected);
    }

    #[test]
    fn confirm_run() {
        let mut terminal = ScriptedTerminal::new(vec![UserInput::character('n')]);

        let value = Prompt::confirm("Continue?", true)
            .run(&mut terminal)
            .unwrap();

        assert!(!value);
        assert_eq!(
            terminal.frames(),
            &["? Continue? (Y/n) › yes", "✔ Continue? (Y/n) · no"]
        );
    }

    #[test]
    fn toggle_run() {
        let mut terminal = ScriptedTerminal::new(vec![
            UserInput::action(Action::CursorRight),
            UserInput::action(Action::Submit),
        ]);

        let value = Prompt::toggle("Mode", true, "on", "off")
            .run(&mut terminal)
            .unwrap();

        assert!(!value);
        assert_eq!(
            terminal.frames(),
            &["? Mode › [on] / off", "? Mode › on / [off]", "✔ Mode · off"]
        );
    }
}
