//! The stock prompts: text, numbers, select, confirm and toggle.
mod choice;
mod number;
mod select;
mod text;

pub use number::NumberState;
pub use select::SelectState;
pub use text::TextState;

use crate::action::PromptAction;

const BELL: char = '\u{7}';

// Every stock prompt shares the same frame layout:
//   ? message › body
//   ✔ message · body   (once submitted)
pub(crate) fn frame<S, O>(message: &str, body: &str, action: &PromptAction<S, O>) -> String {
    match action {
        PromptAction::Beep => format!("{BELL}? {message} › {body}"),
        PromptAction::Error(error) => format!("? {message} › {body}\n  {error}"),
        PromptAction::NextFrame(_) => format!("? {message} › {body}"),
        PromptAction::Submit(_) => format!("✔ {message} · {body}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PromptAction::Beep, "\u{7}? msg › body")]
    #[case(PromptAction::Error("bad".to_string()), "? msg › body\n  bad")]
    #[case(PromptAction::NextFrame(()), "? msg › body")]
    #[case(PromptAction::Submit(()), "✔ msg · body")]
    fn frame_layout(#[case] action: PromptAction<(), ()>, #[case] expected: &str) {
        assert_eq!(frame("msg", "body", &action), expected);
    }
}
