use clove_prompt::{Prompt, PromptError};

use crate::doc::terminal_width;

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, message: String);
    fn width(&self) -> Option<usize>;
    fn run_prompt(&self, prompt: Prompt<Vec<String>>) -> Result<Vec<String>, PromptError>;
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, message: String) {
        eprintln!("{message}");
    }

    fn width(&self) -> Option<usize> {
        terminal_width()
    }

    fn run_prompt(&self, prompt: Prompt<Vec<String>>) -> Result<Vec<String>, PromptError> {
        prompt.run_interactive()
    }
}
