pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit.";
pub(crate) const WIZARD_NAME: &str = "wizard";
pub(crate) const WIZARD_MESSAGE: &str = "Build the command interactively.";
pub(crate) const COMPLETIONS_NAME: &str = "completions";
pub(crate) const COMPLETIONS_MESSAGE: &str = "List the flags and commands available at this point.";
pub(crate) const COMPLETION_SCRIPT_NAME: &str = "shell-completion-script";

// Help layout.
pub(crate) const PADDING_WIDTH: usize = 3;
pub(crate) const MAIN_INDENT: usize = 2;
