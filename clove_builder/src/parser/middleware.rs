use std::env;
use std::rc::Rc;

use crate::api::Command;
use crate::constant::*;
use crate::directive::{BuiltInOption, CommandDirective};
use crate::doc::{join_fragments, HelpDoc, Usage};
use crate::error::ValidationError;
use crate::matcher::flag;
use crate::model::CliConfig;
use crate::parser::{command_wizard, UserInterface};
use crate::primitive::FileSystem;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A built command line program, ready to parse.
///
/// Built from a [`CliApp`](crate::CliApp).
pub struct App<A> {
    pub(crate) name: String,
    pub(crate) version: String,
    pub(crate) summary: Option<String>,
    pub(crate) command: Command<A>,
    pub(crate) config: CliConfig,
    pub(crate) user_interface: Box<dyn UserInterface>,
    pub(crate) file_system: Rc<dyn FileSystem>,
}

enum Outcome<A> {
    Value(A),
    Exit(i32),
}

impl<A: 'static> App<A> {
    /// Run the program against the input tokens, excluding the program name.
    ///
    /// On a successful parse the `handler` receives the parsed value, and its result is returned.
    ///
    /// If at any point parsing fails (ex: an unknown flag, a missing value, extra arguments), the error is displayed and this returns `Err(1)`.
    ///
    /// If help (`-h` or `--help`) or completions (`--completions`) are requested, they are displayed and this returns `Err(0)`.
    ///
    /// If the wizard (`--wizard`) is requested, the tokens are built interactively, echoed, and then parsed as if they had been typed.
    pub fn run_tokens<R>(&self, tokens: &[&str], handler: impl FnOnce(A) -> R) -> Result<R, i32> {
        let tokens: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();

        match self.dispatch(&tokens, true) {
            Outcome::Value(value) => Ok(handler(value)),
            Outcome::Exit(code) => Err(code),
        }
    }

    /// Run the program against the Cli [`env::args`].
    ///
    /// If parsing does not complete with a value for the `handler` (error, help, etc), the process exits with the corresponding code (via `std::process::exit`).
    pub fn run<R>(&self, handler: impl FnOnce(A) -> R) -> R {
        let command_input: Vec<String> = env::args().skip(1).collect();

        match self.run_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
            handler,
        ) {
            Ok(value) => value,
            Err(exit_code) => std::process::exit(exit_code),
        }
    }

    fn dispatch(&self, tokens: &[String], allow_wizard: bool) -> Outcome<A> {
        let tokens = self.prefixed(tokens);
        let token_refs: Vec<&str> = tokens.iter().map(String::as_str).collect();

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Dispatching {token_refs:?}.");
        }

        let directive = match self.root_built_in(&tokens) {
            Some(built_in) => CommandDirective::BuiltIn(built_in),
            None => match self.command.parse_with(
                &token_refs,
                &self.config,
                self.file_system.as_ref(),
            ) {
                Ok(directive) => directive,
                Err(error) => return self.fail(error),
            },
        };

        match directive {
            CommandDirective::UserDefined { leftover, value } => {
                if leftover.is_empty() {
                    Outcome::Value(value)
                } else {
                    self.user_interface
                        .print_error(format!("Unexpected arguments: {}", leftover.join(" ")));
                    Outcome::Exit(1)
                }
            }
            CommandDirective::BuiltIn(BuiltInOption::ShowHelp { usage, help }) => {
                self.user_interface.print(self.help_message(usage, help));
                Outcome::Exit(0)
            }
            CommandDirective::BuiltIn(BuiltInOption::ShowCompletions { candidates }) => {
                self.user_interface.print(candidates.join("\n"));
                Outcome::Exit(0)
            }
            CommandDirective::BuiltIn(BuiltInOption::ShowCompletionScript) => {
                self.user_interface
                    .print_error("Shell completion scripts are not supported.".to_string());
                Outcome::Exit(1)
            }
            CommandDirective::BuiltIn(BuiltInOption::Wizard { path, preceding }) if allow_wizard => {
                self.wizard(&path, preceding)
            }
            CommandDirective::BuiltIn(BuiltInOption::Wizard { .. }) => {
                self.user_interface
                    .print_error("The wizard cannot be requested from within the wizard.".to_string());
                Outcome::Exit(1)
            }
        }
    }

    // Commands with a single root name are invoked without it; alternatives at the root are invoked by name.
    fn prefixed(&self, tokens: &[String]) -> Vec<String> {
        match self.command.node.root_prefix() {
            Some(prefix) => {
                let mut prefixed = vec![prefix.to_string()];
                prefixed.extend_from_slice(tokens);
                prefixed
            }
            None => tokens.to_vec(),
        }
    }

    // Without a root prefix nothing names the whole command, so the app answers bare built-in requests itself.
    fn root_built_in(&self, tokens: &[String]) -> Option<BuiltInOption> {
        let node = &self.command.node;

        if node.root_prefix().is_some() {
            return None;
        }

        let head = match tokens.first() {
            Some(head) => head,
            None => {
                return Some(BuiltInOption::ShowHelp {
                    usage: node.usage(&self.config),
                    help: node.help_doc(&self.config),
                })
            }
        };
        let is = |name: &str| self.config.matches(&flag(name), head);

        if is(HELP_NAME) || is(&HELP_SHORT.to_string()) {
            Some(BuiltInOption::ShowHelp {
                usage: node.usage(&self.config),
                help: node.help_doc(&self.config),
            })
        } else if is(WIZARD_NAME) {
            Some(BuiltInOption::Wizard {
                path: vec![],
                preceding: vec![],
            })
        } else if is(COMPLETIONS_NAME) {
            Some(BuiltInOption::ShowCompletions {
                candidates: node.completions(),
            })
        } else {
            None
        }
    }

    fn wizard(&self, path: &[String], preceding: Vec<String>) -> Outcome<A> {
        let node = if path.is_empty() {
            &self.command.node
        } else {
            match self.command.node.locate(path, &self.config) {
                Some(node) => node,
                None => {
                    unreachable!("internal error - wizard path {path:?} must address a command")
                }
            }
        };

        let built = match self
            .user_interface
            .run_prompt(command_wizard(
                node,
                &self.config,
                Rc::clone(&self.file_system),
            ))
        {
            Ok(built) => built,
            Err(error) => {
                self.user_interface.print_error(error.to_string());
                return Outcome::Exit(1);
            }
        };

        let mut tokens = preceding;
        tokens.extend(built);

        // The echo (and the re-dispatch) is the invocation without the root prefix.
        let tokens = match self.command.node.root_prefix() {
            Some(_) if !tokens.is_empty() => tokens[1..].to_vec(),
            _ => tokens,
        };
        self.user_interface.print(join_fragments(
            std::iter::once(self.name.as_str()).chain(tokens.iter().map(String::as_str)),
        ));

        self.dispatch(&tokens, false)
    }

    fn fail(&self, error: ValidationError) -> Outcome<A> {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Parse failed with {:?}.", error.kind());
        }

        self.user_interface
            .print_error(error.help().to_plaintext(self.user_interface.width()));
        Outcome::Exit(1)
    }

    fn help_message(&self, usage: Usage, help: HelpDoc) -> String {
        let mut doc = HelpDoc::paragraph(format!("{} {}", self.name, self.version));

        if let Some(summary) = &self.summary {
            doc = doc.concat(HelpDoc::paragraph(summary));
        }

        let synopses = usage
            .lines()
            .iter()
            .map(|line| (self.invocation(line), HelpDoc::Empty))
            .collect();

        doc.concat(HelpDoc::header("USAGE"))
            .concat(HelpDoc::DescriptionList(synopses))
            .concat(help)
            .to_plaintext(self.user_interface.width())
    }

    // Synopses are shown as the program is invoked: the program name standing in for the root prefix.
    fn invocation(&self, line: &str) -> String {
        match self.command.node.root_prefix() {
            Some(prefix) => match line.strip_prefix(prefix) {
                Some(rest) => format!("{}{rest}", self.name),
                None => line.to_string(),
            },
            None => format!("{} {line}", self.name),
        }
    }
}
