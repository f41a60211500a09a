use crate::doc::{HelpDoc, Usage};

/// An action the library performs on behalf of the command, rather than handing control to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuiltInOption {
    /// Print the usage synopsis and help document of the addressed command.
    ShowHelp {
        /// The ways of invoking the addressed command, prefixed by its parents.
        usage: Usage,
        /// The help document of the addressed command.
        help: HelpDoc,
    },
    /// Print the flags and sub-command names available at the addressed command.
    ShowCompletions {
        /// The candidate tokens.
        candidates: Vec<String>,
    },
    /// Print a shell completion script.
    ShowCompletionScript,
    /// Interactively build the tokens for the addressed command.
    Wizard {
        /// The command names leading to the addressed command, starting at the root.
        path: Vec<String>,
        /// The tokens already typed for the addressed command's parents, starting at the root.
        preceding: Vec<String>,
    },
}

/// The outcome of successfully parsing tokens against a [`Command`](crate::Command).
///
/// ### Example
/// ```
/// # use clove_builder as clove;
/// use clove::{Args, BuiltInOption, CliConfig, Command, CommandDirective, Options};
///
/// let command = Command::new("sum", Options::none(), Args::integer("n").repeat());
/// let config = CliConfig::default();
///
/// let directive = command.parse(&["sum", "1", "2"], &config).unwrap();
/// assert_eq!(
///     directive,
///     CommandDirective::UserDefined { leftover: vec![], value: ((), vec![1, 2]) }
/// );
///
/// let directive = command.parse(&["sum", "--completions"], &config).unwrap();
/// assert!(matches!(directive, CommandDirective::BuiltIn(BuiltInOption::ShowCompletions { .. })));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CommandDirective<A> {
    /// The tokens requested a built-in action.
    BuiltIn(BuiltInOption),
    /// The tokens validated into the command's value.
    UserDefined {
        /// The tokens no part of the command consumed.
        leftover: Vec<String>,
        /// The parsed value.
        value: A,
    },
}

impl<A> CommandDirective<A> {
    /// Transform the user defined value, passing built-in directives through unchanged.
    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> CommandDirective<B> {
        match self {
            CommandDirective::BuiltIn(built_in) => CommandDirective::BuiltIn(built_in),
            CommandDirective::UserDefined { leftover, value } => CommandDirective::UserDefined {
                leftover,
                value: f(value),
            },
        }
    }

    pub(crate) fn try_map<B, E>(
        self,
        f: impl FnOnce(A) -> Result<B, E>,
    ) -> Result<CommandDirective<B>, E> {
        Ok(match self {
            CommandDirective::BuiltIn(built_in) => CommandDirective::BuiltIn(built_in),
            CommandDirective::UserDefined { leftover, value } => CommandDirective::UserDefined {
                leftover,
                value: f(value)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_user_defined() {
        let directive = CommandDirective::UserDefined {
            leftover: vec!["x".to_string()],
            value: 2,
        };

        assert_eq!(
            directive.map(|v| v * 10),
            CommandDirective::UserDefined {
                leftover: vec!["x".to_string()],
                value: 20,
            }
        );
    }

    #[test]
    fn map_built_in() {
        let directive: CommandDirective<i32> =
            CommandDirective::BuiltIn(BuiltInOption::ShowCompletionScript);

        let result: Result<CommandDirective<i32>, String> =
            directive.try_map(|_| Err("unused".to_string()));

        assert_eq!(
            result.unwrap(),
            CommandDirective::BuiltIn(BuiltInOption::ShowCompletionScript)
        );
    }
}
