use std::collections::HashSet;

use crate::autocorrect::suggest;
use crate::constant::*;
use crate::directive::{BuiltInOption, CommandDirective};
use crate::doc::{join_fragments, HelpDoc, Usage};
use crate::error::{ConfigError, ValidationError};
use crate::matcher::{flag, is_flag, uncluster, ArgsNode, Context, OptionsNode};
use crate::model::{CliConfig, Value};
use crate::primitive::FileSystem;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CommandNode {
    Single {
        name: String,
        help: Option<String>,
        options: OptionsNode,
        args: ArgsNode,
    },
    OrElse(Box<CommandNode>, Box<CommandNode>),
    Subcommands(Box<CommandNode>, Box<CommandNode>),
}

type Parsed = Result<CommandDirective<Value>, ValidationError>;

fn built_in_flags() -> Vec<String> {
    vec![
        flag(HELP_NAME),
        flag(&HELP_SHORT.to_string()),
        flag(WIZARD_NAME),
        flag(COMPLETIONS_NAME),
        flag(COMPLETION_SCRIPT_NAME),
    ]
}

fn requested(tokens: &[String], flags: &[String], config: &CliConfig) -> bool {
    tokens
        .iter()
        .any(|token| flags.iter().any(|flag| config.matches(flag, token)))
}

fn built_in_entries(config: &CliConfig) -> Vec<(String, HelpDoc)> {
    let help = if config.show_all_names {
        format!("{}, {}", flag(HELP_NAME), flag(&HELP_SHORT.to_string()))
    } else {
        flag(HELP_NAME)
    };

    vec![
        (help, HelpDoc::paragraph(HELP_MESSAGE)),
        (flag(WIZARD_NAME), HelpDoc::paragraph(WIZARD_MESSAGE)),
        (flag(COMPLETIONS_NAME), HelpDoc::paragraph(COMPLETIONS_MESSAGE)),
    ]
}

fn commands_list(alternatives: Vec<&CommandNode>, config: &CliConfig) -> HelpDoc {
    let mut entries = Vec::default();

    for alternative in alternatives {
        let summary = alternative
            .summary()
            .map(HelpDoc::paragraph)
            .unwrap_or_default();

        for (i, line) in alternative.usage(config).lines().iter().enumerate() {
            let description = if i == 0 {
                summary.clone()
            } else {
                HelpDoc::Empty
            };
            entries.push((line.clone(), description));
        }
    }

    HelpDoc::header("COMMANDS").concat(HelpDoc::DescriptionList(entries))
}

impl CommandNode {
    /// The names this command responds to.
    /// Alternatives contribute all of their names; sub-commands respond to their parent's names.
    pub(crate) fn names(&self) -> Vec<String> {
        match self {
            CommandNode::Single { name, .. } => vec![name.clone()],
            CommandNode::OrElse(left, right) => {
                let mut names = left.names();
                names.extend(right.names());
                names
            }
            CommandNode::Subcommands(parent, _) => parent.names(),
        }
    }

    pub(crate) fn summary(&self) -> Option<&str> {
        match self {
            CommandNode::Single { help, .. } => help.as_deref(),
            CommandNode::OrElse(_, _) => None,
            CommandNode::Subcommands(parent, _) => parent.summary(),
        }
    }

    pub(crate) fn help_mut(&mut self) -> &mut Option<String> {
        match self {
            CommandNode::Single { help, .. } => help,
            CommandNode::OrElse(left, _) => left.help_mut(),
            CommandNode::Subcommands(parent, _) => parent.help_mut(),
        }
    }

    /// The flattened alternatives of this command.
    pub(crate) fn alternatives(&self) -> Vec<&CommandNode> {
        match self {
            CommandNode::OrElse(left, right) => {
                let mut alternatives = left.alternatives();
                alternatives.extend(right.alternatives());
                alternatives
            }
            _ => vec![self],
        }
    }

    /// The token every invocation of this command starts with, if there is exactly one.
    pub(crate) fn root_prefix(&self) -> Option<&str> {
        match self {
            CommandNode::Single { name, .. } => Some(name),
            CommandNode::OrElse(_, _) => None,
            CommandNode::Subcommands(parent, _) => parent.root_prefix(),
        }
    }

    /// The command addressed by a path of command names.
    pub(crate) fn locate(&self, path: &[String], config: &CliConfig) -> Option<&CommandNode> {
        match (self, path) {
            (_, []) => None,
            (CommandNode::Single { name, .. }, [head]) if config.matches(name, head) => Some(self),
            (CommandNode::Single { .. }, _) => None,
            (CommandNode::OrElse(left, right), _) => left
                .locate(path, config)
                .or_else(|| right.locate(path, config)),
            (CommandNode::Subcommands(parent, child), [head, tail @ ..]) => {
                parent.locate(&[head.clone()], config)?;

                if tail.is_empty() {
                    Some(self)
                } else {
                    child.locate(tail, config)
                }
            }
        }
    }

    /// Parse the tokens, which start with this command's name.
    pub(crate) fn parse(
        &self,
        tokens: &[String],
        config: &CliConfig,
        file_system: &dyn FileSystem,
    ) -> Parsed {
        match self {
            CommandNode::Single {
                name,
                options,
                args,
                ..
            } => self.parse_single(name, options, args, tokens, config, file_system),
            CommandNode::OrElse(left, right) => match left.parse(tokens, config, file_system) {
                Ok(directive) => Ok(directive.map(|v| Value::Left(Box::new(v)))),
                Err(error) if error.is_recoverable() => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Falling back from {:?} to {:?}.", left.names(), right.names());
                    }

                    match right.parse(tokens, config, file_system) {
                        Ok(directive) => Ok(directive.map(|v| Value::Right(Box::new(v)))),
                        Err(error) if error.is_recoverable() => {
                            Err(ValidationError::command_mismatch(format!(
                                "Unknown command '{}'. Use one of {}.",
                                tokens.first().map(String::as_str).unwrap_or_default(),
                                self.names().join(", ")
                            )))
                        }
                        Err(error) => Err(error),
                    }
                }
                Err(error) => Err(error),
            },
            CommandNode::Subcommands(parent, child) => {
                self.parse_subcommands(parent, child, tokens, config, file_system)
            }
        }
    }

    fn parse_single(
        &self,
        name: &str,
        options: &OptionsNode,
        args: &ArgsNode,
        tokens: &[String],
        config: &CliConfig,
        file_system: &dyn FileSystem,
    ) -> Parsed {
        match tokens.first() {
            Some(head) if config.matches(name, head) => {}
            Some(head) => {
                return Err(ValidationError::command_mismatch(format!(
                    "Expected command '{name}' but found '{head}'."
                )))
            }
            None => {
                return Err(ValidationError::command_mismatch(format!(
                    "Expected command '{name}'."
                )))
            }
        }

        let rest = uncluster(&tokens[1..]);

        if let Some(built_in) = self.requested_built_in(&rest, config) {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Command '{name}' requested built-in {built_in:?}.");
            }
            return Ok(CommandDirective::BuiltIn(built_in));
        }

        let known = options.flags();
        let context = Context {
            config,
            file_system,
            known_flags: &known,
        };
        let (rest, options_value) = options.validate(&rest, &context)?;

        if let Some(token) = rest.iter().find(|t| is_flag(t)) {
            return Err(if context.is_known(token) {
                ValidationError::invalid_value(format!("Unexpected flag '{token}'."))
            } else {
                match suggest(token, known.iter().map(String::as_str), config) {
                    Some(suggestion) => ValidationError::corrected_flag(token, suggestion),
                    None => ValidationError::invalid_value(format!("Unrecognized flag '{token}'.")),
                }
            });
        }

        let (leftover, args_value) = args.validate(&rest, &context)?;

        Ok(CommandDirective::UserDefined {
            leftover,
            value: Value::pair(options_value, args_value),
        })
    }

    fn requested_built_in(&self, rest: &[String], config: &CliConfig) -> Option<BuiltInOption> {
        let help = [flag(HELP_NAME), flag(&HELP_SHORT.to_string())];

        if requested(rest, &help, config) {
            Some(BuiltInOption::ShowHelp {
                usage: self.usage(config),
                help: self.help_doc(config),
            })
        } else if requested(rest, &[flag(WIZARD_NAME)], config) {
            Some(BuiltInOption::Wizard {
                path: self.names(),
                preceding: Vec::default(),
            })
        } else if requested(rest, &[flag(COMPLETIONS_NAME)], config) {
            Some(BuiltInOption::ShowCompletions {
                candidates: self.completions(),
            })
        } else if requested(rest, &[flag(COMPLETION_SCRIPT_NAME)], config) {
            Some(BuiltInOption::ShowCompletionScript)
        } else {
            None
        }
    }

    fn parse_subcommands(
        &self,
        parent: &CommandNode,
        child: &CommandNode,
        tokens: &[String],
        config: &CliConfig,
        file_system: &dyn FileSystem,
    ) -> Parsed {
        let children = child.names();
        // The parent only sees the tokens before the first one naming a child.
        let boundary = tokens
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, token)| !is_flag(token) && children.iter().any(|c| config.matches(c, token)))
            .map(|(i, _)| i)
            .unwrap_or(tokens.len());
        let (head, tail) = tokens.split_at(boundary);

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Sub-command boundary {head:?} | {tail:?}.");
        }

        let (leftover, parent_value) = match parent.parse(head, config, file_system)? {
            CommandDirective::BuiltIn(BuiltInOption::ShowHelp { .. }) => {
                return Ok(CommandDirective::BuiltIn(BuiltInOption::ShowHelp {
                    usage: self.usage(config),
                    help: self.help_doc(config),
                }));
            }
            CommandDirective::BuiltIn(BuiltInOption::ShowCompletions { .. }) => {
                return Ok(CommandDirective::BuiltIn(BuiltInOption::ShowCompletions {
                    candidates: self.completions(),
                }));
            }
            CommandDirective::BuiltIn(built_in) => return Ok(CommandDirective::BuiltIn(built_in)),
            CommandDirective::UserDefined { leftover, value } => (leftover, value),
        };

        let mut remaining = leftover;
        remaining.extend_from_slice(tail);

        if remaining.is_empty() {
            return Ok(CommandDirective::BuiltIn(BuiltInOption::ShowHelp {
                usage: self.usage(config),
                help: self.help_doc(config),
            }));
        }

        match child.parse(&remaining, config, file_system) {
            Ok(CommandDirective::BuiltIn(BuiltInOption::ShowHelp { usage, help })) => {
                Ok(CommandDirective::BuiltIn(BuiltInOption::ShowHelp {
                    usage: usage.prefixed(&parent.usage(config)),
                    help,
                }))
            }
            Ok(CommandDirective::BuiltIn(BuiltInOption::Wizard { path, preceding })) => {
                let mut full = parent.names();
                full.extend(path);
                let mut typed = head.to_vec();
                typed.extend(preceding);
                Ok(CommandDirective::BuiltIn(BuiltInOption::Wizard {
                    path: full,
                    preceding: typed,
                }))
            }
            Ok(directive) => Ok(directive.map(|v| Value::pair(parent_value, v))),
            Err(error) if error.is_recoverable() => Err(ValidationError::invalid_argument(format!(
                "Invalid subcommand for {}. Use one of {}.",
                parent.names().join(", "),
                children.join(", ")
            ))),
            Err(error) => Err(error),
        }
    }

    /// Every way of invoking this command.
    pub(crate) fn usage(&self, config: &CliConfig) -> Usage {
        match self {
            CommandNode::Single {
                name,
                options,
                args,
                ..
            } => Usage::new(vec![join_fragments([
                name.as_str(),
                options.usage(config, false).as_str(),
                args.usage().as_str(),
            ])]),
            CommandNode::OrElse(left, right) => left.usage(config).concat(right.usage(config)),
            CommandNode::Subcommands(parent, child) => {
                child.usage(config).prefixed(&parent.usage(config))
            }
        }
    }

    pub(crate) fn help_doc(&self, config: &CliConfig) -> HelpDoc {
        match self {
            CommandNode::Single {
                help,
                options,
                args,
                ..
            } => {
                let mut doc = help.as_ref().map(HelpDoc::paragraph).unwrap_or_default();
                let mut entries = Vec::default();
                options.help_entries(config, None, &mut entries);
                entries.extend(built_in_entries(config));
                doc = doc
                    .concat(HelpDoc::header("OPTIONS"))
                    .concat(HelpDoc::DescriptionList(entries));

                let mut arguments = Vec::default();
                args.help_entries(config, None, &mut arguments);

                if !arguments.is_empty() {
                    doc = doc
                        .concat(HelpDoc::header("ARGUMENTS"))
                        .concat(HelpDoc::DescriptionList(arguments));
                }

                doc
            }
            CommandNode::OrElse(_, _) => commands_list(self.alternatives(), config),
            CommandNode::Subcommands(parent, child) => parent
                .help_doc(config)
                .concat(commands_list(child.alternatives(), config)),
        }
    }

    /// The flags and child command names which may follow this command.
    pub(crate) fn completions(&self) -> Vec<String> {
        match self {
            CommandNode::Single { options, .. } => options.flags(),
            CommandNode::OrElse(_, _) => self.names(),
            CommandNode::Subcommands(parent, child) => {
                let mut candidates = parent.completions();
                candidates.extend(child.names());
                candidates
            }
        }
    }

    /// Reject command trees which can never parse as intended.
    pub(crate) fn check(&self, config: &CliConfig) -> Result<(), ConfigError> {
        match self {
            CommandNode::Single {
                name,
                options,
                args,
                ..
            } => {
                if name.is_empty() || is_flag(name) {
                    return Err(ConfigError(format!("Invalid command name '{name}'.")));
                }

                let reserved: Vec<String> = built_in_flags().iter().map(|f| config.fold(f)).collect();
                let mut seen = HashSet::new();

                for option in options.flags() {
                    if option.trim_start_matches('-').is_empty() {
                        return Err(ConfigError(format!(
                            "Command '{name}' declares an option with an empty name."
                        )));
                    }

                    let folded = config.fold(&option);

                    if reserved.contains(&folded) {
                        return Err(ConfigError(format!(
                            "Option '{option}' of command '{name}' collides with a built-in flag."
                        )));
                    }

                    if !seen.insert(folded) {
                        return Err(ConfigError(format!(
                            "Command '{name}' declares option '{option}' more than once."
                        )));
                    }
                }

                let mut seen = HashSet::new();

                for argument in args.names() {
                    if !seen.insert(argument.clone()) {
                        return Err(ConfigError(format!(
                            "Command '{name}' declares argument <{argument}> more than once."
                        )));
                    }
                }

                Ok(())
            }
            CommandNode::OrElse(left, right) => {
                left.check(config)?;
                right.check(config)?;
                let mut seen = HashSet::new();

                for name in self.names() {
                    if !seen.insert(config.fold(&name)) {
                        return Err(ConfigError(format!(
                            "Command '{name}' is declared more than once amongst its siblings."
                        )));
                    }
                }

                Ok(())
            }
            CommandNode::Subcommands(parent, child) => {
                parent.check(config)?;
                child.check(config)
            }
        }
    }
}
