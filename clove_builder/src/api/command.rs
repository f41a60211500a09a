use std::fmt::{Debug, Display};
use std::rc::Rc;
use std::sync::Arc;

use clove_prompt::Prompt;

use crate::api::{Args, Finish, Options};
use crate::directive::CommandDirective;
use crate::doc::{HelpDoc, Usage};
use crate::error::ValidationError;
use crate::matcher::CommandNode;
use crate::model::{shape_mismatch, CliConfig, Value};
use crate::parser::command_wizard;
use crate::primitive::{FileSystem, LocalFileSystem};

/// A parseable command: a name, its [`Options`] and its [`Args`], producing a value of type `A`.
///
/// Commands compose into alternatives ([`Command::or_else`]) and sub-command trees ([`Command::subcommands`]).
///
/// ### Example
/// ```
/// # use clove_builder as clove;
/// use clove::{Args, CliConfig, Command, CommandDirective, Options};
///
/// #[derive(Debug, PartialEq)]
/// enum Git {
///     Add(String),
///     RemoteAdd(String, String),
/// }
///
/// let add = Command::new("add", Options::none(), Args::text("file"))
///     .map(|(_, file)| Git::Add(file));
/// let remote = Command::new("remote", Options::none(), Args::none()).subcommands(
///     Command::new("add", Options::none(), Args::text("name").and(Args::text("url")))
///         .map(|(_, (name, url))| Git::RemoteAdd(name, url)),
/// );
/// let git = Command::new("git", Options::boolean("verbose"), Args::none())
///     .subcommands(add.or_else(remote.map(|(_, remote_add)| remote_add)));
///
/// let directive = git
///     .parse(&["git", "remote", "add", "origin", "url"], &CliConfig::default())
///     .unwrap();
/// assert_eq!(
///     directive,
///     CommandDirective::UserDefined {
///         leftover: vec![],
///         value: ((false, ()), Git::RemoteAdd("origin".to_string(), "url".to_string())),
///     }
/// );
/// ```
pub struct Command<A> {
    pub(crate) node: CommandNode,
    pub(crate) finish: Finish<A>,
}

impl<A> Clone for Command<A> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            finish: Arc::clone(&self.finish),
        }
    }
}

impl<A> Debug for Command<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command").field("node", &self.node).finish()
    }
}

impl<O: 'static, G: 'static> Command<(O, G)> {
    /// Create a command from its name, options and arguments.
    pub fn new(name: impl Into<String>, options: Options<O>, args: Args<G>) -> Self {
        let finish_options = options.finish;
        let finish_args = args.finish;
        Command {
            node: CommandNode::Single {
                name: name.into(),
                help: None,
                options: options.node,
                args: args.node,
            },
            finish: Arc::new(move |value| match value {
                Value::Pair(o, g) => Ok((finish_options(*o)?, finish_args(*g)?)),
                other => shape_mismatch("pair", &other),
            }),
        }
    }
}

impl<A: 'static> Command<A> {
    /// Document this command for the help message.
    /// If repeated, only the final help message applies.
    ///
    /// For alternatives this documents the first alternative; for sub-commands, the parent.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.node.help_mut().replace(help.into());
        self
    }

    /// Transform the parsed value.
    pub fn map<B: 'static>(self, f: impl Fn(A) -> B + Send + Sync + 'static) -> Command<B> {
        let finish = self.finish;
        Command {
            node: self.node,
            finish: Arc::new(move |value| finish(value).map(&f)),
        }
    }

    /// Transform the parsed value, where the transformation may reject it.
    /// A rejection is reported as an invalid value, described by the error's `Display`.
    pub fn try_map<B: 'static, E: Display>(
        self,
        f: impl Fn(A) -> Result<B, E> + Send + Sync + 'static,
    ) -> Command<B> {
        let finish = self.finish;
        Command {
            node: self.node,
            finish: Arc::new(move |value| {
                finish(value).and_then(|a| f(a).map_err(|e| e.to_string()))
            }),
        }
    }

    /// This command, or when the tokens name a different command, the `other`.
    ///
    /// Only a command name mismatch falls through to `other`; any other failure is final.
    pub fn or_else(self, other: Command<A>) -> Command<A> {
        let left = self.finish;
        let right = other.finish;
        Command {
            node: CommandNode::OrElse(Box::new(self.node), Box::new(other.node)),
            finish: Arc::new(move |value| match value {
                Value::Left(v) => left(*v),
                Value::Right(v) => right(*v),
                other => shape_mismatch("alternative", &other),
            }),
        }
    }

    /// Nest the `child` command(s) under this one.
    ///
    /// This command only sees the tokens before the first one naming a child.
    /// Invoking this command without a child shows its help.
    pub fn subcommands<B: 'static>(self, child: Command<B>) -> Command<(A, B)> {
        let parent = self.finish;
        let child_finish = child.finish;
        Command {
            node: CommandNode::Subcommands(Box::new(self.node), Box::new(child.node)),
            finish: Arc::new(move |value| match value {
                Value::Pair(p, c) => Ok((parent(*p)?, child_finish(*c)?)),
                other => shape_mismatch("pair", &other),
            }),
        }
    }

    /// The names this command responds to.
    pub fn names(&self) -> Vec<String> {
        self.node.names()
    }

    /// Every way of invoking this command.
    pub fn usage(&self, config: &CliConfig) -> Usage {
        self.node.usage(config)
    }

    /// The help document of this command.
    pub fn help_doc(&self, config: &CliConfig) -> HelpDoc {
        self.node.help_doc(config)
    }

    /// The flags and sub-command names which may follow this command.
    pub fn completions(&self) -> Vec<String> {
        self.node.completions()
    }

    /// An interactive prompt which builds the tokens invoking this command.
    pub fn wizard_prompt(&self, config: &CliConfig) -> Prompt<Vec<String>> {
        command_wizard(&self.node, config, Rc::new(LocalFileSystem))
    }

    /// Parse the tokens, which start with the command name.
    pub fn parse(
        &self,
        tokens: &[&str],
        config: &CliConfig,
    ) -> Result<CommandDirective<A>, ValidationError> {
        self.parse_with(tokens, config, &LocalFileSystem)
    }

    /// Parse the tokens, checking paths against the given file system.
    pub fn parse_with(
        &self,
        tokens: &[&str],
        config: &CliConfig,
        file_system: &dyn FileSystem,
    ) -> Result<CommandDirective<A>, ValidationError> {
        let tokens: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        self.finish_directive(self.node.parse(&tokens, config, file_system)?)
    }

    pub(crate) fn finish_directive(
        &self,
        directive: CommandDirective<Value>,
    ) -> Result<CommandDirective<A>, ValidationError> {
        directive
            .try_map(|value| (self.finish)(value))
            .map_err(ValidationError::invalid_value)
    }
}
