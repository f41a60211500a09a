use std::rc::Rc;

use crate::api::Command;
use crate::error::ConfigError;
use crate::model::CliConfig;
use crate::parser::{App, ConsoleInterface, UserInterface};
use crate::primitive::LocalFileSystem;

/// The command line program builder.
///
/// ### Example
/// ```
/// # use clove_builder as clove;
/// use clove::{Args, CliApp, Command, Options};
///
/// let command = Command::new("sum", Options::boolean("verbose"), Args::integer("values").repeat())
///     .map(|(verbose, values)| (verbose, values.iter().sum::<i64>()));
/// let app = CliApp::new("sum", "1.0.0", command)
///     .summary("Add up some integers.")
///     .build();
///
/// let total = app.run_tokens(&["1", "2", "3"], |(_, total)| total).unwrap();
/// assert_eq!(total, 6);
/// ```
pub struct CliApp<A> {
    name: String,
    version: String,
    summary: Option<String>,
    command: Command<A>,
    config: CliConfig,
}

impl<A: 'static> CliApp<A> {
    /// Create a command line program from its name, version and root command.
    pub fn new(name: impl Into<String>, version: impl Into<String>, command: Command<A>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            summary: None,
            command,
            config: CliConfig::default(),
        }
    }

    /// Document the program for the help message.
    /// If repeated, only the final summary applies.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary.replace(summary.into());
        self
    }

    /// Set the parsing configuration.
    pub fn config(mut self, config: CliConfig) -> Self {
        self.config = config;
        self
    }

    fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<App<A>, ConfigError> {
        self.command.node.check(&self.config)?;

        Ok(App {
            name: self.name,
            version: self.version,
            summary: self.summary,
            command: self.command,
            config: self.config,
            user_interface,
            file_system: Rc::new(LocalFileSystem),
        })
    }

    /// Build the program as a Result.
    /// This finalizes the configuration and checks for errors (ex: a repeated option name).
    pub fn build_app(self) -> Result<App<A>, ConfigError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Build the program.
    /// This finalizes the configuration and checks for errors (ex: a repeated option name).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> App<A> {
        match self.build_app() {
            Ok(app) => app,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}
