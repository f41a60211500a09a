//! `clove` is a declarative, composable command line parser for Rust.
//!
//! Command line interfaces are built out of plain values rather than mutable builders or macros:
//! * *Composable*:
//! [`Options`] and [`Args`] are small values combined with `and`, `or_else`, `map` and friends.
//! A [`Command`] pairs a name with its options and arguments, and commands combine into alternatives and sub-command trees.
//! * *Type safe*:
//! Every combinator carries the type of the value it produces, so a successful parse hands the program a fully typed value.
//! * *Pure*:
//! Parsing is a function of the tokens and an explicit [`CliConfig`]; nothing is mutated and nothing is global.
//! * *Detailed yet basic UX*:
//! Help, usage synopses and error messages are generated from the same tree that parses.
//! Mistyped flags are corrected (ex: "Did you mean '--verbose'?"), and `--wizard` builds a command interactively.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/calculator.rs")]
//! ```
//!
//! ```console
//! $ calculator --help
//! calculator 0.3.1
//!
//! A tiny calculator.
//!
//! USAGE
//!   calculator [--verbose] add <values>...
//!   calculator [--verbose] neg <value>
//! <truncated>
//!
//! $ calculator add 1 2 3
//! 6
//!
//! $ calculator --verbos add 1
//! The flag '--verbos' is not recognized. Did you mean '--verbose'?
//! ```
//!
//! # Options
//! Options are named, and may appear anywhere amongst the command's tokens.
//! * [`Options::text`], [`Options::integer`], [`Options::float`], [`Options::date`], [`Options::file`], [`Options::directory`] and [`Options::enumeration`] take one value (`--name value` or `--name=value`).
//! * [`Options::boolean`] is a flag, optionally followed by a boolean literal; [`Options::boolean_with_negation`] adds spellings which mean the opposite.
//! * [`Options::key_value_map`] collects `key=value` pairs across repeated occurrences.
//! * Single character names are short flags (`-v`), and clustered short flags (`-abc`) are split apart.
//!
//! An option is required unless it is made [`Options::optional`] or given a default via [`Options::with_default`].
//!
//! # Arguments
//! Arguments are positional, consumed left to right from the tokens the options leave behind.
//! Repetition is expressed with [`Args::repeat`], [`Args::repeat1`] and [`Args::between`].
//!
//! # Commands
//! * [`Command::or_else`] tries the next command when the tokens name a different one.
//! * [`Command::subcommands`] nests commands: the parent sees the tokens before the first child name, and the child sees the rest.
//!
//! Every command responds to the built-in flags `--help`/`-h`, `--wizard` and `--completions`.
//!
//! # Prompts
//! The interactive [`prompt`] engine behind `--wizard` is available directly.
//! ```no_run
//! use clove::prompt::Prompt;
//!
//! let remote = Prompt::text("Remote name")
//!     .and_then(|name| Prompt::confirm("Fetch now?", true).map(move |fetch| (name, fetch)))
//!     .run_interactive()
//!     .unwrap();
//! ```
#![deny(missing_docs)]
pub use clove_builder::*;
pub use clove_prompt as prompt;
