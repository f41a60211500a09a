//! Builder module for `clove`.
//! See the `clove` crate root for full details.
//!
//! Command line interfaces are described as values: [`Options`] and [`Args`] compose into a [`Command`], commands compose into alternatives and sub-command trees, and a [`CliApp`] runs the result against the process.
//!
//! ### Example
//! ```
//! # use clove_builder as clove;
//! use clove::{Args, CliConfig, Command, CommandDirective, Options};
//!
//! let command = Command::new("greet", Options::boolean("loud").alias("l"), Args::text("name"))
//!     .map(|(loud, name)| if loud { name.to_uppercase() } else { name });
//!
//! let directive = command.parse(&["greet", "-l", "bob"], &CliConfig::default()).unwrap();
//! assert_eq!(
//!     directive,
//!     CommandDirective::UserDefined { leftover: vec![], value: "BOB".to_string() }
//! );
//! ```
#![deny(missing_docs)]
mod api;
mod autocorrect;
mod constant;
mod directive;
mod doc;
mod error;
mod matcher;
mod model;
mod parser;
mod primitive;

pub use api::*;
pub use autocorrect::levenshtein_distance;
pub use directive::{BuiltInOption, CommandDirective};
pub use doc::{HelpDoc, Usage};
pub use error::{ConfigError, ValidationError, ValidationErrorKind};
pub use model::CliConfig;
pub use parser::App;
pub use primitive::{Existence, FileSystem, LocalFileSystem};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
pub(crate) mod test {
    macro_rules! assert_contains {
        ($base:expr, $sub:expr) => {
            assert!(
                $base.contains($sub),
                "'{b}' does not contain '{s}'",
                b = $base,
                s = $sub,
            );
        };
    }

    pub(crate) use assert_contains;
}
