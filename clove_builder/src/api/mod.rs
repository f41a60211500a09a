mod args;
mod command;
mod core;
mod options;

pub use self::core::CliApp;
pub use args::Args;
pub use command::Command;
pub use options::Options;

use std::sync::Arc;

use crate::model::Value;

// Turns the untyped value of a node into the user's type.
// An `Err` is a user-supplied conversion failure, reported as an invalid value.
pub(crate) type Finish<A> = Arc<dyn Fn(Value) -> Result<A, String> + Send + Sync>;
