//! Running a command against the process: the app driver, its user interface, and the wizard bridge.
mod interface;
mod middleware;
mod wizard;

pub(crate) use interface::*;
pub use middleware::App;
pub(crate) use wizard::command_wizard;
