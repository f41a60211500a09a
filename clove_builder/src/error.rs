use thiserror::Error;

use crate::doc::HelpDoc;

/// The classification of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// A value was present but invalid, or two options collided.
    InvalidValue,
    /// A required option or argument was absent.
    MissingValue,
    /// The leading token did not name the command.
    CommandMismatch,
    /// The positional arguments (or sub-command) did not fit.
    InvalidArgument,
    /// An unrecognized flag, along with the known flag it most likely means.
    CorrectedFlag,
}

/// A failure to validate the input tokens against a command.
///
/// Only [`ValidationErrorKind::CommandMismatch`] is recoverable: alternative commands catch it and try their next sibling.
/// Every other kind aborts parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", plaintext(.help))]
pub struct ValidationError {
    kind: ValidationErrorKind,
    help: HelpDoc,
}

fn plaintext(help: &HelpDoc) -> String {
    help.to_plaintext(None)
}

impl ValidationError {
    /// Create a validation error.
    pub fn new(kind: ValidationErrorKind, help: HelpDoc) -> Self {
        Self { kind, help }
    }

    pub(crate) fn invalid_value(message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::InvalidValue, HelpDoc::paragraph(message))
    }

    pub(crate) fn missing_value(message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::MissingValue, HelpDoc::paragraph(message))
    }

    pub(crate) fn command_mismatch(message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::CommandMismatch, HelpDoc::paragraph(message))
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::InvalidArgument, HelpDoc::paragraph(message))
    }

    pub(crate) fn corrected_flag(given: &str, suggestion: &str) -> Self {
        Self::new(
            ValidationErrorKind::CorrectedFlag,
            HelpDoc::paragraph(format!(
                "The flag '{given}' is not recognized. Did you mean '{suggestion}'?"
            )),
        )
    }

    /// The classification of this error.
    pub fn kind(&self) -> ValidationErrorKind {
        self.kind
    }

    /// The description of this error.
    pub fn help(&self) -> &HelpDoc {
        &self.help
    }

    /// Whether an alternative command may recover from this error.
    pub fn is_recoverable(&self) -> bool {
        self.kind == ValidationErrorKind::CommandMismatch
    }

    /// Aggregate two simultaneous failures into one report.
    ///
    /// The help documents are sequenced.
    /// The aggregate is only a [`ValidationErrorKind::MissingValue`] when both failures are; otherwise it takes the first other kind.
    pub fn concat(self, other: ValidationError) -> Self {
        let kind = if self.kind == ValidationErrorKind::MissingValue {
            other.kind
        } else {
            self.kind
        };

        Self {
            kind,
            help: self.help.concat(other.help),
        }
    }
}

/// A mistake in how the command line interface was put together.
///
/// Detected when building the app, before any tokens are parsed.
#[derive(Debug, Error)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);
