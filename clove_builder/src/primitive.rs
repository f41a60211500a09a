use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::model::{CliConfig, Value};

const TRUTHY: [&str; 5] = ["true", "1", "y", "yes", "on"];
const FALSY: [&str; 5] = ["false", "0", "n", "no", "off"];

/// The file system collaborator of the path validators.
pub trait FileSystem {
    /// Whether anything exists at `path`.
    fn path_exists(&self, path: &Path) -> bool;

    /// Whether `path` is a regular file.
    fn is_regular_file(&self, path: &Path) -> bool;

    /// Whether `path` is a directory.
    fn is_directory(&self, path: &Path) -> bool;
}

/// The [`FileSystem`] of the running process.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_regular_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Whether a path option or argument must (or must not) already exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Existence {
    /// The path must exist.
    #[default]
    MustExist,
    /// Nothing may exist at the path yet.
    MustNotExist,
    /// The path may or may not exist.
    Either,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathKind {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PrimType {
    Text,
    Integer,
    Float,
    Bool,
    Date,
    Path(PathKind, Existence),
    Enumeration(Vec<String>),
}

pub(crate) struct PrimContext<'c> {
    pub(crate) config: &'c CliConfig,
    pub(crate) file_system: &'c dyn FileSystem,
}

impl PrimType {
    /// The name shown as the value placeholder in usage and help.
    pub(crate) fn placeholder(&self) -> String {
        match self {
            PrimType::Text => "text".to_string(),
            PrimType::Integer => "integer".to_string(),
            PrimType::Float => "float".to_string(),
            PrimType::Bool => "boolean".to_string(),
            PrimType::Date => "date".to_string(),
            PrimType::Path(PathKind::File, _) => "file".to_string(),
            PrimType::Path(PathKind::Directory, _) => "directory".to_string(),
            PrimType::Enumeration(cases) => cases.join("|"),
        }
    }

    fn title(&self) -> &'static str {
        match self {
            PrimType::Text => "Text",
            PrimType::Integer => "Integer",
            PrimType::Float => "Float",
            PrimType::Bool => "Boolean",
            PrimType::Date => "Date",
            PrimType::Path(PathKind::File, _) => "File",
            PrimType::Path(PathKind::Directory, _) => "Directory",
            PrimType::Enumeration(_) => "Enumeration",
        }
    }

    pub(crate) fn validate(&self, raw: Option<&str>, context: &PrimContext) -> Result<Value, String> {
        let raw = match raw {
            Some(raw) => raw,
            None => {
                return Err(format!(
                    "{} options do not have a default value.",
                    self.title()
                ))
            }
        };

        match self {
            PrimType::Text => Ok(Value::Text(raw.to_string())),
            PrimType::Integer => raw
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| format!("'{raw}' is not an integer.")),
            PrimType::Float => match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Value::Float(value)),
                _ => Err(format!("'{raw}' is not a float.")),
            },
            PrimType::Bool => parse_bool(raw).map(Value::Bool),
            PrimType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|_| format!("'{raw}' is not a date.")),
            PrimType::Path(kind, existence) => {
                validate_path(raw, *kind, *existence, context.file_system).map(Value::Path)
            }
            PrimType::Enumeration(cases) => cases
                .iter()
                .position(|case| context.config.matches(case, raw))
                .map(Value::Choice)
                .ok_or_else(|| {
                    format!(
                        "Expected one of the following cases: {}.",
                        cases.join(", ")
                    )
                }),
        }
    }
}

pub(crate) fn parse_bool(raw: &str) -> Result<bool, String> {
    let lowered = raw.to_lowercase();

    if TRUTHY.contains(&lowered.as_str()) {
        Ok(true)
    } else if FALSY.contains(&lowered.as_str()) {
        Ok(false)
    } else {
        Err(format!("'{raw}' was not recognized as a valid boolean."))
    }
}

fn validate_path(
    raw: &str,
    kind: PathKind,
    existence: Existence,
    file_system: &dyn FileSystem,
) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);

    if file_system.path_exists(&path) {
        if existence == Existence::MustNotExist {
            return Err(format!("Path '{raw}' must not exist."));
        }

        match kind {
            PathKind::File if !file_system.is_regular_file(&path) => {
                return Err(format!("Expected path '{raw}' to be a regular file."));
            }
            PathKind::Directory if !file_system.is_directory(&path) => {
                return Err(format!("Expected path '{raw}' to be a directory."));
            }
            _ => {}
        }
    } else if existence == Existence::MustExist {
        return Err(format!("Path '{raw}' must exist."));
    }

    Ok(path)
}
