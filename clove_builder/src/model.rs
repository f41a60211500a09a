use std::collections::HashMap;
use std::path::PathBuf;

use chrono::NaiveDate;

/// The parsing configuration, threaded explicitly through every validation.
///
/// ### Example
/// ```
/// # use clove_builder as clove;
/// use clove::CliConfig;
///
/// let config = CliConfig {
///     case_sensitive: true,
///     ..CliConfig::default()
/// };
/// assert_eq!(config.auto_correct_limit, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Whether flag names, command names and enumeration cases must match by case.
    pub case_sensitive: bool,
    /// The largest edit distance at which an unrecognized flag is corrected to a known one.
    pub auto_correct_limit: usize,
    /// Whether help lists every alias of an option, rather than only its primary name.
    pub show_all_names: bool,
    /// Whether help shows the value type of each option and argument.
    pub show_types: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            auto_correct_limit: 2,
            show_all_names: true,
            show_types: true,
        }
    }
}

impl CliConfig {
    /// Set whether names and cases must match by case.
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Set the largest edit distance at which unrecognized flags are corrected.
    /// Zero disables correction.
    pub fn with_auto_correct_limit(mut self, limit: usize) -> Self {
        self.auto_correct_limit = limit;
        self
    }

    /// Set whether help lists every alias of an option.
    pub fn with_show_all_names(mut self, show_all_names: bool) -> Self {
        self.show_all_names = show_all_names;
        self
    }

    /// Set whether help shows value types.
    pub fn with_show_types(mut self, show_types: bool) -> Self {
        self.show_types = show_types;
        self
    }

    pub(crate) fn fold(&self, value: &str) -> String {
        if self.case_sensitive {
            value.to_string()
        } else {
            value.to_lowercase()
        }
    }

    pub(crate) fn matches(&self, a: &str, b: &str) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a.to_lowercase() == b.to_lowercase()
        }
    }
}

// The untyped result of validating a node tree.
// The typed wrappers (`Options`, `Args`, `Command`) finish it into their user type.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Unit,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    Path(PathBuf),
    Choice(usize),
    Pair(Box<Value>, Box<Value>),
    Left(Box<Value>),
    Right(Box<Value>),
    Absent,
    Map(HashMap<String, String>),
    List(Vec<Value>),
}

impl Value {
    pub(crate) fn pair(left: Value, right: Value) -> Self {
        Value::Pair(Box::new(left), Box::new(right))
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Date(_) => "date",
            Value::Path(_) => "path",
            Value::Choice(_) => "choice",
            Value::Pair(_, _) => "pair",
            Value::Left(_) => "left",
            Value::Right(_) => "right",
            Value::Absent => "absent",
            Value::Map(_) => "map",
            Value::List(_) => "list",
        }
    }
}

// The finishing closures only ever see the shape their own node produced.
pub(crate) fn shape_mismatch(expected: &str, value: &Value) -> ! {
    unreachable!(
        "internal error - expected a {expected} value but found {}",
        value.kind()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(false, "Verbose", "verbose", true)]
    #[case(false, "VERBOSE", "vErBoSe", true)]
    #[case(true, "Verbose", "verbose", false)]
    #[case(true, "verbose", "verbose", true)]
    #[case(false, "verbose", "verbos", false)]
    fn matches(#[case] case_sensitive: bool, #[case] a: &str, #[case] b: &str, #[case] expected: bool) {
        let config = CliConfig {
            case_sensitive,
            ..CliConfig::default()
        };
        assert_eq!(config.matches(a, b), expected);
        assert_eq!(config.fold(a) == config.fold(b), expected);
    }

    #[test]
    fn setters() {
        let config = CliConfig::default()
            .with_case_sensitive(true)
            .with_auto_correct_limit(0)
            .with_show_all_names(false)
            .with_show_types(false);

        assert_eq!(
            config,
            CliConfig {
                case_sensitive: true,
                auto_correct_limit: 0,
                show_all_names: false,
                show_types: false,
            }
        );
    }
}
