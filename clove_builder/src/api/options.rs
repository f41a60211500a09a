use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::api::Finish;
use crate::doc::HelpDoc;
use crate::error::ValidationError;
use crate::matcher::{uncluster, Context, Named, OptionsNode};
use crate::model::{shape_mismatch, CliConfig, Value};
use crate::primitive::{Existence, LocalFileSystem, PathKind, PrimType};

/// A composable description of named options (`--name value`, `-n value`, `--flag`), producing a value of type `A`.
///
/// Options are matched by name anywhere in the token list, so their order on the command line does not matter.
///
/// ### Example
/// ```
/// # use clove_builder as clove;
/// use clove::{CliConfig, Options};
///
/// let options = Options::text("name")
///     .alias("n")
///     .and(Options::integer("times").with_default(1));
///
/// let (leftover, value) = options
///     .validate(&["-n", "Ada", "extra"], &CliConfig::default())
///     .unwrap();
/// assert_eq!(leftover, vec!["extra".to_string()]);
/// assert_eq!(value, ("Ada".to_string(), 1));
/// ```
pub struct Options<A> {
    pub(crate) node: OptionsNode,
    pub(crate) finish: Finish<A>,
}

impl<A> Clone for Options<A> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            finish: Arc::clone(&self.finish),
        }
    }
}

impl<A> Debug for Options<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options").field("node", &self.node).finish()
    }
}

fn leaf<A>(
    node: OptionsNode,
    finish: impl Fn(Value) -> Result<A, String> + Send + Sync + 'static,
) -> Options<A> {
    Options {
        node,
        finish: Arc::new(finish),
    }
}

fn single(name: impl Into<String>, prim: PrimType) -> OptionsNode {
    OptionsNode::Single(Named::new(name), prim)
}

impl Options<()> {
    /// No options at all.
    pub fn none() -> Self {
        leaf(OptionsNode::Empty, |value| match value {
            Value::Unit => Ok(()),
            other => shape_mismatch("unit", &other),
        })
    }
}

impl Options<String> {
    /// A required option taking any text.
    pub fn text(name: impl Into<String>) -> Self {
        leaf(single(name, PrimType::Text), |value| match value {
            Value::Text(text) => Ok(text),
            other => shape_mismatch("text", &other),
        })
    }
}

impl Options<i64> {
    /// A required option taking an integer.
    pub fn integer(name: impl Into<String>) -> Self {
        leaf(single(name, PrimType::Integer), |value| match value {
            Value::Integer(integer) => Ok(integer),
            other => shape_mismatch("integer", &other),
        })
    }
}

impl Options<f64> {
    /// A required option taking a finite float.
    pub fn float(name: impl Into<String>) -> Self {
        leaf(single(name, PrimType::Float), |value| match value {
            Value::Float(float) => Ok(float),
            other => shape_mismatch("float", &other),
        })
    }
}

impl Options<bool> {
    /// A boolean flag: `true` when present, `false` when absent.
    ///
    /// The flag may be followed by an explicit boolean literal, ex: `--verbose false`.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::boolean_with_negation(name, true, Vec::<String>::default())
    }

    /// A boolean flag with negating spellings.
    ///
    /// The flag yields `if_present`; a negation (or the absence of both) yields `!if_present`.
    /// Specifying both the flag and a negation is an error.
    ///
    /// ### Example
    /// ```
    /// # use clove_builder as clove;
    /// use clove::{CliConfig, Options};
    ///
    /// let verbose = Options::boolean_with_negation("verbose", true, ["silent"]);
    /// let config = CliConfig::default();
    ///
    /// assert_eq!(verbose.validate(&["--silent"], &config).unwrap().1, false);
    /// assert!(verbose.validate(&["--silent", "--verbose"], &config).is_err());
    /// ```
    pub fn boolean_with_negation(
        name: impl Into<String>,
        if_present: bool,
        negations: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let node = OptionsNode::Bool {
            named: Named::new(name),
            negations: negations.into_iter().map(Into::into).collect(),
            if_present,
        };
        leaf(node, |value| match value {
            Value::Bool(flag) => Ok(flag),
            other => shape_mismatch("boolean", &other),
        })
    }
}

impl Options<NaiveDate> {
    /// A required option taking an ISO-8601 calendar date (`YYYY-MM-DD`).
    pub fn date(name: impl Into<String>) -> Self {
        leaf(single(name, PrimType::Date), |value| match value {
            Value::Date(date) => Ok(date),
            other => shape_mismatch("date", &other),
        })
    }
}

impl Options<PathBuf> {
    /// A required option naming a regular file.
    pub fn file(name: impl Into<String>, existence: Existence) -> Self {
        Self::path(name, PathKind::File, existence)
    }

    /// A required option naming a directory.
    pub fn directory(name: impl Into<String>, existence: Existence) -> Self {
        Self::path(name, PathKind::Directory, existence)
    }

    fn path(name: impl Into<String>, kind: PathKind, existence: Existence) -> Self {
        leaf(single(name, PrimType::Path(kind, existence)), |value| match value {
            Value::Path(path) => Ok(path),
            other => shape_mismatch("path", &other),
        })
    }
}

impl Options<HashMap<String, String>> {
    /// A repeatable option collecting `key=value` pairs, ex: `-D a=1 b=2 -D c=3`.
    ///
    /// When absent, the map is empty. A key given more than once keeps its last value.
    pub fn key_value_map(name: impl Into<String>) -> Self {
        leaf(OptionsNode::KeyValueMap(Named::new(name)), |value| match value {
            Value::Map(map) => Ok(map),
            other => shape_mismatch("map", &other),
        })
    }
}

impl<A: Clone + Send + Sync + 'static> Options<A> {
    /// A required option taking one of a fixed list of labels, each standing for a value.
    ///
    /// ### Example
    /// ```
    /// # use clove_builder as clove;
    /// use clove::{CliConfig, Options};
    ///
    /// let level = Options::enumeration("level", vec![("low", 1), ("high", 9)]);
    ///
    /// let (_, value) = level.validate(&["--level", "HIGH"], &CliConfig::default()).unwrap();
    /// assert_eq!(value, 9);
    /// ```
    pub fn enumeration(name: impl Into<String>, cases: Vec<(impl Into<String>, A)>) -> Self {
        let (labels, values): (Vec<String>, Vec<A>) = cases
            .into_iter()
            .map(|(label, value)| (label.into(), value))
            .unzip();
        leaf(single(name, PrimType::Enumeration(labels)), move |value| match value {
            Value::Choice(index) => match values.get(index) {
                Some(value) => Ok(value.clone()),
                None => unreachable!("internal error - choice {index} out of range"),
            },
            other => shape_mismatch("choice", &other),
        })
    }
}

impl<A: 'static> Options<A> {
    /// Add another name for this option.
    /// Single character names are spelled `-n`, longer names `--name`.
    ///
    /// Only applies to a single option (possibly made optional or defaulted), not a combination.
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        if let Some(named) = self.node.named_mut() {
            named.names.push(name.into());
        }

        self
    }

    /// Document this option for the help message.
    /// If repeated, only the final description applies.
    pub fn describe(mut self, help: impl Into<String>) -> Self {
        if let Some(named) = self.node.named_mut() {
            named.help.replace(help.into());
        }

        self
    }

    /// Transform the parsed value.
    pub fn map<B: 'static>(self, f: impl Fn(A) -> B + Send + Sync + 'static) -> Options<B> {
        let finish = self.finish;
        Options {
            node: self.node,
            finish: Arc::new(move |value| finish(value).map(&f)),
        }
    }

    /// Transform the parsed value, where the transformation may reject it.
    /// A rejection is reported as an invalid value, described by the error's `Display`.
    ///
    /// ### Example
    /// ```
    /// # use clove_builder as clove;
    /// use clove::{CliConfig, Options};
    ///
    /// let port = Options::integer("port").try_map(|p| {
    ///     u16::try_from(p).map_err(|_| format!("Port {p} is out of range."))
    /// });
    ///
    /// let error = port.validate(&["--port", "70000"], &CliConfig::default()).unwrap_err();
    /// assert_eq!(error.to_string(), "Port 70000 is out of range.");
    /// ```
    pub fn try_map<B: 'static, E: Display>(
        self,
        f: impl Fn(A) -> Result<B, E> + Send + Sync + 'static,
    ) -> Options<B> {
        let finish = self.finish;
        Options {
            node: self.node,
            finish: Arc::new(move |value| {
                finish(value).and_then(|a| f(a).map_err(|e| e.to_string()))
            }),
        }
    }

    /// Make this option optional: `None` when absent.
    /// A present but invalid value is still an error.
    pub fn optional(self) -> Options<Option<A>> {
        let finish = self.finish;
        Options {
            node: OptionsNode::Optional(Box::new(self.node)),
            finish: Arc::new(move |value| match value {
                Value::Absent => Ok(None),
                other => finish(other).map(Some),
            }),
        }
    }

    /// Combine with another set of options; both are required.
    pub fn and<B: 'static>(self, other: Options<B>) -> Options<(A, B)> {
        let left = self.finish;
        let right = other.finish;
        Options {
            node: OptionsNode::Both(Box::new(self.node), Box::new(other.node)),
            finish: Arc::new(move |value| match value {
                Value::Pair(l, r) => Ok((left(*l)?, right(*r)?)),
                other => shape_mismatch("pair", &other),
            }),
        }
    }

    /// Either these options or the `other`, but not both.
    ///
    /// ### Example
    /// ```
    /// # use clove_builder as clove;
    /// use clove::{CliConfig, Options};
    ///
    /// let target = Options::text("host").or_else(Options::integer("pid").map(|p| p.to_string()));
    /// let config = CliConfig::default();
    ///
    /// assert_eq!(target.validate(&["--pid", "7"], &config).unwrap().1, "7");
    /// assert!(target.validate(&["--pid", "7", "--host", "a"], &config).is_err());
    /// ```
    pub fn or_else(self, other: Options<A>) -> Options<A> {
        let left = self.finish;
        let right = other.finish;
        Options {
            node: OptionsNode::OrElse(Box::new(self.node), Box::new(other.node)),
            finish: Arc::new(move |value| match value {
                Value::Left(v) => left(*v),
                Value::Right(v) => right(*v),
                other => shape_mismatch("alternative", &other),
            }),
        }
    }

    /// Validate the tokens, returning those left unconsumed alongside the value.
    pub fn validate(
        &self,
        tokens: &[&str],
        config: &CliConfig,
    ) -> Result<(Vec<String>, A), ValidationError> {
        let tokens: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        let known = self.node.flags();
        let context = Context {
            config,
            file_system: &LocalFileSystem,
            known_flags: &known,
        };
        let (leftover, value) = self.node.validate(&uncluster(&tokens), &context)?;
        let value = (self.finish)(value).map_err(ValidationError::invalid_value)?;
        Ok((leftover, value))
    }

    /// Every flag spelling these options respond to.
    pub fn flags(&self) -> Vec<String> {
        self.node.flags()
    }

    /// The usage fragment, ex: `--name <text> [--verbose]`.
    pub fn usage(&self, config: &CliConfig) -> String {
        self.node.usage(config, false)
    }

    /// The help entries of these options.
    pub fn help_doc(&self, config: &CliConfig) -> HelpDoc {
        let mut entries = Vec::default();
        self.node.help_entries(config, None, &mut entries);
        HelpDoc::DescriptionList(entries)
    }
}

impl<A: Clone + Debug + Send + Sync + 'static> Options<A> {
    /// Substitute `default` when this option is absent.
    /// A present but invalid value is still an error.
    pub fn with_default(self, default: A) -> Options<A> {
        let shown = format!("{default:?}");
        let finish = self.finish;
        Options {
            node: OptionsNode::WithDefault(Box::new(self.node), shown),
            finish: Arc::new(move |value| match value {
                Value::Absent => Ok(default.clone()),
                other => finish(other),
            }),
        }
    }
}
