use std::fmt::{Debug, Display};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::api::Finish;
use crate::doc::HelpDoc;
use crate::error::ValidationError;
use crate::matcher::{ArgsNode, Context};
use crate::model::{shape_mismatch, CliConfig, Value};
use crate::primitive::{Existence, LocalFileSystem, PathKind, PrimType};

/// A composable description of positional arguments, producing a value of type `A`.
///
/// Arguments are consumed strictly left to right from the tokens which remain after options are matched.
///
/// ### Example
/// ```
/// # use clove_builder as clove;
/// use clove::{Args, CliConfig};
///
/// let args = Args::text("source").and(Args::integer("counts").repeat());
///
/// let (leftover, value) = args.validate(&["a.txt", "1", "2"], &CliConfig::default()).unwrap();
/// assert!(leftover.is_empty());
/// assert_eq!(value, ("a.txt".to_string(), vec![1, 2]));
/// ```
pub struct Args<A> {
    pub(crate) node: ArgsNode,
    pub(crate) finish: Finish<A>,
}

impl<A> Clone for Args<A> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            finish: Arc::clone(&self.finish),
        }
    }
}

impl<A> Debug for Args<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args").field("node", &self.node).finish()
    }
}

fn leaf<A>(
    name: impl Into<String>,
    prim: PrimType,
    finish: impl Fn(Value) -> Result<A, String> + Send + Sync + 'static,
) -> Args<A> {
    Args {
        node: ArgsNode::Single {
            name: name.into(),
            help: None,
            prim,
        },
        finish: Arc::new(finish),
    }
}

impl Args<()> {
    /// No arguments at all.
    pub fn none() -> Self {
        Args {
            node: ArgsNode::Empty,
            finish: Arc::new(|value| match value {
                Value::Unit => Ok(()),
                other => shape_mismatch("unit", &other),
            }),
        }
    }
}

impl Args<String> {
    /// One argument of any text.
    pub fn text(name: impl Into<String>) -> Self {
        leaf(name, PrimType::Text, |value| match value {
            Value::Text(text) => Ok(text),
            other => shape_mismatch("text", &other),
        })
    }
}

impl Args<i64> {
    /// One integer argument.
    pub fn integer(name: impl Into<String>) -> Self {
        leaf(name, PrimType::Integer, |value| match value {
            Value::Integer(integer) => Ok(integer),
            other => shape_mismatch("integer", &other),
        })
    }
}

impl Args<f64> {
    /// One finite float argument.
    pub fn float(name: impl Into<String>) -> Self {
        leaf(name, PrimType::Float, |value| match value {
            Value::Float(float) => Ok(float),
            other => shape_mismatch("float", &other),
        })
    }
}

impl Args<bool> {
    /// One boolean literal argument, ex: `yes`, `off`.
    pub fn boolean(name: impl Into<String>) -> Self {
        leaf(name, PrimType::Bool, |value| match value {
            Value::Bool(flag) => Ok(flag),
            other => shape_mismatch("boolean", &other),
        })
    }
}

impl Args<NaiveDate> {
    /// One ISO-8601 calendar date argument.
    pub fn date(name: impl Into<String>) -> Self {
        leaf(name, PrimType::Date, |value| match value {
            Value::Date(date) => Ok(date),
            other => shape_mismatch("date", &other),
        })
    }
}

impl Args<PathBuf> {
    /// One argument naming a regular file.
    pub fn file(name: impl Into<String>, existence: Existence) -> Self {
        Self::path(name, PathKind::File, existence)
    }

    /// One argument naming a directory.
    pub fn directory(name: impl Into<String>, existence: Existence) -> Self {
        Self::path(name, PathKind::Directory, existence)
    }

    fn path(name: impl Into<String>, kind: PathKind, existence: Existence) -> Self {
        leaf(name, PrimType::Path(kind, existence), |value| match value {
            Value::Path(path) => Ok(path),
            other => shape_mismatch("path", &other),
        })
    }
}

impl<A: Clone + Send + Sync + 'static> Args<A> {
    /// One argument taking one of a fixed list of labels, each standing for a value.
    pub fn enumeration(name: impl Into<String>, cases: Vec<(impl Into<String>, A)>) -> Self {
        let (labels, values): (Vec<String>, Vec<A>) = cases
            .into_iter()
            .map(|(label, value)| (label.into(), value))
            .unzip();
        leaf(name, PrimType::Enumeration(labels), move |value| match value {
            Value::Choice(index) => match values.get(index) {
                Some(value) => Ok(value.clone()),
                None => unreachable!("internal error - choice {index} out of range"),
            },
            other => shape_mismatch("choice", &other),
        })
    }
}

impl<A: 'static> Args<A> {
    /// Document this argument for the help message.
    /// If repeated, only the final description applies.
    pub fn describe(mut self, help: impl Into<String>) -> Self {
        if let Some(slot) = self.node.help_mut() {
            slot.replace(help.into());
        }

        self
    }

    /// Transform the parsed value.
    pub fn map<B: 'static>(self, f: impl Fn(A) -> B + Send + Sync + 'static) -> Args<B> {
        let finish = self.finish;
        Args {
            node: self.node,
            finish: Arc::new(move |value| finish(value).map(&f)),
        }
    }

    /// Transform the parsed value, where the transformation may reject it.
    /// A rejection is reported as an invalid value, described by the error's `Display`.
    pub fn try_map<B: 'static, E: Display>(
        self,
        f: impl Fn(A) -> Result<B, E> + Send + Sync + 'static,
    ) -> Args<B> {
        let finish = self.finish;
        Args {
            node: self.node,
            finish: Arc::new(move |value| {
                finish(value).and_then(|a| f(a).map_err(|e| e.to_string()))
            }),
        }
    }

    /// These arguments followed by the `other` arguments.
    pub fn and<B: 'static>(self, other: Args<B>) -> Args<(A, B)> {
        let left = self.finish;
        let right = other.finish;
        Args {
            node: ArgsNode::Both(Box::new(self.node), Box::new(other.node)),
            finish: Arc::new(move |value| match value {
                Value::Pair(l, r) => Ok((left(*l)?, right(*r)?)),
                other => shape_mismatch("pair", &other),
            }),
        }
    }

    /// Any number of repetitions, including none.
    pub fn repeat(self) -> Args<Vec<A>> {
        self.repetitions(0, None)
    }

    /// At least one repetition.
    pub fn repeat1(self) -> Args<Vec<A>> {
        self.repetitions(1, None)
    }

    /// Between `min` and `max` repetitions, inclusive.
    /// Repetitions beyond `max` are left over.
    ///
    /// ### Example
    /// ```
    /// # use clove_builder as clove;
    /// use clove::{Args, CliConfig};
    ///
    /// let args = Args::integer("n").between(1, 2);
    /// let config = CliConfig::default();
    ///
    /// let (leftover, value) = args.validate(&["1", "2", "3"], &config).unwrap();
    /// assert_eq!(leftover, vec!["3".to_string()]);
    /// assert_eq!(value, vec![1, 2]);
    /// assert!(args.validate(&[], &config).is_err());
    /// ```
    pub fn between(self, min: usize, max: usize) -> Args<Vec<A>> {
        self.repetitions(min, Some(std::cmp::max(min, max)))
    }

    fn repetitions(self, min: usize, max: Option<usize>) -> Args<Vec<A>> {
        let finish = self.finish;
        Args {
            node: ArgsNode::Variadic {
                inner: Box::new(self.node),
                min,
                max,
            },
            finish: Arc::new(move |value| match value {
                Value::List(values) => values.into_iter().map(|v| finish(v)).collect(),
                other => shape_mismatch("list", &other),
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
        let context = Context {
            config,
            file_system: &LocalFileSystem,
            known_flags: &[],
        };
        let (leftover, value) = self.node.validate(&tokens, &context)?;
        let value = (self.finish)(value).map_err(ValidationError::invalid_value)?;
        Ok((leftover, value))
    }

    /// The usage fragment, ex: `<source> [<target>...]`.
    pub fn usage(&self) -> String {
        self.node.usage()
    }

    /// The help entries of these arguments.
    pub fn help_doc(&self, config: &CliConfig) -> HelpDoc {
        let mut entries = Vec::default();
        self.node.help_entries(config, None, &mut entries);
        HelpDoc::DescriptionList(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use crate::test::assert_contains;
    use rstest::rstest;

    #[rstest]
    #[case(vec!["1", "2"], Ok(vec![1, 2]))]
    #[case(vec!["1"], Ok(vec![1]))]
    #[case(vec![], Err("Expected at least 1 value(s) for argument <n> but found 0."))]
    fn repeat1(#[case] tokens: Vec<&str>, #[case] expected: Result<Vec<i64>, &str>) {
        let args = Args::integer("n").repeat1();

        let result = args
            .validate(&tokens, &CliConfig::default())
            .map(|(_, value)| value)
            .map_err(|error| error.to_string());

        assert_eq!(result, expected.map_err(|e| e.to_string()));
    }

    #[test]
    fn missing() {
        let args = Args::text("source").and(Args::text("target"));

        let error = args.validate(&["a"], &CliConfig::default()).unwrap_err();

        assert_eq!(error.kind(), ValidationErrorKind::InvalidArgument);
        assert_eq!(error.to_string(), "Missing argument <target>.");
    }

    #[test]
    fn typed() {
        // Setup
        let args = Args::boolean("flag")
            .and(Args::float("ratio"))
            .and(Args::date("day"))
            .and(Args::enumeration("mode", vec![("fast", 'f'), ("slow", 's')]));

        // Execute
        let (_, (((flag, ratio), day), mode)) = args
            .validate(&["yes", "0.5", "2020-02-02", "slow"], &CliConfig::default())
            .unwrap();

        // Verify
        assert!(flag);
        assert_eq!(ratio, 0.5);
        assert_eq!(day, NaiveDate::from_ymd_opt(2020, 2, 2).unwrap());
        assert_eq!(mode, 's');
    }

    #[test]
    fn try_map() {
        let args = Args::text("word").try_map(|w| {
            if w.chars().all(char::is_alphabetic) {
                Ok(w.to_uppercase())
            } else {
                Err("Only letters please.")
            }
        });
        let config = CliConfig::default();

        assert_eq!(args.validate(&["abc"], &config).unwrap().1, "ABC");
        assert_eq!(
            args.validate(&["a1"], &config).unwrap_err().to_string(),
            "Only letters please."
        );
    }

    #[test]
    fn file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let args = Args::file("input", Existence::MustExist).map(|p| p.is_absolute());

        let (_, absolute) = args.validate(&[&path], &CliConfig::default()).unwrap();

        assert_eq!(absolute, file.path().is_absolute());
    }

    #[test]
    fn help_doc() {
        let args = Args::text("source")
            .describe("Where to copy from.")
            .and(Args::text("targets").describe("Where to copy to.").repeat());

        let text = args.help_doc(&CliConfig::default()).to_plaintext(None);

        assert_eq!(args.usage(), "<source> [<targets>...]");
        assert_contains!(text, "<source> text");
        assert_contains!(text, "Where to copy to. Accepts any number of values.");
    }
}
