use crate::doc::HelpDoc;
use crate::error::{ValidationError, ValidationErrorKind};
use crate::matcher::{is_flag, without, Context};
use crate::model::{CliConfig, Value};
use crate::primitive::PrimType;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ArgsNode {
    Empty,
    Single {
        name: String,
        help: Option<String>,
        prim: PrimType,
    },
    Both(Box<ArgsNode>, Box<ArgsNode>),
    Variadic {
        inner: Box<ArgsNode>,
        min: usize,
        max: Option<usize>,
    },
}

type Validated = Result<(Vec<String>, Value), ValidationError>;

impl ArgsNode {
    pub(crate) fn help_mut(&mut self) -> Option<&mut Option<String>> {
        match self {
            ArgsNode::Single { help, .. } => Some(help),
            ArgsNode::Variadic { inner, .. } => inner.help_mut(),
            ArgsNode::Empty | ArgsNode::Both(_, _) => None,
        }
    }

    /// The argument names of this tree, in positional order.
    pub(crate) fn names(&self) -> Vec<String> {
        match self {
            ArgsNode::Empty => Vec::default(),
            ArgsNode::Single { name, .. } => vec![name.clone()],
            ArgsNode::Both(left, right) => {
                let mut names = left.names();
                names.extend(right.names());
                names
            }
            ArgsNode::Variadic { inner, .. } => inner.names(),
        }
    }

    pub(crate) fn validate(&self, tokens: &[String], context: &Context) -> Validated {
        match self {
            ArgsNode::Empty => Ok((tokens.to_vec(), Value::Unit)),
            ArgsNode::Single { name, prim, .. } => {
                match tokens.iter().position(|t| !is_flag(t)) {
                    Some(i) => {
                        let value = prim
                            .validate(Some(&tokens[i]), &context.prim())
                            .map_err(ValidationError::invalid_value)?;
                        Ok((without(tokens, &[i]), value))
                    }
                    None => Err(ValidationError::invalid_argument(format!(
                        "Missing argument <{name}>."
                    ))),
                }
            }
            ArgsNode::Both(left, right) => {
                let (rest, left_value) = left.validate(tokens, context)?;
                let (rest, right_value) = right.validate(&rest, context)?;
                Ok((rest, Value::pair(left_value, right_value)))
            }
            ArgsNode::Variadic { inner, min, max } => {
                let mut rest = tokens.to_vec();
                let mut values = Vec::default();

                while max.map_or(true, |max| values.len() < max) {
                    match inner.validate(&rest, context) {
                        // Stop once the repetition no longer consumes anything.
                        Ok((next, _)) if next.len() == rest.len() => break,
                        Ok((next, value)) => {
                            rest = next;
                            values.push(value);
                        }
                        Err(error) if error.kind() == ValidationErrorKind::InvalidArgument => break,
                        Err(error) => return Err(error),
                    }
                }

                if values.len() < *min {
                    return Err(ValidationError::invalid_argument(format!(
                        "Expected at least {min} value(s) for argument <{}> but found {}.",
                        inner.names().join(" "),
                        values.len()
                    )));
                }

                Ok((rest, Value::List(values)))
            }
        }
    }

    /// The usage fragment, ex: `<source> [<target>...]`.
    pub(crate) fn usage(&self) -> String {
        match self {
            ArgsNode::Empty => String::default(),
            ArgsNode::Single { name, .. } => format!("<{name}>"),
            ArgsNode::Both(left, right) => [left.usage(), right.usage()]
                .into_iter()
                .filter(|u| !u.is_empty())
                .collect::<Vec<String>>()
                .join(" "),
            ArgsNode::Variadic { inner, min, .. } => {
                if *min == 0 {
                    format!("[{}...]", inner.usage())
                } else {
                    format!("{}...", inner.usage())
                }
            }
        }
    }

    pub(crate) fn help_entries(
        &self,
        config: &CliConfig,
        note: Option<String>,
        out: &mut Vec<(String, HelpDoc)>,
    ) {
        match self {
            ArgsNode::Empty => {}
            ArgsNode::Single { name, help, prim } => {
                let term = if config.show_types {
                    format!("<{name}> {}", prim.placeholder())
                } else {
                    format!("<{name}>")
                };
                let mut doc = match help {
                    Some(help) => HelpDoc::paragraph(help),
                    None => HelpDoc::Empty,
                };

                if let Some(note) = note {
                    doc = doc.concat(HelpDoc::paragraph(note));
                }

                out.push((term, doc));
            }
            ArgsNode::Both(left, right) => {
                left.help_entries(config, None, out);
                right.help_entries(config, None, out);
            }
            ArgsNode::Variadic { inner, min, max } => {
                let note = match (min, max) {
                    (0, None) => "Accepts any number of values.".to_string(),
                    (min, None) => format!("Accepts at least {min} value(s)."),
                    (min, Some(max)) => format!("Accepts between {min} and {max} values."),
                };
                inner.help_entries(config, Some(note), out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::tokens;
    use crate::primitive::LocalFileSystem;
    use rstest::rstest;

    fn single(name: &str, prim: PrimType) -> ArgsNode {
        ArgsNode::Single {
            name: name.to_string(),
            help: None,
            prim,
        }
    }

    fn variadic(inner: ArgsNode, min: usize, max: Option<usize>) -> ArgsNode {
        ArgsNode::Variadic {
            inner: Box::new(inner),
            min,
            max,
        }
    }

    fn run(node: &ArgsNode, input: &[&str]) -> Validated {
        let config = CliConfig::default();
        let context = Context {
            config: &config,
            file_system: &LocalFileSystem,
            known_flags: &[],
        };
        node.validate(&tokens(input), &context)
    }

    #[test]
    fn positional_order() {
        // Setup
        let node = ArgsNode::Both(
            Box::new(single("x", PrimType::Integer)),
            Box::new(single("y", PrimType::Text)),
        );

        // Execute
        let (rest, value) = run(&node, &["1", "b", "c"]).unwrap();

        // Verify
        assert_eq!(rest, tokens(&["c"]));
        assert_eq!(
            value,
            Value::pair(Value::Integer(1), Value::Text("b".to_string()))
        );
    }

    #[test]
    fn missing() {
        let node = single("source", PrimType::Text);

        let error = run(&node, &[]).unwrap_err();

        assert_eq!(error.kind(), ValidationErrorKind::InvalidArgument);
        assert_eq!(error.to_string(), "Missing argument <source>.");
    }

    #[test]
    fn invalid_primitive() {
        let node = single("count", PrimType::Integer);

        let error = run(&node, &["x"]).unwrap_err();

        assert_eq!(error.kind(), ValidationErrorKind::InvalidValue);
        assert_eq!(error.to_string(), "'x' is not an integer.");
    }

    #[rstest]
    #[case(0, None, &[], Ok(0))]
    #[case(0, None, &["1", "2", "3"], Ok(3))]
    #[case(1, None, &["1"], Ok(1))]
    #[case(0, Some(2), &["1", "2", "3"], Ok(2))]
    #[case(1, None, &[], Err("Expected at least 1 value(s) for argument <n> but found 0."))]
    #[case(3, Some(4), &["1", "2"], Err("Expected at least 3 value(s) for argument <n> but found 2."))]
    #[case(0, None, &["1", "x"], Err("'x' is not an integer."))]
    fn repetition(
        #[case] min: usize,
        #[case] max: Option<usize>,
        #[case] input: &[&str],
        #[case] expected: Result<usize, &str>,
    ) {
        let node = variadic(single("n", PrimType::Integer), min, max);

        let result = run(&node, input);

        match expected {
            Ok(count) => {
                let (rest, value) = result.unwrap();
                assert_eq!(rest.len(), input.len() - count);
                assert_matches!(value, Value::List(values) if values.len() == count);
            }
            Err(message) => assert_eq!(result.unwrap_err().to_string(), message),
        }
    }

    #[test]
    fn repetition_of_nothing() {
        let node = variadic(ArgsNode::Empty, 0, None);

        let (rest, value) = run(&node, &["a"]).unwrap();

        assert_eq!(rest, tokens(&["a"]));
        assert_eq!(value, Value::List(vec![]));
    }

    #[test]
    fn usage() {
        let node = ArgsNode::Both(
            Box::new(single("source", PrimType::Text)),
            Box::new(ArgsNode::Both(
                Box::new(variadic(single("extra", PrimType::Text), 1, None)),
                Box::new(variadic(single("rest", PrimType::Text), 0, None)),
            )),
        );

        assert_eq!(node.usage(), "<source> <extra>... [<rest>...]");
        assert_eq!(node.names(), vec!["source", "extra", "rest"]);
    }

    #[test]
    fn help_entries() {
        // Setup
        let mut node = variadic(single("n", PrimType::Integer), 1, Some(3));
        *node.help_mut().unwrap() = Some("Numbers to sum.".to_string());
        let mut entries = Vec::default();

        // Execute
        node.help_entries(&CliConfig::default(), None, &mut entries);

        // Verify
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "<n> integer");
        assert_eq!(
            entries[0].1.paragraphs(),
            vec!["Numbers to sum.", "Accepts between 1 and 3 values."]
        );
    }
}
