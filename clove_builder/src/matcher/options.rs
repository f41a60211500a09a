use std::collections::HashMap;

use crate::autocorrect::suggest;
use crate::doc::HelpDoc;
use crate::error::{ValidationError, ValidationErrorKind};
use crate::matcher::{flag, is_flag, positions, quoted_list, without, Context};
use crate::model::{CliConfig, Value};
use crate::primitive::{parse_bool, PrimType};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The names (primary first) and description of one option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Named {
    pub(crate) names: Vec<String>,
    pub(crate) help: Option<String>,
}

impl Named {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
            help: None,
        }
    }

    pub(crate) fn flags(&self) -> Vec<String> {
        self.names.iter().map(|n| flag(n)).collect()
    }

    pub(crate) fn primary(&self) -> String {
        // Prefer the long form, falling back to the first declared name.
        self.names
            .iter()
            .find(|n| n.chars().count() > 1)
            .or(self.names.first())
            .map(|n| flag(n))
            .unwrap_or_default()
    }

    fn term(&self, config: &CliConfig) -> String {
        if config.show_all_names {
            let primary = self.primary();
            let mut flags = vec![primary.clone()];
            flags.extend(self.flags().into_iter().filter(|f| f != &primary));
            flags.join(", ")
        } else {
            self.primary()
        }
    }

    fn description(&self) -> HelpDoc {
        match &self.help {
            Some(help) => HelpDoc::paragraph(help),
            None => HelpDoc::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum OptionsNode {
    Empty,
    Single(Named, PrimType),
    Bool {
        named: Named,
        negations: Vec<String>,
        if_present: bool,
    },
    KeyValueMap(Named),
    Both(Box<OptionsNode>, Box<OptionsNode>),
    OrElse(Box<OptionsNode>, Box<OptionsNode>),
    Optional(Box<OptionsNode>),
    // The default is carried by the typed api; the node only keeps its rendering for help.
    WithDefault(Box<OptionsNode>, String),
}

type Validated = Result<(Vec<String>, Value), ValidationError>;

impl OptionsNode {
    /// The named option which `alias` and `describe` apply to.
    pub(crate) fn named_mut(&mut self) -> Option<&mut Named> {
        match self {
            OptionsNode::Single(named, _)
            | OptionsNode::Bool { named, .. }
            | OptionsNode::KeyValueMap(named) => Some(named),
            OptionsNode::Optional(inner) | OptionsNode::WithDefault(inner, _) => inner.named_mut(),
            OptionsNode::Empty | OptionsNode::Both(_, _) | OptionsNode::OrElse(_, _) => None,
        }
    }

    /// Every flag spelling this tree responds to.
    pub(crate) fn flags(&self) -> Vec<String> {
        match self {
            OptionsNode::Empty => Vec::default(),
            OptionsNode::Single(named, _) | OptionsNode::KeyValueMap(named) => named.flags(),
            OptionsNode::Bool {
                named, negations, ..
            } => {
                let mut flags = named.flags();
                flags.extend(negations.iter().map(|n| flag(n)));
                flags
            }
            OptionsNode::Both(left, right) | OptionsNode::OrElse(left, right) => {
                let mut flags = left.flags();
                flags.extend(right.flags());
                flags
            }
            OptionsNode::Optional(inner) | OptionsNode::WithDefault(inner, _) => inner.flags(),
        }
    }

    /// The primary flag of every option in this tree.
    pub(crate) fn primary_flags(&self) -> Vec<String> {
        match self {
            OptionsNode::Empty => Vec::default(),
            OptionsNode::Single(named, _)
            | OptionsNode::Bool { named, .. }
            | OptionsNode::KeyValueMap(named) => vec![named.primary()],
            OptionsNode::Both(left, right) | OptionsNode::OrElse(left, right) => {
                let mut flags = left.primary_flags();
                flags.extend(right.primary_flags());
                flags
            }
            OptionsNode::Optional(inner) | OptionsNode::WithDefault(inner, _) => {
                inner.primary_flags()
            }
        }
    }

    pub(crate) fn validate(&self, tokens: &[String], context: &Context) -> Validated {
        match self {
            OptionsNode::Empty => Ok((tokens.to_vec(), Value::Unit)),
            OptionsNode::Single(named, prim) => validate_single(named, prim, tokens, context),
            OptionsNode::Bool {
                named,
                negations,
                if_present,
            } => validate_bool(named, negations, *if_present, tokens, context),
            OptionsNode::KeyValueMap(named) => validate_key_value_map(named, tokens, context),
            OptionsNode::Both(left, right) => match left.validate(tokens, context) {
                Ok((rest, left_value)) => {
                    let (rest, right_value) = right.validate(&rest, context)?;
                    Ok((rest, Value::pair(left_value, right_value)))
                }
                // Report the right side's failure too, when there is one.
                Err(error) => match right.validate(tokens, context) {
                    Ok(_) => Err(error),
                    Err(other) => Err(error.concat(other)),
                },
            },
            OptionsNode::OrElse(left, right) => self.validate_or_else(left, right, tokens, context),
            OptionsNode::Optional(inner) | OptionsNode::WithDefault(inner, _) => {
                match inner.validate(tokens, context) {
                    Err(error) if error.kind() == ValidationErrorKind::MissingValue => {
                        #[cfg(feature = "tracing_debug")]
                        {
                            debug!("Options {:?} absent, substituting.", inner.primary_flags());
                        }
                        Ok((tokens.to_vec(), Value::Absent))
                    }
                    result => result,
                }
            }
        }
    }

    fn validate_or_else(
        &self,
        left: &OptionsNode,
        right: &OptionsNode,
        tokens: &[String],
        context: &Context,
    ) -> Validated {
        let matched = |rest: &Vec<String>| rest.len() < tokens.len();

        match (left.validate(tokens, context), right.validate(tokens, context)) {
            (Ok((left_rest, left_value)), Ok((right_rest, right_value))) => {
                match (matched(&left_rest), matched(&right_rest)) {
                    (true, true) => Err(collision(&self.primary_flags())),
                    (false, true) => Ok((right_rest, Value::Right(Box::new(right_value)))),
                    _ => Ok((left_rest, Value::Left(Box::new(left_value)))),
                }
            }
            (Ok((rest, value)), Err(error)) => {
                let referenced = !positions(tokens, &right.flags(), context.config).is_empty();
                self.one_side(error, referenced, matched(&rest))?;
                Ok((rest, Value::Left(Box::new(value))))
            }
            (Err(error), Ok((rest, value))) => {
                let referenced = !positions(tokens, &left.flags(), context.config).is_empty();
                self.one_side(error, referenced, matched(&rest))?;
                Ok((rest, Value::Right(Box::new(value))))
            }
            (Err(left_error), Err(right_error)) => {
                let kind = if left_error.kind() == ValidationErrorKind::MissingValue
                    && right_error.kind() == ValidationErrorKind::MissingValue
                {
                    ValidationErrorKind::MissingValue
                } else {
                    ValidationErrorKind::InvalidValue
                };
                Err(ValidationError::new(
                    kind,
                    left_error.help().clone().concat(right_error.help().clone()),
                ))
            }
        }
    }

    // One side of an alternation succeeded while the other failed.
    // The failure only matters when its side was actually referenced.
    fn one_side(
        &self,
        error: ValidationError,
        referenced: bool,
        matched: bool,
    ) -> Result<(), ValidationError> {
        if error.kind() == ValidationErrorKind::MissingValue || !referenced {
            Ok(())
        } else if matched {
            Err(collision(&self.primary_flags()))
        } else {
            Err(error)
        }
    }

    /// The usage fragment, ex: `--name <text> [--verbose]`.
    pub(crate) fn usage(&self, config: &CliConfig, optional: bool) -> String {
        let bracket = |text: String, optional: bool| {
            if optional {
                format!("[{text}]")
            } else {
                text
            }
        };

        match self {
            OptionsNode::Empty => String::default(),
            OptionsNode::Single(named, prim) => {
                let placeholder = if config.show_types {
                    prim.placeholder()
                } else {
                    "value".to_string()
                };
                bracket(format!("{} <{placeholder}>", named.primary()), optional)
            }
            OptionsNode::Bool {
                named, negations, ..
            } => {
                let mut spellings = vec![named.primary()];
                spellings.extend(negations.iter().map(|n| flag(n)));
                format!("[{}]", spellings.join(" | "))
            }
            OptionsNode::KeyValueMap(named) => format!("[{} <key=value>...]", named.primary()),
            OptionsNode::Both(left, right) => {
                let inner = [left.usage(config, false), right.usage(config, false)]
                    .into_iter()
                    .filter(|u| !u.is_empty())
                    .collect::<Vec<String>>()
                    .join(" ");
                if inner.is_empty() {
                    inner
                } else {
                    bracket(inner, optional)
                }
            }
            OptionsNode::OrElse(left, right) => {
                let inner = format!(
                    "{} | {}",
                    left.usage(config, false),
                    right.usage(config, false)
                );
                if optional {
                    format!("[{inner}]")
                } else {
                    format!("({inner})")
                }
            }
            OptionsNode::Optional(inner) | OptionsNode::WithDefault(inner, _) => {
                inner.usage(config, true)
            }
        }
    }

    /// One `(term, description)` entry per option, for the help description list.
    pub(crate) fn help_entries(
        &self,
        config: &CliConfig,
        note: Option<&str>,
        out: &mut Vec<(String, HelpDoc)>,
    ) {
        let with_note = |doc: HelpDoc| match note {
            Some(note) => doc.concat(HelpDoc::paragraph(note)),
            None => doc,
        };

        match self {
            OptionsNode::Empty => {}
            OptionsNode::Single(named, prim) => {
                let term = if config.show_types {
                    format!("{} <{}>", named.term(config), prim.placeholder())
                } else {
                    named.term(config)
                };
                out.push((term, with_note(named.description())));
            }
            OptionsNode::Bool {
                named, negations, ..
            } => {
                out.push((named.term(config), with_note(named.description())));

                if !negations.is_empty() {
                    let term = negations
                        .iter()
                        .map(|n| flag(n))
                        .collect::<Vec<String>>()
                        .join(", ");
                    out.push((
                        term,
                        HelpDoc::paragraph(format!("Negates '{}'.", named.primary())),
                    ));
                }
            }
            OptionsNode::KeyValueMap(named) => {
                let term = format!("{} <key=value>...", named.term(config));
                out.push((
                    term,
                    with_note(named.description()).concat(HelpDoc::paragraph("May be repeated.")),
                ));
            }
            OptionsNode::Both(left, right) => {
                left.help_entries(config, note, out);
                right.help_entries(config, note, out);
            }
            OptionsNode::OrElse(left, right) => {
                let note = format!(
                    "Mutually exclusive with {}.",
                    quoted_list(&right.primary_flags())
                );
                left.help_entries(config, Some(&note), out);
                let note = format!(
                    "Mutually exclusive with {}.",
                    quoted_list(&left.primary_flags())
                );
                right.help_entries(config, Some(&note), out);
            }
            OptionsNode::Optional(inner) => {
                inner.help_entries(config, Some("This setting is optional."), out);
            }
            OptionsNode::WithDefault(inner, shown) => {
                let note = format!("This setting is optional. Default: {shown}.");
                inner.help_entries(config, Some(&note), out);
            }
        }
    }
}

fn collision(flags: &[String]) -> ValidationError {
    ValidationError::invalid_value(format!(
        "Collision between two options detected. You can only specify one of either: {}.",
        quoted_list(flags)
    ))
}

fn duplicate(named: &Named) -> ValidationError {
    ValidationError::invalid_value(format!(
        "More than one reference to option '{}' detected.",
        named.primary()
    ))
}

fn missing(named: &Named, tokens: &[String], context: &Context) -> ValidationError {
    let flags = named.flags();

    for token in tokens.iter().filter(|t| is_flag(t) && !context.is_known(t)) {
        // Only the option owning the closest known flag corrects the token.
        let closest = suggest(
            token,
            context.known_flags.iter().map(String::as_str),
            context.config,
        );

        if let Some(suggestion) = closest.filter(|c| flags.iter().any(|f| f == c)) {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Correcting unknown flag '{token}' to '{suggestion}'.");
            }
            return ValidationError::corrected_flag(token, suggestion);
        }
    }

    ValidationError::missing_value(format!("Expected to find '{}' option.", named.primary()))
}

fn validate_single(named: &Named, prim: &PrimType, tokens: &[String], context: &Context) -> Validated {
    match positions(tokens, &named.flags(), context.config).as_slice() {
        [] => Err(missing(named, tokens, context)),
        [i] => {
            let raw = tokens.get(i + 1).filter(|t| !is_flag(t));
            let value = prim
                .validate(raw.map(String::as_str), &context.prim())
                .map_err(ValidationError::invalid_value)?;
            Ok((without(tokens, &[*i, i + 1]), value))
        }
        _ => Err(duplicate(named)),
    }
}

fn validate_bool(
    named: &Named,
    negations: &[String],
    if_present: bool,
    tokens: &[String],
    context: &Context,
) -> Validated {
    let negation_flags: Vec<String> = negations.iter().map(|n| flag(n)).collect();
    let positive = positions(tokens, &named.flags(), context.config);
    let negative = positions(tokens, &negation_flags, context.config);

    match (positive.as_slice(), negative.as_slice()) {
        ([], []) => Ok((tokens.to_vec(), Value::Bool(!if_present))),
        ([i], []) => match tokens.get(i + 1).map(|t| parse_bool(t)) {
            Some(Ok(explicit)) => Ok((without(tokens, &[*i, i + 1]), Value::Bool(explicit))),
            _ => Ok((without(tokens, &[*i]), Value::Bool(if_present))),
        },
        ([], [i]) => Ok((without(tokens, &[*i]), Value::Bool(!if_present))),
        ([_, ..], [_, ..]) => {
            let mut spellings = vec![named.primary()];
            spellings.extend(negation_flags.into_iter().take(1));
            Err(collision(&spellings))
        }
        _ => Err(duplicate(named)),
    }
}

fn validate_key_value_map(named: &Named, tokens: &[String], context: &Context) -> Validated {
    let mut map = HashMap::default();
    let mut consumed = Vec::default();

    for i in positions(tokens, &named.flags(), context.config) {
        consumed.push(i);
        let mut pairs = 0;

        for (j, token) in tokens.iter().enumerate().skip(i + 1) {
            if is_flag(token) {
                break;
            }

            match token.split_once('=') {
                Some((key, value)) => {
                    // Later occurrences of a key overwrite earlier ones.
                    map.insert(key.to_string(), value.to_string());
                    consumed.push(j);
                    pairs += 1;
                }
                None => break,
            }
        }

        if pairs == 0 {
            return Err(ValidationError::invalid_value(format!(
                "Option '{}' expects at least one key=value pair.",
                named.primary()
            )));
        }
    }

    Ok((without(tokens, &consumed), Value::Map(map)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::tokens;
    use crate::primitive::LocalFileSystem;
    use rstest::rstest;

    fn single(name: &str, prim: PrimType) -> OptionsNode {
        OptionsNode::Single(Named::new(name), prim)
    }

    fn boolean(name: &str, negations: &[&str]) -> OptionsNode {
        OptionsNode::Bool {
            named: Named::new(name),
            negations: negations.iter().map(|n| n.to_string()).collect(),
            if_present: true,
        }
    }

    fn both(left: OptionsNode, right: OptionsNode) -> OptionsNode {
        OptionsNode::Both(Box::new(left), Box::new(right))
    }

    fn or_else(left: OptionsNode, right: OptionsNode) -> OptionsNode {
        OptionsNode::OrElse(Box::new(left), Box::new(right))
    }

    fn run(node: &OptionsNode, input: &[&str]) -> Validated {
        let config = CliConfig::default();
        let known = node.flags();
        let context = Context {
            config: &config,
            file_system: &LocalFileSystem,
            known_flags: &known,
        };
        node.validate(&tokens(input), &context)
    }

    #[test]
    fn single_found() {
        let node = single("count", PrimType::Integer);

        let (rest, value) = run(&node, &["a", "--count", "3", "b"]).unwrap();

        assert_eq!(rest, tokens(&["a", "b"]));
        assert_eq!(value, Value::Integer(3));
    }

    #[test]
    fn single_alias_case_insensitive() {
        let mut node = single("count", PrimType::Integer);
        node.named_mut().unwrap().names.push("c".to_string());

        let (rest, value) = run(&node, &["-C", "-3"]).unwrap();

        assert!(rest.is_empty());
        assert_eq!(value, Value::Integer(-3));
    }

    #[rstest]
    #[case(&["--count", "x"], ValidationErrorKind::InvalidValue, "'x' is not an integer.")]
    #[case(&["--count"], ValidationErrorKind::InvalidValue, "Integer options do not have a default value.")]
    #[case(&["--count", "--other"], ValidationErrorKind::InvalidValue, "Integer options do not have a default value.")]
    #[case(&["--count", "1", "--count", "2"], ValidationErrorKind::InvalidValue, "More than one reference to option '--count' detected.")]
    #[case(&["a"], ValidationErrorKind::MissingValue, "Expected to find '--count' option.")]
    #[case(&["--cuont", "1"], ValidationErrorKind::CorrectedFlag, "The flag '--cuont' is not recognized. Did you mean '--count'?")]
    #[case(&["--zzzzzz", "1"], ValidationErrorKind::MissingValue, "Expected to find '--count' option.")]
    fn single_failures(
        #[case] input: &[&str],
        #[case] kind: ValidationErrorKind,
        #[case] message: &str,
    ) {
        let node = single("count", PrimType::Integer);

        let error = run(&node, input).unwrap_err();

        assert_eq!(error.kind(), kind);
        assert_eq!(error.to_string(), message);
    }

    #[test]
    fn fuzzy_match() {
        // Setup
        let node = both(
            single("firstName", PrimType::Text),
            single("lastName", PrimType::Text),
        );

        // Execute
        let error = run(&node, &["--firstme", "Ada", "--lastName", "Lovelace"]).unwrap_err();

        // Verify
        assert_eq!(error.kind(), ValidationErrorKind::CorrectedFlag);
        assert_eq!(
            error.to_string(),
            "The flag '--firstme' is not recognized. Did you mean '--firstName'?"
        );
    }

    #[test]
    fn fuzzy_match_closest_overall() {
        // Setup
        let node = both(
            OptionsNode::Optional(Box::new(single("verbose", PrimType::Text))),
            OptionsNode::Optional(Box::new(single("verb", PrimType::Text))),
        );

        // Execute
        let error = run(&node, &["--verbs", "x"]).unwrap_err();

        // Verify
        assert_eq!(error.kind(), ValidationErrorKind::CorrectedFlag);
        assert_eq!(
            error.to_string(),
            "The flag '--verbs' is not recognized. Did you mean '--verb'?"
        );
    }

    #[rstest]
    #[case(&[], Value::Bool(false), 0)]
    #[case(&["--verbose"], Value::Bool(true), 0)]
    #[case(&["--verbose", "false"], Value::Bool(false), 0)]
    #[case(&["--verbose", "file"], Value::Bool(true), 1)]
    #[case(&["--silent"], Value::Bool(false), 0)]
    fn bool_values(#[case] input: &[&str], #[case] expected: Value, #[case] remaining: usize) {
        let node = boolean("verbose", &["silent"]);

        let (rest, value) = run(&node, input).unwrap();

        assert_eq!(value, expected);
        assert_eq!(rest.len(), remaining);
    }

    #[test]
    fn bool_negation_collision() {
        let node = boolean("verbose", &["silent"]);

        let error = run(&node, &["--silent", "--verbose"]).unwrap_err();

        assert_eq!(error.kind(), ValidationErrorKind::InvalidValue);
        assert_eq!(
            error.to_string(),
            "Collision between two options detected. You can only specify one of either: ['--verbose', '--silent']."
        );
    }

    #[test]
    fn key_value_map() {
        // Setup
        let mut node = OptionsNode::KeyValueMap(Named::new("define"));
        node.named_mut().unwrap().names.push("d".to_string());

        // Execute
        let (rest, value) = run(&node, &["-d", "key1=v1", "-d", "key2=v2", "--verbose"]).unwrap();

        // Verify
        assert_eq!(rest, tokens(&["--verbose"]));
        assert_eq!(
            value,
            Value::Map(HashMap::from([
                ("key1".to_string(), "v1".to_string()),
                ("key2".to_string(), "v2".to_string()),
            ]))
        );
    }

    #[test]
    fn key_value_map_last_write_wins() {
        let node = OptionsNode::KeyValueMap(Named::new("define"));

        let (rest, value) = run(&node, &["--define", "k=1", "k=2", "file", "--define", "k=3"]).unwrap();

        assert_eq!(rest, tokens(&["file"]));
        assert_eq!(
            value,
            Value::Map(HashMap::from([("k".to_string(), "3".to_string())]))
        );
    }

    #[rstest]
    #[case(&["--define"])]
    #[case(&["--define", "file"])]
    #[case(&["--define", "--other"])]
    fn key_value_map_without_pairs(#[case] input: &[&str]) {
        let node = OptionsNode::KeyValueMap(Named::new("define"));

        let error = run(&node, input).unwrap_err();

        assert_eq!(
            error.to_string(),
            "Option '--define' expects at least one key=value pair."
        );
    }

    #[test]
    fn key_value_map_absent() {
        let node = OptionsNode::KeyValueMap(Named::new("define"));

        let (rest, value) = run(&node, &["x"]).unwrap();

        assert_eq!(rest, tokens(&["x"]));
        assert_eq!(value, Value::Map(HashMap::default()));
    }

    #[rstest]
    #[case(&["-a", "1", "-b", "2"])]
    #[case(&["-b", "2", "-a", "1"])]
    fn both_order_independent(#[case] input: &[&str]) {
        let node = both(
            single("a", PrimType::Integer),
            single("b", PrimType::Integer),
        );

        let (rest, value) = run(&node, input).unwrap();

        assert!(rest.is_empty());
        assert_eq!(
            value,
            Value::pair(Value::Integer(1), Value::Integer(2))
        );
    }

    #[test]
    fn both_reports_both_failures() {
        let node = both(
            single("a", PrimType::Integer),
            single("b", PrimType::Integer),
        );

        let error = run(&node, &["-b", "x"]).unwrap_err();

        assert_eq!(error.kind(), ValidationErrorKind::InvalidValue);
        assert_eq!(
            error.help().paragraphs(),
            vec!["Expected to find '-a' option.", "'x' is not an integer."]
        );
    }

    #[test]
    fn or_else_both_missing() {
        let node = or_else(single("a", PrimType::Text), single("b", PrimType::Text));

        let error = run(&node, &[]).unwrap_err();

        assert_eq!(error.kind(), ValidationErrorKind::MissingValue);
        assert_eq!(
            error.help().paragraphs(),
            vec!["Expected to find '-a' option.", "Expected to find '-b' option."]
        );
    }

    #[test]
    fn or_else_invalid() {
        let node = or_else(single("a", PrimType::Integer), single("b", PrimType::Text));

        let error = run(&node, &["-a"]).unwrap_err();

        assert_eq!(error.kind(), ValidationErrorKind::InvalidValue);
    }

    #[rstest]
    #[case(&["-a", "x"], Value::Left(Box::new(Value::Text("x".to_string()))))]
    #[case(&["-b", "y"], Value::Right(Box::new(Value::Text("y".to_string()))))]
    fn or_else_one_side(#[case] input: &[&str], #[case] expected: Value) {
        let node = or_else(single("a", PrimType::Text), single("b", PrimType::Text));

        let (rest, value) = run(&node, input).unwrap();

        assert!(rest.is_empty());
        assert_eq!(value, expected);
    }

    #[test]
    fn or_else_collision() {
        let node = or_else(single("a", PrimType::Text), single("b", PrimType::Text));

        let error = run(&node, &["-a", "x", "-b", "y"]).unwrap_err();

        assert_eq!(
            error.to_string(),
            "Collision between two options detected. You can only specify one of either: ['-a', '-b']."
        );
    }

    #[rstest]
    #[case(&["-a", "x", "--bb", "y"], Ok(Value::Left(Box::new(Value::Text("x".to_string())))))]
    #[case(&["-a", "x", "-b", "four"], Err("Collision between two options detected. You can only specify one of either: ['-a', '-b']."))]
    #[case(&["-b", "four"], Err("Expected to find '-a' option.\n\n'four' is not an integer."))]
    fn or_else_prefers_successful_side(
        #[case] input: &[&str],
        #[case] expected: Result<Value, &str>,
    ) {
        let node = or_else(single("a", PrimType::Text), single("b", PrimType::Integer));

        let result = run(&node, input).map(|(_, v)| v).map_err(|e| e.to_string());

        assert_eq!(result, expected.map_err(str::to_string));
    }

    #[test]
    fn or_else_absent_defaults() {
        // Both sides succeed without consuming anything: the left side wins.
        let node = or_else(boolean("x", &[]), boolean("y", &[]));

        let (_, value) = run(&node, &[]).unwrap();

        assert_eq!(value, Value::Left(Box::new(Value::Bool(false))));
    }

    #[rstest]
    #[case(&[], Ok(Value::Absent))]
    #[case(&["-n", "4"], Ok(Value::Integer(4)))]
    #[case(&["-n", "four"], Err(ValidationErrorKind::InvalidValue))]
    #[case(&["--nn", "4"], Err(ValidationErrorKind::CorrectedFlag))]
    fn optional(#[case] input: &[&str], #[case] expected: Result<Value, ValidationErrorKind>) {
        for node in [
            OptionsNode::Optional(Box::new(single("n", PrimType::Integer))),
            OptionsNode::WithDefault(Box::new(single("n", PrimType::Integer)), "1".to_string()),
        ] {
            let result = run(&node, input).map(|(_, v)| v).map_err(|e| e.kind());
            assert_eq!(result, expected);
        }
    }

    #[test]
    fn usage() {
        // Setup
        let config = CliConfig::default();
        let node = both(
            both(
                single("name", PrimType::Text),
                OptionsNode::Optional(Box::new(single("n", PrimType::Integer))),
            ),
            both(
                boolean("verbose", &["silent"]),
                or_else(
                    single("a", PrimType::Text),
                    OptionsNode::KeyValueMap(Named::new("define")),
                ),
            ),
        );

        // Execute
        let usage = node.usage(&config, false);

        // Verify
        assert_eq!(
            usage,
            "--name <text> [-n <integer>] [--verbose | --silent] (-a <text> | [--define <key=value>...])"
        );
    }

    #[test]
    fn help_entries() {
        // Setup
        let config = CliConfig::default();
        let mut name = single("name", PrimType::Text);
        name.named_mut().unwrap().names.push("N".to_string());
        name.named_mut().unwrap().help = Some("Who to greet.".to_string());
        let node = both(
            name,
            both(
                OptionsNode::WithDefault(Box::new(single("times", PrimType::Integer)), "1".to_string()),
                boolean("verbose", &["silent"]),
            ),
        );
        let mut entries = Vec::default();

        // Execute
        node.help_entries(&config, None, &mut entries);

        // Verify
        let terms: Vec<&str> = entries.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(
            terms,
            vec!["--name, -N <text>", "--times <integer>", "--verbose", "--silent"]
        );
        assert_eq!(entries[0].1.paragraphs(), vec!["Who to greet."]);
        assert_eq!(
            entries[1].1.paragraphs(),
            vec!["This setting is optional. Default: 1."]
        );
        assert_eq!(entries[3].1.paragraphs(), vec!["Negates '--verbose'."]);
    }
}
