//! The untyped node trees and their validation algorithms.
//! Every node validates into a [`Value`](crate::model::Value), which the typed api finishes into the user's type.
mod args;
mod command;
mod options;

pub(crate) use args::ArgsNode;
pub(crate) use command::CommandNode;
pub(crate) use options::{Named, OptionsNode};

use crate::model::CliConfig;
use crate::primitive::{FileSystem, PrimContext};

pub(crate) struct Context<'c> {
    pub(crate) config: &'c CliConfig,
    pub(crate) file_system: &'c dyn FileSystem,
    // Every flag the enclosing command declares.
    // Flag-shaped tokens outside this set are candidates for auto-correction.
    pub(crate) known_flags: &'c [String],
}

impl<'c> Context<'c> {
    pub(crate) fn prim(&self) -> PrimContext<'c> {
        PrimContext {
            config: self.config,
            file_system: self.file_system,
        }
    }

    pub(crate) fn is_known(&self, token: &str) -> bool {
        self.known_flags
            .iter()
            .any(|flag| self.config.matches(flag, token))
    }
}

/// The flag spelling of an option name: `-n` for single characters, `--name` otherwise.
pub(crate) fn flag(name: &str) -> String {
    if name.chars().count() == 1 {
        format!("-{name}")
    } else {
        format!("--{name}")
    }
}

/// Whether a token looks like a flag (as opposed to a value, or a negative number).
pub(crate) fn is_flag(token: &str) -> bool {
    let body = token.trim_start_matches('-');
    token.starts_with('-')
        && token.chars().count() > 1
        && !body.starts_with(|c: char| c.is_ascii_digit())
}

/// Split `--name=value` and explode clustered short flags (`-abc` into `-a -b -c`).
pub(crate) fn uncluster(tokens: &[String]) -> Vec<String> {
    let mut out = Vec::default();

    for token in tokens {
        if !is_flag(token) {
            out.push(token.clone());
        } else if token.starts_with("--") {
            match token.split_once('=') {
                Some((name, value)) => {
                    out.push(name.to_string());
                    out.push(value.to_string());
                }
                None => out.push(token.clone()),
            }
        } else {
            let body = &token[1..];
            let (head, value) = match body.split_once('=') {
                Some((head, value)) => (head, Some(value)),
                None => (body, None),
            };

            if head.chars().count() > 1 && head.chars().all(char::is_alphabetic) {
                out.extend(head.chars().map(|c| format!("-{c}")));
            } else {
                out.push(format!("-{head}"));
            }

            if let Some(value) = value {
                out.push(value.to_string());
            }
        }
    }

    out
}

/// The indices of every token naming one of `flags`.
pub(crate) fn positions(tokens: &[String], flags: &[String], config: &CliConfig) -> Vec<usize> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| flags.iter().any(|flag| config.matches(flag, token)))
        .map(|(i, _)| i)
        .collect()
}

/// The tokens which remain after removing the indices in `consumed`.
pub(crate) fn without(tokens: &[String], consumed: &[usize]) -> Vec<String> {
    tokens
        .iter()
        .enumerate()
        .filter(|(i, _)| !consumed.contains(i))
        .map(|(_, token)| token.clone())
        .collect()
}

pub(crate) fn quoted_list(flags: &[String]) -> String {
    format!(
        "[{}]",
        flags
            .iter()
            .map(|f| format!("'{f}'"))
            .collect::<Vec<String>>()
            .join(", ")
    )
}

#[cfg(test)]
pub(crate) fn tokens(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("--verbose", true)]
    #[case("-v", true)]
    #[case("--", true)]
    #[case("-", false)]
    #[case("-12", false)]
    #[case("-1.5", false)]
    #[case("--1", false)]
    #[case("value", false)]
    #[case("key=value", false)]
    fn flag_shaped(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_flag(token), expected);
    }

    #[rstest]
    #[case(vec!["-abc"], vec!["-a", "-b", "-c"])]
    #[case(vec!["-abc=1"], vec!["-a", "-b", "-c", "1"])]
    #[case(vec!["-a=1"], vec!["-a", "1"])]
    #[case(vec!["--name=a=b"], vec!["--name", "a=b"])]
    #[case(vec!["--name", "x"], vec!["--name", "x"])]
    #[case(vec!["-12", "-a1"], vec!["-12", "-a1"])]
    #[case(vec!["k=v", "-"], vec!["k=v", "-"])]
    #[case(vec![], vec![])]
    fn unclustered(#[case] input: Vec<&str>, #[case] expected: Vec<&str>) {
        assert_eq!(uncluster(&tokens(&input)), tokens(&expected));
    }

    #[rstest]
    #[case("n", "-n")]
    #[case("name", "--name")]
    #[case("ß", "-ß")]
    fn flag_spelling(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(flag(name), expected);
    }

    #[test]
    fn positions_fold_case() {
        // Setup
        let input = tokens(&["--Name", "x", "--other", "--name"]);
        let flags = tokens(&["--name"]);

        // Execute
        let found = positions(&input, &flags, &CliConfig::default());

        // Verify
        assert_eq!(found, vec![0, 3]);
        assert_eq!(without(&input, &found), tokens(&["x", "--other"]));
    }
}
