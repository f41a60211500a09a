use std::rc::Rc;

use clove_prompt::Prompt;

use crate::matcher::{ArgsNode, CommandNode, Named, OptionsNode};
use crate::model::CliConfig;
use crate::primitive::{FileSystem, PrimContext, PrimType};

type Tokens = Prompt<Vec<String>>;

// What typed values are checked against before submission.
#[derive(Clone)]
struct Checks {
    config: CliConfig,
    file_system: Rc<dyn FileSystem>,
}

impl Checks {
    fn validate(&self, prim: &PrimType, raw: &str) -> Result<(), String> {
        let context = PrimContext {
            config: &self.config,
            file_system: self.file_system.as_ref(),
        };
        prim.validate(Some(raw), &context).map(|_| ())
    }
}

/// The interactive prompt which builds the tokens invoking `node`, its own name included.
pub(crate) fn command_wizard(
    node: &CommandNode,
    config: &CliConfig,
    file_system: Rc<dyn FileSystem>,
) -> Tokens {
    let checks = Checks {
        config: config.clone(),
        file_system,
    };
    node_wizard(node, &checks)
}

fn node_wizard(node: &CommandNode, checks: &Checks) -> Tokens {
    match node {
        CommandNode::Single {
            name,
            options,
            args,
            ..
        } => sequence(
            Prompt::succeed(vec![name.clone()]),
            sequence(options_wizard(options, checks), args_wizard(args, checks)),
        ),
        CommandNode::OrElse(_, _) => {
            let alternatives = node.alternatives();
            let choices: Vec<(String, usize)> = alternatives
                .iter()
                .enumerate()
                .map(|(i, alternative)| {
                    let names = alternative.names().join(", ");
                    match alternative.summary() {
                        Some(summary) => (format!("{names} - {summary}"), i),
                        None => (names, i),
                    }
                })
                .collect();
            let mut prompts: Vec<Tokens> = alternatives
                .into_iter()
                .map(|alternative| node_wizard(alternative, checks))
                .collect();

            Prompt::select("Command", choices).and_then(move |i| {
                if i < prompts.len() {
                    prompts.swap_remove(i)
                } else {
                    unreachable!("internal error - selected command {i} out of range")
                }
            })
        }
        CommandNode::Subcommands(parent, child) => {
            sequence(node_wizard(parent, checks), node_wizard(child, checks))
        }
    }
}

fn options_wizard(node: &OptionsNode, checks: &Checks) -> Tokens {
    match node {
        OptionsNode::Empty => Prompt::succeed(Vec::default()),
        OptionsNode::Single(named, prim) => {
            let flag = named.primary();
            value_prompt(message(named, &prim.placeholder()), prim.clone(), checks)
                .map(move |value| vec![flag, value])
        }
        OptionsNode::Bool {
            named, if_present, ..
        } => {
            let flag = named.primary();
            let if_present = *if_present;
            let question = match &named.help {
                Some(help) => format!("{flag}? {help}"),
                None => format!("{flag}?"),
            };
            Prompt::confirm(question, !if_present).map(move |answer| {
                if answer == if_present {
                    vec![flag]
                } else {
                    Vec::default()
                }
            })
        }
        OptionsNode::KeyValueMap(named) => {
            let flag = named.primary();
            Prompt::text_validated(message(named, "key=value..."), |raw| {
                match raw.split_whitespace().find(|pair| !pair.contains('=')) {
                    Some(pair) => Err(format!("'{pair}' is not a key=value pair.")),
                    None => Ok(()),
                }
            })
            .map(move |raw| {
                let pairs: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
                if pairs.is_empty() {
                    pairs
                } else {
                    let mut tokens = vec![flag];
                    tokens.extend(pairs);
                    tokens
                }
            })
        }
        OptionsNode::Both(left, right) => {
            sequence(options_wizard(left, checks), options_wizard(right, checks))
        }
        OptionsNode::OrElse(left, right) => {
            let choices = vec![
                (left.primary_flags().join(" "), true),
                (right.primary_flags().join(" "), false),
            ];
            let left = options_wizard(left, checks);
            let right = options_wizard(right, checks);
            Prompt::select("Choose one", choices)
                .and_then(move |is_left| if is_left { left } else { right })
        }
        OptionsNode::Optional(inner) | OptionsNode::WithDefault(inner, _) => {
            let flags = inner.primary_flags().join(" ");
            let inner = options_wizard(inner, checks);
            Prompt::confirm(format!("Specify {flags}?"), false).and_then(move |specify| {
                if specify {
                    inner
                } else {
                    Prompt::succeed(Vec::default())
                }
            })
        }
    }
}

fn args_wizard(node: &ArgsNode, checks: &Checks) -> Tokens {
    match node {
        ArgsNode::Empty => Prompt::succeed(Vec::default()),
        ArgsNode::Single { name, help, prim } => {
            let message = match help {
                Some(help) => format!("<{name}> {help}"),
                None => format!("<{name}>"),
            };
            value_prompt(message, prim.clone(), checks).map(|value| vec![value])
        }
        ArgsNode::Both(left, right) => {
            sequence(args_wizard(left, checks), args_wizard(right, checks))
        }
        ArgsNode::Variadic { inner, min, max } => {
            let names = inner.names();
            let per = names.len().max(1);
            let (min, max) = (*min, *max);
            let prim = match inner.as_ref() {
                ArgsNode::Single { prim, .. } => Some(prim.clone()),
                _ => None,
            };
            let checks = checks.clone();
            let message = format!(
                "{} (separated by spaces)",
                names
                    .iter()
                    .map(|n| format!("<{n}>..."))
                    .collect::<Vec<_>>()
                    .join(" ")
            );

            Prompt::text_validated(message, move |raw| {
                let values: Vec<&str> = raw.split_whitespace().collect();
                let count = values.len() / per;

                if values.len() % per != 0 || count < min || max.map_or(false, |max| count > max) {
                    return Err(match max {
                        Some(max) => format!("Expected between {min} and {max} value(s)."),
                        None => format!("Expected at least {min} value(s)."),
                    });
                }

                if let Some(prim) = &prim {
                    for value in values {
                        checks.validate(prim, value)?;
                    }
                }

                Ok(())
            })
            .map(|raw| raw.split_whitespace().map(str::to_string).collect())
        }
    }
}

fn message(named: &Named, placeholder: &str) -> String {
    let mut message = named.primary();

    if !placeholder.is_empty() {
        message.push_str(&format!(" <{placeholder}>"));
    }

    if let Some(help) = &named.help {
        message.push_str(&format!(" {help}"));
    }

    message
}

// Enumerations are picked from their cases; everything else is typed and checked before submission.
fn value_prompt(message: String, prim: PrimType, checks: &Checks) -> Prompt<String> {
    match prim {
        PrimType::Enumeration(cases) => {
            let choices: Vec<(String, String)> =
                cases.into_iter().map(|case| (case.clone(), case)).collect();
            Prompt::select(message, choices)
        }
        prim => {
            let checks = checks.clone();
            Prompt::text_validated(message, move |raw| checks.validate(&prim, raw))
        }
    }
}

fn sequence(first: Tokens, second: Tokens) -> Tokens {
    first.and_then(move |mut tokens| {
        second.map(move |rest| {
            tokens.extend(rest);
            tokens
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{Existence, LocalFileSystem, PathKind};
    use clove_prompt::{Action, ScriptedTerminal, UserInput};
    use rstest::rstest;

    fn submit() -> UserInput {
        UserInput::action(Action::Submit)
    }

    fn typed(text: &str) -> Vec<UserInput> {
        let mut inputs = UserInput::keystrokes(text);
        inputs.push(submit());
        inputs
    }

    fn single(options: OptionsNode, args: ArgsNode) -> CommandNode {
        CommandNode::Single {
            name: "run".to_string(),
            help: None,
            options,
            args,
        }
    }

    fn arg(name: &str, prim: PrimType) -> ArgsNode {
        ArgsNode::Single {
            name: name.to_string(),
            help: None,
            prim,
        }
    }

    fn run(node: &CommandNode, inputs: Vec<UserInput>) -> (Vec<String>, ScriptedTerminal) {
        let mut terminal = ScriptedTerminal::new(inputs);
        let tokens = command_wizard(node, &CliConfig::default(), Rc::new(LocalFileSystem))
            .run(&mut terminal)
            .unwrap();
        (tokens, terminal)
    }

    #[test]
    fn empty_command() {
        let node = single(OptionsNode::Empty, ArgsNode::Empty);

        let (tokens, terminal) = run(&node, vec![]);

        assert_eq!(tokens, vec!["run"]);
        assert!(terminal.frames().is_empty());
    }

    #[rstest]
    #[case(true, 'y', vec!["run", "--verbose"])]
    #[case(true, 'n', vec!["run"])]
    #[case(false, 'y', vec!["run"])]
    #[case(false, 'n', vec!["run", "--verbose"])]
    fn bool_option(#[case] if_present: bool, #[case] answer: char, #[case] expected: Vec<&str>) {
        let node = single(
            OptionsNode::Bool {
                named: Named::new("verbose"),
                negations: vec![],
                if_present,
            },
            ArgsNode::Empty,
        );

        let (tokens, _) = run(&node, vec![UserInput::character(answer)]);

        assert_eq!(tokens, expected);
    }

    #[test]
    fn single_option_rejects_invalid() {
        // Setup
        let node = single(
            OptionsNode::Single(Named::new("count"), PrimType::Integer),
            ArgsNode::Empty,
        );
        let mut inputs = typed("x");
        inputs.push(UserInput::action(Action::Backspace));
        inputs.extend(typed("12"));

        // Execute
        let (tokens, terminal) = run(&node, inputs);

        // Verify
        assert_eq!(tokens, vec!["run", "--count", "12"]);
        assert!(terminal
            .frames()
            .iter()
            .any(|frame| frame.contains("'x' is not an integer.")));
    }

    #[test]
    fn optional_skipped() {
        let node = single(
            OptionsNode::Optional(Box::new(OptionsNode::Single(
                Named::new("name"),
                PrimType::Text,
            ))),
            arg("path", PrimType::Text),
        );
        let mut inputs = vec![UserInput::character('n')];
        inputs.extend(typed("here"));

        let (tokens, _) = run(&node, inputs);

        assert_eq!(tokens, vec!["run", "here"]);
    }

    struct Everything;

    impl FileSystem for Everything {
        fn path_exists(&self, _path: &std::path::Path) -> bool {
            true
        }

        fn is_regular_file(&self, _path: &std::path::Path) -> bool {
            false
        }

        fn is_directory(&self, _path: &std::path::Path) -> bool {
            true
        }
    }

    #[test]
    fn path_checked_against_file_system() {
        // Setup
        let node = single(
            OptionsNode::Empty,
            arg("dir", PrimType::Path(PathKind::Directory, Existence::MustExist)),
        );
        let mut terminal = ScriptedTerminal::new(typed("/nowhere"));

        // Execute
        let tokens = command_wizard(&node, &CliConfig::default(), Rc::new(Everything))
            .run(&mut terminal)
            .unwrap();

        // Verify
        assert_eq!(tokens, vec!["run", "/nowhere"]);
        assert!(!terminal
            .frames()
            .iter()
            .any(|frame| frame.contains("must exist")));
    }

    #[test]
    fn key_value_map() {
        let node = single(OptionsNode::KeyValueMap(Named::new("env")), ArgsNode::Empty);

        let (tokens, _) = run(&node, typed("a=1 b=2"));

        assert_eq!(tokens, vec!["run", "--env", "a=1", "b=2"]);
    }

    #[test]
    fn enumeration_argument() {
        let node = single(
            OptionsNode::Empty,
            arg(
                "mode",
                PrimType::Enumeration(vec!["fast".to_string(), "slow".to_string()]),
            ),
        );

        let (tokens, _) = run(
            &node,
            vec![UserInput::action(Action::CursorDown), submit()],
        );

        assert_eq!(tokens, vec!["run", "slow"]);
    }

    #[test]
    fn variadic_argument() {
        // Setup
        let node = single(
            OptionsNode::Empty,
            ArgsNode::Variadic {
                inner: Box::new(arg("n", PrimType::Integer)),
                min: 2,
                max: None,
            },
        );
        // A single value is rejected; the second submission is accepted.
        let mut inputs = typed("1");
        inputs.extend(typed(" 2"));

        // Execute
        let (tokens, terminal) = run(&node, inputs);

        // Verify
        assert_eq!(tokens, vec!["run", "1", "2"]);
        assert!(terminal
            .frames()
            .iter()
            .any(|frame| frame.contains("Expected at least 2 value(s).")));
    }

    #[test]
    fn alternatives() {
        let node = CommandNode::OrElse(
            Box::new(single(OptionsNode::Empty, ArgsNode::Empty)),
            Box::new(CommandNode::Single {
                name: "stop".to_string(),
                help: Some("Stop it.".to_string()),
                options: OptionsNode::Empty,
                args: ArgsNode::Empty,
            }),
        );

        let (tokens, terminal) = run(
            &node,
            vec![UserInput::action(Action::CursorUp), submit()],
        );

        assert_eq!(tokens, vec!["stop"]);
        assert!(terminal.frames()[0].contains("stop - Stop it."));
    }
}
