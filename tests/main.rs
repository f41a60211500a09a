use clove::prompt::{Action, Prompt, ScriptedTerminal, UserInput};
use clove::{
    levenshtein_distance, Args, BuiltInOption, CliApp, CliConfig, Command, CommandDirective,
    Options, ValidationErrorKind,
};

#[derive(Debug, PartialEq)]
enum Git {
    Add(String),
    RemoteAdd(String, String),
}

fn git() -> Command<((bool, ()), Git)> {
    let add = Command::new("add", Options::none(), Args::text("file")).map(|(_, file)| Git::Add(file));
    let remote = Command::new("remote", Options::none(), Args::none()).subcommands(
        Command::new("add", Options::none(), Args::text("name").and(Args::text("url")))
            .map(|(_, (name, url))| Git::RemoteAdd(name, url)),
    );
    Command::new("git", Options::boolean("verbose"), Args::none())
        .subcommands(add.or_else(remote.map(|(_, remote_add)| remote_add)))
}

#[test]
fn builder_compiles() {
    CliApp::new("git", "0.1.0", git()).build_app().unwrap();
}

#[test]
fn subcommand_dispatch() {
    let config = CliConfig::default();

    assert_eq!(
        git()
            .parse(&["git", "remote", "add", "origin", "url"], &config)
            .unwrap(),
        CommandDirective::UserDefined {
            leftover: vec![],
            value: (
                (false, ()),
                Git::RemoteAdd("origin".to_string(), "url".to_string())
            ),
        }
    );
    assert!(matches!(
        git().parse(&["git"], &config).unwrap(),
        CommandDirective::BuiltIn(BuiltInOption::ShowHelp { .. })
    ));
}

#[test]
fn fuzzy_flag() {
    let command = Command::new("greet", Options::text("firstName"), Args::none());

    let error = command
        .parse(&["greet", "--firstme", "bob"], &CliConfig::default())
        .unwrap_err();

    assert_eq!(error.kind(), ValidationErrorKind::CorrectedFlag);
    assert_eq!(
        error.to_string(),
        "The flag '--firstme' is not recognized. Did you mean '--firstName'?"
    );
}

#[test]
fn edit_distance() {
    let config = CliConfig::default();

    assert_eq!(levenshtein_distance("", "añb", &config), 3);
    assert_eq!(levenshtein_distance("Kitten", "sitting", &config), 3);
}

#[test]
fn app_run_tokens() {
    let app = CliApp::new("git", "0.1.0", git()).build();

    let file = app
        .run_tokens(&["--verbose", "add", "a.txt"], |((verbose, _), command)| {
            assert!(verbose);
            command
        })
        .unwrap();

    assert_eq!(file, Git::Add("a.txt".to_string()));
}

#[test]
fn prompt_text() {
    let mut terminal = ScriptedTerminal::new(vec![
        UserInput::action(Action::Backspace),
        UserInput::character('h'),
        UserInput::character('i'),
        UserInput::action(Action::Submit),
    ]);

    let value = Prompt::text("Say").run(&mut terminal).unwrap();

    assert_eq!(value, "hi");
    assert!(terminal.frames()[1].starts_with('\u{7}'));
}
