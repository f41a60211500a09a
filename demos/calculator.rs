use clove::{Args, CliApp, Command, Options};

#[derive(Debug)]
enum Operation {
    Add(Vec<i64>),
    Negate(i64),
}

fn main() {
    let add = Command::new("add", Options::none(), Args::integer("values").repeat1())
        .with_help("Sum the values.")
        .map(|(_, values)| Operation::Add(values));
    let negate = Command::new("neg", Options::none(), Args::integer("value"))
        .with_help("Negate the value.")
        .map(|(_, value)| Operation::Negate(value));
    let command = Command::new(
        "calculator",
        Options::boolean("verbose").alias("v").describe("Show the operation."),
        Args::none(),
    )
    .map(|(verbose, _)| verbose)
    .subcommands(add.or_else(negate));

    CliApp::new("calculator", env!("CARGO_PKG_VERSION"), command)
        .summary("A tiny calculator.")
        .build()
        .run(|(verbose, operation)| {
            if verbose {
                println!("{operation:?}");
            }

            let result = match operation {
                Operation::Add(values) => values.iter().sum::<i64>(),
                Operation::Negate(value) => -value,
            };
            println!("{result}");
        });
}
