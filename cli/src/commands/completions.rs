use clap::{arg, ArgAction, ArgMatches, Command};
use clap_complete::{generate, Generator, Shell};

pub(crate) fn cli() -> Command {
    Command::new(crate::cli::module_component!())
        .about("Generate shell completions for your shell to stdout")
        .arg(
            arg!(<SHELL> "The shell to generate completions for")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(Shell)),
        )
}

fn print_completions<G: Generator>(generator: G, cmd: &mut Command) {
    let name = cmd.get_name().to_string();
    generate(generator, cmd, name, &mut std::io::stdout());
}

pub(crate) fn exec(args: &ArgMatches) -> anyhow::Result<()> {
    let shell = args.get_one::<Shell>("SHELL").copied().unwrap();
    let mut cmd = crate::app();
    print_completions(shell, &mut cmd);

    Ok(())
}
