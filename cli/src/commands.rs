use clap::{ArgMatches, Command};

pub fn cli() -> Vec<Command> {
    vec![completions::cli(), extract::cli(), list::cli()]
}

pub fn dispatch(matches: ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("completions", args)) => completions::exec(args),
        Some(("extract", args)) => extract::exec(args),
        Some(("list", args)) => list::exec(args),
        _ => unreachable!(),
    }
}

pub mod completions;
pub mod extract;
pub mod list;
