use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::{arg, ArgAction, ArgMatches, Command};
use console::Style;
use gribseries::{
    AmbiguityPolicy, ArchiveWalker, EmptySelectionPolicy, ExtractError, GribArchive, Hdf5Backend,
    RunConfig, SelectionCriteria, DEFAULT_FILE_PATTERN,
};

use crate::cli::{CliDateTime, CliPair, CliYearRange};

const DEFAULT_LEVELS: [&str; 6] = ["50", "100", "200", "300", "700", "850"];

pub fn cli() -> Command {
    Command::new(crate::cli::module_component!())
        .about("Extract regional mean time series from a monthly archive")
        .arg(
            arg!(--"input-root" <DIR> "Root directory holding one subdirectory per year")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--"output-dir" <DIR> "Directory the yearly containers are written to")
                .required(false)
                .default_value(".")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--center <LON_LAT> "Center of the window as 'LON,LAT' in degrees")
                .required(false)
                .default_value("290.7,-35.3")
                .allow_hyphen_values(true),
        )
        .arg(
            arg!(--width <DLON_DLAT> "Full widths of the window as 'DLON,DLAT' in degrees")
                .required(false)
                .default_value("5.1,5.1")
                .allow_hyphen_values(true),
        )
        .arg(
            arg!(--years <YEARS> "Years to process as 'YYYY' or 'YYYY-YYYY'")
                .required(false)
                .default_value("2006-2013"),
        )
        .arg(
            arg!(--levels <LEVELS> "Comma-separated isobaric levels in hPa")
                .required(false)
                .value_delimiter(',')
                .default_values(DEFAULT_LEVELS)
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            arg!(--variables <NAMES> "Comma-separated short names of variables")
                .required(false)
                .value_delimiter(',')
                .default_value("gh"),
        )
        .arg(
            arg!(--epoch <DATE> "Origin of relative times [default: January 1 of the first year]")
                .required(false),
        )
        .arg(
            arg!(--"file-pattern" <TEMPLATE> "File name pattern with {year} and {month} placeholders")
                .required(false)
                .default_value(DEFAULT_FILE_PATTERN),
        )
        .arg(
            arg!(--"output-prefix" <NAME> "Prefix of output file names")
                .required(false)
                .default_value("test"),
        )
        .arg(
            arg!(--"on-empty-selection" <POLICY> "Handling of records selecting no cell")
                .required(false)
                .value_parser(["abort", "skip"])
                .default_value("abort"),
        )
        .arg(
            arg!(--"strict-files" "Fail when more than one file matches a month")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(-j --jobs <N> "Number of years processed concurrently")
                .required(false)
                .default_value("1")
                .value_parser(clap::value_parser!(u16).range(1..)),
        )
}

pub fn exec(args: &ArgMatches) -> anyhow::Result<()> {
    let config = run_config(args)?;
    log::debug!("{config:?}");
    fs::create_dir_all(config.output.dir()).with_context(|| {
        format!("cannot create output directory {}", config.output.dir().display())
    })?;

    let walker = ArchiveWalker::new(&config, GribArchive, Hdf5Backend);
    let reports = walker.run()?;

    let style = Style::new().bold();
    for report in reports {
        print!("{}: {} records", style.apply_to(report.output.display()), report.records);
        if report.skipped > 0 {
            print!(" ({} skipped)", report.skipped);
        }
        println!();
    }
    Ok(())
}

fn run_config(args: &ArgMatches) -> anyhow::Result<RunConfig> {
    let CliPair(lon, lat) = args.get_one::<String>("center").unwrap().parse()?;
    let CliPair(width_lon, width_lat) = args.get_one::<String>("width").unwrap().parse()?;
    let CliYearRange(start, end) = args.get_one::<String>("years").unwrap().parse()?;
    let levels = args.get_many::<u32>("levels").unwrap().copied();
    let variables = args.get_many::<String>("variables").unwrap().cloned();

    let mut criteria =
        SelectionCriteria::new((lon, lat), (width_lon, width_lat), levels, variables, start..=end)
            .map_err(ExtractError::from)?;
    if let Some(epoch) = args.get_one::<String>("epoch") {
        let CliDateTime(epoch) = epoch.parse()?;
        criteria = criteria.with_epoch(epoch);
    }

    let input_root = args.get_one::<PathBuf>("input-root").unwrap();
    let output_dir = args.get_one::<PathBuf>("output-dir").unwrap();
    let mut config = RunConfig::new(criteria, input_root, output_dir);
    config.archive = config
        .archive
        .with_file_pattern(args.get_one::<String>("file-pattern").unwrap());
    config.output = config
        .output
        .with_prefix(args.get_one::<String>("output-prefix").unwrap());
    config.empty_selection = args
        .get_one::<String>("on-empty-selection")
        .unwrap()
        .parse::<EmptySelectionPolicy>()
        .map_err(anyhow::Error::msg)?;
    if args.get_flag("strict-files") {
        config.ambiguity = AmbiguityPolicy::Reject;
    }
    config.jobs = usize::from(*args.get_one::<u16>("jobs").unwrap());
    Ok(config)
}
