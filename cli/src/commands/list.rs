use std::{
    fmt::{self, Display, Formatter},
    path::PathBuf,
};

use clap::{arg, ArgMatches, Command};
use console::Style;
use gribseries::{GribFile, RecordHeader};

pub fn cli() -> Command {
    Command::new(crate::cli::module_component!())
        .about("List record headers contained in a GRIB2 file")
        .arg(arg!(<FILE> "Target file name").value_parser(clap::value_parser!(PathBuf)))
}

pub fn exec(args: &ArgMatches) -> anyhow::Result<()> {
    let file_name = args.get_one::<PathBuf>("FILE").unwrap();
    let file = GribFile::open(file_name)?;
    let headers = file.headers().collect::<Result<Vec<_>, _>>()?;
    print!("{}", ListView::new(&headers));
    Ok(())
}

struct ListView<'h> {
    headers: &'h [RecordHeader],
}

impl<'h> ListView<'h> {
    fn new(headers: &'h [RecordHeader]) -> Self {
        Self { headers }
    }
}

impl Display for ListView<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let header = format!("{:>6} │ {:<12} {:>10} {:<19}", "id", "Name", "Level", "Timestamp");
        let style = Style::new().bold();
        writeln!(f, "{}", style.apply_to(header.trim_end()))?;

        for (i, header) in self.headers.iter().enumerate() {
            let level = header
                .level
                .map(|level| level.to_string())
                .unwrap_or_else(|| "-".to_owned());
            writeln!(
                f,
                "{:>6} │ {:<12} {:>10} {:<19}",
                i,
                header.short_name,
                level,
                header.timestamp.format("%Y-%m-%d %H:%M:%S"),
            )?;
        }
        Ok(())
    }
}
