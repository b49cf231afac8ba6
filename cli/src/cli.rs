use std::{str::FromStr, sync::LazyLock};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

pub(crate) fn init_logger() {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .init();
}

/// A pair of numbers given as `X,Y`, such as a longitude and a latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CliPair(pub(crate) f64, pub(crate) f64);

impl FromStr for CliPair {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| anyhow::anyhow!("pair must be specified as 'X,Y'"))?;
        let parse = |v: &str| {
            f64::from_str(v.trim()).map_err(|_| anyhow::anyhow!("'{v}' is not a number"))
        };
        Ok(Self(parse(x)?, parse(y)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CliYearRange(pub(crate) i32, pub(crate) i32);

impl FromStr for CliYearRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(
                r"(?x)      # insignificant whitespace mode
                ^
                ([0-9]{4})  # first year
                (?:
                    -       # separator
                    ([0-9]{4})  # last year
                )?
                $",
            )
            .unwrap()
        });
        let cap = RE.captures(s).ok_or_else(|| {
            anyhow::anyhow!("years must be specified as 'YYYY' or 'YYYY-YYYY'")
        })?;
        let start = cap.get(1).unwrap();
        let start = i32::from_str(start.as_str())?;
        let end = match cap.get(2) {
            Some(end) => i32::from_str(end.as_str())?,
            None => start,
        };
        Ok(Self(start, end))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CliDateTime(pub(crate) NaiveDateTime);

impl FromStr for CliDateTime {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            return Ok(Self(date_time));
        }
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            anyhow::anyhow!("date must be specified as 'YYYY-MM-DD' or 'YYYY-MM-DDTHH:MM:SS'")
        })?;
        Ok(Self(date.and_time(NaiveTime::MIN)))
    }
}

macro_rules! module_component {
    () => {
        module_path!().split("::").last().unwrap_or("")
    };
}
pub(crate) use module_component;
