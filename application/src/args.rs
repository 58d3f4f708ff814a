//! [`Args`] definitions.

use std::num::NonZeroU32;

use clap::Parser;
use common::DateTime;
use service::domain::ticket;

/// Books a free parking session for today.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "configuration.yaml")]
    pub config: String,

    /// Number of days to book the session for.
    #[arg(short, long, default_value = "1")]
    pub days: NonZeroU32,

    /// RFC 3339 date and time the session starts at [default: now].
    #[arg(short, long, value_parser = parse_start)]
    pub start: Option<ticket::StartDateTime>,

    /// Only print the account and its current tickets.
    #[arg(short, long, conflicts_with = "quota")]
    pub list: bool,

    /// Only print the remaining Textbelt quota.
    #[arg(short, long)]
    pub quota: bool,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Parses the `--start` argument.
fn parse_start(
    input: &str,
) -> Result<ticket::StartDateTime, common::datetime::ParseError> {
    DateTime::from_rfc3339(input).map(|dt| dt.truncate_subsec().coerce())
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;
    use common::DateTime;

    use super::Args;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["park-free"]).unwrap();

        assert_eq!(args.config, "configuration.yaml");
        assert_eq!(args.days.get(), 1);
        assert!(args.start.is_none());
        assert!(!args.list);
        assert!(!args.quota);
    }

    #[test]
    fn parses_start_time() {
        let args = Args::try_parse_from([
            "park-free",
            "--days",
            "3",
            "--start",
            "2023-03-16T22:41:52.5+01:00",
        ])
        .unwrap();

        assert_eq!(args.days.get(), 3);
        assert_eq!(
            args.start,
            Some(
                DateTime::from_rfc3339("2023-03-16T21:41:52Z")
                    .unwrap()
                    .coerce(),
            ),
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Args::try_parse_from(["park-free", "--days", "0"]).is_err());
        assert!(
            Args::try_parse_from(["park-free", "--start", "today"]).is_err(),
        );
        assert!(
            Args::try_parse_from(["park-free", "--list", "--quota"]).is_err(),
        );
    }
}
