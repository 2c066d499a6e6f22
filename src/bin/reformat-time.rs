use std::io::Write;

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser};
use reformat_time::lens::time::{TimeFormatArgs, TimeLens};
use reformat_time::OutputFormat;
use tracing::Level;

trait Validate {
    fn validate(&self) -> Result<()>;
}

#[derive(Parser, Debug)]
#[clap(version, long_about = None)]
#[clap(about = "A tiny convenience tool to convert time formats.")]
#[clap(after_help = "Example:\n  reformat-time -u -- \"$(date)\"")]
#[clap(allow_negative_numbers = true)]
struct Cli {
    /// Print debug information
    #[clap(long)]
    debug: bool,

    /// Output format: text (default), json, json-pretty
    #[clap(long, default_value = "text")]
    format: OutputFormat,

    #[clap(flatten)]
    formats: TimeFormatArgs,

    /// Timestamp to convert: RFC3339, unix date, unix seconds/millis/float, or UUID
    #[clap(value_name = "TIME")]
    time: Vec<String>,
}

impl Validate for Cli {
    fn validate(&self) -> Result<()> {
        if self.time.len() != 1 {
            return Err(anyhow!(
                "reformat-time needs exactly one command line argument. got {:?}",
                self.time
            ));
        }
        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(e) = cli.validate() {
        eprintln!("{e}\n");
        eprintln!("{}", Cli::command().render_help());
        std::process::exit(1);
    }

    let lens = TimeLens::new();
    let converted = match lens.parse(&cli.time[0], &cli.formats) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    let mut stdout = std::io::stdout();
    if let Err(e) = writeln!(stdout, "{}", lens.format_results(&converted, &cli.format)) {
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            eprintln!("{e}");
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from(["reformat-time", "-u", "-m", "1697043600"]).unwrap();
        assert!(cli.formats.unix);
        assert!(cli.formats.unix_milli);
        assert!(!cli.formats.rfc3339_utc);
        assert_eq!(cli.time, vec!["1697043600"]);
        assert!(cli.validate().is_ok());

        let args = ["reformat-time", "--rfc3339-utc", "-r", "-f", "0"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.formats.rfc3339_utc);
        assert!(cli.formats.rfc3339);
        assert!(cli.formats.unix_float);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[cfg(feature = "uuid")]
    #[test]
    fn test_cli_uuid_alias() {
        let cli = Cli::try_parse_from(["reformat-time", "--id", "0"]).unwrap();
        assert!(cli.formats.uuid);
        let cli = Cli::try_parse_from(["reformat-time", "--uuid", "0"]).unwrap();
        assert!(cli.formats.uuid);
    }

    #[test]
    fn test_cli_hyphen_values() {
        let cli = Cli::try_parse_from(["reformat-time", "-u", "-1.5"]).unwrap();
        assert_eq!(cli.time, vec!["-1.5"]);

        let args = ["reformat-time", "-u", "--", "Mon Jan  2 15:04:05 UTC 2006"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.time, vec!["Mon Jan  2 15:04:05 UTC 2006"]);
    }

    #[test]
    fn test_cli_positional_count() {
        let cli = Cli::try_parse_from(["reformat-time"]).unwrap();
        assert!(cli.validate().is_err());

        let cli = Cli::try_parse_from(["reformat-time", "1", "2"]).unwrap();
        let err = cli.validate().unwrap_err();
        assert!(err.to_string().contains("exactly one"));
    }

    #[test]
    fn test_cli_output_format() {
        let cli = Cli::try_parse_from(["reformat-time", "--format", "json", "0"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);

        assert!(Cli::try_parse_from(["reformat-time", "--format", "table", "0"]).is_err());
    }
}
