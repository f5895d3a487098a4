//! Command-line arguments.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use excerpt_config::Config;
use excerpt_truncate::SuffixPolicy;
use exn::ResultExt;

use crate::error::{ErrorKind, Result};

/// Truncate HTML to a number of visible characters, closing any open tags.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Input file; reads standard input when omitted or `-`
    pub input: Option<PathBuf>,

    /// Maximum number of visible characters to keep
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Text to insert before the closing tags
    #[arg(short, long)]
    pub suffix: Option<String>,

    /// Only add the suffix when something was cut off
    #[arg(long, action = ArgAction::SetTrue)]
    pub when_truncated: bool,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Flags given on the command line win over configured values.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        if let Some(suffix) = &self.suffix {
            config.suffix.clone_from(suffix);
        }
        if self.when_truncated {
            config.suffix_policy = SuffixPolicy::WhenTruncated;
        }
        config
    }

    /// Default log filter when `RUST_LOG` isn't set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub fn read_input(&self) -> Result<String> {
        let mut buffer = Vec::new();
        match self.input.as_deref() {
            None => read_all(std::io::stdin().lock(), &mut buffer)?,
            Some(path) if path == Path::new("-") => read_all(std::io::stdin().lock(), &mut buffer)?,
            Some(path) => read_all(File::open(path).or_raise(|| ErrorKind::Input)?, &mut buffer)?,
        }
        String::from_utf8(buffer).or_raise(|| ErrorKind::InvalidEncoding)
    }
}

fn read_all(mut reader: impl Read, buffer: &mut Vec<u8>) -> Result<()> {
    reader.read_to_end(buffer).or_raise(|| ErrorKind::Input)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("excerpt").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&["-n", "5", "--suffix", "...", "--when-truncated"]);
        let config = cli.apply(Config::default());
        assert_eq!(config, Config {
            limit: 5,
            suffix: "...".to_string(),
            suffix_policy: SuffixPolicy::WhenTruncated,
        });
    }

    #[test]
    fn config_is_kept_without_flags() {
        let cli = parse(&[]);
        assert_eq!(cli.apply(Config::default()), Config::default());
        assert_eq!(cli.input, None);
    }

    #[rstest]
    #[case(&[], "warn")]
    #[case(&["-v"], "info")]
    #[case(&["-vv"], "debug")]
    #[case(&["-vvvv"], "trace")]
    fn verbosity(#[case] args: &[&str], #[case] expected: &str) {
        assert_eq!(parse(args).log_filter(), expected);
    }

    #[test]
    fn reads_input_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("<p>Hello, <em>world</em></p>".as_bytes()).unwrap();
        let cli = parse(&[file.path().to_str().unwrap()]);
        assert_eq!(cli.read_input().unwrap(), "<p>Hello, <em>world</em></p>");
    }

    #[test]
    fn rejects_non_utf8_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<p>\xe9\xe8</p>").unwrap();
        let cli = parse(&[file.path().to_str().unwrap()]);
        assert_eq!(*cli.read_input().unwrap_err(), ErrorKind::InvalidEncoding);
    }

    #[test]
    fn missing_input_file() {
        let cli = parse(&["definitely/not/here.html"]);
        assert_eq!(*cli.read_input().unwrap_err(), ErrorKind::Input);
    }

    #[test]
    fn invalid_limit() {
        assert!(Cli::try_parse_from(["excerpt", "-n", "many"]).is_err());
    }
}
