//! Command-line argument parsing
//!
//! Flags override the matching settings from the config file; anything not
//! given on the command line keeps its configured value.

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::csv::sniff::{detect_delimiter, is_supported_file, separator_for};
use crate::csv::{ParserOptions, RenderOptions};

/// Load delimited text files into typed tables
#[derive(Parser, Debug)]
#[command(
    name = "statgrid",
    version,
    about = "Load delimited text files into typed tables"
)]
pub struct CliArgs {
    /// Files to import
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Field separator (a single character, or `tab`)
    #[arg(short = 's', long, value_parser = parse_char)]
    pub separator: Option<char>,

    /// Quote character
    #[arg(long, value_parser = parse_char, conflicts_with = "no_quote")]
    pub quote: Option<char>,

    /// Escape character
    #[arg(long, value_parser = parse_char, conflicts_with = "no_escape")]
    pub escape: Option<char>,

    /// Treat quote characters as ordinary text
    #[arg(long)]
    pub no_quote: bool,

    /// Treat escape characters as ordinary text
    #[arg(long)]
    pub no_escape: bool,

    /// Drop every character outside quotes
    #[arg(long)]
    pub strict_quotes: bool,

    /// Keep whitespace in front of an embedded quote
    #[arg(long)]
    pub keep_leading_whitespace: bool,

    /// Skip N preamble lines before the header
    #[arg(long, value_name = "N")]
    pub skip: Option<usize>,

    /// First line is data, not column names
    #[arg(long)]
    pub no_header: bool,

    /// Allow quoted fields to span lines
    #[arg(short = 'm', long)]
    pub multiline: bool,

    /// Keep every column as text
    #[arg(long)]
    pub no_promote: bool,

    /// Guess the separator from each file's first lines
    #[arg(short = 'd', long, conflicts_with = "separator")]
    pub detect: bool,

    /// Print minimum, maximum and range of numeric columns
    #[arg(long)]
    pub stats: bool,

    /// Print tables as JSON instead of the text dump
    #[arg(long)]
    pub json: bool,

    /// Write the imported table back out as delimited text
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Show at most N rows per table
    #[arg(long, value_name = "N")]
    pub max_rows: Option<usize>,
}

/// Everything one run needs, after merging flags over the config file
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub files: Vec<PathBuf>,
    pub import: ParserOptions,
    pub render: RenderOptions,
    /// `--separator` was given; file extensions no longer pick one
    pub explicit_separator: bool,
    pub detect: bool,
    pub stats: bool,
    pub json: bool,
    pub output: Option<PathBuf>,
}

impl CliArgs {
    /// Apply the flags on top of `base`
    pub fn into_config(self, base: AppConfig) -> Result<RunConfig, String> {
        if self.output.is_some() && self.files.len() > 1 {
            return Err("--output needs exactly one input file".to_string());
        }

        let mut import = base.import;
        if let Some(separator) = self.separator {
            import.separator = separator;
        }
        if self.no_quote {
            import.quote = None;
        } else if let Some(quote) = self.quote {
            import.quote = Some(quote);
        }
        if self.no_escape {
            import.escape = None;
        } else if let Some(escape) = self.escape {
            import.escape = Some(escape);
        }
        if self.strict_quotes {
            import.strict_quotes = true;
        }
        if self.keep_leading_whitespace {
            import.ignore_leading_whitespace = false;
        }
        if let Some(skip) = self.skip {
            import.lines_to_skip = skip;
        }
        if self.no_header {
            import.header = false;
        }
        if self.multiline {
            import.multiline = true;
        }
        if self.no_promote {
            import.promote_numeric = false;
        }
        import.validate().map_err(|e| e.to_string())?;

        let mut render = base.render;
        if self.max_rows.is_some() {
            render.max_rows = self.max_rows;
        }

        Ok(RunConfig {
            files: self.files,
            import,
            render,
            explicit_separator: self.separator.is_some(),
            detect: self.detect,
            stats: self.stats,
            json: self.json,
            output: self.output,
        })
    }
}

impl RunConfig {
    /// Import options for one file.
    ///
    /// With `--detect` the separator is guessed from `sample`. Otherwise a
    /// `.tsv` or `.psv` extension picks it, unless `--separator` was given.
    pub fn options_for(&self, path: &Path, sample: Option<&str>) -> ParserOptions {
        if !is_supported_file(path) {
            tracing::warn!(path = %path.display(), "not a recognised delimited text extension");
        }

        let mut options = self.import.clone();
        match sample {
            Some(content) if self.detect => {
                options.separator = detect_delimiter(content).as_char();
                tracing::info!(path = %path.display(), separator = ?options.separator, "detected separator");
            }
            _ if !self.explicit_separator => {
                options.separator = separator_for(path, options.separator);
            }
            _ => {}
        }
        options
    }
}

/// Parse a character flag; accepts `tab` and `\t` for a tab
fn parse_char(value: &str) -> Result<char, String> {
    match value {
        "tab" | "\\t" => return Ok('\t'),
        _ => {}
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("expected a single character, got {:?}", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["statgrid"];
        argv.extend_from_slice(extra);
        CliArgs::parse_from(argv)
    }

    #[test]
    fn test_defaults_keep_config() {
        let config = args(&["data.csv"])
            .into_config(AppConfig::default())
            .unwrap();
        assert_eq!(config.files, vec![PathBuf::from("data.csv")]);
        assert_eq!(config.import, ParserOptions::default());
        assert!(!config.detect);
    }

    #[test]
    fn test_flags_override_config() {
        let mut base = AppConfig::default();
        base.import.multiline = false;
        base.import.lines_to_skip = 4;

        let config = args(&[
            "--separator",
            "tab",
            "--no-quote",
            "--skip",
            "1",
            "--no-header",
            "--multiline",
            "--no-promote",
            "--keep-leading-whitespace",
            "data.tsv",
        ])
        .into_config(base)
        .unwrap();

        assert_eq!(config.import.separator, '\t');
        assert_eq!(config.import.quote, None);
        assert_eq!(config.import.lines_to_skip, 1);
        assert!(!config.import.header);
        assert!(config.import.multiline);
        assert!(!config.import.promote_numeric);
        assert!(!config.import.ignore_leading_whitespace);
    }

    #[test]
    fn test_unset_flags_leave_config_values() {
        let mut base = AppConfig::default();
        base.import.separator = ';';
        base.render.max_rows = Some(5);

        let config = args(&["a.csv"]).into_config(base).unwrap();
        assert_eq!(config.import.separator, ';');
        assert_eq!(config.render.max_rows, Some(5));
    }

    #[test]
    fn test_clashing_characters_rejected() {
        let result = args(&["--escape", ",", "a.csv"]).into_config(AppConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_output_needs_single_file() {
        let cli = CliArgs {
            files: vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")],
            separator: None,
            quote: None,
            escape: None,
            no_quote: false,
            no_escape: false,
            strict_quotes: false,
            keep_leading_whitespace: false,
            skip: None,
            no_header: false,
            multiline: false,
            no_promote: false,
            detect: false,
            stats: false,
            json: false,
            output: Some(PathBuf::from("out.csv")),
            max_rows: None,
        };
        assert!(cli.into_config(AppConfig::default()).is_err());
    }

    #[test]
    fn test_extension_picks_separator() {
        let mut base = AppConfig::default();
        base.import.separator = ';';
        let run = args(&["a.tsv", "b.csv"]).into_config(base).unwrap();

        assert_eq!(run.options_for(Path::new("a.tsv"), None).separator, '\t');
        assert_eq!(run.options_for(Path::new("b.psv"), None).separator, '|');
        assert_eq!(run.options_for(Path::new("b.csv"), None).separator, ';');
    }

    #[test]
    fn test_explicit_separator_beats_extension() {
        let run = args(&["-s", ";", "a.tsv"])
            .into_config(AppConfig::default())
            .unwrap();
        assert!(run.explicit_separator);
        assert_eq!(run.options_for(Path::new("a.tsv"), None).separator, ';');
    }

    #[test]
    fn test_detect_uses_content() {
        let run = args(&["-d", "a.tsv"])
            .into_config(AppConfig::default())
            .unwrap();
        let options = run.options_for(Path::new("a.tsv"), Some("a|b|c\n1|2|3\n"));
        assert_eq!(options.separator, '|');
        assert_eq!(options.quote, ParserOptions::default().quote);
    }

    #[test]
    fn test_parse_char() {
        assert_eq!(parse_char(";"), Ok(';'));
        assert_eq!(parse_char("\\t"), Ok('\t'));
        assert_eq!(parse_char("tab"), Ok('\t'));
        assert!(parse_char("ab").is_err());
        assert!(parse_char("").is_err());
    }

    #[test]
    fn test_files_are_required() {
        assert!(CliArgs::try_parse_from(["statgrid"]).is_err());
    }

    #[test]
    fn test_detect_conflicts_with_separator() {
        assert!(CliArgs::try_parse_from(["statgrid", "-d", "-s", ";", "a.csv"]).is_err());
    }
}
