// src/cli.rs
use clap::Parser;

/// scope-scout: bug bounty program scope viewer
///
/// Fetch programs from the import endpoint and list each program's
/// in-scope domains and URLs.
#[derive(Parser, Debug, Clone)]
#[command(name = "scope-scout")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    // ===== Input & Configuration =====
    /// Path to TOML config file (defaults apply when omitted)
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Override the endpoint base URL from config
    #[arg(long = "endpoint")]
    pub endpoint: Option<String>,

    // ===== Output Format =====
    /// Output one JSON object per program (JSONL) to stdout
    #[arg(short = 'j', long = "json")]
    pub json: bool,

    /// Output one CSV row per domain/URL to stdout
    #[arg(long = "csv")]
    pub csv: bool,

    // ===== Output Destination =====
    /// Write output to file instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<String>,

    // ===== Display =====
    /// Disable the loading spinner
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    // ===== Logging =====
    /// Verbose logging (set log level to debug)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Quiet logging (set log level to warn)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    // ===== Utility Commands =====
    /// Print normalized scope of every program as TOML and exit
    #[arg(long = "export-scope")]
    pub export_scope: bool,
}

impl Cli {
    /// Validate flag combinations and return errors for invalid usage
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.json && self.csv {
            anyhow::bail!(
                "Cannot specify multiple output formats. \
                Choose one of: --json or --csv"
            );
        }

        if self.export_scope && (self.json || self.csv) {
            anyhow::bail!("--export-scope always prints TOML; drop --json/--csv");
        }

        if self.verbose && self.quiet {
            anyhow::bail!("Cannot specify both --verbose and --quiet");
        }

        Ok(())
    }

    /// Determine the output format based on flags
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.csv {
            OutputFormat::Csv
        } else {
            OutputFormat::Human
        }
    }

    /// Spinner only for human output
    pub fn should_show_progress(&self) -> bool {
        !self.no_progress && !self.json && !self.csv && !self.export_scope
    }

    /// Log level forced by flags, if any
    pub fn log_level(&self) -> Option<&str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("warn")
        } else {
            None
        }
    }
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable colored text output (default)
    Human,
    /// JSON Lines format (one JSON object per program)
    Json,
    /// CSV format
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_config_by_default() {
        let cli = Cli::parse_from(["scope-scout"]);
        assert_eq!(cli.config, None);
        assert_eq!(cli.endpoint, None);
    }

    #[test]
    fn test_custom_config_and_endpoint() {
        let cli = Cli::parse_from([
            "scope-scout",
            "--config",
            "custom.toml",
            "--endpoint",
            "http://10.0.0.2:8000",
        ]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        assert_eq!(cli.endpoint.as_deref(), Some("http://10.0.0.2:8000"));
    }

    #[test]
    fn test_output_formats() {
        assert_eq!(Cli::parse_from(["scope-scout"]).output_format(), OutputFormat::Human);
        assert_eq!(Cli::parse_from(["scope-scout", "--json"]).output_format(), OutputFormat::Json);
        assert_eq!(Cli::parse_from(["scope-scout", "--csv"]).output_format(), OutputFormat::Csv);
    }

    #[test]
    fn test_multiple_formats_invalid() {
        let cli = Cli::parse_from(["scope-scout", "--json", "--csv"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_export_scope_with_format_invalid() {
        let cli = Cli::parse_from(["scope-scout", "--export-scope", "--json"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_verbose_and_quiet_invalid() {
        let cli = Cli::parse_from(["scope-scout", "--verbose", "--quiet"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_valid_combination() {
        let cli = Cli::parse_from(["scope-scout", "--csv", "-o", "scope.csv", "-v"]);
        assert!(cli.validate().is_ok());
        assert_eq!(cli.output.as_deref(), Some("scope.csv"));
    }

    #[test]
    fn test_progress() {
        assert!(Cli::parse_from(["scope-scout"]).should_show_progress());
        assert!(!Cli::parse_from(["scope-scout", "--json"]).should_show_progress());
        assert!(!Cli::parse_from(["scope-scout", "--no-progress"]).should_show_progress());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(Cli::parse_from(["scope-scout", "-v"]).log_level(), Some("debug"));
        assert_eq!(Cli::parse_from(["scope-scout", "-q"]).log_level(), Some("warn"));
        assert_eq!(Cli::parse_from(["scope-scout"]).log_level(), None);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::parse_from(["scope-scout", "-c", "test.toml", "-j", "-o", "out.jsonl"]);
        assert_eq!(cli.config.as_deref(), Some("test.toml"));
        assert!(cli.json);
        assert_eq!(cli.output.as_deref(), Some("out.jsonl"));
    }
}
