//! CLI - Command Line Interface for subfetch
//!
//! The remote transport is supplied by library users, so the binary only
//! exposes local operations. Output is JSON-parseable with `--json`.
//!
//! # Examples
//!
//! ```bash
//! # Fingerprint video files
//! subfetch hash movie.mkv other.avi
//!
//! # Show the resolved configuration
//! subfetch config --json
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments or unreadable input file
    InvalidArgs = 2,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// subfetch - subtitle lookup by video fingerprint
#[derive(Parser, Debug)]
#[command(
    name = "subfetch",
    version,
    about = "Subtitle lookup by video fingerprint",
    after_help = "EXAMPLES:\n\
                  subfetch hash movie.mkv             Print fingerprint and size\n\
                  subfetch config --path              Show config file location\n\
                  subfetch config --init              Create a default config file"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the lookup fingerprint of video files
    #[command(visible_alias = "h")]
    Hash(HashCmd),

    /// Show the resolved configuration, or create a default one
    Config(ConfigCmd),
}

/// Fingerprint one or more files
#[derive(Args, Debug)]
pub struct HashCmd {
    /// Video files to fingerprint
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Inspect configuration
#[derive(Args, Debug)]
pub struct ConfigCmd {
    /// Only print the config file location
    #[arg(long, conflicts_with = "init")]
    pub path: bool,

    /// Write a default config file if none exists yet
    #[arg(long)]
    pub init: bool,
}

// =============================================================================
// Response Types
// =============================================================================

/// Standard JSON output wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Fingerprint of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashEntry {
    pub path: PathBuf,
    pub hash: String,
    pub size: u64,
}

/// Resolved configuration as shown by `subfetch config`
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub user_agent: String,
    pub language: String,
    pub anonymous: bool,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print a plain line, or nothing in JSON mode
    pub fn line(&self, msg: impl std::fmt::Display) {
        if !self.json {
            println!("{}", msg);
        }
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Error), 1);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
    }

    #[test]
    fn test_process_exit_code_matches() {
        let code = std::process::ExitCode::from(ExitCode::InvalidArgs);
        assert_eq!(format!("{:?}", code), format!("{:?}", std::process::ExitCode::from(2u8)));
    }

    #[test]
    fn test_json_output_skips_empty_fields() {
        let ok = serde_json::to_string(&JsonOutput::success(1)).unwrap();
        assert_eq!(ok, r#"{"data":1}"#);

        let err = serde_json::to_string(&JsonOutput::<()>::error_msg("boom", ExitCode::InvalidArgs)).unwrap();
        assert_eq!(err, r#"{"error":"boom","exit_code":2}"#);
    }
}
