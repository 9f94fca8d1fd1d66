//! CLI Command Handlers
//!
//! Each handler takes CLI args and Output, returns ExitCode.

use std::path::Path;

use tracing::debug;

use crate::cli::{ConfigCmd, ConfigView, ExitCode, HashCmd, HashEntry, Output};
use crate::config::Config;
use crate::hash::MovieHash;

// =============================================================================
// Hash Command
// =============================================================================

pub fn hash_cmd(cmd: HashCmd, output: &Output) -> ExitCode {
    output.info(format!("Hashing {} file(s)", cmd.files.len()));
    let mut entries = Vec::with_capacity(cmd.files.len());

    for file in &cmd.files {
        match hash_file(file) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                return output.error(
                    format!("cannot read {}: {}", file.display(), e),
                    ExitCode::InvalidArgs,
                )
            }
        }
    }

    if output.json {
        if let Err(e) = output.print(&entries) {
            return output.error(e.to_string(), ExitCode::Error);
        }
    } else {
        for entry in &entries {
            output.line(format!("{}  {:>12}  {}", entry.hash, entry.size, entry.path.display()));
        }
    }

    ExitCode::Success
}

/// Fingerprint a single file
pub fn hash_file(path: &Path) -> std::io::Result<HashEntry> {
    let (hash, size) = MovieHash::from_file(path)?;
    debug!(path = %path.display(), %hash, size, "hashed file");
    Ok(HashEntry {
        path: path.to_path_buf(),
        hash: hash.to_string(),
        size,
    })
}

// =============================================================================
// Config Command
// =============================================================================

pub fn config_cmd(cmd: ConfigCmd, config_path: Option<&Path>, output: &Output) -> ExitCode {
    let path = config_path.map(Path::to_path_buf).or_else(Config::path);

    if cmd.init {
        return init_config(config_path, path.as_deref(), output);
    }

    if cmd.path {
        return match path {
            Some(p) => {
                if output.json {
                    if let Err(e) = output.print(&p) {
                        return output.error(e.to_string(), ExitCode::Error);
                    }
                } else {
                    output.line(p.display());
                }
                ExitCode::Success
            }
            None => output.error("could not determine config path", ExitCode::Error),
        };
    }

    let config = match config_path {
        Some(p) => match Config::load_from(p) {
            Ok(config) => config,
            Err(e) => return output.error(format!("{:#}", e), ExitCode::InvalidArgs),
        },
        None => Config::load(),
    };

    let view = config_view(&config, path);
    if let Err(e) = output.print(&view) {
        return output.error(e.to_string(), ExitCode::Error);
    }
    ExitCode::Success
}

/// Write a default config file, refusing to overwrite an existing one
fn init_config(explicit: Option<&Path>, target: Option<&Path>, output: &Output) -> ExitCode {
    let Some(target) = target else {
        return output.error("could not determine config path", ExitCode::Error);
    };
    if target.exists() {
        return output.error(
            format!("{} already exists", target.display()),
            ExitCode::InvalidArgs,
        );
    }

    let config = Config::default();
    let written = match explicit {
        Some(p) => config.save_to(p).map(|()| p.to_path_buf()),
        None => config.save(),
    };

    match written {
        Ok(p) => {
            output.info(format!("Wrote {}", p.display()));
            if let Err(e) = output.print(config_view(&config, Some(p))) {
                return output.error(e.to_string(), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("{:#}", e), ExitCode::Error),
    }
}

/// Resolved settings, without the password
pub fn config_view(config: &Config, path: Option<std::path::PathBuf>) -> ConfigView {
    ConfigView {
        path,
        user_agent: config.user_agent(),
        language: config.language().to_string(),
        anonymous: config.username.as_deref().map_or(true, str::is_empty),
    }
}
