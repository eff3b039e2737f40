//! Error taxonomy for the launcher workflow

use std::path::PathBuf;
use thiserror::Error;

/// Why the configuration file could not be turned into a [`Config`](crate::config::Config)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file '{}' must contain at least 'path1', 'prefix' and 'suffix' (missing: {})", path.display(), missing.join(", "))]
    MissingRequired {
        path: PathBuf,
        missing: Vec<&'static str>,
    },
}

/// Which configured executable a path check or launch refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Primary,
    Secondary,
    Browser,
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Primary => f.write_str("path1"),
            Target::Secondary => f.write_str("path2"),
            Target::Browser => f.write_str("browser"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LauncherError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not find the {target} file: {}{}", path.display(), hint(*target))]
    PathNotFound { target: Target, path: PathBuf },

    #[error("cannot reach {url}. Check your network connection or VPN")]
    NetworkUnreachable { url: String },

    #[error("failed to launch {target} ({}): {source}", path.display())]
    Launch {
        target: Target,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn hint(target: Target) -> &'static str {
    match target {
        Target::Primary => ". Make sure the network drive is mounted",
        _ => "",
    }
}
