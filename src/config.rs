//! Launcher configuration loaded from a plain `key=value` file
//!
//! ```text
//! # comment lines start with '#', blank lines ignored
//! path1=<absolute-path-to-executable>
//! path2=<absolute-path-to-executable>
//! prefix=<string>
//! suffix=<string>
//! monitor_timeout_seconds=<positive integer>
//! min_token_length=<positive integer>
//! ```
//!
//! Lines without `=` and unknown keys are skipped silently. Numeric values
//! that do not parse are treated as absent.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::config::{
    keys, DEFAULT_MIN_TOKEN_LENGTH, DEFAULT_MONITOR_TIMEOUT_SECONDS,
};
use crate::error::ConfigError;

/// Immutable launcher settings (loaded once at startup)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Primary executable, launched before the browser
    pub path1: PathBuf,

    /// Secondary executable, launched after the token is captured
    pub path2: Option<PathBuf>,

    pub prefix: String,
    pub suffix: String,

    /// Always positive after load
    pub monitor_timeout_seconds: u64,

    /// Always positive after load
    pub min_token_length: usize,
}

/// Values as they appear in the file, before defaults and validation
#[derive(Debug, Default)]
struct RawConfig {
    path1: String,
    path2: String,
    prefix: String,
    suffix: String,
    monitor_timeout_seconds: Option<i64>,
    min_token_length: Option<i64>,
}

impl RawConfig {
    fn apply(&mut self, key: &str, value: &str) {
        match key {
            keys::PATH1 => self.path1 = value.to_string(),
            keys::PATH2 => self.path2 = value.to_string(),
            keys::PREFIX => self.prefix = value.to_string(),
            keys::SUFFIX => self.suffix = value.to_string(),
            // A later unparsable line resets an earlier valid one
            keys::MONITOR_TIMEOUT_SECONDS => self.monitor_timeout_seconds = value.parse().ok(),
            keys::MIN_TOKEN_LENGTH => self.min_token_length = value.parse().ok(),
            other => debug!(key = %other, "Ignoring unknown config key"),
        }
    }

    fn missing_required(&self) -> Vec<&'static str> {
        [
            (keys::PATH1, &self.path1),
            (keys::PREFIX, &self.prefix),
            (keys::SUFFIX, &self.suffix),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key)
        .collect()
    }
}

impl Config {
    /// Resolve the config location: absolute paths are used as-is, relative
    /// ones are looked up next to the running executable
    pub fn resolve_path(name: &Path) -> PathBuf {
        if name.is_absolute() {
            return name.to_path_buf();
        }
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(name)
    }

    /// Read and validate the config file at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents, path)?;
        info!(
            path = %path.display(),
            path1 = %config.path1.display(),
            path2 = ?config.path2,
            timeout_secs = config.monitor_timeout_seconds,
            min_token_length = config.min_token_length,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse config text; `origin` is only used in error messages
    pub fn parse(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        let mut raw = RawConfig::default();

        for line in contents.lines() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                raw.apply(key.trim(), value.trim());
            }
        }

        let missing = raw.missing_required();
        if !missing.is_empty() {
            return Err(ConfigError::MissingRequired {
                path: origin.to_path_buf(),
                missing,
            });
        }

        let monitor_timeout_seconds = raw
            .monitor_timeout_seconds
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_MONITOR_TIMEOUT_SECONDS, |secs| secs as u64);
        let min_token_length = raw
            .min_token_length
            .filter(|len| *len > 0)
            .map_or(DEFAULT_MIN_TOKEN_LENGTH, |len| len as usize);

        Ok(Self {
            path1: PathBuf::from(raw.path1),
            path2: (!raw.path2.is_empty()).then(|| PathBuf::from(raw.path2)),
            prefix: raw.prefix,
            suffix: raw.suffix,
            monitor_timeout_seconds,
            min_token_length,
        })
    }

    /// Wrap a captured token with the configured prefix and suffix
    pub fn format_token(&self, token: &str) -> String {
        format!("{}{}{}", self.prefix, token, self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(contents: &str) -> Result<Config, ConfigError> {
        Config::parse(contents, Path::new("config.txt"))
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse(
            r"
path1=C:\App1\run.exe
path2=C:\App2\start.exe
prefix=PRE-
suffix=-SUF
monitor_timeout_seconds=300
min_token_length=40
",
        )
        .unwrap();

        assert_eq!(config.path1, PathBuf::from(r"C:\App1\run.exe"));
        assert_eq!(config.path2, Some(PathBuf::from(r"C:\App2\start.exe")));
        assert_eq!(config.prefix, "PRE-");
        assert_eq!(config.suffix, "-SUF");
        assert_eq!(config.monitor_timeout_seconds, 300);
        assert_eq!(config.min_token_length, 40);
    }

    #[test]
    fn test_parse_defaults_when_numeric_keys_absent() {
        let config = parse("path1=/opt/app/run\nprefix=PRE-\nsuffix=-SUF\n").unwrap();
        assert_eq!(config.monitor_timeout_seconds, 600);
        assert_eq!(config.min_token_length, 50);
        assert_eq!(config.path2, None);
    }

    #[test]
    fn test_parse_defaults_when_numeric_keys_non_positive_or_invalid() {
        for (timeout, min_len) in [("0", "-3"), ("-1", "0"), ("abc", "12x"), ("", "")] {
            let text = format!(
                "path1=/opt/app/run\nprefix=P\nsuffix=S\nmonitor_timeout_seconds={timeout}\nmin_token_length={min_len}\n"
            );
            let config = parse(&text).unwrap();
            assert_eq!(config.monitor_timeout_seconds, 600, "timeout input {timeout:?}");
            assert_eq!(config.min_token_length, 50, "min length input {min_len:?}");
        }
    }

    #[test]
    fn test_parse_later_invalid_value_resets_earlier_one() {
        let config = parse(
            "path1=/a\nprefix=P\nsuffix=S\nmin_token_length=40\nmin_token_length=oops\n",
        )
        .unwrap();
        assert_eq!(config.min_token_length, 50);
    }

    #[test]
    fn test_parse_skips_comments_blank_and_malformed_lines() {
        let config = parse(
            "# a comment with path1=/nope\n\n   \nnot a pair\nunknown=value\npath1 = /opt/app/run \nprefix=PRE-\nsuffix=-SUF\n",
        )
        .unwrap();
        assert_eq!(config.path1, PathBuf::from("/opt/app/run"));
    }

    #[test]
    fn test_parse_splits_on_first_equals_only() {
        let config = parse("path1=/a\nprefix=token=\nsuffix==end\n").unwrap();
        assert_eq!(config.prefix, "token=");
        assert_eq!(config.suffix, "=end");
    }

    #[test]
    fn test_parse_string_values_round_trip_untouched() {
        let config = parse("path1=/a b/c\nprefix=SKYTEST#;\nsuffix=;#TESTSKY\n").unwrap();
        assert_eq!(config.path1, PathBuf::from("/a b/c"));
        assert_eq!(config.prefix, "SKYTEST#;");
        assert_eq!(config.suffix, ";#TESTSKY");
    }

    #[test]
    fn test_parse_missing_required_keys() {
        for (text, expected) in [
            ("prefix=P\nsuffix=S\n", vec!["path1"]),
            ("path1=/a\nsuffix=S\n", vec!["prefix"]),
            ("path1=/a\nprefix=P\n", vec!["suffix"]),
            ("path1=\nprefix=\nsuffix=\n", vec!["path1", "prefix", "suffix"]),
        ] {
            match parse(text) {
                Err(ConfigError::MissingRequired { missing, .. }) => assert_eq!(missing, expected),
                other => panic!("expected MissingRequired for {text:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_empty_path2_means_none() {
        let config = parse("path1=/a\npath2=\nprefix=P\nsuffix=S\n").unwrap();
        assert_eq!(config.path2, None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "path1=/opt/app/run\r\nprefix=PRE-\r\nsuffix=-SUF\r\nmin_token_length=5\r\n").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.suffix, "-SUF");
        assert_eq!(config.min_token_length, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable { .. }));
    }

    #[test]
    fn test_resolve_path_keeps_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let absolute = dir.path().join("config.txt");
        assert_eq!(Config::resolve_path(&absolute), absolute);
    }

    #[test]
    fn test_resolve_path_relative_to_executable() {
        let resolved = Config::resolve_path(Path::new("config.txt"));
        let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(resolved, exe_dir.join("config.txt"));
    }

    #[test]
    fn test_format_token() {
        let config = parse("path1=/a\nprefix=PRE-\nsuffix=-SUF\n").unwrap();
        assert_eq!(config.format_token("hello"), "PRE-hello-SUF");
    }
}
