use clap::Parser;
use std::path::PathBuf;

use crate::constants::{browser::DEFAULT_BROWSER, config::FILENAME, network::REMOTE_URL};
use crate::workflow::RunSettings;

/// sky-launcher – open the bank web client and reformat the copied token
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file. Relative paths are resolved next to the executable
    #[arg(long, value_name = "PATH", default_value = FILENAME)]
    pub config: PathBuf,

    /// Endpoint used for the network check and opened in the browser
    #[arg(long, value_name = "URL", default_value = REMOTE_URL)]
    pub url: String,

    /// Browser binary launched with the URL as its only argument
    #[arg(long, value_name = "PATH", default_value = DEFAULT_BROWSER)]
    pub browser: PathBuf,

    /// Directory for the daily log file (defaults to the executable's folder)
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Load and validate the configuration, print it as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        crate::config::Config::resolve_path(&self.config)
    }

    pub fn run_settings(&self) -> RunSettings {
        RunSettings {
            config_path: self.config_path(),
            url: self.url.clone(),
            browser: self.browser.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sky-launcher"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config.txt"));
        assert_eq!(cli.url, REMOTE_URL);
        assert_eq!(cli.browser, PathBuf::from(DEFAULT_BROWSER));
        assert!(cli.log_dir.is_none());
        assert!(!cli.print_config);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "sky-launcher",
            "--config",
            "/etc/sky/config.txt",
            "--url",
            "https://example.test/",
            "--browser",
            "firefox",
            "--log-dir",
            "/tmp",
            "--print-config",
        ])
        .unwrap();

        let settings = cli.run_settings();
        assert_eq!(settings.config_path, PathBuf::from("/etc/sky/config.txt"));
        assert_eq!(settings.url, "https://example.test/");
        assert_eq!(settings.browser, PathBuf::from("firefox"));
        assert_eq!(cli.log_dir, Some(PathBuf::from("/tmp")));
        assert!(cli.print_config);
    }
}
