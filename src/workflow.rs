//! End-to-end launcher workflow
//!
//! Strictly sequential, short-circuiting on the first fatal failure:
//!
//! 1. load config
//! 2. check path1/path2 exist
//! 3. check network reachability
//! 4. launch path1
//! 5. reset clipboard to the sentinel
//! 6. open the browser (non-fatal)
//! 7. watch the clipboard
//! 8. launch path2 after a capture (non-fatal)
//! 9. report completion

use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

use crate::clipboard::{watch, ClipboardAccess, WatchState};
use crate::config::Config;
use crate::constants::{clipboard::SENTINEL, exit};
use crate::error::{LauncherError, Target};
use crate::launcher::{self, ProcessSpawner};
use crate::notify::{Notification, NotificationSink};
use crate::preflight::{self, ReachabilityProbe};

/// Where to find things, resolved from the command line
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub config_path: PathBuf,
    pub url: String,
    pub browser: PathBuf,
}

#[derive(Debug)]
pub enum RunOutcome {
    TokenCaptured { secondary_launch_failed: bool },
    TimedOut { seconds: u64 },
    Failed(LauncherError),
}

impl RunOutcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            RunOutcome::TokenCaptured { .. } => ExitCode::SUCCESS,
            RunOutcome::TimedOut { .. } => ExitCode::from(exit::TIMED_OUT),
            RunOutcome::Failed(_) => ExitCode::FAILURE,
        }
    }

    fn summary(&self) -> String {
        match self {
            RunOutcome::TokenCaptured { secondary_launch_failed: false } => {
                "Token captured and formatted.".to_string()
            }
            RunOutcome::TokenCaptured { secondary_launch_failed: true } => {
                "Token captured and formatted, but the final command failed.".to_string()
            }
            RunOutcome::TimedOut { seconds } => {
                format!("The token was not copied within {seconds} seconds.")
            }
            RunOutcome::Failed(err) => format!("Stopped: {err}"),
        }
    }
}

/// The workflow and the capabilities it drives
pub struct Workflow<P, S, N> {
    pub settings: RunSettings,
    pub probe: P,
    pub spawner: S,
    pub sink: N,
}

impl<P, S, N> Workflow<P, S, N>
where
    P: ReachabilityProbe,
    S: ProcessSpawner,
    N: NotificationSink,
{
    pub async fn run(&self, clipboard: &mut impl ClipboardAccess) -> RunOutcome {
        let outcome = match self.prepare().await {
            Ok(config) => self.capture(&config, clipboard).await,
            Err(err) => RunOutcome::Failed(err),
        };
        info!(outcome = ?outcome, "Launcher finished");
        self.sink.notify(Notification::completed(outcome.summary()));
        outcome
    }

    /// Steps 1-4; every failure here is fatal and already reported
    async fn prepare(&self) -> Result<Config, LauncherError> {
        let config = Config::load(&self.settings.config_path).inspect_err(|err| {
            error!(error = %err, "Configuration error");
            self.sink.notify(Notification::config_error(err));
        })?;

        self.sink.status("Verifying access paths...");
        preflight::check_paths(&config).inspect_err(|err| {
            error!(error = %err, "Path access error");
            self.sink.notify(Notification::access_error(err));
        })?;
        info!("Executable paths verified");

        self.sink.status("Checking network connection...");
        if !self.probe.is_reachable(&self.settings.url).await {
            error!(url = %self.settings.url, "Network check failed, server not reachable");
            self.sink.notify(Notification::network_error());
            return Err(LauncherError::NetworkUnreachable {
                url: self.settings.url.clone(),
            });
        }
        info!("Network check passed");

        launcher::launch_detached(&self.spawner, Target::Primary, &config.path1).inspect_err(
            |err| {
                error!(error = %err, "Failed to launch path1");
                self.sink.notify(Notification::launch_error(err));
            },
        )?;

        Ok(config)
    }

    /// Steps 5-8
    async fn capture(&self, config: &Config, clipboard: &mut impl ClipboardAccess) -> RunOutcome {
        match clipboard.write_text(SENTINEL) {
            Ok(()) => info!(sentinel = SENTINEL, "Clipboard initialised with sentinel"),
            Err(err) => warn!(error = %err, "Could not reset clipboard to sentinel"),
        }

        if let Err(err) = launcher::open_browser(&self.spawner, &self.settings.browser, &self.settings.url) {
            self.sink.notify(Notification::browser_error(&err));
        }
        self.sink.status("Waiting for the token to be copied...");
        self.sink.notify(Notification::waiting_for_token());

        match watch(config, clipboard, &self.sink).await {
            WatchState::TokenCaptured { raw, formatted } => {
                info!(
                    raw_length = raw.len(),
                    formatted_length = formatted.len(),
                    "Formatted token left on the clipboard"
                );
                RunOutcome::TokenCaptured {
                    secondary_launch_failed: !self.run_final_command(config),
                }
            }
            WatchState::TimedOut | WatchState::WaitingForToken => RunOutcome::TimedOut {
                seconds: config.monitor_timeout_seconds,
            },
        }
    }

    /// Launch path2 if configured; false only when the launch failed
    fn run_final_command(&self, config: &Config) -> bool {
        let Some(path2) = &config.path2 else {
            return true;
        };
        info!(path = %path2.display(), "Running final command");
        match launcher::launch_detached(&self.spawner, Target::Secondary, path2) {
            Ok(()) => true,
            Err(err) => {
                error!(error = %err, "Final command failed");
                self.sink.notify(Notification::final_command_error(path2, &err));
                false
            }
        }
    }
}
