//! User-facing notifications
//!
//! The workflow never talks to the desktop directly. It pushes discrete
//! [`Notification`]s into a bounded queue; a dispatcher task drains the queue,
//! logs every event and hands it to a [`Presenter`].

use std::fmt::Display;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error, info, warn};

use crate::constants::notify::NOTIFY_SEND;
use crate::launcher::{ProcessSpawner, SpawnRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Progress information
    Info,
    /// Blocking-style alert (errors, timeout)
    Alert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    ConfigError,
    AccessError,
    NetworkError,
    LaunchError,
    BrowserError,
    WaitingForToken,
    TokenProcessed,
    Timeout,
    FinalCommandError,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub severity: Severity,
    pub title: String,
    pub body: String,
}

impl Notification {
    fn new(kind: NotificationKind, severity: Severity, title: &str, body: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            title: title.to_string(),
            body: body.into(),
        }
    }

    pub fn config_error(err: &impl Display) -> Self {
        Self::new(NotificationKind::ConfigError, Severity::Alert, "Configuration Error", err.to_string())
    }

    pub fn access_error(err: &impl Display) -> Self {
        Self::new(NotificationKind::AccessError, Severity::Alert, "Access Error", err.to_string())
    }

    pub fn network_error() -> Self {
        Self::new(
            NotificationKind::NetworkError,
            Severity::Alert,
            "Network Error",
            "Cannot reach the server deployed inside the bank. Check your network connection or VPN.",
        )
    }

    pub fn launch_error(err: &impl Display) -> Self {
        Self::new(NotificationKind::LaunchError, Severity::Alert, "Error Launching Path1", err.to_string())
    }

    pub fn browser_error(err: &impl Display) -> Self {
        Self::new(NotificationKind::BrowserError, Severity::Info, "Browser Not Opened", err.to_string())
    }

    pub fn waiting_for_token() -> Self {
        Self::new(
            NotificationKind::WaitingForToken,
            Severity::Info,
            "Waiting for Token",
            "Please complete the login to copy the token.",
        )
    }

    pub fn token_processed() -> Self {
        Self::new(
            NotificationKind::TokenProcessed,
            Severity::Info,
            "Token Processed",
            "The token has been formatted.",
        )
    }

    pub fn timeout(seconds: u64) -> Self {
        Self::new(
            NotificationKind::Timeout,
            Severity::Alert,
            "Time Expired",
            format!("The token was not copied within {seconds} seconds."),
        )
    }

    pub fn final_command_error(path: &Path, err: &impl Display) -> Self {
        Self::new(
            NotificationKind::FinalCommandError,
            Severity::Alert,
            "Final Command Error",
            format!("Could not run the final command: {}\nError: {err}", path.display()),
        )
    }

    pub fn completed(summary: impl Into<String>) -> Self {
        Self::new(NotificationKind::Completed, Severity::Info, "Sky Launcher", summary)
    }
}

/// Anything the workflow can report to
pub trait NotificationSink {
    fn notify(&self, notification: Notification);

    /// Short status line (tray tooltip in a desktop shell)
    fn status(&self, text: &str) {
        debug!(status = %text, "Status changed");
    }
}

/// Sending half of the bounded notification queue
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::Sender<Notification>,
}

/// Create the bounded notification queue
pub fn channel(capacity: usize) -> (Notifier, mpsc::Receiver<Notification>) {
    let (tx, rx) = mpsc::channel(capacity);
    (Notifier { tx }, rx)
}

impl NotificationSink for Notifier {
    fn notify(&self, notification: Notification) {
        // Never block the workflow on a slow presenter
        match self.tx.try_send(notification) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                warn!(kind = ?dropped.kind, "Notification queue full, dropping event");
            }
            Err(TrySendError::Closed(dropped)) => {
                debug!(kind = ?dropped.kind, "Notification dispatcher gone, dropping event");
            }
        }
    }
}

/// Shows a notification to the user
pub trait Presenter {
    fn present(&self, notification: &Notification);
}

/// Presenter that only writes to the log
#[cfg(not(target_os = "linux"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPresenter;

#[cfg(not(target_os = "linux"))]
impl Presenter for LogPresenter {
    fn present(&self, _notification: &Notification) {}
}

/// Forwards notifications to the desktop through `notify-send`
pub struct DesktopPresenter<S> {
    spawner: S,
}

impl<S: ProcessSpawner> DesktopPresenter<S> {
    pub fn new(spawner: S) -> Self {
        Self { spawner }
    }

    fn request_for(notification: &Notification) -> SpawnRequest {
        let urgency = match notification.severity {
            Severity::Alert => "critical",
            Severity::Info => "normal",
        };
        SpawnRequest {
            program: PathBuf::from(NOTIFY_SEND),
            args: vec![
                "--urgency".to_string(),
                urgency.to_string(),
                "--app-name".to_string(),
                crate::constants::logging::FILE_PREFIX.to_string(),
                notification.title.clone(),
                notification.body.clone(),
            ],
            working_dir: None,
        }
    }
}

impl<S: ProcessSpawner> Presenter for DesktopPresenter<S> {
    fn present(&self, notification: &Notification) {
        if let Err(err) = self.spawner.spawn(&Self::request_for(notification)) {
            debug!(error = %err, "Desktop notification unavailable");
        }
    }
}

/// Drain the queue until every sender is gone
pub async fn dispatch(mut rx: mpsc::Receiver<Notification>, presenter: impl Presenter) {
    while let Some(notification) = rx.recv().await {
        match notification.severity {
            Severity::Alert => error!(title = %notification.title, "{}", notification.body),
            Severity::Info => info!(title = %notification.title, "{}", notification.body),
        }
        presenter.present(&notification);
    }
    debug!("Notification dispatcher stopped");
}
