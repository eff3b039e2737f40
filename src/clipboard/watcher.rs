//! Clipboard watch: wait for a qualifying copy, then rewrite it
//!
//! [`ClipboardWatcher`] is a plain state machine advanced by [`ClipboardWatcher::tick`]
//! with an explicit `now`, so capture and timeout are decided against a
//! deadline value rather than a timer callback. [`watch`] drives it on a
//! fixed cadence until it reaches a terminal state.

use std::time::{Duration, Instant};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::ClipboardAccess;
use crate::config::Config;
use crate::constants::clipboard::{MAX_WATCH_SECS, POLL_INTERVAL_MS, SENTINEL};
use crate::notify::{Notification, NotificationSink};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchState {
    WaitingForToken,
    TokenCaptured { raw: String, formatted: String },
    TimedOut,
}

impl WatchState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, WatchState::WaitingForToken)
    }
}

/// True when trimmed clipboard text counts as a freshly copied token
pub fn qualifies(text: &str, min_token_length: usize) -> bool {
    text != SENTINEL && text.len() >= min_token_length
}

pub struct ClipboardWatcher<'a> {
    config: &'a Config,
    deadline: Instant,
    state: WatchState,
}

impl<'a> ClipboardWatcher<'a> {
    pub fn new(config: &'a Config, started: Instant) -> Self {
        // Capped so the deadline stays representable as an Instant
        let timeout = Duration::from_secs(config.monitor_timeout_seconds.min(MAX_WATCH_SECS));
        Self {
            config,
            deadline: started + timeout,
            state: WatchState::WaitingForToken,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn state(&self) -> &WatchState {
        &self.state
    }

    pub fn into_state(self) -> WatchState {
        self.state
    }

    /// Deadline reached without a capture
    pub fn expire(&mut self) {
        if !self.state.is_terminal() {
            self.state = WatchState::TimedOut;
        }
    }

    /// Inspect the clipboard once. Terminal states are never left.
    pub fn tick(&mut self, now: Instant, clipboard: &mut impl ClipboardAccess) -> &WatchState {
        if self.state.is_terminal() {
            return &self.state;
        }
        if now >= self.deadline {
            self.expire();
            return &self.state;
        }

        // A failed read is the same as "nothing new" for this tick
        let text = match clipboard.read_text() {
            Ok(text) => text,
            Err(err) => {
                debug!(error = %err, "Clipboard read failed, retrying next tick");
                return &self.state;
            }
        };
        let token = text.trim();
        if !qualifies(token, self.config.min_token_length) {
            return &self.state;
        }

        info!(length = token.len(), "Valid change detected, raw token captured");
        let formatted = self.config.format_token(token);
        if let Err(err) = clipboard.write_text(&formatted) {
            warn!(error = %err, "Could not write formatted token, retrying next tick");
            return &self.state;
        }
        info!(length = formatted.len(), "Clipboard updated with formatted token");

        self.state = WatchState::TokenCaptured {
            raw: token.to_string(),
            formatted,
        };
        &self.state
    }
}

/// Poll the clipboard once per second until a token is captured or the
/// configured timeout elapses. Returns the terminal state.
pub async fn watch(
    config: &Config,
    clipboard: &mut impl ClipboardAccess,
    sink: &impl NotificationSink,
) -> WatchState {
    info!(
        timeout_secs = config.monitor_timeout_seconds,
        min_token_length = config.min_token_length,
        "Starting clipboard monitoring"
    );

    let start = time::Instant::now();
    let mut watcher = ClipboardWatcher::new(config, start.into_std());
    let period = Duration::from_millis(POLL_INTERVAL_MS);

    let mut ticker = time::interval_at(start + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let deadline = time::sleep_until(time::Instant::from_std(watcher.deadline()));
    tokio::pin!(deadline);

    while !watcher.state().is_terminal() {
        tokio::select! {
            biased;
            _ = &mut deadline => watcher.expire(),
            now = ticker.tick() => {
                watcher.tick(now.into_std(), &mut *clipboard);
            }
        }
    }

    let state = watcher.into_state();
    match &state {
        WatchState::TokenCaptured { .. } => sink.notify(Notification::token_processed()),
        WatchState::TimedOut => {
            info!(timeout_secs = config.monitor_timeout_seconds, "Timed out waiting for token");
            sink.notify(Notification::timeout(config.monitor_timeout_seconds));
        }
        WatchState::WaitingForToken => {}
    }
    state
}
