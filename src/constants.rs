//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Configuration file constants
pub mod config {
    /// Default config file name, resolved next to the executable
    pub const FILENAME: &str = "config.txt";

    /// Default clipboard watch timeout when unset or non-positive
    pub const DEFAULT_MONITOR_TIMEOUT_SECONDS: u64 = 600;

    /// Default minimum token length when unset or non-positive
    pub const DEFAULT_MIN_TOKEN_LENGTH: usize = 50;

    /// Keys the loader understands; anything else is ignored
    pub mod keys {
        pub const PATH1: &str = "path1";
        pub const PATH2: &str = "path2";
        pub const PREFIX: &str = "prefix";
        pub const SUFFIX: &str = "suffix";
        pub const MONITOR_TIMEOUT_SECONDS: &str = "monitor_timeout_seconds";
        pub const MIN_TOKEN_LENGTH: &str = "min_token_length";
    }
}

/// Clipboard watcher constants
pub mod clipboard {
    /// Placeholder written before the watch starts ("no user action yet")
    pub const SENTINEL: &str = "ESTADOINICIAL";

    /// Interval between clipboard reads
    pub const POLL_INTERVAL_MS: u64 = 1000;

    /// Longest watch actually scheduled (30 years); larger timeouts are capped
    pub const MAX_WATCH_SECS: u64 = 86_400 * 365 * 30;
}

/// Remote endpoint and reachability probe constants
pub mod network {
    /// Bank web client, used for both the probe and the browser launch
    pub const REMOTE_URL: &str =
        "https://genesys.bancopatagonia.net.ar/GenesysNotify/genesysCloud.html";

    /// Whole-request timeout for the probe
    pub const PROBE_TIMEOUT_SECS: u64 = 8;

    pub const USER_AGENT: &str = "Mozilla/5.0";
}

/// Browser binary launched with the remote URL
pub mod browser {
    #[cfg(target_os = "windows")]
    pub const DEFAULT_BROWSER: &str = r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe";

    #[cfg(target_os = "macos")]
    pub const DEFAULT_BROWSER: &str = "open";

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    pub const DEFAULT_BROWSER: &str = "xdg-open";
}

/// Notification queue constants
pub mod notify {
    /// Bounded queue between the workflow and the dispatcher
    pub const QUEUE_CAPACITY: usize = 100;

    /// Desktop notification helper (Linux only)
    pub const NOTIFY_SEND: &str = "notify-send";
}

/// Log file constants
pub mod logging {
    /// Log file name prefix, followed by `_YYYY-MM-DD.log`
    pub const FILE_PREFIX: &str = "sky-launcher";

    /// Environment variable holding the maximum log level
    pub const LEVEL_ENV: &str = "LOG_LEVEL";
}

/// Process exit codes
pub mod exit {
    pub const TIMED_OUT: u8 = 2;
}
