//! Preflight checks run before anything is launched

use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::constants::network::{PROBE_TIMEOUT_SECS, USER_AGENT};
use crate::error::{LauncherError, Target};

/// Verify that the configured executables are present on disk.
///
/// Presence only: permissions and executability are left to the launch.
pub fn check_paths(config: &Config) -> Result<(), LauncherError> {
    check_present(Target::Primary, &config.path1)?;
    if let Some(path2) = &config.path2 {
        check_present(Target::Secondary, path2)?;
    }
    Ok(())
}

fn check_present(target: Target, path: &Path) -> Result<(), LauncherError> {
    info!(%target, path = %path.display(), "Verifying access");
    // Only a definite "not found" fails; other stat errors are left to the launch
    match path.try_exists() {
        Ok(false) => Err(LauncherError::PathNotFound {
            target,
            path: path.to_path_buf(),
        }),
        Ok(true) => Ok(()),
        Err(err) => {
            warn!(%target, path = %path.display(), error = %err, "Could not stat path, continuing");
            Ok(())
        }
    }
}

/// Advisory network reachability check
pub trait ReachabilityProbe {
    /// True when a request/response round trip to `url` completes
    async fn is_reachable(&self, url: &str) -> bool;
}

/// HTTPS GET probe that ignores certificate trust and response status
pub struct HttpsProbe {
    timeout: Duration,
}

impl Default for HttpsProbe {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(PROBE_TIMEOUT_SECS),
        }
    }
}

impl ReachabilityProbe for HttpsProbe {
    async fn is_reachable(&self, url: &str) -> bool {
        let client = match reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
        {
            Ok(client) => client,
            Err(err) => {
                warn!(error = %err, "Failed to build network check client");
                return false;
            }
        };

        match client.get(url).send().await {
            Ok(response) => {
                info!(%url, status = %response.status(), "Network check succeeded");
                true
            }
            Err(err) => {
                warn!(%url, error = %err, "Failed to contact URL");
                false
            }
        }
    }
}
