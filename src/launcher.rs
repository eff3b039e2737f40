//! Fire-and-forget process launching

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{error, info};

use crate::error::{LauncherError, Target};

/// A process to start without waiting for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl SpawnRequest {
    /// Run `path` from inside its own containing folder.
    ///
    /// Relative paths are anchored to the current directory first, since the
    /// child resolves its program after switching into `working_dir`.
    pub fn in_own_dir(path: &Path) -> Self {
        let program = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let working_dir = program
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf);
        Self {
            program,
            args: Vec::new(),
            working_dir,
        }
    }
}

/// Starts processes; there is deliberately no handle to the child afterwards
pub trait ProcessSpawner {
    fn spawn(&self, request: &SpawnRequest) -> std::io::Result<u32>;
}

/// Spawns real OS processes with all standard streams detached
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedSpawner;

impl ProcessSpawner for DetachedSpawner {
    fn spawn(&self, request: &SpawnRequest) -> std::io::Result<u32> {
        let mut command = Command::new(&request.program);
        command
            .args(&request.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(dir) = &request.working_dir {
            command.current_dir(dir);
        }
        // Child handle dropped on purpose: the process outlives the launcher
        let child = command.spawn()?;
        Ok(child.id())
    }
}

/// Launch a configured executable from its own folder
pub fn launch_detached(
    spawner: &impl ProcessSpawner,
    target: Target,
    path: &Path,
) -> Result<(), LauncherError> {
    let request = SpawnRequest::in_own_dir(path);
    info!(%target, program = %path.display(), working_dir = ?request.working_dir, "Launching in background");
    let pid = spawner.spawn(&request).map_err(|source| LauncherError::Launch {
        target,
        path: path.to_path_buf(),
        source,
    })?;
    info!(%target, pid, "Launched");
    Ok(())
}

/// Open `url` in the browser; the caller decides whether failure matters
pub fn open_browser(
    spawner: &impl ProcessSpawner,
    browser: &Path,
    url: &str,
) -> Result<(), LauncherError> {
    let request = SpawnRequest {
        program: browser.to_path_buf(),
        args: vec![url.to_string()],
        working_dir: None,
    };
    match spawner.spawn(&request) {
        Ok(pid) => {
            info!(browser = %browser.display(), pid, %url, "Browser launched");
            Ok(())
        }
        Err(source) => {
            error!(browser = %browser.display(), error = %source, "Failed to launch browser");
            Err(LauncherError::Launch {
                target: Target::Browser,
                path: browser.to_path_buf(),
                source,
            })
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingSpawner;
    use super::*;

    #[test]
    fn test_spawn_request_uses_containing_dir() {
        let request = SpawnRequest::in_own_dir(Path::new("/opt/app/bin/run.sh"));
        assert_eq!(request.program, PathBuf::from("/opt/app/bin/run.sh"));
        assert_eq!(request.working_dir, Some(PathBuf::from("/opt/app/bin")));
        assert!(request.args.is_empty());
    }

    #[test]
    fn test_spawn_request_anchors_relative_path_to_cwd() {
        let cwd = std::env::current_dir().unwrap();
        let request = SpawnRequest::in_own_dir(Path::new("sub/app"));
        assert_eq!(request.program, cwd.join("sub/app"));
        assert_eq!(request.working_dir, Some(cwd.join("sub")));
    }

    #[test]
    fn test_spawn_request_bare_name_runs_from_cwd() {
        let cwd = std::env::current_dir().unwrap();
        let request = SpawnRequest::in_own_dir(Path::new("run.sh"));
        assert_eq!(request.program, cwd.join("run.sh"));
        assert_eq!(request.working_dir, Some(cwd));
    }

    #[cfg(unix)]
    #[test]
    fn test_detached_spawner_starts_relative_program() {
        let dir = tempfile::tempdir_in(std::env::current_dir().unwrap()).unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        std::os::unix::fs::symlink("/bin/sh", sub.join("app")).unwrap();
        let relative = sub
            .join("app")
            .strip_prefix(std::env::current_dir().unwrap())
            .unwrap()
            .to_path_buf();

        assert!(launch_detached(&DetachedSpawner, Target::Primary, &relative).is_ok());
    }

    #[test]
    fn test_launch_detached_maps_failure_to_launch_error() {
        let path = Path::new("/opt/app/run.sh");
        let spawner = RecordingSpawner::failing_on(&[path]);
        let err = launch_detached(&spawner, Target::Primary, path).unwrap_err();
        assert!(matches!(err, LauncherError::Launch { target: Target::Primary, .. }));
    }

    #[test]
    fn test_open_browser_passes_url_as_only_argument() {
        let spawner = RecordingSpawner::default();
        open_browser(&spawner, Path::new("xdg-open"), "https://example.test/").unwrap();
        let requests = spawner.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].args, vec!["https://example.test/".to_string()]);
        assert_eq!(requests[0].working_dir, None);
    }

    #[test]
    fn test_detached_spawner_missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let result = launch_detached(&DetachedSpawner, Target::Secondary, &dir.path().join("nope"));
        assert!(matches!(result, Err(LauncherError::Launch { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_detached_spawner_starts_existing_binary() {
        // sh exits immediately on a null stdin
        assert!(launch_detached(&DetachedSpawner, Target::Primary, Path::new("/bin/sh")).is_ok());
    }
}
