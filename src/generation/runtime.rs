//! Local model runtime (Ollama) discovery and model pulls.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{info, warn};

use super::error::GenerationError;

#[cfg(windows)]
const EXECUTABLE: &str = "ollama.exe";
#[cfg(not(windows))]
const EXECUTABLE: &str = "ollama";

/// Well-known install locations, checked before `PATH`.
pub fn candidate_paths() -> Vec<PathBuf> {
    let paths: &[&str] = if cfg!(target_os = "macos") {
        &[
            "/usr/local/bin/ollama",
            "/opt/homebrew/bin/ollama",
            "/usr/bin/ollama",
        ]
    } else if cfg!(target_os = "linux") {
        &["/usr/local/bin/ollama", "/usr/bin/ollama", "/snap/bin/ollama"]
    } else if cfg!(windows) {
        &[
            r"C:\Program Files\Ollama\ollama.exe",
            r"C:\Program Files (x86)\Ollama\ollama.exe",
        ]
    } else {
        &[]
    };
    paths.iter().map(PathBuf::from).collect()
}

/// Finds the runtime executable.
///
/// Falls back to the bare executable name so the OS resolves it at spawn time.
pub fn find_runtime() -> PathBuf {
    find_runtime_in(&candidate_paths(), std::env::var_os("PATH").as_deref())
}

pub(crate) fn find_runtime_in(candidates: &[PathBuf], path_var: Option<&OsStr>) -> PathBuf {
    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        return found.clone();
    }

    if let Some(path_var) = path_var
        && let Some(found) = std::env::split_paths(path_var)
            .map(|dir| dir.join(EXECUTABLE))
            .find(|p| p.is_file())
    {
        return found;
    }

    PathBuf::from(EXECUTABLE)
}

/// Runs `<runtime> pull <model>` and waits for it.
pub async fn pull_model(runtime: &Path, model: &str) -> Result<(), GenerationError> {
    info!(runtime = %runtime.display(), model, "Pulling generator model");

    let status = Command::new(runtime)
        .arg("pull")
        .arg(model)
        .status()
        .await
        .map_err(|source| GenerationError::RuntimeLaunch {
            path: runtime.to_path_buf(),
            source,
        })?;

    if status.success() {
        info!(model, "Generator model ready");
        Ok(())
    } else {
        warn!(model, %status, "Generator model pull failed");
        Err(GenerationError::PullFailed {
            model: model.to_string(),
            status: status.to_string(),
        })
    }
}
