use crate::error::NovaError;
use std::process::{Command, Stdio};
use tracing::info;

/// Opens websites and desktop applications.
pub trait Launcher: Send + Sync {
    /// `url` must carry a scheme; see [`normalize_url`].
    fn open_website(&self, url: &str) -> Result<(), NovaError>;
    fn open_app(&self, name: &str) -> Result<(), NovaError>;
}

/// Add `https://` when the target carries no scheme.
pub fn normalize_url(target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        target.to_string()
    } else {
        format!("https://{target}")
    }
}

/// Hands targets to the platform opener without waiting for it.
pub struct SystemLauncher;

impl SystemLauncher {
    fn spawn_opener(target: &str) -> std::io::Result<()> {
        let mut cmd = if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", "", target]);
            c
        } else if cfg!(target_os = "macos") {
            let mut c = Command::new("open");
            c.arg(target);
            c
        } else {
            let mut c = Command::new("xdg-open");
            c.arg(target);
            c
        };
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
    }
}

impl Launcher for SystemLauncher {
    fn open_website(&self, url: &str) -> Result<(), NovaError> {
        url::Url::parse(url)
            .map_err(|e| NovaError::Launch(format!("Failed to open website: {e}")))?;
        Self::spawn_opener(url)
            .map_err(|e| NovaError::Launch(format!("Failed to open website: {e}")))?;
        info!(url = %url, "website opened");
        Ok(())
    }

    fn open_app(&self, name: &str) -> Result<(), NovaError> {
        let target = if cfg!(target_os = "windows") && name.eq_ignore_ascii_case("settings") {
            "ms-settings:"
        } else {
            name
        };
        let result = if cfg!(any(target_os = "windows", target_os = "macos")) {
            Self::spawn_opener(target)
        } else {
            // plain executables on the PATH
            Command::new(target)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .map(|_| ())
        };
        result.map_err(|e| NovaError::Launch(format!("Failed to open {name}: {e}")))?;
        info!(app = name, "application opened");
        Ok(())
    }
}
