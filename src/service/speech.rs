//! Text-to-speech through an external program.
//!
//! The configured command receives the text as its final argument and is
//! awaited, so replies are spoken one after another.

use crate::config::SpeechConfig;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct Speaker {
    enabled: bool,
    command: String,
    args: Vec<String>,
}

impl Speaker {
    pub fn new(cfg: &SpeechConfig) -> Self {
        Self {
            enabled: cfg.enabled,
            command: cfg.command.clone(),
            args: cfg.args.clone(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            command: String::new(),
            args: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Speak `text`; failures are logged and otherwise ignored.
    pub async fn speak(&self, text: &str) {
        if !self.enabled || text.trim().is_empty() {
            return;
        }
        let result = Command::new(&self.command)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;
        match result {
            Ok(out) if out.status.success() => {
                debug!(chars = text.len(), "speech finished");
            }
            Ok(out) => {
                warn!(
                    status = %out.status,
                    stderr = %String::from_utf8_lossy(&out.stderr).trim(),
                    "speech command failed"
                );
            }
            Err(e) => {
                warn!(command = %self.command, error = %e, "failed to run speech command");
            }
        }
    }

    /// Whether the speech program can be started at all.
    pub async fn is_available(&self) -> bool {
        if self.command.is_empty() {
            return false;
        }
        Command::new(&self.command)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_speaker_is_silent_and_unavailable() {
        let speaker = Speaker::disabled();
        assert!(!speaker.is_enabled());
        speaker.speak("hello").await;
        assert!(!speaker.is_available().await);
    }

    #[tokio::test]
    async fn missing_program_is_not_available() {
        let speaker = Speaker::new(&SpeechConfig {
            enabled: true,
            command: "no-such-tts-binary-7731".to_string(),
            args: Vec::new(),
        });
        assert!(!speaker.is_available().await);
        // logged, not propagated
        speaker.speak("hello").await;
    }
}
