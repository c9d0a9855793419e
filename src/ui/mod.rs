//! Terminal presentation.
//!
//! Handlers describe what to show as a [`View`]; a [`Ui`] decides how. The
//! console implementation prints framed plain text, tests use a recorder.

pub mod console;
pub mod view;

pub use console::ConsoleUi;
pub use view::View;

use crate::service::system::SystemInfo;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

/// Startup summary shown before the first prompt.
#[derive(Debug, Clone)]
pub struct Welcome {
    pub wake_word: String,
    pub system: SystemInfo,
    pub ai_enabled: bool,
    pub speech_enabled: bool,
}

#[async_trait]
pub trait Ui: Send {
    fn render(&mut self, view: &View);
    fn notice(&mut self, level: Level, message: &str);
    /// Yes/no question; an empty or unreadable answer picks `default`.
    async fn confirm(&mut self, question: &str, default: bool) -> bool;
    fn prompt(&mut self);
    fn clear(&mut self);
    fn welcome(&mut self, welcome: &Welcome);
    fn farewell(&mut self);
}
