//! Command handlers.
//!
//! Each handler maps the normalized command text to a [`Reply`]; the caller
//! records, renders and speaks it.

pub mod ai;
pub mod calc;
pub mod clock;
pub mod help;
pub mod history;
pub mod open;
pub mod status;
pub mod weather;

use crate::api::weather_api::WeatherApi;
use crate::router::HandlerKind;
use crate::service::ai::GeminiSearch;
use crate::service::history::CommandHistory;
use crate::service::launcher::Launcher;
use crate::service::speech::Speaker;
use crate::ui::{Level, Ui, View};

/// Everything a handler may touch.
pub struct HandlerContext {
    pub history: CommandHistory,
    pub gemini: Option<GeminiSearch>,
    pub weather: WeatherApi,
    pub launcher: Box<dyn Launcher>,
    pub speaker: Speaker,
    pub ui: Box<dyn Ui>,
    pub http: reqwest::Client,
    pub connectivity_url: String,
}

/// Textual response plus an optional structured view.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub view: Option<View>,
    pub level: Level,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            view: None,
            level: Level::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            ..Self::plain(text)
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            ..Self::plain(text)
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            ..Self::plain(text)
        }
    }

    pub fn with_view(text: impl Into<String>, view: View) -> Self {
        Self {
            view: Some(view),
            ..Self::plain(text)
        }
    }
}

pub async fn dispatch(kind: HandlerKind, ctx: &mut HandlerContext, command: &str) -> Reply {
    match kind {
        HandlerKind::Help => help::handle_help(),
        HandlerKind::Functions => help::handle_functions(),
        HandlerKind::Thanks => help::handle_thanks(),
        HandlerKind::Time => clock::handle_time(),
        HandlerKind::Date => clock::handle_date(),
        HandlerKind::Calculate => calc::handle_calculation(command),
        HandlerKind::Weather => weather::handle_weather(ctx, command).await,
        HandlerKind::Open => open::handle_open(ctx, command),
        HandlerKind::History => history::handle_history(ctx).await,
        HandlerKind::HistoryStart => history::handle_history_start(ctx),
        HandlerKind::HistoryStop => history::handle_history_stop(ctx),
        HandlerKind::Search => history::handle_search_history(ctx, command).await,
        HandlerKind::ClearHistory => history::handle_clear_history(ctx).await,
        HandlerKind::Ask => ai::handle_ai_query(ctx, command).await,
        HandlerKind::Define => ai::handle_define(ctx, command).await,
        HandlerKind::Status => status::handle_system_status(),
        HandlerKind::Connection => status::handle_connection_status(ctx).await,
    }
}
