use crate::api::build_http_client;
use crate::api::gemini_api::GeminiApi;
use crate::api::weather_api::WeatherApi;
use crate::config::Config;
use crate::db::{self, ExecutionStatus, HistoryStorage};
use crate::error::NovaError;
use crate::handlers::{self, HandlerContext, Reply};
use crate::input::text::capitalize;
use crate::input::{CommandParser, Input, SharedLines, TypedInput};
use crate::router::{self, Route};
use crate::service::ai::GeminiSearch;
use crate::service::history::CommandHistory;
use crate::service::launcher::SystemLauncher;
use crate::service::speech::Speaker;
use crate::service::system::{CONNECTIVITY_CHECK_URL, system_info};
use crate::ui::{ConsoleUi, Level, Welcome};
use chrono::Local;
use serde_json::json;
use tokio::io::{AsyncBufRead, BufReader, Stdin};
use tracing::{debug, error, info, warn};

pub const UNKNOWN_COMMAND: &str = "I'm sorry, I didn't understand that command. \
     Please say 'Nova help' to see available commands.";
pub const GREETING: &str = "Hello, I am Nova, your command-line assistant";
pub const GOODBYE: &str = "Goodbye!";

/// Result of feeding one command through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Ignored,
    Exit,
    Responded {
        reply: Reply,
        status: ExecutionStatus,
        history_id: Option<i64>,
    },
}

pub struct NovaApp {
    ctx: HandlerContext,
    parser: CommandParser,
}

impl NovaApp {
    pub fn new(ctx: HandlerContext, parser: CommandParser) -> Self {
        Self { ctx, parser }
    }

    /// Wire the console UI, system launcher and upstream clients from `cfg`.
    /// `answers` is the stream yes/no questions read from.
    pub async fn from_config(
        cfg: &Config,
        answers: SharedLines<BufReader<Stdin>>,
    ) -> Result<Self, NovaError> {
        let http = build_http_client(cfg.proxy.as_ref())?;

        let pool = db::connect(&cfg.basic.database_url).await?;
        let storage = HistoryStorage::new(pool);
        storage.init_schema().await?;

        let gemini = match cfg.gemini.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Some(GeminiSearch::new(GeminiApi::new(
                http.clone(),
                &cfg.gemini.base_url,
                &cfg.gemini.model,
                key,
            )?)),
            _ => {
                warn!("Gemini API key not found; AI answers disabled");
                None
            }
        };
        let weather = WeatherApi::new(
            http.clone(),
            cfg.weather.base_url.clone(),
            cfg.weather.api_key.clone(),
        );

        let ctx = HandlerContext {
            history: CommandHistory::new(storage),
            gemini,
            weather,
            launcher: Box::new(SystemLauncher),
            speaker: Speaker::new(&cfg.speech),
            ui: Box::new(ConsoleUi::stdout().with_answers(answers)),
            http,
            connectivity_url: CONNECTIVITY_CHECK_URL.to_string(),
        };
        Ok(Self::new(ctx, CommandParser::new(&cfg.basic.wake_word)))
    }

    pub fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut HandlerContext {
        &mut self.ctx
    }

    pub fn parser(&self) -> &CommandParser {
        &self.parser
    }

    /// Record, dispatch, persist, then render and speak one command.
    pub async fn process_command(&mut self, raw: &str) -> Outcome {
        let command = raw.trim().to_lowercase();
        if command.is_empty() {
            return Outcome::Ignored;
        }

        let kind = match router::route(&command) {
            Route::Exit => return Outcome::Exit,
            Route::Handler(kind) => Some(kind),
            Route::Unknown => None,
        };

        let context = json!({ "execution_time": Local::now().to_rfc3339() });
        let history_id = match self
            .ctx
            .history
            .add_command(&command, ExecutionStatus::Initiated, Some(&context))
            .await
        {
            Ok(id) => id,
            Err(e) => {
                error!(command = %command, error = %e, "failed to record command");
                self.ctx
                    .ui
                    .notice(Level::Error, &format!("Failed to record command: {e}"));
                None
            }
        };

        let (reply, status) = match kind {
            Some(kind) => {
                debug!(command = %command, handler = ?kind, "dispatching");
                let reply = handlers::dispatch(kind, &mut self.ctx, &command).await;
                (reply, ExecutionStatus::Completed)
            }
            None => {
                info!(command = %command, "unrecognized command");
                (Reply::error(UNKNOWN_COMMAND), ExecutionStatus::Failed)
            }
        };

        if let Some(id) = history_id {
            self.save_response(id, status, &reply.text).await;
        }

        self.present(&reply).await;
        Outcome::Responded {
            reply,
            status,
            history_id,
        }
    }

    async fn save_response(&mut self, id: i64, status: ExecutionStatus, response: &str) {
        match self.ctx.history.complete(id, status, response).await {
            Ok(true) => {}
            // the row is gone after `clear history`
            Ok(false) => debug!(id, "history row no longer exists"),
            Err(e) => {
                error!(id, error = %e, "failed to save response");
                self.ctx
                    .ui
                    .notice(Level::Error, &format!("Failed to save response: {e}"));
            }
        }
    }

    async fn present(&mut self, reply: &Reply) {
        match &reply.view {
            Some(view) => self.ctx.ui.render(view),
            None => self.ctx.ui.notice(reply.level, &reply.text),
        }
        self.ctx.speaker.speak(&reply.text).await;
    }

    /// Welcome screen and spoken greeting.
    pub async fn start(&mut self) {
        self.ctx.history.start_recording();
        let welcome = Welcome {
            wake_word: capitalize(self.parser.wake_word()),
            system: system_info(),
            ai_enabled: self.ctx.gemini.is_some(),
            speech_enabled: self.ctx.speaker.is_enabled(),
        };
        self.ctx.ui.welcome(&welcome);
        if self.ctx.gemini.is_none() {
            self.ctx.ui.notice(
                Level::Warning,
                "Gemini API key not found. AI search functionality will be disabled.",
            );
        }
        self.ctx.speaker.speak(GREETING).await;
    }

    /// Prompt loop until an exit word, end of input, or a shutdown signal.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: &mut TypedInput<R>) {
        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            self.ctx.ui.prompt();
            let next = tokio::select! {
                line = input.read() => line,
                _ = &mut shutdown => {
                    info!("shutdown signal received");
                    Input::Exit
                }
            };
            match next {
                Input::Exit => break,
                Input::ClearScreen => self.ctx.ui.clear(),
                Input::Reply(text) => self.ctx.ui.notice(Level::Info, &text),
                Input::Command(command) => {
                    if self.process_command(&command).await == Outcome::Exit {
                        break;
                    }
                }
            }
        }
    }

    /// Stop recording, say goodbye and close the database.
    pub async fn shutdown(mut self) {
        self.ctx.ui.notice(Level::Info, "Performing cleanup...");
        self.ctx.history.stop_recording();
        self.ctx.speaker.speak(GOODBYE).await;
        self.ctx.ui.farewell();
        self.close().await;
    }

    /// Close the database without any output.
    pub async fn close(self) {
        self.ctx.history.storage().pool().close().await;
        info!("database connection closed");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
