#![allow(dead_code)]

use async_trait::async_trait;
use nova_assistant::api::gemini_api::GeminiApi;
use nova_assistant::api::weather_api::WeatherApi;
use nova_assistant::db::{self, CommandEntry, ExecutionStatus, HistoryStorage};
use nova_assistant::error::NovaError;
use nova_assistant::handlers::HandlerContext;
use nova_assistant::input::CommandParser;
use nova_assistant::service::ai::GeminiSearch;
use nova_assistant::service::history::CommandHistory;
use nova_assistant::service::launcher::Launcher;
use nova_assistant::service::speech::Speaker;
use nova_assistant::ui::{Level, Ui, View, Welcome};
use nova_assistant::{NovaApp, Outcome};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    View(View),
    Notice(Level, String),
    Question(String),
    Prompt,
    Clear,
    Welcome,
    Farewell,
}

#[derive(Clone, Default)]
pub struct RecordingUi {
    shown: Arc<Mutex<Vec<Shown>>>,
    answer: Option<bool>,
}

impl RecordingUi {
    fn push(&self, item: Shown) {
        self.shown.lock().unwrap().push(item);
    }

    pub fn taken(&self) -> Vec<Shown> {
        std::mem::take(&mut *self.shown.lock().unwrap())
    }
}

#[async_trait]
impl Ui for RecordingUi {
    fn render(&mut self, view: &View) {
        self.push(Shown::View(view.clone()));
    }

    fn notice(&mut self, level: Level, message: &str) {
        self.push(Shown::Notice(level, message.to_string()));
    }

    async fn confirm(&mut self, question: &str, default: bool) -> bool {
        self.push(Shown::Question(question.to_string()));
        self.answer.unwrap_or(default)
    }

    fn prompt(&mut self) {
        self.push(Shown::Prompt);
    }

    fn clear(&mut self) {
        self.push(Shown::Clear);
    }

    fn welcome(&mut self, _welcome: &Welcome) {
        self.push(Shown::Welcome);
    }

    fn farewell(&mut self) {
        self.push(Shown::Farewell);
    }
}

#[derive(Clone, Default)]
pub struct RecordingLauncher {
    pub opened: Arc<Mutex<Vec<String>>>,
}

impl Launcher for RecordingLauncher {
    fn open_website(&self, url: &str) -> Result<(), NovaError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }

    fn open_app(&self, name: &str) -> Result<(), NovaError> {
        if name == "missing" {
            return Err(NovaError::Launch(format!("Failed to open {name}: not found")));
        }
        self.opened.lock().unwrap().push(name.to_string());
        Ok(())
    }
}

pub struct Harness {
    pub app: NovaApp,
    pub ui: RecordingUi,
    pub launcher: RecordingLauncher,
}

pub async fn harness() -> Harness {
    harness_with(None, None).await
}

/// `answer` is what every yes/no question gets; `None` takes the default.
pub async fn harness_with(gemini: Option<GeminiSearch>, answer: Option<bool>) -> Harness {
    let pool = db::connect("sqlite::memory:").await.unwrap();
    let storage = HistoryStorage::new(pool);
    storage.init_schema().await.unwrap();

    let ui = RecordingUi {
        answer,
        ..RecordingUi::default()
    };
    let launcher = RecordingLauncher::default();
    let http = reqwest::Client::new();
    let ctx = HandlerContext {
        history: CommandHistory::new(storage),
        gemini,
        weather: WeatherApi::new(
            http.clone(),
            Url::parse("http://127.0.0.1:9/").unwrap(),
            None,
        ),
        launcher: Box::new(launcher.clone()),
        speaker: Speaker::disabled(),
        ui: Box::new(ui.clone()),
        http,
        connectivity_url: "http://127.0.0.1:9/".to_string(),
    };
    Harness {
        app: NovaApp::new(ctx, CommandParser::default()),
        ui,
        launcher,
    }
}

pub fn responded(outcome: Outcome) -> (String, ExecutionStatus, Option<i64>) {
    match outcome {
        Outcome::Responded {
            reply,
            status,
            history_id,
        } => (reply.text, status, history_id),
        other => panic!("expected a reply, got {other:?}"),
    }
}

/// Stored history row with the given id.
pub async fn stored(app: &NovaApp, id: Option<i64>) -> CommandEntry {
    let id = id.expect("command was recorded");
    app.context()
        .history
        .get_history(100)
        .await
        .unwrap()
        .into_iter()
        .find(|e| e.id == id)
        .expect("history row exists")
}

pub const SNIPPET: &str = "Rust is a systems programming language.";
pub const FULL_ANSWER: &str = "Rust is a language focused on safety, speed and concurrency.";
pub const DEFINITION: &str = "Ownership is the set of rules Rust uses to manage memory.";

/// Local stand-in for the `generateContent` endpoint. The first `failures`
/// requests get a 503; the rest get an answer chosen by prompt.
pub struct FakeGemini {
    pub base_url: Url,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl FakeGemini {
    pub async fn start(failures: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        let failures = Arc::new(AtomicUsize::new(failures));

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let (head, body) = read_request(&mut stream).await;
                let failing = failures
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                    .is_ok();
                let (status, payload) = if failing {
                    (
                        "503 Service Unavailable",
                        json!({"error": {"code": 503, "message": "overloaded", "status": "UNAVAILABLE"}}),
                    )
                } else {
                    ("200 OK", answer_for(&body))
                };
                seen.lock().unwrap().push(format!("{head}\r\n\r\n{body}"));

                let payload = payload.to_string();
                let response = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{payload}",
                    payload.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}/v1beta/")).unwrap(),
            requests,
        }
    }

    pub fn search(&self) -> GeminiSearch {
        let api = GeminiApi::new(
            reqwest::Client::new(),
            &self.base_url,
            "gemini-test",
            "test-key",
        )
        .unwrap();
        GeminiSearch::new(api)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn answer_for(body: &str) -> serde_json::Value {
    let text = if body.contains("one-sentence") {
        SNIPPET
    } else if body.contains("definition of") {
        DEFINITION
    } else {
        FULL_ANSWER
    };
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "modelVersion": "gemini-test"
    })
}

/// Lowercased request head and the raw body.
async fn read_request(stream: &mut TcpStream) -> (String, String) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            return (String::from_utf8_lossy(&buf).to_lowercase(), String::new());
        }
        buf.extend_from_slice(&chunk[..n]);
        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
        let len = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        let body_start = end + 4;
        if buf.len() >= body_start + len {
            let body = String::from_utf8_lossy(&buf[body_start..body_start + len]).into_owned();
            return (head, body);
        }
    }
}
