use crate::db::CommandEntry;
use crate::service::ai::QuickAnswer;
use crate::service::calculator::format_result;
use crate::service::system::{ConnectionStatus, SystemStatus};
use crate::types::weather::WeatherReport;

/// Structured output of a handler, rendered by the active [`super::Ui`].
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Time(String),
    Date(String),
    Calculation { expression: String, result: f64 },
    Weather(WeatherReport),
    Help(String),
    Functions(String),
    History(Vec<CommandEntry>),
    SearchResults { term: String, entries: Vec<CommandEntry> },
    SystemStatus(SystemStatus),
    ConnectionStatus(ConnectionStatus),
    AiAnswer(QuickAnswer),
    FullAiAnswer(String),
    Definition { term: String, definition: String },
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Time(_) => "Current Time",
            View::Date(_) => "Current Date",
            View::Calculation { .. } => "Calculation",
            View::Weather(_) => "Weather",
            View::Help(_) => "Help",
            View::Functions(_) => "Functions",
            View::History(_) => "Command History",
            View::SearchResults { .. } => "Search Results",
            View::SystemStatus(_) => "System Status",
            View::ConnectionStatus(_) => "Connection Status",
            View::AiAnswer(_) => "Quick Answer",
            View::FullAiAnswer(_) => "Full Answer",
            View::Definition { .. } => "Definition",
        }
    }

    /// Body text without decoration.
    pub fn body(&self) -> String {
        match self {
            View::Time(t) => t.clone(),
            View::Date(d) => d.clone(),
            View::Calculation { expression, result } => {
                format!("{expression} = {}", format_result(*result))
            }
            View::Weather(report) => report.to_string(),
            View::Help(text) | View::Functions(text) => text.trim().to_string(),
            View::History(entries) => entry_table(entries),
            View::SearchResults { term, entries } => {
                format!("Matches for '{term}':\n{}", entry_table(entries))
            }
            View::SystemStatus(status) => {
                let mut out = format!("RAM Usage: {:.2} GB", status.ram_usage_gb);
                for (label, value) in status.info.fields() {
                    out.push_str(&format!("\n{label}: {value}"));
                }
                out
            }
            View::ConnectionStatus(status) => {
                let mut out = format!(
                    "Internet: {}\nText-to-speech: {}",
                    available(status.internet_connection),
                    available(status.text_to_speech)
                );
                if let Some(stats) = status.network_stats {
                    out.push_str(&format!(
                        "\nBytes sent: {}\nBytes received: {}",
                        stats.bytes_sent, stats.bytes_recv
                    ));
                }
                out
            }
            View::AiAnswer(answer) => answer.snippet.clone(),
            View::FullAiAnswer(text) => text.clone(),
            View::Definition { term, definition } => format!("{term}: {definition}"),
        }
    }
}

fn available(flag: bool) -> &'static str {
    if flag { "Available" } else { "Unavailable" }
}

fn entry_table(entries: &[CommandEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let response = e.response.as_deref().unwrap_or("-");
            format!("{:>3}  {}  -> {}", i + 1, e.summary(), response)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
