use super::{HandlerContext, Reply};
use crate::db::CommandEntry;
use crate::router::argument_after;
use crate::service::history::DEFAULT_LIMIT;
use crate::ui::View;
use tracing::error;

pub const SEARCH_USAGE: &str = "Please provide a search term (e.g., 'Nova search weather')";

fn listing(header: String, entries: &[CommandEntry], with_status: bool) -> String {
    let mut out = header;
    for (i, entry) in entries.iter().enumerate() {
        let line = if with_status {
            entry.summary()
        } else {
            format!("[{}] {}", entry.local_timestamp(), entry.command)
        };
        out.push_str(&format!("{}: {line}", i + 1));
        if let Some(response) = entry.response.as_deref() {
            out.push_str(&format!("\nResponse: {response}"));
        }
        out.push('\n');
    }
    out
}

pub async fn handle_history(ctx: &mut HandlerContext) -> Reply {
    match ctx.history.get_history(DEFAULT_LIMIT).await {
        Ok(entries) if entries.is_empty() => Reply::warning("No command history found."),
        Ok(entries) => Reply::with_view(
            listing("Command History:\n".to_string(), &entries, true),
            View::History(entries),
        ),
        Err(e) => {
            error!(error = %e, "failed to load command history");
            Reply::error("Could not load command history.")
        }
    }
}

pub fn handle_history_start(ctx: &mut HandlerContext) -> Reply {
    ctx.history.start_recording();
    Reply::success("Command history recording started.")
}

pub fn handle_history_stop(ctx: &mut HandlerContext) -> Reply {
    ctx.history.stop_recording();
    Reply::warning("Command history recording stopped.")
}

pub async fn handle_search_history(ctx: &mut HandlerContext, command: &str) -> Reply {
    let Some(term) = argument_after(command, "search") else {
        return Reply::warning(SEARCH_USAGE);
    };
    match ctx.history.search_history(term, DEFAULT_LIMIT).await {
        Ok(entries) if entries.is_empty() => {
            Reply::warning(format!("No results found for '{term}'."))
        }
        Ok(entries) => Reply::with_view(
            listing(format!("Search results for '{term}':\n"), &entries, false),
            View::SearchResults {
                term: term.to_string(),
                entries,
            },
        ),
        Err(e) => {
            error!(error = %e, term, "history search failed");
            Reply::error("Could not search command history.")
        }
    }
}

pub async fn handle_clear_history(ctx: &mut HandlerContext) -> Reply {
    match ctx.history.clear_history().await {
        Ok(_) => Reply::success("Command history cleared."),
        Err(e) => {
            error!(error = %e, "failed to clear command history");
            Reply::error("Failed to clear command history.")
        }
    }
}
