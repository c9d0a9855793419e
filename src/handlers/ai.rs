use super::{HandlerContext, Reply};
use crate::router::argument_after;
use crate::ui::{Level, View};
use tracing::warn;

pub const AI_DISABLED: &str = "Gemini AI is not initialized. Please check your API key.";
pub const ASK_USAGE: &str =
    "Please provide a question to ask (e.g., 'Nova ask what is artificial intelligence')";
pub const DEFINE_USAGE: &str =
    "Please provide a term to define (e.g., 'Nova define artificial intelligence')";

/// Snippet first; the full answer only when the user asks for it.
pub async fn handle_ai_query(ctx: &mut HandlerContext, command: &str) -> Reply {
    let Some(gemini) = ctx.gemini.clone() else {
        return Reply::error(AI_DISABLED);
    };
    let Some(query) = argument_after(command, "ask") else {
        return Reply::warning(ASK_USAGE);
    };

    ctx.ui.notice(Level::Info, "Thinking...");
    let answer = match gemini.quick_answer(query).await {
        Ok(answer) => answer,
        Err(e) => {
            warn!(error = %e, "quick answer failed");
            return Reply::error(format!("Error processing your question: {e}"));
        }
    };

    ctx.ui.render(&View::AiAnswer(answer.clone()));
    let quick = format!("Quick answer: {}", answer.snippet);
    ctx.speaker.speak(&quick).await;

    if ctx
        .ui
        .confirm("Would you like to hear the full answer?", true)
        .await
    {
        Reply::with_view(
            format!("Full answer: {}", answer.full_answer),
            View::FullAiAnswer(answer.full_answer),
        )
    } else {
        Reply::plain(format!(
            "{quick} Okay, ask me if you have any other questions."
        ))
    }
}

pub async fn handle_define(ctx: &mut HandlerContext, command: &str) -> Reply {
    let Some(gemini) = ctx.gemini.clone() else {
        return Reply::error(AI_DISABLED);
    };
    let Some(term) = argument_after(command, "define") else {
        return Reply::warning(DEFINE_USAGE);
    };

    ctx.ui.notice(
        Level::Info,
        &format!("Looking up definition for '{term}'..."),
    );
    match gemini.define_term(term).await {
        Ok(definition) => Reply::with_view(
            format!("Definition of '{term}': {definition}"),
            View::Definition {
                term: term.to_string(),
                definition,
            },
        ),
        Err(e) => {
            warn!(error = %e, term, "definition failed");
            Reply::error(format!("Error defining the term: {e}"))
        }
    }
}
