use super::{Level, Ui, View, Welcome};
use crate::input::text::{SharedLines, next_line};
use async_trait::async_trait;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, BufReader, Stdin};

const RULE_WIDTH: usize = 60;

/// Plain stdout renderer. Yes/no answers come from the same line stream as
/// the prompt; without one every question takes its default.
pub struct ConsoleUi<W = io::Stdout, R = BufReader<Stdin>> {
    out: W,
    answers: Option<SharedLines<R>>,
}

impl ConsoleUi {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send, R> ConsoleUi<W, R> {
    pub fn new(out: W) -> Self {
        Self { out, answers: None }
    }

    pub fn with_answers(mut self, lines: SharedLines<R>) -> Self {
        self.answers = Some(lines);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn framed(&mut self, title: &str, body: &str) {
        let rule = "─".repeat(RULE_WIDTH);
        let _ = writeln!(self.out, "┌ {title}");
        for line in body.lines() {
            let _ = writeln!(self.out, "│ {line}");
        }
        let _ = writeln!(self.out, "└{rule}");
        let _ = self.out.flush();
    }
}

#[async_trait]
impl<W, R> Ui for ConsoleUi<W, R>
where
    W: Write + Send,
    R: AsyncBufRead + Unpin + Send,
{
    fn render(&mut self, view: &View) {
        self.framed(view.title(), &view.body());
    }

    fn notice(&mut self, level: Level, message: &str) {
        if message.is_empty() {
            return;
        }
        let tag = match level {
            Level::Info => "",
            Level::Success => "[ok] ",
            Level::Warning => "[!] ",
            Level::Error => "[error] ",
        };
        let _ = writeln!(self.out, "{tag}{message}");
        let _ = self.out.flush();
    }

    async fn confirm(&mut self, question: &str, default: bool) -> bool {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let _ = write!(self.out, "{question} {hint} ");
        let _ = self.out.flush();
        let Some(lines) = self.answers.as_ref() else {
            let _ = writeln!(self.out);
            return default;
        };
        match next_line(lines).await {
            Some(answer) => parse_yes_no(&answer).unwrap_or(default),
            None => default,
        }
    }

    fn prompt(&mut self) {
        let _ = write!(self.out, "You: ");
        let _ = self.out.flush();
    }

    fn clear(&mut self) {
        // ANSI: clear screen, cursor home
        let _ = write!(self.out, "\x1b[2J\x1b[H");
        let _ = self.out.flush();
    }

    fn welcome(&mut self, welcome: &Welcome) {
        let wake = &welcome.wake_word;
        let mut body = format!(
            "Hello, I am Nova, your command-line assistant.\n\
             Start every command with '{wake}', e.g. '{wake} tell me the time'.\n\
             Type 'help' for the command list, 'exit' to leave.\n"
        );
        for (label, value) in welcome.system.fields() {
            body.push_str(&format!("\n{label}: {value}"));
        }
        body.push_str(&format!(
            "\nAI answers: {}\nSpeech output: {}",
            on_off(welcome.ai_enabled),
            on_off(welcome.speech_enabled)
        ));
        self.framed("NOVA", &body);
    }

    fn farewell(&mut self) {
        self.framed("NOVA", "Thank you for using NOVA Assistant!");
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "enabled" } else { "disabled" }
}

/// `yes`/`y`/`no`/`n` in any case; anything else is undecided.
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::input::{CommandParser, Input, TypedInput};

    #[test]
    fn render_frames_title_and_body() {
        let mut ui: ConsoleUi<Vec<u8>, &'static [u8]> = ConsoleUi::new(Vec::new());
        ui.render(&View::Time("10:30".to_string()));
        ui.notice(Level::Warning, "careful");
        let out = String::from_utf8(ui.into_inner()).unwrap();
        assert!(out.starts_with("┌ Current Time\n│ 10:30\n└"));
        assert!(out.ends_with("[!] careful\n"));
    }

    #[tokio::test]
    async fn confirm_reads_from_the_prompt_stream() {
        let script: &'static [u8] = b"no\nnova tell me the date\n";
        let mut input = TypedInput::new(script, CommandParser::default());
        let mut ui = ConsoleUi::new(Vec::new()).with_answers(input.lines());

        assert!(!ui.confirm("Would you like to hear the full answer?", true).await);
        assert_eq!(input.read().await, Input::Command("date".to_string()));
        // stream exhausted, so the default wins
        assert!(ui.confirm("Again?", true).await);

        let out = String::from_utf8(ui.into_inner()).unwrap();
        assert!(out.starts_with("Would you like to hear the full answer? [Y/n] "));
    }

    #[tokio::test]
    async fn confirm_without_stream_takes_default() {
        let mut ui: ConsoleUi<Vec<u8>, &'static [u8]> = ConsoleUi::new(Vec::new());
        assert!(ui.confirm("Continue?", true).await);
        assert!(!ui.confirm("Continue?", false).await);
    }

    #[test]
    fn yes_no_answers() {
        assert_eq!(parse_yes_no(" YES\n"), Some(true));
        assert_eq!(parse_yes_no("n"), Some(false));
        assert_eq!(parse_yes_no(""), None);
        assert_eq!(parse_yes_no("maybe"), None);
    }
}
