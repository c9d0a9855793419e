use crate::handlers::help::HELP_TEXT;
use crate::input::parser::CommandParser;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::warn;

pub const INPUT_HISTORY_CAPACITY: usize = 100;
const SHOWN_INPUTS: usize = 10;

/// What one prompt produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// A normalized command ready for dispatch.
    Command(String),
    /// Text to show without dispatching anything.
    Reply(String),
    ClearScreen,
    Exit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedCommand {
    pub text: String,
    pub at: DateTime<Local>,
}

/// Bounded log of accepted lines for this session only.
#[derive(Debug, Clone)]
pub struct InputHistory {
    commands: VecDeque<TypedCommand>,
    max_size: usize,
}

impl InputHistory {
    pub fn new(max_size: usize) -> Self {
        Self {
            commands: VecDeque::with_capacity(max_size.min(INPUT_HISTORY_CAPACITY)),
            max_size: max_size.max(1),
        }
    }

    pub fn add(&mut self, text: impl Into<String>) {
        self.commands.push_back(TypedCommand {
            text: text.into(),
            at: Local::now(),
        });
        while self.commands.len() > self.max_size {
            self.commands.pop_front();
        }
    }

    pub fn last(&self) -> Option<&TypedCommand> {
        self.commands.back()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Numbered listing of the most recent entries.
    pub fn render(&self, count: usize) -> String {
        if self.commands.is_empty() {
            return "No commands in history.".to_string();
        }
        let skip = self.commands.len().saturating_sub(count);
        let mut out = String::from("Command History:\n");
        for (i, cmd) in self.commands.iter().skip(skip).enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, cmd.text));
        }
        out
    }
}

impl Default for InputHistory {
    fn default() -> Self {
        Self::new(INPUT_HISTORY_CAPACITY)
    }
}

/// One line stream shared by the prompt and by yes/no questions, so that
/// neither reads ahead of the other.
pub type SharedLines<R> = Arc<Mutex<Lines<R>>>;

pub fn stdin_lines() -> SharedLines<BufReader<Stdin>> {
    Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()))
}

/// Next line; EOF and read errors both end the stream.
pub async fn next_line<R: AsyncBufRead + Unpin>(lines: &SharedLines<R>) -> Option<String> {
    match lines.lock().await.next_line().await {
        Ok(line) => line,
        Err(e) => {
            warn!(error = %e, "failed to read input");
            None
        }
    }
}

/// Line-oriented typed input.
pub struct TypedInput<R> {
    lines: SharedLines<R>,
    parser: CommandParser,
    history: InputHistory,
}

impl<R: AsyncBufRead + Unpin> TypedInput<R> {
    pub fn new(reader: R, parser: CommandParser) -> Self {
        Self::shared(Arc::new(Mutex::new(reader.lines())), parser)
    }

    pub fn shared(lines: SharedLines<R>, parser: CommandParser) -> Self {
        Self {
            lines,
            parser,
            history: InputHistory::default(),
        }
    }

    pub fn lines(&self) -> SharedLines<R> {
        Arc::clone(&self.lines)
    }

    pub fn history(&self) -> &InputHistory {
        &self.history
    }

    /// Read one line and classify it. EOF and read errors end the session.
    pub async fn read(&mut self) -> Input {
        match next_line(&self.lines).await {
            Some(line) => self.classify(&line),
            None => Input::Exit,
        }
    }

    /// Built-in words first, then the wake word check and normalization.
    pub fn classify(&mut self, line: &str) -> Input {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "" => return Input::Reply(String::new()),
            "help" => return Input::Reply(HELP_TEXT.to_string()),
            "clear" => return Input::ClearScreen,
            "history" => return Input::Reply(self.history.render(SHOWN_INPUTS)),
            "exit" | "quit" | "bye" => return Input::Exit,
            _ => {}
        }

        let Some(command) = self.parser.parse_wake_word(trimmed) else {
            let wake = capitalize(self.parser.wake_word());
            return Input::Reply(format!(
                "Please start your command with '{wake}' (e.g., '{wake} tell me the time')"
            ));
        };

        self.history.add(trimmed);
        Input::Command(CommandParser::normalize(&command))
    }
}

/// Upper-case the first character, as the wake word is shown in prompts.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
