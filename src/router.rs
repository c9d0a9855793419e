//! Keyword routing for normalized commands.
//!
//! Matching is first-match-wins in three passes: exact keyword, keyword
//! prefix for the commands that take an argument, then substring containment
//! for the argument-free ones.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    Help,
    Thanks,
    History,
    HistoryStart,
    HistoryStop,
    ClearHistory,
    Search,
    Time,
    Date,
    Calculate,
    Weather,
    Open,
    Functions,
    Ask,
    Define,
    Status,
    Connection,
}

/// Registered keywords; order decides containment matches.
pub const COMMAND_TABLE: &[(&str, HandlerKind)] = &[
    ("help", HandlerKind::Help),
    ("thanks", HandlerKind::Thanks),
    ("thank you", HandlerKind::Thanks),
    ("history", HandlerKind::History),
    ("history start", HandlerKind::HistoryStart),
    ("history stop", HandlerKind::HistoryStop),
    ("clear history", HandlerKind::ClearHistory),
    ("search", HandlerKind::Search),
    ("time", HandlerKind::Time),
    ("date", HandlerKind::Date),
    ("calculate", HandlerKind::Calculate),
    ("weather", HandlerKind::Weather),
    ("open", HandlerKind::Open),
    ("functions", HandlerKind::Functions),
    ("ask", HandlerKind::Ask),
    ("define", HandlerKind::Define),
    ("status", HandlerKind::Status),
    ("connection", HandlerKind::Connection),
];

/// Keywords that take an argument; matched only exactly or as a prefix.
pub const ARGUMENT_KEYWORDS: &[&str] = &["search", "ask", "define", "calculate", "weather", "open"];

pub const EXIT_WORDS: &[&str] = &["exit", "quit", "bye"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Exit,
    Handler(HandlerKind),
    Unknown,
}

fn lookup(keyword: &str) -> Option<HandlerKind> {
    COMMAND_TABLE
        .iter()
        .find(|(k, _)| *k == keyword)
        .map(|(_, kind)| *kind)
}

/// Route an already lowercased and trimmed command.
pub fn route(command: &str) -> Route {
    if EXIT_WORDS.contains(&command) {
        return Route::Exit;
    }

    if let Some(kind) = lookup(command) {
        return Route::Handler(kind);
    }

    let prefixed = ARGUMENT_KEYWORDS.iter().find(|keyword| {
        command
            .strip_prefix(**keyword)
            .is_some_and(|rest| rest.starts_with(' '))
    });
    if let Some(kind) = prefixed.and_then(|keyword| lookup(keyword)) {
        return Route::Handler(kind);
    }

    COMMAND_TABLE
        .iter()
        .filter(|(k, _)| !ARGUMENT_KEYWORDS.contains(k))
        .find(|(k, _)| command.contains(k))
        .map_or(Route::Unknown, |(_, kind)| Route::Handler(*kind))
}

/// Text following the first `keyword` that is followed by whitespace,
/// trimmed. `None` when absent or empty.
pub fn argument_after<'a>(command: &'a str, keyword: &str) -> Option<&'a str> {
    command
        .match_indices(keyword)
        .find_map(|(idx, _)| {
            let rest = &command[idx + keyword.len()..];
            rest.starts_with(char::is_whitespace).then_some(rest)
        })
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(command: &str) -> HandlerKind {
        match route(command) {
            Route::Handler(kind) => kind,
            other => panic!("expected a handler for {command:?}, got {other:?}"),
        }
    }

    #[test]
    fn exit_words() {
        for word in EXIT_WORDS {
            assert_eq!(route(word), Route::Exit);
        }
        assert_ne!(route("exit now"), Route::Exit);
    }

    #[test]
    fn exact_keywords_win() {
        assert_eq!(handler("history stop"), HandlerKind::HistoryStop);
        assert_eq!(handler("history start"), HandlerKind::HistoryStart);
        assert_eq!(handler("clear history"), HandlerKind::ClearHistory);
        assert_eq!(handler("thank you"), HandlerKind::Thanks);
        assert_eq!(handler("ask"), HandlerKind::Ask);
    }

    #[test]
    fn argument_keywords_match_as_prefix() {
        assert_eq!(handler("weather london"), HandlerKind::Weather);
        assert_eq!(handler("calculate 2 + 2"), HandlerKind::Calculate);
        assert_eq!(handler("open youtube.com"), HandlerKind::Open);
        assert_eq!(handler("search time"), HandlerKind::Search);
        assert_eq!(handler("define history"), HandlerKind::Define);
        assert_eq!(handler("ask what time it is"), HandlerKind::Ask);
    }

    #[test]
    fn containment_uses_table_order() {
        assert_eq!(handler("show me the history please"), HandlerKind::History);
        assert_eq!(handler("please clear history"), HandlerKind::History);
        assert_eq!(handler("thank you so much"), HandlerKind::Thanks);
        assert_eq!(handler("what time is it"), HandlerKind::Time);
        assert_eq!(handler("status of the connection"), HandlerKind::Status);
        assert_eq!(handler("check connection"), HandlerKind::Connection);
    }

    #[test]
    fn argument_keywords_never_match_by_containment() {
        assert_eq!(route("please open youtube"), Route::Unknown);
        assert_eq!(route("asking around"), Route::Unknown);
        assert_eq!(route("sing a song"), Route::Unknown);
        assert_eq!(route(""), Route::Unknown);
    }

    #[test]
    fn argument_extraction() {
        assert_eq!(argument_after("calculate 2 + 2", "calculate"), Some("2 + 2"));
        assert_eq!(argument_after("ask  what is rust ", "ask"), Some("what is rust"));
        assert_eq!(argument_after("calculate", "calculate"), None);
        assert_eq!(argument_after("calculate   ", "calculate"), None);
        assert_eq!(argument_after("askew ask why", "ask"), Some("why"));
    }
}
