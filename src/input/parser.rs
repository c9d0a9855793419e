/// Phrase rewrites applied in order, each as a plain substring replace.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("tell me the weather of", "weather"),
    ("tell me the weather in", "weather"),
    ("tell me weather of", "weather"),
    ("tell me weather in", "weather"),
    ("what is the weather in", "weather"),
    ("what is the weather of", "weather"),
    ("tell me the time", "time"),
    ("what is the time", "time"),
    ("tell me the date", "date"),
    ("what is the date", "date"),
    ("tell me today's date", "date"),
];

#[derive(Debug, Clone)]
pub struct CommandParser {
    wake_word: String,
}

impl CommandParser {
    pub fn new(wake_word: impl AsRef<str>) -> Self {
        Self {
            wake_word: wake_word.as_ref().trim().to_lowercase(),
        }
    }

    pub fn wake_word(&self) -> &str {
        &self.wake_word
    }

    /// The command after the wake word, or `None` when the text does not
    /// start with it. The wake word must stand alone (`nova,` is fine,
    /// `novak` is not).
    pub fn parse_wake_word(&self, text: &str) -> Option<String> {
        let text = text.trim().to_lowercase();
        let rest = text.strip_prefix(self.wake_word.as_str())?;
        match rest.chars().next() {
            None => Some(String::new()),
            Some(c) if c.is_whitespace() || matches!(c, ',' | '!' | ':' | '.') => Some(
                rest.trim_start_matches(|c: char| {
                    c.is_whitespace() || matches!(c, ',' | '!' | ':' | '.')
                })
                .trim_end()
                .to_string(),
            ),
            Some(_) => None,
        }
    }

    /// Lowercase, trim and fold common phrasings onto handler keywords.
    pub fn normalize(command: &str) -> String {
        let mut command = command.trim().to_lowercase();
        for (old, new) in REPLACEMENTS {
            if command.contains(old) {
                command = command.replace(old, new);
            }
        }
        command
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new("nova")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wake_word_is_required() {
        let p = CommandParser::default();
        assert_eq!(p.parse_wake_word("Nova tell me the time").as_deref(), Some("tell me the time"));
        assert_eq!(p.parse_wake_word("  NOVA,  help ").as_deref(), Some("help"));
        assert_eq!(p.parse_wake_word("nova").as_deref(), Some(""));
        assert_eq!(p.parse_wake_word("tell me the time"), None);
        assert_eq!(p.parse_wake_word("novak help"), None);
    }

    #[test]
    fn custom_wake_word() {
        let p = CommandParser::new("Jarvis");
        assert_eq!(p.parse_wake_word("jarvis date").as_deref(), Some("date"));
        assert_eq!(p.parse_wake_word("nova date"), None);
    }

    #[test]
    fn phrases_fold_to_keywords() {
        assert_eq!(CommandParser::normalize("Tell me the weather of Pune"), "weather pune");
        assert_eq!(CommandParser::normalize("what is the weather in paris"), "weather paris");
        assert_eq!(CommandParser::normalize("tell me the time"), "time");
        assert_eq!(CommandParser::normalize("What is the date"), "date");
        assert_eq!(CommandParser::normalize("tell me today's date"), "date");
        assert_eq!(CommandParser::normalize("  calculate 2 + 2 "), "calculate 2 + 2");
    }
}
