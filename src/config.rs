use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

pub const CONFIG_FILE: &str = "config.toml";

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| match Config::load(CONFIG_FILE) {
    Ok(cfg) => cfg,
    Err(e) => {
        eprintln!("invalid configuration, falling back to defaults: {e}");
        Config::default()
    }
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub basic: BasicConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    /// Optional HTTP proxy applied to every upstream client.
    #[serde(default)]
    pub proxy: Option<Url>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicConfig {
    pub loglevel: String,
    pub database_url: String,
    pub wake_word: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Url,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub base_url: Url,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    pub enabled: bool,
    /// TTS program; receives the text to speak as its last argument.
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            basic: BasicConfig::default(),
            gemini: GeminiConfig::default(),
            weather: WeatherConfig::default(),
            speech: SpeechConfig::default(),
            proxy: None,
        }
    }
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            loglevel: "warn".to_string(),
            database_url: "sqlite://nova.db".to_string(),
            wake_word: "nova".to_string(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-1.5-pro".to_string(),
            base_url: Url::parse("https://generativelanguage.googleapis.com/v1beta/")
                .expect("default gemini base url is valid"),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: Url::parse("https://api.openweathermap.org/data/2.5/")
                .expect("default weather base url is valid"),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: "espeak".to_string(),
            args: Vec::new(),
        }
    }
}

impl Config {
    /// Layering: defaults, then `path` (if present), then `NOVA_*` variables
    /// (`__` separates sections), then the legacy `GEMINI` / `API_KEY` keys.
    pub fn load(path: &str) -> Result<Self, figment::Error> {
        Self::figment(path).extract()
    }

    pub fn figment(path: &str) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("NOVA_").split("__"))
            .merge(
                Env::raw()
                    .only(&["GEMINI"])
                    .map(|_| "gemini.api_key".into()),
            )
            .merge(
                Env::raw()
                    .only(&["API_KEY"])
                    .map(|_| "weather.api_key".into()),
            )
    }

    pub fn gemini_enabled(&self) -> bool {
        self.gemini
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let cfg = Config::load("missing.toml")?;
            assert_eq!(cfg.basic.wake_word, "nova");
            assert_eq!(cfg.gemini.model, "gemini-1.5-pro");
            assert!(!cfg.speech.enabled);
            assert!(!cfg.gemini_enabled());
            Ok(())
        });
    }

    #[test]
    fn env_and_legacy_keys_override_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "nova.toml",
                r#"
                [basic]
                loglevel = "debug"
                database_url = "sqlite://file.db"
                wake_word = "nova"

                [speech]
                enabled = true
                command = "say"
                "#,
            )?;
            jail.set_env("NOVA_BASIC__DATABASE_URL", "sqlite://env.db");
            jail.set_env("GEMINI", "g-key");
            jail.set_env("API_KEY", "w-key");

            let cfg = Config::load("nova.toml")?;
            assert_eq!(cfg.basic.loglevel, "debug");
            assert_eq!(cfg.basic.database_url, "sqlite://env.db");
            assert_eq!(cfg.gemini.api_key.as_deref(), Some("g-key"));
            assert_eq!(cfg.weather.api_key.as_deref(), Some("w-key"));
            assert_eq!(cfg.speech.command, "say");
            assert!(cfg.gemini_enabled());
            Ok(())
        });
    }
}
