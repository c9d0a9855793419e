use super::{HandlerContext, Reply};
use crate::router::argument_after;
use crate::ui::{Level, View};
use tracing::warn;

pub const WEATHER_USAGE: &str =
    "Please specify a city (e.g., 'Nova tell me the weather of London')";

/// City after `weather`, skipping a leading `of`/`in`; letters and spaces only.
pub fn extract_city(command: &str) -> Option<String> {
    let rest = argument_after(command, "weather")?;
    let rest = ["of", "in"]
        .iter()
        .find_map(|filler| {
            rest.strip_prefix(filler)
                .filter(|r| r.starts_with(char::is_whitespace))
        })
        .map(str::trim_start)
        .unwrap_or(rest);
    let city: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect();
    let city = city.trim();
    (!city.is_empty()).then(|| city.to_string())
}

pub async fn handle_weather(ctx: &mut HandlerContext, command: &str) -> Reply {
    let Some(city) = extract_city(command) else {
        return Reply::warning(WEATHER_USAGE);
    };
    ctx.ui
        .notice(Level::Info, &format!("Fetching weather for {city}..."));
    match ctx.weather.current(&city).await {
        Ok(report) => Reply::with_view(report.to_string(), View::Weather(report)),
        Err(e) => {
            warn!(city = %city, error = %e, "weather lookup failed");
            Reply::error(e.to_string())
        }
    }
}
