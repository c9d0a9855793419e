use crate::error::NovaError;
use crate::types::weather::{CurrentWeather, WeatherReport};
use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

#[derive(Clone)]
pub struct WeatherApi {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl WeatherApi {
    pub fn new(client: reqwest::Client, base_url: Url, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Current conditions for `city` in metric units.
    pub async fn current(&self, city: &str) -> Result<WeatherReport, NovaError> {
        let url = self.request_url(city)?;
        let resp = self.client.get(url).send().await?;
        match resp.status() {
            s if s.is_success() => {
                let current: CurrentWeather = resp.json().await?;
                debug!(city, "weather fetched");
                Ok(current.into())
            }
            status => Err(status_error(city, status)),
        }
    }

    fn request_url(&self, city: &str) -> Result<Url, NovaError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(NovaError::MissingApiKey("weather"))?;
        let mut url = self.base_url.join("weather")?;
        url.query_pairs_mut()
            .append_pair("q", city)
            .append_pair("appid", key)
            .append_pair("units", "metric");
        Ok(url)
    }
}

/// 404 names the city; every other failure gets the generic message.
fn status_error(city: &str, status: StatusCode) -> NovaError {
    match status {
        StatusCode::NOT_FOUND => NovaError::Weather(format!("City '{city}' not found")),
        status => {
            if status == StatusCode::UNAUTHORIZED {
                warn!("weather API rejected the configured API key");
            }
            debug!(city, %status, "weather lookup failed");
            NovaError::Weather(format!("Could not fetch weather for {city}"))
        }
    }
}
