use serde::{Deserialize, Serialize};
use std::fmt;

/// Subset of the OpenWeatherMap "current weather" payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Conditions>,
    #[serde(default)]
    pub wind: Option<Wind>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Conditions {
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

/// What the weather handler shows and speaks.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub description: String,
    pub wind_speed: Option<f64>,
}

impl From<CurrentWeather> for WeatherReport {
    fn from(w: CurrentWeather) -> Self {
        Self {
            city: w.name,
            temperature: w.main.temp,
            feels_like: w.main.feels_like,
            humidity: w.main.humidity,
            description: w
                .weather
                .into_iter()
                .next()
                .map(|c| c.description)
                .unwrap_or_else(|| "unknown".to_string()),
            wind_speed: w.wind.map(|w| w.speed),
        }
    }
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Weather in {}: {}, {:.1}°C (feels like {:.1}°C), humidity {}%",
            self.city, self.description, self.temperature, self.feels_like, self.humidity
        )?;
        if let Some(speed) = self.wind_speed {
            write!(f, ", wind {speed:.1} m/s")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_from_payload() {
        let raw = r#"{
            "name": "London",
            "main": {"temp": 12.34, "feels_like": 10.0, "humidity": 81, "pressure": 1012},
            "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds"}],
            "wind": {"speed": 4.6}
        }"#;
        let current: CurrentWeather = serde_json::from_str(raw).unwrap();
        let report = WeatherReport::from(current);
        assert_eq!(report.city, "London");
        assert_eq!(
            report.to_string(),
            "Weather in London: broken clouds, 12.3°C (feels like 10.0°C), humidity 81%, wind 4.6 m/s"
        );
    }
}
