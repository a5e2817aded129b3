//! Weather lookup tool

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{text_input, ToolTrait};

const WEATHER_API_URL: &str = "https://api.weatherapi.com/v1/current.json";

/// Current conditions for a city, via weatherapi.com
pub struct GetWeatherTool {
    api_key: Option<String>,
    client: reqwest::Client,
}

impl GetWeatherTool {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &errand_config::Config) -> Self {
        Self::new(config.weather_api_key())
    }

    fn format_report(city: &str, data: &Value) -> String {
        let loc = &data["location"];
        let cur = &data["current"];

        let name = loc["name"].as_str().unwrap_or(city);
        let country = loc["country"].as_str().unwrap_or("");
        let place = if country.is_empty() {
            name.to_string()
        } else {
            format!("{}, {}", name, country)
        };

        let condition = cur["condition"]["text"].as_str().unwrap_or("Unknown");

        match cur["temp_c"].as_f64() {
            Some(temp_c) => format!("{}: {}°C, {}", place, temp_c, condition),
            None => {
                let raw: String = cur.to_string().chars().take(120).collect();
                format!("Could not find temperature for {}. Raw: {}", place, raw)
            }
        }
    }
}

#[async_trait]
impl ToolTrait for GetWeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Returns current weather for a city"
    }

    async fn invoke(&self, input: Value) -> String {
        let Some(city) = text_input(&input, "city") else {
            return format!("Error: get_weather expects a city name, got: {}", input);
        };

        let Some(api_key) = &self.api_key else {
            return "Weather API key not set. Define WEATHERAPI_KEY in your environment."
                .to_string();
        };

        debug!("weather lookup for {}", city);

        let response = self
            .client
            .get(WEATHER_API_URL)
            .query(&[("key", api_key.as_str()), ("q", city.as_str()), ("aqi", "no")])
            .timeout(std::time::Duration::from_secs(5))
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => return format!("Weather API request failed: {}", e),
        };

        let status = response.status();
        if !status.is_success() {
            return format!("Weather API returned HTTP {}", status.as_u16());
        }

        match response.json::<Value>().await {
            Ok(data) => Self::format_report(&city, &data),
            Err(e) => format!("Weather API parse error: {}", e),
        }
    }
}
