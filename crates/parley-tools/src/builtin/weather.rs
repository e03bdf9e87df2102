//! Weather lookup tool
//!
//! Serves canned per-city conditions; a stand-in for a real weather API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::{schema::enum_property, schema::property, Tool, ToolOutput, ToolSchema};

/// Reports current weather for a location
pub struct WeatherTool;

#[derive(Debug, Deserialize)]
struct WeatherArgs {
    location: String,
    #[serde(default = "default_unit")]
    unit: String,
}

fn default_unit() -> String {
    "celsius".to_string()
}

fn conditions_for(city: &str) -> Option<(f64, &'static str, u32)> {
    match city {
        "san francisco" => Some((18.0, "Partly cloudy", 65)),
        "new york" => Some((12.0, "Sunny", 45)),
        "london" => Some((10.0, "Rainy", 80)),
        "tokyo" => Some((22.0, "Clear", 50)),
        _ => None,
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Get current weather information for a location"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new()
            .with_properties(serde_json::json!({
                "location": property("string", "City name or location"),
                "unit": enum_property("string", "Temperature unit", &["celsius", "fahrenheit"]),
            }))
            .with_required(vec!["location".to_string()])
    }

    async fn execute(&self, args: Value) -> ToolOutput {
        let args: WeatherArgs = match serde_json::from_value(args) {
            Ok(args) => args,
            Err(e) => return ToolOutput::error(format!("Invalid arguments: {}", e)),
        };

        match conditions_for(&args.location.to_lowercase()) {
            Some((temp_celsius, condition, humidity)) => {
                let temperature = if args.unit == "fahrenheit" {
                    temp_celsius * 9.0 / 5.0 + 32.0
                } else {
                    temp_celsius
                };

                ToolOutput::success(serde_json::json!({
                    "location": args.location,
                    "temperature": (temperature * 10.0).round() / 10.0,
                    "unit": args.unit,
                    "condition": condition,
                    "humidity": humidity,
                }))
            }
            None => ToolOutput::error(format!(
                "Weather data not available for {}",
                args.location
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_city_celsius() {
        let output = WeatherTool
            .execute(serde_json::json!({"location": "Tokyo"}))
            .await;

        assert!(output.success);
        let payload = output.payload();
        assert_eq!(payload["temperature"], 22.0);
        assert_eq!(payload["unit"], "celsius");
        assert_eq!(payload["condition"], "Clear");
    }

    #[tokio::test]
    async fn test_fahrenheit_conversion() {
        let output = WeatherTool
            .execute(serde_json::json!({"location": "London", "unit": "fahrenheit"}))
            .await;

        assert!(output.success);
        assert_eq!(output.payload()["temperature"], 50.0);
    }

    #[tokio::test]
    async fn test_unknown_city() {
        let output = WeatherTool
            .execute(serde_json::json!({"location": "Atlantis"}))
            .await;

        assert!(!output.success);
        assert!(output.payload()["error"]
            .as_str()
            .unwrap()
            .contains("Atlantis"));
    }
}
