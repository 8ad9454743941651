use chrono::{serde::ts_seconds, serde::ts_seconds_option, DateTime, FixedOffset, Offset, Utc};
use serde::Deserialize;

use crate::errors::WeatherError;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct WeatherSnapshot {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Seconds east of UTC for the forecast location.
    pub timezone_offset: i32,
    pub current: Current,
    pub hourly: Vec<Hourly>,
    pub daily: Vec<Daily>,
}

impl WeatherSnapshot {
    pub fn from_json(json: &str) -> Result<Self, WeatherError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn local_time(&self, time: DateTime<Utc>) -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(self.timezone_offset).unwrap_or_else(|| Utc.fix());
        time.with_timezone(&offset)
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Condition {
    pub main: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Current {
    /// Missing when the provider had no current observation.
    #[serde(with = "ts_seconds_option")]
    pub dt: Option<DateTime<Utc>>,
    pub temp: f64,
    pub feels_like: f64,
    pub wind_speed: f64,
    pub wind_deg: f64,
    pub weather: Vec<Condition>,
}

impl Current {
    pub fn is_available(&self) -> bool {
        self.dt.is_some()
    }

    pub fn condition(&self) -> &str {
        condition(&self.weather)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Hourly {
    #[serde(with = "ts_seconds")]
    pub dt: DateTime<Utc>,
    #[serde(default)]
    pub temp: f64,
    #[serde(default)]
    pub pop: f64,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

impl Hourly {
    pub fn condition(&self) -> &str {
        condition(&self.weather)
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Temperatures {
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Daily {
    #[serde(with = "ts_seconds")]
    pub dt: DateTime<Utc>,
    #[serde(default)]
    pub temp: Temperatures,
    #[serde(default)]
    pub pop: f64,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

impl Daily {
    pub fn condition(&self) -> &str {
        condition(&self.weather)
    }
}

fn condition(weather: &[Condition]) -> &str {
    weather.first().map_or("", |condition| condition.main.as_str())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const ONE_CALL: &str = r#"{
        "lat": 41.85, "lon": -87.65,
        "timezone": "America/Chicago",
        "timezone_offset": -18000,
        "current": {
            "dt": 1660000000, "temp": 78.3, "feels_like": 80.1,
            "wind_speed": 9.2, "wind_deg": 210, "humidity": 60,
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}]
        },
        "hourly": [
            {"dt": 1660000000, "temp": 78.3, "pop": 0,
             "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}]}
        ],
        "daily": [
            {"dt": 1660000000, "temp": {"day": 77, "min": 60, "max": 75.4, "night": 62},
             "pop": 0.2,
             "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}]}
        ]
    }"#;

    #[test]
    fn decodes_one_call_payload() {
        let snapshot = WeatherSnapshot::from_json(ONE_CALL).unwrap();

        assert!(snapshot.current.is_available());
        assert_eq!(snapshot.current.condition(), "Clear");
        assert_eq!(snapshot.hourly.len(), 1);
        assert_eq!((snapshot.lat, snapshot.lon), (Some(41.85), Some(-87.65)));
        assert_eq!(snapshot.daily[0].temp.max, 75.4);
        assert_eq!(snapshot.daily[0].condition(), "Rain");
        assert_eq!(snapshot.daily[0].dt, Utc.timestamp_opt(1660000000, 0).unwrap());
    }

    #[test]
    fn missing_current_block_is_unavailable() {
        let snapshot = WeatherSnapshot::from_json(r#"{"hourly": [], "daily": []}"#).unwrap();

        assert!(!snapshot.current.is_available());
        assert_eq!(snapshot.current.condition(), "");
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        let result = WeatherSnapshot::from_json(r#"{"hourly": [{"temp": 70}]}"#);
        assert!(matches!(result, Err(WeatherError::Decode(_))));
    }

    #[test]
    fn local_time_applies_the_offset() {
        let snapshot = WeatherSnapshot {
            timezone_offset: -5 * 3600,
            ..WeatherSnapshot::default()
        };
        let noon = Utc.with_ymd_and_hms(2022, 8, 8, 17, 0, 0).unwrap();

        assert_eq!(snapshot.local_time(noon).format("%-I:%M%p").to_string(), "12:00PM");
    }
}
