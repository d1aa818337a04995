use tracing::warn;

use crate::{
    forecast::ForecastClient,
    model::{Coordinate, CurrentConditions, SOURCE_TAG, WeatherReport},
};

pub const NO_FORECAST: &str = "no forecast available";
pub const UNKNOWN: &str = "Unknown";

/// Conditions captured for one coordinate.
///
/// Fetch failures leave the snapshot empty instead of surfacing an error,
/// and every accessor falls back to a default. A measured zero and a
/// missing value therefore look the same to callers; check
/// [`is_ready`](Self::is_ready) before trusting the numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    coordinate: Coordinate,
    conditions: Option<CurrentConditions>,
}

impl WeatherSnapshot {
    pub async fn fetch(client: &ForecastClient, coordinate: Coordinate) -> Self {
        match client.current_conditions(coordinate).await {
            Ok(conditions) => Self::from_conditions(coordinate, conditions),
            Err(err) => {
                warn!(%coordinate, error = %err, "could not retrieve weather data");
                Self::empty(coordinate)
            }
        }
    }

    pub fn from_conditions(coordinate: Coordinate, conditions: CurrentConditions) -> Self {
        Self {
            coordinate,
            conditions: Some(conditions),
        }
    }

    pub fn empty(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            conditions: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.conditions.is_some()
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn conditions(&self) -> Option<&CurrentConditions> {
        self.conditions.as_ref()
    }

    pub fn temperature(&self) -> f64 {
        self.conditions.as_ref().and_then(|c| c.temp_f).unwrap_or(0.0)
    }

    pub fn temperature_celsius(&self) -> f64 {
        (self.temperature() - 32.0) * 5.0 / 9.0
    }

    pub fn wind_speed(&self) -> f64 {
        self.conditions.as_ref().map_or(0.0, |c| c.wind_mph)
    }

    /// Lower-cased short forecast text.
    pub fn short_forecast(&self) -> String {
        self.conditions
            .as_ref()
            .and_then(|c| c.short_forecast.as_deref())
            .unwrap_or(NO_FORECAST)
            .to_lowercase()
    }

    pub fn period_start(&self) -> String {
        self.conditions
            .as_ref()
            .and_then(|c| c.period_start.clone())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    pub fn location(&self) -> String {
        self.conditions
            .as_ref()
            .map_or_else(|| UNKNOWN.to_string(), |c| c.location.clone())
    }

    pub fn report(&self) -> WeatherReport {
        WeatherReport {
            temp_f: self.temperature(),
            wind_mph: self.wind_speed(),
            short_forecast: self.short_forecast(),
            location: self.location(),
            period_start: self.period_start(),
            source: SOURCE_TAG.to_string(),
        }
    }
}

impl std::fmt::Display for WeatherSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Weather at ({}): {:.1}°F, {}, wind {:.1} mph.",
            self.coordinate,
            self.temperature(),
            self.short_forecast(),
            self.wind_speed()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::forecast::tests::{ScriptedTransport, client, hourly_body, ok, point_body, status};

    fn coordinate() -> Coordinate {
        Coordinate::new(40.7128, -74.006).expect("valid coordinate")
    }

    #[test]
    fn empty_snapshot_returns_defaults() {
        let snap = WeatherSnapshot::empty(coordinate());

        assert!(!snap.is_ready());
        assert_eq!(snap.temperature(), 0.0);
        assert_eq!(snap.wind_speed(), 0.0);
        assert_eq!(snap.short_forecast(), NO_FORECAST);
        assert_eq!(snap.period_start(), "Unknown");
        assert_eq!(snap.location(), "Unknown");
        assert_eq!(snap.report().source, "weather.gov");
    }

    #[test]
    fn missing_fields_inside_conditions_use_defaults() {
        let snap = WeatherSnapshot::from_conditions(
            coordinate(),
            CurrentConditions {
                temp_f: None,
                wind_mph: 0.0,
                short_forecast: None,
                period_start: None,
                location: "New York, NY".to_string(),
                source: SOURCE_TAG.to_string(),
            },
        );

        assert!(snap.is_ready());
        assert_eq!(snap.temperature(), 0.0);
        assert_eq!(snap.short_forecast(), NO_FORECAST);
        assert_eq!(snap.location(), "New York, NY");
    }

    #[test]
    fn celsius_and_display() {
        let snap = WeatherSnapshot::from_conditions(
            coordinate(),
            CurrentConditions {
                temp_f: Some(212.0),
                wind_mph: 10.0,
                short_forecast: Some("Sunny".to_string()),
                period_start: None,
                location: "New York, NY".to_string(),
                source: SOURCE_TAG.to_string(),
            },
        );

        assert_eq!(snap.temperature_celsius(), 100.0);
        assert_eq!(
            snap.to_string(),
            "Weather at (40.7128, -74.006): 212.0°F, sunny, wind 10.0 mph."
        );
    }

    #[tokio::test]
    async fn fetch_populates_snapshot() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok(point_body()), ok(hourly_body())]));
        let snap = WeatherSnapshot::fetch(&client(transport), coordinate()).await;

        assert!(snap.is_ready());
        assert_eq!(snap.temperature(), 52.0);
        assert_eq!(snap.wind_speed(), 12.5);
        assert_eq!(snap.short_forecast(), "light rain");
    }

    #[tokio::test]
    async fn fetch_failure_degrades_to_empty() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            ok(point_body()),
            ok(json!({ "properties": { "periods": [] } })),
        ]));
        let snap = WeatherSnapshot::fetch(&client(transport), coordinate()).await;
        assert!(!snap.is_ready());

        let transport = Arc::new(ScriptedTransport::new(vec![status(404, None)]));
        let snap = WeatherSnapshot::fetch(&client(transport), coordinate()).await;
        assert!(!snap.is_ready());
        assert_eq!(snap.period_start(), "Unknown");
    }
}
