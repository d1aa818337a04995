//! Wire shapes of the weather.gov GeoJSON responses we read.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct PointResponse {
    pub properties: PointProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PointProperties {
    pub forecast_hourly: Option<String>,
    pub grid_id: Option<String>,
    pub grid_x: Option<i64>,
    pub grid_y: Option<i64>,
    pub relative_location: Option<RelativeLocation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RelativeLocation {
    pub properties: Option<RelativeLocationProperties>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RelativeLocationProperties {
    pub city: Option<String>,
    pub state: Option<String>,
}

impl PointProperties {
    /// `/gridpoints/{office}/{x},{y}/forecast/hourly`, when all three parts exist.
    pub fn grid_path(&self) -> Option<String> {
        match (&self.grid_id, self.grid_x, self.grid_y) {
            (Some(office), Some(x), Some(y)) => {
                Some(format!("/gridpoints/{office}/{x},{y}/forecast/hourly"))
            }
            _ => None,
        }
    }

    pub fn city_state(&self) -> Option<String> {
        let place = self.relative_location.as_ref()?.properties.as_ref()?;

        match (place.city.as_deref(), place.state.as_deref()) {
            (Some(city), Some(state)) => Some(format!("{city}, {state}")),
            (Some(city), None) => Some(city.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    #[serde(default)]
    pub properties: ForecastProperties,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ForecastProperties {
    pub periods: Option<Vec<RawPeriod>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawPeriod {
    pub temperature: Option<f64>,
    pub wind_speed: Option<String>,
    pub short_forecast: Option<String>,
    pub start_time: Option<String>,
}
