use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Fixed source tag attached to every weather report.
pub const SOURCE_TAG: &str = "weather.gov";

pub const CONUS_LATITUDE: std::ops::RangeInclusive<f64> = 25.0..=49.0;
pub const CONUS_LONGITUDE: std::ops::RangeInclusive<f64> = -124.0..=-66.0;

/// A validated geographic point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, FetchError> {
        let lat_ok = (-90.0..=90.0).contains(&latitude);
        let lon_ok = (-180.0..=180.0).contains(&longitude);

        if !lat_ok || !lon_ok {
            return Err(FetchError::InvalidCoordinate { latitude, longitude });
        }

        Ok(Self { latitude, longitude })
    }

    /// A random point inside the continental U.S. bounding box, rounded to
    /// three decimals.
    pub fn random_conus<R: Rng>(rng: &mut R) -> Self {
        let round3 = |v: f64| (v * 1000.0).round() / 1000.0;

        Self {
            latitude: round3(rng.gen_range(CONUS_LATITUDE)),
            longitude: round3(rng.gen_range(CONUS_LONGITUDE)),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Normalized conditions for the current forecast period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_f: Option<f64>,
    pub wind_mph: f64,
    pub short_forecast: Option<String>,
    pub period_start: Option<String>,
    pub location: String,
    pub source: String,
}

/// Weather block returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temp_f: f64,
    pub wind_mph: f64,
    pub short_forecast: String,
    pub location: String,
    pub period_start: String,
    pub source: String,
}

/// One point collected by forecast sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub latitude: f64,
    pub longitude: f64,
    pub short_forecast: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundary_coordinates() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn random_points_stay_in_the_continental_box() {
        use rand::{SeedableRng, rngs::StdRng};

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let point = Coordinate::random_conus(&mut rng);
            assert!(CONUS_LATITUDE.contains(&point.latitude()));
            assert!(CONUS_LONGITUDE.contains(&point.longitude()));
            assert_eq!((point.latitude() * 1000.0).round() / 1000.0, point.latitude());
        }
    }

    #[test]
    fn rejects_out_of_range_and_nan() {
        let err = Coordinate::new(91.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("Invalid coordinate"));

        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }
}
