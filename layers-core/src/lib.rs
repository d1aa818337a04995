//! Core library for the `weather-layers` CLI.
//!
//! This crate defines:
//! - A retrying client for the weather.gov hourly forecast
//! - Parsers for the free-text fields in forecast periods
//! - Comfort scoring and clothing recommendations
//! - Configuration handling
//!
//! It is used by `layers-cli`, but can also be reused by other binaries or services.

pub mod clothing;
pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod parsing;
pub mod recommendation;
pub mod scoring;
pub mod snapshot;

pub use clothing::{Category, ClothingConfig, ClothingItem, Recommender, WarmthTier};
pub use config::{Config, NwsConfig, validate_comfort_temperature};
pub use error::{FetchError, RecommendError};
pub use forecast::{ForecastClient, HttpTransport};
pub use model::{Coordinate, CurrentConditions, ForecastSample, WeatherReport};
pub use recommendation::{Recommendation, recommend_for};
pub use scoring::{ComfortScorer, ScoreBreakdown, ScoringConfig};
pub use snapshot::WeatherSnapshot;
