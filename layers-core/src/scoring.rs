//! Temperature, wind and forecast text → comfort score.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::snapshot::WeatherSnapshot;

pub const DEFAULT_COMFORT_TEMPERATURE: f64 = 70.0;

/// Peak score at the comfort temperature, losing 0.5 points per °F away
/// from it.
///
/// The result is not clamped: beyond 40°F of deviation it drops below -10,
/// and the wind multiplier applied later can only shrink its magnitude.
pub fn score_temperature(temp_f: f64, comfort_f: f64) -> f64 {
    10.0 - 0.5 * (temp_f - comfort_f).abs()
}

/// Damping factor for wind: 1.0 up to `start` mph, then `step` less per mph,
/// never below `floor`.
pub fn wind_multiplier(wind_mph: f64, start: f64, step: f64, floor: f64) -> f64 {
    let excess = (wind_mph - start).max(0.0);
    (1.0 - step * excess).max(floor)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindDamping {
    pub start: f64,
    pub step: f64,
    pub floor: f64,
}

impl Default for WindDamping {
    fn default() -> Self {
        Self {
            start: 5.0,
            step: 0.02,
            floor: 0.6,
        }
    }
}

impl WindDamping {
    pub fn multiplier(&self, wind_mph: f64) -> f64 {
        wind_multiplier(wind_mph, self.start, self.step, self.floor)
    }
}

/// Tunable inputs of the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub comfort_temperature: f64,
    pub wind: WindDamping,
    /// Lower-cased short forecast → score. Unlisted text scores 0.
    pub forecast_scores: BTreeMap<String, f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let forecast_scores = [
            ("sunny", 10.0),
            ("mostly sunny", 8.0),
            ("partly cloudy", 6.0),
            ("mostly cloudy", 3.0),
            ("cloudy", 1.0),
            ("fog", -2.0),
            ("rain", -5.0),
            ("sleet", -6.0),
            ("snow", -7.0),
            ("thunderstorms", -8.0),
            ("heavy rain", -9.0),
            ("heavy snow", -10.0),
        ]
        .into_iter()
        .map(|(text, score)| (text.to_string(), score))
        .collect();

        Self {
            comfort_temperature: DEFAULT_COMFORT_TEMPERATURE,
            wind: WindDamping::default(),
            forecast_scores,
        }
    }
}

impl ScoringConfig {
    pub fn with_comfort_temperature(mut self, comfort_f: f64) -> Self {
        self.comfort_temperature = comfort_f;
        self
    }
}

/// Components of a comfort score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub temperature_score: f64,
    pub wind_multiplier: f64,
    pub forecast_score: f64,
    pub final_score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ComfortScorer {
    config: ScoringConfig,
}

impl ComfortScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score_temperature(&self, temp_f: f64) -> f64 {
        score_temperature(temp_f, self.config.comfort_temperature)
    }

    pub fn wind_multiplier(&self, wind_mph: f64) -> f64 {
        self.config.wind.multiplier(wind_mph)
    }

    pub fn forecast_score(&self, short_forecast: &str) -> f64 {
        self.config
            .forecast_scores
            .get(short_forecast)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn breakdown(&self, snapshot: &WeatherSnapshot) -> ScoreBreakdown {
        let temperature_score = self.score_temperature(snapshot.temperature());
        let wind_multiplier = self.wind_multiplier(snapshot.wind_speed());
        let forecast_score = self.forecast_score(&snapshot.short_forecast());

        ScoreBreakdown {
            temperature_score,
            wind_multiplier,
            forecast_score,
            final_score: temperature_score * wind_multiplier + forecast_score,
        }
    }

    pub fn score(&self, snapshot: &WeatherSnapshot) -> f64 {
        self.breakdown(snapshot).final_score
    }
}
