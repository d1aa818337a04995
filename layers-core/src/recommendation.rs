use serde::{Deserialize, Serialize};

use crate::{
    clothing::{ClothingItem, Recommender},
    error::RecommendError,
    forecast::ForecastClient,
    model::{Coordinate, WeatherReport},
    scoring::{ComfortScorer, ScoreBreakdown},
    snapshot::WeatherSnapshot,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequestLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// Full answer for one coordinate: conditions, score and garments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub weather: WeatherReport,
    pub comfort_score: f64,
    pub score_breakdown: ScoreBreakdown,
    pub clothing_recommendations: Vec<ClothingItem>,
    pub location: RequestLocation,
}

/// Score a ready snapshot and pick clothing for it.
pub fn recommend_snapshot(
    snapshot: &WeatherSnapshot,
    scorer: &ComfortScorer,
    recommender: &Recommender,
) -> Result<Recommendation, RecommendError> {
    let coordinate = snapshot.coordinate();
    if !snapshot.is_ready() {
        return Err(RecommendError::Unavailable {
            latitude: coordinate.latitude(),
            longitude: coordinate.longitude(),
        });
    }

    let score_breakdown = scorer.breakdown(snapshot);
    let comfort_score = score_breakdown.final_score;

    Ok(Recommendation {
        weather: snapshot.report(),
        comfort_score,
        score_breakdown,
        clothing_recommendations: recommender.recommend(comfort_score, snapshot.temperature()),
        location: RequestLocation {
            latitude: coordinate.latitude(),
            longitude: coordinate.longitude(),
        },
    })
}

/// Fetch, score and recommend for `coordinate`.
pub async fn recommend_for(
    client: &ForecastClient,
    coordinate: Coordinate,
    scorer: &ComfortScorer,
    recommender: &Recommender,
) -> Result<Recommendation, RecommendError> {
    let snapshot = WeatherSnapshot::fetch(client, coordinate).await;
    recommend_snapshot(&snapshot, scorer, recommender)
}
