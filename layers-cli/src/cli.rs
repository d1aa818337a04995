use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use layers_core::{
    ComfortScorer, Config, Coordinate, ForecastClient, Recommendation, Recommender,
    WeatherSnapshot, recommend_for, validate_comfort_temperature,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-layers", version, about = "Weather-based clothing recommendations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the identity sent to weather.gov and your comfort temperature.
    Configure,

    /// Show current conditions for a point.
    Current {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Recommend clothing for the current conditions at a point.
    Recommend {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        /// Personal comfort temperature in °F (50-90); defaults to the configured value or 70.
        #[arg(long)]
        comfort_temp: Option<f64>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Collect short forecasts from random points in the continental U.S.
    Sample {
        #[arg(long, default_value_t = 10)]
        count: usize,

        /// Pause between points, in milliseconds.
        #[arg(long, default_value_t = 1000)]
        pause_ms: u64,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Current {
                latitude,
                longitude,
                json,
            } => {
                let client = client(&config)?;
                let coordinate = Coordinate::new(latitude, longitude)?;
                let conditions = client
                    .current_conditions(coordinate)
                    .await
                    .context("Failed to fetch weather data")?;
                let report = WeatherSnapshot::from_conditions(coordinate, conditions).report();

                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    println!("{}", report.location);
                    println!("  {}", report.period_start);
                    println!(
                        "  {:.0}°F, {}, wind {:.1} mph",
                        report.temp_f, report.short_forecast, report.wind_mph
                    );
                    println!("  source: {}", report.source);
                }
                Ok(())
            }
            Command::Recommend {
                latitude,
                longitude,
                comfort_temp,
                json,
            } => {
                let mut scoring = config.scoring_config();
                if let Some(comfort) = comfort_temp {
                    scoring = scoring.with_comfort_temperature(validate_comfort_temperature(comfort)?);
                }

                let client = client(&config)?;
                let coordinate = Coordinate::new(latitude, longitude)?;
                let rec = recommend_for(
                    &client,
                    coordinate,
                    &ComfortScorer::new(scoring),
                    &Recommender::new(config.clothing.clone()),
                )
                .await?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&rec)?);
                } else {
                    print_recommendation(&rec);
                }
                Ok(())
            }
            Command::Sample { count, pause_ms } => {
                let client = client(&config)?;
                let mut rng = rand::thread_rng();
                let points = std::iter::repeat_with(|| Coordinate::random_conus(&mut rng));

                let samples = client
                    .sample_short_forecasts(points, count, Duration::from_millis(pause_ms))
                    .await;

                for sample in &samples {
                    println!(
                        "({:.3}, {:.3}): {}",
                        sample.latitude, sample.longitude, sample.short_forecast
                    );
                }
                println!("{} of {} samples collected", samples.len(), count);
                Ok(())
            }
        }
    }
}

fn client(config: &Config) -> Result<ForecastClient> {
    ForecastClient::from_config(&config.nws).context("Failed to set up weather.gov client")
}

fn configure(mut config: Config) -> Result<()> {
    let app_name = Text::new("Application name:")
        .with_default(&config.nws.app_name)
        .prompt()?;
    let contact = Text::new("Contact email or URL (sent to weather.gov):")
        .with_default(&config.nws.contact)
        .prompt()?;
    config.nws.app_name = app_name;
    config.nws.contact = contact;

    let comfort = CustomType::<f64>::new("Comfort temperature (°F, 50-90):")
        .with_default(config.scoring_config().comfort_temperature)
        .with_error_message("Please enter a number")
        .prompt()?;
    config.comfort_temperature = Some(validate_comfort_temperature(comfort)?);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn print_recommendation(rec: &Recommendation) {
    let weather = &rec.weather;
    let breakdown = &rec.score_breakdown;

    println!("{} ({})", weather.location, weather.period_start);
    println!(
        "  {:.0}°F, {}, wind {:.1} mph",
        weather.temp_f, weather.short_forecast, weather.wind_mph
    );
    println!(
        "Comfort score {:.1} (temperature {:.1} x wind {:.2} + forecast {:.1})",
        rec.comfort_score,
        breakdown.temperature_score,
        breakdown.wind_multiplier,
        breakdown.forecast_score
    );

    println!("Wear:");
    for item in &rec.clothing_recommendations {
        let mut flags = Vec::new();
        if item.rainproof == Some(true) {
            flags.push("rainproof");
        }
        if item.windproof == Some(true) {
            flags.push("windproof");
        }
        if item.insulated == Some(true) {
            flags.push("insulated");
        }

        if flags.is_empty() {
            println!("  - {} [{}]", item.name, item.category);
        } else {
            println!("  - {} [{}] ({})", item.name, item.category, flags.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_negative_longitude() {
        let cli = Cli::try_parse_from(["weather-layers", "recommend", "40.7", "-74.0", "--comfort-temp", "68"])
            .expect("valid arguments");

        match cli.command {
            Command::Recommend {
                latitude,
                longitude,
                comfort_temp,
                json,
            } => {
                assert_eq!(latitude, 40.7);
                assert_eq!(longitude, -74.0);
                assert_eq!(comfort_temp, Some(68.0));
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn sample_has_defaults() {
        let cli = Cli::try_parse_from(["weather-layers", "sample"]).expect("valid arguments");
        assert!(matches!(cli.command, Command::Sample { count: 10, pause_ms: 1000 }));
    }
}
