//! Weather-based activity recommendations.
//!
//! The weather source is a pluggable provider; the bundled
//! implementation generates plausible random conditions locally
//! instead of calling a forecast API. Recommendation lists are fixed
//! per condition.

use ecoquest_core::error::EcoQuestResult;
use ecoquest_core::models::submission::GeoPoint;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    LightRain,
    Thunderstorm,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub condition: WeatherCondition,
    pub temperature_c: i32,
    pub humidity_pct: u32,
    pub wind_speed_kmh: u32,
    pub cloud_cover_pct: u32,
    pub visibility_km: f64,
}

impl Default for WeatherSnapshot {
    fn default() -> Self {
        Self {
            condition: WeatherCondition::PartlyCloudy,
            temperature_c: 27,
            humidity_pct: 60,
            wind_speed_kmh: 10,
            cloud_cover_pct: 40,
            visibility_km: 8.0,
        }
    }
}

/// Source of current weather for a position.
pub trait WeatherProvider: Send + Sync {
    fn current(&self, point: GeoPoint) -> impl Future<Output = EcoQuestResult<WeatherSnapshot>> + Send;
}

/// Locally mocked provider: random values in tropical ranges.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockWeatherProvider;

impl WeatherProvider for MockWeatherProvider {
    async fn current(&self, _point: GeoPoint) -> EcoQuestResult<WeatherSnapshot> {
        let mut rng = rand::thread_rng();
        let condition = match rng.gen_range(0..5) {
            0 => WeatherCondition::Clear,
            1 => WeatherCondition::PartlyCloudy,
            2 => WeatherCondition::Cloudy,
            3 => WeatherCondition::LightRain,
            _ => WeatherCondition::Thunderstorm,
        };
        Ok(WeatherSnapshot {
            condition,
            temperature_c: rng.gen_range(20..35),
            humidity_pct: rng.gen_range(30..80),
            wind_speed_kmh: rng.gen_range(5..25),
            cloud_cover_pct: rng.gen_range(0..100),
            visibility_km: rng.gen_range(0.0..10.0),
        })
    }
}

/// Eco-friendly activity suggestions for a weather condition.
pub fn recommended_activities(condition: WeatherCondition) -> &'static [&'static str] {
    match condition {
        WeatherCondition::Clear => &[
            "Cycling around the city or park",
            "Outdoor yoga session",
            "Visiting a local farmer's market on foot",
        ],
        WeatherCondition::PartlyCloudy => &[
            "Walking to your destination instead of driving",
            "Reading a book outdoors",
            "Tending a community garden",
        ],
        WeatherCondition::Cloudy => &[
            "Picking up trash in a public area",
            "Photographing green spots in your neighborhood",
            "Shopping at a second-hand store",
        ],
        WeatherCondition::LightRain => &[
            "Collecting rainwater for your plants",
            "Setting up a home composting bin",
            "Crafting an upcycled DIY item indoors",
        ],
        WeatherCondition::Thunderstorm => &[
            "Planning a zero-waste meal at home",
            "Working by natural light near a window",
            "Making educational vlogs about the weather & nature",
        ],
    }
}

/// Combines a weather provider with the recommendation tables.
pub struct ActivityRecommender<W: WeatherProvider> {
    provider: W,
}

impl<W: WeatherProvider> ActivityRecommender<W> {
    pub fn new(provider: W) -> Self {
        Self { provider }
    }

    /// Current weather plus matching suggestions.
    ///
    /// A failing provider degrades to the default snapshot instead of
    /// propagating the error.
    pub async fn recommend(&self, point: GeoPoint) -> (WeatherSnapshot, &'static [&'static str]) {
        let snapshot = match self.provider.current(point).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "Weather provider unavailable, using defaults");
                WeatherSnapshot::default()
            }
        };
        let activities = recommended_activities(snapshot.condition);
        (snapshot, activities)
    }
}
