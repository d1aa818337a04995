//! Comfort score + temperature → ordered clothing recommendation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Base,
    Mid,
    Outer,
    Shell,
    Accessory,
    Bottom,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Base => "base",
            Category::Mid => "mid",
            Category::Outer => "outer",
            Category::Shell => "shell",
            Category::Accessory => "accessory",
            Category::Bottom => "bottom",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub name: String,
    /// Warmth points; roughly additive across layers.
    pub score: i32,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rainproof: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windproof: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insulated: Option<bool>,
}

impl ClothingItem {
    pub fn new(name: &str, score: i32, category: Category) -> Self {
        Self {
            name: name.to_string(),
            score,
            category,
            rainproof: None,
            windproof: None,
            insulated: None,
        }
    }

    fn rainproof(mut self) -> Self {
        self.rainproof = Some(true);
        self
    }

    fn windproof(mut self) -> Self {
        self.windproof = Some(true);
        self
    }

    fn insulated(mut self) -> Self {
        self.insulated = Some(true);
        self
    }

    pub fn is_rainproof(&self) -> bool {
        self.rainproof.unwrap_or(false)
    }
}

/// Read-only garment catalog, in priority order within each category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Vec<ClothingItem>);

impl Catalog {
    pub fn new(items: Vec<ClothingItem>) -> Self {
        Self(items)
    }

    pub fn items(&self) -> &[ClothingItem] {
        &self.0
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &ClothingItem> {
        self.0.iter().filter(move |item| item.category == category)
    }

    pub fn find(&self, name: &str) -> Option<&ClothingItem> {
        self.0.iter().find(|item| item.name == name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        use Category::*;

        Self(vec![
            ClothingItem::new("tee", 1, Base),
            ClothingItem::new("long_sleeve", 2, Base),
            ClothingItem::new("thermal_base", 3, Base),
            ClothingItem::new("sweater", 3, Mid),
            ClothingItem::new("fleece", 3, Mid),
            ClothingItem::new("heavy_sweater", 4, Mid),
            ClothingItem::new("light_jacket", 3, Outer).windproof(),
            ClothingItem::new("insulated_jacket", 5, Outer).insulated(),
            ClothingItem::new("down_coat", 6, Outer).insulated(),
            ClothingItem::new("rain_shell", 2, Shell).rainproof().windproof(),
            ClothingItem::new("softshell", 3, Shell).windproof(),
            ClothingItem::new("scarf", 1, Accessory),
            ClothingItem::new("hat", 1, Accessory),
            ClothingItem::new("gloves", 1, Accessory),
            ClothingItem::new("thermal_leggings", 2, Bottom),
        ])
    }
}

/// Adds the named catalog items when the raw temperature is below a threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessoryRule {
    pub when_temp_below: f64,
    pub add: Vec<String>,
}

impl AccessoryRule {
    pub fn new(when_temp_below: f64, add: &[&str]) -> Self {
        Self {
            when_temp_below,
            add: add.iter().map(|name| name.to_string()).collect(),
        }
    }

    pub fn applies(&self, temp_f: f64) -> bool {
        temp_f < self.when_temp_below
    }
}

pub fn default_accessory_rules() -> Vec<AccessoryRule> {
    vec![
        AccessoryRule::new(32.0, &["hat", "gloves"]),
        AccessoryRule::new(20.0, &["scarf"]),
        AccessoryRule::new(15.0, &["thermal_leggings"]),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationLimits {
    /// Cap on the whole list, accessories included.
    pub max_layers: usize,
    pub max_accessories: usize,
    /// When false, `max_accessories` is carried but not applied.
    pub enforce_accessory_limit: bool,
}

impl Default for RecommendationLimits {
    fn default() -> Self {
        Self {
            max_layers: 5,
            max_accessories: 3,
            enforce_accessory_limit: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothingConfig {
    pub catalog: Catalog,
    pub auto_accessories: Vec<AccessoryRule>,
    pub limits: RecommendationLimits,
}

impl Default for ClothingConfig {
    fn default() -> Self {
        Self {
            catalog: Catalog::default(),
            auto_accessories: default_accessory_rules(),
            limits: RecommendationLimits::default(),
        }
    }
}

/// How much layering a comfort score calls for, from `Minimal` (pleasant
/// weather) to `Maximum` (harsh weather).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WarmthTier {
    Minimal = 1,
    Light = 2,
    Moderate = 3,
    Heavy = 4,
    Maximum = 5,
}

impl WarmthTier {
    pub fn from_score(comfort_score: f64) -> Self {
        if comfort_score >= 8.0 {
            WarmthTier::Minimal
        } else if comfort_score >= 5.0 {
            WarmthTier::Light
        } else if comfort_score >= 0.0 {
            WarmthTier::Moderate
        } else if comfort_score >= -5.0 {
            WarmthTier::Heavy
        } else {
            WarmthTier::Maximum
        }
    }

    pub fn level(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Default)]
pub struct Recommender {
    config: ClothingConfig,
}

impl Recommender {
    pub fn new(config: ClothingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClothingConfig {
        &self.config
    }

    pub fn recommend(&self, comfort_score: f64, temp_f: f64) -> Vec<ClothingItem> {
        let catalog = &self.config.catalog;
        let limits = &self.config.limits;
        let tier = WarmthTier::from_score(comfort_score);

        let mut picked: Vec<&ClothingItem> = Vec::new();

        if tier >= WarmthTier::Minimal {
            picked.extend(catalog.in_category(Category::Base).next());
        }
        if tier >= WarmthTier::Moderate {
            picked.extend(catalog.in_category(Category::Mid).next());
        }
        if tier >= WarmthTier::Heavy {
            picked.extend(catalog.in_category(Category::Outer).last());
        }
        if comfort_score < 0.0 {
            picked.extend(catalog.in_category(Category::Shell).find(|item| item.is_rainproof()));
        }

        let mut accessories = 0;
        for rule in self.config.auto_accessories.iter().filter(|rule| rule.applies(temp_f)) {
            for name in &rule.add {
                if limits.enforce_accessory_limit && accessories >= limits.max_accessories {
                    break;
                }
                let Some(item) = catalog.find(name) else {
                    continue;
                };
                if !picked.iter().any(|existing| existing.name == item.name) {
                    picked.push(item);
                    accessories += 1;
                }
            }
        }

        picked.truncate(limits.max_layers);
        picked.into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[ClothingItem]) -> Vec<&str> {
        items.iter().map(|item| item.name.as_str()).collect()
    }

    #[test]
    fn tiers_use_inclusive_lower_bounds() {
        assert_eq!(WarmthTier::from_score(8.0), WarmthTier::Minimal);
        assert_eq!(WarmthTier::from_score(7.99), WarmthTier::Light);
        assert_eq!(WarmthTier::from_score(5.0), WarmthTier::Light);
        assert_eq!(WarmthTier::from_score(0.0), WarmthTier::Moderate);
        assert_eq!(WarmthTier::from_score(-5.0), WarmthTier::Heavy);
        assert_eq!(WarmthTier::from_score(-5.01), WarmthTier::Maximum);
        assert_eq!(WarmthTier::Maximum.level(), 5);
    }

    #[test]
    fn comfortable_weather_is_just_a_base_layer() {
        let items = Recommender::default().recommend(9.0, 75.0);

        assert_eq!(names(&items), vec!["tee"]);
        assert_eq!(items[0].category, Category::Base);
    }

    #[test]
    fn neutral_score_adds_mid_layer() {
        let items = Recommender::default().recommend(2.0, 55.0);
        assert_eq!(names(&items), vec!["tee", "sweater"]);
    }

    #[test]
    fn negative_score_adds_heaviest_outer_and_rain_shell() {
        let items = Recommender::default().recommend(-2.0, 45.0);
        assert_eq!(names(&items), vec!["tee", "sweater", "down_coat", "rain_shell"]);
    }

    #[test]
    fn cold_weather_is_truncated_to_max_layers() {
        let items = Recommender::default().recommend(-7.0, 10.0);

        assert_eq!(items.len(), 5);
        assert_eq!(
            names(&items),
            vec!["tee", "sweater", "down_coat", "rain_shell", "hat"]
        );
    }

    #[test]
    fn accessory_rules_are_cumulative() {
        let mut config = ClothingConfig::default();
        config.limits.max_layers = 20;
        let items = Recommender::new(config).recommend(-7.0, 10.0);

        assert_eq!(
            names(&items),
            vec![
                "tee",
                "sweater",
                "down_coat",
                "rain_shell",
                "hat",
                "gloves",
                "scarf",
                "thermal_leggings",
            ]
        );
    }

    #[test]
    fn accessories_follow_temperature_not_tier() {
        let mut config = ClothingConfig::default();
        config.limits.max_layers = 20;
        let items = Recommender::new(config).recommend(9.0, 25.0);

        assert_eq!(names(&items), vec!["tee", "hat", "gloves"]);
    }

    #[test]
    fn duplicate_accessories_are_not_repeated() {
        let mut config = ClothingConfig::default();
        config.limits.max_layers = 20;
        config.auto_accessories.push(AccessoryRule::new(40.0, &["hat"]));
        let items = Recommender::new(config).recommend(9.0, 10.0);

        assert_eq!(items.iter().filter(|item| item.name == "hat").count(), 1);
    }

    #[test]
    fn accessory_limit_applies_only_when_enforced() {
        let mut config = ClothingConfig::default();
        config.limits.max_layers = 20;
        config.limits.max_accessories = 2;

        let uncapped = Recommender::new(config.clone()).recommend(9.0, 10.0);
        assert_eq!(uncapped.len(), 5);

        config.limits.enforce_accessory_limit = true;
        let capped = Recommender::new(config).recommend(9.0, 10.0);
        assert_eq!(names(&capped), vec!["tee", "hat", "gloves"]);
    }

    #[test]
    fn missing_categories_and_names_are_skipped() {
        let config = ClothingConfig {
            catalog: Catalog::new(vec![ClothingItem::new("hat", 1, Category::Accessory)]),
            ..ClothingConfig::default()
        };
        let items = Recommender::new(config).recommend(-10.0, 0.0);

        assert_eq!(names(&items), vec!["hat"]);
    }

    #[test]
    fn catalog_round_trips_through_toml() {
        let config = ClothingConfig::default();
        let text = toml::to_string(&config).expect("serialize clothing config");
        let parsed: ClothingConfig = toml::from_str(&text).expect("parse clothing config");

        assert_eq!(parsed, config);
        assert_eq!(parsed.catalog.find("rain_shell").map(ClothingItem::is_rainproof), Some(true));
    }
}
