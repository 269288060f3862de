use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Category;
use crate::planner::constants::{
    DEFAULT_ROW_LEVEL, EVENT_PATTERNS, EXPANDED_MEAL_CAP, SuccessMultipliers, WEEKLY_MEAL_CAP,
};
use crate::planner::numeric::{lenient_f64, lenient_i64};

/// Cooking outcome tier for a row.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SuccessType {
    #[default]
    Normal,
    Great,
    Sunday,
}

/// One line of a weekly meal plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRow {
    pub category: Category,

    pub recipe_id: String,

    /// Meals cooked this week. Negative values count as zero.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub meals: i64,

    /// Recipe level; clamped to 1..=65 when used.
    #[serde(default = "default_row_level", deserialize_with = "lenient_i64")]
    pub level: i64,

    #[serde(default)]
    pub success_type: SuccessType,
}

fn default_row_level() -> i64 {
    DEFAULT_ROW_LEVEL
}

impl RecipeRow {
    pub fn new(category: Category, recipe_id: impl Into<String>, meals: i64) -> Self {
        Self {
            category,
            recipe_id: recipe_id.into(),
            meals,
            level: DEFAULT_ROW_LEVEL,
            success_type: SuccessType::Normal,
        }
    }

    pub fn with_level(mut self, level: i64) -> Self {
        self.level = level;
        self
    }

    pub fn with_success(mut self, success_type: SuccessType) -> Self {
        self.success_type = success_type;
        self
    }
}

/// Per-ingredient user overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientSetting {
    #[serde(default)]
    pub excluded: bool,

    /// Units gathered per day without cooking.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub replenish_per_day: f64,
}

/// Ingredient id -> setting.
pub type IngredientSettings = BTreeMap<String, IngredientSetting>;

/// Event bonus pattern, keyed "0".."3" in saved plans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "String")]
pub enum EventPattern {
    #[default]
    None,
    Plus10,
    Plus25,
    Plus50,
}

impl EventPattern {
    /// Parse a pattern key; unknown keys fall back to no event.
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "1" => EventPattern::Plus10,
            "2" => EventPattern::Plus25,
            "3" => EventPattern::Plus50,
            _ => EventPattern::None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            EventPattern::None => "0",
            EventPattern::Plus10 => "1",
            EventPattern::Plus25 => "2",
            EventPattern::Plus50 => "3",
        }
    }

    pub fn multipliers(self) -> SuccessMultipliers {
        match self {
            EventPattern::None => EVENT_PATTERNS[0],
            EventPattern::Plus10 => EVENT_PATTERNS[1],
            EventPattern::Plus25 => EVENT_PATTERNS[2],
            EventPattern::Plus50 => EVENT_PATTERNS[3],
        }
    }

    pub fn success_multiplier(self, success_type: SuccessType) -> f64 {
        let m = self.multipliers();
        match success_type {
            SuccessType::Normal => m.normal,
            SuccessType::Great => m.great,
            SuccessType::Sunday => m.sunday,
        }
    }
}

impl From<serde_json::Value> for EventPattern {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => EventPattern::from_key(&s),
            serde_json::Value::Number(n) => EventPattern::from_key(&n.to_string()),
            _ => EventPattern::None,
        }
    }
}

impl From<EventPattern> for String {
    fn from(pattern: EventPattern) -> Self {
        pattern.key().to_string()
    }
}

/// How an ingredient drawn by several categories is combined.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum CombinePolicy {
    /// Largest single-category draw (one pot per category cooks at a time).
    #[default]
    Max,
    /// Every category's draw added together.
    Sum,
}

/// How daily replenishment is subtracted from the gross need.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ReplenishMode {
    /// `replenish_per_day * 7`, once per ingredient.
    #[default]
    Weekly,
    /// `replenish_per_day * meals / 3` per row, before combining rows.
    PerRow,
    /// `replenish_per_day * min(7, contributing meals / 3)`, once per ingredient.
    PooledDays,
}

/// Global multipliers and calculation switches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalBonusConfig {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub field_bonus_percent: f64,

    #[serde(default)]
    pub event_pattern: EventPattern,

    /// Add the fixed daily apple/cacao/honey income to replenishment.
    #[serde(default)]
    pub nc_subtract: bool,

    #[serde(default)]
    pub combine_policy: CombinePolicy,

    #[serde(default)]
    pub replenish_mode: ReplenishMode,
}

/// Weekly meal budget.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MealCap {
    #[default]
    Standard,
    Expanded,
}

impl MealCap {
    pub fn limit(self) -> i64 {
        match self {
            MealCap::Standard => WEEKLY_MEAL_CAP,
            MealCap::Expanded => EXPANDED_MEAL_CAP,
        }
    }
}

/// Final shortage for one ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientNeed {
    pub id: String,
    pub need: i64,
}

/// Output of one stock calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StockResult {
    /// Nonzero, non-excluded needs in first-encountered order.
    pub per_ingredient: Vec<IngredientNeed>,
    pub grand_total: i64,
    pub total_energy: i64,
    /// Active rows span more than one category.
    pub mixed_categories: bool,
}

impl StockResult {
    pub fn need_for(&self, id: &str) -> Option<i64> {
        self.per_ingredient
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.need)
    }

    pub fn is_empty(&self) -> bool {
        self.per_ingredient.is_empty()
    }
}
