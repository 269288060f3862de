use crate::models::{Ingredient, closest_match};

/// Lowest recipe / character level.
pub const MIN_LEVEL: u32 = 1;

/// Highest recipe / character level.
pub const MAX_LEVEL: u32 = 65;

/// Days in one cooking week.
pub const WEEK_DAYS: f64 = 7.0;

/// Meals cooked per day.
pub const MEALS_PER_DAY: f64 = 3.0;

/// Weekly meal cap with one active pot.
pub const WEEKLY_MEAL_CAP: i64 = 21;

/// Weekly meal cap in expanded mode (one pot per category).
pub const EXPANDED_MEAL_CAP: i64 = 63;

/// Maximum number of rows in one meal plan.
pub const MAX_PLAN_ROWS: usize = 12;

/// Level assigned to rows that don't specify one.
pub const DEFAULT_ROW_LEVEL: i64 = 65;

// ─────────────────────────────────────────────────────────────────────────────
// Passive ingredient income ("NC subtract")
// ─────────────────────────────────────────────────────────────────────────────

pub const NC_APPLE_PER_DAY: f64 = 12.0;
pub const NC_CACAO_PER_DAY: f64 = 5.0;
pub const NC_HONEY_PER_DAY: f64 = 3.0;

/// Ingredient ids and daily amounts added when NC subtract is on.
pub const NC_DAILY_INCOME: [(&str, f64); 3] = [
    ("apple", NC_APPLE_PER_DAY),
    ("cacao", NC_CACAO_PER_DAY),
    ("honey", NC_HONEY_PER_DAY),
];

// ─────────────────────────────────────────────────────────────────────────────
// Energy
// ─────────────────────────────────────────────────────────────────────────────

/// Recipe level bonus, indexed by `level - 1`.
pub const RECIPE_LEVEL_BONUS: [f64; 65] = [
    0.00, 0.02, 0.04, 0.06, 0.08, 0.09, 0.11, 0.13, 0.16, 0.18, //
    0.19, 0.21, 0.23, 0.24, 0.26, 0.28, 0.30, 0.31, 0.33, 0.35, //
    0.37, 0.40, 0.42, 0.45, 0.47, 0.50, 0.52, 0.55, 0.58, 0.61, //
    0.64, 0.67, 0.70, 0.74, 0.77, 0.81, 0.84, 0.88, 0.92, 0.96, //
    1.00, 1.04, 1.08, 1.13, 1.17, 1.22, 1.27, 1.32, 1.37, 1.42, //
    1.48, 1.53, 1.59, 1.65, 1.71, 1.77, 1.83, 1.90, 1.97, 2.03, //
    2.09, 2.15, 2.21, 2.27, 2.34,
];

/// Success-tier multipliers for one event pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuccessMultipliers {
    pub normal: f64,
    pub great: f64,
    pub sunday: f64,
}

/// Event bonus patterns, keyed "0".."3".
pub const EVENT_PATTERNS: [SuccessMultipliers; 4] = [
    SuccessMultipliers { normal: 1.0, great: 2.0, sunday: 3.0 },
    SuccessMultipliers { normal: 1.1, great: 2.2, sunday: 3.3 },
    SuccessMultipliers { normal: 1.25, great: 2.5, sunday: 3.75 },
    SuccessMultipliers { normal: 1.5, great: 3.0, sunday: 4.5 },
];

/// Level bonus fraction for a (clamped) recipe level.
pub fn recipe_level_bonus(level: u32) -> f64 {
    let level = level.clamp(MIN_LEVEL, MAX_LEVEL);
    RECIPE_LEVEL_BONUS[(level - MIN_LEVEL) as usize]
}

// ─────────────────────────────────────────────────────────────────────────────
// Leveling
// ─────────────────────────────────────────────────────────────────────────────

/// Cumulative experience multipliers per growth type.
pub const GROWTH_MULT_NORMAL: f64 = 1.0;
pub const GROWTH_MULT_600: f64 = 1.5;
pub const GROWTH_MULT_SEMI: f64 = 1.8;
pub const GROWTH_MULT_LEGEND: f64 = 2.2;

/// Candy experience by level band: below 25, 25..30, 30 and up.
pub const CANDY_EXP_LOW: f64 = 35.0;
pub const CANDY_EXP_MID: f64 = 30.0;
pub const CANDY_EXP_HIGH: f64 = 25.0;
pub const CANDY_BAND_MID_FROM: u32 = 25;
pub const CANDY_BAND_HIGH_FROM: u32 = 30;

pub const NATURE_UP_MULT: f64 = 1.18;
pub const NATURE_DOWN_MULT: f64 = 0.82;

/// Experience multiplier while a candy boost is active.
pub const BOOST_EXP_MULT: i64 = 2;
pub const MINI_BOOST_SHARD_MULT: i64 = 4;
pub const FULL_BOOST_SHARD_MULT: i64 = 5;

/// Boost uses assumed when the caller gives no count.
pub const BOOST_UNBOUNDED_USES: i64 = 9999;

/// Passive sleep experience per day, plus per sleep-bonus member.
pub const SLEEP_EXP_PER_DAY: i64 = 100;
pub const SLEEP_BONUS_EXP_PER_DAY: i64 = 14;

// Input limits for the leveling form.
pub const MAX_PROGRESS_EXP: i64 = 9999;
pub const MAX_OWNED_CANDIES: i64 = 9999;
pub const MAX_BOOST_COUNT: i64 = 9999;
pub const MAX_SLEEP_DAYS: i64 = 999;
pub const MAX_SLEEP_BONUS_COUNT: i64 = 5;

/// Largest per-level EXP step or shard cost a level table may hold.
pub const MAX_TABLE_VALUE: i64 = 1_000_000;

// ─────────────────────────────────────────────────────────────────────────────
// Ingredient catalog
// ─────────────────────────────────────────────────────────────────────────────

pub static INGREDIENTS: [Ingredient; 19] = [
    Ingredient::new("leek", "ふといながねぎ"),
    Ingredient::new("mushroom", "あじわいキノコ"),
    Ingredient::new("egg", "とくせんエッグ"),
    Ingredient::new("potato", "ほっこりポテト"),
    Ingredient::new("apple", "とくせんリンゴ"),
    Ingredient::new("herb", "げきからハーブ"),
    Ingredient::new("soymeat", "マメミート"),
    Ingredient::new("milk", "モーモーミルク"),
    Ingredient::new("honey", "あまいミツ"),
    Ingredient::new("oil", "ピュアなオイル"),
    Ingredient::new("ginger", "あったかジンジャー"),
    Ingredient::new("tomato", "あんみんトマト"),
    Ingredient::new("cacao", "リラックスカカオ"),
    Ingredient::new("tail", "おいしいシッポ"),
    Ingredient::new("soy", "ワカクサ大豆"),
    Ingredient::new("corn", "ワカクサコーン"),
    Ingredient::new("coffee", "めざましコーヒー"),
    Ingredient::new("pumpkin", "ずっしりカボチャ"),
    Ingredient::new("avocado", "つやつやアボカド"),
];

/// Look up a catalog ingredient by id.
pub fn ingredient(id: &str) -> Option<&'static Ingredient> {
    INGREDIENTS.iter().find(|i| i.id == id)
}

/// Closest catalog ingredient id to an unknown one.
pub fn suggest_ingredient(id: &str) -> Option<&'static str> {
    closest_match(id, INGREDIENTS.iter().map(|i| i.id))
}

/// Display name for an ingredient id (the id itself when unknown).
pub fn ingredient_name(id: &str) -> &str {
    ingredient(id).map(|i| i.name).unwrap_or(id)
}
