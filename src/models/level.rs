use serde::{Deserialize, Serialize};

use crate::planner::constants::{
    FULL_BOOST_SHARD_MULT, GROWTH_MULT_600, GROWTH_MULT_LEGEND, GROWTH_MULT_NORMAL,
    GROWTH_MULT_SEMI, MINI_BOOST_SHARD_MULT, NATURE_DOWN_MULT, NATURE_UP_MULT,
};
use crate::planner::numeric::{lenient_i64, lenient_opt_i64};

/// Experience curve of a character.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum GrowthType {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "600")]
    #[value(name = "600")]
    SixHundred,
    #[serde(rename = "semi")]
    Semi,
    #[serde(rename = "legend")]
    Legend,
}

impl GrowthType {
    pub const ALL: [GrowthType; 4] = [
        GrowthType::Normal,
        GrowthType::SixHundred,
        GrowthType::Semi,
        GrowthType::Legend,
    ];

    pub fn index(self) -> usize {
        match self {
            GrowthType::Normal => 0,
            GrowthType::SixHundred => 1,
            GrowthType::Semi => 2,
            GrowthType::Legend => 3,
        }
    }

    /// Multiplier applied to cumulative normal experience.
    pub fn multiplier(self) -> f64 {
        match self {
            GrowthType::Normal => GROWTH_MULT_NORMAL,
            GrowthType::SixHundred => GROWTH_MULT_600,
            GrowthType::Semi => GROWTH_MULT_SEMI,
            GrowthType::Legend => GROWTH_MULT_LEGEND,
        }
    }
}

/// Nature effect on experience gained from candies.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Nature {
    #[default]
    Neutral,
    Up,
    Down,
}

impl Nature {
    pub fn factor(self) -> f64 {
        match self {
            Nature::Neutral => 1.0,
            Nature::Up => NATURE_UP_MULT,
            Nature::Down => NATURE_DOWN_MULT,
        }
    }
}

/// Candy boost consumable.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BoostKind {
    #[default]
    None,
    Mini,
    Full,
}

impl BoostKind {
    /// Shard cost multiplier for a boosted candy.
    pub fn shard_multiplier(self) -> i64 {
        match self {
            BoostKind::None => 1,
            BoostKind::Mini => MINI_BOOST_SHARD_MULT,
            BoostKind::Full => FULL_BOOST_SHARD_MULT,
        }
    }

    pub fn is_active(self) -> bool {
        self != BoostKind::None
    }
}

/// Inputs for one leveling simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelingInput {
    #[serde(deserialize_with = "lenient_i64")]
    pub current_level: i64,

    #[serde(deserialize_with = "lenient_i64")]
    pub target_level: i64,

    #[serde(default)]
    pub growth: GrowthType,

    #[serde(default)]
    pub nature: Nature,

    /// Experience still required to reach the next level, as shown in-game.
    /// `None` means the character has just reached `current_level`.
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub current_progress_exp: Option<i64>,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub owned_candies: i64,

    #[serde(default)]
    pub boost_kind: BoostKind,

    /// Candies the boost may be applied to; `None` covers the whole climb.
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub boost_count: Option<i64>,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub sleep_days: i64,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub sleep_bonus_count: i64,

    /// Sleep days on which a growth incense was used.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub incense_days: i64,

    /// Sleep days covered by the premium experience bonus.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub premium_days: i64,
}

impl LevelingInput {
    pub fn new(current_level: i64, target_level: i64) -> Self {
        Self {
            current_level,
            target_level,
            growth: GrowthType::Normal,
            nature: Nature::Neutral,
            current_progress_exp: None,
            owned_candies: 0,
            boost_kind: BoostKind::None,
            boost_count: None,
            sleep_days: 0,
            sleep_bonus_count: 0,
            incense_days: 0,
            premium_days: 0,
        }
    }
}

/// Candies and shards consumed by one simulated climb.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimulationResult {
    pub candies_total: i64,
    pub shards_total: i64,
}

impl SimulationResult {
    /// Candies still to obtain after spending the owned ones.
    pub fn candies_to_obtain(&self, owned: i64) -> i64 {
        (self.candies_total - owned.max(0)).max(0)
    }
}

/// Passive experience split into 1x/2x/3x day tranches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FreeExp {
    pub per_day: i64,
    pub single_days: i64,
    pub double_days: i64,
    pub triple_days: i64,
    pub total: i64,
}

/// Everything the leveling screen shows for one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelReport {
    /// Experience still needed after progress and passive experience.
    pub total_exp_needed: i64,
    pub free_exp: FreeExp,
    /// Passive experience actually applied (capped at the climb's total).
    pub free_exp_applied: i64,
    pub normal: SimulationResult,
    pub boosted: Option<SimulationResult>,
    pub boost_kind: BoostKind,
    pub owned_candies: i64,
}

impl LevelReport {
    pub fn candies_to_obtain(&self) -> i64 {
        self.normal.candies_to_obtain(self.owned_candies)
    }

    pub fn boosted_candies_to_obtain(&self) -> Option<i64> {
        self.boosted
            .map(|b| b.candies_to_obtain(self.owned_candies))
    }
}
