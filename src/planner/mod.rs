pub mod constants;
pub mod leveling;
pub mod numeric;
pub mod stock;

pub use constants::*;
pub use leveling::{
    LevelTables, candy_exp_gain, free_exp, plan_leveling, sanitize, scaled_steps, simulate,
    validate_levels,
};
pub use stock::{compute, display_energy, one_meal_energy, replenish_per_day};
