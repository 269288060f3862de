mod manager;
mod persistence;
mod tables;

pub use manager::PlanState;
pub use persistence::{load_plan, load_plan_or_default, load_recipes, save_plan};
pub use tables::{load_level_tables, parse_two_column};
