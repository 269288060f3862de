pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod state;

pub use error::{CalcError, Result};
pub use models::{GlobalBonusConfig, LevelingInput, RecipeRow, RecipeTable, StockResult};
pub use planner::{LevelTables, compute, plan_leveling, simulate};
pub use state::PlanState;
