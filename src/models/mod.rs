pub mod level;
pub mod plan;
pub mod recipe;

pub use level::{
    BoostKind, FreeExp, GrowthType, LevelReport, LevelingInput, Nature, SimulationResult,
};
pub use plan::{
    CombinePolicy, EventPattern, GlobalBonusConfig, IngredientNeed, IngredientSetting,
    IngredientSettings, MealCap, RecipeRow, ReplenishMode, StockResult, SuccessType,
};
pub use recipe::{Category, Ingredient, Recipe, RecipeTable, closest_match};
