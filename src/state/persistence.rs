use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{Recipe, RecipeTable};
use crate::state::PlanState;

/// Load a plan from a JSON file.
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<PlanState> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load a plan, or start an empty one if the file doesn't exist yet.
pub fn load_plan_or_default<P: AsRef<Path>>(path: P) -> Result<PlanState> {
    if path.as_ref().exists() {
        load_plan(path)
    } else {
        Ok(PlanState::default())
    }
}

/// Save a plan to a JSON file.
pub fn save_plan<P: AsRef<Path>>(path: P, plan: &PlanState) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load the recipe table from a JSON array.
///
/// Deduplicates by id (last occurrence wins, first position kept).
pub fn load_recipes<P: AsRef<Path>>(path: P) -> Result<RecipeTable> {
    let content = fs::read_to_string(path)?;
    let recipes: Vec<Recipe> = serde_json::from_str(&content)?;
    Ok(RecipeTable::new(recipes))
}
