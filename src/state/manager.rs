use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};
use crate::models::{
    Category, GlobalBonusConfig, IngredientSetting, IngredientSettings, MealCap, RecipeRow,
    RecipeTable, StockResult, SuccessType,
};
use crate::planner::constants::{MAX_PLAN_ROWS, ingredient, suggest_ingredient};
use crate::planner::numeric::clamp_level;
use crate::planner::stock;

/// Owns a meal plan: rows, ingredient settings and global bonuses.
///
/// The weekly meal budget is enforced here when rows are edited; the
/// calculator trusts whatever meal counts it is given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanState {
    #[serde(default)]
    rows: Vec<RecipeRow>,

    #[serde(default)]
    settings: IngredientSettings,

    #[serde(default)]
    bonus: GlobalBonusConfig,

    #[serde(default)]
    meal_cap: MealCap,
}

impl PlanState {
    pub fn new(meal_cap: MealCap) -> Self {
        Self {
            meal_cap,
            ..Default::default()
        }
    }

    pub fn rows(&self) -> &[RecipeRow] {
        &self.rows
    }

    pub fn settings(&self) -> &IngredientSettings {
        &self.settings
    }

    pub fn bonus(&self) -> &GlobalBonusConfig {
        &self.bonus
    }

    pub fn bonus_mut(&mut self) -> &mut GlobalBonusConfig {
        &mut self.bonus
    }

    pub fn meal_cap(&self) -> MealCap {
        self.meal_cap
    }

    /// Change the weekly budget, trimming rows from the end if it shrank.
    pub fn set_meal_cap(&mut self, meal_cap: MealCap) {
        self.meal_cap = meal_cap;
        for i in (0..self.rows.len()).rev() {
            let allowed = self.max_meals_for_row(i);
            let row = &mut self.rows[i];
            row.meals = row.meals.clamp(0, allowed);
        }
    }

    /// Meals planned across all rows.
    pub fn total_meals(&self) -> i64 {
        self.rows
            .iter()
            .fold(0i64, |acc, r| acc.saturating_add(r.meals.max(0)))
    }

    /// Largest meal count row `index` may hold given the other rows.
    pub fn max_meals_for_row(&self, index: usize) -> i64 {
        let others: i64 = self
            .rows
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .fold(0i64, |acc, (_, r)| acc.saturating_add(r.meals.max(0)));
        (self.meal_cap.limit() - others).max(0)
    }

    /// Append a row; the recipe defaults to the category's first recipe.
    ///
    /// Meals are clamped to the remaining weekly budget. Returns the new row's index.
    pub fn add_row(
        &mut self,
        recipes: &RecipeTable,
        category: Category,
        recipe_id: Option<&str>,
        meals: i64,
        level: i64,
        success_type: SuccessType,
    ) -> Result<usize> {
        if self.rows.len() >= MAX_PLAN_ROWS {
            return Err(CalcError::InvalidInput(format!(
                "a plan holds at most {} rows",
                MAX_PLAN_ROWS
            )));
        }

        let recipe = match recipe_id {
            Some(id) => recipes.get(id).ok_or_else(|| not_found(recipes, id))?,
            None => recipes.first_in_category(category).ok_or_else(|| {
                CalcError::InvalidInput(format!("no recipes in category {}", category))
            })?,
        };
        if recipe.category != category {
            return Err(CalcError::InvalidInput(format!(
                "{} is not in category {}",
                recipe.id, category
            )));
        }

        let meals = meals.clamp(0, (self.meal_cap.limit() - self.total_meals()).max(0));
        self.rows.push(
            RecipeRow::new(category, recipe.id.clone(), meals)
                .with_level(clamp_level(level) as i64)
                .with_success(success_type),
        );
        Ok(self.rows.len() - 1)
    }

    pub fn remove_row(&mut self, index: usize) -> Result<RecipeRow> {
        if index >= self.rows.len() {
            return Err(CalcError::InvalidInput(format!(
                "no row {} (plan has {} rows)",
                index,
                self.rows.len()
            )));
        }
        Ok(self.rows.remove(index))
    }

    /// Set a row's meal count, clamped to the remaining budget. Returns the applied value.
    pub fn set_meals(&mut self, index: usize, meals: i64) -> Result<i64> {
        if index >= self.rows.len() {
            return Err(CalcError::InvalidInput(format!("no row {}", index)));
        }
        let applied = meals.clamp(0, self.max_meals_for_row(index));
        self.rows[index].meals = applied;
        Ok(applied)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Settings for a catalog ingredient, created on first use.
    pub fn setting_mut(&mut self, ingredient_id: &str) -> Result<&mut IngredientSetting> {
        if ingredient(ingredient_id).is_none() {
            let message = match suggest_ingredient(ingredient_id) {
                Some(close) => format!(
                    "unknown ingredient '{}' (did you mean '{}'?)",
                    ingredient_id, close
                ),
                None => format!("unknown ingredient '{}'", ingredient_id),
            };
            return Err(CalcError::InvalidInput(message));
        }
        Ok(self.settings.entry(ingredient_id.to_string()).or_default())
    }

    /// Compute the stock result for the current plan.
    pub fn compute(&self, recipes: &RecipeTable) -> StockResult {
        stock::compute(&self.rows, &self.settings, &self.bonus, recipes)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn not_found(recipes: &RecipeTable, id: &str) -> CalcError {
    match recipes.suggest(id) {
        Some(close) => CalcError::RecipeNotFound(format!("{} (did you mean '{}'?)", id, close)),
        None => CalcError::RecipeNotFound(id.to_string()),
    }
}
