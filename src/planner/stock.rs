//! Weekly ingredient shortage and energy calculation.
//!
//! `compute` is a pure function of its inputs: rows are read, never kept,
//! and the returned result owns all of its data.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::models::{
    Category, CombinePolicy, GlobalBonusConfig, IngredientNeed, IngredientSettings, RecipeRow,
    RecipeTable, ReplenishMode, StockResult,
};
use crate::planner::constants::{
    MEALS_PER_DAY, NC_DAILY_INCOME, WEEK_DAYS, recipe_level_bonus,
};
use crate::planner::numeric::{clamp_level, finite_or_zero, round_half_up};

/// One category's draw on one ingredient.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Draw {
    /// `qty * meals` summed over the category's rows.
    gross: f64,
    /// Meals of the rows that use the ingredient.
    meals: f64,
    /// Gross minus per-row replenishment (`ReplenishMode::PerRow`).
    net_per_row: f64,
}

impl Draw {
    fn add(&mut self, other: &Draw) {
        self.gross += other.gross;
        self.meals += other.meals;
        self.net_per_row += other.net_per_row;
    }
}

/// Energy shown for a recipe at a level, before field and success multipliers.
pub fn display_energy(base_energy: i64, level: i64) -> i64 {
    let bonus = recipe_level_bonus(clamp_level(level));
    base_energy.saturating_add(round_half_up(base_energy as f64 * bonus))
}

/// Energy of one cooked meal.
pub fn one_meal_energy(
    base_energy: i64,
    level: i64,
    field_bonus_percent: f64,
    success_multiplier: f64,
) -> i64 {
    let field_mult = 1.0 + finite_or_zero(field_bonus_percent).max(0.0) / 100.0;
    let energy = display_energy(base_energy, level) as f64 * field_mult * success_multiplier;
    energy.floor() as i64
}

/// Daily replenishment per ingredient, NC income included when enabled.
pub fn replenish_per_day(
    settings: &IngredientSettings,
    nc_subtract: bool,
) -> HashMap<String, f64> {
    let mut map: HashMap<String, f64> = settings
        .iter()
        .map(|(id, s)| (id.clone(), finite_or_zero(s.replenish_per_day).max(0.0)))
        .collect();

    if nc_subtract {
        for (id, amount) in NC_DAILY_INCOME {
            *map.entry(id.to_string()).or_insert(0.0) += amount;
        }
    }
    map
}

/// Merge the per-category draws on one ingredient.
fn combine<'a>(
    draws: impl Iterator<Item = &'a Draw>,
    policy: CombinePolicy,
    mode: ReplenishMode,
) -> Draw {
    let mut combined: Option<Draw> = None;
    for draw in draws {
        combined = Some(match (combined, policy) {
            (None, _) => *draw,
            (Some(mut acc), CombinePolicy::Sum) => {
                acc.add(draw);
                acc
            }
            (Some(acc), CombinePolicy::Max) => {
                let key = |d: &Draw| match mode {
                    ReplenishMode::PerRow => d.net_per_row,
                    _ => d.gross,
                };
                if key(draw) > key(&acc) { *draw } else { acc }
            }
        });
    }
    combined.unwrap_or_default()
}

/// Unrounded need after replenishment for one combined draw.
fn net_need(draw: &Draw, per_day: f64, mode: ReplenishMode) -> f64 {
    match mode {
        ReplenishMode::Weekly => draw.gross - per_day * WEEK_DAYS,
        ReplenishMode::PerRow => draw.net_per_row,
        ReplenishMode::PooledDays => {
            let days = (draw.meals / MEALS_PER_DAY).min(WEEK_DAYS);
            draw.gross - per_day * days
        }
    }
}

/// Compute per-ingredient weekly shortages and total energy for a meal plan.
///
/// Rows with no meals or an unknown recipe id contribute nothing. Weekly
/// meal caps are the caller's responsibility and are not re-checked here;
/// oversized meal counts saturate the totals at `i64::MAX`.
pub fn compute(
    rows: &[RecipeRow],
    settings: &IngredientSettings,
    bonus: &GlobalBonusConfig,
    recipes: &RecipeTable,
) -> StockResult {
    let per_day = replenish_per_day(settings, bonus.nc_subtract);
    let policy = bonus.combine_policy;
    let mode = bonus.replenish_mode;

    let mut by_category: [HashMap<String, Draw>; 3] = Default::default();
    let mut order: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut active_categories: HashSet<Category> = HashSet::new();
    let mut total_energy: i64 = 0;

    for row in rows {
        let meals = row.meals.max(0);
        if meals == 0 {
            continue;
        }
        let Some(recipe) = recipes.get(&row.recipe_id) else {
            warn!(recipe_id = %row.recipe_id, "skipping row with unknown recipe");
            continue;
        };

        let success = bonus.event_pattern.success_multiplier(row.success_type);
        let meal_energy = one_meal_energy(
            recipe.base_energy,
            row.level,
            bonus.field_bonus_percent,
            success,
        );
        total_energy = total_energy.saturating_add(meal_energy.saturating_mul(meals));

        active_categories.insert(row.category);
        let draws = &mut by_category[row.category.index()];
        let meals = meals as f64;
        let row_days = meals / MEALS_PER_DAY;

        for (id, qty) in &recipe.ingredients {
            if seen.insert(id.clone()) {
                order.push(id.clone());
            }
            let gross = f64::from(*qty) * meals;
            let replenished = per_day.get(id).copied().unwrap_or(0.0) * row_days;
            draws.entry(id.clone()).or_default().add(&Draw {
                gross,
                meals,
                net_per_row: gross - replenished,
            });
        }
    }

    let mut per_ingredient = Vec::new();
    let mut grand_total: i64 = 0;

    for id in &order {
        if settings.get(id).is_some_and(|s| s.excluded) {
            continue;
        }
        let draw = combine(by_category.iter().filter_map(|m| m.get(id)), policy, mode);
        let need = net_need(&draw, per_day.get(id).copied().unwrap_or(0.0), mode);
        let final_need = round_half_up(need).max(0);
        if final_need == 0 {
            continue;
        }
        grand_total = grand_total.saturating_add(final_need);
        per_ingredient.push(IngredientNeed {
            id: id.clone(),
            need: final_need,
        });
    }

    debug!(
        rows = rows.len(),
        ingredients = per_ingredient.len(),
        grand_total,
        total_energy,
        ?policy,
        ?mode,
        "computed stock"
    );

    StockResult {
        per_ingredient,
        grand_total,
        total_energy,
        mixed_categories: active_categories.len() > 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventPattern, IngredientSetting, Recipe, SuccessType};

    fn recipe(id: &str, category: Category, ingredients: &[(&str, u32)], energy: i64) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: String::new(),
            category,
            ingredients: ingredients
                .iter()
                .map(|(i, q)| (i.to_string(), *q))
                .collect(),
            base_energy: energy,
        }
    }

    fn table() -> RecipeTable {
        RecipeTable::new(vec![
            recipe("curry_a", Category::Curry, &[("tomato", 4), ("apple", 5)], 100),
            recipe("salad_b", Category::Salad, &[("apple", 3), ("leek", 2)], 200),
        ])
    }

    #[test]
    fn test_display_energy_level_bonus() {
        assert_eq!(display_energy(100, 65), 334);
        assert_eq!(display_energy(100, 1), 100);
        // Out-of-range levels clamp.
        assert_eq!(display_energy(100, 99), 334);
        assert_eq!(display_energy(100, -3), 100);
    }

    #[test]
    fn test_one_meal_energy_floors() {
        // 334 * 1.5 * 1.1 = 551.1
        assert_eq!(one_meal_energy(100, 65, 50.0, 1.1), 551);
        // Negative field bonus is ignored.
        assert_eq!(one_meal_energy(100, 65, -20.0, 1.0), 334);
    }

    #[test]
    fn test_nc_income_added() {
        let mut settings = IngredientSettings::new();
        settings.insert(
            "apple".to_string(),
            IngredientSetting {
                excluded: false,
                replenish_per_day: 3.0,
            },
        );
        let per_day = replenish_per_day(&settings, true);
        assert_eq!(per_day["apple"], 15.0);
        assert_eq!(per_day["cacao"], 5.0);
        assert_eq!(per_day["honey"], 3.0);

        let per_day = replenish_per_day(&settings, false);
        assert_eq!(per_day["apple"], 3.0);
        assert!(!per_day.contains_key("cacao"));
    }

    #[test]
    fn test_first_encountered_order() {
        let rows = vec![
            RecipeRow::new(Category::Salad, "salad_b", 3),
            RecipeRow::new(Category::Curry, "curry_a", 3),
        ];
        let result = compute(
            &rows,
            &IngredientSettings::new(),
            &GlobalBonusConfig::default(),
            &table(),
        );
        let ids: Vec<&str> = result.per_ingredient.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["apple", "leek", "tomato"]);
        assert!(result.mixed_categories);
    }

    #[test]
    fn test_unknown_recipe_skipped() {
        let rows = vec![
            RecipeRow::new(Category::Curry, "does_not_exist", 7),
            RecipeRow::new(Category::Curry, "curry_a", 1),
        ];
        let result = compute(
            &rows,
            &IngredientSettings::new(),
            &GlobalBonusConfig::default(),
            &table(),
        );
        assert_eq!(result.need_for("tomato"), Some(4));
        assert_eq!(result.total_energy, 334);
        assert!(!result.mixed_categories);
    }

    #[test]
    fn test_negative_meals_ignored() {
        let rows = vec![RecipeRow::new(Category::Curry, "curry_a", -4)];
        let result = compute(
            &rows,
            &IngredientSettings::new(),
            &GlobalBonusConfig::default(),
            &table(),
        );
        assert_eq!(result, StockResult::default());
    }

    #[test]
    fn test_event_pattern_energy() {
        let rows =
            vec![RecipeRow::new(Category::Curry, "curry_a", 2).with_success(SuccessType::Sunday)];
        let bonus = GlobalBonusConfig {
            event_pattern: EventPattern::Plus50,
            ..Default::default()
        };
        let result = compute(&rows, &IngredientSettings::new(), &bonus, &table());
        // floor(334 * 4.5) = 1503
        assert_eq!(result.total_energy, 1503 * 2);
    }

    #[test]
    fn test_combine_max_prefers_larger_draw() {
        let a = Draw {
            gross: 105.0,
            meals: 21.0,
            net_per_row: 105.0,
        };
        let b = Draw {
            gross: 63.0,
            meals: 21.0,
            net_per_row: 63.0,
        };
        let max = combine([a, b].iter(), CombinePolicy::Max, ReplenishMode::Weekly);
        assert_eq!(max.gross, 105.0);
        let sum = combine([a, b].iter(), CombinePolicy::Sum, ReplenishMode::Weekly);
        assert_eq!(sum.gross, 168.0);
        assert_eq!(sum.meals, 42.0);
    }
}
