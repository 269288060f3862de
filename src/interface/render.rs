use crate::models::{
    BoostKind, CombinePolicy, LevelReport, RecipeTable, StockResult, SuccessType,
};
use crate::planner::constants::ingredient_name;
use crate::planner::stock::display_energy;
use crate::state::PlanState;

/// Label shown for a success tier.
pub fn success_label(success_type: SuccessType) -> &'static str {
    match success_type {
        SuccessType::Normal => "normal",
        SuccessType::Great => "great success",
        SuccessType::Sunday => "sunday great success",
    }
}

/// Print the plan's rows with their per-meal energy.
pub fn display_plan(plan: &PlanState, recipes: &RecipeTable) {
    println!();
    println!(
        "=== Meal Plan ({} / {} meals) ===",
        plan.total_meals(),
        plan.meal_cap().limit()
    );
    println!();

    if plan.is_empty() {
        println!("  (no rows)");
        println!();
        return;
    }

    for (i, row) in plan.rows().iter().enumerate() {
        let (name, per_serving, energy) = match recipes.get(&row.recipe_id) {
            Some(r) => (
                r.display_name().to_string(),
                r.total_ingredients(),
                display_energy(r.base_energy, row.level),
            ),
            None => (format!("{} (unknown)", row.recipe_id), 0, 0),
        };
        println!(
            "{:>3}. [{}] {} ({} ingredients) x{} | Lv{} | {} | {} energy",
            i,
            row.category,
            name,
            per_serving,
            row.meals,
            row.level,
            success_label(row.success_type),
            energy
        );
    }
    println!();
}

/// Print weekly ingredient shortages.
pub fn display_stock_result(result: &StockResult, policy: CombinePolicy) {
    println!("=== Ingredients Needed ===");
    println!();

    if result.is_empty() {
        println!("Nothing to stock up on.");
    } else {
        let width = result
            .per_ingredient
            .iter()
            .map(|n| ingredient_name(&n.id).chars().count())
            .max()
            .unwrap_or(10);

        for need in &result.per_ingredient {
            let name = ingredient_name(&need.id);
            let pad = width.saturating_sub(name.chars().count());
            println!("  {}{} {:>6}", name, " ".repeat(pad), need.need);
        }
    }

    println!();
    println!("--- Summary ---");
    println!("Grand total: {}", result.grand_total);
    println!("Weekly energy: {}", result.total_energy);
    if result.mixed_categories {
        let rule = match policy {
            CombinePolicy::Max => "largest single-category amount",
            CombinePolicy::Sum => "sum across categories",
        };
        println!("Note: several categories share ingredients ({}).", rule);
    }
    println!();
}

/// Print a leveling report.
pub fn display_level_report(report: &LevelReport) {
    println!();
    println!("=== Leveling ===");
    println!();
    println!("Experience needed: {}", report.total_exp_needed);
    if report.free_exp_applied > 0 {
        println!(
            "Sleep experience:  {} ({} per day; {}x1 {}x2 {}x3 days)",
            report.free_exp_applied,
            report.free_exp.per_day,
            report.free_exp.single_days,
            report.free_exp.double_days,
            report.free_exp.triple_days
        );
    }
    println!("Candies needed:    {}", report.candies_to_obtain());
    println!("Dream shards:      {}", report.normal.shards_total);

    if let (Some(boosted), Some(to_obtain)) = (report.boosted, report.boosted_candies_to_obtain()) {
        let title = match report.boost_kind {
            BoostKind::Mini => "With mini candy boost",
            _ => "With candy boost",
        };
        println!();
        println!("--- {} ---", title);
        println!("Candies needed:    {}", to_obtain);
        println!("Dream shards:      {}", boosted.shards_total);
    }
    println!();
    println!("(shard totals may be off by a few dozen)");
    println!();
}
