use clap::Parser;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use sleep_stock_calc::cli::{Cli, Command, LevelArgs, RowCommand};
use sleep_stock_calc::error::Result;
use sleep_stock_calc::interface::{
    display_level_report, display_plan, display_stock_result, prompt_leveling_input,
    write_stock_csv,
};
use sleep_stock_calc::models::{
    CombinePolicy, EventPattern, LevelingInput, RecipeTable, ReplenishMode,
};
use sleep_stock_calc::planner::plan_leveling;
use sleep_stock_calc::state::{
    PlanState, load_level_tables, load_plan_or_default, load_recipes, save_plan,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Stock {
            combine,
            replenish,
            csv,
        } => cmd_stock(&cli.plan, &cli.recipes, combine, replenish, csv.as_deref()),
        Command::Level(args) => cmd_level(&args),
        Command::Row(row) => cmd_row(&cli.plan, &cli.recipes, row),
        Command::Setting {
            ingredient,
            exclude,
            include,
            replenish,
        } => cmd_setting(&cli.plan, &ingredient, exclude, include, replenish),
        Command::Bonus {
            field,
            event,
            nc,
            combine,
            replenish,
            meal_cap,
        } => {
            let mut plan = load_plan_or_default(&cli.plan)?;
            let bonus = plan.bonus_mut();
            if let Some(field) = field {
                bonus.field_bonus_percent = field;
            }
            if let Some(event) = event {
                bonus.event_pattern = EventPattern::from_key(&event);
            }
            if let Some(nc) = nc {
                bonus.nc_subtract = nc;
            }
            if let Some(combine) = combine {
                bonus.combine_policy = combine;
            }
            if let Some(replenish) = replenish {
                bonus.replenish_mode = replenish;
            }
            if let Some(cap) = meal_cap {
                plan.set_meal_cap(cap);
            }
            save_plan(&cli.plan, &plan)?;
            println!("Plan saved.");
            Ok(())
        }
    }
}

/// Load the recipe table; `None` after reporting a missing file.
fn recipes_at(path: &Path) -> Result<Option<RecipeTable>> {
    if !path.exists() {
        eprintln!("Recipe file not found: {}", path.display());
        eprintln!("Please ensure recipes.json exists or pass --recipes.");
        return Ok(None);
    }
    Ok(Some(load_recipes(path)?))
}

/// Compute and display the weekly stock for the saved plan.
fn cmd_stock(
    plan_path: &Path,
    recipes_path: &Path,
    combine: Option<CombinePolicy>,
    replenish: Option<ReplenishMode>,
    csv: Option<&Path>,
) -> Result<()> {
    let Some(recipes) = recipes_at(recipes_path)? else {
        return Ok(());
    };
    let mut plan = load_plan_or_default(plan_path)?;
    if recipes.is_empty() {
        println!("No recipes in {}.", recipes_path.display());
        return Ok(());
    }
    println!("Loaded {} recipes", recipes.len());

    if let Some(combine) = combine {
        plan.bonus_mut().combine_policy = combine;
    }
    if let Some(replenish) = replenish {
        plan.bonus_mut().replenish_mode = replenish;
    }

    if plan.is_empty() {
        println!("The plan has no rows. Use 'row add' to add one.");
        return Ok(());
    }

    display_plan(&plan, &recipes);
    println!();

    let result = plan.compute(&recipes);
    display_stock_result(&result, plan.bonus().combine_policy);

    if let Some(path) = csv {
        write_stock_csv(&result, path)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

/// Simulate candies and shards for a level climb.
fn cmd_level(args: &LevelArgs) -> Result<()> {
    let tables = load_level_tables(&args.exp_table, &args.shard_table)?;

    let input = if args.interactive {
        prompt_leveling_input()?
    } else {
        LevelingInput {
            current_level: args.now.unwrap_or(1),
            target_level: args.target.unwrap_or(1),
            growth: args.growth,
            nature: args.nature,
            current_progress_exp: args.progress,
            owned_candies: args.owned,
            boost_kind: args.boost,
            boost_count: args.boost_count,
            sleep_days: args.sleep_days,
            sleep_bonus_count: args.sleep_bonus,
            incense_days: args.incense_days,
            premium_days: args.premium_days,
        }
    };

    let report = plan_leveling(&input, &tables)?;
    display_level_report(&report);
    Ok(())
}

/// Edit plan rows and save.
fn cmd_row(plan_path: &Path, recipes_path: &Path, command: RowCommand) -> Result<()> {
    let mut plan = load_plan_or_default(plan_path)?;

    match command {
        RowCommand::Add {
            category,
            recipe,
            meals,
            level,
            success,
        } => {
            let Some(recipes) = recipes_at(recipes_path)? else {
                return Ok(());
            };
            let index =
                plan.add_row(&recipes, category, recipe.as_deref(), meals, level, success)?;
            let row = &plan.rows()[index];
            println!(
                "Added row {}: {} x{} ({} of {} meals used)",
                index,
                row.recipe_id,
                row.meals,
                plan.total_meals(),
                plan.meal_cap().limit()
            );
        }
        RowCommand::Meals { index, meals } => {
            let applied = plan.set_meals(index, meals)?;
            if applied != meals {
                println!("Meals clamped to {}", applied);
            }
        }
        RowCommand::Remove { index } => {
            let row = plan.remove_row(index)?;
            println!("Removed {}", row.recipe_id);
        }
        RowCommand::Clear => {
            plan.clear();
            println!("Cleared all rows.");
        }
    }

    save_plan(plan_path, &plan)?;
    Ok(())
}

/// Update one ingredient's settings and save.
fn cmd_setting(
    plan_path: &Path,
    ingredient: &str,
    exclude: bool,
    include: bool,
    replenish: Option<f64>,
) -> Result<()> {
    let mut plan: PlanState = load_plan_or_default(plan_path)?;
    let setting = plan.setting_mut(ingredient)?;

    if exclude {
        setting.excluded = true;
    } else if include {
        setting.excluded = false;
    }
    if let Some(per_day) = replenish {
        setting.replenish_per_day = per_day;
    }

    save_plan(plan_path, &plan)?;
    println!("Updated {}.", ingredient);
    Ok(())
}
