use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::{
    BoostKind, Category, CombinePolicy, GrowthType, MealCap, Nature, ReplenishMode, SuccessType,
};

/// Weekly ingredient stock and leveling cost calculator.
#[derive(Parser, Debug)]
#[command(name = "sleep_stock_calc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the meal plan JSON file.
    #[arg(short, long, default_value = "plan.json")]
    pub plan: PathBuf,

    /// Path to the recipe table JSON file.
    #[arg(short, long, default_value = "recipes.json")]
    pub recipes: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute weekly ingredient shortages and energy for the plan.
    Stock {
        /// Override the plan's cross-category policy.
        #[arg(long, value_enum)]
        combine: Option<CombinePolicy>,

        /// Override the plan's replenishment mode.
        #[arg(long, value_enum)]
        replenish: Option<ReplenishMode>,

        /// Also write the result to a CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Simulate candies and dream shards needed to level up.
    Level(LevelArgs),

    /// Edit the plan's recipe rows.
    #[command(subcommand)]
    Row(RowCommand),

    /// Edit one ingredient's exclusion or daily replenishment.
    Setting {
        /// Ingredient id (e.g. apple).
        ingredient: String,

        /// Leave this ingredient out of the result.
        #[arg(long, conflicts_with = "include")]
        exclude: bool,

        /// Put an excluded ingredient back.
        #[arg(long)]
        include: bool,

        /// Units gathered per day.
        #[arg(long)]
        replenish: Option<f64>,
    },

    /// Edit global bonuses and calculation switches.
    Bonus {
        /// Field bonus in percent.
        #[arg(long)]
        field: Option<f64>,

        /// Event bonus pattern key (0-3).
        #[arg(long)]
        event: Option<String>,

        /// Add the fixed daily apple/cacao/honey income.
        #[arg(long)]
        nc: Option<bool>,

        #[arg(long, value_enum)]
        combine: Option<CombinePolicy>,

        #[arg(long, value_enum)]
        replenish: Option<ReplenishMode>,

        /// Weekly meal budget (standard = 21, expanded = 63).
        #[arg(long, value_enum)]
        meal_cap: Option<MealCap>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Stock {
            combine: None,
            replenish: None,
            csv: None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum RowCommand {
    /// Add a recipe row.
    Add {
        #[arg(value_enum)]
        category: Category,

        /// Recipe id; defaults to the category's first recipe.
        #[arg(long)]
        recipe: Option<String>,

        #[arg(long, default_value = "0")]
        meals: i64,

        #[arg(long, default_value = "65")]
        level: i64,

        #[arg(long, value_enum, default_value = "normal")]
        success: SuccessType,
    },

    /// Change a row's meal count.
    Meals { index: usize, meals: i64 },

    /// Remove a row by index.
    Remove { index: usize },

    /// Remove every row.
    Clear,
}

#[derive(Args, Debug)]
pub struct LevelArgs {
    /// Experience table (two columns: level, normal-growth step).
    #[arg(long, default_value = "data/exp_table.txt")]
    pub exp_table: PathBuf,

    /// Shard table (two columns: level, shards per candy).
    #[arg(long, default_value = "data/shard_table.txt")]
    pub shard_table: PathBuf,

    /// Ask for every field instead of reading flags.
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(long, required_unless_present = "interactive")]
    pub now: Option<i64>,

    #[arg(long, required_unless_present = "interactive")]
    pub target: Option<i64>,

    #[arg(long, value_enum, default_value = "normal")]
    pub growth: GrowthType,

    #[arg(long, value_enum, default_value = "neutral")]
    pub nature: Nature,

    /// EXP still needed for the next level.
    #[arg(long)]
    pub progress: Option<i64>,

    #[arg(long, default_value = "0")]
    pub owned: i64,

    #[arg(long, value_enum, default_value = "none")]
    pub boost: BoostKind,

    /// Boosted candies; all candies when omitted.
    #[arg(long)]
    pub boost_count: Option<i64>,

    #[arg(long, default_value = "0")]
    pub sleep_days: i64,

    #[arg(long, default_value = "0")]
    pub sleep_bonus: i64,

    #[arg(long, default_value = "0")]
    pub incense_days: i64,

    #[arg(long, default_value = "0")]
    pub premium_days: i64,
}
