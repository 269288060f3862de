use dialoguer::{Input, Select};

use crate::error::{CalcError, Result};
use crate::models::{BoostKind, GrowthType, LevelingInput, Nature};
use crate::planner::numeric::to_num;

/// Prompt for a whole number; blank input yields `default`.
fn prompt_number(prompt: &str, default: i64) -> Result<i64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    Ok(to_num(&input) as i64)
}

/// Prompt for a number that may be left blank.
fn prompt_optional_number(prompt: &str) -> Result<Option<i64>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim();
    if input.is_empty() {
        Ok(None)
    } else {
        Ok(Some(to_num(input) as i64))
    }
}

/// Prompt for a level in `min..=max`.
fn prompt_level(prompt: &str, min: i64, max: i64) -> Result<i64> {
    let input: String = Input::new().with_prompt(prompt).interact_text()?;
    let level: i64 = input
        .trim()
        .parse()
        .map_err(|_| CalcError::InvalidInput("Invalid level".to_string()))?;

    if !(min..=max).contains(&level) {
        return Err(CalcError::InvalidInput(format!(
            "Level must be between {} and {}",
            min, max
        )));
    }
    Ok(level)
}

fn prompt_growth() -> Result<GrowthType> {
    let options = ["normal", "600", "semi-legendary", "legendary"];
    let selection = Select::new()
        .with_prompt("Experience growth type")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(GrowthType::ALL
        .get(selection)
        .copied()
        .unwrap_or_default())
}

fn prompt_nature() -> Result<Nature> {
    let options = ["neutral", "EXP up", "EXP down"];
    let selection = Select::new()
        .with_prompt("Nature")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(match selection {
        1 => Nature::Up,
        2 => Nature::Down,
        _ => Nature::Neutral,
    })
}

fn prompt_boost() -> Result<BoostKind> {
    let options = ["none", "mini candy boost (shards x4)", "candy boost (shards x5)"];
    let selection = Select::new()
        .with_prompt("Candy boost")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(match selection {
        1 => BoostKind::Mini,
        2 => BoostKind::Full,
        _ => BoostKind::None,
    })
}

/// Collect every leveling field interactively.
pub fn prompt_leveling_input() -> Result<LevelingInput> {
    let current_level = prompt_level("Current level", 1, 64)?;
    let target_level = prompt_level("Target level", 2, 65)?;

    let mut input = LevelingInput::new(current_level, target_level);
    input.growth = prompt_growth()?;
    input.nature = prompt_nature()?;
    input.current_progress_exp =
        prompt_optional_number("EXP to next level (blank if just leveled)")?;
    input.owned_candies = prompt_number("Candies owned", 0)?;

    input.boost_kind = prompt_boost()?;
    if input.boost_kind.is_active() {
        input.boost_count = prompt_optional_number("Boosted candies (blank for all)")?;
    }

    input.sleep_days = prompt_number("Days of sleep before leveling", 0)?;
    if input.sleep_days > 0 {
        input.sleep_bonus_count = prompt_number("Sleep EXP bonus members (0-5)", 0)?;
        input.incense_days = prompt_number("Days with growth incense", 0)?;
        input.premium_days = prompt_number("Days with premium EXP bonus", 0)?;
    }

    Ok(input)
}
