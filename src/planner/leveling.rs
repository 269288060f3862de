//! Candy and shard cost simulation for leveling a character.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{CalcError, Result};
use crate::models::{
    BoostKind, FreeExp, GrowthType, LevelReport, LevelingInput, Nature, SimulationResult,
};
use crate::planner::constants::{
    BOOST_EXP_MULT, BOOST_UNBOUNDED_USES, CANDY_BAND_HIGH_FROM, CANDY_BAND_MID_FROM,
    CANDY_EXP_HIGH, CANDY_EXP_LOW, CANDY_EXP_MID, MAX_BOOST_COUNT, MAX_LEVEL, MAX_OWNED_CANDIES,
    MAX_PROGRESS_EXP, MAX_SLEEP_BONUS_COUNT, MAX_SLEEP_DAYS, MAX_TABLE_VALUE,
    SLEEP_BONUS_EXP_PER_DAY, SLEEP_EXP_PER_DAY,
};
use crate::planner::numeric::round_half_up;

/// First level that has a step (the step from level 1 to 2).
const FIRST_STEP_LEVEL: u32 = 2;

/// Scale consecutive per-level steps by a growth multiplier.
///
/// The cumulative total is scaled and rounded at each level, then
/// differenced back into steps, so rounding never compounds.
pub fn scaled_steps(normal_steps: &[i64], multiplier: f64) -> Vec<i64> {
    let mut cumulative = 0i64;
    let mut prev_scaled = 0i64;
    normal_steps
        .iter()
        .map(|&step| {
            cumulative += step;
            let scaled = round_half_up(cumulative as f64 * multiplier);
            let diff = scaled - prev_scaled;
            prev_scaled = scaled;
            diff
        })
        .collect()
}

/// Experience and shard lookup data, with scaled steps for every growth type.
#[derive(Debug, Clone)]
pub struct LevelTables {
    /// Per growth type, steps for levels 2..=65 (index `level - 2`).
    steps: [Vec<i64>; 4],
    shard_costs: BTreeMap<u32, i64>,
}

impl LevelTables {
    /// `exp_steps` maps a level to the normal-growth experience needed to reach it.
    ///
    /// Values are clamped to `0..=MAX_TABLE_VALUE`, which bounds the candy loop.
    pub fn new(exp_steps: &BTreeMap<u32, i64>, shard_costs: BTreeMap<u32, i64>) -> Self {
        let normal: Vec<i64> = (FIRST_STEP_LEVEL..=MAX_LEVEL)
            .map(|lv| exp_steps.get(&lv).copied().unwrap_or(0).clamp(0, MAX_TABLE_VALUE))
            .collect();
        let shard_costs = shard_costs
            .into_iter()
            .map(|(lv, cost)| (lv, cost.clamp(0, MAX_TABLE_VALUE)))
            .collect();

        let steps = GrowthType::ALL.map(|growth| match growth {
            GrowthType::Normal => normal.clone(),
            other => scaled_steps(&normal, other.multiplier()),
        });

        Self { steps, shard_costs }
    }

    /// Experience needed to go from `level - 1` to `level`; 0 outside 2..=65.
    pub fn need_step(&self, level: u32, growth: GrowthType) -> i64 {
        if !(FIRST_STEP_LEVEL..=MAX_LEVEL).contains(&level) {
            return 0;
        }
        self.steps[growth.index()][(level - FIRST_STEP_LEVEL) as usize]
    }

    /// Shard cost of one candy used while climbing to `level`.
    pub fn shard_cost(&self, level: u32) -> i64 {
        self.shard_costs.get(&level).copied().unwrap_or(0)
    }

    /// Sum of steps from `from` (exclusive) to `to` (inclusive).
    pub fn total_steps(&self, from: u32, to: u32, growth: GrowthType) -> i64 {
        (from + 1..=to).map(|lv| self.need_step(lv, growth)).sum()
    }
}

/// Experience from one candy at `level`.
///
/// The nature-adjusted gain is rounded before the boost multiplier applies.
pub fn candy_exp_gain(level: u32, nature: Nature, boost_multiplier: i64) -> i64 {
    let base = if level < CANDY_BAND_MID_FROM {
        CANDY_EXP_LOW
    } else if level < CANDY_BAND_HIGH_FROM {
        CANDY_EXP_MID
    } else {
        CANDY_EXP_HIGH
    };
    round_half_up(base * nature.factor()) * boost_multiplier
}

/// Passive experience from sleep.
///
/// Every sleep day earns the base amount; an incense day and a premium day
/// each add one more base amount, so a day with both earns triple.
/// Incense and premium days beyond `sleep_days` are ignored.
pub fn free_exp(
    sleep_days: i64,
    sleep_bonus_count: i64,
    incense_days: i64,
    premium_days: i64,
) -> FreeExp {
    let sleep = sleep_days.max(0);
    let incense = incense_days.clamp(0, sleep);
    let premium = premium_days.clamp(0, sleep);
    let per_day = SLEEP_EXP_PER_DAY + SLEEP_BONUS_EXP_PER_DAY * sleep_bonus_count.max(0);

    // Overlap only when the two boosts can't fit on separate days.
    let triple_days = (incense + premium - sleep).max(0);
    let double_days = incense + premium - 2 * triple_days;
    let single_days = sleep - double_days - triple_days;

    FreeExp {
        per_day,
        single_days,
        double_days,
        triple_days,
        total: per_day * (single_days + 2 * double_days + 3 * triple_days),
    }
}

/// Clamp form fields into their accepted ranges.
///
/// Levels are left alone: out-of-range levels are reported, not clamped.
pub fn sanitize(input: &LevelingInput) -> LevelingInput {
    let sleep_days = input.sleep_days.clamp(0, MAX_SLEEP_DAYS);
    LevelingInput {
        current_progress_exp: input
            .current_progress_exp
            .map(|v| v.clamp(0, MAX_PROGRESS_EXP)),
        owned_candies: input.owned_candies.clamp(0, MAX_OWNED_CANDIES),
        boost_count: input.boost_count.map(|v| v.clamp(0, MAX_BOOST_COUNT)),
        sleep_days,
        sleep_bonus_count: input.sleep_bonus_count.clamp(0, MAX_SLEEP_BONUS_COUNT),
        incense_days: input.incense_days.clamp(0, sleep_days),
        premium_days: input.premium_days.clamp(0, sleep_days),
        ..input.clone()
    }
}

/// Check the level pair, returning `(current, target)`.
pub fn validate_levels(input: &LevelingInput) -> Result<(u32, u32)> {
    let (current, target) = (input.current_level, input.target_level);
    if !(1..MAX_LEVEL as i64).contains(&current) {
        return Err(CalcError::invalid_range(
            "current_level",
            current,
            format!("must be between 1 and {}", MAX_LEVEL - 1),
        ));
    }
    if !(FIRST_STEP_LEVEL as i64..=MAX_LEVEL as i64).contains(&target) {
        return Err(CalcError::invalid_range(
            "target_level",
            target,
            format!("must be between {} and {}", FIRST_STEP_LEVEL, MAX_LEVEL),
        ));
    }
    if target <= current {
        return Err(CalcError::invalid_range(
            "target_level",
            target,
            format!("must be greater than the current level ({})", current),
        ));
    }
    Ok((current as u32, target as u32))
}

/// Resolved parameters for one candy loop.
#[derive(Debug, Clone, Copy)]
struct Climb {
    from: u32,
    to: u32,
    growth: GrowthType,
    nature: Nature,
    start_exp: i64,
    boost_kind: BoostKind,
    boost_uses: i64,
}

/// Feed candies greedily until `to` is reached.
fn run_climb(tables: &LevelTables, climb: Climb) -> Result<SimulationResult> {
    let mut candies = 0i64;
    let mut shards = 0i64;
    let mut level = climb.from;
    let mut current_exp = climb.start_exp;
    let mut boost_remaining = climb.boost_uses.max(0);

    while level < climb.to {
        let next = level + 1;
        let need = tables.need_step(next, climb.growth);

        while current_exp < need {
            let boosted = climb.boost_kind.is_active() && boost_remaining > 0;
            let (exp_mult, shard_mult) = if boosted {
                (BOOST_EXP_MULT, climb.boost_kind.shard_multiplier())
            } else {
                (1, 1)
            };

            let gain = candy_exp_gain(level, climb.nature, exp_mult);
            if gain <= 0 {
                return Err(CalcError::ZeroExpGain { level });
            }

            candies += 1;
            shards += tables.shard_cost(next) * shard_mult;
            current_exp += gain;
            if boosted {
                boost_remaining -= 1;
            }
        }

        // Carry the surplus into the next level.
        current_exp -= need;
        level = next;
    }

    Ok(SimulationResult {
        candies_total: candies,
        shards_total: shards,
    })
}

/// Starting experience and the passive share applied to the climb.
struct Start {
    initial_progress: i64,
    /// Entered remaining EXP, subtracted from the displayed need (0 when blank).
    entered_remaining: i64,
    free: FreeExp,
    free_applied: i64,
    total_steps: i64,
}

fn resolve_start(input: &LevelingInput, tables: &LevelTables, from: u32, to: u32) -> Start {
    let need_next = tables.need_step(from + 1, input.growth);
    let remaining_to_next = match input.current_progress_exp {
        None => need_next,
        Some(v) => v.max(0).min(need_next),
    };
    let initial_progress = (need_next - remaining_to_next).max(0);
    let entered_remaining = if input.current_progress_exp.is_some() {
        remaining_to_next
    } else {
        0
    };

    let total_steps = tables.total_steps(from, to, input.growth);
    let free = free_exp(
        input.sleep_days,
        input.sleep_bonus_count,
        input.incense_days,
        input.premium_days,
    );
    // Passive experience past the climb's total is wasted.
    let free_applied = free.total.min(total_steps).max(0);

    Start {
        initial_progress,
        entered_remaining,
        free,
        free_applied,
        total_steps,
    }
}

fn boost_uses(input: &LevelingInput) -> i64 {
    input.boost_count.unwrap_or(BOOST_UNBOUNDED_USES).max(0)
}

/// Simulate the candies and shards needed to reach the target level,
/// using the input's boost settings.
pub fn simulate(input: &LevelingInput, tables: &LevelTables) -> Result<SimulationResult> {
    let input = sanitize(input);
    let (from, to) = validate_levels(&input)?;
    let start = resolve_start(&input, tables, from, to);

    run_climb(
        tables,
        Climb {
            from,
            to,
            growth: input.growth,
            nature: input.nature,
            start_exp: start.initial_progress + start.free_applied,
            boost_kind: input.boost_kind,
            boost_uses: boost_uses(&input),
        },
    )
}

/// Run the simulation without boost and, when a boost is chosen, with it.
pub fn plan_leveling(input: &LevelingInput, tables: &LevelTables) -> Result<LevelReport> {
    let input = sanitize(input);
    let (from, to) = validate_levels(&input)?;
    let start = resolve_start(&input, tables, from, to);

    let base = Climb {
        from,
        to,
        growth: input.growth,
        nature: input.nature,
        start_exp: start.initial_progress + start.free_applied,
        boost_kind: BoostKind::None,
        boost_uses: 0,
    };
    let normal = run_climb(tables, base)?;

    let boosted = if input.boost_kind.is_active() {
        Some(run_climb(
            tables,
            Climb {
                boost_kind: input.boost_kind,
                boost_uses: boost_uses(&input),
                ..base
            },
        )?)
    } else {
        None
    };

    // The displayed need subtracts the entered remaining EXP as typed, not
    // the progress already earned that the candy loop starts from.
    let remain_after_entry = (start.total_steps - start.entered_remaining).max(0);
    let free_shown = start.free_applied.min(remain_after_entry);
    let total_exp_needed = (remain_after_entry - free_shown).max(0);

    debug!(
        from,
        to,
        growth = ?input.growth,
        total_exp_needed,
        candies = normal.candies_total,
        shards = normal.shards_total,
        "simulated leveling"
    );

    Ok(LevelReport {
        total_exp_needed,
        free_exp: start.free,
        free_exp_applied: start.free_applied,
        normal,
        boosted,
        boost_kind: input.boost_kind,
        owned_candies: input.owned_candies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_tables(step: i64, shard: i64) -> LevelTables {
        let exp: BTreeMap<u32, i64> = (2..=65).map(|lv| (lv, step)).collect();
        let shards: BTreeMap<u32, i64> = (2..=65).map(|lv| (lv, shard)).collect();
        LevelTables::new(&exp, shards)
    }

    #[test]
    fn test_scaled_steps_round_cumulative() {
        // Cumulative 100, 250, 400 -> 220, 550, 880.
        assert_eq!(scaled_steps(&[100, 150, 150], 2.2), vec![220, 330, 330]);
    }

    #[test]
    fn test_scaled_steps_do_not_compound_rounding() {
        // Per-step rounding would give 2, 2, 2; cumulative gives 2, 1, 2.
        assert_eq!(scaled_steps(&[1, 1, 1], 1.5), vec![2, 1, 2]);
    }

    #[test]
    fn test_candy_exp_bands() {
        assert_eq!(candy_exp_gain(10, Nature::Neutral, 1), 35);
        assert_eq!(candy_exp_gain(25, Nature::Neutral, 1), 30);
        assert_eq!(candy_exp_gain(30, Nature::Neutral, 1), 25);
        assert_eq!(candy_exp_gain(10, Nature::Up, 1), 41);
        assert_eq!(candy_exp_gain(10, Nature::Down, 1), 29);
        assert_eq!(candy_exp_gain(27, Nature::Up, 1), 35);
    }

    #[test]
    fn test_candy_exp_rounds_before_boost() {
        // round(35 * 1.18) = 41, doubled = 82 (not round(82.6) = 83).
        assert_eq!(candy_exp_gain(10, Nature::Up, 2), 82);
    }

    #[test]
    fn test_free_exp_tranches() {
        let free = free_exp(10, 2, 3, 0);
        assert_eq!(free.per_day, 128);
        assert_eq!(free.single_days, 7);
        assert_eq!(free.double_days, 3);
        assert_eq!(free.triple_days, 0);
        assert_eq!(free.total, 128 * 13);

        let free = free_exp(4, 0, 3, 3);
        assert_eq!(free.triple_days, 2);
        assert_eq!(free.double_days, 2);
        assert_eq!(free.single_days, 0);
        assert_eq!(free.total, 100 * (4 + 3 + 3));
    }

    #[test]
    fn test_free_exp_incense_capped_by_sleep() {
        assert_eq!(free_exp(2, 0, 9, 0).total, 100 * 4);
        assert_eq!(free_exp(-5, 0, 3, 3).total, 0);
    }

    #[test]
    fn test_need_step_out_of_range_is_zero() {
        let tables = flat_tables(100, 10);
        assert_eq!(tables.need_step(1, GrowthType::Normal), 0);
        assert_eq!(tables.need_step(66, GrowthType::Normal), 0);
        assert_eq!(tables.need_step(2, GrowthType::Legend), 220);
    }

    #[test]
    fn test_oversized_table_values_clamped() {
        let exp: BTreeMap<u32, i64> = [(2, 999_999_999_999), (3, -40)].into_iter().collect();
        let shards: BTreeMap<u32, i64> = [(2, i64::MAX)].into_iter().collect();
        let tables = LevelTables::new(&exp, shards);
        assert_eq!(tables.need_step(2, GrowthType::Normal), MAX_TABLE_VALUE);
        assert_eq!(tables.need_step(3, GrowthType::Normal), 0);
        assert_eq!(tables.shard_cost(2), MAX_TABLE_VALUE);
    }

    #[test]
    fn test_invalid_range_reported() {
        let tables = flat_tables(100, 10);
        let err = simulate(&LevelingInput::new(30, 30), &tables).unwrap_err();
        assert!(matches!(
            err,
            CalcError::InvalidRange { field: "target_level", value: 30, .. }
        ));

        let err = simulate(&LevelingInput::new(0, 10), &tables).unwrap_err();
        assert!(matches!(err, CalcError::InvalidRange { field: "current_level", .. }));

        let err = simulate(&LevelingInput::new(10, 70), &tables).unwrap_err();
        assert!(matches!(err, CalcError::InvalidRange { field: "target_level", .. }));
    }

    #[test]
    fn test_simulate_single_level() {
        // 100 exp at 35 per candy -> 3 candies, 10 shards each.
        let tables = flat_tables(100, 10);
        let sim = simulate(&LevelingInput::new(1, 2), &tables).unwrap();
        assert_eq!(sim.candies_total, 3);
        assert_eq!(sim.shards_total, 30);
    }

    #[test]
    fn test_surplus_carries_forward() {
        // 105 exp over two levels of 100: 3 candies, surplus 5, then 3 more
        // candies reach 110 >= 100.
        let tables = flat_tables(100, 10);
        let sim = simulate(&LevelingInput::new(1, 3), &tables).unwrap();
        assert_eq!(sim.candies_total, 6);
    }

    #[test]
    fn test_progress_input_reduces_first_level() {
        let tables = flat_tables(100, 10);
        let mut input = LevelingInput::new(1, 2);
        input.current_progress_exp = Some(30);
        assert_eq!(simulate(&input, &tables).unwrap().candies_total, 1);

        // Remaining progress above the step is clamped to the full step.
        input.current_progress_exp = Some(5000);
        assert_eq!(simulate(&input, &tables).unwrap().candies_total, 3);
    }

    #[test]
    fn test_displayed_need_subtracts_entered_remaining() {
        let tables = flat_tables(100, 10);
        let mut input = LevelingInput::new(1, 3);
        input.current_progress_exp = Some(30);
        let report = plan_leveling(&input, &tables).unwrap();
        assert_eq!(report.total_exp_needed, 170);
        // The candy loop still starts 70 EXP into level 2.
        assert_eq!(report.normal.candies_total, 4);

        input.sleep_days = 2;
        let report = plan_leveling(&input, &tables).unwrap();
        assert_eq!(report.free_exp_applied, 200);
        assert_eq!(report.total_exp_needed, 0);

        input.sleep_days = 0;
        input.current_progress_exp = None;
        let report = plan_leveling(&input, &tables).unwrap();
        assert_eq!(report.total_exp_needed, 200);
    }

    #[test]
    fn test_boost_budget_limits_boosted_candies() {
        let tables = flat_tables(70, 10);
        let mut input = LevelingInput::new(1, 2);
        input.boost_kind = BoostKind::Full;
        input.boost_count = Some(1);
        // One boosted candy (70 exp, 50 shards) clears the level.
        let sim = simulate(&input, &tables).unwrap();
        assert_eq!(sim.candies_total, 1);
        assert_eq!(sim.shards_total, 50);
    }

    #[test]
    fn test_plan_leveling_reports_both_runs() {
        let tables = flat_tables(100, 10);
        let mut input = LevelingInput::new(1, 3);
        input.boost_kind = BoostKind::Mini;
        input.owned_candies = 2;
        input.sleep_days = 1;

        let report = plan_leveling(&input, &tables).unwrap();
        assert_eq!(report.free_exp_applied, 100);
        assert_eq!(report.total_exp_needed, 100);
        assert_eq!(report.normal.candies_total, 3);
        assert_eq!(report.candies_to_obtain(), 1);

        let boosted = report.boosted.unwrap();
        // 70 exp per boosted candy: 2 candies, 40 shards each.
        assert_eq!(boosted.candies_total, 2);
        assert_eq!(boosted.shards_total, 80);
        assert_eq!(report.boosted_candies_to_obtain(), Some(0));
    }

    #[test]
    fn test_free_exp_capped_at_total_steps() {
        let tables = flat_tables(100, 10);
        let mut input = LevelingInput::new(1, 2);
        input.sleep_days = 50;
        let report = plan_leveling(&input, &tables).unwrap();
        assert_eq!(report.free_exp_applied, 100);
        assert_eq!(report.total_exp_needed, 0);
        assert_eq!(report.normal.candies_total, 0);
    }

    #[test]
    fn test_sanitize_clamps_form_fields() {
        let mut input = LevelingInput::new(5, 10);
        input.sleep_days = 5000;
        input.incense_days = 2000;
        input.sleep_bonus_count = 9;
        input.boost_count = Some(-3);
        let clean = sanitize(&input);
        assert_eq!(clean.sleep_days, 999);
        assert_eq!(clean.incense_days, 999);
        assert_eq!(clean.sleep_bonus_count, 5);
        assert_eq!(clean.boost_count, Some(0));
        assert_eq!(clean.current_level, 5);
    }
}
