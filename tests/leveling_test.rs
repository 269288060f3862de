use std::collections::BTreeMap;
use std::io::Write;

use tempfile::NamedTempFile;

use sleep_stock_calc::error::CalcError;
use sleep_stock_calc::models::{BoostKind, GrowthType, LevelingInput, Nature};
use sleep_stock_calc::planner::{LevelTables, plan_leveling, simulate};
use sleep_stock_calc::state::load_level_tables;

fn tables_with(step: i64, shard: i64) -> LevelTables {
    let exp: BTreeMap<u32, i64> = (2..=65).map(|lv| (lv, step)).collect();
    let shards: BTreeMap<u32, i64> = (2..=65).map(|lv| (lv, shard)).collect();
    LevelTables::new(&exp, shards)
}

#[test]
fn test_legendary_steps_from_cumulative() {
    let exp: BTreeMap<u32, i64> = [(2, 100), (3, 150), (4, 150)].into_iter().collect();
    let tables = LevelTables::new(&exp, BTreeMap::new());

    let steps: Vec<i64> = (2..=4)
        .map(|lv| tables.need_step(lv, GrowthType::Legend))
        .collect();
    assert_eq!(steps, vec![220, 330, 330]);
}

#[test]
fn test_boost_budget_exhaustion() {
    // One level of 350 EXP at 35 EXP per candy: ten plain candies.
    let tables = tables_with(350, 10);

    let plain = simulate(&LevelingInput::new(10, 11), &tables).unwrap();
    assert_eq!(plain.candies_total, 10);
    assert_eq!(plain.shards_total, 100);

    let mut input = LevelingInput::new(10, 11);
    input.boost_kind = BoostKind::Mini;
    input.boost_count = Some(2);
    let boosted = simulate(&input, &tables).unwrap();

    // Two boosted candies (70 EXP, 40 shards) then six plain ones.
    assert_eq!(boosted.candies_total, 8);
    assert_eq!(boosted.shards_total, 2 * 40 + 6 * 10);
    assert!(boosted.candies_total <= plain.candies_total);
}

#[test]
fn test_unbounded_boost_covers_whole_climb() {
    let tables = tables_with(350, 10);
    let mut input = LevelingInput::new(10, 11);
    input.boost_kind = BoostKind::Full;

    let result = simulate(&input, &tables).unwrap();
    assert_eq!(result.candies_total, 5);
    assert_eq!(result.shards_total, 5 * 50);
}

#[test]
fn test_plan_leveling_reports_both_runs() {
    let tables = tables_with(350, 10);
    let mut input = LevelingInput::new(10, 12);
    input.boost_kind = BoostKind::Mini;
    input.boost_count = Some(3);
    input.owned_candies = 4;

    let report = plan_leveling(&input, &tables).unwrap();
    assert_eq!(report.total_exp_needed, 700);
    assert_eq!(report.normal.candies_total, 20);
    assert_eq!(report.candies_to_obtain(), 16);

    let boosted = report.boosted.unwrap();
    assert_eq!(boosted.candies_total, 17);
    assert_eq!(report.boosted_candies_to_obtain(), Some(13));
}

#[test]
fn test_plan_leveling_without_boost_has_no_boosted_run() {
    let tables = tables_with(350, 10);
    let report = plan_leveling(&LevelingInput::new(10, 11), &tables).unwrap();
    assert!(report.boosted.is_none());
    assert_eq!(report.boosted_candies_to_obtain(), None);
}

#[test]
fn test_sleep_exp_reduces_candies() {
    let tables = tables_with(350, 10);
    let mut input = LevelingInput::new(10, 11);
    input.sleep_days = 1;
    input.incense_days = 1;

    // 200 free EXP leaves 150: five candies.
    let report = plan_leveling(&input, &tables).unwrap();
    assert_eq!(report.free_exp.total, 200);
    assert_eq!(report.free_exp_applied, 200);
    assert_eq!(report.total_exp_needed, 150);
    assert_eq!(report.normal.candies_total, 5);
}

#[test]
fn test_nature_changes_candy_count() {
    let tables = tables_with(350, 10);
    let mut input = LevelingInput::new(10, 11);

    input.nature = Nature::Up;
    assert_eq!(simulate(&input, &tables).unwrap().candies_total, 9);

    input.nature = Nature::Down;
    assert_eq!(simulate(&input, &tables).unwrap().candies_total, 13);
}

#[test]
fn test_target_not_above_current_is_invalid() {
    let tables = tables_with(350, 10);
    let err = plan_leveling(&LevelingInput::new(20, 15), &tables).unwrap_err();
    assert!(matches!(err, CalcError::InvalidRange { field: "target_level", .. }));

    let err = plan_leveling(&LevelingInput::new(10, 66), &tables).unwrap_err();
    assert!(matches!(err, CalcError::InvalidRange { field: "target_level", .. }));
}

#[test]
fn test_tables_loaded_from_files() {
    let mut exp = NamedTempFile::new().unwrap();
    writeln!(exp, "# level exp").unwrap();
    for lv in 2..=65 {
        writeln!(exp, "{} 350", lv).unwrap();
    }
    let mut shards = NamedTempFile::new().unwrap();
    for lv in 2..=65 {
        writeln!(shards, "{}\t10", lv).unwrap();
    }

    let tables = load_level_tables(exp.path(), shards.path()).unwrap();
    assert_eq!(tables.need_step(11, GrowthType::Normal), 350);
    assert_eq!(tables.shard_cost(11), 10);

    let result = simulate(&LevelingInput::new(10, 11), &tables).unwrap();
    assert_eq!(result.candies_total, 10);
}
