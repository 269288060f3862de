use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{CalcError, Result};
use crate::planner::constants::MAX_TABLE_VALUE;
use crate::planner::leveling::LevelTables;
use crate::planner::numeric::to_num;

/// Parse a whitespace-delimited `level value` table.
///
/// Blank lines, `#` comments and `[section]` headers are ignored, as are
/// lines with fewer than two columns or a non-integer level. Only the first
/// value column is read.
pub fn parse_two_column(text: &str) -> BTreeMap<u32, i64> {
    let mut map = BTreeMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
            continue;
        }
        let mut cols = line.split_whitespace();
        let (Some(level), Some(value)) = (cols.next(), cols.next()) else {
            continue;
        };
        let Ok(level) = level.parse::<u32>() else {
            continue;
        };
        map.insert(level, to_num(value) as i64);
    }
    map
}

/// Load experience and shard tables and precompute steps for every growth type.
pub fn load_level_tables<P: AsRef<Path>, Q: AsRef<Path>>(
    exp_path: P,
    shard_path: Q,
) -> Result<LevelTables> {
    let exp = parse_two_column(&fs::read_to_string(exp_path)?);
    let shards = parse_two_column(&fs::read_to_string(shard_path)?);
    check_bounds("exp_table", &exp)?;
    check_bounds("shard_table", &shards)?;
    Ok(LevelTables::new(&exp, shards))
}

/// Reject negative or implausibly large table values.
fn check_bounds(field: &'static str, table: &BTreeMap<u32, i64>) -> Result<()> {
    match table.values().find(|v| !(0..=MAX_TABLE_VALUE).contains(*v)) {
        Some(&value) => Err(CalcError::invalid_range(
            field,
            value,
            format!("table values must be between 0 and {}", MAX_TABLE_VALUE),
        )),
        None => Ok(()),
    }
}
