use std::path::Path;

use crate::error::Result;
use crate::models::StockResult;
use crate::planner::constants::ingredient_name;

/// Write a stock result to CSV: one row per ingredient, then totals.
pub fn write_stock_csv(result: &StockResult, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["id", "name", "need"])?;
    for need in &result.per_ingredient {
        wtr.write_record([
            need.id.as_str(),
            ingredient_name(&need.id),
            need.need.to_string().as_str(),
        ])?;
    }
    wtr.write_record(["grand_total", "", result.grand_total.to_string().as_str()])?;
    wtr.write_record(["total_energy", "", result.total_energy.to_string().as_str()])?;

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IngredientNeed;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_stock_csv() {
        let result = StockResult {
            per_ingredient: vec![
                IngredientNeed { id: "egg".to_string(), need: 42 },
                IngredientNeed { id: "oddity".to_string(), need: 3 },
            ],
            grand_total: 45,
            total_energy: 9001,
            mixed_categories: false,
        };
        let file = NamedTempFile::new().unwrap();
        write_stock_csv(&result, file.path()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "id,name,need");
        assert_eq!(lines[1], "egg,とくせんエッグ,42");
        assert_eq!(lines[2], "oddity,oddity,3");
        assert_eq!(lines[3], "grand_total,,45");
        assert_eq!(lines[4], "total_energy,,9001");
    }
}
