pub mod export;
pub mod prompts;
pub mod render;

pub use export::write_stock_csv;
pub use prompts::prompt_leveling_input;
pub use render::{display_level_report, display_plan, display_stock_result, success_label};
