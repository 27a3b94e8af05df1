pub mod age;
pub mod grid;
pub mod summary;

pub use age::{cell_label, tooltip_text};
pub use grid::{filled_cells, is_filled, GridCell, GridLayout};
pub use summary::{calculate_summary, LifeSummary};
