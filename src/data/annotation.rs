use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PLACEHOLDER_ACK: &str = "Description saved (not actually saved yet!)";

/// Identifies a grid cell by the age it represents.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub cell_year: u32,
    /// Zero-based month within `cell_year`.
    pub cell_month: u32,
}

impl CellKey {
    pub fn new(cell_year: u32, cell_month: u32) -> Self {
        CellKey {
            cell_year,
            cell_month,
        }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}y{}m", self.cell_year, self.cell_month)
    }
}

/// Backend that receives annotation text when the user presses Save.
///
/// Returns the acknowledgement shown to the user.
pub trait AnnotationStore {
    fn save_annotation(&mut self, key: CellKey, text: &str) -> Result<String>;
}

/// Accepts every save and keeps nothing.
#[derive(Debug, Default)]
pub struct PlaceholderStore;

impl AnnotationStore for PlaceholderStore {
    fn save_annotation(&mut self, key: CellKey, text: &str) -> Result<String> {
        log::info!(
            "annotation for {key} discarded ({} chars): no store configured",
            text.chars().count()
        );
        Ok(PLACEHOLDER_ACK.to_string())
    }
}
