use crate::data::{CellKey, LifeConfig};
use chrono::{Datelike, NaiveDate};

pub const YEARS_IN_GRID: usize = 72;
pub const MONTHS_PER_YEAR: usize = 12;
/// Three years per grid row.
pub const MONTHS_PER_ROW: usize = 36;
pub const TOTAL_CELLS: usize = YEARS_IN_GRID * MONTHS_PER_YEAR;

/// One month of the lifespan, addressed by its zero-based position in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub index: usize,
}

impl GridCell {
    pub fn new(index: usize) -> Self {
        GridCell { index }
    }

    #[cfg(test)]
    pub fn from_age(cell_year: u32, cell_month: u32) -> Self {
        GridCell::new(cell_year as usize * MONTHS_PER_YEAR + cell_month as usize)
    }

    /// Whole years of age this cell represents.
    pub fn cell_year(&self) -> u32 {
        (self.index / MONTHS_PER_YEAR) as u32
    }

    /// Zero-based month within `cell_year`.
    pub fn cell_month(&self) -> u32 {
        (self.index % MONTHS_PER_YEAR) as u32
    }

    pub fn key(&self) -> CellKey {
        CellKey::new(self.cell_year(), self.cell_month())
    }
}

/// Number of months lived up to and including the month of `now`.
///
/// Returns `None` when the birth year is unknown. A birth date after `now`
/// clamps to zero.
pub fn filled_cells(config: &LifeConfig, now: NaiveDate) -> Option<i64> {
    let birth_year = config.birth_year?;
    let mut years_diff = i64::from(now.year()) - i64::from(birth_year);
    let mut months_diff = i64::from(now.month0()) - i64::from(config.birth_month0());
    if months_diff < 0 {
        years_diff -= 1;
        months_diff += 12;
    }
    Some((years_diff * 12 + months_diff + 1).max(0))
}

pub fn is_filled(index: usize, filled: Option<i64>) -> bool {
    filled.is_some_and(|n| (index as i64) < n)
}

/// Row-major arrangement of the cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub total_cells: usize,
    pub cells_per_row: usize,
}

impl Default for GridLayout {
    fn default() -> Self {
        GridLayout::new(TOTAL_CELLS, MONTHS_PER_ROW)
    }
}

impl GridLayout {
    pub fn new(total_cells: usize, cells_per_row: usize) -> Self {
        GridLayout {
            total_cells,
            cells_per_row: cells_per_row.max(1),
        }
    }

    pub fn row_count(&self) -> usize {
        self.total_cells.div_ceil(self.cells_per_row)
    }

    /// Cells of `row`, left to right. The last row may be short.
    pub fn row_cells(&self, row: usize) -> impl Iterator<Item = GridCell> + use<> {
        let start = row * self.cells_per_row;
        let end = (start + self.cells_per_row).min(self.total_cells);
        (start..end).map(GridCell::new)
    }

    pub fn position(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.total_cells {
            return None;
        }
        Some((index / self.cells_per_row, index % self.cells_per_row))
    }

    pub fn index_at(&self, row: usize, col: usize) -> Option<usize> {
        if col >= self.cells_per_row {
            return None;
        }
        let index = row * self.cells_per_row + col;
        (index < self.total_cells).then_some(index)
    }

    /// Age in years at the first cell of `row`.
    pub fn row_label(&self, row: usize) -> usize {
        row * self.cells_per_row / MONTHS_PER_YEAR
    }

    /// (filled, unfilled) cell counts for the given fill level.
    pub fn fill_counts(&self, filled: Option<i64>) -> (usize, usize) {
        let lived = (0..self.row_count())
            .flat_map(|row| self.row_cells(row))
            .filter(|c| is_filled(c.index, filled))
            .count();
        (lived, self.total_cells - lived)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn cfg(year: i32, month: u32) -> LifeConfig {
        LifeConfig::new(Some(year), month)
    }

    // ── filled_cells ─────────────────────────────────────────────────────────

    #[test]
    fn test_filled_cells_one_year_later_same_month() {
        assert_eq!(filled_cells(&cfg(1999, 8), d(2000, 8, 15)), Some(13));
    }

    #[test]
    fn test_filled_cells_birth_month_is_one() {
        assert_eq!(filled_cells(&cfg(1999, 8), d(1999, 8, 1)), Some(1));
    }

    #[test]
    fn test_filled_cells_borrows_a_year() {
        // Aug 1999 → Mar 2001: 19 whole months + current
        assert_eq!(filled_cells(&cfg(1999, 8), d(2001, 3, 31)), Some(20));
    }

    #[test]
    fn test_filled_cells_december_to_january() {
        assert_eq!(filled_cells(&cfg(2020, 12), d(2021, 1, 1)), Some(2));
    }

    #[test]
    fn test_filled_cells_matches_month_walk() {
        let birth = cfg(1990, 5);
        let mut date = d(1990, 5, 1);
        for expected in 1..=400 {
            assert_eq!(filled_cells(&birth, date), Some(expected));
            date = date
                .checked_add_months(chrono::Months::new(1))
                .unwrap();
        }
    }

    #[test]
    fn test_filled_cells_future_birth_clamps_to_zero() {
        assert_eq!(filled_cells(&cfg(2030, 1), d(2026, 10, 16)), Some(0));
    }

    #[test]
    fn test_filled_cells_unknown_year() {
        assert_eq!(filled_cells(&LifeConfig::new(None, 8), d(2026, 10, 16)), None);
    }

    // ── fill state ───────────────────────────────────────────────────────────

    #[test]
    fn test_fill_boundary() {
        let filled = filled_cells(&cfg(1999, 8), d(2000, 8, 1));
        assert!(is_filled(11, filled));
        assert!(is_filled(12, filled));
        assert!(!is_filled(13, filled));
    }

    #[test]
    fn test_unknown_year_fills_nothing() {
        assert!(!is_filled(0, None));
        assert_eq!(GridLayout::default().fill_counts(None), (0, TOTAL_CELLS));
    }

    #[test]
    fn test_fill_counts_sum_to_total() {
        let layout = GridLayout::default();
        for filled in [Some(0), Some(1), Some(327), Some(864), Some(2000), None] {
            let (lived, remaining) = layout.fill_counts(filled);
            assert_eq!(lived + remaining, 72 * 12);
        }
        assert_eq!(layout.fill_counts(Some(327)), (327, 864 - 327));
        assert_eq!(layout.fill_counts(Some(2000)), (864, 0));
    }

    // ── cells and layout ─────────────────────────────────────────────────────

    #[test]
    fn test_cell_year_and_month() {
        let c = GridCell::new(38);
        assert_eq!(c.cell_year(), 3);
        assert_eq!(c.cell_month(), 2);
        assert_eq!(GridCell::from_age(3, 2), c);
        assert_eq!(c.key(), CellKey::new(3, 2));
    }

    #[test]
    fn test_default_layout_shape() {
        let layout = GridLayout::default();
        assert_eq!(layout.total_cells, 864);
        assert_eq!(layout.row_count(), 24);
        assert_eq!(layout.row_cells(23).count(), 36);
        assert_eq!(layout.row_label(1), 3);
        assert_eq!(layout.row_label(23), 69);
    }

    #[test]
    fn test_partial_last_row() {
        let layout = GridLayout::new(40, 36);
        assert_eq!(layout.row_count(), 2);
        let last: Vec<usize> = layout.row_cells(1).map(|c| c.index).collect();
        assert_eq!(last, vec![36, 37, 38, 39]);
        assert_eq!(layout.index_at(1, 4), None);
        assert_eq!(layout.index_at(1, 3), Some(39));
    }

    #[test]
    fn test_position_and_index_at_agree() {
        let layout = GridLayout::default();
        for index in 0..layout.total_cells {
            let (row, col) = layout.position(index).unwrap();
            assert_eq!(layout.index_at(row, col), Some(index));
        }
        assert_eq!(layout.position(864), None);
        assert_eq!(layout.index_at(0, 36), None);
    }
}
