use crate::calc::age::months_word;
use crate::calc::grid::{filled_cells, GridLayout, MONTHS_PER_YEAR};
use crate::data::LifeConfig;
use chrono::NaiveDate;
use serde::Serialize;

/// Legend figures for the grid. Every figure is `None` when the birth year is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifeSummary {
    pub birth_year: Option<i32>,
    pub birth_month: u32,
    pub months_lived: Option<i64>,
    pub months_remaining: Option<i64>,
    pub age_years: Option<i64>,
    pub age_months: Option<i64>,
    pub total_cells: usize,
    pub rows: usize,
    pub cells_per_row: usize,
}

pub fn calculate_summary(config: &LifeConfig, now: NaiveDate, layout: &GridLayout) -> LifeSummary {
    let filled = filled_cells(config, now);
    let per_year = MONTHS_PER_YEAR as i64;
    LifeSummary {
        birth_year: config.birth_year,
        birth_month: config.birth_month,
        months_lived: filled,
        months_remaining: filled.map(|_| layout.fill_counts(filled).1 as i64),
        age_years: filled.map(|n| n / per_year),
        age_months: filled.map(|n| n % per_year),
        total_cells: layout.total_cells,
        rows: layout.row_count(),
        cells_per_row: layout.cells_per_row,
    }
}

impl LifeSummary {
    /// "25 years and 3 months", or "unknown".
    pub fn current_age_text(&self) -> String {
        match (self.age_years, self.age_months) {
            (Some(y), Some(m)) => format!("{} years and {} {}", y, m, months_word(m as u32)),
            _ => "unknown".to_string(),
        }
    }
}

pub(crate) fn display_count(n: Option<i64>) -> String {
    n.map_or_else(|| "unknown".to_string(), |n| n.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_summary_for_known_birth() {
        let s = calculate_summary(
            &LifeConfig::new(Some(1999), 8),
            d(2000, 8, 1),
            &GridLayout::default(),
        );
        assert_eq!(s.months_lived, Some(13));
        assert_eq!(s.months_remaining, Some(864 - 13));
        assert_eq!(s.current_age_text(), "1 years and 1 month");
        assert_eq!(s.rows, 24);
    }

    #[test]
    fn test_summary_remaining_never_negative() {
        let s = calculate_summary(
            &LifeConfig::new(Some(1900), 1),
            d(2026, 10, 16),
            &GridLayout::default(),
        );
        assert_eq!(s.months_remaining, Some(0));
    }

    #[test]
    fn test_summary_unknown_year() {
        let s = calculate_summary(
            &LifeConfig::new(None, 8),
            d(2026, 10, 16),
            &GridLayout::default(),
        );
        assert_eq!(s.months_lived, None);
        assert_eq!(s.current_age_text(), "unknown");
        assert_eq!(display_count(s.months_remaining), "unknown");
    }

    #[test]
    fn test_age_text_plural_zero_months() {
        let s = calculate_summary(
            &LifeConfig::new(Some(2000), 1),
            d(2001, 12, 1),
            &GridLayout::default(),
        );
        // 24 months lived
        assert_eq!(s.current_age_text(), "2 years and 0 months");
    }
}
