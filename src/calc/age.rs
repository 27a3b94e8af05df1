use crate::calc::grid::{GridCell, MONTHS_PER_YEAR};
use crate::data::LifeConfig;
use chrono::Month;

/// Shown in place of the calendar year when the birth year is unknown.
pub const UNKNOWN_YEAR: &str = "????";

/// English name of a zero-based month, 0 = January.
pub fn month_name(month0: u32) -> &'static str {
    month0
        .checked_add(1)
        .and_then(|m| u8::try_from(m).ok())
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown")
}

pub fn months_word(n: u32) -> &'static str {
    if n == 1 { "month" } else { "months" }
}

/// "{years} years, {months} month(s)" where months counts from 1.
pub fn age_text(cell: GridCell) -> String {
    let months = cell.cell_month() + 1;
    format!("{} years, {} {}", cell.cell_year(), months, months_word(months))
}

pub fn tooltip_text(cell: GridCell) -> String {
    format!("Age: {}", age_text(cell))
}

/// Calendar year and zero-based month that `cell` falls in.
///
/// The year is `None` when the birth year is unknown or the sum leaves `i32`.
pub fn cell_calendar_month(config: &LifeConfig, cell: GridCell) -> (Option<i32>, u32) {
    let year = config
        .birth_year
        .and_then(|y| i32::try_from(cell.cell_year()).ok().and_then(|n| y.checked_add(n)));
    let month0 = (i64::from(config.birth_month0()) + i64::from(cell.cell_month()))
        .rem_euclid(MONTHS_PER_YEAR as i64) as u32;
    (year, month0)
}

/// Heading for the annotation popup, e.g. "August 1999, 0 years 1 month".
pub fn cell_label(config: &LifeConfig, cell: GridCell) -> String {
    let (year, month0) = cell_calendar_month(config, cell);
    let year = year.map_or_else(|| UNKNOWN_YEAR.to_string(), |y| y.to_string());
    let months = cell.cell_month() + 1;
    format!(
        "{} {}, {} years {} {}",
        month_name(month0),
        year,
        cell.cell_year(),
        months,
        months_word(months)
    )
}

/// Recovers `(cell_year, cell_month)` from a string built by [`cell_label`].
#[cfg(test)]
pub fn parse_cell_label(label: &str) -> Option<(u32, u32)> {
    let (_, age) = label.split_once(", ")?;
    let mut parts = age.split_whitespace();
    let years: u32 = parts.next()?.parse().ok()?;
    if parts.next()? != "years" {
        return None;
    }
    let months: u32 = parts.next()?.parse().ok()?;
    if !matches!(parts.next()?, "month" | "months") || parts.next().is_some() {
        return None;
    }
    let cell_month = months.checked_sub(1)?;
    (cell_month < MONTHS_PER_YEAR as u32).then_some((years, cell_month))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::grid::TOTAL_CELLS;

    fn cfg(year: i32, month: u32) -> LifeConfig {
        LifeConfig::new(Some(year), month)
    }

    #[test]
    fn test_month_name_known_values() {
        assert_eq!(month_name(0), "January");
        assert_eq!(month_name(7), "August");
        assert_eq!(month_name(11), "December");
    }

    #[test]
    fn test_month_name_unknown() {
        assert_eq!(month_name(12), "Unknown");
        assert_eq!(month_name(u32::MAX), "Unknown");
    }

    #[test]
    fn test_tooltip_singular_first_month() {
        assert_eq!(tooltip_text(GridCell::new(0)), "Age: 0 years, 1 month");
    }

    #[test]
    fn test_tooltip_plural() {
        assert_eq!(tooltip_text(GridCell::new(26)), "Age: 2 years, 3 months");
    }

    #[test]
    fn test_first_cell_is_birth_month() {
        let (year, month0) = cell_calendar_month(&cfg(1999, 8), GridCell::new(0));
        assert_eq!(year, Some(1999));
        assert_eq!(month_name(month0), "August");
    }

    #[test]
    fn test_month_wraps_but_year_follows_age() {
        // Fifth month after an August birth is December, sixth is January.
        let c = cfg(1999, 8);
        assert_eq!(cell_calendar_month(&c, GridCell::new(4)), (Some(1999), 11));
        assert_eq!(cell_calendar_month(&c, GridCell::new(5)), (Some(1999), 0));
        assert_eq!(cell_calendar_month(&c, GridCell::new(12)), (Some(2000), 7));
    }

    #[test]
    fn test_cell_label_format() {
        let c = cfg(1999, 8);
        assert_eq!(cell_label(&c, GridCell::new(0)), "August 1999, 0 years 1 month");
        assert_eq!(
            cell_label(&c, GridCell::new(300)),
            "August 2024, 25 years 1 month"
        );
        assert_eq!(
            cell_label(&c, GridCell::new(14)),
            "October 2000, 1 years 3 months"
        );
    }

    #[test]
    fn test_cell_label_unknown_year() {
        let c = LifeConfig::new(None, 1);
        assert_eq!(cell_label(&c, GridCell::new(1)), "February ????, 0 years 2 months");
    }

    #[test]
    fn test_cell_label_year_overflow_is_unknown() {
        let c = LifeConfig::new(Some(i32::MAX), 8);
        assert_eq!(cell_calendar_month(&c, GridCell::new(0)), (Some(i32::MAX), 7));
        assert_eq!(cell_calendar_month(&c, GridCell::new(12)), (None, 7));
        assert_eq!(cell_label(&c, GridCell::new(12)), "August ????, 1 years 1 month");
    }

    #[test]
    fn test_label_roundtrip_covers_every_cell() {
        let c = cfg(1987, 11);
        for index in 0..TOTAL_CELLS {
            let cell = GridCell::new(index);
            let (y, m) = parse_cell_label(&cell_label(&c, cell)).unwrap();
            assert_eq!(GridCell::from_age(y, m), cell);
        }
    }

    #[test]
    fn test_calendar_months_are_distinct() {
        let c = cfg(1987, 11);
        let mut seen = std::collections::HashSet::new();
        for index in 0..TOTAL_CELLS {
            assert!(seen.insert(cell_calendar_month(&c, GridCell::new(index))));
        }
    }

    #[test]
    fn test_parse_cell_label_rejects_garbage() {
        assert_eq!(parse_cell_label("no comma here"), None);
        assert_eq!(parse_cell_label("August 1999, x years 1 month"), None);
        assert_eq!(parse_cell_label("August 1999, 1 years 0 months"), None);
        assert_eq!(parse_cell_label("August 1999, 1 years 13 months"), None);
        assert_eq!(parse_cell_label("August 1999, 1 years 2 months extra"), None);
    }
}
