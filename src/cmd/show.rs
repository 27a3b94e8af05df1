use crate::calc::age::month_name;
use crate::calc::summary::display_count;
use crate::calc::{calculate_summary, GridLayout, LifeSummary};
use crate::data::LifeConfig;
use anyhow::Result;
use chrono::Local;

pub fn run(json: bool) -> Result<()> {
    let config = LifeConfig::load()?;
    let today = Local::now().date_naive();
    let summary = calculate_summary(&config, today, &GridLayout::default());
    let mut out = std::io::stdout();
    if json {
        write_summary_json(&summary, &mut out)
    } else {
        write_summary(&summary, &mut out)
    }
}

pub(crate) fn write_summary<W: std::io::Write>(summary: &LifeSummary, out: &mut W) -> Result<()> {
    let birth_year = display_count(summary.birth_year.map(i64::from));
    writeln!(out, "Life Grid")?;
    writeln!(out, "---")?;
    writeln!(
        out,
        "{:<20} {} {}",
        "Born:",
        month_name(summary.birth_month.saturating_sub(1)),
        birth_year
    )?;
    writeln!(out, "{:<20} {}", "Months lived:", display_count(summary.months_lived))?;
    writeln!(
        out,
        "{:<20} {}",
        "Months remaining:",
        display_count(summary.months_remaining)
    )?;
    writeln!(out, "{:<20} {}", "Current age:", summary.current_age_text())?;
    writeln!(out, "---")?;
    writeln!(
        out,
        "Grid: {} cells, {} rows of {}",
        summary.total_cells, summary.rows, summary.cells_per_row
    )?;
    Ok(())
}

pub(crate) fn write_summary_json<W: std::io::Write>(
    summary: &LifeSummary,
    out: &mut W,
) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary)?;
    writeln!(out)?;
    Ok(())
}
