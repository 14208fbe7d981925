use crate::error::ReportError;
use crate::model::stats::UserStatistics;
use crate::render::{chart, pdf, table};
use crate::service::project::{self, AnchorPolicy, REPORT_WINDOW_DAYS};
use crate::source::ProductionSource;
use crate::time;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

/// Runs the whole pipeline: load -> parse -> aggregate -> render -> assemble.
///
/// Returns `Ok(false)` without touching `output_pdf` when the source has no
/// usable lines (a logged notice, not an error). Every other failure aborts
/// the batch with no partial output; a mixed-uid log in particular must kill
/// the run, since one report describes exactly one user.
///
/// `today` is injected rather than read from the wall clock so reporting is
/// deterministic under test; it stamps the "Date Generated" line and anchors
/// the window when `policy` is [`AnchorPolicy::Today`].
pub fn generate_report<S: ProductionSource>(
    source: &S,
    output_pdf: &Path,
    today: NaiveDate,
    policy: AnchorPolicy,
) -> Result<bool> {
    let lines = source.load()?;
    let stats = match UserStatistics::from_lines(&lines) {
        Ok(stats) => stats,
        Err(ReportError::EmptyInput) => {
            log::warn!("production log has no usable lines, no report generated");
            return Ok(false);
        }
        Err(err) => return Err(err.into()),
    };
    log::debug!(
        "aggregated {} active days for {}",
        stats.daily_stats().len(),
        stats.uid()
    );

    let series = project::time_series(stats.daily_stats(), policy, today);
    let pcts = project::percentages(&series);
    let chart_image = chart::accuracy_bar_chart(&series, &pcts)?;

    let grid = project::word_grid(stats.daily_stats(), policy, today, REPORT_WINDOW_DAYS);
    let table_image = table::word_table(&grid)?;

    pdf::assemble_report(
        stats.uid(),
        &time::format_date(today),
        &chart_image,
        &table_image,
        output_pdf,
    )
    .with_context(|| format!("failed to assemble report at {}", output_pdf.display()))?;
    Ok(true)
}
