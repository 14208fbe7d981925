use super::{ImageSource, CORRECT_COLOUR, WRONG_COLOUR};
use crate::service::project::SeriesPoint;
use crate::time;
use anyhow::{anyhow, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

const WIDTH: u32 = 1500;
const HEIGHT: u32 = 500;
const BAR_HALF_WIDTH: f64 = 0.4;

fn rgb(colour: (u8, u8, u8)) -> RGBColor {
    RGBColor(colour.0, colour.1, colour.2)
}

/// Renders the stacked daily-accuracy bar chart for the reporting window.
///
/// Each bar stacks correct (teal) over incorrect (coral) percentages; raw
/// counts are drawn inside the nonzero segments. `series` and `percentages`
/// come from the projector and must be the same length.
pub fn accuracy_bar_chart(series: &[SeriesPoint], percentages: &[(f64, f64)]) -> Result<ImageSource> {
    let mut raw = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut raw, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| anyhow!("failed to clear chart canvas: {e}"))?;

        let labels: Vec<String> = series
            .iter()
            .map(|point| time::display_date(point.date))
            .collect();

        let mut chart = ChartBuilder::on(&root)
            .caption("Percentage of Words Accuracy", ("sans-serif", 36))
            .margin(14)
            .x_label_area_size(60)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5f64..(series.len() as f64 - 0.5), 0f64..100f64)
            .map_err(|e| anyhow!("failed to build chart axes: {e}"))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(series.len())
            .x_label_formatter(&|x| {
                let nearest = x.round();
                if (x - nearest).abs() > 0.01 || nearest < 0.0 {
                    return String::new();
                }
                labels.get(nearest as usize).cloned().unwrap_or_default()
            })
            .x_desc("Last 14 Days from Most Recent Activity")
            .y_desc("Word Accuracy (%)")
            .axis_desc_style(("sans-serif", 24))
            .label_style(("sans-serif", 16))
            .draw()
            .map_err(|e| anyhow!("failed to draw chart mesh: {e}"))?;

        chart
            .draw_series(percentages.iter().enumerate().map(|(i, &(correct_pct, _))| {
                let x = i as f64;
                Rectangle::new(
                    [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, correct_pct)],
                    rgb(CORRECT_COLOUR).filled(),
                )
            }))
            .map_err(|e| anyhow!("failed to draw correct bars: {e}"))?
            .label("Words Correct")
            .legend(|(x, y)| {
                Rectangle::new([(x, y - 6), (x + 12, y + 6)], rgb(CORRECT_COLOUR).filled())
            });

        chart
            .draw_series(percentages.iter().enumerate().map(
                |(i, &(correct_pct, incorrect_pct))| {
                    let x = i as f64;
                    Rectangle::new(
                        [
                            (x - BAR_HALF_WIDTH, correct_pct),
                            (x + BAR_HALF_WIDTH, correct_pct + incorrect_pct),
                        ],
                        rgb(WRONG_COLOUR).filled(),
                    )
                },
            ))
            .map_err(|e| anyhow!("failed to draw incorrect bars: {e}"))?
            .label("Words Incorrect")
            .legend(|(x, y)| {
                Rectangle::new([(x, y - 6), (x + 12, y + 6)], rgb(WRONG_COLOUR).filled())
            });

        // Raw counts centred inside each nonzero segment.
        let count_style = TextStyle::from(("sans-serif", 18).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart
            .draw_series(
                series
                    .iter()
                    .zip(percentages)
                    .enumerate()
                    .filter(|(_, (point, _))| point.correct > 0)
                    .map(|(i, (point, &(correct_pct, _)))| {
                        Text::new(
                            point.correct.to_string(),
                            (i as f64, correct_pct / 2.0),
                            count_style.clone(),
                        )
                    }),
            )
            .map_err(|e| anyhow!("failed to draw correct counts: {e}"))?;
        chart
            .draw_series(
                series
                    .iter()
                    .zip(percentages)
                    .enumerate()
                    .filter(|(_, (point, _))| point.incorrect > 0)
                    .map(|(i, (point, &(correct_pct, incorrect_pct)))| {
                        Text::new(
                            point.incorrect.to_string(),
                            (i as f64, correct_pct + incorrect_pct / 2.0),
                            count_style.clone(),
                        )
                    }),
            )
            .map_err(|e| anyhow!("failed to draw incorrect counts: {e}"))?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8).filled())
            .border_style(BLACK.stroke_width(1))
            .label_font(("sans-serif", 18))
            .draw()
            .map_err(|e| anyhow!("failed to draw chart legend: {e}"))?;

        root.present()
            .map_err(|e| anyhow!("failed to finalise chart: {e}"))?;
    }
    log::debug!("rendered accuracy chart ({} bars)", series.len());
    ImageSource::from_rgb8(raw, WIDTH, HEIGHT)
}
