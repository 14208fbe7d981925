use super::{ImageSource, CORRECT_COLOUR, LIGHTGREY, WRONG_COLOUR};
use crate::service::project::{grid_words, GridColumn};
use anyhow::{anyhow, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

const WIDTH: u32 = 1500;
const LEFT: i32 = 220;
const RIGHT: i32 = 40;
const TOP: i32 = 90;
const BOTTOM: i32 = 80;
const ROW_HEIGHT: i32 = 44;

/// Fill colour for a cell: coral at 0% accuracy through teal at 100%.
fn heat_colour(accuracy_pct: f64) -> RGBColor {
    let t = (accuracy_pct / 100.0).clamp(0.0, 1.0);
    let channel = |from: u8, to: u8| {
        (f64::from(from) + (f64::from(to) - f64::from(from)) * t).round() as u8
    };
    RGBColor(
        channel(WRONG_COLOUR.0, CORRECT_COLOUR.0),
        channel(WRONG_COLOUR.1, CORRECT_COLOUR.1),
        channel(WRONG_COLOUR.2, CORRECT_COLOUR.2),
    )
}

/// Renders the word-by-date heatmap table. Rows are the sorted union of
/// words in the grid, columns the window days; days without activity show
/// as a blank column. Cell annotation is "correct✔ incorrect✘".
pub fn word_table(grid: &[GridColumn]) -> Result<ImageSource> {
    let words = grid_words(grid);
    let rows = words.len().max(1) as i32;
    let cols = grid.len().max(1) as i32;
    let height = (TOP + rows * ROW_HEIGHT + BOTTOM) as u32;
    let cell_width = (WIDTH as i32 - LEFT - RIGHT) / cols;
    let grey = RGBColor(LIGHTGREY.0, LIGHTGREY.1, LIGHTGREY.2);

    let mut raw = vec![0u8; (WIDTH * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut raw, (WIDTH, height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| anyhow!("failed to clear table canvas: {e}"))?;

        let centred = |size: u32| {
            TextStyle::from(("sans-serif", size).into_font())
                .pos(Pos::new(HPos::Center, VPos::Center))
        };
        let right_aligned = TextStyle::from(("sans-serif", 18).into_font())
            .pos(Pos::new(HPos::Right, VPos::Center));

        root.draw(&Text::new(
            "Accuracy by Word".to_string(),
            (WIDTH as i32 / 2, TOP / 2),
            centred(32),
        ))
        .map_err(|e| anyhow!("failed to draw table title: {e}"))?;

        for (row, word) in words.iter().enumerate() {
            let y_centre = TOP + row as i32 * ROW_HEIGHT + ROW_HEIGHT / 2;
            root.draw(&Text::new(
                word.clone(),
                (LEFT - 12, y_centre),
                right_aligned.clone(),
            ))
            .map_err(|e| anyhow!("failed to draw word label: {e}"))?;
        }

        for (col, column) in grid.iter().enumerate() {
            let x0 = LEFT + col as i32 * cell_width;
            let x1 = x0 + cell_width;

            root.draw(&Text::new(
                column.label.clone(),
                (x0 + cell_width / 2, TOP + rows * ROW_HEIGHT + 24),
                centred(16),
            ))
            .map_err(|e| anyhow!("failed to draw date label: {e}"))?;

            for (row, word) in words.iter().enumerate() {
                let y0 = TOP + row as i32 * ROW_HEIGHT;
                let y1 = y0 + ROW_HEIGHT;
                if let Some(stat) = column.cells.get(word) {
                    root.draw(&Rectangle::new(
                        [(x0, y0), (x1, y1)],
                        heat_colour(stat.accuracy_pct).filled(),
                    ))
                    .map_err(|e| anyhow!("failed to fill cell: {e}"))?;
                    root.draw(&Text::new(
                        format!("{}\u{2714} {}\u{2718}", stat.correct, stat.incorrect),
                        ((x0 + x1) / 2, (y0 + y1) / 2),
                        centred(15),
                    ))
                    .map_err(|e| anyhow!("failed to annotate cell: {e}"))?;
                }
                // blank cells keep the grid line only
                root.draw(&Rectangle::new([(x0, y0), (x1, y1)], grey.stroke_width(1)))
                    .map_err(|e| anyhow!("failed to draw cell border: {e}"))?;
            }
        }

        root.draw(&Text::new(
            "Last 14 Days from Most Recent Activity".to_string(),
            (LEFT + (WIDTH as i32 - LEFT - RIGHT) / 2, height as i32 - 20),
            centred(20),
        ))
        .map_err(|e| anyhow!("failed to draw axis label: {e}"))?;

        root.present()
            .map_err(|e| anyhow!("failed to finalise table: {e}"))?;
    }
    log::debug!(
        "rendered word table ({} words x {} days)",
        words.len(),
        grid.len()
    );
    ImageSource::from_rgb8(raw, WIDTH, height)
}
