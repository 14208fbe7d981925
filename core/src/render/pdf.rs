use super::ImageSource;
use anyhow::{anyhow, Context, Result};
use printpdf::image_crate::GenericImageView;
use printpdf::{BuiltinFont, Image, ImageTransform, Mm, PdfDocument, PdfLayerReference};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub const REPORT_TITLE: &str = "Say Banana Report";

// US letter, coordinates in points from the bottom-left corner. The layout
// is a fixed contract with the report consumers, not user-configurable.
const PAGE_WIDTH_PT: f32 = 612.0;
const PAGE_HEIGHT_PT: f32 = 792.0;
const PT_TO_MM: f32 = 25.4 / 72.0;
const IMAGE_DPI: f32 = 300.0;

const TITLE_FONT_SIZE: f32 = 22.0;
const TEXT_FONT_SIZE: f32 = 12.0;
// Rough Helvetica advance; printpdf carries no metrics for builtin fonts.
const AVG_GLYPH_WIDTH: f32 = 0.5;

const TITLE_Y_PT: f32 = 725.0;
const GENERATED_AT_PT: (f32, f32) = (50.0, 675.0);
const UID_AT_PT: (f32, f32) = (50.0, 650.0);
const CHART_AT_PT: (f32, f32) = (40.0, 420.0);
const CHART_MAX_WIDTH_PT: f32 = 520.0;
const TABLE_AT_PT: (f32, f32) = (40.0, 200.0);
const TABLE_MAX_WIDTH_PT: f32 = 570.0;

fn mm(pt: f32) -> Mm {
    Mm((pt * PT_TO_MM).into())
}

/// Assembles the single-page report: centred title, generation date, player
/// uid, the accuracy chart and the word table. Nothing is written on failure.
pub fn assemble_report(
    uid: &str,
    generated_on: &str,
    chart: &ImageSource,
    table: &ImageSource,
    output: &Path,
) -> Result<()> {
    let (doc, page, layer) = PdfDocument::new(
        REPORT_TITLE,
        mm(PAGE_WIDTH_PT),
        mm(PAGE_HEIGHT_PT),
        "report",
    );
    let layer = doc.get_page(page).get_layer(layer);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow!("failed to load builtin font: {e}"))?;

    let title_width_pt = REPORT_TITLE.len() as f32 * TITLE_FONT_SIZE * AVG_GLYPH_WIDTH;
    let title_x = (PAGE_WIDTH_PT - title_width_pt) / 2.0;
    layer.use_text(
        REPORT_TITLE,
        TITLE_FONT_SIZE.into(),
        mm(title_x),
        mm(TITLE_Y_PT),
        &font,
    );
    layer.use_text(
        format!("Date Generated:  {generated_on}"),
        TEXT_FONT_SIZE.into(),
        mm(GENERATED_AT_PT.0),
        mm(GENERATED_AT_PT.1),
        &font,
    );
    layer.use_text(
        format!("Player User ID:   {uid}"),
        TEXT_FONT_SIZE.into(),
        mm(UID_AT_PT.0),
        mm(UID_AT_PT.1),
        &font,
    );

    place_image(&layer, chart, CHART_AT_PT, Some(CHART_MAX_WIDTH_PT), None)?;
    place_image(&layer, table, TABLE_AT_PT, Some(TABLE_MAX_WIDTH_PT), None)?;

    let file = File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| anyhow!("failed to write PDF: {e}"))?;
    log::debug!("wrote report for {uid} to {}", output.display());
    Ok(())
}

/// Draws an image with its lower-left corner at `at_pt`, scaled down to fit
/// the given maximum width/height while preserving aspect ratio.
fn place_image(
    layer: &PdfLayerReference,
    source: &ImageSource,
    at_pt: (f32, f32),
    max_width_pt: Option<f32>,
    max_height_pt: Option<f32>,
) -> Result<()> {
    let raster = source.to_image()?;
    let (width_px, height_px) = raster.dimensions();
    let native_width_pt = width_px as f32 * 72.0 / IMAGE_DPI;
    let native_height_pt = height_px as f32 * 72.0 / IMAGE_DPI;

    let scale = match (max_width_pt, max_height_pt) {
        (Some(max_w), Some(max_h)) => (max_w / native_width_pt).min(max_h / native_height_pt),
        (Some(max_w), None) => max_w / native_width_pt,
        (None, Some(max_h)) => max_h / native_height_pt,
        (None, None) => 1.0,
    };

    let image = Image::from_dynamic_image(&raster);
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(mm(at_pt.0)),
            translate_y: Some(mm(at_pt.1)),
            scale_x: Some(scale.into()),
            scale_y: Some(scale.into()),
            dpi: Some(IMAGE_DPI.into()),
            ..Default::default()
        },
    );
    Ok(())
}
