//! Page rasterisation: render one page to a PNG screenshot.
//!
//! Rendering always overwrites. Skipping already-finished pages is decided
//! one level up, from the Result File, so a screenshot left behind by an
//! interrupted run is simply redrawn.

use crate::error::SynthError;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::debug;

/// PDF user space is 72 points per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// Render `page` at `dpi` and write it to `target` as PNG.
///
/// `page_num` (1-indexed) only labels errors. Ancestor directories of
/// `target` are created as needed.
pub fn render_page_png(
    page: &PdfPage,
    page_num: usize,
    target: &Path,
    dpi: u32,
) -> Result<(), SynthError> {
    let render_config = PdfRenderConfig::new()
        .scale_page_by_factor(dpi as f32 / POINTS_PER_INCH)
        .render_form_data(true);

    let bitmap = page
        .render_with_config(&render_config)
        .map_err(|e| SynthError::RasterisationFailed {
            page: page_num,
            detail: format!("{:?}", e),
        })?;
    let image = bitmap.as_image();

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|source| SynthError::WriteFailed {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    image
        .save_with_format(target, image::ImageFormat::Png)
        .map_err(|e| SynthError::ImageWriteFailed {
            path: target.to_path_buf(),
            detail: e.to_string(),
        })?;

    debug!(
        "Rendered page {} → {}x{} px at {} DPI → {}",
        page_num,
        image.width(),
        image.height(),
        dpi,
        target.display()
    );
    Ok(())
}
