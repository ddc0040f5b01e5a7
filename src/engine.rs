//! pdfium-backed implementation of [`PdfBackend`].
//!
//! ## Library resolution
//!
//! [`bind_pdfium`] looks for the pdfium shared library in this order:
//!
//! 1. `PDFIUM_LIB_PATH`: an explicit path to `libpdfium.{so,dylib}` / `pdfium.dll`
//! 2. the current working directory
//! 3. the system library search path
//!
//! All pdfium calls happen on the calling thread. The pipeline is strictly
//! sequential, so nothing here is shared across tasks.

use crate::backend::{FormDocument, PdfBackend, TextPdfWriter};
use crate::error::SynthError;
use crate::pipeline::classify;
use crate::pipeline::layout::PageLayout;
use crate::pipeline::render;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::debug;

/// Bind to a pdfium shared library.
pub fn bind_pdfium() -> Result<Pdfium, SynthError> {
    if let Ok(path) = std::env::var("PDFIUM_LIB_PATH") {
        if !path.is_empty() {
            let bindings = Pdfium::bind_to_library(&path).map_err(|e| {
                SynthError::PdfiumBindingFailed(format!("PDFIUM_LIB_PATH={path}: {e:?}"))
            })?;
            debug!("Bound pdfium from PDFIUM_LIB_PATH={}", path);
            return Ok(Pdfium::new(bindings));
        }
    }

    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| SynthError::PdfiumBindingFailed(format!("{e:?}")))?;
    Ok(Pdfium::new(bindings))
}

/// [`PdfBackend`] over a bound pdfium library.
pub struct PdfiumBackend {
    pdfium: Pdfium,
}

impl PdfiumBackend {
    /// Bind pdfium via [`bind_pdfium`].
    pub fn bind() -> Result<Self, SynthError> {
        Ok(Self {
            pdfium: bind_pdfium()?,
        })
    }
}

impl PdfBackend for PdfiumBackend {
    fn open_form<'a>(&'a self, path: &Path) -> Result<Box<dyn FormDocument + 'a>, SynthError> {
        let document =
            self.pdfium
                .load_pdf_from_file(path, None)
                .map_err(|e| SynthError::CorruptPdf {
                    path: path.to_path_buf(),
                    detail: format!("{:?}", e),
                })?;
        debug!(
            "Opened {} ({} pages)",
            path.display(),
            document.pages().len()
        );
        Ok(Box::new(PdfiumForm { document }))
    }

    fn new_text_pdf<'a>(&'a self) -> Result<Box<dyn TextPdfWriter + 'a>, SynthError> {
        let mut document = self.pdfium.create_new_pdf().map_err(write_err)?;
        let font = document.fonts_mut().courier();
        Ok(Box::new(PdfiumTextPdf { document, font }))
    }
}

fn write_err(e: PdfiumError) -> SynthError {
    SynthError::PdfWriteFailed {
        detail: format!("{:?}", e),
    }
}

fn page_index_u16(page_index: usize) -> Result<u16, SynthError> {
    u16::try_from(page_index).map_err(|_| SynthError::PageAccessFailed {
        page: page_index + 1,
        detail: "page index exceeds pdfium limits".to_string(),
    })
}

struct PdfiumForm<'a> {
    document: PdfDocument<'a>,
}

impl<'a> PdfiumForm<'a> {
    fn page(&self, page_index: usize) -> Result<PdfPage<'a>, SynthError> {
        self.document
            .pages()
            .get(page_index_u16(page_index)?)
            .map_err(|e| SynthError::PageAccessFailed {
                page: page_index + 1,
                detail: format!("{:?}", e),
            })
    }
}

impl FormDocument for PdfiumForm<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn widget_count(&self, page_index: usize) -> Result<usize, SynthError> {
        Ok(classify::widget_count(&self.page(page_index)?))
    }

    fn has_fields(&self, page_index: usize) -> Result<bool, SynthError> {
        Ok(classify::has_fields(&self.page(page_index)?))
    }

    fn render_page(&self, page_index: usize, target: &Path, dpi: u32) -> Result<(), SynthError> {
        let page = self.page(page_index)?;
        render::render_page_png(&page, page_index + 1, target, dpi)
    }
}

struct PdfiumTextPdf<'a> {
    document: PdfDocument<'a>,
    font: PdfFontToken,
}

impl TextPdfWriter for PdfiumTextPdf<'_> {
    fn append_page(&mut self, layout: &PageLayout) -> Result<(), SynthError> {
        let font = self.font;
        let mut page = self
            .document
            .pages_mut()
            .create_page_at_end(PdfPagePaperSize::a4())
            .map_err(write_err)?;

        for line in layout.visible_lines() {
            page.objects_mut()
                .create_text_object(
                    PdfPoints::new(line.x),
                    PdfPoints::new(line.y),
                    &line.text,
                    font,
                    PdfPoints::new(layout.font_size),
                )
                .map_err(write_err)?;
        }
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page_text(&self, page_index: usize) -> Result<String, SynthError> {
        let page = self
            .document
            .pages()
            .get(page_index_u16(page_index)?)
            .map_err(write_err)?;
        let text = page.text().map_err(write_err)?;
        Ok(text.all())
    }

    fn delete_page(&mut self, page_index: usize) -> Result<(), SynthError> {
        self.document
            .pages()
            .get(page_index_u16(page_index)?)
            .map_err(write_err)?
            .delete()
            .map_err(write_err)
    }

    fn save(&mut self, path: &Path) -> Result<(), SynthError> {
        self.document.save_to_file(path).map_err(write_err)
    }
}
