//! Page classification: does a page carry fillable form fields?
//!
//! Any widget annotation qualifies a page. Widget type, visibility and
//! required/optional flags are not considered.

use pdfium_render::prelude::*;

/// Number of form widgets pdfium reports for `page`.
pub fn widget_count(page: &PdfPage) -> usize {
    page.annotations()
        .iter()
        .filter(|annotation| is_widget(annotation.annotation_type()))
        .count()
}

/// True iff `page` exposes at least one form widget.
pub fn has_fields(page: &PdfPage) -> bool {
    page.annotations()
        .iter()
        .any(|annotation| is_widget(annotation.annotation_type()))
}

/// Widget annotations (AcroForm and XFA) are the interactive fields.
pub fn is_widget(kind: PdfPageAnnotationType) -> bool {
    matches!(
        kind,
        PdfPageAnnotationType::Widget | PdfPageAnnotationType::XfaWidget
    )
}
