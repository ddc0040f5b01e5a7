//! Instruction prompt for synthesising form field values.
//!
//! Kept in one place so tests can inspect it without a live model, and so
//! a change of wording is a one-line diff. Note that Result Files written
//! under an older prompt are NOT regenerated when this text changes: a page
//! is skipped whenever its Result File exists.

/// Instruction sent with every page screenshot.
///
/// Used when `SynthConfig::prompt` is left at its default.
pub const FIELD_VALUES_PROMPT: &str = "You are given a screenshot of a PDF form page. \
Return ONLY plain text lines in the format `Field Name: Value` \
for each fillable field visible on this page. \
Generate fictional but realistic synthetic values. \
Do not include fields that are not visible on this page. \
Do not add any extra commentary or formatting.";
