//! Image encoding: PNG bytes → base64 `ImageData` for the vision request.
//!
//! The screenshot is already a PNG on disk, so no re-encoding happens here;
//! the bytes are base64-wrapped and tagged `image/png` so the provider sends
//! them as a `data:image/png;base64,…` URI.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use edgequake_llm::ImageData;
use tracing::debug;

pub const PNG_MIME: &str = "image/png";

/// Wrap PNG bytes as base64 image data.
pub fn encode_png(png: &[u8]) -> ImageData {
    let b64 = STANDARD.encode(png);
    debug!("Encoded screenshot → {} bytes base64", b64.len());
    ImageData::new(b64, PNG_MIME)
}
