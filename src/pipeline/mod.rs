//! Pipeline stages for form-data synthesis.
//!
//! Each submodule implements one step, so it can be tested on its own.
//!
//! ## Data Flow
//!
//! ```text
//! extract:      input ──▶ classify ──▶ render ──▶ encode ──▶ llm
//!               (dir)     (widgets)    (PNG)      (base64)   (VLM)
//!
//! consolidate:  Result Files ──▶ layout ──▶ synthetic PDF
//! ```
//!
//! 1. [`input`]:    list and validate the input PDFs
//! 2. [`classify`]: count form widgets on a page
//! 3. [`render`]:   rasterise a page to a PNG screenshot
//! 4. [`encode`]:   base64-wrap the PNG for the multimodal request
//! 5. [`llm`]:      one vision call per page; the only network I/O
//! 6. [`layout`]:   wrap Result File text into a page's text box

pub mod classify;
pub mod encode;
pub mod input;
pub mod layout;
pub mod llm;
pub mod render;
