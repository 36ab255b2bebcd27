//! Bill output: PDF documents and text previews.

mod pdf;
mod preview;

pub use pdf::{export_pdf, render_pdf, write_pdf};
pub use preview::render_preview;
