//! Formatted TOC document rendering.
//!
//! Turns a classified outline into a .docx file: one paragraph per
//! outline item, a caption header, and a page-number footer.

pub mod writer;

pub use writer::TocDocxWriter;
