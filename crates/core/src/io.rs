//! Capability traits decoupling the walker and generators from the
//! concrete file formats, so both can run against fakes in tests.

use crate::caption::CaptionKind;
use crate::error::Result;
use crate::types::{OutlineItem, SlideEntry};
use std::path::Path;

/// Reads slide titles and page numbers out of one presentation file.
pub trait DeckReader {
    /// Return one entry per slide, in slide order. Slides without a
    /// title placeholder yield an entry with an empty title.
    fn read_deck(&self, path: &Path) -> Result<Vec<SlideEntry>>;
}

/// Renders a classified outline into a styled document on disk.
pub trait OutlineWriter {
    fn write_outline(&self, path: &Path, caption: CaptionKind, items: &[OutlineItem])
        -> Result<()>;
}
