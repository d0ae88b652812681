//! Format auto-detection and dispatch to the concrete deck parsers.

use slidetoc_core::{DeckFormat, DeckReader, Error, Result, SlideEntry};
use slidetoc_ppt::PptParser;
use slidetoc_pptx::PptxParser;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Detects the deck format from magic bytes (with extension fallback)
/// and hands the file to the matching parser.
#[derive(Default)]
pub struct AutoDeckReader {
    pptx: PptxParser,
    ppt: PptParser,
}

impl AutoDeckReader {
    /// Create a new auto-detecting reader.
    pub fn new() -> Self {
        Self::default()
    }

    fn detect_format(path: &Path) -> Result<DeckFormat> {
        let mut file = File::open(path)?;
        let mut magic = [0u8; 8];
        let read = file.read(&mut magic)?;

        DeckFormat::from_magic(&magic[..read])
            .or_else(|| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .and_then(DeckFormat::from_extension)
            })
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))
    }
}

impl DeckReader for AutoDeckReader {
    fn read_deck(&self, path: &Path) -> Result<Vec<SlideEntry>> {
        let format = Self::detect_format(path)?;
        let reader = BufReader::new(File::open(path)?);

        match format {
            DeckFormat::Pptx => {
                log::debug!("parsing {} as PPTX", path.display());
                self.pptx.parse(reader)
            }
            DeckFormat::Ppt => {
                log::debug!("parsing {} as legacy PPT", path.display());
                self.ppt.parse(reader)
            }
        }
    }
}
