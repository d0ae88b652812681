//! Domain types for slide index and outline generation.

use serde::{Deserialize, Serialize};

/// One slide's contribution to an index: its title text and page number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideEntry {
    /// Cleaned title text (line breaks and tabs stripped, NFC form).
    /// Empty when the slide has no title placeholder.
    pub title: String,

    /// 1-based slide number, as shown on the slide.
    pub page_number: u32,
}

impl SlideEntry {
    /// Create a new entry.
    pub fn new(title: impl Into<String>, page_number: u32) -> Self {
        Self {
            title: title.into(),
            page_number,
        }
    }

    /// Whether the slide carries a usable title.
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// The format of the source presentation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckFormat {
    /// Modern PPTX (Office Open XML).
    Pptx,
    /// Legacy PPT (OLE/CFB binary).
    Ppt,
}

impl DeckFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pptx" | "pptm" => Some(Self::Pptx),
            "ppt" => Some(Self::Ppt),
            _ => None,
        }
    }

    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        // PPTX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Pptx);
        }

        // PPT is an OLE/CFB file (D0 CF 11 E0 A1 B1 1A E1)
        if bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]) {
            return Some(Self::Ppt);
        }

        None
    }
}

/// Structural depth assigned to a slide title for TOC rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutlineLevel {
    Chapter,
    Section,
    Subsection,
}

/// One classified slide title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: OutlineLevel,
    pub title: String,
    pub page_number: u32,
}

/// One rendered unit of a TOC body, in slide order.
///
/// `Separator` is the blank spacer paragraph emitted before a chapter
/// heading that is not the first item of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutlineItem {
    Separator,
    Entry(OutlineEntry),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DeckFormat::from_extension("pptx"), Some(DeckFormat::Pptx));
        assert_eq!(DeckFormat::from_extension("PPTX"), Some(DeckFormat::Pptx));
        assert_eq!(DeckFormat::from_extension("pptm"), Some(DeckFormat::Pptx));
        assert_eq!(DeckFormat::from_extension("ppt"), Some(DeckFormat::Ppt));
        assert_eq!(DeckFormat::from_extension("docx"), None);
    }

    #[test]
    fn test_format_from_magic() {
        assert_eq!(
            DeckFormat::from_magic(&[0x50, 0x4B, 0x03, 0x04, 0x14, 0x00]),
            Some(DeckFormat::Pptx)
        );
        assert_eq!(
            DeckFormat::from_magic(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]),
            Some(DeckFormat::Ppt)
        );
        assert_eq!(DeckFormat::from_magic(b"not a deck"), None);
        assert_eq!(DeckFormat::from_magic(&[0x50, 0x4B]), None);
    }

    #[test]
    fn test_has_title() {
        assert!(SlideEntry::new("1.2 Background", 3).has_title());
        assert!(!SlideEntry::new("", 4).has_title());
        assert!(!SlideEntry::new("   ", 5).has_title());
    }
}
