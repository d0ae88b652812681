//! TOC document generation.

use crate::walk::Generator;
use slidetoc_core::{build_outline, CaptionKind, OutlineWriter, Result, SlideEntry};
use slidetoc_docx::TocDocxWriter;
use std::path::Path;

/// Writes `<base>.toc.docx`: the classified outline rendered by the
/// DOCX writer, with a caption picked from the output base name.
#[derive(Debug, Default)]
pub struct TocGenerator {
    writer: TocDocxWriter,
}

impl TocGenerator {
    /// Create a new TOC generator.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Generator for TocGenerator {
    fn output_suffix(&self) -> &'static str {
        ".toc.docx"
    }

    fn generate(&self, entries: &[SlideEntry], output: &Path) -> Result<()> {
        let caption = output
            .file_stem()
            .and_then(|s| s.to_str())
            .map(CaptionKind::from_base_name)
            .unwrap_or(CaptionKind::Generic);

        let items = build_outline(entries);
        self.writer.write_outline(output, caption, &items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_docx_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("lecture_main.toc.docx");

        let entries = vec![
            SlideEntry::new("第1章 はじめに", 1),
            SlideEntry::new("1.1 概要", 2),
            SlideEntry::new("", 3),
        ];
        TocGenerator::new().generate(&entries, &output).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]));
    }
}
