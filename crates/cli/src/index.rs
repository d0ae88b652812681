//! Plain-text index generation.

use crate::walk::Generator;
use slidetoc_core::{Result, SlideEntry};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `<base>.index.txt`: one `title<TAB>page` line per titled
/// slide, UTF-8.
#[derive(Debug, Default)]
pub struct IndexGenerator;

impl IndexGenerator {
    /// Create a new index generator.
    pub fn new() -> Self {
        Self
    }
}

impl Generator for IndexGenerator {
    fn output_suffix(&self) -> &'static str {
        ".index.txt"
    }

    fn generate(&self, entries: &[SlideEntry], output: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(output)?);

        for entry in entries {
            if !entry.has_title() {
                continue;
            }
            writeln!(writer, "{}\t{}", entry.title, entry.page_number)?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_tab_separated_lines() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("deck.index.txt");

        let entries = vec![
            SlideEntry::new("第1章 はじめに", 1),
            SlideEntry::new("1.1 概要", 2),
        ];
        IndexGenerator::new().generate(&entries, &output).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content, "第1章 はじめに\t1\n1.1 概要\t2\n");
    }

    #[test]
    fn test_untitled_slides_are_omitted() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("deck.index.txt");

        let entries = vec![
            SlideEntry::new("", 1),
            SlideEntry::new("1.1 概要", 2),
            SlideEntry::new("  ", 3),
        ];
        IndexGenerator::new().generate(&entries, &output).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content, "1.1 概要\t2\n");
    }
}
