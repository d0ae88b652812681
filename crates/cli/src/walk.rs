//! Directory traversal with incremental skip.
//!
//! Walks a root directory for presentation files and regenerates each
//! one's output unless the output is already fresh. Processing is
//! strictly sequential; the first failure aborts the remaining run.

use anyhow::{Context, Result};
use slidetoc_core::{DeckReader, SlideEntry};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files whose path contains this marker are source material, never
/// inputs.
const EXCLUDE_MARKER: &str = "reference";

/// Extensions recognized as presentation files.
const DECK_EXTENSIONS: &[&str] = &["ppt", "pptx", "pptm"];

/// One output flavor: knows its output suffix and how to render one
/// deck's entries.
pub trait Generator {
    /// Suffix appended to the input base name, e.g. ".index.txt".
    fn output_suffix(&self) -> &'static str;

    /// Render one deck's entries to the output path.
    fn generate(&self, entries: &[SlideEntry], output: &Path) -> slidetoc_core::Result<()>;
}

/// Counts of what a run did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub generated: usize,
    pub skipped: usize,
}

/// Walk `root` and regenerate every stale output.
pub fn process_tree<G: Generator>(
    root: &Path,
    reader: &dyn DeckReader,
    generator: &G,
) -> Result<Summary> {
    let mut summary = Summary::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let input = entry.path();
        if !is_deck_file(input) || is_excluded(input) {
            continue;
        }

        let output = output_path(input, generator.output_suffix());
        if is_fresh(input, &output)? {
            println!("skipping {}", input.display());
            summary.skipped += 1;
            continue;
        }

        println!("extracting {}", input.display());
        let entries = reader
            .read_deck(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        generator
            .generate(&entries, &output)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("completed {}", output.display());
        summary.generated += 1;
    }

    Ok(summary)
}

fn is_deck_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| DECK_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn is_excluded(path: &Path) -> bool {
    path.to_string_lossy().contains(EXCLUDE_MARKER)
}

/// `<dir>/<base><suffix>`, next to the input.
fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let file_name = format!("{stem}{suffix}");

    match input.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Freshness check: the output exists and is not older than the input.
///
/// Compares modification timestamps only, never content; an input whose
/// bytes changed without its mtime advancing is treated as unchanged.
fn is_fresh(input: &Path, output: &Path) -> Result<bool> {
    let output_meta = match std::fs::metadata(output) {
        Ok(meta) => meta,
        Err(_) => return Ok(false),
    };
    let input_meta = std::fs::metadata(input)
        .with_context(|| format!("Failed to stat {}", input.display()))?;

    Ok(output_meta.modified()? >= input_meta.modified()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidetoc_core::Result as CoreResult;
    use std::cell::RefCell;
    use std::fs;
    use std::time::{Duration, SystemTime};

    /// Serves canned entries and records which paths were read.
    #[derive(Default)]
    struct FakeReader {
        calls: RefCell<Vec<PathBuf>>,
    }

    impl DeckReader for FakeReader {
        fn read_deck(&self, path: &Path) -> CoreResult<Vec<SlideEntry>> {
            self.calls.borrow_mut().push(path.to_path_buf());
            Ok(vec![SlideEntry::new("第1章 概要", 1)])
        }
    }

    /// Writes a fixed marker so tests can tell outputs were produced.
    struct FakeGenerator;

    impl Generator for FakeGenerator {
        fn output_suffix(&self) -> &'static str {
            ".index.txt"
        }

        fn generate(&self, _entries: &[SlideEntry], output: &Path) -> CoreResult<()> {
            fs::write(output, "generated")?;
            Ok(())
        }
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("/a/b/deck.pptx"), ".index.txt"),
            PathBuf::from("/a/b/deck.index.txt")
        );
        assert_eq!(
            output_path(Path::new("/a/b/deck.pptx"), ".toc.docx"),
            PathBuf::from("/a/b/deck.toc.docx")
        );
    }

    #[test]
    fn test_is_deck_file() {
        assert!(is_deck_file(Path::new("x.pptx")));
        assert!(is_deck_file(Path::new("x.PPTX")));
        assert!(is_deck_file(Path::new("x.pptm")));
        assert!(is_deck_file(Path::new("x.ppt")));
        assert!(!is_deck_file(Path::new("x.docx")));
        assert!(!is_deck_file(Path::new("x.index.txt")));
        assert!(!is_deck_file(Path::new("pptx")));
    }

    #[test]
    fn test_excluded_paths_are_never_processed() {
        let dir = tempfile::tempdir().unwrap();
        let reference_dir = dir.path().join("reference");
        fs::create_dir(&reference_dir).unwrap();
        fs::write(reference_dir.join("old.pptx"), b"x").unwrap();
        fs::write(dir.path().join("deck.pptx"), b"x").unwrap();

        let reader = FakeReader::default();
        let summary = process_tree(dir.path(), &reader, &FakeGenerator).unwrap();

        assert_eq!(summary.generated, 1);
        let calls = reader.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].ends_with("deck.pptx"));
        assert!(!reference_dir.join("old.index.txt").exists());
    }

    #[test]
    fn test_second_run_skips_everything() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.pptx"), b"x").unwrap();
        fs::write(dir.path().join("b.pptx"), b"x").unwrap();

        let reader = FakeReader::default();
        let first = process_tree(dir.path(), &reader, &FakeGenerator).unwrap();
        assert_eq!(
            first,
            Summary {
                generated: 2,
                skipped: 0
            }
        );

        let second = process_tree(dir.path(), &reader, &FakeGenerator).unwrap();
        assert_eq!(
            second,
            Summary {
                generated: 0,
                skipped: 2
            }
        );
        // The reader was only consulted during the first run.
        assert_eq!(reader.calls.borrow().len(), 2);
    }

    #[test]
    fn test_stale_output_is_regenerated() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("deck.pptx");
        let output = dir.path().join("deck.index.txt");
        fs::write(&input, b"x").unwrap();
        fs::write(&output, "stale").unwrap();

        // Backdate the output so the input is newer.
        let old = SystemTime::now() - Duration::from_secs(60);
        fs::File::options()
            .write(true)
            .open(&output)
            .unwrap()
            .set_modified(old)
            .unwrap();

        let summary = process_tree(dir.path(), &FakeReader::default(), &FakeGenerator).unwrap();
        assert_eq!(summary.generated, 1);
        assert_eq!(fs::read_to_string(&output).unwrap(), "generated");
    }

    #[test]
    fn test_fresh_output_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("deck.pptx");
        let output = dir.path().join("deck.index.txt");
        fs::write(&output, "fresh").unwrap();
        fs::write(&input, b"x").unwrap();

        // Push the output ahead of the input.
        let ahead = SystemTime::now() + Duration::from_secs(60);
        fs::File::options()
            .write(true)
            .open(&output)
            .unwrap()
            .set_modified(ahead)
            .unwrap();

        let summary = process_tree(dir.path(), &FakeReader::default(), &FakeGenerator).unwrap();
        assert_eq!(
            summary,
            Summary {
                generated: 0,
                skipped: 1
            }
        );
        assert_eq!(fs::read_to_string(&output).unwrap(), "fresh");
    }
}
