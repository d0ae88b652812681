//! Outline classification for slide titles.
//!
//! Titles in the source decks follow a semi-structured numbering
//! convention ("3. 概要", "1.2 Background", "1.2.3 Detail", "第3章",
//! "付録A") but not universally. Classification is an ordered rule
//! table with a stateful fallback: once a subsection listing has
//! started, structurally unmatched titles continue at subsection depth
//! instead of failing closed.

use crate::types::{OutlineEntry, OutlineItem, OutlineLevel, SlideEntry};
use regex::Regex;
use std::sync::LazyLock;

/// Subsection numbering: "1.2.3 ..." or appendix-style "A.1.2 ...".
static SUBSECTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+|[A-Za-z])\.\d+\.\d+").unwrap());

/// Section numbering: "1.2 ..." or "A.1 ..." with no further numbering
/// component, or one of the fixed front-matter markers.
static SECTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:\d+|[A-Za-z])\.\d+(?:[^\d.]|$)|本章|目次|ねらい)").unwrap()
});

/// Chapter numbering: "第3章 ...", "3. ..." with no second component,
/// or a section-sign prefix.
static CHAPTER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:第\d+章|\d+\.(?:\D|$)|§)").unwrap());

/// Appendix marker, anywhere in the title.
static APPENDIX_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"付録").unwrap());

fn is_subsection(title: &str) -> bool {
    SUBSECTION_REGEX.is_match(title)
}

fn is_section(title: &str) -> bool {
    SECTION_REGEX.is_match(title)
}

fn is_chapter(title: &str) -> bool {
    CHAPTER_REGEX.is_match(title)
}

fn is_appendix(title: &str) -> bool {
    APPENDIX_REGEX.is_match(title)
}

/// The structural rules, in priority order. First match wins and sets
/// the "listing subsections" flag.
static RULES: &[(fn(&str) -> bool, OutlineLevel)] = &[
    (is_subsection, OutlineLevel::Subsection),
    (is_section, OutlineLevel::Section),
    (is_chapter, OutlineLevel::Chapter),
    (is_appendix, OutlineLevel::Chapter),
];

/// Classifies titles one at a time, carrying the continuation state of
/// the current listing across calls.
#[derive(Debug, Clone, Default)]
pub struct OutlineClassifier {
    listing_subsections: bool,
}

impl OutlineClassifier {
    /// Create a classifier with a cleared continuation flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one non-empty title.
    ///
    /// Priority table, evaluated top to bottom:
    ///
    /// | # | predicate                                | level      | flag  |
    /// |---|------------------------------------------|------------|-------|
    /// | 1 | starts `D.D.D` / `L.D.D`                 | Subsection | true  |
    /// | 2 | starts `D.D` / `L.D`, or 本章/目次/ねらい | Section    | true  |
    /// | 3 | starts `第D章` / `D.` / `§`              | Chapter    | true  |
    /// | 4 | contains 付録                             | Chapter    | true  |
    /// | 5 | flag is set                              | Subsection | kept  |
    /// | 6 | (default)                                | Section    | kept  |
    pub fn classify(&mut self, title: &str) -> OutlineLevel {
        for (matches, level) in RULES {
            if matches(title) {
                self.listing_subsections = true;
                return *level;
            }
        }

        if self.listing_subsections {
            OutlineLevel::Subsection
        } else {
            OutlineLevel::Section
        }
    }
}

/// Build the ordered outline for one deck.
///
/// Slides without a title produce nothing. A chapter heading that is
/// not the first emitted item is preceded by one blank separator.
pub fn build_outline(entries: &[SlideEntry]) -> Vec<OutlineItem> {
    let mut classifier = OutlineClassifier::new();
    let mut items = Vec::new();

    for entry in entries {
        if !entry.has_title() {
            continue;
        }

        let level = classifier.classify(&entry.title);
        if level == OutlineLevel::Chapter && !items.is_empty() {
            items.push(OutlineItem::Separator);
        }
        items.push(OutlineItem::Entry(OutlineEntry {
            level,
            title: entry.title.clone(),
            page_number: entry.page_number,
        }));
    }

    log::debug!("classified {} slides into {} outline items", entries.len(), items.len());

    items
}
