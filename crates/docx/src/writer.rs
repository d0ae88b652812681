//! TOC document writer implementation.

use docx_rs::{
    AlignmentType, Docx, FieldCharType, Footer, Header, InstrText, Paragraph, Run, Tab,
    TabLeaderType, TabValueType,
};
use slidetoc_core::{CaptionKind, Error, OutlineItem, OutlineLevel, OutlineWriter, Result};
use std::fs::File;
use std::path::Path;

/// Left indent per outline level, in twips.
const CHAPTER_INDENT: i32 = 0;
const SECTION_INDENT: i32 = 420;
const SUBSECTION_INDENT: i32 = 840;

/// Right indent shared by every entry, in twips.
const RIGHT_INDENT: i32 = 420;

/// Position of the dotted-leader tab stop carrying the page number,
/// in twips from the left margin.
const PAGE_TAB_POS: usize = 8400;

/// Writes `.toc.docx` documents: one paragraph per outline item, the
/// localized caption in the header, a page-number field in the footer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TocDocxWriter;

impl TocDocxWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self
    }

    /// One body paragraph for an outline entry: level indent, dotted
    /// tab leader, page number at the tab stop. Chapters are bold.
    fn entry_paragraph(level: OutlineLevel, title: &str, page_number: u32) -> Paragraph {
        let left_indent = match level {
            OutlineLevel::Chapter => CHAPTER_INDENT,
            OutlineLevel::Section => SECTION_INDENT,
            OutlineLevel::Subsection => SUBSECTION_INDENT,
        };

        let mut title_run = Run::new().add_text(title);
        let mut page_run = Run::new().add_tab().add_text(page_number.to_string());
        if level == OutlineLevel::Chapter {
            title_run = title_run.bold();
            page_run = page_run.bold();
        }

        Paragraph::new()
            .add_tab(
                Tab::new()
                    .val(TabValueType::Right)
                    .leader(TabLeaderType::Dot)
                    .pos(PAGE_TAB_POS),
            )
            .indent(Some(left_indent), None, Some(RIGHT_INDENT), None)
            .align(AlignmentType::Right)
            .add_run(title_run)
            .add_run(page_run)
    }

    /// The caption paragraph placed in the document header.
    fn header_paragraph(caption: CaptionKind) -> Paragraph {
        Paragraph::new()
            .align(AlignmentType::Right)
            .add_run(Run::new().add_text(caption.text()))
    }

    /// The footer paragraph: a centered PAGE field.
    fn footer_paragraph() -> Paragraph {
        Paragraph::new()
            .align(AlignmentType::Center)
            .add_run(Run::new().add_field_char(FieldCharType::Begin, false))
            .add_run(Run::new().add_instr_text(InstrText::Unsupported("PAGE".to_string())))
            .add_run(Run::new().add_field_char(FieldCharType::Separate, false))
            .add_run(Run::new().add_text("1"))
            .add_run(Run::new().add_field_char(FieldCharType::End, false))
    }
}

impl OutlineWriter for TocDocxWriter {
    fn write_outline(
        &self,
        path: &Path,
        caption: CaptionKind,
        items: &[OutlineItem],
    ) -> Result<()> {
        let mut docx = Docx::new()
            .header(Header::new().add_paragraph(Self::header_paragraph(caption)))
            .footer(Footer::new().add_paragraph(Self::footer_paragraph()));

        for item in items {
            let paragraph = match item {
                OutlineItem::Separator => Paragraph::new(),
                OutlineItem::Entry(entry) => {
                    Self::entry_paragraph(entry.level, &entry.title, entry.page_number)
                }
            };
            docx = docx.add_paragraph(paragraph);
        }

        log::debug!("writing {} outline items to {}", items.len(), path.display());

        let file = File::create(path)?;
        docx.build()
            .pack(file)
            .map_err(|e| Error::DocxWrite(e.to_string()))?;

        Ok(())
    }
}
