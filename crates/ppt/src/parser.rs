//! PPT file parser implementation.
//!
//! PowerPoint 97-2003 files are OLE/CFB containers whose "PowerPoint
//! Document" stream holds a tree of records. Every record starts with
//! an 8-byte header (version/instance, type, length); a record with
//! version 0xF is a container whose payload is more records.
//!
//! Title extraction walks that tree: RT_SlidePersistAtom marks slide
//! boundaries inside the slide list, RT_TextHeaderAtom announces the
//! kind of the next text atom, and RT_TextCharsAtom / RT_TextBytesAtom
//! carry the text itself.

use cfb::CompoundFile;
use slidetoc_core::{clean_title, Error, Result, SlideEntry};
use std::io::{Read, Seek};

/// Minimum stream size for a valid PPT file (bytes).
const MIN_STREAM_SIZE: usize = 512;

/// Record type constants from MS-PPT.
mod record_types {
    pub const RT_DOCUMENT: u16 = 0x1388;
    pub const RT_SLIDE_PERSIST_ATOM: u16 = 0x03F0;
    pub const RT_TEXT_HEADER_ATOM: u16 = 0x0F9F;
    pub const RT_TEXT_CHARS_ATOM: u16 = 0x0FA0;
    pub const RT_TEXT_BYTES_ATOM: u16 = 0x0FA8;
}

/// Text kinds from RT_TextHeaderAtom. Only title kinds matter here.
const TEXT_KIND_TITLE: u32 = 0;
const TEXT_KIND_CENTER_TITLE: u32 = 6;

fn is_title_kind(kind: u32) -> bool {
    kind == TEXT_KIND_TITLE || kind == TEXT_KIND_CENTER_TITLE
}

/// Parser for legacy PPT (OLE/CFB) files.
pub struct PptParser;

impl PptParser {
    /// Create a new PPT parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PPT file from a reader, returning one entry per titled
    /// slide in slide order.
    pub fn parse<R: Read + Seek>(&self, reader: R) -> Result<Vec<SlideEntry>> {
        let mut cfb = CompoundFile::open(reader)
            .map_err(|e| Error::Cfb(format!("Failed to open CFB container: {}", e)))?;

        let has_document_stream = cfb
            .walk()
            .any(|entry| entry.path().to_string_lossy() == "/PowerPoint Document");
        if !has_document_stream {
            return Err(Error::UnsupportedFormat(
                "Missing 'PowerPoint Document' stream. This may not be a valid PPT file \
                 or may be a different Office format."
                    .to_string(),
            ));
        }

        let mut stream = cfb
            .open_stream("/PowerPoint Document")
            .map_err(|e| Error::Cfb(format!("Failed to open PowerPoint Document stream: {}", e)))?;
        let mut data = Vec::new();
        stream
            .read_to_end(&mut data)
            .map_err(|e| Error::Cfb(format!("Failed to read stream: {}", e)))?;

        self.extract_titles(&data)
    }

    /// Extract per-slide title entries from the raw stream.
    fn extract_titles(&self, data: &[u8]) -> Result<Vec<SlideEntry>> {
        if data.len() < MIN_STREAM_SIZE {
            return Err(Error::Corrupted(format!(
                "PowerPoint Document stream too small ({} bytes). File may be \
                 corrupted or truncated.",
                data.len()
            )));
        }

        let mut state = WalkState::default();
        walk_records(data, 0, data.len(), &mut state);

        if !state.has_document {
            return Err(Error::UnsupportedFormat(
                "No RT_Document record found. This file may use an unsupported \
                 PowerPoint format version (pre-97) or be corrupted."
                    .to_string(),
            ));
        }

        if state.titles.is_empty() {
            log::warn!("no slide titles found in PPT stream");
        }

        Ok(state
            .titles
            .into_iter()
            .map(|(slide, title)| SlideEntry::new(clean_title(&title), slide as u32))
            .collect())
    }
}

impl Default for PptParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulated results of one record-tree walk.
#[derive(Debug, Default)]
struct WalkState {
    has_document: bool,
    /// Kind announced by the most recent RT_TextHeaderAtom.
    pending_kind: u32,
    /// Number of RT_SlidePersistAtom records seen so far. Persist atoms
    /// precede their slide's text in the slide list, so this doubles as
    /// the 1-based slide number; zero means document/master level text.
    slide_count: usize,
    /// (slide number, raw title) pairs, first title per slide.
    titles: Vec<(usize, String)>,
}

impl WalkState {
    fn record_title(&mut self, text: String) {
        // Text before the first persist atom belongs to the master or
        // document, not a slide.
        if self.slide_count == 0 {
            return;
        }
        if self.titles.last().map(|(slide, _)| *slide) == Some(self.slide_count) {
            return;
        }
        self.titles.push((self.slide_count, text));
    }
}

/// Walk the record tree between `start` and `end`, recursing into
/// containers.
fn walk_records(data: &[u8], start: usize, end: usize, state: &mut WalkState) {
    let mut pos = start;

    while pos + 8 <= end {
        let ver_instance = read_u16_le(data, pos);
        let rec_type = read_u16_le(data, pos + 2);
        let rec_len = read_u32_le(data, pos + 4) as usize;

        let rec_ver = ver_instance & 0x0F;
        let content_start = pos + 8;
        let content_end = content_start + rec_len;

        if content_end > end || content_end > data.len() {
            // Record extends past its parent, stop parsing this level.
            break;
        }

        match rec_type {
            record_types::RT_DOCUMENT => {
                state.has_document = true;
            }
            record_types::RT_SLIDE_PERSIST_ATOM => {
                state.slide_count += 1;
            }
            record_types::RT_TEXT_HEADER_ATOM => {
                if rec_len >= 4 {
                    state.pending_kind = read_u32_le(data, content_start);
                }
            }
            record_types::RT_TEXT_CHARS_ATOM => {
                if is_title_kind(state.pending_kind) {
                    if let Some(text) = decode_utf16_text(&data[content_start..content_end]) {
                        state.record_title(text);
                    }
                }
            }
            record_types::RT_TEXT_BYTES_ATOM => {
                if is_title_kind(state.pending_kind) {
                    if let Some(text) = decode_byte_text(&data[content_start..content_end]) {
                        state.record_title(text);
                    }
                }
            }
            _ => {}
        }

        // Containers hold more records.
        if rec_ver == 0x0F {
            walk_records(data, content_start, content_end, state);
        }

        pos = content_end;
    }
}

/// Decode an RT_TextCharsAtom payload (UTF-16LE, optionally
/// null-terminated).
fn decode_utf16_text(payload: &[u8]) -> Option<String> {
    if payload.is_empty() || payload.len() % 2 != 0 {
        return None;
    }

    let units: Vec<u16> = payload
        .chunks_exact(2)
        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
        .collect();

    let text: String = char::decode_utf16(units.iter().copied())
        .take_while(|r| r.as_ref().map(|&c| c != '\0').unwrap_or(false))
        .filter_map(|r| r.ok())
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Decode an RT_TextBytesAtom payload. The format stores the low bytes
/// of UTF-16 code units with the high bytes dropped, so each byte maps
/// directly to the code point of the same value.
fn decode_byte_text(payload: &[u8]) -> Option<String> {
    if payload.is_empty() {
        return None;
    }

    let end = payload.iter().position(|&b| b == 0).unwrap_or(payload.len());
    let text: String = payload[..end]
        .iter()
        .map(|&b| char::from_u32(b as u32).unwrap_or('\u{FFFD}'))
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Read a little-endian u16 from a byte slice.
fn read_u16_le(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

/// Read a little-endian u32 from a byte slice.
fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}
