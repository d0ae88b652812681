//! PPTX file parser implementation.

use quick_xml::events::Event;
use quick_xml::Reader;
use slidetoc_core::{clean_title, Error, Result, SlideEntry};
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PPTX file from a reader, returning one entry per slide
    /// in presentation order.
    pub fn parse<R: Read + Seek>(&self, reader: R) -> Result<Vec<SlideEntry>> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::Zip(format!("Failed to open ZIP: {}", e)))?;

        let slide_order = self.slide_order(&mut archive)?;
        if slide_order.is_empty() {
            log::warn!("no slides found in presentation relationships");
        }

        let mut entries = Vec::with_capacity(slide_order.len());
        for (idx, slide_path) in slide_order.iter().enumerate() {
            let xml = self.read_archive_file(&mut archive, slide_path)?;
            let title = self.extract_title(&xml)?.unwrap_or_default();
            entries.push(SlideEntry::new(clean_title(&title), (idx + 1) as u32));
        }

        Ok(entries)
    }

    /// Get the ordered list of slide part paths from the presentation
    /// relationships.
    fn slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels = self.read_archive_file(archive, "ppt/_rels/presentation.xml.rels")?;

        let mut slides: Vec<(String, Option<usize>)> = Vec::new();
        let mut reader = Reader::from_str(&rels);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let mut rel_type = String::new();
                    let mut target = String::new();
                    let mut id = String::new();

                    for attr in e.attributes().flatten() {
                        let value = String::from_utf8_lossy(&attr.value).to_string();
                        match attr.key.as_ref() {
                            b"Type" => rel_type = value,
                            b"Target" => target = value,
                            b"Id" => id = value,
                            _ => {}
                        }
                    }

                    if is_slide_relationship(&rel_type) {
                        // Relationship ids carry the authoring order.
                        let order = parse_trailing_number(&id)
                            .or_else(|| parse_trailing_number(&target));
                        slides.push((resolve_part_path(&target), order));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!("Error parsing relationships: {}", e)));
                }
                _ => {}
            }
        }

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Extract the title placeholder text from one slide's XML.
    ///
    /// The title is the text body of the shape whose placeholder type
    /// is `title` or `ctrTitle`. Paragraphs within the placeholder are
    /// joined with a newline (flattened later by title cleanup).
    fn extract_title(&self, xml: &str) -> Result<Option<String>> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut in_shape = false;
        let mut is_title_shape = false;
        let mut in_text_body = false;
        let mut text = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                    b"sp" => {
                        in_shape = true;
                        is_title_shape = false;
                        text.clear();
                    }
                    b"ph" if in_shape => {
                        if placeholder_is_title(e.attributes().flatten()) {
                            is_title_shape = true;
                        }
                    }
                    b"txBody" if in_shape => in_text_body = true,
                    b"p" if in_text_body && !text.is_empty() => text.push('\n'),
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => {
                    if local_name(e.name().as_ref()) == b"ph"
                        && in_shape
                        && placeholder_is_title(e.attributes().flatten())
                    {
                        is_title_shape = true;
                    }
                }
                Ok(Event::Text(ref e)) => {
                    if in_text_body && is_title_shape {
                        let fragment = e
                            .unescape()
                            .map_err(|err| Error::Xml(format!("Bad slide text: {}", err)))?;
                        text.push_str(&fragment);
                    }
                }
                Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                    b"sp" => {
                        if is_title_shape && !text.trim().is_empty() {
                            return Ok(Some(text));
                        }
                        in_shape = false;
                        is_title_shape = false;
                    }
                    b"txBody" => in_text_body = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!("Error parsing slide: {}", e)));
                }
                _ => {}
            }
        }

        Ok(None)
    }

    /// Read a file from the ZIP archive as UTF-8 text.
    fn read_archive_file<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::Zip(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::Zip(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a relationship points at a slide part (not a layout, master,
/// or notes slide).
fn is_slide_relationship(rel_type: &str) -> bool {
    rel_type.ends_with("/slide")
}

/// Whether a `ph` element's attributes mark a title placeholder.
fn placeholder_is_title<'a, I>(attributes: I) -> bool
where
    I: Iterator<Item = quick_xml::events::attributes::Attribute<'a>>,
{
    for attr in attributes {
        if attr.key.as_ref() == b"type" {
            let value = String::from_utf8_lossy(&attr.value);
            return value == "title" || value == "ctrTitle";
        }
    }
    false
}

/// Extract the local name from a potentially namespaced element name.
fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Parse the number at the end of a string like "rId2" or "slide3.xml".
fn parse_trailing_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");
    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.chars().rev().collect::<String>().parse().ok()
}

/// Resolve a relationship target to a full path within the archive.
fn resolve_part_path(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target),
    }
}
