//! Header/footer caption selection for generated TOC documents.

use serde::{Deserialize, Serialize};

/// Which caption a TOC document carries, chosen from its base name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptionKind {
    /// Base name contains "main": the main-volume caption.
    Main,
    /// Base name contains "appendix": the appendix caption.
    Appendix,
    /// Anything else: the generic caption.
    Generic,
}

impl CaptionKind {
    /// Pick the caption from an output file's base name.
    ///
    /// "main" takes precedence when a name carries both markers.
    pub fn from_base_name(base: &str) -> Self {
        let lower = base.to_lowercase();
        if lower.contains("main") {
            Self::Main
        } else if lower.contains("appendix") {
            Self::Appendix
        } else {
            Self::Generic
        }
    }

    /// Caption text placed in the document header.
    pub fn text(&self) -> &'static str {
        match self {
            Self::Main => "本編目次",
            Self::Appendix => "付録目次",
            Self::Generic => "目次",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base_name() {
        assert_eq!(CaptionKind::from_base_name("lecture_main"), CaptionKind::Main);
        assert_eq!(CaptionKind::from_base_name("Lecture_MAIN.toc"), CaptionKind::Main);
        assert_eq!(
            CaptionKind::from_base_name("lecture_appendix"),
            CaptionKind::Appendix
        );
        assert_eq!(CaptionKind::from_base_name("lecture01"), CaptionKind::Generic);
    }

    #[test]
    fn test_main_wins_over_appendix() {
        assert_eq!(
            CaptionKind::from_base_name("main_appendix"),
            CaptionKind::Main
        );
    }

    #[test]
    fn test_caption_text() {
        assert_eq!(CaptionKind::Main.text(), "本編目次");
        assert_eq!(CaptionKind::Appendix.text(), "付録目次");
        assert_eq!(CaptionKind::Generic.text(), "目次");
    }
}
