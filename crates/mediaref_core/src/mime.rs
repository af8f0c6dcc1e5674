//! Coarse media categories derived from file extensions.

/// Media category of an asset.
///
/// Shortcuts are handed out per class, so the class also decides which
/// shortcut letter an asset gets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum MimeClass {
    /// Audio content (MP3, M4A, FLAC, ...)
    #[display("audio")]
    Audio,
    /// Video content (MP4, WebM, ...)
    #[display("video")]
    Video,
    /// Image content (JPEG, PNG, ...)
    #[display("image")]
    Image,
    /// Textual content (PDF, plain text, ...)
    #[display("document")]
    Document,
}

const EXTENSIONS: &[(&str, MimeClass)] = &[
    ("mp3", MimeClass::Audio),
    ("m4a", MimeClass::Audio),
    ("wav", MimeClass::Audio),
    ("flac", MimeClass::Audio),
    ("ogg", MimeClass::Audio),
    ("opus", MimeClass::Audio),
    ("mp4", MimeClass::Video),
    ("webm", MimeClass::Video),
    ("mkv", MimeClass::Video),
    ("mov", MimeClass::Video),
    ("jpg", MimeClass::Image),
    ("jpeg", MimeClass::Image),
    ("png", MimeClass::Image),
    ("gif", MimeClass::Image),
    ("svg", MimeClass::Image),
    ("webp", MimeClass::Image),
    ("pdf", MimeClass::Document),
    ("txt", MimeClass::Document),
    ("md", MimeClass::Document),
    ("tex", MimeClass::Document),
];

impl MimeClass {
    /// Map a file extension (without the dot, any case) to its class.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediaref_core::MimeClass;
    ///
    /// assert_eq!(MimeClass::from_extension("M4A"), Some(MimeClass::Audio));
    /// assert_eq!(MimeClass::from_extension("xyz"), None);
    /// ```
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.to_lowercase();
        EXTENSIONS
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, class)| *class)
    }

    /// Audio and video can be played.
    pub fn is_playable(&self) -> bool {
        matches!(self, MimeClass::Audio | MimeClass::Video)
    }

    /// Images and video can be shown.
    pub fn is_visible(&self) -> bool {
        matches!(self, MimeClass::Image | MimeClass::Video)
    }

    /// Letter used in keyboard shortcuts; documents get none.
    pub fn shortcut_letter(&self) -> Option<char> {
        match self {
            MimeClass::Audio => Some('a'),
            MimeClass::Video => Some('v'),
            MimeClass::Image => Some('i'),
            MimeClass::Document => None,
        }
    }

    /// Lower-case name, e.g. for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            MimeClass::Audio => "audio",
            MimeClass::Video => "video",
            MimeClass::Image => "image",
            MimeClass::Document => "document",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_class_has_an_extension() {
        for class in MimeClass::iter() {
            assert!(EXTENSIONS.iter().any(|(_, c)| *c == class), "{}", class);
        }
    }

    #[test]
    fn test_only_documents_lack_shortcut_letter() {
        for class in MimeClass::iter() {
            assert_eq!(
                class.shortcut_letter().is_none(),
                class == MimeClass::Document
            );
        }
    }
}
