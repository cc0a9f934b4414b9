//! Content classification for item payloads.
//!
//! Items carry an untyped `content` string. Encoded file references handed out
//! by the upstream messaging service start with a small set of fixed prefixes;
//! everything else is plain text. This is a prefix heuristic over opaque
//! payloads, not a format check: a text item that happens to begin with one of
//! the prefixes is classified as a file.

/// Literal payload prefixes that mark an item as a file reference.
pub const FILE_PREFIXES: [&str; 3] = ["BQA", "AgA", "CQA"];

/// Inferred kind of an item's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Encoded file reference; never rendered raw.
    File,
    /// Plain text, rendered escaped.
    Text,
}

impl ContentKind {
    /// Short tag shown next to item titles in lists.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::File => "ملف",
            Self::Text => "نص",
        }
    }
}

/// Classifies an item payload by its literal prefix.
///
/// Total over all inputs; the empty string is [`ContentKind::Text`].
///
/// ```
/// use maktaba::domain::{classify, ContentKind};
///
/// assert_eq!(classify("BQAxyz"), ContentKind::File);
/// assert_eq!(classify("hello"), ContentKind::Text);
/// assert_eq!(classify(""), ContentKind::Text);
/// ```
#[must_use]
pub fn classify(content: &str) -> ContentKind {
    if FILE_PREFIXES.iter().any(|prefix| content.starts_with(prefix)) {
        ContentKind::File
    } else {
        ContentKind::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_prefix_is_a_file() {
        for prefix in FILE_PREFIXES {
            assert_eq!(classify(prefix), ContentKind::File, "{prefix}");
            assert_eq!(classify(&format!("{prefix}ACAgQAAxkBAAI")), ContentKind::File);
        }
    }

    #[test]
    fn prefix_must_be_at_the_start() {
        assert_eq!(classify("xBQA"), ContentKind::Text);
        assert_eq!(classify(" AgA"), ContentKind::Text);
        assert_eq!(classify("bqa lowercase"), ContentKind::Text);
    }

    #[test]
    fn partial_prefix_is_text() {
        assert_eq!(classify("BQ"), ContentKind::Text);
        assert_eq!(classify("C"), ContentKind::Text);
        assert_eq!(classify(""), ContentKind::Text);
    }

    #[test]
    fn arabic_text_is_text() {
        assert_eq!(classify("مرحبا بالعالم"), ContentKind::Text);
    }

    #[test]
    fn tags() {
        assert_eq!(ContentKind::File.tag(), "ملف");
        assert_eq!(ContentKind::Text.tag(), "نص");
    }
}
