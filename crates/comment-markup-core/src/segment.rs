//! Segments: one paragraph's content after pattern matching.
//!
//! A paragraph starts life as a single [`Segment::Text`]. Each pass of the
//! cascade turns matching text into tagged segments; tagged segments are
//! never re-scanned. Every segment remembers the exact source text it was
//! produced from, so a segment list can always be turned back into the
//! paragraph it came from.

use serde::Serialize;

/// Delimiter character of an emphasis span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// `*emphasis*`
    Star,
    /// `_emphasis_`
    Underscore,
}

impl Delimiter {
    /// The delimiter as a character.
    pub const fn as_char(self) -> char {
        match self {
            Self::Star => '*',
            Self::Underscore => '_',
        }
    }
}

/// One unit of a paragraph's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Literal text, still open to later passes.
    Text {
        /// The text itself.
        text: String,
    },
    /// A web link. `text` is the matched source, `href` its unescaped form.
    Link {
        /// Link target with backslash escapes removed.
        href: String,
        /// Displayed text, exactly as written.
        text: String,
    },
    /// An email address.
    Email {
        /// The address as written.
        address: String,
    },
    /// An emphasis span. Children are text or link/email segments, never
    /// another emphasis.
    Emphasis {
        /// Which delimiter opened and closed the span.
        delimiter: Delimiter,
        /// Content between the delimiters.
        children: Vec<Segment>,
    },
    /// Leading blockquote nesting of the paragraph.
    Quote {
        /// Number of `>` prefixes consumed.
        depth: usize,
        /// The consumed prefix text, e.g. `"> > "`.
        prefix: String,
    },
}

impl Segment {
    /// Shorthand for a text segment.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Whether later passes may still split this segment.
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Whether this segment is an emphasis span.
    pub const fn is_emphasis(&self) -> bool {
        matches!(self, Self::Emphasis { .. })
    }

    /// The text a reader sees, with markup syntax removed.
    ///
    /// Links keep their escape sequences; emphasis drops its delimiters;
    /// quotes contribute nothing.
    pub fn display_text(&self) -> String {
        match self {
            Self::Text { text } | Self::Link { text, .. } => text.clone(),
            Self::Email { address } => address.clone(),
            Self::Emphasis { children, .. } => display_text(children),
            Self::Quote { .. } => String::new(),
        }
    }

    /// The exact slice of the paragraph this segment was built from.
    pub fn source_text(&self) -> String {
        match self {
            Self::Emphasis {
                delimiter,
                children,
            } => {
                let d = delimiter.as_char();
                format!("{d}{}{d}", source_text(children))
            }
            Self::Quote { prefix, .. } => prefix.clone(),
            other => other.display_text(),
        }
    }
}

/// Concatenated [`Segment::display_text`] of a segment list.
pub fn display_text(segments: &[Segment]) -> String {
    segments.iter().map(Segment::display_text).collect()
}

/// Concatenated [`Segment::source_text`] of a segment list.
///
/// For any paragraph run through the cascade this equals the paragraph.
pub fn source_text(segments: &[Segment]) -> String {
    segments.iter().map(Segment::source_text).collect()
}

/// Append text to a segment list, merging with a trailing text segment.
///
/// Empty text is dropped.
pub(crate) fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Text { text: last }) = segments.last_mut() {
        last.push_str(text);
    } else {
        segments.push(Segment::text(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emphasis_source_restores_delimiters() {
        let seg = Segment::Emphasis {
            delimiter: Delimiter::Underscore,
            children: vec![Segment::text("word")],
        };
        assert_eq!(seg.source_text(), "_word_");
        assert_eq!(seg.display_text(), "word");
    }

    #[test]
    fn link_display_keeps_escapes() {
        let seg = Segment::Link {
            href: "http://x.com/a b".into(),
            text: r"http://x.com/a\ b".into(),
        };
        assert_eq!(seg.display_text(), r"http://x.com/a\ b");
    }

    #[test]
    fn quote_has_no_display_text() {
        let seg = Segment::Quote {
            depth: 2,
            prefix: "> > ".into(),
        };
        assert!(seg.display_text().is_empty());
        assert_eq!(seg.source_text(), "> > ");
    }

    #[test]
    fn push_text_merges_and_skips_empty() {
        let mut segments = Vec::new();
        push_text(&mut segments, "");
        assert!(segments.is_empty());
        push_text(&mut segments, "a");
        push_text(&mut segments, "b");
        assert_eq!(segments, vec![Segment::text("ab")]);
    }
}
