//! The pattern library: URL, email, two emphasis markers, and the
//! blockquote prefix.
//!
//! Every pattern is compiled once and exposes a recognizer
//! ([`Pattern::is_match`]) and a capturing extractor ([`Pattern::find_at`]).
//! The link and emphasis patterns also come with a constructor that turns a
//! match payload into a [`Segment`].
//!
//! Link and email patterns never match across the tagged-segment
//! placeholder (`U+FFFC`); emphasis patterns treat it as an ordinary
//! non-space character so they can wrap an earlier link.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::segment::{self, Delimiter, Segment};

/// Regex for `http://` and `https://` URLs.
///
/// One or more of: a backslash escape of a non-alphanumeric character, a
/// run of non-space non-bracket characters ending in a URL-safe character,
/// or a single-level bracket group. Prose punctuation at the end is left
/// out because no alternative can end on it.
const URL_SOURCE: &str = concat!(
    r"(?i:https?)://(?:",
    r"\\[^A-Za-z0-9\x{FFFC}]",
    r"|[^\s()\[\]{}\\\x{FFFC}]*[A-Za-z0-9#$%&'+\-/<=>@_|~]",
    r"|\((?:\\[^A-Za-z0-9\x{FFFC}]|[^\s()\\\x{FFFC}])*\)",
    r"|\[(?:\\[^A-Za-z0-9\x{FFFC}]|[^\s\[\]\\\x{FFFC}])*\]",
    r"|\{(?:\\[^A-Za-z0-9\x{FFFC}]|[^\s{}\\\x{FFFC}])*\}",
    r")+",
);

/// Regex for `local-part@domain.tld`.
const EMAIL_SOURCE: &str =
    r"[A-Za-z0-9!#$%&'*+\-/=?^_`{|}~.]+@[^\s\x{FFFC}]+\.[A-Za-z0-9\-]*[A-Za-z]";

/// `*emphasis*`: the opener follows start/space/open bracket/`*`, the closer
/// precedes end/space/close bracket/`*`. Shortest inner span wins.
const STAR_SOURCE: &str = r"(?<![^\s(\[{*])\*([^\s*](?:[^*]*?[^\s*])?)\*(?![^\s)\]}*])";

/// `_emphasis_`, same boundary rules as [`STAR_SOURCE`].
const UNDERSCORE_SOURCE: &str = r"(?<![^\s(\[{_])_([^\s_](?:[^_]*?[^\s_])?)_(?![^\s)\]}_])";

/// One leading `>` with surrounding optional whitespace.
const BLOCKQUOTE_SOURCE: &str = r"^\s*>\s*";

/// Backslash escape of a non-alphanumeric character.
static URL_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\([^A-Za-z0-9])").expect("valid regex"));

/// URL pattern.
pub static URL: LazyLock<Pattern> = LazyLock::new(|| Pattern::standard("url", URL_SOURCE, 0));

/// Email pattern.
pub static EMAIL: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::standard("email", EMAIL_SOURCE, 0));

/// Star emphasis pattern.
pub static EMPHASIS_STAR: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::fancy("emphasis-star", STAR_SOURCE, 1));

/// Underscore emphasis pattern.
pub static EMPHASIS_UNDERSCORE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::fancy("emphasis-underscore", UNDERSCORE_SOURCE, 1));

/// Blockquote prefix pattern, anchored at the start of the text.
pub static BLOCKQUOTE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::standard("blockquote", BLOCKQUOTE_SOURCE, 0));

/// Regex backend of a pattern.
#[derive(Debug)]
enum Engine {
    Standard(Regex),
    /// Needed for look-around, which `regex` does not support.
    Fancy(fancy_regex::Regex),
}

/// A compiled matching rule.
#[derive(Debug)]
pub struct Pattern {
    name: &'static str,
    engine: Engine,
    /// Capture group holding the payload; 0 is the whole match.
    payload_group: usize,
}

/// Location of one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// Byte range of the whole match, delimiters included.
    pub whole: Range<usize>,
    /// Byte range of the payload (the inner text for emphasis).
    pub payload: Range<usize>,
}

impl Pattern {
    fn standard(name: &'static str, source: &str, payload_group: usize) -> Self {
        Self {
            name,
            engine: Engine::Standard(Regex::new(source).expect("valid regex")),
            payload_group,
        }
    }

    fn fancy(name: &'static str, source: &str, payload_group: usize) -> Self {
        Self {
            name,
            engine: Engine::Fancy(fancy_regex::Regex::new(source).expect("valid regex")),
            payload_group,
        }
    }

    /// Short name used in logs.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Does `text` contain a match anywhere?
    pub fn is_match(&self, text: &str) -> bool {
        self.find_at(text, 0).is_some()
    }

    /// Leftmost match starting at or after byte offset `start`.
    ///
    /// Look-behind still sees the text before `start`. A regex runtime
    /// failure counts as no match.
    pub fn find_at(&self, text: &str, start: usize) -> Option<PatternMatch> {
        match &self.engine {
            Engine::Standard(re) => {
                let caps = re.captures_at(text, start)?;
                let whole = caps.get(0)?.range();
                let payload = caps.get(self.payload_group)?.range();
                Some(PatternMatch { whole, payload })
            }
            Engine::Fancy(re) => match re.captures_from_pos(text, start) {
                Ok(caps) => {
                    let caps = caps?;
                    let whole = caps.get(0).map(|m| m.start()..m.end())?;
                    let payload = caps
                        .get(self.payload_group)
                        .map(|m| m.start()..m.end())?;
                    Some(PatternMatch { whole, payload })
                }
                Err(err) => {
                    tracing::warn!(pattern = self.name, error = %err, "pattern gave up, treating as no match");
                    None
                }
            },
        }
    }
}

/// Remove backslashes that escape non-alphanumeric characters.
///
/// `a\ b\)c` becomes `a b)c`; `a\nb` is left alone.
pub fn unescape_url(text: &str) -> String {
    URL_ESCAPE.replace_all(text, "$1").into_owned()
}

/// Build a link segment from a matched URL.
pub fn link(payload: Vec<Segment>) -> Segment {
    let text = segment::display_text(&payload);
    Segment::Link {
        href: unescape_url(&text),
        text,
    }
}

/// Build an email segment from a matched address.
pub fn email(payload: Vec<Segment>) -> Segment {
    Segment::Email {
        address: segment::display_text(&payload),
    }
}

/// Build a `*…*` emphasis segment around its inner content.
pub const fn emphasis_star(payload: Vec<Segment>) -> Segment {
    Segment::Emphasis {
        delimiter: Delimiter::Star,
        children: payload,
    }
}

/// Build a `_…_` emphasis segment around its inner content.
pub const fn emphasis_underscore(payload: Vec<Segment>) -> Segment {
    Segment::Emphasis {
        delimiter: Delimiter::Underscore,
        children: payload,
    }
}

/// Length in bytes of a leading blockquote prefix of `text`, if any.
pub fn quote_prefix_len(text: &str) -> Option<usize> {
    BLOCKQUOTE
        .find_at(text, 0)
        .map(|m| m.whole.end)
        .filter(|&len| len > 0)
}
