//! The segment splitter: applies one pattern across a segment list.
//!
//! A pass sees the list as a single scan string in which every tagged
//! segment is one [`PLACEHOLDER`] character. Matches are taken
//! leftmost-first without overlap; each becomes one tagged segment built by
//! the pass's constructor, and the text around it stays text. Tagged
//! segments are moved into the output untouched, never re-scanned.
//!
//! The placeholder counts as a non-space character for every boundary
//! check. That is what lets `*<link>*` become one emphasis span, and it
//! also means a delimiter glued to a tagged segment (`me@x.org*a*`) does
//! not open or close emphasis.

use std::ops::Range;

use crate::patterns::Pattern;
use crate::segment::{self, Segment};

/// Stand-in for a tagged segment inside the scan string.
pub const PLACEHOLDER: char = '\u{FFFC}';

/// Builds a tagged segment from the payload of a match.
pub type Constructor = fn(Vec<Segment>) -> Segment;

/// One pass of the cascade: a pattern and what to build from its matches.
#[derive(Debug, Clone, Copy)]
pub struct Pass {
    /// Pattern to search for.
    pub pattern: &'static Pattern,
    /// Constructor applied to each match payload.
    pub build: Constructor,
}

impl Pass {
    /// Pair a pattern with its constructor.
    pub const fn new(pattern: &'static Pattern, build: Constructor) -> Self {
        Self { pattern, build }
    }
}

#[derive(Debug)]
enum Piece {
    Text,
    /// `None` once moved into the output.
    Tagged(Option<Segment>),
}

/// A segment list flattened into one searchable string.
///
/// Ranges handed to [`Scan::take`] only ever move forward, so a cursor
/// over `pieces` keeps every pass linear in the number of segments.
#[derive(Debug)]
struct Scan {
    text: String,
    pieces: Vec<(Range<usize>, Piece)>,
    /// First piece that may still hold untaken content.
    cursor: usize,
    /// Byte offsets of emphasis placeholders, ascending.
    emphasis_at: Vec<usize>,
}

impl Scan {
    fn new(segments: Vec<Segment>) -> Self {
        let mut text = String::new();
        let mut pieces = Vec::with_capacity(segments.len());
        let mut emphasis_at = Vec::new();
        for seg in segments {
            let start = text.len();
            match seg {
                Segment::Text { text: t } => {
                    text.push_str(&t);
                    pieces.push((start..text.len(), Piece::Text));
                }
                tagged => {
                    if tagged.is_emphasis() {
                        emphasis_at.push(start);
                    }
                    text.push(PLACEHOLDER);
                    pieces.push((start..text.len(), Piece::Tagged(Some(tagged))));
                }
            }
        }
        Self {
            text,
            pieces,
            cursor: 0,
            emphasis_at,
        }
    }

    /// Whether `range` covers an emphasis span.
    fn contains_emphasis(&self, range: &Range<usize>) -> bool {
        let first = self.emphasis_at.partition_point(|&at| at < range.start);
        self.emphasis_at
            .get(first)
            .is_some_and(|&at| at < range.end)
    }

    /// Move the content of `range` out as segments.
    ///
    /// `range` must not start before the end of the previous call's range.
    fn take(&mut self, range: Range<usize>) -> Vec<Segment> {
        while let Some((r, _)) = self.pieces.get(self.cursor)
            && r.end <= range.start
        {
            self.cursor += 1;
        }

        let mut out = Vec::new();
        let mut i = self.cursor;
        while let Some((r, piece)) = self.pieces.get_mut(i) {
            if r.start >= range.end {
                break;
            }
            let start = r.start.max(range.start);
            let end = r.end.min(range.end);
            if start < end {
                match piece {
                    Piece::Text => segment::push_text(&mut out, &self.text[start..end]),
                    Piece::Tagged(seg) => out.extend(seg.take()),
                }
            }
            if r.end > range.end {
                // Text continuing past the range is revisited next time.
                break;
            }
            i += 1;
        }
        self.cursor = i;
        out
    }
}

/// Append segments, merging neighbouring text.
fn append(out: &mut Vec<Segment>, segments: Vec<Segment>) {
    for seg in segments {
        match seg {
            Segment::Text { text } => segment::push_text(out, &text),
            tagged => out.push(tagged),
        }
    }
}

/// Byte offset of the character after the one at `at`.
fn next_char(text: &str, at: usize) -> usize {
    at + text[at..].chars().next().map_or(1, char::len_utf8)
}

/// Run one pass over a segment list.
///
/// A match whose payload would enclose an emphasis span is skipped and
/// the search resumes one character further on, so emphasis never nests.
pub fn split(segments: Vec<Segment>, pass: &Pass) -> Vec<Segment> {
    if !segments.iter().any(Segment::is_text) {
        return segments;
    }

    let mut scan = Scan::new(segments);
    let mut out = Vec::new();
    let mut emitted = 0;
    let mut from = 0;
    let mut matches = 0usize;

    while from <= scan.text.len() {
        let Some(m) = pass.pattern.find_at(&scan.text, from) else {
            break;
        };
        if m.whole.is_empty() || scan.contains_emphasis(&m.payload) {
            if m.whole.start >= scan.text.len() {
                break;
            }
            from = next_char(&scan.text, m.whole.start);
            continue;
        }

        let before = scan.take(emitted..m.whole.start);
        append(&mut out, before);
        let payload = scan.take(m.payload);
        out.push((pass.build)(payload));
        matches += 1;

        emitted = m.whole.end;
        from = m.whole.end;
    }

    let rest = scan.take(emitted..scan.text.len());
    append(&mut out, rest);

    tracing::trace!(pattern = pass.pattern.name(), matches, "pass applied");
    out
}

/// Fold a list of passes over a segment list, in order.
pub fn apply(segments: Vec<Segment>, passes: &[Pass]) -> Vec<Segment> {
    passes.iter().fold(segments, |segments, pass| split(segments, pass))
}
