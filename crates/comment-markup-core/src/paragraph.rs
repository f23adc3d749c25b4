//! The paragraph builder.
//!
//! Splits a comment body into paragraphs, runs the pass cascade over each
//! one, pulls out leading blockquote nesting, and materializes the result
//! into [`Paragraph`] nodes.
//!
//! Pass order matters. Links and emails are found first so emphasis markers
//! inside a URL are never read as emphasis, and emphasis runs before
//! blockquote extraction so the quote prefix is read from the literal
//! leading text.

use std::sync::LazyLock;

use regex::Regex;

use crate::node::{Node, Paragraph};
use crate::patterns::{self, EMAIL, EMPHASIS_STAR, EMPHASIS_UNDERSCORE, URL};
use crate::segment::Segment;
use crate::splitter::{self, Pass};

/// One or more consecutive line breaks.
static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("valid regex"));

/// Link and email detection; always runs.
pub fn link_passes() -> [Pass; 2] {
    [
        Pass::new(&URL, patterns::link),
        Pass::new(&EMAIL, patterns::email),
    ]
}

/// Emphasis detection; only runs with styling enabled.
pub fn emphasis_passes() -> [Pass; 2] {
    [
        Pass::new(&EMPHASIS_STAR, patterns::emphasis_star),
        Pass::new(&EMPHASIS_UNDERSCORE, patterns::emphasis_underscore),
    ]
}

/// The full ordered cascade for a styling setting.
pub fn cascade(styling: bool) -> Vec<Pass> {
    let mut passes = link_passes().to_vec();
    if styling {
        passes.extend(emphasis_passes());
    }
    passes
}

/// Split a body into non-empty paragraphs on runs of line breaks.
pub fn split_paragraphs(body: &str) -> Vec<&str> {
    LINE_BREAKS
        .split(body)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Pull leading blockquote prefixes off the first segment.
///
/// The strip is kept only when something non-blank remains in the
/// paragraph; otherwise the segments are returned untouched. A committed
/// strip puts a [`Segment::Quote`] at the front.
pub fn extract_quote(mut segments: Vec<Segment>) -> Vec<Segment> {
    let Some(Segment::Text { text: first }) = segments.first() else {
        return segments;
    };

    let mut consumed = 0;
    let mut depth = 0;
    while let Some(len) = patterns::quote_prefix_len(&first[consumed..]) {
        consumed += len;
        depth += 1;
    }
    if depth == 0 {
        return segments;
    }

    let rest = &first[consumed..];
    let remainder_blank = rest.trim().is_empty()
        && segments[1..].iter().all(|s| s.display_text().trim().is_empty());
    if remainder_blank {
        return segments;
    }

    let prefix = first[..consumed].to_string();
    let rest = rest.to_string();
    if rest.is_empty() {
        segments.remove(0);
    } else {
        segments[0] = Segment::text(rest);
    }
    segments.insert(0, Segment::Quote { depth, prefix });
    segments
}

/// Run the cascade (and quote extraction, with styling) over one paragraph.
pub fn segment_paragraph(text: &str, styling: bool) -> Vec<Segment> {
    segment_paragraph_with(text, &cascade(styling), styling)
}

/// Like [`segment_paragraph`] with an explicit pass list.
pub fn segment_paragraph_with(text: &str, passes: &[Pass], styling: bool) -> Vec<Segment> {
    let segments = splitter::apply(vec![Segment::text(text)], passes);
    if styling {
        extract_quote(segments)
    } else {
        segments
    }
}

/// Turn segments into inline nodes.
fn inline_nodes(segments: Vec<Segment>) -> Vec<Node> {
    segments
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Text { text } => Some(Node::Text(text)),
            Segment::Link { href, text } => Some(Node::Anchor { href, text }),
            Segment::Email { address } => Some(Node::Anchor {
                href: format!("mailto:{address}"),
                text: address,
            }),
            Segment::Emphasis { children, .. } => Some(Node::Emphasis(inline_nodes(children))),
            // Only ever first; handled by `materialize`.
            Segment::Quote { .. } => None,
        })
        .collect()
}

/// Build the paragraph node tree, wrapping it in one quote container per
/// level of nesting.
pub fn materialize(segments: Vec<Segment>) -> Paragraph {
    let depth = match segments.first() {
        Some(Segment::Quote { depth, .. }) => *depth,
        _ => 0,
    };
    let mut children = inline_nodes(segments);
    for _ in 0..depth {
        children = vec![Node::Quote(children)];
    }
    Paragraph { children }
}

/// Build one paragraph.
pub fn build_paragraph(text: &str, styling: bool) -> Paragraph {
    materialize(segment_paragraph(text, styling))
}

/// Build every paragraph of a body.
#[tracing::instrument(skip(body), fields(body_len = body.len()))]
pub fn build_paragraphs(body: &str, styling: bool) -> Vec<Paragraph> {
    let passes = cascade(styling);
    let paragraphs: Vec<Paragraph> = split_paragraphs(body)
        .into_iter()
        .map(|text| materialize(segment_paragraph_with(text, &passes, styling)))
        .collect();
    tracing::debug!(
        paragraphs = paragraphs.len(),
        passes = passes.len(),
        "paragraphs built"
    );
    paragraphs
}
