//! HTML materialization of a [`FormattedBody`].
//!
//! Paragraphs become `<p>`, emphasis `<em>`, and links `<a>`. A quoted
//! paragraph is wrapped in one `<blockquote>` per level, outside the `<p>`,
//! since an HTML parser closes an open `<p>` at a `<blockquote>` start tag.
//! All text is HTML-escaped exactly once, so the displayed text matches the
//! source.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::node::{FormattedBody, Node, Paragraph};

/// `rel` attribute on every generated link.
const LINK_REL: &str = "nofollow noopener";

/// Render a formatted body as an HTML fragment.
///
/// [`FormattedBody::Untouched`] renders as an empty string.
pub fn to_html(body: &FormattedBody) -> String {
    let mut out = String::new();
    match body {
        FormattedBody::Untouched => {}
        FormattedBody::Verbatim(text) => out.push_str(&encode_text(text)),
        FormattedBody::Paragraphs(paragraphs) => {
            for paragraph in paragraphs {
                write_paragraph(&mut out, paragraph);
            }
        }
    }
    out
}

fn write_paragraph(out: &mut String, paragraph: &Paragraph) {
    let mut children = paragraph.children.as_slice();
    let mut depth = 0;
    while let [Node::Quote(inner)] = children {
        children = inner.as_slice();
        depth += 1;
    }

    out.push_str(&"<blockquote>".repeat(depth));
    out.push_str("<p>");
    write_nodes(out, children);
    out.push_str("</p>");
    out.push_str(&"</blockquote>".repeat(depth));
    out.push('\n');
}

fn write_nodes(out: &mut String, nodes: &[Node]) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&encode_text(text)),
            Node::Anchor { href, text } => {
                out.push_str("<a href=\"");
                out.push_str(&encode_double_quoted_attribute(href));
                out.push_str("\" rel=\"");
                out.push_str(LINK_REL);
                out.push_str("\">");
                out.push_str(&encode_text(text));
                out.push_str("</a>");
            }
            Node::Emphasis(children) => {
                out.push_str("<em>");
                write_nodes(out, children);
                out.push_str("</em>");
            }
            // Quote levels only wrap whole paragraphs.
            Node::Quote(children) => write_nodes(out, children),
        }
    }
}
