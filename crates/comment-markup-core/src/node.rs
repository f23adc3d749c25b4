//! The formatted output tree.

use serde::Serialize;

/// An inline output node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Node {
    /// Literal text.
    Text(String),
    /// A hyperlink (web or `mailto:`).
    Anchor {
        /// Link target.
        href: String,
        /// Displayed text.
        text: String,
    },
    /// Emphasized content.
    Emphasis(Vec<Node>),
    /// One level of quotation.
    Quote(Vec<Node>),
}

impl Node {
    /// Visible text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(text) | Self::Anchor { text, .. } => text.clone(),
            Self::Emphasis(children) | Self::Quote(children) => {
                children.iter().map(Self::text_content).collect()
            }
        }
    }
}

/// One formatted paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    /// Inline content; quote nesting appears as nested [`Node::Quote`].
    pub children: Vec<Node>,
}

impl Paragraph {
    /// Number of quote containers around the inline content.
    pub fn quote_depth(&self) -> usize {
        let mut depth = 0;
        let mut children = &self.children;
        while let [Node::Quote(inner)] = children.as_slice() {
            depth += 1;
            children = inner;
        }
        depth
    }

    /// Visible text of the paragraph.
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}

/// What the display layer should show for a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum FormattedBody {
    /// Nothing to format; keep the current display.
    Untouched,
    /// No markup candidates; show the body as one text node.
    Verbatim(String),
    /// Replace the display with these paragraphs.
    Paragraphs(Vec<Paragraph>),
}

impl FormattedBody {
    /// Whether the display should be left as it is.
    pub const fn is_untouched(&self) -> bool {
        matches!(self, Self::Untouched)
    }

    /// The formatted paragraphs, if formatting ran.
    pub fn paragraphs(&self) -> &[Paragraph] {
        match self {
            Self::Paragraphs(paragraphs) => paragraphs,
            _ => &[],
        }
    }
}
