//! Core library for comment-markup.
//!
//! Turns plain-text user comments into a small formatted tree: paragraphs,
//! autolinked URLs and email addresses, `*emphasis*` / `_emphasis_`, and
//! `>` blockquotes. The tree can be rendered to HTML with [`render::to_html`].
//!
//! # Modules
//!
//! - [`patterns`] - Compiled markup patterns and URL unescaping
//! - [`segment`] - Segments produced while splitting a paragraph
//! - [`splitter`] - Runs one pattern pass over a segment list
//! - [`paragraph`] - Paragraph splitting, the pass cascade, blockquotes
//! - [`format`] - Formatter entry point with the fast-path pre-check
//! - [`node`] - The formatted output tree
//! - [`render`] - HTML rendering
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use comment_markup_core::{format_comment, render};
//!
//! let body = format_comment(Some("see *http://example.com*"), true);
//! assert_eq!(
//!     render::to_html(&body),
//!     "<p>see <em><a href=\"http://example.com\" rel=\"nofollow noopener\">\
//!      http://example.com</a></em></p>\n"
//! );
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod format;
pub mod node;
pub mod paragraph;
pub mod patterns;
pub mod render;
pub mod segment;
pub mod splitter;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel, OutputFormat};
pub use error::{ConfigError, ConfigResult};
pub use format::format_comment;
pub use node::{FormattedBody, Node, Paragraph};
pub use segment::Segment;

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
