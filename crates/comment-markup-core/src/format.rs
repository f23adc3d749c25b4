//! Formatter entry point.
//!
//! ```
//! use comment_markup_core::{FormattedBody, format_comment};
//!
//! let body = format_comment(Some("just words"), true);
//! assert_eq!(body, FormattedBody::Verbatim("just words".into()));
//!
//! let body = format_comment(Some("see *this*"), true);
//! assert_eq!(body.paragraphs().len(), 1);
//! ```

use crate::node::FormattedBody;
use crate::paragraph;

/// Characters that can start any markup with styling enabled.
const STYLED_TRIGGERS: &[char] = &['*', '_', '>', '@', ':'];

/// Characters that can start a link or email. URLs always contain `://`.
const LINK_TRIGGERS: &[char] = &['@', ':'];

/// Cheap check for whether `body` could contain any markup at all.
pub fn may_contain_markup(body: &str, styling: bool) -> bool {
    let triggers = if styling {
        STYLED_TRIGGERS
    } else {
        LINK_TRIGGERS
    };
    body.contains(triggers)
}

/// Format a comment body.
///
/// An absent or empty body gives [`FormattedBody::Untouched`]. A body with
/// no trigger characters is returned as [`FormattedBody::Verbatim`] without
/// running any pass. Anything else goes through the paragraph builder.
#[tracing::instrument(skip(body), fields(body_len = body.map(str::len)))]
pub fn format_comment(body: Option<&str>, styling: bool) -> FormattedBody {
    let Some(body) = body.filter(|b| !b.is_empty()) else {
        tracing::debug!("no body, leaving display untouched");
        return FormattedBody::Untouched;
    };

    if !may_contain_markup(body, styling) {
        tracing::debug!("no trigger characters, fast path");
        return FormattedBody::Verbatim(body.to_string());
    }

    FormattedBody::Paragraphs(paragraph::build_paragraphs(body, styling))
}
