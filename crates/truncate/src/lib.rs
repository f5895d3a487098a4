//! Truncate HTML to a number of visible characters without breaking it.
//!
//! A single linear scan counts the characters a reader would actually see,
//! tracking which elements are open along the way. Once the budget is spent
//! the scanned prefix is kept, an optional suffix (an ellipsis, say) is added,
//! and every element still open is closed, innermost first.
//!
//! - **Tags** cost nothing. Void elements (`<br>`, `<img>`, ...) are never
//!   closed.
//! - **Entities** (`&copy;`, `&#169;`) cost exactly one character and are
//!   never split.
//! - **Comments** and declarations cost nothing and are kept whole.
//! - **Whitespace** costs nothing, and multi-byte characters are never split.
//!
//! End tags must close the innermost open element; anything else is reported
//! as [`UnbalancedTags`](crate::error::ErrorKind::UnbalancedTags). This is not
//! an HTML validator: there is no DOM, and nothing is normalised.
//!
//! ```rust
//! use excerpt_truncate::truncate;
//!
//! let html = "<h1><u>1234 &copy; 1234</u></h1>";
//! assert_eq!(truncate(html, 5, "").unwrap(), "<h1><u>1234 &copy;</u></h1>");
//! assert_eq!(truncate(html, 6, "...").unwrap(), "<h1><u>1234 &copy; 1...</u></h1>");
//! assert!(truncate("<b>text</i>", 10, "").is_err());
//! ```

mod consts;
mod count;
pub mod error;
mod scan;
mod stack;
mod truncate;

use exn::ResultExt;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
pub use crate::stack::is_void_element;
pub use crate::truncate::{Excerpt, SuffixPolicy, Truncator, visible_len};

/// Truncate `html` to at most `limit` visible characters, appending `suffix`
/// before the synthetic closing tags.
///
/// The suffix is added to every non-empty result, truncated or not; use a
/// [`Truncator`] with [`SuffixPolicy::WhenTruncated`] to only add it when
/// something was cut. A `limit` of zero, or empty input, gives an empty
/// string.
pub fn truncate(html: &str, limit: usize, suffix: &str) -> Result<String> {
    Truncator::new(limit).with_suffix(suffix).truncate(html)
}

/// Byte-oriented [`truncate`], for callers holding raw document bytes.
///
/// The input must be UTF-8; no other encodings are converted.
#[instrument(skip(html, suffix), fields(html_size = html.as_ref().len()))]
pub fn truncate_bytes(html: impl AsRef<[u8]>, limit: usize, suffix: &str) -> Result<Vec<u8>> {
    let html = std::str::from_utf8(html.as_ref()).or_raise(|| ErrorKind::InvalidEncoding)?;
    truncate(html, limit, suffix).map(String::into_bytes)
}
