//! Truncating HTML to a number of visible characters.

use crate::consts;
use crate::count::{Counter, is_visible};
use crate::error::Result;
use crate::scan::{Token, Tokens};
use crate::stack::TagStack;
use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::{debug, instrument};

/// When the suffix is added to an excerpt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SuffixPolicy {
    /// Append the suffix to every non-empty excerpt, even if nothing was cut.
    #[default]
    Always,
    /// Only append the suffix when visible content was actually cut off.
    WhenTruncated,
}

/// Reusable truncation settings.
///
/// # Examples
///
/// ```rust
/// use excerpt_truncate::{SuffixPolicy, Truncator};
///
/// let truncator = Truncator::new(5).with_suffix("…").with_suffix_policy(SuffixPolicy::WhenTruncated);
/// assert_eq!(truncator.truncate("<p><em>Monty</em> Python</p>").unwrap(), "<p><em>Monty…</em></p>");
/// assert_eq!(truncator.truncate("<p>Spam</p>").unwrap(), "<p>Spam</p>");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Truncator {
    limit: usize,
    suffix: String,
    suffix_policy: SuffixPolicy,
}

impl Truncator {
    /// Keep at most `limit` visible characters, with no suffix.
    pub fn new(limit: usize) -> Self {
        Self { limit, ..Self::default() }
    }

    /// Text inserted after the last kept character, before any closing tags.
    /// It is copied verbatim, so escape it yourself if it contains markup.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// When to add the suffix; [`SuffixPolicy::Always`] unless set.
    #[must_use]
    pub fn with_suffix_policy(mut self, suffix_policy: SuffixPolicy) -> Self {
        self.suffix_policy = suffix_policy;
        self
    }

    /// Maximum number of visible characters kept.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Text added after the last kept character.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// When the suffix is added.
    pub fn suffix_policy(&self) -> SuffixPolicy {
        self.suffix_policy
    }

    /// Truncate `html`, returning only the resulting markup. See
    /// [`excerpt`](Self::excerpt).
    pub fn truncate(&self, html: &str) -> Result<String> {
        self.excerpt(html).map(String::from)
    }

    /// Truncate `html` to the configured number of visible characters.
    ///
    /// The scan stops at the visible character (or entity) that uses up the
    /// budget. Text is copied verbatim up to there, followed by the suffix, a
    /// closing tag for every element still open (innermost first) and, if the
    /// document ends with a comment that was cut off, that comment.
    ///
    /// If nothing visible is left after the cutoff and the rest of the
    /// document closes exactly the elements still open, the rest is copied
    /// after the suffix in place of the synthetic closers. With an empty
    /// suffix, a document that already fits comes back unchanged.
    ///
    /// Tags, comments and whitespace are free. An entity such as `&copy;`
    /// costs one character and is never split.
    ///
    /// # Errors
    ///
    /// Returns [`UnbalancedTags`](crate::error::ErrorKind::UnbalancedTags) if
    /// an end tag before the cutoff doesn't close the innermost open element.
    /// Tags after the cutoff are never an error. No partial output is
    /// produced.
    #[instrument(skip_all, fields(html_size = html.len(), limit = self.limit))]
    pub fn excerpt(&self, html: &str) -> Result<Excerpt> {
        if html.is_empty() || self.limit == 0 {
            return Ok(Excerpt { truncated: has_visible(html), ..Excerpt::default() });
        }

        let mut counter = Counter::new(self.limit);
        let mut stack = TagStack::default();
        let mut cutoff = html.len();
        for (offset, token) in Tokens::new(html) {
            match token {
                Token::Comment(_) | Token::Declaration(_) => {},
                Token::Tag(tag) => stack.apply(&tag, offset)?,
                Token::Entity(entity) => {
                    if counter.entity() {
                        cutoff = offset + entity.len();
                        break;
                    }
                },
                Token::Text(run) => {
                    if let Some(end) = counter.text(run) {
                        cutoff = offset + end;
                        break;
                    }
                },
            }
        }
        let tail = &html[cutoff..];
        let truncated = has_visible(tail);
        let keep_tail = !truncated && closes_cleanly(stack.clone(), tail);
        debug!(cutoff, visible = counter.visible(), open = stack.len(), truncated, keep_tail, "found cutoff");

        let mut output = String::with_capacity(cutoff + self.suffix.len() + stack.len() * 8);
        output.push_str(&html[..cutoff]);
        if self.suffix_policy == SuffixPolicy::Always || truncated {
            output.push_str(&self.suffix);
        }
        if keep_tail {
            output.push_str(tail);
            return Ok(Excerpt { html: output, visible: counter.visible(), truncated, closed: Vec::new() });
        }
        let mut closed = Vec::with_capacity(stack.len());
        for name in stack.closers() {
            output.push_str("</");
            output.push_str(name);
            output.push('>');
            closed.push(name.to_string());
        }
        if let Some(comment) = trailing_comment(html, cutoff) {
            output.push_str(comment);
        }

        Ok(Excerpt { html: output, visible: counter.visible(), truncated, closed })
    }
}

/// A truncated document, along with what happened to produce it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Excerpt {
    html: String,
    visible: usize,
    truncated: bool,
    closed: Vec<String>,
}

impl Excerpt {
    pub fn as_str(&self) -> &str {
        &self.html
    }

    /// Number of visible characters kept (not counting the suffix).
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Whether any visible content was cut off.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Elements that were closed synthetically, innermost first.
    pub fn closed(&self) -> &[String] {
        &self.closed
    }
}

impl From<Excerpt> for String {
    fn from(excerpt: Excerpt) -> Self {
        excerpt.html
    }
}

impl AsRef<str> for Excerpt {
    fn as_ref(&self) -> &str {
        &self.html
    }
}

impl Display for Excerpt {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.html)
    }
}

/// Count the visible characters of a whole document, using the same rules as
/// truncation. Tags are not checked for balance.
///
/// ```rust
/// use excerpt_truncate::visible_len;
/// assert_eq!(visible_len("<b>1234 &copy; <!-- x --> 1234</b>"), 9);
/// ```
pub fn visible_len(html: &str) -> usize {
    let mut counter = Counter::new(usize::MAX);
    for (_, token) in Tokens::new(html) {
        match token {
            Token::Entity(_) => {
                counter.entity();
            },
            Token::Text(run) => {
                counter.text(run);
            },
            Token::Comment(_) | Token::Declaration(_) | Token::Tag(_) => {},
        }
    }
    counter.visible()
}

fn has_visible(html: &str) -> bool {
    Tokens::new(html).any(|(_, token)| match token {
        Token::Entity(_) => true,
        Token::Text(run) => run.chars().any(is_visible),
        Token::Comment(_) | Token::Declaration(_) | Token::Tag(_) => false,
    })
}

/// Whether `tail`, which holds nothing visible, closes exactly the elements
/// left open in `stack`.
fn closes_cleanly<'a>(mut stack: TagStack<'a>, tail: &'a str) -> bool {
    for (offset, token) in Tokens::new(tail) {
        if let Token::Tag(tag) = token
            && stack.apply(&tag, offset).is_err()
        {
            return false;
        }
    }
    stack.len() == 0
}

/// The comment the document ends with, if it lies at or after `cutoff` and so
/// was not copied into the excerpt. Only the last comment is considered.
fn trailing_comment(html: &str, cutoff: usize) -> Option<&str> {
    if !html.ends_with("-->") {
        return None;
    }
    let last = consts::ANY_COMMENT_REGEX.find_iter(html).last()?;
    (last.end() == html.len() && last.start() >= cutoff).then(|| last.as_str())
}
