//! Open-element bookkeeping.

use crate::consts::VOID_ELEMENTS;
use crate::error::{ErrorKind, Result};
use crate::scan::Tag;

/// Returns `true` for elements that never take a closing tag (`<br>`,
/// `<img>`, ...). Names are compared ASCII case-insensitively.
///
/// ```
/// use excerpt_truncate::is_void_element;
/// assert!(is_void_element("br"));
/// assert!(is_void_element("IMG"));
/// assert!(!is_void_element("p"));
/// ```
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(name))
}

/// Stack of currently open, non-void elements; outermost first.
#[derive(Clone, Debug, Default)]
pub(crate) struct TagStack<'a> {
    open: Vec<&'a str>,
}

impl<'a> TagStack<'a> {
    /// Apply a tag found at byte `offset` of the input.
    ///
    /// Start tags are pushed and end tags must close the innermost open
    /// element. Void elements and nameless tags are ignored.
    pub(crate) fn apply(&mut self, tag: &Tag<'a>, offset: usize) -> Result<()> {
        if tag.name.is_empty() || is_void_element(tag.name) {
            return Ok(());
        }
        if !tag.closing {
            self.open.push(tag.name);
            return Ok(());
        }
        match self.open.last() {
            Some(open) if open.eq_ignore_ascii_case(tag.name) => {
                self.open.pop();
                Ok(())
            },
            open => exn::bail!(ErrorKind::UnbalancedTags {
                found: tag.name.to_string(),
                open: open.map(|name| name.to_string()),
                offset,
            }),
        }
    }

    /// Names of the elements still open, innermost first.
    pub(crate) fn closers(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.open.iter().rev().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.open.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn start(name: &str) -> Tag<'_> {
        Tag { name, closing: false, raw: "" }
    }

    fn end(name: &str) -> Tag<'_> {
        Tag { name, closing: true, raw: "" }
    }

    #[test]
    fn nested_tags_close_innermost_first() {
        let mut stack = TagStack::default();
        stack.apply(&start("h1"), 0).unwrap();
        stack.apply(&start("u"), 4).unwrap();
        assert_eq!(stack.closers().collect::<Vec<_>>(), vec!["u", "h1"]);
        stack.apply(&end("u"), 8).unwrap();
        assert_eq!(stack.closers().collect::<Vec<_>>(), vec!["h1"]);
    }

    #[rstest]
    #[case("br")]
    #[case("img")]
    #[case("wbr")]
    #[case("HR")]
    #[case("")]
    fn ignored_tags(#[case] name: &str) {
        let mut stack = TagStack::default();
        stack.apply(&start(name), 0).unwrap();
        stack.apply(&end(name), 0).unwrap();
        assert_eq!(stack.len(), 0);
    }

    #[test]
    fn end_tags_match_case_insensitively() {
        let mut stack = TagStack::default();
        stack.apply(&start("B"), 0).unwrap();
        stack.apply(&end("b"), 3).unwrap();
        assert_eq!(stack.len(), 0);
    }

    #[test]
    fn mismatched_end_tag() {
        let mut stack = TagStack::default();
        stack.apply(&start("b"), 0).unwrap();
        let err = stack.apply(&end("i"), 7).unwrap_err();
        assert_eq!(*err, ErrorKind::UnbalancedTags {
            found: "i".to_string(),
            open: Some("b".to_string()),
            offset: 7
        });
    }

    #[test]
    fn end_tag_with_nothing_open() {
        let mut stack = TagStack::default();
        let err = stack.apply(&end("p"), 0).unwrap_err();
        assert!(matches!(*err, ErrorKind::UnbalancedTags { open: None, .. }));
    }
}
