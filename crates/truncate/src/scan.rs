//! Tokenizer for the handful of markup constructs truncation cares about.
//!
//! Everything is either markup the reader never sees (comments, declarations
//! and tags), an entity standing in for one character, or a run of plain text.
//! Tokens are recognised with anchored patterns at the cursor; there is no
//! grammar beyond that.

use crate::consts;
use memchr::memchr2;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Tag<'a> {
    /// Tag name as written; empty for `<>` and `</>`.
    pub name: &'a str,
    pub closing: bool,
    /// The full tag, `<` to `>` inclusive.
    pub raw: &'a str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// `<!-- ... -->`, matched as a whole.
    Comment(&'a str),
    /// A `<!` construct that isn't a comment, such as `<!DOCTYPE html>`.
    Declaration(&'a str),
    Tag(Tag<'a>),
    /// `&name;` or `&#123;`, worth exactly one visible character.
    Entity(&'a str),
    /// Plain text up to (not including) the next `<` or `&`. Unrecognised
    /// `<` and `&` characters lead their own run as literal text.
    Text(&'a str),
}

impl<'a> Token<'a> {
    /// Recognise the token at the start of `rest`, which must be non-empty.
    pub(crate) fn lex(rest: &'a str) -> Self {
        let bytes = rest.as_bytes();
        match bytes[0] {
            b'<' if bytes.get(1) == Some(&b'!') => {
                if let Some(m) = consts::COMMENT_REGEX.find(rest) {
                    return Token::Comment(m.as_str());
                }
                if let Some(m) = consts::DECLARATION_REGEX.find(rest) {
                    return Token::Declaration(m.as_str());
                }
            },
            b'<' => {
                if let Some(captures) = consts::TAG_REGEX.captures(rest)
                    && let Some(raw) = captures.get(0)
                {
                    return Token::Tag(Tag {
                        name: captures.get(2).map_or("", |m| m.as_str()),
                        closing: captures.get(1).is_some_and(|m| !m.is_empty()),
                        raw: raw.as_str(),
                    });
                }
            },
            b'&' => {
                if let Some(m) = consts::ENTITY_REGEX.find(rest) {
                    return Token::Entity(m.as_str());
                }
            },
            _ => {},
        }
        if matches!(bytes[0], b'<' | b'&') {
            trace!(found = %(bytes[0] as char), "unrecognised markup, treating it as text");
        }
        // The first byte is either plain text or a literal `<`/`&`, so the run
        // always covers at least one character. Both delimiters are ASCII and
        // therefore always sit on a character boundary.
        let end = memchr2(b'<', b'&', &bytes[1..]).map_or(rest.len(), |i| i + 1);
        Token::Text(&rest[..end])
    }

    /// Length of the token in bytes.
    pub(crate) fn len(&self) -> usize {
        match self {
            Token::Comment(s) | Token::Declaration(s) | Token::Entity(s) | Token::Text(s) => s.len(),
            Token::Tag(tag) => tag.raw.len(),
        }
    }
}

/// Iterator over the tokens of a document, paired with their byte offsets.
#[derive(Clone, Debug)]
pub(crate) struct Tokens<'a> {
    html: &'a str,
    cursor: usize,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(html: &'a str) -> Self {
        Self { html, cursor: 0 }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = (usize, Token<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.html.len() {
            return None;
        }
        let offset = self.cursor;
        let token = Token::lex(&self.html[offset..]);
        self.cursor += token.len();
        Some((offset, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("<!-- note -->rest", Token::Comment("<!-- note -->"))]
    #[case("<!--\nspans\nlines\n-->", Token::Comment("<!--\nspans\nlines\n-->"))]
    #[case("<!DOCTYPE html><html>", Token::Declaration("<!DOCTYPE html>"))]
    #[case("<!-- x <b>", Token::Text("<!-- x "))]
    #[case("<!DOCTYPE <b>", Token::Text("<!DOCTYPE "))]
    #[case("<!>", Token::Text("<!>"))]
    #[case("&copy; 2024", Token::Entity("&copy;"))]
    #[case("&#169;", Token::Entity("&#169;"))]
    #[case("&#x;", Token::Entity("&#x;"))]
    #[case("plain text<b>", Token::Text("plain text"))]
    #[case("fish & chips", Token::Text("fish "))]
    #[case("& chips", Token::Text("& chips"))]
    #[case("&amp chips", Token::Text("&amp chips"))]
    #[case("1 < 2", Token::Text("1 "))]
    #[case("< 2", Token::Text("< 2"))]
    #[case("<3 & more", Token::Text("<3 "))]
    #[case("😄<", Token::Text("😄"))]
    fn test_lex(#[case] input: &str, #[case] expected: Token<'static>) {
        assert_eq!(Token::lex(input), expected);
    }

    #[rstest]
    #[case("<b>text", "<b>", "b", false)]
    #[case("</b>", "</b>", "b", true)]
    #[case("<img blah blah>i", "<img blah blah>", "img", false)]
    #[case("<img />", "<img />", "img", false)]
    #[case("<a href=\"/x\"\n   title=\"y\">", "<a href=\"/x\"\n   title=\"y\">", "a", false)]
    #[case("<my-element data-x=1>", "<my-element data-x=1>", "my-element", false)]
    #[case("</svg:path>", "</svg:path>", "svg:path", true)]
    #[case("<H1>", "<H1>", "H1", false)]
    #[case("<>", "<>", "", false)]
    #[case("</>", "</>", "", true)]
    fn test_lex_tag(#[case] input: &str, #[case] raw: &str, #[case] name: &str, #[case] closing: bool) {
        let Token::Tag(tag) = Token::lex(input) else {
            panic!("expected a tag from {input:?}");
        };
        assert_eq!((tag.raw, tag.name, tag.closing), (raw, name, closing));
    }

    #[test]
    fn unterminated_tag_is_text() {
        assert_eq!(Token::lex("<b class"), Token::Text("<b class"));
    }

    #[test]
    fn tokens_cover_the_whole_input() {
        let html = "<p>1 &amp; 2<!-- c --></p>";
        let tokens: Vec<_> = Tokens::new(html).collect();
        assert_eq!(tokens, vec![
            (0, Token::Tag(Tag { name: "p", closing: false, raw: "<p>" })),
            (3, Token::Text("1 ")),
            (5, Token::Entity("&amp;")),
            (10, Token::Text(" 2")),
            (12, Token::Comment("<!-- c -->")),
            (22, Token::Tag(Tag { name: "p", closing: true, raw: "</p>" })),
        ]);
        let total: usize = tokens.iter().map(|(_, token)| token.len()).sum();
        assert_eq!(total, html.len());
    }

    #[test]
    fn tokens_of_empty_input() {
        assert_eq!(Tokens::new("").next(), None);
    }
}
