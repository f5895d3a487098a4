use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Anchored patterns are matched against the remainder of the input at the
// cursor, so `\A` pins them to the cursor position.
regex!(COMMENT_REGEX, r"(?s)\A<!--.*?-->");
regex!(DECLARATION_REGEX, r"\A<![A-Za-z][^<>]*>");
regex!(TAG_REGEX, r"\A<(/?)(?:([A-Za-z0-9]+(?:[-:][A-Za-z0-9]+)*)[^>]*)?>");
regex!(ENTITY_REGEX, r"\A&#?[A-Za-z0-9]+;");
// Unanchored, for locating the last comment anywhere in a document.
regex!(ANY_COMMENT_REGEX, r"(?s)<!--.*?-->");

/// Elements that never take a closing tag, so are never left open.
pub(crate) const VOID_ELEMENTS: [&str; 15] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param", "source", "track",
    "wbr",
];
