// ABOUTME: Text extraction for element subtrees.
// ABOUTME: Joins descendant text nodes, treating block elements and <br> as word breaks.

use ego_tree::iter::Edge;
use ego_tree::NodeRef;
use scraper::Node;

/// Elements whose boundaries separate words in rendered text.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "br",
    "dd",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "tr",
    "ul",
];

fn is_block(name: &str) -> bool {
    BLOCK_TAGS.contains(&name)
}

/// Collapses runs of whitespace into single spaces and trims both ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the normalized text of `node` and everything below it.
///
/// Inline markup is transparent (`a<b>b</b>` gives `ab`); block elements
/// and `<br>` insert a break (`<p>a</p><p>b</p>` gives `a b`).
pub fn subtree_text(node: NodeRef<'_, Node>) -> String {
    let mut buf = String::new();
    for edge in node.traverse() {
        match edge {
            Edge::Open(n) => match n.value() {
                Node::Text(t) => buf.push_str(t),
                Node::Element(el) if is_block(el.name()) => buf.push(' '),
                _ => {}
            },
            Edge::Close(n) => {
                if let Node::Element(el) = n.value() {
                    if is_block(el.name()) {
                        buf.push(' ');
                    }
                }
            }
        }
    }
    normalize_whitespace(&buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn body_text(html: &str) -> String {
        let doc = Html::parse_fragment(html);
        subtree_text(*doc.root_element())
    }

    #[test]
    fn normalize_collapses_and_trims() {
        assert_eq!(normalize_whitespace("  a \n\t b  "), "a b");
        assert_eq!(normalize_whitespace(" \n "), "");
    }

    #[test]
    fn inline_markup_does_not_split_words() {
        assert_eq!(body_text("<span>Post<b>gres</b>QL</span>"), "PostgresQL");
    }

    #[test]
    fn block_elements_and_br_split_words() {
        assert_eq!(body_text("<div><p>one</p><p>two</p>three<br>four</div>"), "one two three four");
    }

    #[test]
    fn comments_are_ignored() {
        assert_eq!(body_text("<p>a<!-- hidden -->b</p>"), "ab");
    }
}
