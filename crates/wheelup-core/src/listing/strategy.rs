//! Extraction strategies for wheel names in a directory listing.
//!
//! Each strategy is a pure function over the parsed document. They differ only
//! in where they look for the file name, from most to least specific.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Node, Selector};

/// A named extraction strategy.
pub type Strategy = (&'static str, fn(&Html) -> Vec<String>);

/// Strategies in the order they are tried.
pub const CASCADE: [Strategy; 3] = [
    ("colname-cells", colname_cells),
    ("anchor-text", anchor_texts),
    ("text-nodes", text_nodes),
];

fn wheel_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^.*\.whl$").expect("static wheel pattern"))
}

/// True if the whole text (a single line) names a `.whl` file.
///
/// One trailing newline is tolerated, so a text node like `"x.whl\n"` still
/// counts. The text itself is returned to callers unchanged.
pub fn is_wheel_text(text: &str) -> bool {
    wheel_re().is_match(text.strip_suffix('\n').unwrap_or(text))
}

fn matching_element_texts(doc: &Html, selector: &str) -> Vec<String> {
    let selector = match Selector::parse(selector) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("bad selector {:?}: {:?}", selector, e);
            return Vec::new();
        }
    };
    doc.select(&selector)
        .map(|el| el.text().collect::<String>())
        .filter(|text| is_wheel_text(text))
        .collect()
}

/// Text of `<td class="colname">` cells. Object-storage style listings put the
/// object name in these cells.
pub fn colname_cells(doc: &Html) -> Vec<String> {
    matching_element_texts(doc, "td.colname")
}

/// Text of `<a>` elements, as in Apache/nginx autoindex pages.
pub fn anchor_texts(doc: &Html) -> Vec<String> {
    matching_element_texts(doc, "a")
}

/// Any text node in the document, whatever element holds it.
pub fn text_nodes(doc: &Html) -> Vec<String> {
    doc.tree
        .nodes()
        .filter_map(|node| match node.value() {
            Node::Text(text) if is_wheel_text(text) => Some(text.to_string()),
            _ => None,
        })
        .collect()
}
