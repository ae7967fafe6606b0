use ego_tree::iter::Edge;
use scraper::html::Select;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

use crate::ParseError;

/// Elements whose text never renders.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// A parsed HTML document, queried by CSS selector.
pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    /// Builds the DOM. The HTML parser recovers from any markup error, so the
    /// only unparseable input is an empty body.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        if source.trim().is_empty() {
            return Err(ParseError::EmptyDocument);
        }
        Ok(Self {
            html: Html::parse_document(source),
        })
    }

    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.html.select(selector)
    }

    /// Concatenates every text node outside script-like elements, in document order.
    pub fn visible_text(&self) -> String {
        let mut text = String::new();
        let mut hidden_depth = 0usize;
        for edge in self.html.tree.root().traverse() {
            match edge {
                Edge::Open(node) => match node.value() {
                    Node::Element(el) if is_hidden(el.name()) => hidden_depth += 1,
                    Node::Text(chunk) if hidden_depth == 0 => text.push_str(chunk),
                    _ => {}
                },
                Edge::Close(node) => {
                    if let Node::Element(el) = node.value() {
                        if is_hidden(el.name()) {
                            hidden_depth = hidden_depth.saturating_sub(1);
                        }
                    }
                }
            }
        }
        text
    }
}

/// Attribute value if the element declares it, even when empty.
pub fn attribute<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// All descendant text of `element`, untrimmed.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

pub(crate) fn static_selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

fn is_hidden(name: &str) -> bool {
    HIDDEN_ELEMENTS.iter().any(|hidden| hidden.eq_ignore_ascii_case(name))
}
