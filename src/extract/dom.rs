//! Minimal DOM capabilities over the HTML parser
//!
//! The extractor navigates pages exclusively through these helpers, so the
//! parser surface in use stays small: first match, scoped first match,
//! normalized text, and "first match after this element in document order"
//! (the tree's pre-order traversal).

use scraper::{ElementRef, Html, Selector};

/// First element in the document matching `selector`
pub fn first<'a>(document: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
    document.select(selector).next()
}

/// First descendant of `scope` matching `selector`
pub fn first_in<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    scope.select(selector).next()
}

/// First element matching `selector` whose normalized text equals `text`
pub fn first_with_text<'a>(
    document: &'a Html,
    selector: &Selector,
    text: &str,
) -> Option<ElementRef<'a>> {
    document
        .select(selector)
        .find(|element| text_of(*element) == text)
}

/// First element matching `selector` that appears strictly after `anchor`
/// in document order
pub fn find_next<'a>(
    document: &'a Html,
    anchor: ElementRef<'a>,
    selector: &Selector,
) -> Option<ElementRef<'a>> {
    let mut past_anchor = false;
    for node in document.tree.root().descendants() {
        if node.id() == anchor.id() {
            past_anchor = true;
            continue;
        }
        if !past_anchor {
            continue;
        }
        if let Some(element) = ElementRef::wrap(node) {
            if selector.matches(&element) {
                return Some(element);
            }
        }
    }
    None
}

/// Whitespace-normalized text content of an element
pub fn text_of(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A trimmed attribute value, if present and non-empty
pub fn attr_of(element: ElementRef, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
