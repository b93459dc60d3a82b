use anyhow::anyhow;
use scraper::{ElementRef, Html, Selector};

pub fn extract_text(node: ElementRef) -> String {
    node.text().collect::<String>()
}

/// Text of the node with every whitespace run collapsed to a single space.
pub fn extract_collapsed_text(node: ElementRef) -> String {
    collapse_whitespace(&extract_text(node))
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn selector(css: &str) -> anyhow::Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector `{css}`: {e}"))
}

/// Direct element children of `node`.
pub fn child_elements<'a>(node: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    node.children().filter_map(ElementRef::wrap)
}

/// Text of the first `li.error` marker on the page, if any.
pub fn find_error_marker(document: &Html) -> anyhow::Result<Option<String>> {
    let error_selector = selector("li.error")?;
    Ok(document
        .select(&error_selector)
        .next()
        .map(|node| extract_text(node).trim().to_string()))
}
