//! HTML parsing and DOM access.
//!
//! This module provides the [`Document`] and [`Element`] types used by the
//! link and content extractors. Both are thin wrappers over `scraper`, so the
//! rest of the crate never touches the parser directly.
//!
//! # Example
//!
//! ```rust
//! use serialist_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <div id="tbchapterlist"><a href="/1.html">Chapter 1</a></div>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let links = doc.select("#tbchapterlist a").unwrap();
//! assert_eq!(links[0].text(), "Chapter 1");
//! ```

use scraper::{Html, Selector};

use crate::{Result, SerialistError};

/// Parses a CSS selector, mapping failures to [`SerialistError::HtmlParse`].
pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SerialistError::HtmlParse(format!("Invalid selector {selector:?}: {e}")))
}

/// Represents a parsed HTML document.
///
/// # Example
///
/// ```rust
/// use serialist_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.select("p").unwrap()[0].text(), "Hello");
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Parsing is lenient: malformed markup yields a best-effort tree rather
    /// than an error, the way browsers treat it.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`SerialistError::HtmlParse`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use serialist_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.select_with(&sel))
    }

    /// Selects elements using an already parsed selector, in document order.
    pub fn select_with(&'_ self, selector: &Selector) -> Vec<Element<'_>> {
        self.html.select(selector).map(|el| Element { element: el }).collect()
    }

    /// Returns the first element matching `selector`, if any.
    pub fn find(&'_ self, selector: &Selector) -> Option<Element<'_>> {
        self.html.select(selector).next().map(|el| Element { element: el })
    }
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use serialist_core::parse::Document;
///
/// let html = r#"<a href="/chapter/1.html">Chapter 1</a>"#;
/// let doc = Document::parse(html).unwrap();
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Chapter 1");
/// assert_eq!(link.attr("href"), Some("/chapter/1.html"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Text of this element flattened to lines.
    ///
    /// Text nodes are separated by line breaks and split on embedded newlines;
    /// every line is trimmed and blank ones are dropped, so
    /// `<div>a<br>b\n c</div>` yields `["a", "b", "c"]`.
    pub fn text_lines(&self) -> Vec<String> {
        self.element
            .text()
            .flat_map(str::lines)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`SerialistError::HtmlParse`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = parse_selector(selector)?;
        Ok(self.select_with(&sel))
    }

    /// Selects descendant elements using an already parsed selector.
    pub fn select_with(&self, selector: &Selector) -> Vec<Element<'a>> {
        self.element.select(selector).map(|el| Element { element: el }).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="zh-TW">
        <head>
            <meta charset="UTF-8">
            <title>Test Page</title>
        </head>
        <body>
            <div id="content" style="font-size: 20px; line-height: 30px;">
                第一行<br>
                第二行
                <p>段落</p>
            </div>
            <a href="/chapter/2.html">Next</a>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_document() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        assert_eq!(doc.select("#content").unwrap().len(), 1);
    }

    #[test]
    fn test_element_attributes() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let elements = doc.select("a").unwrap();

        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].attr("href"), Some("/chapter/2.html"));
        assert_eq!(elements[0].text(), "Next");
    }

    #[test]
    fn test_text_lines_flatten_nodes() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let content = doc.find(&parse_selector("#content").unwrap()).unwrap();

        assert_eq!(content.text_lines(), vec!["第一行", "第二行", "段落"]);
    }

    #[test]
    fn test_nested_select_keeps_document_order() {
        let doc = Document::parse("<div><p>a</p><br><p>b</p></div>").unwrap();
        let div = doc.select("div").unwrap()[0];
        let texts: Vec<String> = div.select("p, br").unwrap().iter().map(|e| e.text()).collect();

        assert_eq!(texts, vec!["a", "", "b"]);
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let result = doc.select("[[invalid");

        assert!(matches!(result, Err(SerialistError::HtmlParse(_))));
    }
}
