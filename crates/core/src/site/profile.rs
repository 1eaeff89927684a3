use crate::error::Result;
use crate::parse::{Document, Element, parse_selector};

/// Structural knowledge about one source site.
///
/// Extraction code asks the profile where things are and never hardcodes a
/// site convention itself, so supporting a new site means supplying a new
/// profile rather than touching the pipeline.
pub trait SiteProfile: Send + Sync + std::fmt::Debug {
    /// Container on the index page whose anchors are the chapter links.
    fn locate_chapter_list<'a>(&self, doc: &'a Document) -> Option<Element<'a>>;

    /// Container on a chapter page holding the reading text.
    fn locate_content<'a>(&self, doc: &'a Document) -> Option<Element<'a>>;

    /// Substrings marking watermark lines that must be dropped.
    fn boilerplate_markers(&self) -> &[String];
}

/// Profile that finds the reading area by its inline style.
///
/// The content container is the first `content_tag` element whose `style`
/// attribute contains every fragment in `content_style` verbatim. The
/// default matches sites that render chapters in
/// `<div style="font-size: 20px; line-height: 30px">` and list chapters under
/// `#tbchapterlist`.
#[derive(Debug, Clone)]
pub struct StyleFingerprintProfile {
    chapter_list: String,
    content_tag: String,
    content_style: Vec<String>,
    strip_lines: Vec<String>,
}

impl StyleFingerprintProfile {
    /// Builds a profile, validating that both selectors parse.
    pub fn new(
        chapter_list: &str, content_tag: &str, content_style: Vec<String>, strip_lines: Vec<String>,
    ) -> Result<Self> {
        let profile = Self {
            chapter_list: chapter_list.to_string(),
            content_tag: content_tag.to_ascii_lowercase(),
            content_style,
            strip_lines,
        };
        parse_selector(&profile.chapter_list)?;
        parse_selector(&profile.content_selector())?;
        Ok(profile)
    }

    /// Replaces the boilerplate markers.
    pub fn with_strip_lines(mut self, strip_lines: Vec<String>) -> Self {
        self.strip_lines = strip_lines;
        self
    }

    pub fn content_tag(&self) -> &str {
        &self.content_tag
    }

    pub fn content_style(&self) -> &[String] {
        &self.content_style
    }

    fn content_selector(&self) -> String {
        format!("{}[style]", self.content_tag)
    }

    fn style_matches(&self, style: &str) -> bool {
        self.content_style.iter().all(|fragment| style.contains(fragment.as_str()))
    }
}

impl Default for StyleFingerprintProfile {
    fn default() -> Self {
        Self {
            chapter_list: "#tbchapterlist".to_string(),
            content_tag: "div".to_string(),
            content_style: vec!["font-size: 20px".to_string(), "line-height: 30px".to_string()],
            strip_lines: vec!["請記住本站域名".to_string()],
        }
    }
}

impl SiteProfile for StyleFingerprintProfile {
    fn locate_chapter_list<'a>(&self, doc: &'a Document) -> Option<Element<'a>> {
        // Selectors are validated in `new`; the default ones are literals.
        let selector = parse_selector(&self.chapter_list).ok()?;
        doc.find(&selector)
    }

    fn locate_content<'a>(&self, doc: &'a Document) -> Option<Element<'a>> {
        let selector = parse_selector(&self.content_selector()).ok()?;
        doc.select_with(&selector)
            .into_iter()
            .find(|el| el.attr("style").is_some_and(|style| self.style_matches(style)))
    }

    fn boilerplate_markers(&self) -> &[String] {
        &self.strip_lines
    }
}
