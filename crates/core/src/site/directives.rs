use crate::error::{Result, SerialistError};

/// Represents a single profile directive
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// CSS selector for the chapter-list container on the index page
    ChapterList(String),

    /// Tag name of the reading-content container
    ContentTag(String),
    /// Inline-style fragment the content container must declare
    ContentStyle(String),

    /// Marker substring; lines containing it are dropped
    StripLine(String),
}

/// Parse a directive line from profile file format
///
/// Only the first colon separates key from value, so style fragments such as
/// `content_style: font-size: 20px` keep their own colon.
pub fn parse_directive(line: &str) -> Result<Directive> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Err(SerialistError::SiteConfig("Empty or comment line".to_string()));
    }

    let (key, value) = line
        .split_once(':')
        .ok_or_else(|| SerialistError::SiteConfig(format!("Invalid directive format: {}", line)))?;
    let key = key.trim();
    let value = value.trim();

    if value.is_empty() {
        return Err(SerialistError::SiteConfig(format!("Missing value for directive: {}", key)));
    }

    match key {
        "chapter_list" => Ok(Directive::ChapterList(value.to_string())),
        "content_tag" => Ok(Directive::ContentTag(value.to_ascii_lowercase())),
        "content_style" => Ok(Directive::ContentStyle(value.to_string())),
        "strip_line" => Ok(Directive::StripLine(value.to_string())),
        _ => Err(SerialistError::SiteConfig(format!("Unknown directive: {}", key))),
    }
}
