//! Reading-text extraction from a chapter page.

use crate::parse::{Document, Element};
use crate::site::SiteProfile;
use crate::{Result, SerialistError};

/// Extracts the reading text of a chapter page as trimmed, non-empty lines.
///
/// The container comes from [`SiteProfile::locate_content`]. Lines are taken
/// from its `<p>` and `<br>` descendants; if that yields nothing, the
/// container's whole text is split into lines instead. Lines containing any of
/// the profile's boilerplate markers are then dropped.
///
/// # Errors
///
/// [`SerialistError::Structure`] when the container is absent, or when it
/// holds no text once boilerplate is removed.
pub fn extract_text(chapter_html: &str, profile: &dyn SiteProfile) -> Result<Vec<String>> {
    let doc = Document::parse(chapter_html)?;
    let container = profile.locate_content(&doc).ok_or_else(|| {
        SerialistError::Structure("could not find chapter text container, structure may have changed".to_string())
    })?;

    let mut lines = block_lines(&container)?;
    if lines.is_empty() {
        tracing::debug!("no paragraph lines, falling back to raw text");
        lines = container.text_lines();
    }

    let markers = profile.boilerplate_markers();
    let before = lines.len();
    lines.retain(|line| !markers.iter().any(|marker| line.contains(marker.as_str())));
    if lines.len() != before {
        tracing::debug!(dropped = before - lines.len(), "removed boilerplate lines");
    }

    if lines.is_empty() {
        return Err(SerialistError::Structure("chapter text container is empty".to_string()));
    }

    Ok(lines)
}

/// Lines of each `<p>`/`<br>` under `container`.
///
/// A paragraph that wraps in the source yields one line per source line.
fn block_lines(container: &Element<'_>) -> Result<Vec<String>> {
    Ok(container
        .select("p, br")?
        .iter()
        .flat_map(|el| {
            el.text()
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StyleFingerprintProfile;

    const CONTENT_STYLE: &str = "font-size: 20px; line-height: 30px;";

    fn page(inner: &str) -> String {
        format!(
            r#"<html><body>
                <div class="nav">上一章 | 目錄 | 下一章</div>
                <div style="{CONTENT_STYLE}">{inner}</div>
            </body></html>"#
        )
    }

    #[test]
    fn test_paragraphs_in_order() {
        let html = page("<p>第一段</p><p>  第二段  </p><p></p><p>第三段</p>");

        let lines = extract_text(&html, &StyleFingerprintProfile::default()).unwrap();
        assert_eq!(lines, vec!["第一段", "第二段", "第三段"]);
    }

    #[test]
    fn test_wrapped_paragraph_splits_into_lines() {
        let html = page("<p>\n  first\n  second\n</p><p>third</p>");

        let lines = extract_text(&html, &StyleFingerprintProfile::default()).unwrap();
        assert_eq!(lines, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_boilerplate_lines_dropped() {
        let html = page("<p>正文</p><p>請記住本站域名：example.com</p><p>續</p>");

        let lines = extract_text(&html, &StyleFingerprintProfile::default()).unwrap();
        assert_eq!(lines, vec!["正文", "續"]);
    }

    #[test]
    fn test_marker_is_plain_substring_not_pattern() {
        let profile = StyleFingerprintProfile::default().with_strip_lines(vec!["a.c".to_string()]);
        let html = page("<p>abc</p><p>xa.cx</p>");

        let lines = extract_text(&html, &profile).unwrap();
        assert_eq!(lines, vec!["abc"]);
    }

    #[test]
    fn test_fallback_to_text_nodes_when_no_paragraphs() {
        let html = page("\n  第一行\n\n  第二行  <span>第三行</span>\n");

        let lines = extract_text(&html, &StyleFingerprintProfile::default()).unwrap();
        assert_eq!(lines, vec!["第一行", "第二行", "第三行"]);
    }

    #[test]
    fn test_missing_container_is_structure_error() {
        let html = r#"<div style="font-size: 16px">text</div>"#;

        let result = extract_text(html, &StyleFingerprintProfile::default());
        assert!(matches!(result, Err(SerialistError::Structure(_))));
    }

    #[test]
    fn test_container_with_only_boilerplate_fails() {
        let html = page("<p>請記住本站域名</p>");

        let result = extract_text(&html, &StyleFingerprintProfile::default());
        assert!(matches!(result, Err(SerialistError::Structure(_))));
    }

    #[test]
    fn test_empty_container_fails() {
        let html = page("   ");

        let result = extract_text(&html, &StyleFingerprintProfile::default());
        assert!(matches!(result, Err(SerialistError::Structure(_))));
    }
}
