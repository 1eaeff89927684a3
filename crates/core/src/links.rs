//! Chapter discovery on the index page.

use url::Url;

use crate::chapter::ChapterRef;
use crate::parse::Document;
use crate::site::SiteProfile;
use crate::{Result, SerialistError};

/// Lists the chapters linked from an index page, in document order.
///
/// Every `<a>` inside the profile's chapter-list container with both a
/// non-empty `href` and non-empty text becomes one [`ChapterRef`], its href
/// resolved against `index_url`. Anchors missing either are skipped.
///
/// # Errors
///
/// [`SerialistError::Structure`] when the container is absent.
///
/// # Example
///
/// ```rust
/// use serialist_core::{StyleFingerprintProfile, extract_links};
/// use url::Url;
///
/// let html = r#"<div id="tbchapterlist"><a href="1.html">第一章</a></div>"#;
/// let index = Url::parse("https://example.com/book/").unwrap();
/// let chapters = extract_links(html, &index, &StyleFingerprintProfile::default()).unwrap();
///
/// assert_eq!(chapters[0].url.as_str(), "https://example.com/book/1.html");
/// ```
pub fn extract_links(index_html: &str, index_url: &Url, profile: &dyn SiteProfile) -> Result<Vec<ChapterRef>> {
    let doc = Document::parse(index_html)?;
    let container = profile
        .locate_chapter_list(&doc)
        .ok_or_else(|| SerialistError::Structure("could not find the chapter list container".to_string()))?;

    let mut chapters = Vec::new();
    for anchor in container.select("a")? {
        let href = anchor.attr("href").map(str::trim).unwrap_or_default();
        let title = anchor.text();
        let title = title.trim();
        if href.is_empty() || title.is_empty() {
            continue;
        }

        match index_url.join(href) {
            Ok(url) => chapters.push(ChapterRef::new(title, url)),
            Err(e) => tracing::debug!(href, error = %e, "skipping unresolvable chapter link"),
        }
    }

    tracing::info!("Found {} chapters.", chapters.len());
    Ok(chapters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StyleFingerprintProfile;

    fn index_url() -> Url {
        Url::parse("https://novel.example.com/book/123/").unwrap()
    }

    #[test]
    fn test_links_in_document_order_and_absolute() {
        let html = r#"
            <a href="/elsewhere">Not a chapter</a>
            <div id="tbchapterlist">
                <ul>
                    <li><a href="1001.html">第一章 起</a></li>
                    <li><a href="/book/123/1002.html">第二章 承</a></li>
                    <li><a href="https://mirror.example.com/1003.html"> 第三章 轉 </a></li>
                </ul>
            </div>
        "#;

        let chapters = extract_links(html, &index_url(), &StyleFingerprintProfile::default()).unwrap();
        let urls: Vec<&str> = chapters.iter().map(|c| c.url.as_str()).collect();
        let titles: Vec<&str> = chapters.iter().map(|c| c.title.as_str()).collect();

        assert_eq!(
            urls,
            vec![
                "https://novel.example.com/book/123/1001.html",
                "https://novel.example.com/book/123/1002.html",
                "https://mirror.example.com/1003.html",
            ]
        );
        assert_eq!(titles, vec!["第一章 起", "第二章 承", "第三章 轉"]);
    }

    #[test]
    fn test_anchors_without_href_or_text_are_skipped() {
        let html = r#"
            <div id="tbchapterlist">
                <a>no href</a>
                <a href="">empty href</a>
                <a href="2.html">   </a>
                <a href="3.html"><img src="x.png"></a>
                <a href="4.html">kept</a>
            </div>
        "#;

        let chapters = extract_links(html, &index_url(), &StyleFingerprintProfile::default()).unwrap();
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, "kept");
    }

    #[test]
    fn test_duplicate_urls_are_kept() {
        let html = r#"<div id="tbchapterlist"><a href="1.html">One</a><a href="1.html">One again</a></div>"#;

        let chapters = extract_links(html, &index_url(), &StyleFingerprintProfile::default()).unwrap();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].url, chapters[1].url);
    }

    #[test]
    fn test_missing_container_is_structure_error() {
        let html = r#"<div id="chapters"><a href="1.html">One</a></div>"#;

        let result = extract_links(html, &index_url(), &StyleFingerprintProfile::default());
        assert!(matches!(result, Err(SerialistError::Structure(_))));
    }

    #[test]
    fn test_empty_container_yields_no_chapters() {
        let html = r#"<div id="tbchapterlist"></div>"#;

        let chapters = extract_links(html, &index_url(), &StyleFingerprintProfile::default()).unwrap();
        assert!(chapters.is_empty());
    }
}
