//! Chapter data types shared by the extractors and the pipeline.

use url::Url;

/// One entry of the index page: display title plus absolute URL.
///
/// The order of a `Vec<ChapterRef>` is the document order of the index page.
/// URLs are not deduplicated; a repeated link is a repeated chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterRef {
    pub title: String,
    pub url: Url,
}

impl ChapterRef {
    pub fn new(title: impl Into<String>, url: Url) -> Self {
        Self { title: title.into(), url }
    }
}

/// Text pulled out of one chapter page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedChapter {
    /// 0-based position in the full chapter list.
    pub index: usize,
    pub chapter: ChapterRef,
    /// Non-empty, trimmed lines in document order.
    pub lines: Vec<String>,
}

impl ExtractedChapter {
    /// 1-based chapter number used in file names and log output.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}
