//! The fetch, extract, translate, write loop.
//!
//! [`Pipeline::run`] resolves the chapter list once, then walks the selected
//! window strictly in order. Failures are scoped: a chapter that cannot be
//! fetched, parsed or written is recorded in the [`RunSummary`] and skipped,
//! while a failure on the index page aborts the run.

use std::fmt;
use std::ops::Range;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::chapter::{ChapterRef, ExtractedChapter};
use crate::content::extract_text;
use crate::fetch::{FetchConfig, Transport, fetch_with_retry};
use crate::links::extract_links;
use crate::output::OutputArtifact;
use crate::pace::Pacer;
use crate::site::SiteProfile;
use crate::translate::{LineTranslator, TranslationConfig, Translator};
use crate::{Result, SerialistError};

/// Default directory for written chapters.
pub const DEFAULT_OUTPUT_DIR: &str = "novel_output";

/// Everything one run needs to know.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub index_url: Url,
    pub output_dir: PathBuf,
    pub window: ChapterWindow,
    /// Pause after each written chapter.
    pub request_delay: Duration,
    pub fetch: FetchConfig,
    /// `None` disables translation; text is written as extracted.
    pub translation: Option<TranslationConfig>,
}

impl PipelineConfig {
    /// Config with the stock defaults: all chapters, 3 second pacing,
    /// `zh-TW` to `en` translation, output in `novel_output`.
    pub fn new(index_url: Url) -> Self {
        Self {
            index_url,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            window: ChapterWindow::default(),
            request_delay: Duration::from_secs(3),
            fetch: FetchConfig::default(),
            translation: Some(TranslationConfig::default()),
        }
    }

    pub fn is_translating(&self) -> bool {
        self.translation.is_some()
    }
}

/// Contiguous slice of the chapter list selected for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChapterWindow {
    /// 0-based index of the first chapter to process.
    pub start_from: usize,
    /// Upper bound on processed chapters; `None` means all remaining.
    pub max_chapters: Option<usize>,
}

impl ChapterWindow {
    pub fn new(start_from: usize, max_chapters: Option<usize>) -> Self {
        Self { start_from, max_chapters }
    }

    /// `[start_from, start_from + max_chapters)` clipped to `total`.
    ///
    /// ```rust
    /// use serialist_core::ChapterWindow;
    ///
    /// assert_eq!(ChapterWindow::new(5, Some(3)).range(10), 5..8);
    /// assert!(ChapterWindow::new(10, None).range(10).is_empty());
    /// ```
    pub fn range(&self, total: usize) -> Range<usize> {
        if self.start_from >= total {
            return total..total;
        }
        let end = match self.max_chapters {
            Some(max) => self.start_from.saturating_add(max).min(total),
            None => total,
        };
        self.start_from..end
    }
}

/// Stage at which a chapter was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Fetch,
    Extract,
    Write,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Self::Fetch => "fetch",
            Self::Extract => "extract",
            Self::Write => "write",
        };
        f.write_str(stage)
    }
}

/// A chapter that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterFailure {
    pub index: usize,
    pub chapter: ChapterRef,
    pub stage: FailureStage,
    pub reason: String,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Chapters found on the index page.
    pub discovered: usize,
    /// Indices selected by the window.
    pub window: Range<usize>,
    /// Files written, in chapter order.
    pub written: Vec<PathBuf>,
    pub failures: Vec<ChapterFailure>,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Sequential chapter pipeline over injected capabilities.
pub struct Pipeline {
    config: PipelineConfig,
    transport: Arc<dyn Transport>,
    translator: LineTranslator,
    profile: Arc<dyn SiteProfile>,
    pacer: Pacer,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("translator", &self.translator)
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Builds a pipeline. `translator` is only consulted when
    /// `config.translation` is set; otherwise lines pass through unchanged.
    pub fn new(
        config: PipelineConfig, transport: Arc<dyn Transport>, translator: Arc<dyn Translator>,
        profile: Arc<dyn SiteProfile>,
    ) -> Self {
        let translator = match &config.translation {
            Some(translation) => LineTranslator::new(translator, translation),
            None => LineTranslator::pass_through(),
        };
        let pacer = Pacer::new(config.request_delay);

        Self { config, transport, translator, profile, pacer }
    }

    /// Pipeline over the real network: reqwest transport and Google
    /// Translate, sharing the fetch timeout.
    #[cfg(feature = "fetch")]
    pub fn over_http(config: PipelineConfig, profile: Arc<dyn SiteProfile>) -> Result<Self> {
        let translator: Arc<dyn Translator> = if config.is_translating() {
            Arc::new(crate::translate::GoogleTranslator::new(Duration::from_secs(config.fetch.timeout))?)
        } else {
            Arc::new(crate::translate::PassThrough)
        };
        let transport = Arc::new(crate::fetch::HttpTransport::new());

        Ok(Self::new(config, transport, translator, profile))
    }

    /// Runs to completion.
    ///
    /// # Errors
    ///
    /// Only run-level failures: the output directory cannot be created, the
    /// index page cannot be fetched, or its chapter list is missing.
    /// Chapter-level failures are reported in [`RunSummary::failures`].
    pub async fn run(&self) -> Result<RunSummary> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let index_html = fetch_with_retry(self.transport.as_ref(), &self.config.index_url, &self.config.fetch)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "failed to fetch index page"))?;
        let chapters = extract_links(&index_html, &self.config.index_url, self.profile.as_ref())?;

        let total = chapters.len();
        let window = self.config.window.range(total);
        tracing::info!("Total chapters discovered: {total}");

        let mut summary = RunSummary { discovered: total, window: window.clone(), ..Default::default() };
        if window.is_empty() {
            tracing::info!(
                start_from = self.config.window.start_from,
                total,
                "window selects no chapters, nothing to do"
            );
            return Ok(summary);
        }

        for index in window {
            let chapter = &chapters[index];
            match self.process_chapter(index, chapter, total).await {
                Ok(path) => {
                    tracing::info!("Saved file: {}", path.display());
                    summary.written.push(path);
                    self.pacer.wait().await;
                }
                Err((stage, e)) => {
                    tracing::warn!(index, title = %chapter.title, %stage, error = %e, "skipping chapter");
                    summary.failures.push(ChapterFailure {
                        index,
                        chapter: chapter.clone(),
                        stage,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(summary)
    }

    async fn process_chapter(
        &self, index: usize, chapter: &ChapterRef, total: usize,
    ) -> std::result::Result<PathBuf, (FailureStage, SerialistError)> {
        tracing::info!("==== Chapter {}/{}: {} ====", index + 1, total, chapter.title);
        tracing::info!("URL: {}", chapter.url);

        let html = fetch_with_retry(self.transport.as_ref(), &chapter.url, &self.config.fetch)
            .await
            .map_err(|e| (FailureStage::Fetch, e))?;

        let lines = extract_text(&html, self.profile.as_ref()).map_err(|e| (FailureStage::Extract, e))?;
        let extracted = ExtractedChapter { index, chapter: chapter.clone(), lines };
        tracing::debug!(index, lines = extracted.lines.len(), "extracted");

        let lines = self.translator.translate_lines(&extracted.lines).await;

        let artifact = OutputArtifact::new(
            &self.config.output_dir,
            extracted.number(),
            &extracted.chapter.title,
            self.config.is_translating(),
            &lines,
        );
        artifact.write().map_err(|e| (FailureStage::Write, e))?;

        Ok(artifact.path)
    }
}
