//! Line-by-line translation.
//!
//! [`Translator`] is the remote capability; [`LineTranslator`] drives it one
//! line at a time, substituting the source line whenever a request fails, and
//! pacing requests so the backend's rate limit is respected. Disabling
//! translation swaps in [`PassThrough`], so callers always see the same
//! contract.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::pace::Pacer;
use crate::{Result, SerialistError};

/// Remote translation capability.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `text` from `source` to `dest` (language codes such as
    /// `zh-TW` and `en`).
    async fn translate(&self, text: &str, source: &str, dest: &str) -> Result<String>;
}

/// Identity translator used when translation is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

#[async_trait]
impl Translator for PassThrough {
    async fn translate(&self, text: &str, _source: &str, _dest: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

/// Language pair and pacing for a translated run.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationConfig {
    pub source: String,
    pub dest: String,
    /// Pause after every line, successful or not.
    pub line_delay: Duration,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self { source: "zh-TW".to_string(), dest: "en".to_string(), line_delay: Duration::from_millis(500) }
    }
}

/// Sequential, failure-tolerant translator over a list of lines.
#[derive(Clone)]
pub struct LineTranslator {
    translator: Arc<dyn Translator>,
    source: String,
    dest: String,
    pacer: Pacer,
}

impl std::fmt::Debug for LineTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineTranslator")
            .field("source", &self.source)
            .field("dest", &self.dest)
            .field("pacer", &self.pacer)
            .finish_non_exhaustive()
    }
}

impl LineTranslator {
    pub fn new(translator: Arc<dyn Translator>, config: &TranslationConfig) -> Self {
        Self {
            translator,
            source: config.source.clone(),
            dest: config.dest.clone(),
            pacer: Pacer::new(config.line_delay),
        }
    }

    /// Identity transform with no pacing.
    pub fn pass_through() -> Self {
        Self {
            translator: Arc::new(PassThrough),
            source: String::new(),
            dest: String::new(),
            pacer: Pacer::unthrottled(),
        }
    }

    /// Translates each non-blank line in order.
    ///
    /// Blank lines are dropped from both input and output. A failed line is
    /// replaced by its source text and logged. The result always has one
    /// entry per non-blank input line.
    pub async fn translate_lines(&self, lines: &[String]) -> Vec<String> {
        let mut translated = Vec::with_capacity(lines.len());

        for (idx, line) in lines.iter().filter(|line| !line.trim().is_empty()).enumerate() {
            let out = match self.translator.translate(line, &self.source, &self.dest).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(line = idx + 1, error = %e, "translation error, keeping original line");
                    line.clone()
                }
            };
            translated.push(out);
            self.pacer.wait().await;
        }

        translated
    }
}

/// Google Translate client using the public `translate_a/single` endpoint.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: url::Url,
}

#[cfg(feature = "fetch")]
impl GoogleTranslator {
    pub const DEFAULT_ENDPOINT: &'static str = "https://translate.googleapis.com/translate_a/single";

    /// Creates a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SerialistError::Translation(format!("cannot build HTTP client: {e}")))?;
        Self::with_endpoint(client, Self::DEFAULT_ENDPOINT)
    }

    /// Points the client at another endpoint speaking the same protocol.
    pub fn with_endpoint(client: reqwest::Client, endpoint: &str) -> Result<Self> {
        let endpoint = url::Url::parse(endpoint).map_err(|e| SerialistError::InvalidUrl(e.to_string()))?;
        Ok(Self { client, endpoint })
    }
}

#[cfg(feature = "fetch")]
#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, source: &str, dest: &str) -> Result<String> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("sl", source)
            .append_pair("tl", dest)
            .append_pair("dt", "t")
            .append_pair("q", text);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SerialistError::Translation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SerialistError::Translation(format!("backend returned HTTP {}", status.as_u16())));
        }

        let body = response.text().await.map_err(|e| SerialistError::Translation(e.to_string()))?;
        parse_google_response(&body)
    }
}

/// Joins the translated segments of a `translate_a/single` reply.
///
/// The reply is a nested array whose first element lists
/// `[translated, original, ...]` segments.
pub fn parse_google_response(body: &str) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| SerialistError::Translation(format!("invalid reply: {e}")))?;

    let segments = value
        .get(0)
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| SerialistError::Translation("reply has no translation segments".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(serde_json::Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(SerialistError::Translation("empty translation".to_string()));
    }
    Ok(translated)
}
