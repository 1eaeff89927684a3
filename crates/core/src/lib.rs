pub mod chapter;
pub mod content;
pub mod error;
pub mod fetch;
pub mod links;
pub mod output;
pub mod pace;
pub mod parse;
pub mod pipeline;
pub mod site;
pub mod translate;

pub use chapter::{ChapterRef, ExtractedChapter};
pub use content::extract_text;
pub use error::{Result, SerialistError};
#[cfg(feature = "fetch")]
pub use fetch::HttpTransport;
pub use fetch::{FetchConfig, HttpResponse, Transport, fetch_with_retry};
pub use links::extract_links;
pub use output::{OutputArtifact, artifact_file_name, sanitize_filename};
pub use pace::Pacer;
pub use parse::Document;
pub use pipeline::{ChapterFailure, ChapterWindow, FailureStage, Pipeline, PipelineConfig, RunSummary};
pub use site::{ProfileParser, SiteProfile, StyleFingerprintProfile};
#[cfg(feature = "fetch")]
pub use translate::GoogleTranslator;
pub use translate::{LineTranslator, PassThrough, TranslationConfig, Translator};
