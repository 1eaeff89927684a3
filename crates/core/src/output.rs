//! Output artifacts: file naming and writing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

/// Characters that are invalid in file names on common file systems.
const INVALID_FILENAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Name used when a title sanitizes to nothing.
pub const FALLBACK_NAME: &str = "chapter";

/// Replaces file-system-invalid characters with `_` and trims the result.
///
/// A title made only of invalid characters and whitespace has nothing worth
/// keeping and becomes [`FALLBACK_NAME`].
///
/// ```rust
/// use serialist_core::sanitize_filename;
///
/// assert_eq!(sanitize_filename("A/B:C"), "A_B_C");
/// assert_eq!(sanitize_filename("???"), "chapter");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let is_invalid = |c: &char| INVALID_FILENAME_CHARS.contains(c);
    if name.chars().all(|c| is_invalid(&c) || c.is_whitespace()) {
        return FALLBACK_NAME.to_string();
    }

    let replaced: String = name.chars().map(|c| if is_invalid(&c) { '_' } else { c }).collect();
    replaced.trim().to_string()
}

/// `<4-digit number>_<sanitized title>[_en].txt`
pub fn artifact_file_name(number: usize, title: &str, translated: bool) -> String {
    let suffix = if translated { "_en" } else { "" };
    format!("{:04}_{}{}.txt", number, sanitize_filename(title), suffix)
}

/// A chapter ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub path: PathBuf,
    pub content: String,
}

impl OutputArtifact {
    /// Builds the artifact for chapter `number` (1-based) inside `dir`.
    pub fn new(dir: &Path, number: usize, title: &str, translated: bool, lines: &[String]) -> Self {
        Self { path: dir.join(artifact_file_name(number, title, translated)), content: lines.join("\n") }
    }

    /// Writes the content as UTF-8, replacing any existing file.
    pub fn write(&self) -> Result<()> {
        fs::write(&self.path, self.content.as_bytes())?;
        Ok(())
    }
}
