use crate::error::{Result, SerialistError};
use crate::site::directives::{Directive, parse_directive};
use crate::site::profile::StyleFingerprintProfile;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Site profile file parser
///
/// ```text
/// # example.com
/// chapter_list: #tbchapterlist
/// content_tag: div
/// content_style: font-size: 20px
/// content_style: line-height: 30px
/// strip_line: 請記住本站域名
/// ```
#[derive(Debug)]
pub struct ProfileParser;

impl ProfileParser {
    /// Parse a single profile file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<StyleFingerprintProfile> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SerialistError::FileNotFound(path.to_path_buf()),
            _ => SerialistError::SiteConfig(format!("Cannot open file {}: {}", path.display(), e)),
        })?;

        Self::parse_reader(BufReader::new(file))
    }

    /// Parse a profile from a reader
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<StyleFingerprintProfile> {
        let mut directives = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line
                .map_err(|e| SerialistError::SiteConfig(format!("Read error at line {}: {}", line_number, e)))?;
            if let Some(directive) = Self::parse_line(&line, line_number)? {
                directives.push(directive);
            }
        }

        Self::build(directives)
    }

    /// Parse a profile from a string
    pub fn parse_string(content: &str) -> Result<StyleFingerprintProfile> {
        let mut directives = Vec::new();

        for (index, line) in content.lines().enumerate() {
            if let Some(directive) = Self::parse_line(line, index + 1)? {
                directives.push(directive);
            }
        }

        Self::build(directives)
    }

    fn parse_line(line: &str, line_number: usize) -> Result<Option<Directive>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        parse_directive(line)
            .map(Some)
            .map_err(|e| SerialistError::SiteConfig(format!("Parse error at line {}: {}", line_number, e)))
    }

    fn build(directives: Vec<Directive>) -> Result<StyleFingerprintProfile> {
        let mut chapter_list = None;
        let mut content_tag = None;
        let mut content_style = Vec::new();
        let mut strip_lines = Vec::new();

        for directive in directives {
            match directive {
                Directive::ChapterList(selector) => chapter_list = Some(selector),
                Directive::ContentTag(tag) => content_tag = Some(tag),
                Directive::ContentStyle(fragment) => content_style.push(fragment),
                Directive::StripLine(marker) => strip_lines.push(marker),
            }
        }

        let chapter_list =
            chapter_list.ok_or_else(|| SerialistError::SiteConfig("Missing chapter_list directive".to_string()))?;
        if content_style.is_empty() {
            return Err(SerialistError::SiteConfig(
                "At least one content_style directive is required".to_string(),
            ));
        }

        StyleFingerprintProfile::new(
            &chapter_list,
            content_tag.as_deref().unwrap_or("div"),
            content_style,
            strip_lines,
        )
    }
}
