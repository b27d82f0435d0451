pub mod html;

#[cfg(test)]
mod tests;

use crate::results::ExtractionResult;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Marker that opens the job description section
pub const JOB_MARKER: &str = "About the job";

/// Marker that opens the company section
pub const COMPANY_MARKER: &str = "About the company";

// Job postings have no reliable terminating marker, so the job section runs to the end.
static JOB_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?is){}(.*)", regex::escape(JOB_MARKER)))
        .expect("job section pattern should be valid")
});

// The company section stops at the first blank line so trailing page chrome is not swallowed.
static COMPANY_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?is){}(.*?)(?:\n\n|\r\n\r\n|\z)",
        regex::escape(COMPANY_MARKER)
    ))
    .expect("company section pattern should be valid")
});

/// Extracts the job and company sections from a page's visible text.
///
/// Markers are matched case-insensitively and only their first occurrence counts.
/// A missing marker leaves the corresponding field empty.
pub fn extract(page_text: &str) -> ExtractionResult {
    ExtractionResult {
        job: capture_section(&JOB_SECTION, page_text),
        company: capture_section(&COMPANY_SECTION, page_text),
    }
}

/// Returns the trimmed text after the marker, or an empty string if the marker is absent
fn capture_section(pattern: &Regex, text: &str) -> String {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|section| section.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Format of a saved page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    /// Markup that must be flattened to visible text first
    Html,
    /// Already visible text
    Text,
}

impl PageFormat {
    /// Determines the page format from a file path
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("html") | Some("htm") | Some("xhtml") => {
                ::log::debug!("Classifying as HTML: {}", path.display());
                PageFormat::Html
            }
            _ => {
                ::log::debug!("Classifying as Text: {}", path.display());
                PageFormat::Text
            }
        }
    }

    /// Returns the visible text of the content in this format
    pub fn visible_text(&self, content: &str) -> String {
        match self {
            PageFormat::Html => html::visible_text(content),
            PageFormat::Text => content.to_string(),
        }
    }
}
