use crate::results::{Categories, Category, RecommendationItem};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown when no category has any entries
pub const NO_MATCHES_MESSAGE: &str = "No matches found.";

/// Output surface the recommendations are rendered for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// Headings and linked lists as HTML markup
    Html,
    /// Plain text for a terminal
    #[default]
    Text,
}

/// What one pipeline invocation leaves on the display surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedOutput {
    /// One block per non-empty category
    Categories(String),
    /// Every category was empty
    NoMatches,
    /// A status or error message in place of results
    Message(String),
}

impl RenderedOutput {
    pub fn as_str(&self) -> &str {
        match self {
            RenderedOutput::Categories(blocks) => blocks,
            RenderedOutput::NoMatches => NO_MATCHES_MESSAGE,
            RenderedOutput::Message(message) => message,
        }
    }
}

impl fmt::Display for RenderedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders categories in fixed order, skipping empty ones
pub fn render(categories: &Categories, format: RenderFormat) -> RenderedOutput {
    if categories.is_empty() {
        return RenderedOutput::NoMatches;
    }

    let blocks = categories
        .non_empty()
        .map(|(category, items)| match format {
            RenderFormat::Html => html_section(category, items),
            RenderFormat::Text => text_section(category, items),
        })
        .collect::<Vec<_>>();

    let separator = match format {
        RenderFormat::Html => "",
        RenderFormat::Text => "\n",
    };
    RenderedOutput::Categories(blocks.join(separator))
}

fn html_section(category: Category, items: &[RecommendationItem]) -> String {
    let entries = items
        .iter()
        .map(|item| {
            format!(
                r#"<li><a href="{}" target="_blank">{}</a><br><small>{}</small></li>"#,
                escape_html(item.href()),
                escape_html(&item.name),
                escape_html(item.display_reason())
            )
        })
        .collect::<String>();

    format!("<h3>{}</h3><ul>{}</ul>", category.heading(), entries)
}

fn text_section(category: Category, items: &[RecommendationItem]) -> String {
    let mut section = format!("{}\n", category.heading());
    for item in items {
        section.push_str(&format!(
            "  - {} <{}>\n    {}\n",
            item.name,
            item.href(),
            item.display_reason()
        ));
    }
    section
}

/// Escapes text for use in element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
