use serde::{Deserialize, Serialize};

/// Fields pulled out of a job posting page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Text following the "About the job" marker
    #[serde(default)]
    pub job: String,

    /// Text following the "About the company" marker, up to the first blank line
    #[serde(default)]
    pub company: String,
}

impl ExtractionResult {
    /// Create a new extraction result
    pub fn new(job: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            job: job.into(),
            company: company.into(),
        }
    }
}

/// Prompt sent to the recommendation backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    prompt: String,
}

impl Prompt {
    /// Build the prompt from extracted fields
    pub fn from_extraction(extraction: &ExtractionResult) -> Self {
        Self {
            prompt: format!(
                "Job Description:\n{}\n\nAbout the Company:\n{}",
                extraction.job, extraction.company
            ),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.prompt
    }
}

/// A single suggestion returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_recommended: Option<String>,
}

/// Link target used when an item has no URL
pub const PLACEHOLDER_URL: &str = "#";

/// Display text used when an item gives no reason
pub const DEFAULT_REASON: &str = "Relevant opportunity.";

type ReasonAccessor = fn(&RecommendationItem) -> Option<&str>;

/// Preference order for an item's display text
const REASON_CHAIN: &[ReasonAccessor] = &[reason, why_recommended];

fn reason(item: &RecommendationItem) -> Option<&str> {
    item.reason.as_deref()
}

fn why_recommended(item: &RecommendationItem) -> Option<&str> {
    item.why_recommended.as_deref()
}

impl RecommendationItem {
    /// Link target, falling back to a placeholder anchor
    pub fn href(&self) -> &str {
        self.url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(PLACEHOLDER_URL)
    }

    /// First non-empty entry of the reason chain, or the default text
    pub fn display_reason(&self) -> &str {
        REASON_CHAIN
            .iter()
            .find_map(|accessor| accessor(self).filter(|text| !text.is_empty()))
            .unwrap_or(DEFAULT_REASON)
    }
}

/// Raw response body from the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_teams: Option<Vec<RecommendationItem>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hackathons: Option<Vec<RecommendationItem>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<RecommendationItem>>,
}

/// The three recommendation groupings, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    StudentTeams,
    Hackathons,
    Courses,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::StudentTeams,
        Category::Hackathons,
        Category::Courses,
    ];

    /// Heading shown above the category's entries
    pub fn heading(&self) -> &'static str {
        match self {
            Category::StudentTeams => "🛠️ Student Clubs",
            Category::Hackathons => "🎯 Upcoming Hackathons",
            Category::Courses => "📚 Recommended Courses",
        }
    }
}

/// Validated recommendations with absent categories normalised to empty
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories {
    pub student_teams: Vec<RecommendationItem>,
    pub hackathons: Vec<RecommendationItem>,
    pub courses: Vec<RecommendationItem>,
}

impl Categories {
    pub fn items(&self, category: Category) -> &[RecommendationItem] {
        match category {
            Category::StudentTeams => &self.student_teams,
            Category::Hackathons => &self.hackathons,
            Category::Courses => &self.courses,
        }
    }

    /// Non-empty categories in display order
    pub fn non_empty(&self) -> impl Iterator<Item = (Category, &[RecommendationItem])> {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.items(category)))
            .filter(|(_, items)| !items.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.non_empty().next().is_none()
    }
}

/// Result of the extraction stage
#[derive(Debug)]
pub enum ExtractionOutcome {
    ChannelError(crate::error::ChannelError),
    Empty,
    Success(ExtractionResult),
}

/// Result of the backend stage
#[derive(Debug)]
pub enum BackendOutcome {
    TransportError(crate::error::BackendError),
    Explicit(String),
    Categories(Categories),
}

impl From<RecommendationResponse> for BackendOutcome {
    fn from(response: RecommendationResponse) -> Self {
        match response.error {
            Some(error) if !error.is_empty() => BackendOutcome::Explicit(error),
            _ => BackendOutcome::Categories(Categories {
                student_teams: response.student_teams.unwrap_or_default(),
                hackathons: response.hackathons.unwrap_or_default(),
                courses: response.courses.unwrap_or_default(),
            }),
        }
    }
}
