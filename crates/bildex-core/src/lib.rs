use serde::{Deserialize, Serialize};

pub mod config_file;
pub mod mock;
pub mod provider;
pub mod text;

// Re-export for convenience
pub use provider::{DocumentProvider, ProviderError};
pub use text::{normalize, repair_encoding};

/// One positioned run of text with a font size, as reported by the
/// page-geometry provider. Scoped to a single page's extraction call.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
}

impl Fragment {
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
        }
    }
}

/// Fragments grouped by vertical proximity and concatenated in reading
/// order. `y` is the mean of the member fragments' vertical coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub y: f32,
    pub text: String,
}

/// A fully assembled bibliographic record for one article.
///
/// Field pairs may independently be empty strings; empty is a valid
/// terminal state, not an error. The serde names are the external column
/// names of the tabular sink, in sink order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(rename = "PageNumber")]
    pub page_number: usize,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Title_Primary")]
    pub title_primary: String,
    #[serde(rename = "Title_Secondary")]
    pub title_secondary: String,
    #[serde(rename = "Abstract_Primary")]
    pub abstract_primary: String,
    #[serde(rename = "Abstract_Secondary")]
    pub abstract_secondary: String,
    #[serde(rename = "Keywords_Primary")]
    pub keywords_primary: String,
    #[serde(rename = "Keywords_Secondary")]
    pub keywords_secondary: String,
}

impl ArticleRecord {
    /// Names of the fields that came out empty, for incomplete-record logging.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title_primary.is_empty() {
            missing.push("title_primary");
        }
        if self.title_secondary.is_empty() {
            missing.push("title_secondary");
        }
        if self.abstract_primary.is_empty() {
            missing.push("abstract_primary");
        }
        if self.abstract_secondary.is_empty() {
            missing.push("abstract_secondary");
        }
        if self.keywords_primary.is_empty() {
            missing.push("keywords_primary");
        }
        if self.keywords_secondary.is_empty() {
            missing.push("keywords_secondary");
        }
        missing
    }
}

/// Per-document counters collected during one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub pages_total: usize,
    pub page_failures: usize,
    pub article_starts: usize,
    pub emitted: usize,
    pub suppressed_short_abstract: usize,
    pub suppressed_duplicate_title: usize,
}

/// Result of extracting every article from one document.
#[derive(Debug, Clone, Default)]
pub struct ExtractionOutcome {
    pub records: Vec<ArticleRecord>,
    pub stats: RunStats,
}
