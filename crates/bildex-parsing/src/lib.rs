use thiserror::Error;

pub mod boundary;
pub mod collect;
pub mod config;
pub mod extractor;
pub mod fields;
pub mod layout;
pub mod title;

pub use boundary::is_article_start;
pub use collect::collect_span;
pub use config::ParsingConfig;
pub use extractor::ArticleExtractor;
pub use fields::FieldPatterns;
// Re-export domain types from core (canonical definitions live there)
pub use bildex_core::{ArticleRecord, DocumentProvider, ExtractionOutcome, ProviderError, RunStats};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("invalid parsing configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid field pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Extract every article record from a document using the default
/// configuration.
///
/// Pipeline, per page in ascending order:
/// 1. Repair glyph encoding on the raw page text
/// 2. Detect article-start pages (both abstract markers present)
/// 3. Isolate the title region from positioned fragments and split it into
///    the two language variants
/// 4. Collect the article's text span across pages
/// 5. Match abstract and keyword fields with per-field fallback patterns
/// 6. Assemble records behind the minimum-abstract and title-dedup gates
pub fn extract_articles(provider: &dyn DocumentProvider, year: &str) -> ExtractionOutcome {
    ArticleExtractor::new().extract(provider, year)
}
