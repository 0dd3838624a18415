use thiserror::Error;

use crate::Fragment;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("failed to open document: {0}")]
    Open(String),
    #[error("failed to read page {page}: {message}")]
    Page { page: usize, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for page/document providers.
///
/// Implementors supply the low-level geometry and text extraction step; the
/// field-extraction pipeline (boundary detection, title splitting,
/// abstract/keyword matching) lives in `bildex_parsing::ArticleExtractor`.
///
/// All accessors are random-access, read-only, and side-effect-free. An
/// `Open` failure is fatal for the document; a `Page` failure is expected to
/// be logged and skipped by callers, continuing with the next page.
pub trait DocumentProvider {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Raw extracted text of one page (0-based index).
    fn page_text(&self, index: usize) -> Result<String, ProviderError>;

    /// Positioned text fragments of one page (0-based index).
    fn page_fragments(&self, index: usize) -> Result<Vec<Fragment>, ProviderError>;

    /// Height of one page in the provider's coordinate units.
    fn page_height(&self, index: usize) -> Result<f32, ProviderError>;
}
