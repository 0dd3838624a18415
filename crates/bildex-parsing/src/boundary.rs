use crate::config::ParsingConfig;

/// Decide whether a page's raw text is the first page of a new article.
///
/// True iff the text contains at least one primary-language abstract marker
/// AND at least one secondary-language abstract marker as literal,
/// case-sensitive substrings. A single marker alone (e.g. "Abstract" inside
/// a references list) is a known false-positive source, so both are
/// required on the same page.
pub fn is_article_start(page_text: &str, config: &ParsingConfig) -> bool {
    let has_primary = config
        .abstract_primary_markers
        .iter()
        .any(|m| page_text.contains(m.as_str()));
    let has_secondary = config
        .abstract_secondary_markers
        .iter()
        .any(|m| page_text.contains(m.as_str()));
    has_primary && has_secondary
}
