//! Collecting an article's raw text span across page boundaries.

use bildex_core::DocumentProvider;

use crate::boundary::is_article_start;
use crate::config::ParsingConfig;

/// Concatenate raw page text from `start` onward until a stop marker
/// appears, the next article begins, or `page_limit` pages were taken.
///
/// Abstract/keyword blocks legitimately overflow onto a following page, so
/// a single page is not enough; the page limit bounds the worst case when
/// no stop marker is ever found. Stop conditions:
/// - a later page (never the start page) satisfies [`is_article_start`],
///   which means the next article has begun; that page is not included;
/// - the just-collected page contains any of `stop_markers` as a
///   case-insensitive substring; that page is included, then collection
///   ends.
///
/// Pages the provider cannot read are logged and skipped; the scan
/// continues with the next page.
pub fn collect_span(
    provider: &dyn DocumentProvider,
    start: usize,
    stop_markers: &[String],
    page_limit: usize,
    config: &ParsingConfig,
) -> String {
    let end = provider.page_count().min(start + page_limit);
    let mut parts: Vec<String> = Vec::new();

    for index in start..end {
        let text = match provider.page_text(index) {
            Ok(raw) => config.repair(&raw),
            Err(e) => {
                tracing::warn!(page = index + 1, error = %e, "skipping unreadable page in span");
                continue;
            }
        };

        if index > start && is_article_start(&text, config) {
            break;
        }

        let low = text.to_lowercase();
        let hit_stop = stop_markers
            .iter()
            .any(|m| low.contains(m.to_lowercase().as_str()));

        parts.push(text);
        if hit_stop {
            break;
        }
    }

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use bildex_core::mock::{MockDocument, MockPage};

    use super::*;

    fn doc(texts: &[&str]) -> MockDocument {
        MockDocument::new(texts.iter().map(|t| MockPage::new(*t)).collect())
    }

    #[test]
    fn stops_after_page_with_marker() {
        let cfg = ParsingConfig::default();
        let d = doc(&["birinci", "ikinci Keywords", "üçüncü"]);
        let text = collect_span(&d, 0, &["Keywords".into()], 8, &cfg);
        assert!(text.contains("birinci"));
        assert!(text.contains("ikinci"));
        assert!(!text.contains("üçüncü"));
    }

    #[test]
    fn stop_markers_match_case_insensitively() {
        let cfg = ParsingConfig::default();
        let d = doc(&["birinci", "ikinci KEYWORDS"]);
        let text = collect_span(&d, 0, &["Keywords".into()], 8, &cfg);
        assert!(text.ends_with("ikinci KEYWORDS"));
    }

    #[test]
    fn stops_before_next_article_start() {
        let cfg = ParsingConfig::default();
        let d = doc(&[
            "Özetçe birinci makale Abstract",
            "devam sayfası",
            "Özetçe ikinci makale Abstract",
        ]);
        let text = collect_span(&d, 0, &["Keywords".into()], 8, &cfg);
        assert!(text.contains("devam sayfası"));
        assert!(!text.contains("ikinci makale"));
    }

    #[test]
    fn never_exceeds_page_limit() {
        let cfg = ParsingConfig::default();
        let texts: Vec<String> = (0..12).map(|i| format!("sayfa-{i}")).collect();
        let refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
        let d = doc(&refs);
        let text = collect_span(&d, 0, &["yok".into()], 8, &cfg);
        assert!(text.contains("sayfa-7"));
        assert!(!text.contains("sayfa-8"));
    }

    #[test]
    fn unreadable_page_is_skipped_not_fatal() {
        let cfg = ParsingConfig::default();
        let d = MockDocument::new(vec![
            MockPage::new("birinci"),
            MockPage::new("bozuk"),
            MockPage::new("üçüncü Keywords"),
        ])
        .fail_page(1);
        let text = collect_span(&d, 0, &["Keywords".into()], 8, &cfg);
        assert!(text.contains("birinci"));
        assert!(!text.contains("bozuk"));
        assert!(text.contains("üçüncü"));
    }
}
