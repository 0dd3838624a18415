//! Per-document orchestration: scan pages, extract fields, assemble records.

use std::collections::HashSet;

use bildex_core::{ArticleRecord, DocumentProvider, ExtractionOutcome, RunStats};

use crate::boundary::is_article_start;
use crate::collect::collect_span;
use crate::config::ParsingConfig;
use crate::fields::FieldPatterns;
use crate::layout::title_lines;
use crate::title::split_bilingual;
use crate::ParsingError;

/// The whole field-extraction pipeline for multi-article proceedings
/// documents.
///
/// Stateless across documents; the only per-run state is the title dedup
/// set, created inside [`extract`](Self::extract) and discarded with it.
/// Callers may therefore run one extractor per document in parallel, each
/// with its own provider handle.
pub struct ArticleExtractor {
    config: ParsingConfig,
    patterns: FieldPatterns,
}

impl Default for ArticleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleExtractor {
    pub fn new() -> Self {
        // The default configuration is covered by tests; compiling it cannot fail.
        Self::with_config(ParsingConfig::default()).expect("default configuration compiles")
    }

    pub fn with_config(config: ParsingConfig) -> Result<Self, ParsingError> {
        config.validate()?;
        let patterns = FieldPatterns::compile(&config)?;
        Ok(Self { config, patterns })
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    /// Scan every page of `provider` in ascending order and return the
    /// assembled records plus run counters.
    ///
    /// Pages the provider cannot read are logged and skipped; no per-field
    /// failure aborts the scan. Forward-only traversal matters: the span
    /// collector's stop condition looks for the *next* article-start page.
    pub fn extract(&self, provider: &dyn DocumentProvider, year: &str) -> ExtractionOutcome {
        let mut stats = RunStats {
            pages_total: provider.page_count(),
            ..Default::default()
        };
        let mut records = Vec::new();
        let mut assembler = Assembler::new(self.config.min_abstract_len);

        for index in 0..stats.pages_total {
            let text = match provider.page_text(index) {
                Ok(raw) => self.config.repair(&raw),
                Err(e) => {
                    tracing::warn!(page = index + 1, error = %e, "skipping unreadable page");
                    stats.page_failures += 1;
                    continue;
                }
            };

            if !is_article_start(&text, &self.config) {
                continue;
            }
            stats.article_starts += 1;

            let (title_primary, title_secondary) = self.extract_title(provider, index);
            let (abstract_primary, abstract_secondary) = self.extract_abstracts(provider, index);
            let (keywords_primary, keywords_secondary) = self.extract_keywords(provider, index);

            let record = ArticleRecord {
                page_number: index + 1,
                year: year.to_string(),
                title_primary,
                title_secondary,
                abstract_primary,
                abstract_secondary,
                keywords_primary,
                keywords_secondary,
            };

            match assembler.assemble(record) {
                Assembly::Emitted(record) => {
                    let missing = record.missing_fields();
                    if missing.is_empty() {
                        tracing::info!(
                            page = index + 1,
                            title = %record.title_primary,
                            "article extracted"
                        );
                    } else {
                        tracing::warn!(
                            page = index + 1,
                            title = %record.title_primary,
                            missing = ?missing,
                            "article extracted with missing fields"
                        );
                    }
                    stats.emitted += 1;
                    records.push(record);
                }
                Assembly::ShortAbstract => {
                    tracing::debug!(page = index + 1, "suppressed: no abstract over threshold");
                    stats.suppressed_short_abstract += 1;
                }
                Assembly::DuplicateTitle => {
                    tracing::debug!(page = index + 1, "suppressed: duplicate title");
                    stats.suppressed_duplicate_title += 1;
                }
            }
        }

        ExtractionOutcome { records, stats }
    }

    fn extract_title(&self, provider: &dyn DocumentProvider, index: usize) -> (String, String) {
        let fragments = match provider.page_fragments(index) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(page = index + 1, error = %e, "no fragments for title region");
                return (String::new(), String::new());
            }
        };
        let height = match provider.page_height(index) {
            Ok(h) => h,
            Err(e) => {
                tracing::warn!(page = index + 1, error = %e, "no page height for title region");
                return (String::new(), String::new());
            }
        };

        let lines = title_lines(&fragments, height, &self.config);
        if lines.is_empty() {
            return (String::new(), String::new());
        }
        split_bilingual(&lines, &self.config)
    }

    fn extract_abstracts(&self, provider: &dyn DocumentProvider, index: usize) -> (String, String) {
        let cfg = &self.config;

        let span_primary = collect_span(
            provider,
            index,
            &cfg.keywords_primary_markers,
            cfg.page_limit,
            cfg,
        );
        let mut abstract_primary = self.patterns.abstract_primary(&span_primary);
        if abstract_primary.is_empty() {
            let stops: Vec<String> = cfg
                .abstract_secondary_markers
                .iter()
                .chain(cfg.keywords_secondary_markers.iter())
                .cloned()
                .collect();
            let span = collect_span(provider, index, &stops, cfg.page_limit, cfg);
            abstract_primary = self.patterns.abstract_primary_fallback(&span);
        }

        let span_secondary = collect_span(
            provider,
            index,
            &cfg.keywords_secondary_markers,
            cfg.page_limit,
            cfg,
        );
        let mut abstract_secondary = self.patterns.abstract_secondary(&span_secondary);
        if abstract_secondary.is_empty() {
            let span = collect_span(
                provider,
                index,
                &self.section_stop_markers(),
                cfg.page_limit,
                cfg,
            );
            abstract_secondary = self.patterns.abstract_secondary_fallback(&span);
        }

        (abstract_primary, abstract_secondary)
    }

    fn extract_keywords(&self, provider: &dyn DocumentProvider, index: usize) -> (String, String) {
        let cfg = &self.config;
        let span = collect_span(
            provider,
            index,
            &self.section_stop_markers(),
            cfg.keywords_page_limit,
            cfg,
        );
        (
            self.patterns.keywords_primary(&span),
            self.patterns.keywords_secondary(&span),
        )
    }

    /// Stop list for spans that should end at the body of the article:
    /// roman-numeral heading prefixes plus the configured section headings.
    fn section_stop_markers(&self) -> Vec<String> {
        let mut stops = vec!["I.".to_string(), "I ".to_string()];
        stops.extend(self.config.section_headings.iter().cloned());
        stops
    }
}

enum Assembly {
    Emitted(ArticleRecord),
    ShortAbstract,
    DuplicateTitle,
}

/// Emission gate: minimum abstract content plus title de-duplication.
///
/// The dedup set guards against mis-detected repeat boundaries (a running
/// header matching the start markers twice); it holds primary titles,
/// case-sensitive, for one document run only.
struct Assembler {
    min_abstract_len: usize,
    seen_titles: HashSet<String>,
}

impl Assembler {
    fn new(min_abstract_len: usize) -> Self {
        Self {
            min_abstract_len,
            seen_titles: HashSet::new(),
        }
    }

    fn assemble(&mut self, record: ArticleRecord) -> Assembly {
        let has_abstract = record.abstract_primary.chars().count() > self.min_abstract_len
            || record.abstract_secondary.chars().count() > self.min_abstract_len;
        if !has_abstract {
            return Assembly::ShortAbstract;
        }
        if self.seen_titles.contains(&record.title_primary) {
            return Assembly::DuplicateTitle;
        }
        self.seen_titles.insert(record.title_primary.clone());
        Assembly::Emitted(record)
    }
}
