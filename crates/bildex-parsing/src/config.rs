use bildex_core::config_file::ConfigFile;
use bildex_core::text::{repair_encoding, DEFAULT_ENCODING_REPAIRS};

use crate::ParsingError;

/// All heuristic knobs of the extraction pipeline.
///
/// The marker literal sets and the geometry thresholds are empirically
/// chosen against the sample proceedings books; none of them is a hard
/// invariant, which is why every one of them is a field here rather than a
/// constant.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    /// Literals whose presence marks the primary-language abstract ("Özetçe").
    pub abstract_primary_markers: Vec<String>,
    /// Literals whose presence marks the secondary-language abstract ("Abstract").
    pub abstract_secondary_markers: Vec<String>,
    /// Start markers of the primary-language keyword list.
    pub keywords_primary_markers: Vec<String>,
    /// Start markers of the secondary-language keyword list.
    pub keywords_secondary_markers: Vec<String>,
    /// Section headings that terminate the front matter ("GİRİŞ", "INTRODUCTION").
    pub section_headings: Vec<String>,
    /// Running-header literals dropped from title candidate fragments.
    pub excluded_literals: Vec<String>,
    /// Leading tokens of author/role lines that end the title block.
    pub author_prefixes: Vec<String>,
    /// City/country literals that end the title block.
    pub location_literals: Vec<String>,
    /// Company suffixes ("A.Ş.") that end the title block.
    pub company_suffixes: Vec<String>,
    /// Topical words suggesting a line is in the secondary language.
    pub secondary_hints: Vec<String>,
    /// Characters that only occur in the primary language.
    pub primary_diacritics: String,

    /// Vertical distance within which fragments join the same line.
    pub line_tolerance: f32,
    /// Minimum inter-line gap for the gap-split title tier.
    pub gap_threshold: f32,
    /// Font-size band below the region maximum still counted as title text.
    pub font_tolerance: f32,
    /// Fraction of page height used as the title region when no abstract
    /// marker fragment is present on the page.
    pub title_region_fraction: f32,
    /// Defensive cap on collected title lines.
    pub max_title_lines: usize,

    /// Hard limit on pages collected per article span.
    pub page_limit: usize,
    /// Pages collected when hunting for the keyword block specifically.
    pub keywords_page_limit: usize,
    /// An abstract must be longer than this for the record to be emitted.
    pub min_abstract_len: usize,
    /// Keyword captures longer than this are truncated at the first period.
    pub max_keywords_len: usize,

    /// Ordered glyph-repair table applied to raw page text before anything
    /// else sees it. `None` uses the built-in CID table.
    pub encoding_repairs: Option<Vec<(String, String)>>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        let s = |v: &[&str]| v.iter().map(|x| x.to_string()).collect::<Vec<_>>();
        Self {
            abstract_primary_markers: s(&["Özetçe"]),
            abstract_secondary_markers: s(&["Abstract"]),
            keywords_primary_markers: s(&["Anahtar Kelimeler"]),
            keywords_secondary_markers: s(&["Keywords"]),
            section_headings: s(&["GİRİŞ", "INTRODUCTION", "PROBLEM"]),
            excluded_literals: s(&["LIFT UP", "Bildiri Kitabı"]),
            author_prefixes: s(&["Öğrenci", "Akademik Danışman", "Sanayi Danışmanı"]),
            location_literals: s(&[
                "Ankara, Türkiye",
                "İstanbul, Türkiye",
                "Türkiye",
                "Turkey",
            ]),
            company_suffixes: s(&["A.Ş."]),
            secondary_hints: s(&[
                "production",
                "testing",
                "used in",
                "using",
                "technology",
                "system",
                "systems",
                "analysis",
                "design",
                "optimization",
                "manufacturing",
                "additive",
            ]),
            primary_diacritics: "ğüşıöçĞÜŞİÖÇ".to_string(),
            line_tolerance: 3.0,
            gap_threshold: 8.0,
            font_tolerance: 4.0,
            title_region_fraction: 0.60,
            max_title_lines: 12,
            page_limit: 8,
            keywords_page_limit: 3,
            min_abstract_len: 20,
            max_keywords_len: 200,
            encoding_repairs: None,
        }
    }
}

impl ParsingConfig {
    /// Overlay values from an on-disk config file onto the defaults.
    pub fn from_config_file(file: &ConfigFile) -> Self {
        let mut cfg = Self::default();
        if let Some(m) = &file.markers {
            if let Some(v) = &m.abstract_primary {
                cfg.abstract_primary_markers = v.clone();
            }
            if let Some(v) = &m.abstract_secondary {
                cfg.abstract_secondary_markers = v.clone();
            }
            if let Some(v) = &m.keywords_primary {
                cfg.keywords_primary_markers = v.clone();
            }
            if let Some(v) = &m.keywords_secondary {
                cfg.keywords_secondary_markers = v.clone();
            }
            if let Some(v) = &m.section_headings {
                cfg.section_headings = v.clone();
            }
            if let Some(v) = &m.excluded_literals {
                cfg.excluded_literals = v.clone();
            }
            if let Some(v) = &m.author_prefixes {
                cfg.author_prefixes = v.clone();
            }
            if let Some(v) = &m.location_literals {
                cfg.location_literals = v.clone();
            }
            if let Some(v) = &m.company_suffixes {
                cfg.company_suffixes = v.clone();
            }
            if let Some(v) = &m.secondary_hints {
                cfg.secondary_hints = v.clone();
            }
            if let Some(v) = &m.primary_diacritics {
                cfg.primary_diacritics = v.clone();
            }
        }
        if let Some(l) = &file.layout {
            if let Some(v) = l.line_tolerance {
                cfg.line_tolerance = v;
            }
            if let Some(v) = l.gap_threshold {
                cfg.gap_threshold = v;
            }
            if let Some(v) = l.font_tolerance {
                cfg.font_tolerance = v;
            }
            if let Some(v) = l.title_region_fraction {
                cfg.title_region_fraction = v;
            }
            if let Some(v) = l.max_title_lines {
                cfg.max_title_lines = v;
            }
        }
        if let Some(x) = &file.limits {
            if let Some(v) = x.page_limit {
                cfg.page_limit = v;
            }
            if let Some(v) = x.min_abstract_len {
                cfg.min_abstract_len = v;
            }
            if let Some(v) = x.max_keywords_len {
                cfg.max_keywords_len = v;
            }
        }
        cfg
    }

    /// Reject configs the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ParsingError> {
        for (name, list) in [
            ("abstract_primary_markers", &self.abstract_primary_markers),
            ("abstract_secondary_markers", &self.abstract_secondary_markers),
            ("keywords_primary_markers", &self.keywords_primary_markers),
            ("keywords_secondary_markers", &self.keywords_secondary_markers),
        ] {
            if list.is_empty() || list.iter().any(|m| m.is_empty()) {
                return Err(ParsingError::InvalidConfig(format!(
                    "{name} must contain at least one non-empty literal"
                )));
            }
        }
        if self.page_limit == 0 {
            return Err(ParsingError::InvalidConfig(
                "page_limit must be at least 1".into(),
            ));
        }
        for (name, v) in [
            ("line_tolerance", self.line_tolerance),
            ("gap_threshold", self.gap_threshold),
            ("font_tolerance", self.font_tolerance),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ParsingError::InvalidConfig(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.title_region_fraction) {
            return Err(ParsingError::InvalidConfig(
                "title_region_fraction must be within 0.0..=1.0".into(),
            ));
        }
        Ok(())
    }

    /// Apply the configured (or built-in) encoding repair table.
    pub fn repair(&self, text: &str) -> String {
        match &self.encoding_repairs {
            None => repair_encoding(text, DEFAULT_ENCODING_REPAIRS),
            Some(table) => {
                let borrowed: Vec<(&str, &str)> = table
                    .iter()
                    .map(|(from, to)| (from.as_str(), to.as_str()))
                    .collect();
                repair_encoding(text, &borrowed)
            }
        }
    }

    /// Whether the text contains any primary-language diacritic.
    pub fn contains_primary_diacritic(&self, text: &str) -> bool {
        text.chars().any(|c| self.primary_diacritics.contains(c))
    }

    /// Heuristic: a line with no primary diacritics that mentions one of the
    /// secondary-language topical hints probably belongs to the secondary
    /// title.
    pub fn looks_secondary_line(&self, text: &str) -> bool {
        if text.is_empty() || self.contains_primary_diacritic(text) {
            return false;
        }
        let low = text.to_lowercase();
        self.secondary_hints.iter().any(|hint| low.contains(hint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(ParsingConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_marker_list_is_rejected() {
        let cfg = ParsingConfig {
            abstract_primary_markers: vec![],
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ParsingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_page_limit_is_rejected() {
        let cfg = ParsingConfig {
            page_limit: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn diacritic_detection() {
        let cfg = ParsingConfig::default();
        assert!(cfg.contains_primary_diacritic("Görüntü İşleme"));
        assert!(!cfg.contains_primary_diacritic("Image Processing"));
    }

    #[test]
    fn secondary_hint_requires_no_diacritics() {
        let cfg = ParsingConfig::default();
        assert!(cfg.looks_secondary_line("Design of a Cooling System"));
        // hint word present but the diacritic disqualifies it
        assert!(!cfg.looks_secondary_line("Soğutma System Tasarımı"));
        assert!(!cfg.looks_secondary_line("Plain words only"));
    }

    #[test]
    fn config_file_overlay() {
        use bildex_core::config_file::{LayoutConfig, LimitsConfig, MarkersConfig};

        let file = ConfigFile {
            markers: Some(MarkersConfig {
                abstract_primary: Some(vec!["Özet".into()]),
                ..Default::default()
            }),
            layout: Some(LayoutConfig {
                gap_threshold: Some(12.5),
                ..Default::default()
            }),
            limits: Some(LimitsConfig {
                page_limit: Some(4),
                ..Default::default()
            }),
        };
        let cfg = ParsingConfig::from_config_file(&file);
        assert_eq!(cfg.abstract_primary_markers, vec!["Özet".to_string()]);
        assert_eq!(cfg.gap_threshold, 12.5);
        assert_eq!(cfg.page_limit, 4);
        // untouched defaults survive
        assert_eq!(cfg.min_abstract_len, 20);
    }
}
