use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub markers: Option<MarkersConfig>,
    pub layout: Option<LayoutConfig>,
    pub limits: Option<LimitsConfig>,
}

/// Marker literal sets. The boundary rule and the field patterns are built
/// from these lists; the defaults match the proceedings books the tool was
/// tuned against, but documents with differently rendered markers (OCR
/// artifacts, ligatures) can override them here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkersConfig {
    pub abstract_primary: Option<Vec<String>>,
    pub abstract_secondary: Option<Vec<String>>,
    pub keywords_primary: Option<Vec<String>>,
    pub keywords_secondary: Option<Vec<String>>,
    pub section_headings: Option<Vec<String>>,
    pub excluded_literals: Option<Vec<String>>,
    pub author_prefixes: Option<Vec<String>>,
    pub location_literals: Option<Vec<String>>,
    pub company_suffixes: Option<Vec<String>>,
    pub secondary_hints: Option<Vec<String>>,
    pub primary_diacritics: Option<String>,
}

/// Layout-geometry tuning knobs (empirically chosen constants; see the
/// defaults on `ParsingConfig`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub line_tolerance: Option<f32>,
    pub gap_threshold: Option<f32>,
    pub font_tolerance: Option<f32>,
    pub title_region_fraction: Option<f32>,
    pub max_title_lines: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub page_limit: Option<usize>,
    pub min_abstract_len: Option<usize>,
    pub max_keywords_len: Option<usize>,
}

/// Platform config directory path: `<config_dir>/bildex/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("bildex").join("config.toml"))
}

/// Load config by cascading CWD `.bildex.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".bildex.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

fn pick<T: Clone>(overlay: &Option<T>, base: &Option<T>) -> Option<T> {
    overlay.clone().or_else(|| base.clone())
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let bm = base.markers.unwrap_or_default();
    let om = overlay.markers.unwrap_or_default();
    let bl = base.layout.unwrap_or_default();
    let ol = overlay.layout.unwrap_or_default();
    let bx = base.limits.unwrap_or_default();
    let ox = overlay.limits.unwrap_or_default();

    ConfigFile {
        markers: Some(MarkersConfig {
            abstract_primary: pick(&om.abstract_primary, &bm.abstract_primary),
            abstract_secondary: pick(&om.abstract_secondary, &bm.abstract_secondary),
            keywords_primary: pick(&om.keywords_primary, &bm.keywords_primary),
            keywords_secondary: pick(&om.keywords_secondary, &bm.keywords_secondary),
            section_headings: pick(&om.section_headings, &bm.section_headings),
            excluded_literals: pick(&om.excluded_literals, &bm.excluded_literals),
            author_prefixes: pick(&om.author_prefixes, &bm.author_prefixes),
            location_literals: pick(&om.location_literals, &bm.location_literals),
            company_suffixes: pick(&om.company_suffixes, &bm.company_suffixes),
            secondary_hints: pick(&om.secondary_hints, &bm.secondary_hints),
            primary_diacritics: pick(&om.primary_diacritics, &bm.primary_diacritics),
        }),
        layout: Some(LayoutConfig {
            line_tolerance: pick(&ol.line_tolerance, &bl.line_tolerance),
            gap_threshold: pick(&ol.gap_threshold, &bl.gap_threshold),
            font_tolerance: pick(&ol.font_tolerance, &bl.font_tolerance),
            title_region_fraction: pick(&ol.title_region_fraction, &bl.title_region_fraction),
            max_title_lines: pick(&ol.max_title_lines, &bl.max_title_lines),
        }),
        limits: Some(LimitsConfig {
            page_limit: pick(&ox.page_limit, &bx.page_limit),
            min_abstract_len: pick(&ox.min_abstract_len, &bx.min_abstract_len),
            max_keywords_len: pick(&ox.max_keywords_len, &bx.max_keywords_len),
        }),
    }
}
