//! Abstract and keyword extraction by ordered marker patterns.

use once_cell::sync::Lazy;
use regex::Regex;

use bildex_core::normalize;

use crate::config::ParsingConfig;
use crate::ParsingError;

/// Separator run allowed between a marker and its field text
/// ("Özetçe—", "Keywords:", "Abstract -").
const SEP: &str = r"\s*[—–:;.-]*\s*";

static LEAD_SEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s:;.—–-]+").unwrap());

/// Compiled field patterns for one [`ParsingConfig`].
///
/// Every field has a primary pattern and one simplified fallback; a pattern
/// that fails to match yields an empty string, never an error. All patterns
/// are case-insensitive and allow embedded line breaks in the capture.
pub struct FieldPatterns {
    abstract_primary: Regex,
    abstract_primary_fb: Regex,
    abstract_secondary: Regex,
    abstract_secondary_fb: Regex,
    keywords_primary: Regex,
    keywords_secondary: Regex,
    keywords_secondary_line: Regex,
    max_keywords_len: usize,
}

// Spaces inside a marker become `\s+` so that "Anahtar Kelimeler" still
// matches when extraction breaks the line between the two words.
fn alt(markers: &[String]) -> String {
    let escaped: Vec<String> = markers
        .iter()
        .map(|m| regex::escape(m).replace(' ', r"\s+"))
        .collect();
    format!("(?:{})", escaped.join("|"))
}

impl FieldPatterns {
    pub fn compile(config: &ParsingConfig) -> Result<Self, ParsingError> {
        let ap = alt(&config.abstract_primary_markers);
        let asec = alt(&config.abstract_secondary_markers);
        let kp = alt(&config.keywords_primary_markers);
        let ks = alt(&config.keywords_secondary_markers);
        let sh = alt(&config.section_headings);

        // Section boundaries that end a keyword capture: a roman-numeral
        // heading, a configured section heading, or a blank line followed by
        // a capitalized word.
        let section_stop = format!(r"(?:\n\s*I\.|I\.\s|{sh}|\n\s*\n\s*[A-Z][a-z]+)");

        Ok(Self {
            abstract_primary: Regex::new(&format!(r"(?is){ap}{SEP}(.*?)\s*{kp}"))?,
            abstract_primary_fb: Regex::new(&format!(r"(?is){ap}{SEP}(.*?)\s*(?:{asec}|{ks})"))?,
            abstract_secondary: Regex::new(&format!(r"(?is){asec}{SEP}(.*?)\s*{ks}"))?,
            abstract_secondary_fb: Regex::new(&format!(
                r"(?is){asec}{SEP}(.*?)\s*(?:{ks}|\n\s*I\.|I\.\s|{sh})"
            ))?,
            keywords_primary: Regex::new(&format!(r"(?is){kp}{SEP}(.*?)\s*{asec}"))?,
            keywords_secondary: Regex::new(&format!(r"(?is){ks}{SEP}(.*?){section_stop}"))?,
            keywords_secondary_line: Regex::new(&format!(r"(?i){ks}{SEP}([^\n]+)"))?,
            max_keywords_len: config.max_keywords_len,
        })
    }

    fn capture(re: &Regex, text: &str) -> String {
        let Some(caps) = re.captures(text) else {
            return String::new();
        };
        let raw = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        normalize(&LEAD_SEP_RE.replace(raw, ""))
    }

    /// Keyword lists are short; an over-long capture usually means the stop
    /// marker failed to match, so cut at the first sentence boundary.
    fn truncate_keywords(&self, text: String) -> String {
        if text.chars().count() <= self.max_keywords_len {
            return text;
        }
        match text.split_once('.') {
            Some((head, _)) => normalize(&format!("{head}.")),
            None => text,
        }
    }

    pub fn abstract_primary(&self, text: &str) -> String {
        Self::capture(&self.abstract_primary, text)
    }

    pub fn abstract_primary_fallback(&self, text: &str) -> String {
        Self::capture(&self.abstract_primary_fb, text)
    }

    pub fn abstract_secondary(&self, text: &str) -> String {
        Self::capture(&self.abstract_secondary, text)
    }

    pub fn abstract_secondary_fallback(&self, text: &str) -> String {
        Self::capture(&self.abstract_secondary_fb, text)
    }

    pub fn keywords_primary(&self, text: &str) -> String {
        self.truncate_keywords(Self::capture(&self.keywords_primary, text))
    }

    /// Primary pattern first, then the capture-to-end-of-line fallback.
    pub fn keywords_secondary(&self, text: &str) -> String {
        let full = Self::capture(&self.keywords_secondary, text);
        if !full.is_empty() {
            return self.truncate_keywords(full);
        }
        self.truncate_keywords(Self::capture(&self.keywords_secondary_line, text))
    }
}
