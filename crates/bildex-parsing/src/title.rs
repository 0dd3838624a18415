//! Splitting an ordered title-line sequence into its two language variants.

use bildex_core::{normalize, Line};

use crate::config::ParsingConfig;

/// Split title lines into `(primary, secondary)` strings.
///
/// Three ordered tiers, first success wins:
/// 1. Gap split at the largest inter-line vertical gap (≥ `gap_threshold`),
///    the two groups scored by secondary-language lexical hints.
/// 2. Split at the first secondary-looking line, provided it is not the
///    first line.
/// 3. Character-composition split on primary diacritics; always returns
///    something, possibly with one side empty.
pub fn split_bilingual(lines: &[Line], config: &ParsingConfig) -> (String, String) {
    if lines.is_empty() {
        return (String::new(), String::new());
    }

    if let Some(pair) = split_by_gap(lines, config) {
        return pair;
    }
    if let Some(pair) = split_by_hint(lines, config) {
        return pair;
    }
    split_by_charset(lines, config)
}

fn join(lines: &[&str]) -> String {
    normalize(&lines.join(" "))
}

fn split_by_gap(lines: &[Line], config: &ParsingConfig) -> Option<(String, String)> {
    if lines.len() < 2 {
        return None;
    }

    let gaps: Vec<f32> = lines.windows(2).map(|w| w[1].y - w[0].y).collect();
    let (max_idx, max_gap) = gaps
        .iter()
        .copied()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(&b.1))?;
    if max_gap < config.gap_threshold {
        return None;
    }

    let split = max_idx + 1;
    let top: Vec<&str> = lines[..split].iter().map(|l| l.text.as_str()).collect();
    let bottom: Vec<&str> = lines[split..].iter().map(|l| l.text.as_str()).collect();

    let top_score = top
        .iter()
        .filter(|t| config.looks_secondary_line(t))
        .count();
    let bottom_score = bottom
        .iter()
        .filter(|t| config.looks_secondary_line(t))
        .count();

    let (primary, secondary) = if bottom_score >= top_score {
        (join(&top), join(&bottom))
    } else {
        (join(&bottom), join(&top))
    };

    if primary.is_empty() || secondary.is_empty() {
        return None;
    }
    Some((primary, secondary))
}

fn split_by_hint(lines: &[Line], config: &ParsingConfig) -> Option<(String, String)> {
    let first_secondary = lines
        .iter()
        .position(|l| config.looks_secondary_line(&l.text))?;
    if first_secondary == 0 {
        return None;
    }

    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    let primary = join(&texts[..first_secondary]);
    let secondary = join(&texts[first_secondary..]);
    if primary.is_empty() || secondary.is_empty() {
        return None;
    }
    Some((primary, secondary))
}

fn split_by_charset(lines: &[Line], config: &ParsingConfig) -> (String, String) {
    let mut primary: Vec<&str> = Vec::new();
    let mut secondary: Vec<&str> = Vec::new();
    let mut secondary_started = false;

    for line in lines {
        let text = line.text.as_str();
        let has_diacritic = config.contains_primary_diacritic(text);

        if has_diacritic && !secondary_started {
            primary.push(text);
            continue;
        }

        // Once a diacritic-free line follows collected primary lines, the
        // secondary variant has begun and keeps everything that follows.
        if !has_diacritic && !primary.is_empty() {
            secondary_started = true;
            secondary.push(text);
            continue;
        }

        if primary.is_empty() && !secondary_started {
            primary.push(text);
        } else {
            secondary.push(text);
        }
    }

    (join(&primary), join(&secondary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(y: f32, text: &str) -> Line {
        Line {
            y,
            text: text.into(),
        }
    }

    #[test]
    fn empty_input_yields_empty_pair() {
        let cfg = ParsingConfig::default();
        assert_eq!(
            split_bilingual(&[], &cfg),
            (String::new(), String::new())
        );
    }

    #[test]
    fn gap_split_fires_at_threshold() {
        let cfg = ParsingConfig::default();
        let lines = vec![
            line(100.0, "Soğutma Sistemi Tasarımı"),
            line(110.0, "Design of a Cooling System"),
        ];
        let (primary, secondary) = split_bilingual(&lines, &cfg);
        assert_eq!(primary, "Soğutma Sistemi Tasarımı");
        assert_eq!(secondary, "Design of a Cooling System");
    }

    #[test]
    fn gap_split_does_not_fire_below_threshold() {
        let cfg = ParsingConfig::default();
        let lines = vec![
            line(100.0, "Soğutma Sistemi Tasarımı"),
            line(107.0, "Design of a Cooling System"),
        ];
        // gap 7.0 < 8.0, but tier 2 still separates on the hint word
        let (primary, secondary) = split_bilingual(&lines, &cfg);
        assert_eq!(primary, "Soğutma Sistemi Tasarımı");
        assert_eq!(secondary, "Design of a Cooling System");
        assert!(split_by_gap(&lines, &cfg).is_none());
    }

    #[test]
    fn gap_split_swaps_when_secondary_is_on_top() {
        let cfg = ParsingConfig::default();
        let lines = vec![
            line(100.0, "Additive Manufacturing of Brackets"),
            line(120.0, "Braket Üretimi Çalışması"),
        ];
        let (primary, secondary) = split_by_gap(&lines, &cfg).unwrap();
        assert_eq!(primary, "Braket Üretimi Çalışması");
        assert_eq!(secondary, "Additive Manufacturing of Brackets");
    }

    #[test]
    fn hint_split_never_splits_at_first_line() {
        let cfg = ParsingConfig::default();
        let lines = vec![
            line(100.0, "Testing Procedures for Engines"),
            line(105.0, "More plain words"),
        ];
        assert!(split_by_hint(&lines, &cfg).is_none());
    }

    #[test]
    fn charset_split_keeps_trailing_lines_in_secondary() {
        let cfg = ParsingConfig::default();
        let lines = vec![
            line(100.0, "Görüntü İşleme Yöntemleri"),
            line(110.0, "Image Processing Methods"),
            line(120.0, "ile Donanım Hızlandırma"),
        ];
        // after the secondary side starts, diacritics no longer pull lines back
        let (primary, secondary) = split_by_charset(&lines, &cfg);
        assert_eq!(primary, "Görüntü İşleme Yöntemleri");
        assert_eq!(secondary, "Image Processing Methods ile Donanım Hızlandırma");
    }

    #[test]
    fn charset_split_single_plain_line_defaults_to_primary() {
        let cfg = ParsingConfig::default();
        let lines = vec![line(100.0, "Plain ASCII Title")];
        let (primary, secondary) = split_by_charset(&lines, &cfg);
        assert_eq!(primary, "Plain ASCII Title");
        assert_eq!(secondary, "");
    }
}
