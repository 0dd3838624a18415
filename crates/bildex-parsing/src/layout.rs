//! Title-region selection and fragment-to-line grouping.

use bildex_core::{normalize, Fragment, Line};

use crate::config::ParsingConfig;

/// Restrict a page's fragments to the candidate title region.
///
/// The region ends 2 units above the topmost abstract-marker fragment, or at
/// `title_region_fraction` of the page height when no marker fragment
/// exists. Within the region only fragments inside the font band
/// `[max_size - font_tolerance, max_size]` are kept, because the opening
/// line of a multi-line title sometimes renders a few points smaller than
/// its dominant size.
pub fn title_region(
    fragments: &[Fragment],
    page_height: f32,
    config: &ParsingConfig,
) -> Vec<Fragment> {
    let marker_y = fragments
        .iter()
        .filter(|f| {
            config
                .abstract_primary_markers
                .iter()
                .chain(config.abstract_secondary_markers.iter())
                .any(|m| f.text.contains(m.as_str()))
        })
        .map(|f| f.y)
        .min_by(f32::total_cmp);

    let y_max = match marker_y {
        Some(y) => y - 2.0,
        None => page_height * config.title_region_fraction,
    };

    let region: Vec<Fragment> = fragments.iter().filter(|f| f.y <= y_max).cloned().collect();
    if region.is_empty() {
        return region;
    }

    let max_size = region
        .iter()
        .map(|f| f.font_size)
        .max_by(f32::total_cmp)
        .unwrap_or(0.0);
    if max_size <= 0.0 {
        return Vec::new();
    }

    region
        .into_iter()
        .filter(|f| f.font_size >= max_size - config.font_tolerance)
        .collect()
}

/// Drop fragments that cannot be title text: sub-2-character runs, e-mail
/// addresses, and configured running-header literals.
pub fn drop_noise(fragments: Vec<Fragment>, config: &ParsingConfig) -> Vec<Fragment> {
    fragments
        .into_iter()
        .filter(|f| {
            if f.text.chars().count() < 2 {
                return false;
            }
            if f.text.contains('@') {
                return false;
            }
            !config
                .excluded_literals
                .iter()
                .any(|lit| f.text.contains(lit.as_str()))
        })
        .collect()
}

/// Group fragments into lines by vertical proximity.
///
/// The fragments are sorted by (y, x) first; a fragment joins the current
/// line when its y is within `tolerance` of the line's first member, so
/// grouping is transitive via the sequential scan, not pairwise. Line text
/// is the x-ordered space-join of its members; line y is the mean.
pub fn group_into_lines(mut fragments: Vec<Fragment>, tolerance: f32) -> Vec<Line> {
    fragments.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

    let mut lines = Vec::new();
    let mut current: Vec<Fragment> = Vec::new();

    let flush = |members: &mut Vec<Fragment>, lines: &mut Vec<Line>| {
        if members.is_empty() {
            return;
        }
        members.sort_by(|a, b| a.x.total_cmp(&b.x));
        let text = normalize(
            &members
                .iter()
                .map(|f| f.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        );
        if !text.is_empty() {
            let y = members.iter().map(|f| f.y).sum::<f32>() / members.len() as f32;
            lines.push(Line { y, text });
        }
        members.clear();
    };

    for fragment in fragments {
        let same_line = current
            .first()
            .is_some_and(|first| (fragment.y - first.y).abs() <= tolerance);
        if !current.is_empty() && !same_line {
            flush(&mut current, &mut lines);
        }
        current.push(fragment);
    }
    flush(&mut current, &mut lines);

    lines
}

/// Drop lines that belong to the author/affiliation block rather than the
/// title, and everything from the abstract marker on. Capped at
/// `max_title_lines` as a defensive limit against mis-detected regions.
pub fn filter_title_lines(lines: Vec<Line>, config: &ParsingConfig) -> Vec<Line> {
    let mut kept = Vec::new();

    for line in lines {
        let text = &line.text;

        // Title collection stops at the abstract block
        if config
            .abstract_primary_markers
            .iter()
            .chain(config.abstract_secondary_markers.iter())
            .any(|m| text.contains(m.as_str()))
        {
            break;
        }

        if config
            .author_prefixes
            .iter()
            .any(|p| text.starts_with(p.as_str()))
        {
            break;
        }
        if text.contains('@') {
            break;
        }
        if config.location_literals.iter().any(|l| text == l) {
            break;
        }
        if config
            .company_suffixes
            .iter()
            .any(|s| text.contains(s.as_str()))
        {
            break;
        }

        if text.chars().count() < 3 {
            continue;
        }

        kept.push(line);
        if kept.len() >= config.max_title_lines {
            break;
        }
    }

    kept
}

/// Full layout pass: region restriction, noise filtering, grouping, and
/// title-line filtering, in that order. Empty output means "title not
/// found" and is not an error.
pub fn title_lines(fragments: &[Fragment], page_height: f32, config: &ParsingConfig) -> Vec<Line> {
    let band = title_region(fragments, page_height, config);
    let band = drop_noise(band, config);
    if band.is_empty() {
        return Vec::new();
    }
    let lines = group_into_lines(band, config.line_tolerance);
    filter_title_lines(lines, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str, x: f32, y: f32, size: f32) -> Fragment {
        Fragment::new(text, x, y, size)
    }

    #[test]
    fn region_stops_above_marker_fragment() {
        let cfg = ParsingConfig::default();
        let fragments = vec![
            frag("Büyük Başlık", 50.0, 100.0, 18.0),
            frag("Özetçe", 50.0, 300.0, 10.0),
            frag("gövde metni", 50.0, 320.0, 10.0),
        ];
        let region = title_region(&fragments, 800.0, &cfg);
        assert_eq!(region.len(), 1);
        assert_eq!(region[0].text, "Büyük Başlık");
    }

    #[test]
    fn region_falls_back_to_page_fraction() {
        let cfg = ParsingConfig::default();
        let fragments = vec![
            frag("Başlık", 50.0, 100.0, 18.0),
            frag("alt bilgi", 50.0, 700.0, 18.0),
        ];
        // no marker fragment: cutoff at 0.6 * 800 = 480
        let region = title_region(&fragments, 800.0, &cfg);
        assert_eq!(region.len(), 1);
        assert_eq!(region[0].text, "Başlık");
    }

    #[test]
    fn font_band_keeps_slightly_smaller_opening_line() {
        let cfg = ParsingConfig::default();
        let fragments = vec![
            frag("Küçük açılış satırı", 50.0, 90.0, 15.0),
            frag("Ana başlık satırı", 50.0, 110.0, 18.0),
            frag("dipnot", 50.0, 130.0, 8.0),
        ];
        let region = title_region(&fragments, 800.0, &cfg);
        let texts: Vec<&str> = region.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["Küçük açılış satırı", "Ana başlık satırı"]);
    }

    #[test]
    fn noise_filter_drops_emails_and_headers() {
        let cfg = ParsingConfig::default();
        let fragments = vec![
            frag("ad.soyad@example.com", 0.0, 0.0, 12.0),
            frag("LIFT UP Bildiri Kitabı", 0.0, 0.0, 12.0),
            frag("x", 0.0, 0.0, 12.0),
            frag("Gerçek başlık", 0.0, 0.0, 12.0),
        ];
        let kept = drop_noise(fragments, &cfg);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text, "Gerçek başlık");
    }

    #[test]
    fn grouping_joins_within_tolerance_and_orders_by_x() {
        let fragments = vec![
            frag("dünya", 120.0, 101.0, 12.0),
            frag("merhaba", 40.0, 100.0, 12.0),
            frag("ikinci satır", 40.0, 120.0, 12.0),
        ];
        let lines = group_into_lines(fragments, 3.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "merhaba dünya");
        assert!((lines[0].y - 100.5).abs() < 0.01);
        assert_eq!(lines[1].text, "ikinci satır");
    }

    #[test]
    fn grouping_is_sequential_not_pairwise() {
        // 100 and 102.5 group; 105.5 is within tolerance of 102.5 but not of
        // the line's first member, so it starts a new line.
        let fragments = vec![
            frag("a1", 0.0, 100.0, 12.0),
            frag("a2", 10.0, 102.5, 12.0),
            frag("b1", 0.0, 105.5, 12.0),
        ];
        let lines = group_into_lines(fragments, 3.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "a1 a2");
        assert_eq!(lines[1].text, "b1");
    }

    #[test]
    fn title_filter_stops_at_author_block() {
        let cfg = ParsingConfig::default();
        let lines = vec![
            Line {
                y: 100.0,
                text: "Başlık satırı".into(),
            },
            Line {
                y: 120.0,
                text: "Öğrenci: Ali Veli".into(),
            },
            Line {
                y: 140.0,
                text: "başka bir satır".into(),
            },
        ];
        let kept = filter_title_lines(lines, &cfg);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text, "Başlık satırı");
    }

    #[test]
    fn title_filter_caps_line_count() {
        let cfg = ParsingConfig::default();
        let lines: Vec<Line> = (0..20)
            .map(|i| Line {
                y: i as f32 * 15.0,
                text: format!("satır numarası {i}"),
            })
            .collect();
        let kept = filter_title_lines(lines, &cfg);
        assert_eq!(kept.len(), cfg.max_title_lines);
    }
}
