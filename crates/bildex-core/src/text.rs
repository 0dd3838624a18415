//! Whitespace normalization and glyph-encoding repair.

use once_cell::sync::Lazy;
use regex::Regex;

/// Collapse runs of whitespace (including newlines) to a single space and
/// trim. Idempotent; empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            in_space = true;
        } else {
            if in_space && !out.is_empty() {
                out.push(' ');
            }
            in_space = false;
            out.push(c);
        }
    }
    out
}

/// Substitutions for broken CID glyph codes left behind by documents whose
/// fonts carry no usable ToUnicode map. Applied in order; tuned against the
/// proceedings books this tool was written for.
pub const DEFAULT_ENCODING_REPAIRS: &[(&str, &str)] = &[
    ("(cid:3)", " "),
    ("(cid:15)", ","),
    ("(cid:17)", "."),
    ("(cid:20)", "-"),
    ("(cid:21)", "("),
    ("(cid:22)", "V"),
    ("(cid:23)", "f"),
    ("(cid:24)", "o"),
    ("(cid:36)", "A"),
    ("(cid:37)", "B"),
    ("(cid:40)", "E"),
    ("(cid:42)", "G"),
    ("(cid:43)", "H"),
    ("(cid:44)", "I"),
    ("(cid:47)", "L"),
    ("(cid:48)", "M"),
    ("(cid:49)", "N"),
    ("(cid:51)", "P"),
    ("(cid:53)", "R"),
    ("(cid:54)", "S"),
    ("(cid:55)", "T"),
    ("(cid:56)", "U"),
    ("(cid:57)", "V"),
    ("(cid:58)", "W"),
    ("(cid:60)", "Y"),
    ("(cid:64)", ")"),
    ("(cid:68)", "a"),
    ("(cid:69)", "b"),
    ("(cid:70)", "c"),
    ("(cid:71)", "d"),
    ("(cid:72)", "e"),
    ("(cid:74)", "g"),
    ("(cid:75)", "h"),
    ("(cid:76)", "i"),
    ("(cid:77)", "j"),
    ("(cid:78)", "k"),
    ("(cid:79)", "l"),
    ("(cid:80)", "m"),
    ("(cid:81)", "n"),
    ("(cid:83)", "p"),
    ("(cid:85)", "r"),
    ("(cid:86)", "s"),
    ("(cid:87)", "t"),
    ("(cid:88)", "u"),
    ("(cid:89)", "v"),
    ("(cid:90)", "Z"),
    ("(cid:92)", "y"),
    ("(cid:93)", "z"),
    ("(cid:107)", "k"),
    ("(cid:111)", "ç"),
    ("(cid:124)", "ö"),
    ("(cid:129)", "ü"),
    ("(cid:213)", "ı"),
    ("(cid:247)", "ğ"),
    ("(cid:248)", "İ"),
    ("(cid:250)", "ş"),
];

static CID_RESIDUE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(cid:\d+\)").unwrap());

/// Apply an ordered substitution table to raw page text, then strip any
/// remaining `(cid:NNN)` residue. Pure function; pass
/// [`DEFAULT_ENCODING_REPAIRS`] or an injected table.
pub fn repair_encoding(text: &str, repairs: &[(&str, &str)]) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut out = text.to_string();
    for (from, to) in repairs {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    if out.contains("(cid:") {
        out = CID_RESIDUE_RE.replace_all(&out, "").into_owned();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize("  a\n\n b\t c  "), "a b c");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("  Çok   satırlı\n başlık ");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_empty_is_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t "), "");
    }

    #[test]
    fn repair_maps_known_cids() {
        let fixed = repair_encoding("(cid:43)(cid:68)(cid:89)(cid:68)", DEFAULT_ENCODING_REPAIRS);
        assert_eq!(fixed, "Hava");
    }

    #[test]
    fn repair_strips_unknown_residue() {
        let fixed = repair_encoding("a(cid:9999)b", DEFAULT_ENCODING_REPAIRS);
        assert_eq!(fixed, "ab");
    }

    #[test]
    fn repair_empty_table_only_strips_residue() {
        assert_eq!(repair_encoding("x(cid:3)y", &[]), "xy");
    }
}
