//! Summary statistics over a produced record table.

use std::fmt;

use bildex_core::ArticleRecord;

/// Fill count and length statistics for one text column.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSummary {
    pub name: &'static str,
    pub filled: usize,
    pub min_len: usize,
    pub max_len: usize,
    pub avg_len: f64,
}

impl FieldSummary {
    fn compute(
        name: &'static str,
        records: &[ArticleRecord],
        field: fn(&ArticleRecord) -> &str,
    ) -> Self {
        let lengths: Vec<usize> = records
            .iter()
            .map(field)
            .filter(|v| !v.is_empty())
            .map(|v| v.chars().count())
            .collect();
        let filled = lengths.len();
        let (min_len, max_len, avg_len) = if filled == 0 {
            (0, 0, 0.0)
        } else {
            (
                *lengths.iter().min().unwrap_or(&0),
                *lengths.iter().max().unwrap_or(&0),
                lengths.iter().sum::<usize>() as f64 / filled as f64,
            )
        };
        Self {
            name,
            filled,
            min_len,
            max_len,
            avg_len,
        }
    }
}

/// Aggregate view of one extraction run (or a re-read CSV).
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub total: usize,
    pub fields: Vec<FieldSummary>,
    /// Filled-cell percentage over the three primary-language columns.
    pub primary_completeness: f64,
    /// Filled-cell percentage over the three secondary-language columns.
    pub secondary_completeness: f64,
}

impl RunSummary {
    pub fn from_records(records: &[ArticleRecord]) -> Self {
        let fields = vec![
            FieldSummary::compute("Title_Primary", records, |r| &r.title_primary),
            FieldSummary::compute("Title_Secondary", records, |r| &r.title_secondary),
            FieldSummary::compute("Abstract_Primary", records, |r| &r.abstract_primary),
            FieldSummary::compute("Abstract_Secondary", records, |r| &r.abstract_secondary),
            FieldSummary::compute("Keywords_Primary", records, |r| &r.keywords_primary),
            FieldSummary::compute("Keywords_Secondary", records, |r| &r.keywords_secondary),
        ];

        let completeness = |names: [&str; 3]| -> f64 {
            if records.is_empty() {
                return 0.0;
            }
            let filled: usize = fields
                .iter()
                .filter(|f| names.contains(&f.name))
                .map(|f| f.filled)
                .sum();
            filled as f64 / (records.len() * 3) as f64 * 100.0
        };

        let primary_completeness =
            completeness(["Title_Primary", "Abstract_Primary", "Keywords_Primary"]);
        let secondary_completeness = completeness([
            "Title_Secondary",
            "Abstract_Secondary",
            "Keywords_Secondary",
        ]);

        Self {
            total: records.len(),
            fields,
            primary_completeness,
            secondary_completeness,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} record(s)", self.total)?;
        for field in &self.fields {
            if field.filled == 0 {
                writeln!(f, "  {:<20} empty", field.name)?;
            } else {
                writeln!(
                    f,
                    "  {:<20} {} filled (avg {:.0} chars, {}-{})",
                    field.name, field.filled, field.avg_len, field.min_len, field.max_len
                )?;
            }
        }
        writeln!(f, "  primary completeness:   {:.1}%", self.primary_completeness)?;
        write!(f, "  secondary completeness: {:.1}%", self.secondary_completeness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title_primary: &str, abstract_secondary: &str) -> ArticleRecord {
        ArticleRecord {
            page_number: 1,
            year: "2021".into(),
            title_primary: title_primary.into(),
            title_secondary: String::new(),
            abstract_primary: String::new(),
            abstract_secondary: abstract_secondary.into(),
            keywords_primary: String::new(),
            keywords_secondary: String::new(),
        }
    }

    #[test]
    fn empty_input_is_all_zeroes() {
        let summary = RunSummary::from_records(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.primary_completeness, 0.0);
        assert!(summary.fields.iter().all(|f| f.filled == 0));
    }

    #[test]
    fn counts_and_lengths() {
        let records = vec![record("Kısa", "abcdef"), record("", "ab")];
        let summary = RunSummary::from_records(&records);
        assert_eq!(summary.total, 2);

        let title = &summary.fields[0];
        assert_eq!(title.name, "Title_Primary");
        assert_eq!(title.filled, 1);
        assert_eq!(title.min_len, 4);
        assert_eq!(title.max_len, 4);

        let abs = &summary.fields[3];
        assert_eq!(abs.filled, 2);
        assert_eq!(abs.min_len, 2);
        assert_eq!(abs.max_len, 6);
        assert!((abs.avg_len - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn completeness_is_per_language() {
        // one record: primary has title only (1/3), secondary has abstract only (1/3)
        let records = vec![record("Başlık", "abstract text")];
        let summary = RunSummary::from_records(&records);
        assert!((summary.primary_completeness - 100.0 / 3.0).abs() < 0.01);
        assert!((summary.secondary_completeness - 100.0 / 3.0).abs() < 0.01);
    }

    #[test]
    fn display_mentions_every_column() {
        let summary = RunSummary::from_records(&[record("Başlık", "abstract")]);
        let text = summary.to_string();
        for name in [
            "Title_Primary",
            "Title_Secondary",
            "Abstract_Primary",
            "Abstract_Secondary",
            "Keywords_Primary",
            "Keywords_Secondary",
        ] {
            assert!(text.contains(name), "missing {name} in:\n{text}");
        }
    }
}
