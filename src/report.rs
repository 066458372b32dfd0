//! Cleaning-report arithmetic: derived counts and whole-percent shares
//! for the row-count summary the service returns.

use crate::models::{CleaningReport, CleaningSummary};
use serde::Serialize;

impl CleaningReport {
    /// Rows removed by cleaning.
    pub fn rows_removed(&self) -> u64 {
        self.rows_before.saturating_sub(self.rows_after)
    }

    /// Removed rows as a whole percentage of the original row count.
    pub fn removed_percent(&self) -> u32 {
        percent_of(self.rows_removed(), self.rows_before)
    }

    /// Per-category breakdown in presentation order.
    pub fn summary_rows(&self) -> Vec<ReportRow> {
        let CleaningSummary {
            missing_values,
            invalid_types,
            duplicates_removed,
        } = self.cleaning_summary;
        vec![
            ReportRow::new("missing_values", missing_values, self.rows_before),
            ReportRow::new("invalid_types", invalid_types, self.rows_before),
            ReportRow::new("duplicates_removed", duplicates_removed, self.rows_before),
        ]
    }
}

/// One row of the cleaning breakdown table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub category: &'static str,
    pub count: u64,
    pub percent: u32,
}

impl ReportRow {
    fn new(category: &'static str, count: u64, rows_before: u64) -> Self {
        Self {
            category,
            count,
            percent: percent_of(count, rows_before),
        }
    }

    /// Human-readable label for table output.
    pub fn label(&self) -> &'static str {
        match self.category {
            "missing_values" => "Missing values",
            "invalid_types" => "Invalid types",
            "duplicates_removed" => "Duplicates removed",
            other => other,
        }
    }
}

/// Share of `part` in `whole`, rounded to the nearest whole percent;
/// 0 when `whole` is 0.
pub fn percent_of(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        0
    } else {
        ((part as f64 / whole as f64) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CleaningReport, CleaningSummary};

    fn report(before: u64, after: u64) -> CleaningReport {
        CleaningReport {
            rows_before: before,
            rows_after: after,
            cleaning_summary: CleaningSummary {
                missing_values: 5,
                invalid_types: 3,
                duplicates_removed: 12,
            },
        }
    }

    #[test]
    fn removed_count_and_percent() {
        let r = report(100, 80);
        assert_eq!(r.rows_removed(), 20);
        assert_eq!(r.removed_percent(), 20);
    }

    #[test]
    fn zero_rows_before_yields_zero_percent() {
        let r = report(0, 0);
        assert_eq!(r.removed_percent(), 0);
        assert!(r.summary_rows().iter().all(|row| row.percent == 0));
    }

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(2, 3), 67);
        assert_eq!(percent_of(1, 200), 1);
    }
}
