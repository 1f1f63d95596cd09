//! Per-region catalog counts.

use serde::{Deserialize, Serialize};

use crate::record::RegionRecord;

/// Seconds per ballot unit measured for one-request-at-a-time downloads.
pub const SEQUENTIAL_SECS_PER_UNIT: f64 = 2.38;

/// Seconds per ballot unit measured for batched downloads.
pub const BATCHED_SECS_PER_UNIT: f64 = 0.099;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    #[serde(rename = "state")]
    pub region: String,
    #[serde(rename = "no_councils")]
    pub councils: usize,
    #[serde(rename = "total_ballots")]
    pub ballot_units: usize,
}

pub fn summarize(record: &RegionRecord) -> CatalogSummary {
    CatalogSummary {
        region: record.code.clone(),
        councils: record.councils.len(),
        ballot_units: record.section_count(),
    }
}

pub fn total_units(summaries: &[CatalogSummary]) -> usize {
    summaries.iter().map(|s| s.ballot_units).sum()
}

/// Projected wall-clock seconds to download `units` at `secs_per_unit`.
pub fn projected_secs(units: usize, secs_per_unit: f64) -> f64 {
    units as f64 * secs_per_unit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::parse_region_str;

    #[test]
    fn summary_counts_councils_and_sections() {
        let record = parse_region_str(
            r#"{"abr":[{"cd":"AP","mu":[
                {"cd":"06050","zon":[{"cd":"0002","sec":[{"ns":"0001"},{"ns":"0002"}]}]},
                {"cd":"06122","zon":[{"cd":"0007","sec":[{"ns":"0181"}]},{"cd":"0010","sec":[]}]}
            ]}]}"#,
        )
        .unwrap();

        let summary = summarize(&record);
        assert_eq!(summary.region, "AP");
        assert_eq!(summary.councils, 2);
        assert_eq!(summary.ballot_units, 3);
    }

    #[test]
    fn summary_serializes_with_report_keys() {
        let summary = CatalogSummary {
            region: "RR".into(),
            councils: 15,
            ballot_units: 1000,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["state"], "RR");
        assert_eq!(json["no_councils"], 15);
        assert_eq!(json["total_ballots"], 1000);
    }

    #[test]
    fn totals_and_projection() {
        let summaries = vec![
            CatalogSummary { region: "A".into(), councils: 1, ballot_units: 10 },
            CatalogSummary { region: "B".into(), councils: 2, ballot_units: 30 },
        ];
        assert_eq!(total_units(&summaries), 40);
        assert!((projected_secs(40, 0.5) - 20.0).abs() < f64::EPSILON);
    }
}
