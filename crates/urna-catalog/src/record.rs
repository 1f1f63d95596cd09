//! Typed catalog records.
//!
//! The published registry uses terse keys (`abr`, `mu`, `zon`, `sec`, `ns`).
//! Each record maps them onto named fields; a missing key or a non-string code
//! fails the parse instead of surfacing later as a bad request.

use serde::Deserialize;

/// Top-level catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    #[serde(rename = "abr")]
    pub regions: Vec<RegionRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionRecord {
    #[serde(rename = "cd")]
    pub code: String,
    #[serde(rename = "mu")]
    pub councils: Vec<Council>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Council {
    #[serde(rename = "cd")]
    pub code: String,
    #[serde(rename = "zon")]
    pub zones: Vec<Zone>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Zone {
    #[serde(rename = "cd")]
    pub code: String,
    #[serde(rename = "sec")]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Section {
    #[serde(rename = "ns")]
    pub code: String,
}

impl RegionRecord {
    /// Number of sections across every council and zone.
    pub fn section_count(&self) -> usize {
        self.councils
            .iter()
            .flat_map(|c| &c.zones)
            .map(|z| z.sections.len())
            .sum()
    }
}
