//! Catalog loading and flattening.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::id::Identifier;
use crate::record::{Catalog, RegionRecord};

/// File name of a region's catalog inside the catalog directory.
pub fn catalog_file_name(region: &str) -> String {
    format!("{}-p000407-cs.json", region.to_lowercase())
}

/// Loads region catalogs from a directory of `{region}-p000407-cs.json` files.
#[derive(Debug, Clone)]
pub struct CatalogReader {
    root: PathBuf,
}

impl CatalogReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, region: &str) -> PathBuf {
        self.root.join(catalog_file_name(region))
    }

    /// Parse the region's catalog file.
    pub fn load(&self, region: &str) -> Result<RegionRecord> {
        let path = self.path_for(region);
        let file = File::open(&path).map_err(|source| CatalogError::Read {
            path: path.clone(),
            source,
        })?;
        let record = parse_region(BufReader::new(file), path.display().to_string())?;
        debug!(
            path = %path.display(),
            councils = record.councils.len(),
            "catalog loaded"
        );
        Ok(record)
    }

    /// Load the region's catalog and flatten it in registry order.
    pub fn identifiers(&self, region: &str) -> Result<Vec<Identifier>> {
        self.load(region).map(|record| flatten(&record))
    }
}

/// Parse a catalog document and return its region record.
///
/// `origin` names the source in error messages.
pub fn parse_region<R: Read>(reader: R, origin: impl Into<String>) -> Result<RegionRecord> {
    let origin = origin.into();
    let catalog: Catalog =
        serde_json::from_reader(reader).map_err(|e| CatalogError::parse(origin.clone(), e))?;
    region_of(catalog, origin)
}

pub fn parse_region_str(json: &str) -> Result<RegionRecord> {
    let catalog: Catalog =
        serde_json::from_str(json).map_err(|e| CatalogError::parse("<inline>", e))?;
    region_of(catalog, "<inline>".to_string())
}

fn region_of(catalog: Catalog, origin: String) -> Result<RegionRecord> {
    catalog
        .regions
        .into_iter()
        .next()
        .ok_or(CatalogError::MissingRegion { origin })
}

/// One identifier per section: council, then zone, then section, in stored order.
pub fn flatten(record: &RegionRecord) -> Vec<Identifier> {
    let region = record.code.to_lowercase();
    let mut ids = Vec::with_capacity(record.section_count());

    for council in &record.councils {
        for zone in &council.zones {
            for section in &zone.sections {
                ids.push(Identifier::new(
                    region.clone(),
                    council.code.clone(),
                    zone.code.clone(),
                    section.code.clone(),
                ));
            }
        }
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const SAMPLE: &str = r#"{
        "dg": {"nm": "ignored"},
        "abr": [{
            "cd": "RR",
            "mu": [
                {"cd": "03018", "nm": "BOA VISTA", "zon": [
                    {"cd": "0001", "sec": [{"ns": "0001"}, {"ns": "0002"}]},
                    {"cd": "0005", "sec": [{"ns": "0010"}]}
                ]},
                {"cd": "06122", "zon": [
                    {"cd": "0007", "sec": [{"ns": "0181"}, {"ns": "0182"}, {"ns": "0183"}]}
                ]},
                {"cd": "03050", "zon": []}
            ]
        }]
    }"#;

    #[test]
    fn flatten_emits_one_identifier_per_section() {
        let record = parse_region_str(SAMPLE).unwrap();
        let ids = flatten(&record);

        assert_eq!(ids.len(), record.section_count());
        assert_eq!(ids.len(), 6);

        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn flatten_preserves_registry_order() {
        let ids = flatten(&parse_region_str(SAMPLE).unwrap());
        let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();

        assert_eq!(
            rendered,
            vec![
                "rr/03018/0001/0001",
                "rr/03018/0001/0002",
                "rr/03018/0005/0010",
                "rr/06122/0007/0181",
                "rr/06122/0007/0182",
                "rr/06122/0007/0183",
            ]
        );
    }

    #[test]
    fn numeric_codes_are_rejected() {
        let json = r#"{"abr":[{"cd":"RR","mu":[{"cd":3018,"zon":[]}]}]}"#;
        assert!(matches!(
            parse_region_str(json),
            Err(CatalogError::Parse { .. })
        ));
    }

    #[test]
    fn missing_section_number_is_rejected() {
        let json = r#"{"abr":[{"cd":"RR","mu":[{"cd":"03018","zon":[{"cd":"0001","sec":[{}]}]}]}]}"#;
        assert!(matches!(
            parse_region_str(json),
            Err(CatalogError::Parse { .. })
        ));
    }

    #[test]
    fn empty_region_list_is_rejected() {
        assert!(matches!(
            parse_region_str(r#"{"abr":[]}"#),
            Err(CatalogError::MissingRegion { .. })
        ));
    }

    #[test]
    fn file_name_is_lowercased() {
        assert_eq!(catalog_file_name("RR"), "rr-p000407-cs.json");
    }
}
