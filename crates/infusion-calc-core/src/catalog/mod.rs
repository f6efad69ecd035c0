//! Read-only drug catalog.
//!
//! The catalog is an ordered list of [`DrugRecord`]s supplied from outside
//! (a JSON file, the SQLite store, or a table compiled into a shell). The
//! engine only ever sees the single record selected from it.

mod matcher;

pub use matcher::*;

use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::DrugRecord;

/// Catalog errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid drug record at position {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Ordered list of drug records.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Catalog {
    drugs: Vec<DrugRecord>,
}

impl Catalog {
    /// Build a catalog, checking every record.
    pub fn new(drugs: Vec<DrugRecord>) -> CatalogResult<Self> {
        for (index, drug) in drugs.iter().enumerate() {
            drug.validate()
                .map_err(|reason| CatalogError::InvalidRecord { index, reason })?;
        }
        Ok(Self { drugs })
    }

    /// Parse a JSON array of drug records.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let drugs: Vec<DrugRecord> = serde_json::from_str(json)?;
        Self::new(drugs)
    }

    /// Load a JSON catalog file.
    pub fn load<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            drugs = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Serialize to a JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.drugs)
    }

    /// Drug at `index`, in catalog order.
    pub fn get(&self, index: usize) -> Option<&DrugRecord> {
        self.drugs.get(index)
    }

    pub fn len(&self) -> usize {
        self.drugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrugRecord> {
        self.drugs.iter()
    }

    /// Drug names in catalog order, for populating a selection list.
    pub fn names(&self) -> Vec<&str> {
        self.drugs.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn drugs(&self) -> &[DrugRecord] {
        &self.drugs
    }

    /// Hex SHA-256 of the catalog's JSON form.
    ///
    /// Identical record lists always produce the same fingerprint.
    pub fn fingerprint(&self) -> String {
        // Vec<DrugRecord> of plain fields cannot fail to serialize
        let payload = serde_json::to_vec(&self.drugs).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&payload);
        hex::encode(hasher.finalize())
    }
}

impl IntoIterator for Catalog {
    type Item = DrugRecord;
    type IntoIter = std::vec::IntoIter<DrugRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.drugs.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"[
        {"name": "Noradrenaline", "concentration": 40, "unit": "mcg/mL", "min_dose": 0.003, "max_dose": 0.2},
        {"name": "Propofol", "concentration": 10000, "unit": "mcg/mL", "minDose": 1.0, "maxDose": 4.0}
    ]"#;

    #[test]
    fn test_from_json_keeps_order() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names(), vec!["Noradrenaline", "Propofol"]);
        assert_eq!(catalog.get(1).unwrap().min_dose, 1.0);
        assert!(catalog.get(2).is_none());
    }

    #[test]
    fn test_invalid_record_reports_position() {
        let json = r#"[
            {"name": "Good", "concentration": 40, "unit": "mcg/mL", "min_dose": 0.1, "max_dose": 0.2},
            {"name": "Bad", "concentration": -1, "unit": "mcg/mL", "min_dose": 0.1, "max_dose": 0.2}
        ]"#;
        match Catalog::from_json(json) {
            Err(CatalogError::InvalidRecord { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_fingerprint_stable_and_sensitive() {
        let a = Catalog::from_json(CATALOG_JSON).unwrap();
        let b = Catalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);

        let mut drugs = a.drugs().to_vec();
        drugs[0].max_dose = 0.3;
        let c = Catalog::new(drugs).unwrap();
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_json_roundtrip_preserves_records() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        let reparsed = Catalog::from_json(&catalog.to_json().unwrap()).unwrap();
        assert_eq!(catalog, reparsed);
    }
}
