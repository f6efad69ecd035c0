//! Catalog database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};
use crate::catalog::Catalog;
use crate::models::DrugRecord;

/// `catalog_meta` key holding the fingerprint of the stored catalog.
const FINGERPRINT_KEY: &str = "fingerprint";

impl Database {
    /// Replace the stored catalog, keeping its order.
    pub fn replace_catalog(&self, catalog: &Catalog) -> DbResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM drug_catalog", [])?;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO drug_catalog (position, name, concentration, unit, min_dose, max_dose)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )?;
            for (position, drug) in catalog.iter().enumerate() {
                stmt.execute(params![
                    position as i64,
                    drug.name,
                    drug.concentration,
                    drug.unit,
                    drug.min_dose,
                    drug.max_dose,
                ])?;
            }
        }
        tx.execute(
            r#"
            INSERT INTO catalog_meta (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
            params![FINGERPRINT_KEY, catalog.fingerprint()],
        )?;
        tx.commit()?;

        tracing::info!(drugs = catalog.len(), "catalog stored");
        Ok(())
    }

    /// Load the stored catalog in selection order.
    pub fn load_catalog(&self) -> DbResult<Catalog> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT name, concentration, unit, min_dose, max_dose
            FROM drug_catalog
            ORDER BY position
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(DrugRecord {
                name: row.get(0)?,
                concentration: row.get(1)?,
                unit: row.get(2)?,
                min_dose: row.get(3)?,
                max_dose: row.get(4)?,
            })
        })?;

        let mut drugs = Vec::new();
        for row in rows {
            drugs.push(row?);
        }
        Ok(Catalog::new(drugs)?)
    }

    /// Get a single drug by selection position.
    pub fn get_drug(&self, position: usize) -> DbResult<Option<DrugRecord>> {
        let drug = self
            .conn
            .query_row(
                r#"
                SELECT name, concentration, unit, min_dose, max_dose
                FROM drug_catalog
                WHERE position = ?
                "#,
                [position as i64],
                |row| {
                    Ok(DrugRecord {
                        name: row.get(0)?,
                        concentration: row.get(1)?,
                        unit: row.get(2)?,
                        min_dose: row.get(3)?,
                        max_dose: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(drug)
    }

    /// Number of stored drugs.
    pub fn catalog_len(&self) -> DbResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM drug_catalog", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Fingerprint recorded when the catalog was last stored.
    pub fn catalog_fingerprint(&self) -> DbResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM catalog_meta WHERE key = ?",
                [FINGERPRINT_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}
