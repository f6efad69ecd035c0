//! SQLite schema definition.

/// Complete database schema for infusion-calc.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Drug Catalog
-- ============================================================================

CREATE TABLE IF NOT EXISTS drug_catalog (
    position INTEGER PRIMARY KEY,                -- selection order, 0-based
    name TEXT NOT NULL,
    concentration REAL NOT NULL,                 -- mcg per mL
    unit TEXT NOT NULL,
    min_dose REAL NOT NULL,                      -- mg/kg/h
    max_dose REAL NOT NULL,                      -- mg/kg/h
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS catalog_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- ============================================================================
-- Preferences (language, theme)
-- ============================================================================

CREATE TABLE IF NOT EXISTS preferences (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
