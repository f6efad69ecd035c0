//! Catalog storage integration tests.

use infusion_calc_core::catalog::Catalog;
use infusion_calc_core::db::Database;
use infusion_calc_core::engine::evaluate_text;

const ICU_CATALOG: &str = r#"[
    {"name": "Noradrenaline", "concentration": 40, "unit": "mcg/mL", "min_dose": 0.003, "max_dose": 0.2},
    {"name": "Propofol", "concentration": 10000, "unit": "mcg/mL", "min_dose": 1.0, "max_dose": 4.0},
    {"name": "Dexmedetomidine", "concentration": 4, "unit": "mcg/mL", "min_dose": 0.0002, "max_dose": 0.0014}
]"#;

#[test]
fn test_catalog_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("infusion.db");
    let catalog = Catalog::from_json(ICU_CATALOG).unwrap();

    {
        let db = Database::open(&path).unwrap();
        db.replace_catalog(&catalog).unwrap();
        db.set_preference("lang", "en").unwrap();
    }

    let db = Database::open(&path).unwrap();
    let loaded = db.load_catalog().unwrap();
    assert_eq!(loaded, catalog);
    assert_eq!(db.catalog_fingerprint().unwrap(), Some(catalog.fingerprint()));
    assert_eq!(db.get_preference("lang").unwrap(), Some("en".into()));
}

#[test]
fn test_catalog_file_to_calculation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, ICU_CATALOG).unwrap();

    let catalog = Catalog::load(&path).unwrap();
    let index = catalog.lookup("propofol").unwrap();
    let drug = catalog.get(index).unwrap();

    // 20 mL/h of 10 mg/mL for 100 kg = 2 mg/kg/h
    let calc = evaluate_text(drug, "100", "20", "").unwrap();
    assert_eq!(calc.result.mg_per_hour, 200.0);
    assert_eq!(calc.result.mg_per_kg_per_hour, 2.0);
    assert!(calc.in_range);
}

#[test]
fn test_missing_catalog_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Catalog::load(dir.path().join("nope.json"));
    assert!(result.is_err());
}
