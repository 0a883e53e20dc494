use farm_schemes::config::CatalogConfig;
use farm_schemes::schemes::{
    ApplicantProfile, CachePolicy, CatalogError, CsvSchemeCatalog, EligibilityFilter,
    MalformedRowPolicy, SchemeId, SchemeSource, REQUIRED_COLUMNS,
};
use std::fs::{File, FileTimes};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

const HEADER: &str = "scheme_id,scheme_name,benefits,min_age,max_age,min_land_holding,max_land_holding,income_limit,farmer_type,state,crop_type,category,gender,other_conditions,steps_to_apply,official_url";

fn sample_catalog_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/schemes/government_schemes.csv")
}

fn write_catalog(path: &Path, rows: &[String], modified: SystemTime) {
    let mut file = File::create(path).expect("create catalog");
    writeln!(file, "{HEADER}").expect("write header");
    for row in rows {
        writeln!(file, "{row}").expect("write row");
    }
    file.set_times(FileTimes::new().set_modified(modified))
        .expect("set mtime");
}

fn row(id: &str) -> String {
    format!("{id},Scheme {id},Benefit,18,60,0,5,200000,any,ALL,ALL,ALL,ALL,None,Apply,https://example.gov/{id}")
}

fn ids(catalog: &CsvSchemeCatalog) -> Vec<String> {
    catalog
        .load()
        .expect("catalog loads")
        .iter()
        .map(|scheme| scheme.scheme_id.0.clone())
        .collect()
}

#[test]
fn shipped_catalog_has_required_columns_and_rows() {
    let data = include_bytes!("../../../data/schemes/government_schemes.csv");
    let schemes = CsvSchemeCatalog::load_from_reader(&data[..]).expect("sample catalog parses");

    assert_eq!(schemes.len(), 8);
    assert_eq!(schemes[0].scheme_id, SchemeId::from("PMKISAN"));
    assert!(schemes
        .iter()
        .all(|scheme| farm_schemes::schemes::validate_scheme(scheme).is_ok()));

    let header = std::str::from_utf8(&data[..])
        .expect("utf-8 catalog")
        .lines()
        .next()
        .expect("header row");
    for column in REQUIRED_COLUMNS {
        assert!(header.split(',').any(|name| name == column), "{column} present");
    }
}

#[test]
fn file_catalog_reads_shipped_data() {
    let catalog = CsvSchemeCatalog::new(&CatalogConfig::new(sample_catalog_path()));

    let schemes = catalog.load().expect("catalog loads");
    assert_eq!(schemes.len(), 8);
    assert_eq!(
        schemes[1].benefits,
        "Crop insurance against yield losses from natural calamities at a capped farmer premium"
    );
}

#[test]
fn missing_columns_fail_the_load() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("schemes.csv");
    std::fs::write(&path, "scheme_id,scheme_name\nS1,Name\n").expect("write catalog");

    let catalog = CsvSchemeCatalog::new(&CatalogConfig::new(&path));
    match catalog.load() {
        Err(CatalogError::SchemaValidation { missing }) => {
            assert_eq!(missing.len(), 14);
            assert_eq!(missing[0], "benefits");
        }
        other => panic!("expected schema validation error, got {other:?}"),
    }
}

#[test]
fn uncached_catalog_rereads_every_load() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("schemes.csv");
    let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    write_catalog(&path, &[row("S1")], start);

    let catalog = CsvSchemeCatalog::new(&CatalogConfig::new(&path));
    assert_eq!(ids(&catalog), vec!["S1"]);

    write_catalog(&path, &[row("S1"), row("S2")], start);
    assert_eq!(ids(&catalog), vec!["S1", "S2"]);
}

#[test]
fn mtime_cache_reloads_only_when_file_changes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("schemes.csv");
    let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    write_catalog(&path, &[row("S1")], start);

    let mut config = CatalogConfig::new(&path);
    config.cache = CachePolicy::ModifiedTime;
    let catalog = CsvSchemeCatalog::new(&config);
    assert_eq!(ids(&catalog), vec!["S1"]);

    // same mtime: the cached rows are served
    write_catalog(&path, &[row("S1"), row("S2")], start);
    assert_eq!(ids(&catalog), vec!["S1"]);

    write_catalog(
        &path,
        &[row("S1"), row("S2")],
        start + Duration::from_secs(60),
    );
    assert_eq!(ids(&catalog), vec!["S1", "S2"]);
}

#[test]
fn ttl_cache_honours_explicit_invalidation() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("schemes.csv");
    let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    write_catalog(&path, &[row("S1")], start);

    let mut config = CatalogConfig::new(&path);
    config.cache = CachePolicy::TimeToLive(Duration::from_secs(3600));
    let catalog = CsvSchemeCatalog::new(&config);
    assert_eq!(ids(&catalog), vec!["S1"]);

    write_catalog(&path, &[row("S2")], start);
    assert_eq!(ids(&catalog), vec!["S1"]);

    catalog.invalidate();
    assert_eq!(ids(&catalog), vec!["S2"]);
}

#[test]
fn deleted_file_is_reported_even_when_cached_by_mtime() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("schemes.csv");
    write_catalog(&path, &[row("S1")], SystemTime::now());

    let mut config = CatalogConfig::new(&path);
    config.cache = CachePolicy::ModifiedTime;
    let catalog = CsvSchemeCatalog::new(&config);
    assert_eq!(ids(&catalog), vec!["S1"]);

    std::fs::remove_file(&path).expect("remove catalog");
    assert!(matches!(
        catalog.load(),
        Err(CatalogError::SourceNotFound { .. })
    ));
}

#[test]
fn short_row_is_skipped_without_failing_the_catalog() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("schemes.csv");
    write_catalog(
        &path,
        &[row("S1"), "BAD,Broken,B,18".to_string()],
        SystemTime::now(),
    );

    let catalog = CsvSchemeCatalog::new(&CatalogConfig::new(&path));
    assert_eq!(ids(&catalog), vec!["S1", "BAD"]);

    let filter = EligibilityFilter::new(Arc::new(catalog), MalformedRowPolicy::Skip);
    let profile = ApplicantProfile {
        age: 35,
        land_holding: 2.5,
        income: 180000.0,
        farmer_type: "small".to_string(),
        state: "Kerala".to_string(),
        crop_type: "rice".to_string(),
        category: "GENERAL".to_string(),
        gender: "M".to_string(),
    };

    let report = filter.filter_eligible(&profile).expect("short row is skipped");
    assert_eq!(report.total_eligible_schemes, 1);
    assert_eq!(report.schemes[0].scheme_id, SchemeId::from("S1"));
}
