use std::fs;
use std::path::Path;

/// Fail the build early on fixtures the page could not load, and warn when
/// the map would start without an access token.
fn main() {
    let basins = Path::new("../fixtures/basins.json");
    let projects = Path::new("../fixtures/projects.csv");

    let basins_json = fs::read_to_string(basins).expect("fixtures/basins.json is missing");
    let doc: serde_json::Value = serde_json::from_str(&basins_json).expect("fixtures/basins.json is not JSON");
    let basin_count = doc["basins"].as_array().map(|b| b.len()).unwrap_or(0);
    if basin_count == 0 {
        panic!("fixtures/basins.json has no basins");
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(projects)
        .expect("failed to open fixtures/projects.csv");
    let project_count = rdr.records().filter(|r| r.is_ok()).count();

    if std::env::var("MRM_DATASET_URL").is_err() {
        println!(
            "cargo:rustc-env=MRM_EMBEDDED_SUMMARY={} basins, {} projects",
            basin_count, project_count
        );
    } else {
        println!("cargo:rustc-env=MRM_EMBEDDED_SUMMARY=fetched at runtime");
    }

    if std::env::var("MAPBOX_TOKEN").map(|t| t.trim().is_empty()).unwrap_or(true) {
        println!("cargo:warning=MAPBOX_TOKEN is not set; the page will show the static basin grid");
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../fixtures/basins.json");
    println!("cargo:rerun-if-changed=../fixtures/projects.csv");
    println!("cargo:rerun-if-env-changed=MAPBOX_TOKEN");
    println!("cargo:rerun-if-env-changed=MRM_DATASET_URL");
}
