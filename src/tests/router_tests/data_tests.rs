// Classifier artifacts feeding the dashboard end to end.

use crate::classifier::{write_classification, Classifier};
use crate::config::DashboardConfig;
use crate::dashboard::{shared_loading, spawn_loader, DashboardState};
use crate::domain::{ComplexRecord, SubAreaTable};
use crate::router::handle;
use crate::tests::utils::{body_string, get};
use std::fs;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

fn harvested(no: &str, name: &str, price: u64, area: f64) -> ComplexRecord {
    ComplexRecord {
        complex_no: no.into(),
        name: Some(name.into()),
        year: Some(2016),
        units: Some(800),
        price_median: Some(price),
        area_rep: Some(area),
        ..ComplexRecord::default()
    }
}

#[test]
fn classified_artifacts_load_into_a_ready_dashboard() {
    let dir = std::env::temp_dir().join(format!(
        "pipeline_{}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));

    let classifier = Classifier::new(SubAreaTable::builtin());
    let out = classifier.classify(
        vec![
            harvested("1", "새뜸마을 10단지", 62_000, 84.9),
            harvested("2", "새뜸마을 11단지", 58_000, 59.9),
            harvested("3", "한뜰마을 2단지", 71_000, 99.8),
            harvested("4", "세종 더 퍼스트 오피스텔", 18_000, 27.0),
        ],
        0,
    );
    let files = write_classification(&out, classifier.table(), &dir).unwrap();

    let cfg = DashboardConfig {
        data: files.records_json.clone(),
        summary: files.summary.clone(),
        ..DashboardConfig::default()
    };
    let dash = shared_loading();
    spawn_loader(cfg, Arc::clone(&dash)).join().unwrap();

    match &*dash.read().unwrap() {
        DashboardState::Ready(app) => {
            assert_eq!(app.data.records.len(), 4);
            // The summary lists every label, populated or not.
            assert_eq!(app.data.sub_areas.len(), 17);
        }
        other => panic!("expected ready state, got {other:?}"),
    }

    let body = body_string(handle(get("/"), &dash).unwrap());
    assert!(body.contains("한뜰마을 2단지"));
    assert!(body.contains("Average price by sub-area"));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn empty_artifact_ends_in_the_error_state() {
    let path = std::env::temp_dir().join(format!(
        "empty_classified_{}.json",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::write(&path, "[]").unwrap();

    let cfg = DashboardConfig {
        data: path.clone(),
        ..DashboardConfig::default()
    };
    let dash = shared_loading();
    spawn_loader(cfg, Arc::clone(&dash)).join().unwrap();

    let resp = handle(get("/"), &dash).unwrap();
    assert_eq!(resp.status(), 503);
    assert!(body_string(resp).contains("holds no records"));

    let _ = fs::remove_file(path);
}
