// src/tests/router_tests/dashboard_tests.rs

use crate::dashboard::DashboardState;
use crate::errors::ServerError;
use crate::responses::error_to_response;
use crate::router::handle;
use crate::tests::utils::{body_string, get, ready, sample_records, shared};
use astra::Body;
use http::{Method, Request};
use url::form_urlencoded::byte_serialize;

fn enc(s: &str) -> String {
    byte_serialize(s.as_bytes()).collect()
}

/// Text of each `<td>` in the table row that starts with `name`.
fn row_cells(body: &str, name: &str) -> Vec<String> {
    let start = body
        .find(&format!("<tr><td>{name}</td>"))
        .unwrap_or_else(|| panic!("no table row for {name}"));
    let row = &body[start..];
    let row = &row[..row.find("</tr>").unwrap()];
    row.split("<td>")
        .skip(1)
        .map(|cell| cell.trim_end_matches("</td>").to_string())
        .collect()
}

#[test]
fn default_view_lists_every_record() {
    let dash = ready(sample_records());
    let resp = handle(get("/"), &dash).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    for name in ["고운뜰 1단지", "고운뜰 2단지", "고운뜰 3단지", "가락마을 7단지"] {
        assert!(body.contains(name), "missing {name}");
    }
    assert!(body.contains("Showing <strong>4</strong>"));
    assert!(!body.contains("filtered</span>"));

    // Unpriced complex stays listed with an empty price marker.
    let cells = row_cells(&body, "가락마을 7단지");
    assert_eq!(cells[1], "가락마을");
    assert_eq!(cells[4], "-");
    assert_eq!(row_cells(&body, "고운뜰 2단지")[4], "2억");
}

#[test]
fn selecting_one_sub_area_keeps_only_its_complexes() {
    let dash = ready(sample_records());
    let uri = format!("/?f=1&sa={}", enc("고운동"));
    let body = body_string(handle(get(&uri), &dash).unwrap());

    assert!(body.contains("고운뜰 3단지"));
    assert!(!body.contains("가락마을 7단지"));
    assert!(body.contains("Showing <strong>3</strong>"));
    assert!(body.contains("filtered</span>"));
}

#[test]
fn submitting_with_nothing_checked_shows_everything() {
    let dash = ready(sample_records());
    let body = body_string(handle(get("/?f=1"), &dash).unwrap());
    assert!(body.contains("Showing <strong>4</strong>"));
    assert!(body.contains("가락마을 7단지"));
}

#[test]
fn filter_with_no_matches_renders_no_results() {
    let dash = ready(sample_records());
    let body = body_string(handle(get("/?f=1&pb=3"), &dash).unwrap());
    assert!(body.contains("No complexes match the current filters."));
    assert!(!body.contains("<table>"));
}

#[test]
fn price_header_link_cycles_direction() {
    let dash = ready(sample_records());
    let body = body_string(handle(get("/"), &dash).unwrap());
    assert!(body.contains("sort=price&amp;dir=asc"));

    let body = body_string(handle(get("/?sort=price&dir=asc"), &dash).unwrap());
    let first = body.find("고운뜰 1단지").unwrap();
    let third = body.find("고운뜰 3단지").unwrap();
    assert!(first < third, "ascending price should list the cheapest first");
}

#[test]
fn malformed_query_is_a_bad_request() {
    let dash = ready(sample_records());
    let err = handle(get("/?sort=colour"), &dash).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
    assert_eq!(error_to_response(err).status(), 400);
}

#[test]
fn loading_state_refreshes_itself() {
    let dash = shared(DashboardState::Loading);
    let resp = handle(get("/"), &dash).unwrap();
    assert_eq!(resp.status(), 503);
    assert!(body_string(resp).contains("http-equiv=\"refresh\""));
}

#[test]
fn load_error_disables_panels() {
    let dash = shared(DashboardState::Error("data/classified.json holds no records".into()));
    let resp = handle(get("/?f=1&sa=x"), &dash).unwrap();
    assert_eq!(resp.status(), 503);

    let body = body_string(resp);
    assert!(body.contains("holds no records"));
    assert!(body.contains("fieldset disabled"));
    assert!(body.contains("charts disabled"));
}

#[test]
fn classified_json_serves_the_record_set() {
    let dash = ready(sample_records());
    let resp = handle(get("/classified.json"), &dash).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["Content-Type"], "application/json");

    let records: Vec<serde_json::Value> = serde_json::from_str(&body_string(resp)).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0]["sub_area"], "고운동");
}

#[test]
fn classified_json_while_loading_is_unavailable() {
    let dash = shared(DashboardState::Loading);
    let err = handle(get("/classified.json"), &dash).unwrap_err();
    assert_eq!(error_to_response(err).status(), 503);
}

#[test]
fn unknown_routes_are_not_found() {
    let dash = ready(sample_records());
    assert!(matches!(handle(get("/admin"), &dash), Err(ServerError::NotFound)));

    let post = Request::builder()
        .method(Method::POST)
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let err = handle(post, &dash).unwrap_err();
    assert_eq!(error_to_response(err).status(), 404);
}
