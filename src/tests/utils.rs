use crate::dashboard::{AppState, DashboardData, DashboardState, SharedDashboard};
use crate::domain::bands::{AreaBand, PriceBand};
use crate::domain::ClassifiedRecord;
use astra::{Body, Response};
use http::{Method, Request};
use std::io::Read;
use std::sync::{Arc, RwLock};

pub fn record(no: &str, name: &str, sub_area: &str, price: Option<u64>, band: Option<u8>) -> ClassifiedRecord {
    ClassifiedRecord {
        complex_no: no.into(),
        name: name.into(),
        sub_area: sub_area.into(),
        year: Some(2014),
        units: Some(1_024),
        price_min: price,
        price_max: price,
        price_median: price,
        area_min: Some(59.0),
        area_max: Some(84.0),
        area_rep: Some(84.0),
        price_per_area: price.filter(|p| *p > 0).map(|p| (p as f64 / 84.0).round() as u64),
        price_band: band.map(PriceBand),
        area_band: Some(AreaBand::Small),
        listing_type: Some("매매".into()),
        floor: None,
        orientation: None,
        listing_count: Some(2),
        road_address: None,
    }
}

/// Three 고운동 complexes priced 1억, 2억 and 3억 plus one unpriced 가락마을 complex.
pub fn sample_records() -> Vec<ClassifiedRecord> {
    vec![
        record("11", "고운뜰 1단지", "고운동", Some(10_000), Some(8)),
        record("12", "고운뜰 2단지", "고운동", Some(20_000), Some(9)),
        record("13", "고운뜰 3단지", "고운동", Some(30_000), Some(10)),
        record("21", "가락마을 7단지", "가락마을", Some(0), None),
    ]
}

pub fn ready(records: Vec<ClassifiedRecord>) -> SharedDashboard {
    let data = Arc::new(DashboardData::from_records(records, None));
    Arc::new(RwLock::new(DashboardState::Ready(AppState::new(data, 16))))
}

pub fn shared(state: DashboardState) -> SharedDashboard {
    Arc::new(RwLock::new(state))
}

pub fn get(uri: &str) -> astra::Request {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}
