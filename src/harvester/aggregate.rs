use crate::domain::logic::{median_f64, median_u64, mode, parse_price_text};
use crate::domain::{ComplexRecord, ListingRow};
use crate::harvester::models::{year_from_ymd, Article, ComplexDetail, ComplexSummary};

/// Folds a complex's sale listings into one flat record.
///
/// Detail fields win over the list summary when both are present. A complex
/// with no listings (or none with a readable price) keeps its identity fields
/// and leaves every price and area absent.
pub fn aggregate_complex(
    region_code: &str,
    summary: &ComplexSummary,
    detail: &ComplexDetail,
    articles: &[Article],
    extracted_at: &str,
) -> ComplexRecord {
    let prices: Vec<u64> = articles
        .iter()
        .filter_map(|a| a.deal_or_warrant_prc.as_deref().and_then(parse_price_text))
        .collect();
    let areas: Vec<f64> = articles.iter().filter_map(Article::area).collect();

    let name = detail
        .complex_name
        .clone()
        .or_else(|| summary.complex_name.clone())
        .filter(|n| !n.trim().is_empty());

    let units = detail
        .total_household_count
        .or(summary.total_household_count)
        .filter(|n| *n > 0.0)
        .map(|n| n as u32);

    let (low_floor, high_floor) = detail.floor_range();

    ComplexRecord {
        complex_no: summary.complex_no.clone(),
        region_code: Some(region_code.to_string()).filter(|c| !c.is_empty()),
        name,
        year: detail
            .year()
            .or_else(|| year_from_ymd(summary.use_approve_ymd.as_deref())),
        units,
        low_floor,
        high_floor,
        price_min: prices.iter().copied().min(),
        price_max: prices.iter().copied().max(),
        price_median: median_u64(&prices),
        area_min: areas.iter().copied().reduce(f64::min),
        area_max: areas.iter().copied().reduce(f64::max),
        area_rep: median_f64(&areas).map(|a| (a * 100.0).round() / 100.0),
        listing_type: mode(articles.iter().filter_map(|a| a.trade_type_name.as_deref())),
        floor: mode(articles.iter().filter_map(|a| a.floor_info.as_deref())),
        orientation: mode(articles.iter().filter_map(|a| a.direction.as_deref())),
        listing_count: Some(articles.len() as u32).filter(|n| *n > 0),
        road_address: detail.address(),
        latitude: detail.latitude.or(summary.latitude),
        longitude: detail.longitude.or(summary.longitude),
        extracted_at: Some(extracted_at.to_string()),
    }
}

pub fn listing_rows(record: &ComplexRecord, articles: &[Article], extracted_at: &str) -> Vec<ListingRow> {
    let complex_name = record.name.clone().unwrap_or_default();
    articles
        .iter()
        .map(|a| ListingRow {
            complex_no: record.complex_no.clone(),
            complex_name: complex_name.clone(),
            article_no: a.article_no.clone(),
            article_name: a.article_name.clone(),
            trade_type: a.trade_type_name.clone(),
            price_text: a.deal_or_warrant_prc.clone(),
            price: a.deal_or_warrant_prc.as_deref().and_then(parse_price_text),
            rent_price: a.rent_prc.clone(),
            area_supply: a.area1,
            area_exclusive: a.area2,
            floor: a.floor_info.clone(),
            direction: a.direction.clone(),
            confirmed_on: a.article_confirm_ymd.clone(),
            realtor: a.realtor_name.clone(),
            extracted_at: extracted_at.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary() -> ComplexSummary {
        serde_json::from_value(json!({
            "complexNo": "111",
            "complexName": "가락마을 3단지",
            "latitude": 36.48,
            "longitude": 127.25,
            "totalHouseholdCount": 820
        }))
        .unwrap()
    }

    fn article(no: u32, price: &str, area2: f64, dir: &str) -> Article {
        serde_json::from_value(json!({
            "articleNo": no,
            "tradeTypeName": "매매",
            "dealOrWarrantPrc": price,
            "area1": area2 + 28.0,
            "area2": area2,
            "floorInfo": "10/20",
            "direction": dir
        }))
        .unwrap()
    }

    #[test]
    fn folds_listings_into_min_max_median() {
        let articles = vec![
            article(1, "4억 5,000", 84.0, "남향"),
            article(2, "6억 1,000", 114.0, "남동향"),
            article(3, "5억 3,000", 84.0, "남향"),
        ];
        let detail = ComplexDetail {
            use_approve_ymd: Some("20140630".into()),
            low_floor: Some(2.0),
            high_floor: Some(25.0),
            ..ComplexDetail::default()
        };

        let rec = aggregate_complex("3611011000", &summary(), &detail, &articles, "2025-01-01 00:00:00");

        assert_eq!(rec.name.as_deref(), Some("가락마을 3단지"));
        assert_eq!(rec.year, Some(2014));
        assert_eq!(rec.units, Some(820));
        assert_eq!(rec.price_min, Some(45_000));
        assert_eq!(rec.price_max, Some(61_000));
        assert_eq!(rec.price_median, Some(53_000));
        assert_eq!(rec.area_min, Some(84.0));
        assert_eq!(rec.area_max, Some(114.0));
        assert_eq!(rec.area_rep, Some(84.0));
        assert_eq!(rec.orientation.as_deref(), Some("남향"));
        assert_eq!(rec.listing_type.as_deref(), Some("매매"));
        assert_eq!(rec.listing_count, Some(3));
        assert_eq!(rec.latitude, Some(36.48));
        assert_eq!(rec.region_code.as_deref(), Some("3611011000"));
        assert_eq!((rec.low_floor, rec.high_floor), (Some(2), Some(25)));
    }

    #[test]
    fn complex_without_listings_has_absent_prices() {
        let rec = aggregate_complex("3611011000", &summary(), &ComplexDetail::default(), &[], "now");
        assert_eq!(rec.price_median, None);
        assert_eq!(rec.area_rep, None);
        assert_eq!(rec.listing_count, None);
        assert_eq!(rec.complex_no, "111");
    }

    #[test]
    fn unreadable_price_text_is_skipped() {
        let articles = vec![article(1, "협의", 84.0, "남향"), article(2, "3억", 59.0, "동향")];
        let rec = aggregate_complex("3611011000", &summary(), &ComplexDetail::default(), &articles, "now");
        assert_eq!(rec.price_min, Some(30_000));
        assert_eq!(rec.price_median, Some(30_000));
        assert_eq!(rec.area_rep, Some(71.5));
    }

    #[test]
    fn listing_rows_carry_parsed_prices() {
        let articles = vec![article(9, "2억 9,500", 59.0, "서향")];
        let rec = aggregate_complex("3611011000", &summary(), &ComplexDetail::default(), &articles, "now");
        let rows = listing_rows(&rec, &articles, "now");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].article_no, "9");
        assert_eq!(rows[0].price, Some(29_500));
        assert_eq!(rows[0].complex_name, "가락마을 3단지");
    }
}
