use crate::domain::logic::{format_price, mean_u64};
use crate::domain::ListingRow;
use std::collections::HashMap;

/// Trade type name the portal uses for sale listings.
pub const SALE_TRADE_TYPE: &str = "매매";
const TOP_COMPLEXES: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct SalePriceStats {
    pub count: usize,
    pub mean: f64,
    pub min: u64,
    pub max: u64,
}

/// Listing breakdown printed at the end of a harvest.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HarvestReport {
    /// (trade type, listings), most common first.
    pub trade_types: Vec<(String, usize)>,
    pub sale_prices: Option<SalePriceStats>,
    /// (complex name, listings), at most ten, busiest first.
    pub top_complexes: Vec<(String, usize)>,
}

fn ranked(counts: HashMap<&str, usize>, limit: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

impl HarvestReport {
    pub fn from_listings(listings: &[ListingRow]) -> Self {
        let mut trade_types: HashMap<&str, usize> = HashMap::new();
        let mut complexes: HashMap<&str, usize> = HashMap::new();
        let mut sale_prices = Vec::new();

        for l in listings {
            let trade = l.trade_type.as_deref().unwrap_or("?");
            *trade_types.entry(trade).or_default() += 1;
            *complexes.entry(l.complex_name.as_str()).or_default() += 1;
            if trade == SALE_TRADE_TYPE {
                sale_prices.extend(l.price);
            }
        }

        let sale_prices = mean_u64(&sale_prices).and_then(|mean| {
            Some(SalePriceStats {
                count: sale_prices.len(),
                mean,
                min: sale_prices.iter().copied().min()?,
                max: sale_prices.iter().copied().max()?,
            })
        });

        Self {
            trade_types: ranked(trade_types, usize::MAX),
            sale_prices,
            top_complexes: ranked(complexes, TOP_COMPLEXES),
        }
    }

    pub fn log(&self) {
        if self.trade_types.is_empty() {
            tracing::info!("no listings collected");
            return;
        }

        tracing::info!("Listings by trade type:");
        for (trade, n) in &self.trade_types {
            tracing::info!("  {trade}: {n}");
        }

        if let Some(s) = &self.sale_prices {
            tracing::info!(
                "Sale prices over {} listing(s): avg {}, min {}, max {}",
                s.count,
                format_price(s.mean.round() as u64),
                format_price(s.min),
                format_price(s.max)
            );
        }

        tracing::info!("Complexes with the most listings:");
        for (rank, (name, n)) in self.top_complexes.iter().enumerate() {
            tracing::info!("{:>2}. {name}: {n}", rank + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(complex: &str, trade: &str, price: Option<u64>) -> ListingRow {
        ListingRow {
            complex_no: "1".into(),
            complex_name: complex.into(),
            article_no: "1".into(),
            article_name: None,
            trade_type: Some(trade.into()),
            price_text: None,
            price,
            rent_price: None,
            area_supply: None,
            area_exclusive: None,
            floor: None,
            direction: None,
            confirmed_on: None,
            realtor: None,
            extracted_at: "now".into(),
        }
    }

    #[test]
    fn counts_trade_types_and_sale_prices() {
        let report = HarvestReport::from_listings(&[
            listing("첫마을 1단지", "매매", Some(40_000)),
            listing("첫마을 1단지", "매매", Some(60_000)),
            listing("첫마을 2단지", "전세", Some(25_000)),
            listing("첫마을 2단지", "매매", None),
        ]);

        assert_eq!(
            report.trade_types,
            vec![("매매".to_string(), 3), ("전세".to_string(), 1)]
        );
        let sale = report.sale_prices.unwrap();
        assert_eq!((sale.count, sale.min, sale.max), (2, 40_000, 60_000));
        assert_eq!(sale.mean, 50_000.0);
    }

    #[test]
    fn top_complexes_are_capped_at_ten() {
        let mut listings = Vec::new();
        for i in 0..12 {
            for _ in 0..=i {
                listings.push(listing(&format!("단지 {i:02}"), "매매", Some(30_000)));
            }
        }
        let report = HarvestReport::from_listings(&listings);

        assert_eq!(report.top_complexes.len(), 10);
        assert_eq!(report.top_complexes[0], ("단지 11".to_string(), 12));
        assert_eq!(report.top_complexes[9], ("단지 02".to_string(), 3));
    }

    #[test]
    fn no_sale_listings_means_no_price_stats() {
        let report = HarvestReport::from_listings(&[listing("A", "월세", Some(500))]);
        assert_eq!(report.sale_prices, None);
        assert_eq!(HarvestReport::from_listings(&[]), HarvestReport::default());
    }
}
