//! Mandi (wholesale market) prices and trend series

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One crop quote at one mandi, in ₹ per quintal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MandiPrice {
    pub id: u32,
    pub crop: String,
    pub variety: String,
    pub mandi: String,
    pub price: Decimal,
    /// Day-over-day change in percent
    pub change: Decimal,
}

impl MandiPrice {
    fn new(
        id: u32,
        crop: &str,
        variety: &str,
        mandi: &str,
        price: Decimal,
        change: Decimal,
    ) -> Self {
        Self {
            id,
            crop: crop.to_string(),
            variety: variety.to_string(),
            mandi: mandi.to_string(),
            price,
            change,
        }
    }

    pub fn is_rising(&self) -> bool {
        self.change > Decimal::ZERO
    }
}

pub fn mandi_prices() -> Vec<MandiPrice> {
    vec![
        MandiPrice::new(1, "Wheat", "Dara", "Azadpur, Delhi", dec!(2350), dec!(1.2)),
        MandiPrice::new(2, "Wheat", "Dara", "Khanna, Punjab", dec!(2410), dec!(-0.5)),
        MandiPrice::new(3, "Wheat", "Dara", "Indore, MP", dec!(2380), dec!(0.8)),
        MandiPrice::new(4, "Rice", "Basmati", "Karnal, Haryana", dec!(8500), dec!(2.5)),
        MandiPrice::new(5, "Rice", "Basmati", "Dehradun, UK", dec!(8420), dec!(1.1)),
        MandiPrice::new(6, "Corn", "Yellow", "Nizamabad, Telangana", dec!(2150), dec!(-1.8)),
        MandiPrice::new(7, "Corn", "Yellow", "Davangere, Karnataka", dec!(2200), dec!(0.3)),
        MandiPrice::new(8, "Tomato", "Hybrid", "Nashik, Maharashtra", dec!(1800), dec!(5.1)),
        MandiPrice::new(9, "Tomato", "Hybrid", "Madanapalle, AP", dec!(1750), dec!(4.8)),
    ]
}

/// Rows matching `crop` exactly (all crops when `None`) whose mandi name
/// contains `search`, ignoring case. The search text is used as typed,
/// surrounding spaces included. Input order is kept.
pub fn filter_prices(prices: &[MandiPrice], crop: Option<&str>, search: &str) -> Vec<MandiPrice> {
    let needle = search.to_lowercase();
    prices
        .iter()
        .filter(|p| crop.map_or(true, |c| p.crop == c))
        .filter(|p| needle.is_empty() || p.mandi.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Highest quote per crop, keyed by crop name. The first row wins a tie.
pub fn highest_price_by_crop(prices: &[MandiPrice]) -> BTreeMap<String, MandiPrice> {
    let mut highest: BTreeMap<String, MandiPrice> = BTreeMap::new();
    for price in prices {
        match highest.get(&price.crop) {
            Some(current) if current.price >= price.price => {}
            _ => {
                highest.insert(price.crop.clone(), price.clone());
            }
        }
    }
    highest
}

/// The `n` highest quotes, most expensive first
pub fn top_prices(prices: &[MandiPrice], n: usize) -> Vec<MandiPrice> {
    let mut sorted = prices.to_vec();
    sorted.sort_by(|a, b| b.price.cmp(&a.price));
    sorted.truncate(n);
    sorted
}

/// One point of the weekly price trend chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceTrendPoint {
    pub days_ago: u32,
    pub prices: BTreeMap<String, Decimal>,
}

impl PriceTrendPoint {
    fn new(days_ago: u32, wheat: Decimal, rice: Decimal, corn: Decimal) -> Self {
        let prices = [("Wheat", wheat), ("Rice", rice), ("Corn", corn)]
            .into_iter()
            .map(|(crop, price)| (crop.to_string(), price))
            .collect();
        Self { days_ago, prices }
    }

    /// Catalog key of the axis label; `trends.daysAgo` takes a `count` argument
    pub fn label_key(&self) -> &'static str {
        if self.days_ago == 0 {
            "trends.today"
        } else {
            "trends.daysAgo"
        }
    }
}

/// Seven daily points for Wheat, Rice and Corn, oldest first
pub fn price_trends() -> Vec<PriceTrendPoint> {
    vec![
        PriceTrendPoint::new(7, dec!(2300), dec!(8200), dec!(2200)),
        PriceTrendPoint::new(6, dec!(2320), dec!(8250), dec!(2180)),
        PriceTrendPoint::new(5, dec!(2310), dec!(8300), dec!(2190)),
        PriceTrendPoint::new(4, dec!(2340), dec!(8350), dec!(2170)),
        PriceTrendPoint::new(3, dec!(2350), dec!(8400), dec!(2160)),
        PriceTrendPoint::new(2, dec!(2380), dec!(8450), dec!(2150)),
        PriceTrendPoint::new(0, dec!(2410), dec!(8500), dec!(2150)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_by_crop() {
        let rows = filter_prices(&mandi_prices(), Some("Rice"), "");
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|p| p.crop == "Rice"));
    }

    #[test]
    fn test_filter_by_mandi_search() {
        let rows = filter_prices(&mandi_prices(), None, "DELHI");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].mandi, "Azadpur, Delhi");

        // spaces are part of the needle
        assert_eq!(filter_prices(&mandi_prices(), None, " delhi").len(), 1);
        assert!(filter_prices(&mandi_prices(), None, "delhi ").is_empty());

        assert!(filter_prices(&mandi_prices(), Some("Wheat"), "nashik").is_empty());
    }

    #[test]
    fn test_highest_price_by_crop() {
        let highest = highest_price_by_crop(&mandi_prices());
        assert_eq!(highest.len(), 4);
        assert_eq!(highest["Wheat"].id, 2);
        assert_eq!(highest["Rice"].id, 4);
        assert_eq!(highest["Corn"].id, 7);
        assert_eq!(highest["Tomato"].id, 8);
    }

    #[test]
    fn test_top_prices() {
        let top = top_prices(&mandi_prices(), 4);
        let ids: Vec<u32> = top.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4, 5, 2, 3]);
    }

    #[test]
    fn test_price_trends() {
        let trends = price_trends();
        assert_eq!(trends.len(), 7);
        assert_eq!(trends[0].label_key(), "trends.daysAgo");
        assert_eq!(trends[6].label_key(), "trends.today");
        assert_eq!(trends[6].prices["Rice"], dec!(8500));
    }

    #[test]
    fn test_change_direction() {
        let prices = mandi_prices();
        assert!(prices[0].is_rising());
        assert!(!prices[1].is_rising());
    }
}
