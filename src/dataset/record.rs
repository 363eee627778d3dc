// src/dataset/record.rs

use serde::{Deserialize, Serialize};

/// Number of per-year growth rates a record carries (offsets 1..=20, years 2002..=2021).
pub const GROWTH_YEARS: usize = 20;

/// Base year of the growth-rate offsets: offset = year - BASE_YEAR.
pub const BASE_YEAR: i32 = 2001;

pub const DEFAULT_MARKET_POSITION: &str = "Premium";

/// One cleaned row of the brand table, as consumed by the projector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandRecord {
    pub brand_name: String,
    /// `None` when the dataset has no `MarketPosition` column.
    pub market_position: Option<String>,
    pub equity_2021: f64,
    /// `growth_rates[n - 1]` holds `GrowthRate{n}`.
    pub growth_rates: [f64; GROWTH_YEARS],
}

impl BrandRecord {
    pub fn new(brand_name: impl Into<String>, equity_2021: f64) -> Self {
        Self {
            brand_name: brand_name.into(),
            market_position: None,
            equity_2021,
            growth_rates: [0.0; GROWTH_YEARS],
        }
    }

    /// Set `GrowthRate{offset}`; offsets outside 1..=20 are ignored.
    pub fn with_growth_rate(mut self, offset: i32, rate: f64) -> Self {
        if let Some(slot) = Self::slot(offset) {
            self.growth_rates[slot] = rate;
        }
        self
    }

    pub fn with_market_position(mut self, position: impl Into<String>) -> Self {
        self.market_position = Some(position.into());
        self
    }

    pub fn market_position(&self) -> &str {
        self.market_position
            .as_deref()
            .unwrap_or(DEFAULT_MARKET_POSITION)
    }

    /// `GrowthRate{offset}` for offsets in 1..=20, otherwise 0.
    pub fn growth_rate(&self, offset: i32) -> f64 {
        Self::slot(offset)
            .map(|i| self.growth_rates[i])
            .unwrap_or(0.0)
    }

    fn slot(offset: i32) -> Option<usize> {
        if (1..=GROWTH_YEARS as i32).contains(&offset) {
            Some((offset - 1) as usize)
        } else {
            None
        }
    }
}
