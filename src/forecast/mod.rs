// src/forecast/mod.rs

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::{BrandRecord, BASE_YEAR};
use crate::error::ProjectionError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedEquity {
    pub year: i32,
    pub equity: f64,
}

/// Projected equity per requested year, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub points: Vec<ProjectedEquity>,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn pairs(&self) -> Vec<(i32, f64)> {
        self.points.iter().map(|p| (p.year, p.equity)).collect()
    }

    /// Highest projected equity; ties go to the earliest entry.
    pub fn peak(&self) -> Option<ProjectedEquity> {
        self.points.iter().copied().fold(None, |best, p| match best {
            Some(b) if b.equity >= p.equity => Some(b),
            _ => Some(p),
        })
    }
}

/// Compound `record.equity_2021` through `years` in the order given.
///
/// Each year applies `GrowthRate{year - 2001}` (0 outside 2002..=2021) to the
/// running value, so repeated or out-of-order years compound again from
/// wherever the previous step left off.
pub fn project(record: &BrandRecord, years: &[i32]) -> Result<Projection, ProjectionError> {
    if !record.equity_2021.is_finite() {
        return Err(ProjectionError::NonFiniteEquity {
            brand: record.brand_name.clone(),
            value: record.equity_2021,
        });
    }

    let mut equity = record.equity_2021;
    let mut points = Vec::with_capacity(years.len());
    for &year in years {
        let rate = record.growth_rate(year.saturating_sub(BASE_YEAR));
        equity *= 1.0 + rate;
        points.push(ProjectedEquity { year, equity });
    }

    debug!(brand = %record.brand_name, years = years.len(), "projected equity");
    Ok(Projection { points })
}
