// src/dataset/mod.rs
pub mod raw;
pub mod record;
pub mod utils;

use regex::Regex;
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    path::Path,
};
use tracing::{debug, info, instrument};

pub use raw::RawTable;
pub use record::{BrandRecord, BASE_YEAR, GROWTH_YEARS};

use crate::error::DataLoadError;
use utils::{coerce_numeric, fill_missing};

/// Leading columns kept as text; every column after these is numeric.
pub const TEXT_COLUMNS: usize = 5;

pub const BRAND_NAME: &str = "BrandName";
pub const MARKET_POSITION: &str = "MarketPosition";
pub const TARGET: &str = "Equity2021";

/// Regression inputs, in model coefficient order.
pub const FEATURES: [&str; 7] = [
    "Rank2001",
    "Rank2002",
    "Equity2001",
    "GrowthRate2001",
    "GrowthRate2002",
    "GrowthRate2003",
    "GrowthRate2004",
];

/// Cleaned, immutable brand table.
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    /// First occurrence wins for duplicate header names.
    index: HashMap<String, usize>,
    /// Filled cells, every column.
    cells: Vec<Vec<String>>,
    /// Coerced values for columns `TEXT_COLUMNS..`.
    numeric: Vec<Vec<f64>>,
    /// `GrowthRate<N>` suffix → column index.
    growth_columns: BTreeMap<u32, usize>,
}

/// Load a dataset from `.csv` or `.parquet`, clean and validate it.
#[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load<P: AsRef<Path>>(path: P) -> Result<Dataset, DataLoadError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let raw = match ext.as_deref() {
        Some("csv") => raw::read_csv(path)?,
        Some("parquet") | Some("pq") => raw::read_parquet(path)?,
        _ => {
            return Err(DataLoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    let ds = Dataset::from_raw(raw)?;
    info!(
        rows = ds.len(),
        columns = ds.headers.len(),
        growth_columns = ds.growth_columns.len(),
        "dataset loaded"
    );
    Ok(ds)
}

impl Dataset {
    /// Fill missing cells with 0, coerce columns after the first five to
    /// numeric, then check the columns the trainer and projector need.
    pub fn from_raw(raw: RawTable) -> Result<Self, DataLoadError> {
        let RawTable { headers, rows } = raw;

        if headers.len() <= TEXT_COLUMNS {
            return Err(DataLoadError::TooFewColumns {
                found: headers.len(),
                required: TEXT_COLUMNS + 1,
            });
        }

        let mut index = HashMap::with_capacity(headers.len());
        for (i, h) in headers.iter().enumerate() {
            index.entry(h.clone()).or_insert(i);
        }

        let missing: Vec<String> = std::iter::once(BRAND_NAME)
            .chain(std::iter::once(TARGET))
            .chain(FEATURES)
            .filter(|c| !index.contains_key(*c))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(DataLoadError::MissingColumns(missing));
        }

        if rows.is_empty() {
            return Err(DataLoadError::Empty);
        }

        let mut filled_count = 0usize;
        let mut cells = Vec::with_capacity(rows.len());
        let mut numeric = Vec::with_capacity(rows.len());
        for row in &rows {
            let filled: Vec<String> = (0..headers.len())
                .map(|i| {
                    let cell = row.get(i).and_then(|c| c.as_deref());
                    let out = fill_missing(cell);
                    if cell.map_or(true, |c| c.trim().is_empty()) {
                        filled_count += 1;
                    }
                    out
                })
                .collect();
            let nums: Vec<f64> = filled[TEXT_COLUMNS..]
                .iter()
                .map(|c| coerce_numeric(c))
                .collect();
            cells.push(filled);
            numeric.push(nums);
        }
        debug!(filled = filled_count, "filled missing cells with 0");

        let growth_columns = index_growth_columns(&headers);

        Ok(Self {
            headers,
            index,
            cells,
            numeric,
            growth_columns,
        })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Numeric value at (`row`, `col`). Leading text columns are coerced on demand.
    fn value_at(&self, row: usize, col: usize) -> f64 {
        if col >= TEXT_COLUMNS {
            self.numeric[row][col - TEXT_COLUMNS]
        } else {
            coerce_numeric(&self.cells[row][col])
        }
    }

    pub fn value(&self, row: usize, name: &str) -> Option<f64> {
        let col = self.column_index(name)?;
        (row < self.len()).then(|| self.value_at(row, col))
    }

    pub fn text(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.column_index(name)?;
        self.cells.get(row).map(|r| r[col].as_str())
    }

    pub fn numeric_column(&self, name: &str) -> Option<Vec<f64>> {
        let col = self.column_index(name)?;
        Some((0..self.len()).map(|r| self.value_at(r, col)).collect())
    }

    /// Row-major matrix of the named columns; `None` if any is absent.
    pub fn matrix(&self, names: &[&str]) -> Option<Vec<Vec<f64>>> {
        let cols: Vec<usize> = names
            .iter()
            .map(|n| self.column_index(n))
            .collect::<Option<_>>()?;
        Some(
            (0..self.len())
                .map(|r| cols.iter().map(|&c| self.value_at(r, c)).collect())
                .collect(),
        )
    }

    /// Distinct brand names in first-seen order.
    pub fn brand_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        (0..self.len())
            .filter_map(|r| self.text(r, BRAND_NAME))
            .filter(|n| seen.insert(*n))
            .collect()
    }

    /// Column holding the growth rate for year offset `n` (1..=20): exactly
    /// `GrowthRate<n>`. Year-named columns such as `GrowthRate2002` are model
    /// features only and never stand in for an offset.
    fn growth_column(&self, offset: u32) -> Option<usize> {
        self.growth_columns.get(&offset).copied()
    }

    pub fn record(&self, row: usize) -> Option<BrandRecord> {
        if row >= self.len() {
            return None;
        }
        let brand_name = self.text(row, BRAND_NAME)?.to_string();
        let market_position = self.text(row, MARKET_POSITION).map(str::to_string);
        let equity_2021 = self.value(row, TARGET)?;

        let mut growth_rates = [0.0; GROWTH_YEARS];
        for (i, slot) in growth_rates.iter_mut().enumerate() {
            if let Some(col) = self.growth_column(i as u32 + 1) {
                *slot = self.value_at(row, col);
            }
        }

        Some(BrandRecord {
            brand_name,
            market_position,
            equity_2021,
            growth_rates,
        })
    }

    /// First row whose `BrandName` equals `brand`.
    pub fn find_brand(&self, brand: &str) -> Option<BrandRecord> {
        (0..self.len())
            .find(|&r| self.text(r, BRAND_NAME) == Some(brand))
            .and_then(|r| self.record(r))
    }
}

fn index_growth_columns(headers: &[String]) -> BTreeMap<u32, usize> {
    let re = Regex::new(r"^GrowthRate(\d+)$").unwrap();
    let mut out = BTreeMap::new();
    for (i, h) in headers.iter().enumerate() {
        if let Some(n) = re
            .captures(h)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
        {
            out.entry(n).or_insert(i);
        }
    }
    out
}
