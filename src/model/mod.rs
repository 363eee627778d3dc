// src/model/mod.rs
pub mod ols;
pub mod split;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::dataset::{self, Dataset, FEATURES, TARGET};
use crate::error::{DataLoadError, TrainError};
use ols::Fit;
use split::{train_test_split, SPLIT_SEED, TEST_FRACTION};

/// Linear model of `Equity2021` over [`FEATURES`], fitted once at start-up.
///
/// The forecast path compounds historical growth rates and does not consult
/// this model; it is kept for its fit statistics and for direct `predict` use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    pub features: Vec<String>,
    pub target: String,
    pub fit: Fit,
    pub train_rows: usize,
    pub holdout_rows: usize,
    /// R² on the holdout partition; `None` when it is empty.
    pub holdout_r2: Option<f64>,
}

impl TrainedModel {
    pub fn intercept(&self) -> f64 {
        self.fit.intercept
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.fit.coefficients
    }

    /// Predict the target from one feature row, ordered as [`FEATURES`].
    pub fn predict(&self, features: &[f64]) -> f64 {
        self.fit.predict(features)
    }

    /// Predict the target for row `row` of `data`.
    pub fn predict_row(&self, data: &Dataset, row: usize) -> Option<f64> {
        let x: Vec<f64> = self
            .features
            .iter()
            .map(|f| data.value(row, f))
            .collect::<Option<_>>()?;
        Some(self.predict(&x))
    }
}

/// Load `path`, then fit the equity model on a seeded 80/20 split.
/// Returns the model and the full cleaned dataset (both partitions).
#[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn train<P: AsRef<Path>>(path: P) -> Result<(TrainedModel, Dataset), TrainError> {
    let data = dataset::load(path)?;
    let model = fit_dataset(&data)?;
    Ok((model, data))
}

/// Fit the equity model on an already cleaned dataset.
pub fn fit_dataset(data: &Dataset) -> Result<TrainedModel, TrainError> {
    let x = data
        .matrix(&FEATURES)
        .ok_or_else(|| missing(FEATURES.iter()))?;
    let y = data
        .numeric_column(TARGET)
        .ok_or_else(|| missing([TARGET].iter()))?;

    let split = train_test_split(data.len(), TEST_FRACTION, SPLIT_SEED);
    if split.train.is_empty() {
        return Err(TrainError::InsufficientRows { rows: data.len() });
    }
    debug!(
        train = split.train.len(),
        holdout = split.test.len(),
        seed = SPLIT_SEED,
        "split rows"
    );

    let pick_x = |idx: &[usize]| idx.iter().map(|&i| x[i].clone()).collect::<Vec<_>>();
    let pick_y = |idx: &[usize]| idx.iter().map(|&i| y[i]).collect::<Vec<_>>();

    let (x_train, y_train) = (pick_x(&split.train), pick_y(&split.train));
    let fit = ols::fit(&x_train, &y_train, FEATURES.len())
        .ok_or(TrainError::InsufficientRows { rows: data.len() })?;

    let (x_test, y_test) = (pick_x(&split.test), pick_y(&split.test));
    let holdout_r2 = ols::r_squared(&fit, &x_test, &y_test);

    info!(
        intercept = fit.intercept,
        holdout_r2 = ?holdout_r2,
        train_rows = split.train.len(),
        "equity model trained"
    );

    Ok(TrainedModel {
        features: FEATURES.iter().map(|f| f.to_string()).collect(),
        target: TARGET.to_string(),
        fit,
        train_rows: split.train.len(),
        holdout_rows: split.test.len(),
        holdout_r2,
    })
}

fn missing<'a>(cols: impl Iterator<Item = &'a &'a str>) -> TrainError {
    TrainError::Load(DataLoadError::MissingColumns(
        cols.map(|c| c.to_string()).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::raw::read_csv_from;
    use std::io::{Cursor, Write};
    use tempfile::Builder;

    const HEADER: &str = "BrandName,Country,Region,Category,MarketPosition,\
Rank2001,Rank2002,Equity2001,GrowthRate2001,GrowthRate2002,GrowthRate2003,GrowthRate2004,\
Equity2021,GrowthRate1";

    /// Rows where Equity2021 = 5 + 2*Equity2001 + 100*GrowthRate2001 exactly.
    fn linear_csv(rows: usize) -> String {
        let mut out = vec![HEADER.to_string()];
        for i in 0..rows {
            let eq01 = 10.0 + (i * 7 % 13) as f64;
            let g01 = (i % 5) as f64 * 0.01;
            let target = 5.0 + 2.0 * eq01 + 100.0 * g01;
            out.push(format!(
                "Brand{i},C,R,Apparel,Luxury,{},{},{eq01},{g01},0,0,0,{target},0.1",
                i + 1,
                i + 2,
            ));
        }
        out.join("\n")
    }

    fn dataset(csv: &str) -> Dataset {
        Dataset::from_raw(read_csv_from(Cursor::new(csv.to_string())).unwrap()).unwrap()
    }

    #[test]
    fn test_fit_recovers_linear_target() {
        let data = dataset(&linear_csv(30));
        let model = fit_dataset(&data).unwrap();

        assert_eq!(model.train_rows, 24);
        assert_eq!(model.holdout_rows, 6);
        assert_eq!(model.coefficients().len(), FEATURES.len());

        for row in 0..data.len() {
            let want = data.value(row, TARGET).unwrap();
            let got = model.predict_row(&data, row).unwrap();
            assert!((got - want).abs() < 1e-6, "row {row}: {got} vs {want}");
        }
        assert!(model.holdout_r2.unwrap() > 0.999);
    }

    #[test]
    fn test_training_is_reproducible() {
        let data = dataset(&linear_csv(20));
        let a = fit_dataset(&data).unwrap();
        let b = fit_dataset(&data).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_row_cannot_train() {
        let data = dataset(&linear_csv(1));
        assert!(matches!(
            fit_dataset(&data),
            Err(TrainError::InsufficientRows { rows: 1 })
        ));
    }

    #[test]
    fn test_train_returns_full_cleaned_dataset() {
        let mut csv = linear_csv(10);
        // blank GrowthRate1 on the last row
        csv.truncate(csv.len() - "0.1".len());
        let mut tmp = Builder::new().suffix(".csv").tempfile().unwrap();
        tmp.write_all(csv.as_bytes()).unwrap();

        let (model, data) = train(tmp.path()).unwrap();
        assert_eq!(data.len(), 10);
        assert_eq!(model.train_rows + model.holdout_rows, 10);
        assert_eq!(data.value(9, "GrowthRate1"), Some(0.0));
        assert_eq!(data.value(8, "GrowthRate1"), Some(0.1));
    }

    #[test]
    fn test_train_sample_dataset() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/brand_equity.csv");
        let (model, data) = train(&path).unwrap();
        assert_eq!(data.len(), 12);
        assert_eq!((model.train_rows, model.holdout_rows), (9, 3));

        let burberry = data.find_brand("Burberry").unwrap();
        assert_eq!(burberry.growth_rate(6), 0.0);
        assert_eq!(burberry.market_position(), "0");
        assert!(model.predict_row(&data, 0).unwrap().is_finite());
    }

    #[test]
    fn test_train_missing_file() {
        let err = train("no/such/brands.csv").unwrap_err();
        assert!(matches!(err, TrainError::Load(DataLoadError::Io { .. })));
    }
}
