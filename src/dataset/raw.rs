// src/dataset/raw.rs
use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use csv::ReaderBuilder;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, trace, warn};

use crate::error::DataLoadError;

/// A table exactly as read from disk, before any cleaning.
#[derive(Debug, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    /// One entry per header; `None` marks a missing cell.
    pub rows: Vec<Vec<Option<String>>>,
}

fn open(path: &Path) -> Result<File, DataLoadError> {
    File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a headed CSV file. Short rows are padded with missing cells,
/// surplus cells are dropped.
pub fn read_csv(path: &Path) -> Result<RawTable, DataLoadError> {
    read_csv_from(open(path)?)
}

pub fn read_csv_from<R: Read>(reader: R) -> Result<RawTable, DataLoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|source| DataLoadError::Csv { record: 0, source })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    let mut ragged = 0usize;
    for (idx, result) in rdr.records().enumerate() {
        let record = result.map_err(|source| DataLoadError::Csv {
            record: idx + 1,
            source,
        })?;
        if record.len() != headers.len() {
            ragged += 1;
            trace!(record = idx + 1, cells = record.len(), "ragged CSV row");
        }
        let row: Vec<Option<String>> = (0..headers.len())
            .map(|i| record.get(i).map(str::to_string))
            .collect();
        rows.push(row);
    }
    if ragged > 0 {
        warn!(ragged, "some CSV rows do not match the header width");
    }

    debug!(columns = headers.len(), rows = rows.len(), "read CSV table");
    Ok(RawTable { headers, rows })
}

/// Read every record batch of a Parquet file, rendering each value as text so
/// it goes through the same cleaning as CSV input.
pub fn read_parquet(path: &Path) -> Result<RawTable, DataLoadError> {
    let file = open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    // Headers come from the file schema so a file with no row groups still
    // reports its columns.
    let mut table = RawTable {
        headers: builder
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().trim().to_string())
            .collect(),
        rows: Vec::new(),
    };
    for batch in builder.build()? {
        let batch = batch?;
        for row in 0..batch.num_rows() {
            let mut cells = Vec::with_capacity(batch.num_columns());
            for col in batch.columns() {
                if col.is_null(row) {
                    cells.push(None);
                } else {
                    cells.push(Some(array_value_to_string(col.as_ref(), row)?));
                }
            }
            table.rows.push(cells);
        }
    }

    debug!(
        columns = table.headers.len(),
        rows = table.rows.len(),
        "read parquet table"
    );
    Ok(table)
}
