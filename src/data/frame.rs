//! DataFrame Bridge Module
//! Moves decoded CSV documents in and out of Polars for inspection.

use crate::codec::{Document, Record, Value};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Per-column overview of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSummary {
    pub name: String,
    /// Cells that are neither null nor the empty string.
    pub filled: usize,
    /// Distinct values, empty string included.
    pub distinct: usize,
}

/// Build a string-typed DataFrame with one column per document field.
///
/// Null values and missing keys become nulls; every other value is stored
/// in its CSV text form.
pub fn document_to_frame(doc: &Document) -> Result<DataFrame, FrameError> {
    let columns = doc
        .fields
        .iter()
        .map(|field| {
            let values: Vec<Option<String>> = doc
                .records
                .iter()
                .map(|record| match record.get(field) {
                    None | Some(Value::Null) => None,
                    Some(value) => Some(value.to_string()),
                })
                .collect();
            Column::new(field.as_str().into(), values)
        })
        .collect::<Vec<_>>();

    Ok(DataFrame::new(columns)?)
}

/// Read a DataFrame back into a document, casting every column to text.
pub fn frame_to_document(df: &DataFrame) -> Result<Document, FrameError> {
    let fields: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut records = vec![Record::new(); df.height()];
    for field in &fields {
        let text = df.column(field)?.cast(&DataType::String)?;
        let ca = text.as_materialized_series().str()?;
        for (i, record) in records.iter_mut().enumerate() {
            let value = ca.get(i).map(Value::from).unwrap_or(Value::Null);
            record.insert(field.clone(), value);
        }
    }

    Ok(Document {
        fields,
        records,
        ragged_rows: 0,
    })
}

/// Summarize each column of `df`.
pub fn summarize(df: &DataFrame) -> Result<Vec<ColumnSummary>, FrameError> {
    df.get_columns()
        .iter()
        .map(|col| -> Result<ColumnSummary, FrameError> {
            let text = col.cast(&DataType::String)?;
            let ca = text.as_materialized_series().str()?;
            let filled = ca
                .into_iter()
                .filter(|v| v.is_some_and(|s| !s.is_empty()))
                .count();
            let distinct = col.unique()?.len();
            Ok(ColumnSummary {
                name: col.name().to_string(),
                filled,
                distinct,
            })
        })
        .collect()
}
