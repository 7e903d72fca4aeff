//! Codec module - CSV encoding and decoding of records

mod decoder;
mod encoder;
mod json;
mod tokenizer;
mod value;

pub use decoder::{csv_to_objects, parse_document, Document};
pub use encoder::{encode_header, encode_line, escape_cell, objects_to_csv, write_objects};
pub use json::{fields_from_json, objects_to_csv_json, records_from_json};
pub use tokenizer::{parse_csv_line, split_logical_lines, LogicalLines};
pub use value::{record, Record, Value};

use thiserror::Error;

/// Input of the wrong shape handed to the codec's JSON boundary.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("{what} must be an array, found {found}")]
    NotAnArray {
        what: &'static str,
        found: &'static str,
    },
    #[error("record {index} must be an object, found {found}")]
    NotAnObject { index: usize, found: &'static str },
    #[error("record {index} field `{field}` must be a scalar, found {found}")]
    NonScalarValue {
        index: usize,
        field: String,
        found: &'static str,
    },
    #[error("field name {index} must be a string, found {found}")]
    NonStringField { index: usize, found: &'static str },
}
