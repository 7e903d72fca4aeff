//! JSON Boundary Module
//! Converts loosely typed JSON input into records and field lists, failing
//! fast on input of the wrong shape instead of coercing it.

use super::encoder::objects_to_csv;
use super::value::{Record, Value};
use super::CodecError;
use serde_json::Value as Json;

/// Convert a JSON array of objects into records.
pub fn records_from_json(json: &Json) -> Result<Vec<Record>, CodecError> {
    let items = json.as_array().ok_or(CodecError::NotAnArray {
        what: "record list",
        found: json_kind(json),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| -> Result<Record, CodecError> {
            let object = item.as_object().ok_or(CodecError::NotAnObject {
                index,
                found: json_kind(item),
            })?;
            object
                .iter()
                .map(|(field, value)| {
                    scalar_from_json(value)
                        .map(|v| (field.clone(), v))
                        .ok_or_else(|| CodecError::NonScalarValue {
                            index,
                            field: field.clone(),
                            found: json_kind(value),
                        })
                })
                .collect()
        })
        .collect()
}

/// Convert a JSON array of strings into a field list.
pub fn fields_from_json(json: &Json) -> Result<Vec<String>, CodecError> {
    let items = json.as_array().ok_or(CodecError::NotAnArray {
        what: "field list",
        found: json_kind(json),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or(CodecError::NonStringField {
                    index,
                    found: json_kind(item),
                })
        })
        .collect()
}

/// Encode JSON records with a JSON field list.
pub fn objects_to_csv_json(records: &Json, fields: &Json) -> Result<String, CodecError> {
    let records = records_from_json(records)?;
    let fields = fields_from_json(fields)?;
    Ok(objects_to_csv(&records, &fields))
}

fn scalar_from_json(json: &Json) -> Option<Value> {
    match json {
        Json::Null => Some(Value::Null),
        Json::Bool(b) => Some(Value::Bool(*b)),
        Json::Number(n) => n
            .as_i64()
            .map(Value::Integer)
            .or_else(|| n.as_f64().map(Value::Float)),
        Json::String(s) => Some(Value::Text(s.clone())),
        Json::Array(_) | Json::Object(_) => None,
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
