//! CSV Encoder Module
//! Turns records into a CSV document using a caller-supplied field order.

use super::value::{Record, Value};
use std::borrow::Cow;
use std::io::{self, Write};

/// Escape a single cell.
///
/// Cells containing a comma, a double quote or a line break are wrapped in
/// quotes with inner quotes doubled; everything else passes through.
pub fn escape_cell(raw: &str) -> Cow<'_, str> {
    if !raw.contains([',', '"', '\n', '\r']) {
        return Cow::Borrowed(raw);
    }

    let mut escaped = String::with_capacity(raw.len() + 2);
    escaped.push('"');
    for ch in raw.chars() {
        if ch == '"' {
            escaped.push('"');
        }
        escaped.push(ch);
    }
    escaped.push('"');
    Cow::Owned(escaped)
}

/// Header line for `fields`, without the terminator.
pub fn encode_header<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| f.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}

/// One record line in `fields` order, without the terminator.
pub fn encode_line<S: AsRef<str>>(record: &Record, fields: &[S]) -> String {
    fields
        .iter()
        .map(|field| {
            let text = record
                .get(field.as_ref())
                .map(Value::to_string)
                .unwrap_or_default();
            escape_cell(&text).into_owned()
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Encode `records` as a CSV document.
///
/// Every line, the header included, is terminated by `\n`. With no records
/// the result is the header line alone.
pub fn objects_to_csv<S: AsRef<str>>(records: &[Record], fields: &[S]) -> String {
    tracing::trace!(
        records = records.len(),
        fields = fields.len(),
        "encoding records to csv"
    );

    let mut out = encode_header(fields);
    out.push('\n');
    for record in records {
        out.push_str(&encode_line(record, fields));
        out.push('\n');
    }
    out
}

/// Stream the same document [`objects_to_csv`] builds into `writer`.
pub fn write_objects<W, S>(writer: &mut W, records: &[Record], fields: &[S]) -> io::Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    writeln!(writer, "{}", encode_header(fields))?;
    for record in records {
        writeln!(writer, "{}", encode_line(record, fields))?;
    }
    writer.flush()
}
