//! CSV Decoder Module
//! Turns a CSV document into records keyed by the document's header row.

use super::tokenizer::{parse_csv_line, split_logical_lines};
use super::value::{Record, Value};

/// A decoded CSV document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Field names from the header row, in column order.
    pub fields: Vec<String>,
    pub records: Vec<Record>,
    /// Rows whose cell count differed from the header's.
    pub ragged_rows: usize,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Decode a CSV document into its records.
pub fn csv_to_objects(text: &str) -> Vec<Record> {
    parse_document(text).records
}

/// Decode a CSV document, keeping the header field list alongside the records.
///
/// Rows shorter than the header are padded with empty strings; cells past
/// the header's length are dropped. Blank lines are skipped when the header
/// has two or more fields, since no encoded row is ever empty there. When a
/// header name repeats, the rightmost column wins and `fields` lists the
/// name once, at that column's position.
pub fn parse_document(text: &str) -> Document {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let split = split_logical_lines(text);
    if split.unclosed_quote {
        tracing::warn!("csv input ended inside a quoted cell; closing it at end of input");
    }

    let mut lines = split.lines.into_iter();
    let Some(header) = lines.next() else {
        return Document::default();
    };

    let columns = if header.is_empty() {
        Vec::new()
    } else {
        parse_csv_line(header)
    };

    let mut records = Vec::new();
    let mut ragged_rows = 0usize;
    let mut blank_lines = 0usize;
    for line in lines {
        if line.is_empty() && columns.len() > 1 {
            blank_lines += 1;
            continue;
        }
        let cells = parse_csv_line(line);
        // An empty line holds one empty cell, which is a full row for a
        // header of zero or one fields.
        if cells.len() != columns.len().max(1) {
            ragged_rows += 1;
        }
        records.push(zip_record(&columns, cells));
    }

    if blank_lines > 0 {
        tracing::debug!(blank_lines, "skipped blank lines");
    }

    if ragged_rows > 0 {
        tracing::debug!(
            ragged_rows,
            fields = columns.len(),
            "padded or truncated rows to header length"
        );
    }
    tracing::trace!(records = records.len(), "decoded csv document");

    Document {
        fields: distinct_fields(columns),
        records,
        ragged_rows,
    }
}

/// Header names with repeats removed, each kept at its rightmost position.
fn distinct_fields(columns: Vec<String>) -> Vec<String> {
    let mut fields: Vec<String> = Vec::with_capacity(columns.len());
    for (idx, name) in columns.iter().enumerate() {
        if !columns[idx + 1..].contains(name) {
            fields.push(name.clone());
        }
    }
    fields
}

fn zip_record(fields: &[String], cells: Vec<String>) -> Record {
    let mut cells = cells.into_iter();
    fields
        .iter()
        .map(|field| {
            let cell = cells.next().unwrap_or_default();
            (field.clone(), Value::Text(cell))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::value::record;

    #[test]
    fn decodes_simple_rows() {
        assert_eq!(
            csv_to_objects("name,age\nJohn Doe,30"),
            vec![record([("name", "John Doe"), ("age", "30")])]
        );
    }

    #[test]
    fn embedded_newline_stays_in_cell() {
        assert_eq!(
            csv_to_objects("name,age\n\"John\nDoe\",30"),
            vec![record([("name", "John\nDoe"), ("age", "30")])]
        );
    }

    #[test]
    fn empty_and_header_only_inputs() {
        assert!(csv_to_objects("").is_empty());
        assert!(csv_to_objects("name,age").is_empty());

        let doc = parse_document("name,age\n");
        assert_eq!(doc.fields, vec!["name", "age"]);
        assert!(doc.is_empty());
    }

    #[test]
    fn short_rows_are_padded() {
        let doc = parse_document("a,b,c\n1\n");
        assert_eq!(doc.records, vec![record([("a", "1"), ("b", ""), ("c", "")])]);
        assert_eq!(doc.ragged_rows, 1);
    }

    #[test]
    fn extra_cells_are_dropped() {
        let doc = parse_document("a,b\n1,2,3,4\n");
        assert_eq!(doc.records, vec![record([("a", "1"), ("b", "2")])]);
        assert_eq!(doc.ragged_rows, 1);
    }

    #[test]
    fn blank_line_in_single_column_document_is_a_record() {
        let doc = parse_document("note\n\nhello\n");
        assert_eq!(
            doc.records,
            vec![record([("note", "")]), record([("note", "hello")])]
        );
        assert_eq!(doc.ragged_rows, 0);
    }

    #[test]
    fn crlf_and_bom_are_tolerated() {
        let doc = parse_document("\u{FEFF}name,age\r\nAda,36\r\n");
        assert_eq!(doc.fields, vec!["name", "age"]);
        assert_eq!(doc.records, vec![record([("name", "Ada"), ("age", "36")])]);
    }

    #[test]
    fn duplicate_header_keeps_rightmost() {
        let records = csv_to_objects("id,id\n1,2\n");
        assert_eq!(records, vec![record([("id", "2")])]);
    }

    #[test]
    fn duplicate_header_listed_once() {
        let doc = parse_document("id,name,id,,\n1,a,2,x,y\n");
        assert_eq!(doc.fields, vec!["name", "id", ""]);
        assert_eq!(
            doc.records,
            vec![record([("id", "2"), ("name", "a"), ("", "y")])]
        );
    }

    #[test]
    fn blank_lines_skipped_for_multi_column_headers() {
        let doc = parse_document("_id,name\nu1,a\n\n");
        assert_eq!(doc.records, vec![record([("_id", "u1"), ("name", "a")])]);
        assert_eq!(doc.ragged_rows, 0);

        let doc = parse_document("_id,name\n\nu1,a\r\n\r\n");
        assert_eq!(doc.records.len(), 1);
    }

    #[test]
    fn empty_header_means_no_fields() {
        let doc = parse_document("\n\n");
        assert!(doc.fields.is_empty());
        assert_eq!(doc.records, vec![Record::new()]);
    }
}
