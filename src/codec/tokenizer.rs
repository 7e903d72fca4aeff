//! CSV Tokenizer Module
//! Quote-aware scanning shared by the decoder: splitting a document into
//! logical lines and splitting one logical line into unescaped cells.
//!
//! Both scanners run the same two-state machine. A `"` only opens a quoted
//! section when it is the first character of a cell; inside quotes `""` is an
//! escaped quote and a lone `"` closes the section. Commas and line breaks are
//! separators only outside quotes.

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    OutsideQuotes,
    InsideQuotes,
}

/// Logical lines of a CSV document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLines<'a> {
    pub lines: Vec<&'a str>,
    /// True when the input ended while a quoted cell was still open.
    pub unclosed_quote: bool,
}

/// Split a document on line breaks that occur outside quoted cells.
///
/// A single trailing `\n` terminates the last line and does not produce an
/// empty trailing line. One `\r` directly before an unquoted line break is
/// dropped so `\r\n` documents split like `\n` ones.
pub fn split_logical_lines(text: &str) -> LogicalLines<'_> {
    let mut lines = Vec::new();
    let mut state = State::OutsideQuotes;
    let mut cell_started = false;
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        match state {
            State::OutsideQuotes => match ch {
                '\n' => {
                    lines.push(strip_cr(&text[start..idx]));
                    start = idx + 1;
                    cell_started = false;
                }
                ',' => cell_started = false,
                '"' if !cell_started => {
                    state = State::InsideQuotes;
                    cell_started = true;
                }
                _ => cell_started = true,
            },
            State::InsideQuotes => match ch {
                '"' if matches!(chars.peek(), Some((_, '"'))) => {
                    chars.next();
                }
                '"' => state = State::OutsideQuotes,
                _ => {}
            },
        }
    }

    let unclosed_quote = state == State::InsideQuotes;
    if start < text.len() {
        let last = &text[start..];
        // The document terminator is not part of a cell left open at the end
        let last = if unclosed_quote {
            last.strip_suffix('\n').unwrap_or(last)
        } else {
            last
        };
        lines.push(strip_cr(last));
    }

    LogicalLines {
        lines,
        unclosed_quote,
    }
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Split one logical line into its unescaped cell values.
///
/// Always yields `unescaped commas + 1` cells, so an empty line is one empty
/// cell. A quoted cell left open at end of line is closed implicitly.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut cell_started = false;
    let mut state = State::OutsideQuotes;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match state {
            State::OutsideQuotes => match ch {
                ',' => {
                    cells.push(std::mem::take(&mut cell));
                    cell_started = false;
                }
                '"' if !cell_started => {
                    state = State::InsideQuotes;
                    cell_started = true;
                }
                _ => {
                    cell.push(ch);
                    cell_started = true;
                }
            },
            State::InsideQuotes => match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    cell.push('"');
                }
                '"' => state = State::OutsideQuotes,
                _ => cell.push(ch),
            },
        }
    }

    cells.push(cell);
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_is_one_empty_cell() {
        assert_eq!(parse_csv_line(""), vec![String::new()]);
    }

    #[test]
    fn cell_count_follows_unescaped_commas() {
        assert_eq!(parse_csv_line(",,"), vec!["", "", ""]);
        assert_eq!(parse_csv_line("a,\"b,c\",d"), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn doubled_quotes_collapse() {
        assert_eq!(
            parse_csv_line("\"John \"\"Doe\"\", Jr.\",30"),
            vec!["John \"Doe\", Jr.", "30"]
        );
        assert_eq!(parse_csv_line("\"\""), vec![""]);
        assert_eq!(parse_csv_line("\"\"\"\""), vec!["\""]);
    }

    #[test]
    fn quote_inside_unquoted_cell_is_literal() {
        assert_eq!(parse_csv_line("5\" screen,x"), vec!["5\" screen", "x"]);
        assert_eq!(parse_csv_line("\"ab\"cd"), vec!["abcd"]);
    }

    #[test]
    fn newline_inside_quotes_is_kept() {
        assert_eq!(parse_csv_line("\"John\nDoe\",30"), vec!["John\nDoe", "30"]);
    }

    #[test]
    fn unclosed_quote_closes_at_end_of_line() {
        assert_eq!(parse_csv_line("a,\"open, cell"), vec!["a", "open, cell"]);
    }

    #[test]
    fn split_keeps_quoted_newlines() {
        let split = split_logical_lines("name,age\n\"John\nDoe\",30\n");
        assert_eq!(split.lines, vec!["name,age", "\"John\nDoe\",30"]);
        assert!(!split.unclosed_quote);
    }

    #[test]
    fn split_handles_crlf_and_blank_lines() {
        let split = split_logical_lines("a\r\n\r\nb\r\n");
        assert_eq!(split.lines, vec!["a", "", "b"]);
    }

    #[test]
    fn split_without_trailing_newline() {
        assert_eq!(split_logical_lines("a\nb").lines, vec!["a", "b"]);
        assert!(split_logical_lines("").lines.is_empty());
        assert_eq!(split_logical_lines("\n").lines, vec![""]);
    }

    #[test]
    fn split_reports_unclosed_quote() {
        let split = split_logical_lines("a\n\"never closed\nstill,inside");
        assert_eq!(split.lines, vec!["a", "\"never closed\nstill,inside"]);
        assert!(split.unclosed_quote);
    }

    #[test]
    fn unclosed_quote_drops_document_terminator() {
        let split = split_logical_lines("name,age\n\"Bo,40\n");
        assert_eq!(split.lines, vec!["name,age", "\"Bo,40"]);
        assert!(split.unclosed_quote);

        let split = split_logical_lines("name\r\n\"Bo\nLee\r\n");
        assert_eq!(split.lines, vec!["name", "\"Bo\nLee"]);
    }

    #[test]
    fn split_ignores_mid_cell_quote() {
        let split = split_logical_lines("size\n5\" screen\n7\" screen\n");
        assert_eq!(split.lines, vec!["size", "5\" screen", "7\" screen"]);
    }
}
