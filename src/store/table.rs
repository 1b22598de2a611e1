//! CSV table primitives.
//!
//! Rows are comma-separated with minimal quoting: a field is wrapped in
//! double quotes only when it contains the delimiter, a quote, or a line
//! break, and embedded quotes are doubled. A quoted field may span line
//! breaks, so the reader works on records, not lines. Files are rewritten
//! atomically via a temp file and rename, never edited in place.

use std::fs;
use std::io;
use std::path::Path;

use super::StoreError;

/// Reads all data rows from a table file.
///
/// A missing or empty file reads as zero rows. The header row must match
/// `header` exactly, and every data row must have the same column count as
/// the header; anything else is a [`StoreError::MalformedRow`].
pub fn read_rows(path: &Path, header: &str) -> Result<Vec<Vec<String>>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    let records = parse_records(&content).map_err(|(line, reason)| StoreError::MalformedRow {
        path: path.to_path_buf(),
        line,
        reason,
    })?;
    let mut records = records.into_iter();

    let Some((_, first)) = records.next() else {
        return Ok(Vec::new());
    };
    let expected: Vec<&str> = header.split(',').collect();
    if first != expected {
        return Err(StoreError::MalformedRow {
            path: path.to_path_buf(),
            line: 1,
            reason: format!("expected header '{header}', found '{}'", first.join(",")),
        });
    }

    let mut rows = Vec::new();
    for (line, fields) in records {
        if fields.len() != expected.len() {
            return Err(StoreError::MalformedRow {
                path: path.to_path_buf(),
                line,
                reason: format!("expected {} columns, found {}", expected.len(), fields.len()),
            });
        }
        rows.push(fields);
    }

    Ok(rows)
}

/// Rewrites a table file with the given header and rows.
pub fn write_rows(path: &Path, header: &str, rows: &[Vec<String>]) -> Result<(), StoreError> {
    let mut out = String::new();
    out.push_str(header);
    out.push('\n');
    for row in rows {
        let escaped: Vec<String> = row.iter().map(|f| escape_field(f)).collect();
        out.push_str(&escaped.join(","));
        out.push('\n');
    }
    write_atomic(path, &out)?;
    Ok(())
}

/// Writes file content atomically: temp file in the same directory, then
/// rename over the target. A failed write leaves the old content intact.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let temp_path = path.with_extension("csv.tmp");
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

/// Quotes a field only when it needs it. Line breaks must be quoted too,
/// or the written row would tear the record apart on the next read.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Splits file content into records of fields, honoring quoted fields.
///
/// A record ends at an unquoted newline; inside quotes the newline belongs
/// to the field. Returns each record with the line number it starts on,
/// or the offending line and a reason on a parse failure.
fn parse_records(content: &str) -> Result<Vec<(usize, Vec<String>)>, (usize, String)> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    // Whether the current field opened with a quote; an empty quoted field
    // must not be mistaken for a blank line or reopened by a stray quote.
    let mut quoted_field = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    field.push(c);
                    line += 1;
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.is_empty() && !quoted_field => {
                in_quotes = true;
                quoted_field = true;
            }
            '"' => return Err((line, "stray quote inside field".to_string())),
            ',' => {
                fields.push(std::mem::take(&mut field));
                quoted_field = false;
            }
            // CRLF: the '\n' that follows ends the record.
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                line += 1;
                if fields.is_empty() && field.is_empty() && !quoted_field {
                    record_line = line;
                    continue;
                }
                fields.push(std::mem::take(&mut field));
                records.push((record_line, std::mem::take(&mut fields)));
                quoted_field = false;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err((record_line, "unterminated quoted field".to_string()));
    }
    if !fields.is_empty() || !field.is_empty() || quoted_field {
        fields.push(field);
        records.push((record_line, fields));
    }

    Ok(records)
}
