//! Minimal comma-separated reader and writer.
//!
//! Handles a header line, double-quoted fields with embedded commas and
//! doubled quotes, CRLF line endings, a leading byte-order mark, and blank
//! lines. Quoted fields may not span lines.

use std::collections::HashMap;

use vacheck_foundation::{Error, ErrorContext, Result};

// =============================================================================
// Reading
// =============================================================================

/// One data line of a tabular resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabularRow {
    /// Line number in the resource (1-indexed, header is line 1).
    pub line: usize,
    /// Field values in column order.
    pub fields: Vec<String>,
}

impl TabularRow {
    /// Returns the field at `index`, or `""` if the row is short.
    #[must_use]
    pub fn get(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", String::as_str)
    }
}

/// A parsed tabular resource: header plus data rows.
#[derive(Clone, Debug)]
pub struct Tabular {
    /// Resource name used in error context.
    pub source: String,
    /// Header names in column order.
    pub headers: Vec<String>,
    /// Data rows in file order.
    pub rows: Vec<TabularRow>,
    index: HashMap<String, usize>,
}

impl Tabular {
    /// Parses `text` as a tabular resource.
    ///
    /// # Errors
    ///
    /// Returns a resource error if the text has no header line, the header
    /// is empty, a header name repeats, or any line leaves a quoted field
    /// open.
    pub fn parse(text: &str, source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut lines = text.lines().enumerate();

        let header_line = loop {
            match lines.next() {
                Some((_, line)) if line.trim().is_empty() => {}
                Some((n, line)) => break (n + 1, line),
                None => {
                    return Err(Error::resource("resource is empty")
                        .with_context(ErrorContext::new().with_source(source)));
                }
            }
        };

        let headers: Vec<String> = split_line(header_line.1, &source, header_line.0)?
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.iter().all(String::is_empty) {
            return Err(Error::resource("header row is empty").with_context(
                ErrorContext::new()
                    .with_source(source)
                    .with_line(header_line.0),
            ));
        }

        let mut index = HashMap::with_capacity(headers.len());
        for (i, name) in headers.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            if index.insert(name.clone(), i).is_some() {
                return Err(Error::resource(format!("duplicate column {name:?}")).with_context(
                    ErrorContext::new()
                        .with_source(source)
                        .with_line(header_line.0),
                ));
            }
        }

        let rows = lines
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                Ok(TabularRow {
                    line: n + 1,
                    fields: split_line(line, &source, n + 1)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            source,
            headers,
            rows,
            index,
        })
    }

    /// Returns the index of the named column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns the index of the named column or a resource error naming it.
    ///
    /// # Errors
    ///
    /// Returns a resource error if the column is absent.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column(name).ok_or_else(|| {
            Error::resource(format!("required column {name:?} is missing"))
                .with_context(ErrorContext::new().with_source(self.source.clone()))
        })
    }

    /// Builds error context pointing at a row and column.
    #[must_use]
    pub fn context(&self, row: &TabularRow, column: Option<&str>) -> ErrorContext {
        let ctx = ErrorContext::new()
            .with_source(self.source.clone())
            .with_line(row.line);
        match column {
            Some(name) => ctx.with_column(name),
            None => ctx,
        }
    }
}

fn split_line(line: &str, source: &str, number: usize) -> Result<Vec<String>> {
    parse_line(line).ok_or_else(|| {
        Error::resource("unterminated quoted field").with_context(
            ErrorContext::new()
                .with_source(source.to_string())
                .with_line(number),
        )
    })
}

/// Splits one line into fields.
///
/// Returns `None` if a quoted field is still open at the end of the line.
#[must_use]
pub fn parse_line(line: &str) -> Option<Vec<String>> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == ',' {
            result.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    if in_quotes {
        return None;
    }
    result.push(current);
    Some(result)
}

// =============================================================================
// Writing
// =============================================================================

/// Appends one field to `out`, quoting it when needed.
pub fn write_field(out: &mut String, value: &str) {
    if value.contains([',', '"', '\n', '\r']) {
        out.push('"');
        for ch in value.chars() {
            if ch == '"' {
                out.push('"');
            }
            out.push(ch);
        }
        out.push('"');
    } else {
        out.push_str(value);
    }
}

/// Appends a full line (fields plus trailing newline) to `out`.
pub fn write_line<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_field(out, field.as_ref());
    }
    out.push('\n');
}
