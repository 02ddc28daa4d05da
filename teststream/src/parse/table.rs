//! Space-aligned table tokenizer.
//!
//! The switch renders listings as a header line, a border of dash runs and
//! one row per line:
//!
//! ```text
//! GEO addr  Name (>20 ..)            Rx Pwr(dBm)  Conn Type  GEO addr  ...
//! --------  -----------------------  -----------  ---------  --------  ...
//! 01.01.09  02 01.01.03-1 - 10G  ..  Not Present  Duplex     01.01.11  ...
//! ```
//!
//! Each dash run gives the nominal width of one column. Values are not
//! guaranteed to fit their column, so a slice is extended over any
//! non-whitespace characters that follow it before being trimmed.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::ParseError;

/// Width of the gap the device prints between two columns.
const SEPARATOR_WIDTH: usize = 2;

static BORDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(?P<border>(?:-{2,}(?:  )*)+)\s+(?P<rows>.*)").expect("table border pattern")
});

/// One data line of a table, keyed by column name in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    values: IndexMap<String, String>,
}

impl Row {
    /// Value of `column`, if the schema declared it.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }
}

/// Parse a bordered table into rows keyed by `columns`.
///
/// Returns an empty list when no border is present. A border whose run
/// count differs from `columns.len()` is a [`ParseError::TableFormat`].
pub fn parse_table(text: &str, columns: &[&str]) -> Result<Vec<Row>, ParseError> {
    let Some(caps) = BORDER.captures(text) else {
        return Ok(Vec::new());
    };

    let widths: Vec<usize> = caps["border"]
        .split_whitespace()
        .map(|run| run.chars().count())
        .collect();

    if widths.len() != columns.len() {
        return Err(ParseError::TableFormat {
            expected: columns.len(),
            found: widths.len(),
        });
    }

    let rows = caps["rows"]
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| split_row(line, columns, &widths))
        .collect();

    Ok(rows)
}

fn split_row(line: &str, columns: &[&str], widths: &[usize]) -> Row {
    let chars: Vec<char> = line.chars().collect();
    let mut values = IndexMap::with_capacity(columns.len());
    let mut cursor = 0;

    for (name, width) in columns.iter().zip(widths) {
        let start = cursor.min(chars.len());
        let mut end = (start + width).min(chars.len());

        // Value overruns its column: keep consuming until the next gap.
        while end < chars.len() && !chars[end].is_whitespace() {
            end += 1;
        }

        let value: String = chars[start..end].iter().collect();
        values.insert(name.to_string(), value.trim().to_string());
        cursor = end + SEPARATOR_WIDTH;
    }

    Row { values }
}
