//! Textual interchange forms.
//!
//! Exercises write their inputs and expected outputs as JSON arrays such as
//! `[1,2,3]` or `[3,9,20,null,null,15,7]`, where `null` is the missing
//! marker. Parsing accepts any JSON whitespace; formatting produces the
//! compact form.
use serde_json::error::Category;
use serde_json::Value;
use tracing::debug;

use crate::Error;

/// Parses a list of values, e.g. the input of a linked list exercise.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] with the byte offset reported by the JSON
/// parser when the text is not an array of 32-bit integers. The missing
/// marker is rejected here.
///
/// # Examples
///
/// ```
/// # use nodeshapes::interchange;
/// assert_eq!(interchange::parse_values("[1, 2, 3]"), Ok(vec![1, 2, 3]));
/// assert_eq!(interchange::parse_values(" [] "), Ok(vec![]));
/// assert!(interchange::parse_values("[1, null]").is_err());
/// ```
pub fn parse_values(text: &str) -> Result<Vec<i32>, Error> {
    serde_json::from_str(text)
        .map_err(|err| invalid(text, &err, "expected an array of 32-bit integers"))
}

/// Parses a list of values and missing markers, e.g. a level-order tree.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] with the byte offset reported by the JSON
/// parser when the text is not an array of 32-bit integers and `null`
/// markers.
///
/// # Examples
///
/// ```
/// # use nodeshapes::interchange;
/// assert_eq!(
///     interchange::parse_slots("[3,null,0]"),
///     Ok(vec![Some(3), None, Some(0)])
/// );
/// ```
pub fn parse_slots(text: &str) -> Result<Vec<Option<i32>>, Error> {
    serde_json::from_str(text)
        .map_err(|err| invalid(text, &err, "expected an array of 32-bit integers or nulls"))
}

/// Formats a list of values in the compact form `[1,2,3]`.
pub fn format_values(values: &[i32]) -> String {
    values.iter().copied().collect::<Value>().to_string()
}

/// Formats a list of values and missing markers in the compact form
/// `[3,9,20,null,null,15,7]`.
pub fn format_slots(slots: &[Option<i32>]) -> String {
    slots.iter().copied().collect::<Value>().to_string()
}

fn invalid(text: &str, err: &serde_json::Error, data_reason: &'static str) -> Error {
    let reason = match err.classify() {
        Category::Data => data_reason,
        Category::Syntax => "malformed list",
        Category::Eof => "list ends early",
        Category::Io => "unreadable input",
    };
    let position = byte_offset(text, err.line(), err.column());

    debug!(position, %err, "interchange text rejected");
    Error::invalid(position, reason)
}

/// Converts the 1-based line and column of a JSON error into a byte offset.
fn byte_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(text.len())
}
