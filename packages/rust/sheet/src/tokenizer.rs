//! Line-oriented CSV tokenizer.
//!
//! Deliberately small: one line in, one row of cells out.
//! - `"` toggles quoting and is dropped from the cell
//! - `,` outside quotes ends a cell
//! - doubled quotes (`""`) are NOT an escape; both quotes are dropped
//! - cells are trimmed, so CRLF documents lose their `\r`

use std::mem::take;

/// Split a whole document into lines, after trimming the document.
///
/// Quoted cells spanning several lines are not supported; every physical
/// line is one row.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.trim().split('\n').collect()
}

/// Tokenize one CSV line into its cells.
///
/// Never fails. An empty line yields a single empty cell.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(finish_cell(take(&mut current))),
            _ => current.push(ch),
        }
    }
    cells.push(finish_cell(current));

    cells
}

/// Trim a cell and drop one stray quote at either end.
fn finish_cell(raw: String) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.to_string()
}
