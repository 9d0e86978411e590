//! CSV tokenizing and header schema mapping for the job sheet export.
//!
//! This crate provides:
//! - [`tokenize_line`] / [`split_lines`] — tolerant line-based CSV splitting
//! - [`SchemaMapping`] — alias-aware header resolution ([`FIELD_ALIASES`])

mod schema;
mod tokenizer;

pub use schema::{FIELD_ALIASES, JobField, SchemaMapping};
pub use tokenizer::{split_lines, tokenize_line};
