//! The embedded Unicode character property database
//!
//! The builder derives four binary artifacts from the canonical
//! UnicodeData.txt file; the reader answers point lookups against them in
//! logarithmic time. The record layout is a contract shared between the
//! two sides, captured by the constants in `models`.

pub mod builder;
mod database;
mod models;

pub use database::CharDatabase;
pub use models::{
    CharInfo, UnicodeCategory, CASE_RECORD_WIDTH, MAIN_TABLE_FILE, NAME_BLOB_FILE, RECORD_WIDTH,
    TO_LOWER_FILE, TO_UPPER_FILE,
};
