//! Point lookups against the generated character database artifacts

use std::fs;
use std::path::Path;

use byteorder::{BigEndian, ByteOrder};
use log::info;

use crate::error::{Error, Result};
use crate::text::Utf8Str;
use super::models::{
    CharInfo, UnicodeCategory, CASE_RECORD_WIDTH, MAIN_TABLE_FILE, NAME_BLOB_FILE, RECORD_WIDTH,
    TO_LOWER_FILE, TO_UPPER_FILE,
};

/// An immutable handle over the four generated artifacts.
///
/// Opened once by the hosting application and shared by reference. Every
/// buffer is read-only after construction, so lookups need no
/// synchronization; the handle is `Send + Sync`.
pub struct CharDatabase {
    records: Vec<u8>,
    /// The whole name blob as one view, so record names can share it.
    names: Utf8Str,
    to_upper: Vec<u8>,
    to_lower: Vec<u8>,
}

impl CharDatabase {
    /// Build a database over in-memory artifact buffers.
    ///
    /// Each table's length must be a whole number of records; anything
    /// else means a truncated or mismatched artifact.
    pub fn from_parts(
        records: Vec<u8>,
        names: Vec<u8>,
        to_upper: Vec<u8>,
        to_lower: Vec<u8>,
    ) -> Result<CharDatabase> {
        check_whole_records(records.len(), RECORD_WIDTH, MAIN_TABLE_FILE)?;
        check_whole_records(to_upper.len(), CASE_RECORD_WIDTH, TO_UPPER_FILE)?;
        check_whole_records(to_lower.len(), CASE_RECORD_WIDTH, TO_LOWER_FILE)?;
        Ok(CharDatabase {
            records,
            names: Utf8Str::from_vec(names),
            to_upper,
            to_lower,
        })
    }

    /// Load the four artifact files from a directory.
    pub fn open(dir: &Path) -> Result<CharDatabase> {
        info!("Opening character database in {}", dir.display());
        let records = fs::read(dir.join(MAIN_TABLE_FILE))?;
        let names = fs::read(dir.join(NAME_BLOB_FILE))?;
        let to_upper = fs::read(dir.join(TO_UPPER_FILE))?;
        let to_lower = fs::read(dir.join(TO_LOWER_FILE))?;
        let db = CharDatabase::from_parts(records, names, to_upper, to_lower)?;
        info!(
            "Character database opened: {} records, {} name bytes, {} uppercase / {} lowercase mappings",
            db.len(),
            db.names.len(),
            db.to_upper.len() / CASE_RECORD_WIDTH,
            db.to_lower.len() / CASE_RECORD_WIDTH,
        );
        Ok(db)
    }

    /// Number of records in the main table.
    pub fn len(&self) -> usize {
        self.records.len() / RECORD_WIDTH
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up the record for a codepoint.
    ///
    /// Tries the direct-index fast path first: below the table's dense
    /// range a record usually sits at the index equal to its own
    /// codepoint. Otherwise falls back to binary search over the full
    /// table. `Ok(None)` means the codepoint has no record (unassigned or
    /// private use); an error is only possible for corrupt artifact data.
    pub fn lookup(&self, codepoint: u32) -> Result<Option<CharInfo>> {
        let direct = codepoint as usize;
        if direct < self.len() && self.record_key(direct) == codepoint {
            return self.decode_record(direct).map(Some);
        }
        match search_records(&self.records, RECORD_WIDTH, codepoint) {
            Some(index) => self.decode_record(index).map(Some),
            None => Ok(None),
        }
    }

    /// The uppercase mapping for a codepoint, or the codepoint itself
    /// when the table has no entry for it.
    pub fn to_upper(&self, codepoint: u32) -> u32 {
        case_mapping(&self.to_upper, codepoint).unwrap_or(codepoint)
    }

    /// The lowercase mapping for a codepoint, or the codepoint itself
    /// when the table has no entry for it.
    pub fn to_lower(&self, codepoint: u32) -> u32 {
        case_mapping(&self.to_lower, codepoint).unwrap_or(codepoint)
    }

    fn record_key(&self, index: usize) -> u32 {
        BigEndian::read_u32(&self.records[index * RECORD_WIDTH..])
    }

    fn decode_record(&self, index: usize) -> Result<CharInfo> {
        let record = &self.records[index * RECORD_WIDTH..(index + 1) * RECORD_WIDTH];
        let codepoint = BigEndian::read_u32(&record[0..4]);
        let name_start = BigEndian::read_u32(&record[4..8]) as usize;
        let name_end = BigEndian::read_u32(&record[8..12]) as usize;
        let category = UnicodeCategory::try_from(record[12])?;
        let numeric_value = f32::from_bits(BigEndian::read_u32(&record[13..17]));
        let mirrored = record[17] != 0;
        let uppercase = BigEndian::read_u32(&record[18..22]);
        let lowercase = BigEndian::read_u32(&record[22..26]);
        let titlecase = BigEndian::read_u32(&record[26..30]);

        let name_len = name_end.checked_sub(name_start).ok_or_else(|| {
            Error::InvalidData(format!("inverted name span for U+{codepoint:04X}"))
        })?;
        let name = self.names.substring(name_start, name_len)?;

        Ok(CharInfo {
            codepoint,
            name,
            category,
            numeric_value,
            mirrored,
            uppercase,
            lowercase,
            titlecase,
        })
    }
}

fn check_whole_records(len: usize, width: usize, table: &str) -> Result<()> {
    if len % width != 0 {
        return Err(Error::InvalidData(format!(
            "{table} length {len} is not a multiple of the {width}-byte record width"
        )));
    }
    Ok(())
}

/// Exclusive-bound bisection over fixed-stride records keyed by a leading
/// big-endian u32, strictly ascending.
///
/// `lo` is known to be below the target, `hi` known to be at or above it;
/// the midpoint key narrows one bound per step until an exact match or
/// the bounds collapse (absence).
fn search_records(table: &[u8], stride: usize, target: u32) -> Option<usize> {
    let count = (table.len() / stride) as isize;
    // lo starts one below the first index so index 0 stays reachable.
    let mut lo: isize = -1;
    let mut hi: isize = count;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        let key = BigEndian::read_u32(&table[mid as usize * stride..]);
        if key == target {
            return Some(mid as usize);
        }
        if key < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    None
}

fn case_mapping(table: &[u8], codepoint: u32) -> Option<u32> {
    search_records(table, CASE_RECORD_WIDTH, codepoint)
        .map(|index| BigEndian::read_u32(&table[index * CASE_RECORD_WIDTH + 4..]))
}
