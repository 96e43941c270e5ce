//! Offline generation of the character database artifacts
//!
//! Consumes the main UnicodeData.txt file of the Unicode Character
//! Database (semicolon-delimited, 15 fields per line) and emits the four
//! binary artifacts the reader consumes. Single pass, fail-fast: any
//! malformed line aborts the whole run, and regeneration is cheap enough
//! that there is no resume path.

use std::fs;
use std::path::Path;

use byteorder::{BigEndian, WriteBytesExt};
use log::{debug, info, trace};

use crate::error::{Error, Result};
use crate::text::Utf8Str;
use super::models::{
    UnicodeCategory, CASE_RECORD_WIDTH, MAIN_TABLE_FILE, NAME_BLOB_FILE, RECORD_WIDTH,
    TO_LOWER_FILE, TO_UPPER_FILE,
};

const LINE_BREAK: [u32; 1] = ['\n' as u32];
const FIELD_SEPARATOR: [u32; 1] = [';' as u32];
const FRACTION_BAR: [u32; 1] = ['/' as u32];

/// The four artifact buffers produced by one generation run.
pub struct Artifacts {
    /// Main table: one 30-byte big-endian record per source line, in
    /// input order (ascending by codepoint in the published UCD).
    pub main: Vec<u8>,
    /// Name blob: the UTF-8 bytes of every name, concatenated. Each main
    /// record stores its name's (start, end) byte offsets into this blob.
    pub names: Vec<u8>,
    /// Uppercase mappings: 8-byte (codepoint, mapped) pairs, ascending,
    /// only where the source carries an uppercase override.
    pub to_upper: Vec<u8>,
    /// Lowercase mappings: same layout as `to_upper`.
    pub to_lower: Vec<u8>,
}

/// Counts reported after a successful generation run.
#[derive(Debug)]
pub struct GenerateSummary {
    pub records: usize,
    pub name_bytes: usize,
    pub upper_mappings: usize,
    pub lower_mappings: usize,
}

/// Transform UnicodeData.txt content into the four binary artifacts.
///
/// Every line must add exactly the same byte span to the main table; a
/// deviation is a `RecordWidthMismatch` and aborts the run, since the
/// reader's direct indexing and binary search both assume a fixed record
/// width.
pub fn generate(ucd: &Utf8Str) -> Result<Artifacts> {
    let mut artifacts = Artifacts {
        main: Vec::new(),
        names: Vec::new(),
        to_upper: Vec::new(),
        to_lower: Vec::new(),
    };
    let mut expected_span: Option<u64> = None;

    info!("Generating character database from {} bytes of source text", ucd.len());

    for (index, raw_line) in ucd.split(&LINE_BREAK)?.iter().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim_end();
        if line.is_empty() {
            continue;
        }

        let start = artifacts.main.len() as u64;
        write_record(&mut artifacts, &line, line_no)?;
        let span = artifacts.main.len() as u64 - start;

        match expected_span {
            None => expected_span = Some(span),
            Some(expected) if expected != span => {
                return Err(Error::RecordWidthMismatch {
                    line: line_no,
                    expected,
                    found: span,
                });
            }
            Some(_) => {}
        }
    }

    info!(
        "Generated {} records, {} name-blob bytes, {} uppercase / {} lowercase mappings",
        artifacts.main.len() / RECORD_WIDTH,
        artifacts.names.len(),
        artifacts.to_upper.len() / CASE_RECORD_WIDTH,
        artifacts.to_lower.len() / CASE_RECORD_WIDTH,
    );
    Ok(artifacts)
}

/// Read a UnicodeData.txt file and write the four artifacts into `out_dir`.
pub fn generate_file(input: &Path, out_dir: &Path) -> Result<GenerateSummary> {
    debug!("Reading {}", input.display());
    let source = Utf8Str::from_vec(fs::read(input)?);
    let artifacts = generate(&source)?;

    let summary = GenerateSummary {
        records: artifacts.main.len() / RECORD_WIDTH,
        name_bytes: artifacts.names.len(),
        upper_mappings: artifacts.to_upper.len() / CASE_RECORD_WIDTH,
        lower_mappings: artifacts.to_lower.len() / CASE_RECORD_WIDTH,
    };

    fs::write(out_dir.join(MAIN_TABLE_FILE), &artifacts.main)?;
    fs::write(out_dir.join(NAME_BLOB_FILE), &artifacts.names)?;
    fs::write(out_dir.join(TO_UPPER_FILE), &artifacts.to_upper)?;
    fs::write(out_dir.join(TO_LOWER_FILE), &artifacts.to_lower)?;
    Ok(summary)
}

/// Append one source line's worth of output to every artifact.
///
/// Field positions per the published UnicodeData.txt schema:
/// - 0: codepoint (hex)
/// - 1: name
/// - 2: two-letter general category
/// - 6/7/8: numeric value candidates, tried in order
/// - 9: mirrored flag (`Y` exactly)
/// - 12/13/14: uppercase/lowercase/titlecase overrides, each defaulting
///   to field 0's codepoint when empty
fn write_record(artifacts: &mut Artifacts, line: &Utf8Str, line_no: usize) -> Result<()> {
    let fields = line.split(&FIELD_SEPARATOR)?;
    if fields.len() < 15 {
        return Err(Error::InvalidData(format!(
            "line {line_no}: expected 15 fields, found {}",
            fields.len()
        )));
    }

    let codepoint = parse_codepoint(&fields[0], line_no)?;
    trace!("line {line_no}: U+{codepoint:04X} {}", fields[1]);

    artifacts.main.write_u32::<BigEndian>(codepoint)?;

    artifacts.main.write_u32::<BigEndian>(artifacts.names.len() as u32)?;
    artifacts.names.extend_from_slice(fields[1].as_bytes());
    artifacts.main.write_u32::<BigEndian>(artifacts.names.len() as u32)?;

    let category = UnicodeCategory::from_code(fields[2].as_bytes()).ok_or_else(|| {
        Error::UnknownCategory {
            code: fields[2].to_string(),
            line: line_no,
        }
    })?;
    artifacts.main.push(category as u8);

    artifacts
        .main
        .write_u32::<BigEndian>(numeric_value(&fields, line_no)?.to_bits())?;

    artifacts.main.push((fields[9] == "Y") as u8);

    write_codepoint_or(&mut artifacts.main, &fields[12], codepoint, line_no)?;
    write_codepoint_or(&mut artifacts.main, &fields[13], codepoint, line_no)?;
    write_codepoint_or(&mut artifacts.main, &fields[14], codepoint, line_no)?;

    if !fields[12].is_empty() {
        artifacts.to_upper.write_u32::<BigEndian>(codepoint)?;
        artifacts
            .to_upper
            .write_u32::<BigEndian>(parse_codepoint(&fields[12], line_no)?)?;
    }
    if !fields[13].is_empty() {
        artifacts.to_lower.write_u32::<BigEndian>(codepoint)?;
        artifacts
            .to_lower
            .write_u32::<BigEndian>(parse_codepoint(&fields[13], line_no)?)?;
    }

    Ok(())
}

fn write_codepoint_or(out: &mut Vec<u8>, field: &Utf8Str, default: u32, line_no: usize) -> Result<()> {
    let value = if field.is_empty() {
        default
    } else {
        parse_codepoint(field, line_no)?
    };
    out.write_u32::<BigEndian>(value)?;
    Ok(())
}

fn parse_codepoint(field: &Utf8Str, line_no: usize) -> Result<u32> {
    let value = field
        .parse_long(16)
        .map_err(|e| Error::FormatError(format!("line {line_no}: {e}")))?;
    u32::try_from(value)
        .map_err(|_| Error::FormatError(format!("line {line_no}: codepoint {value:#x} out of range")))
}

/// The numeric value for a line: field 6, else field 7, else field 8
/// (which may be a `numerator/denominator` fraction), else NaN.
///
/// Only an exactly-two-part split of field 8 is evaluated as a fraction;
/// any other split count falls back to parsing the whole field as one
/// integer.
fn numeric_value(fields: &[Utf8Str], line_no: usize) -> Result<f32> {
    let plain = |field: &Utf8Str| -> Result<f32> {
        let value = field
            .parse_long(10)
            .map_err(|e| Error::FormatError(format!("line {line_no}: {e}")))?;
        Ok(value as f32)
    };

    if !fields[6].is_empty() {
        return plain(&fields[6]);
    }
    if !fields[7].is_empty() {
        return plain(&fields[7]);
    }
    if fields[8].is_empty() {
        return Ok(f32::NAN);
    }

    let parts = fields[8].split(&FRACTION_BAR)?;
    if parts.len() == 2 {
        let numerator = plain(&parts[0].trim())?;
        let denominator = plain(&parts[1].trim())?;
        return Ok(numerator / denominator);
    }
    plain(&fields[8])
}
