use std::fs;
use std::path::Path;

use utf8_chardb::unicode::{
    builder, CASE_RECORD_WIDTH, RECORD_WIDTH,
};
use utf8_chardb::{CharDatabase, Error, UnicodeCategory, Utf8Str};

/// Verbatim lines from UnicodeData.txt, ascending by codepoint. Covers
/// control names, numeric fields in each of the three positions, a
/// fraction, a mirrored codepoint, case overrides in both directions, and
/// the supplementary plane.
const UCD_SAMPLE: &str = "\
0000;<control>;Cc;0;BN;;;;;N;NULL;;;;
0009;<control>;Cc;0;S;;;;;N;CHARACTER TABULATION;;;;
0024;DOLLAR SIGN;Sc;0;ET;;;;;N;;;;;
0028;LEFT PARENTHESIS;Ps;0;ON;;;;;Y;OPENING PARENTHESIS;;;;
0031;DIGIT ONE;Nd;0;EN;;1;1;1;N;;;;;
0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;
0061;LATIN SMALL LETTER A;Ll;0;L;;;;;N;;;0041;;0041
00BD;VULGAR FRACTION ONE HALF;No;0;ON;<fraction> 0031 2044 0032;;;1/2;N;FRACTION ONE HALF;;;;
2160;ROMAN NUMERAL ONE;Nl;0;L;<compat> 0049;;;1;N;;;;2170;
10400;DESERET CAPITAL LETTER LONG I;Lu;0;L;;;;;N;;;;10428;
10428;DESERET SMALL LETTER LONG I;Ll;0;L;;;;;N;;;10400;;10400
";

const SAMPLE_RECORDS: usize = 11;

/// (codepoint, name, category, uppercase, lowercase, titlecase) per
/// source line; case fields default to the codepoint itself.
const EXPECTED: &[(u32, &str, UnicodeCategory, u32, u32, u32)] = &[
    (0x0000, "<control>", UnicodeCategory::Control, 0x0000, 0x0000, 0x0000),
    (0x0009, "<control>", UnicodeCategory::Control, 0x0009, 0x0009, 0x0009),
    (0x0024, "DOLLAR SIGN", UnicodeCategory::SymbolCurrency, 0x0024, 0x0024, 0x0024),
    (0x0028, "LEFT PARENTHESIS", UnicodeCategory::PunctuationOpen, 0x0028, 0x0028, 0x0028),
    (0x0031, "DIGIT ONE", UnicodeCategory::NumberDecimalDigit, 0x0031, 0x0031, 0x0031),
    (0x0041, "LATIN CAPITAL LETTER A", UnicodeCategory::LetterUppercase, 0x0041, 0x0061, 0x0041),
    (0x0061, "LATIN SMALL LETTER A", UnicodeCategory::LetterLowercase, 0x0041, 0x0061, 0x0041),
    (0x00BD, "VULGAR FRACTION ONE HALF", UnicodeCategory::NumberOther, 0x00BD, 0x00BD, 0x00BD),
    (0x2160, "ROMAN NUMERAL ONE", UnicodeCategory::NumberLetter, 0x2160, 0x2170, 0x2160),
    (0x10400, "DESERET CAPITAL LETTER LONG I", UnicodeCategory::LetterUppercase, 0x10400, 0x10428, 0x10400),
    (0x10428, "DESERET SMALL LETTER LONG I", UnicodeCategory::LetterLowercase, 0x10400, 0x10428, 0x10400),
];

fn sample_artifacts() -> builder::Artifacts {
    builder::generate(&Utf8Str::from(UCD_SAMPLE)).expect("generate sample database")
}

fn sample_database() -> CharDatabase {
    let artifacts = sample_artifacts();
    CharDatabase::from_parts(
        artifacts.main,
        artifacts.names,
        artifacts.to_upper,
        artifacts.to_lower,
    )
    .expect("open database from generated artifacts")
}

#[test]
fn artifacts_have_the_contracted_widths() {
    let artifacts = sample_artifacts();
    assert_eq!(artifacts.main.len(), SAMPLE_RECORDS * RECORD_WIDTH);
    // Uppercase overrides: 0061 and 10428. Lowercase: 0041, 2160, 10400.
    assert_eq!(artifacts.to_upper.len(), 2 * CASE_RECORD_WIDTH);
    assert_eq!(artifacts.to_lower.len(), 3 * CASE_RECORD_WIDTH);
}

#[test]
fn lookup_matches_every_source_line() {
    let db = sample_database();
    assert_eq!(db.len(), SAMPLE_RECORDS);

    for &(codepoint, name, category, upper, lower, title) in EXPECTED {
        let info = db
            .lookup(codepoint)
            .expect("lookup")
            .unwrap_or_else(|| panic!("missing record for U+{codepoint:04X}"));
        assert_eq!(info.codepoint, codepoint);
        assert_eq!(info.name, name, "name of U+{codepoint:04X}");
        assert_eq!(info.category, category, "category of U+{codepoint:04X}");
        assert_eq!(info.uppercase, upper, "uppercase of U+{codepoint:04X}");
        assert_eq!(info.lowercase, lower, "lowercase of U+{codepoint:04X}");
        assert_eq!(info.titlecase, title, "titlecase of U+{codepoint:04X}");
    }
}

#[test]
fn lookup_reports_absence_not_error() {
    let db = sample_database();
    for absent in [0x0001u32, 0x0023, 0x0042, 0x30000, 0x10FFFF] {
        assert!(
            db.lookup(absent).expect("lookup").is_none(),
            "U+{absent:04X} should be absent"
        );
    }
}

#[test]
fn tab_is_a_control_named_control() {
    let db = sample_database();
    let tab = db.lookup(0x0009).expect("lookup").expect("TAB record");
    assert_eq!(tab.category, UnicodeCategory::Control);
    assert_eq!(tab.name.as_bytes(), b"<control>");
}

#[test]
fn numeric_values_come_from_fields_6_7_8() {
    let db = sample_database();

    let digit = db.lookup(0x0031).expect("lookup").expect("DIGIT ONE");
    assert_eq!(digit.numeric_value, 1.0);

    let half = db.lookup(0x00BD).expect("lookup").expect("ONE HALF");
    assert_eq!(half.numeric_value, 0.5);

    let roman = db.lookup(0x2160).expect("lookup").expect("ROMAN NUMERAL ONE");
    assert_eq!(roman.numeric_value, 1.0);

    let dollar = db.lookup(0x0024).expect("lookup").expect("DOLLAR SIGN");
    assert!(dollar.numeric_value.is_nan(), "no numeric fields means NaN");
}

#[test]
fn mirrored_flag_requires_exactly_y() {
    let db = sample_database();
    assert!(db.lookup(0x0028).expect("lookup").expect("paren").mirrored);
    assert!(!db.lookup(0x0024).expect("lookup").expect("dollar").mirrored);
}

#[test]
fn case_tables_fold_independently_of_the_main_table() {
    let db = sample_database();

    assert_eq!(db.to_upper(0x0061), 0x0041);
    assert_eq!(db.to_upper(0x10428), 0x10400);
    assert_eq!(db.to_lower(0x0041), 0x0061);
    assert_eq!(db.to_lower(0x2160), 0x2170);
    assert_eq!(db.to_lower(0x10400), 0x10428);

    // No entry: the input codepoint comes back unchanged.
    assert_eq!(db.to_upper(0x0041), 0x0041);
    assert_eq!(db.to_lower(0x0061), 0x0061);
    assert_eq!(db.to_upper(0x30000), 0x30000);
}

#[test]
fn codepoint_zero_defaults_are_preserved() {
    let db = sample_database();
    let nul = db.lookup(0).expect("lookup").expect("NUL record");
    // For codepoint 0 the self-default makes "no mapping" and "maps to 0"
    // the same stored value.
    assert_eq!(nul.uppercase, 0);
    assert_eq!(nul.lowercase, 0);
    assert_eq!(nul.titlecase, 0);
}

#[test]
fn unknown_category_aborts_with_line_number() {
    let source = Utf8Str::from(
        "0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;\n\
         0042;LATIN CAPITAL LETTER B;Zz;0;L;;;;;N;;;;0062;\n",
    );
    match builder::generate(&source) {
        Err(Error::UnknownCategory { code, line }) => {
            assert_eq!(code, "Zz");
            assert_eq!(line, 2);
        }
        Err(other) => panic!("expected UnknownCategory, got {other}"),
        Ok(_) => panic!("expected UnknownCategory, got artifacts"),
    }
}

#[test]
fn malformed_codepoint_aborts() {
    let source = Utf8Str::from("XYZZY;BAD;Lu;0;L;;;;;N;;;;;\n");
    assert!(matches!(
        builder::generate(&source),
        Err(Error::FormatError(_))
    ));
}

#[test]
fn short_line_aborts() {
    let source = Utf8Str::from("0041;LATIN CAPITAL LETTER A;Lu\n");
    assert!(matches!(
        builder::generate(&source),
        Err(Error::InvalidData(_))
    ));
}

#[test]
fn blank_lines_are_skipped() {
    let source = Utf8Str::from("\n\n0024;DOLLAR SIGN;Sc;0;ET;;;;;N;;;;;\n\n");
    let artifacts = builder::generate(&source).expect("generate");
    assert_eq!(artifacts.main.len(), RECORD_WIDTH);
}

#[test]
fn truncated_artifacts_are_rejected() {
    let artifacts = sample_artifacts();
    let mut main = artifacts.main;
    main.pop();
    assert!(matches!(
        CharDatabase::from_parts(main, artifacts.names, artifacts.to_upper, artifacts.to_lower),
        Err(Error::InvalidData(_))
    ));
}

#[test]
fn generated_files_open_from_disk() {
    let dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join("chardb_open");
    fs::create_dir_all(&dir).expect("create scratch dir");
    let input = dir.join("UnicodeData.txt");
    fs::write(&input, UCD_SAMPLE).expect("write source");

    let summary = builder::generate_file(&input, &dir).expect("generate to dir");
    assert_eq!(summary.records, SAMPLE_RECORDS);
    assert_eq!(summary.upper_mappings, 2);
    assert_eq!(summary.lower_mappings, 3);

    let db = CharDatabase::open(&dir).expect("open from disk");
    assert_eq!(db.len(), SAMPLE_RECORDS);
    let dollar = db.lookup(0x0024).expect("lookup").expect("DOLLAR SIGN");
    assert_eq!(dollar.name, "DOLLAR SIGN");
    assert_eq!(dollar.category, UnicodeCategory::SymbolCurrency);
}
