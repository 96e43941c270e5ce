use std::env;
use std::path::Path;

use utf8_chardb::unicode::builder;
use utf8_chardb::unicode::{MAIN_TABLE_FILE, NAME_BLOB_FILE, TO_LOWER_FILE, TO_UPPER_FILE};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path-to-UnicodeData.txt>", args[0]);
        std::process::exit(1);
    }

    let input = Path::new(&args[1]);
    println!("Generating character database from: {}", input.display());

    match builder::generate_file(input, Path::new(".")) {
        Ok(summary) => {
            println!("Artifacts written to the current directory:");
            println!("  {}: {} records", MAIN_TABLE_FILE, summary.records);
            println!("  {}: {} bytes", NAME_BLOB_FILE, summary.name_bytes);
            println!("  {}: {} mappings", TO_UPPER_FILE, summary.upper_mappings);
            println!("  {}: {} mappings", TO_LOWER_FILE, summary.lower_mappings);
        }
        Err(e) => {
            eprintln!("ERROR: generation failed");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
