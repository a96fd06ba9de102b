//! Read a JEDEC file and print a summary of its contents

use jedec::{JedecFile, JedecSummary};
use std::time::Instant;

fn main() -> jedec::Result<()> {
    let filename = std::env::args().nth(1).unwrap_or_else(|| "example.jed".to_string());

    if !std::path::Path::new(&filename).exists() {
        println!("File '{filename}' not found!");
        println!("   Run 'cargo run --example write_jedec' first");
        return Ok(());
    }

    let start = Instant::now();
    let record = JedecFile::read(&filename)?;
    println!("Parsed '{filename}' in {:.3}ms\n", start.elapsed().as_secs_f64() * 1000.0);

    let summary = JedecSummary::from_record(&record);
    println!("{summary}");

    if summary.fuse_checksum_matches == Some(false) {
        println!("\nNote: declared fuse checksum differs from the fuse data");
    }

    #[cfg(feature = "serde")]
    println!("\n{}", summary.to_json()?);

    Ok(())
}
