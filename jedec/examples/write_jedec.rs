//! Write a small GAL16V8-sized JEDEC file

use jedec::{FuseMap, JedecFile, JedecRecord, WriterConfig};
use std::time::Instant;

fn main() -> jedec::Result<()> {
    let filename = "example.jed";
    let fuse_count = 2194;

    // Checkerboard rows so the output is easy to eyeball
    let mut fuses = FuseMap::try_new(fuse_count, false)?;
    for index in 0..fuse_count {
        if (index / 32 + index) % 2 == 0 {
            fuses.set(index, true)?;
        }
    }

    let record = JedecRecord::new()
        .with_device_name("GAL16V8")
        .with_pin_count(20)
        .with_fuses(fuses)?;

    let start = Instant::now();
    let config = WriterConfig::default().with_row_width(32);
    JedecFile::write_with(filename, &record, &config)?;
    println!("Wrote {fuse_count} fuses to '{filename}' in {:?}", start.elapsed());
    println!("\nRun 'cargo run --example read_jedec' to read it back!");
    Ok(())
}
