//! Writing scraped records to disk, and reading them back.
//!
//! Sinks never rewrite field values; what the extractor produced is what lands in
//! the file.

use crate::models::{Category, ListingRecord};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// `{category}_cleaned_{YYYYmmdd_HHMMSS}.csv`
pub fn default_filename(category: Category, now: DateTime<Local>) -> String {
    format!("{}_cleaned_{}.csv", category.slug(), now.format("%Y%m%d_%H%M%S"))
}

/// Write records as UTF-8 CSV with a header row, even when there are no records
pub fn write_csv<W: Write>(records: &[ListingRecord], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(ListingRecord::HEADERS)
        .context("Failed to write CSV header")?;
    for record in records {
        wtr.serialize(record).context("Failed to write CSV row")?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Save records under `dir/filename`, creating `dir` if needed
pub fn export_csv(records: &[ListingRecord], dir: &Path, filename: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let path = dir.join(filename);
    let file = File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(records, file)?;
    Ok(path)
}

/// Parse records from CSV produced by [`write_csv`]
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<ListingRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    rdr.deserialize()
        .collect::<Result<Vec<ListingRecord>, _>>()
        .context("Failed to parse CSV rows")
}

/// Load a previously exported CSV file
pub fn read_csv(path: &Path) -> Result<Vec<ListingRecord>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    parse_csv(file)
}

/// Save records as a pretty-printed JSON array
pub fn export_json(records: &[ListingRecord], path: &Path) -> Result<PathBuf> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path.to_path_buf())
}
