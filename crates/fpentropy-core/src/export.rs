//! CSV export of histograms, most common value first.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::histogram::Histogram;
use crate::resize::ResizeConfig;

/// Entries by descending count; equal counts keep key order.
pub fn sorted_by_count(histogram: &Histogram) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = histogram
        .iter()
        .map(|(value, &count)| (value.as_str(), count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

/// Write `<resolution>,<count>` lines in descending count order.
pub fn write_csv<W: Write>(mut writer: W, histogram: &Histogram) -> std::io::Result<()> {
    for (value, count) in sorted_by_count(histogram) {
        writeln!(writer, "{value},{count}")?;
    }
    writer.flush()
}

/// File name for the export of a configuration's resized histogram.
pub fn csv_file_name(config: &ResizeConfig) -> String {
    format!("{}.csv", config.label())
}

/// Write the histogram to `<dir>/<config label>.csv` and return its path.
pub fn write_csv_file(
    dir: impl AsRef<Path>,
    config: &ResizeConfig,
    histogram: &Histogram,
) -> std::io::Result<PathBuf> {
    let path = dir.as_ref().join(csv_file_name(config));
    let file = File::create(&path)?;
    write_csv(BufWriter::new(file), histogram)?;
    log::debug!("export: wrote {} bins to {}", histogram.len(), path.display());
    Ok(path)
}
