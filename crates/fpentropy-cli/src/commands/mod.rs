pub mod baseline;
pub mod resize;
pub mod sweep;

use fpentropy_core::{EntropySummary, FilterBounds, Histogram, InputFormat, sorted_by_count};

/// Parse an input format string into the enum.
pub fn parse_format(s: &str) -> Result<InputFormat, String> {
    s.parse()
}

/// Parse a filter preset name into bounds.
pub fn parse_bounds(s: &str) -> Result<FilterBounds, String> {
    match s {
        "min640" => Ok(FilterBounds::min_640x480()),
        "plausible" => Ok(FilterBounds::plausible_800x600()),
        other => Err(format!("unknown bounds '{other}', expected min640 or plausible")),
    }
}

/// Unwrap a fatal result, printing the error and exiting with status 1.
pub fn or_exit<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

/// Read a count dump, exiting on I/O failure.
pub fn load_counts(path: &str, format: InputFormat) -> Histogram {
    match fpentropy_core::read_counts_path(path, format) {
        Ok(counts) => counts,
        Err(e) => {
            eprintln!("Failed to read {path}: {e}");
            std::process::exit(1);
        }
    }
}

/// Entropy summary, exiting when the histogram is unusable.
pub fn summarize(label: &str, histogram: &Histogram) -> EntropySummary {
    match EntropySummary::from_histogram(histogram) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{label}: {e}");
            std::process::exit(1);
        }
    }
}

/// `value (count)` list of the `top` most common bins.
pub fn format_top_bins(histogram: &Histogram, top: usize) -> String {
    sorted_by_count(histogram)
        .into_iter()
        .take(top)
        .map(|(value, count)| format!("{value} ({count})"))
        .collect::<Vec<_>>()
        .join(", ")
}
