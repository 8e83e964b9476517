use fpentropy_core::{EntropySummary, filter};

pub fn run(file: &str, format: &str, bounds: &str, top: usize) {
    let format = super::or_exit(super::parse_format(format));
    let bounds = super::or_exit(super::parse_bounds(bounds));
    let counts = super::load_counts(file, format);

    println!("Total data points: {}", counts.total());
    let original = super::summarize("Original data", &counts);
    print_summary("Original data", &original);
    println!("  Most common: {}", super::format_top_bins(&counts, top));

    let usable = filter(&counts, &bounds);
    println!(
        "\nTotal data points within {}x{}..{}x{}: {}",
        bounds.min_width,
        bounds.min_height,
        display_max(bounds.max_width),
        display_max(bounds.max_height),
        usable.total()
    );
    let filtered = super::summarize("Filtered data", &usable);
    print_summary("Filtered data", &filtered);
    println!("  Most common: {}", super::format_top_bins(&usable, top));
}

pub(crate) fn print_summary(label: &str, s: &EntropySummary) {
    println!(
        "{label}: Entropy {:.2} bits, Min-entropy {:.2} bits, Bins: {}, \
         on avg. one in {:.2} share the same value",
        s.shannon, s.min_entropy, s.bins, s.anonymity_set
    );
}

fn display_max(v: i64) -> String {
    if v == i64::MAX {
        "∞".to_string()
    } else {
        v.to_string()
    }
}
