use std::path::{Path, PathBuf};

use fpentropy_core::{
    MeasurementResult, RankKey, ResizeConfig, SweepOptions, SweepReport, filter, load_configs,
    presets, write_csv_file,
};

pub struct SweepCommandConfig<'a> {
    pub file: &'a str,
    pub format: &'a str,
    pub bounds: &'a str,
    pub preset: &'a str,
    pub configs_path: Option<&'a str>,
    pub seed: Option<u64>,
    pub csv_dir: Option<&'a str>,
    pub output_path: Option<&'a str>,
    pub top: usize,
}

pub fn run(cfg: SweepCommandConfig<'_>) {
    let format = super::or_exit(super::parse_format(cfg.format));
    let bounds = super::or_exit(super::parse_bounds(cfg.bounds));
    let configs = resolve_configs(cfg.preset, cfg.configs_path);

    let counts = super::load_counts(cfg.file, format);
    let usable = filter(&counts, &bounds);
    println!(
        "Total data points: {}, after filtering: {}",
        counts.total(),
        usable.total()
    );
    let baseline = super::summarize("Filtered data", &usable);
    super::baseline::print_summary("Filtered data", &baseline);

    let options = SweepOptions { seed: cfg.seed };
    let report = match fpentropy_core::sweep(&usable, &configs, &options) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Sweep failed: {e}");
            std::process::exit(1);
        }
    };

    println!("\n*** Results for {} resize configurations ***", configs.len());
    print_results(report.results().iter(), cfg.top);

    for key in RankKey::ALL {
        println!("\n*** Sorted by {} ***", key.description());
        print_results(report.ranked(key).into_iter(), cfg.top);
    }

    if let Some(dir) = cfg.csv_dir {
        match write_csvs(Path::new(dir), &report) {
            Ok(paths) => {
                for path in paths {
                    println!("Writing to {}", path.display());
                }
            }
            Err(e) => {
                eprintln!("Failed to write CSV files to {dir}: {e}");
                std::process::exit(1);
            }
        }
    }

    if let Some(path) = cfg.output_path {
        let json = serde_json::json!({
            "bounds": bounds,
            "baseline": baseline,
            "results": report.results(),
        });
        match write_json(Path::new(path), &json) {
            Ok(()) => println!("\nResults written to {path}"),
            Err(e) => {
                eprintln!("\nFailed to write {path}: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn resolve_configs(preset: &str, configs_path: Option<&str>) -> Vec<ResizeConfig> {
    if let Some(path) = configs_path {
        return match load_configs(path) {
            Ok(configs) => configs,
            Err(e) => {
                eprintln!("Failed to load configurations from {path}: {e}");
                std::process::exit(1);
            }
        };
    }
    presets::by_name(preset).unwrap_or_else(|| {
        eprintln!(
            "Unknown preset '{preset}', expected one of: {}",
            presets::NAMES.join(", ")
        );
        std::process::exit(1);
    })
}

fn print_results<'a>(results: impl Iterator<Item = &'a MeasurementResult>, top: usize) {
    for r in results {
        println!(
            "  Entropy: {:>5.2} bits, Min-entropy: {:>5.2} bits, Util: {:>6.2}%, \
             Metric: {:.3}, Bins: {:>3}  [{}]",
            r.entropy,
            r.min_entropy,
            r.utilization * 100.0,
            r.combined_metric(),
            r.resized.len(),
            r.config
        );
        if top > 0 {
            println!("      {}", super::format_top_bins(&r.resized, top));
        }
    }
}

/// One CSV per configuration; stops at the first failure.
fn write_csvs(dir: &Path, report: &SweepReport) -> std::io::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    report
        .results()
        .iter()
        .map(|r| write_csv_file(dir, &r.config, &r.resized))
        .collect()
}

fn write_json(path: &Path, json: &serde_json::Value) -> std::io::Result<()> {
    let text = serde_json::to_string_pretty(json)?;
    std::fs::write(path, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_presets() {
        assert_eq!(resolve_configs("height-caps", None), presets::height_caps());
        assert_eq!(resolve_configs("aspect-noise", None).len(), 33);
    }

    fn sample_report() -> SweepReport {
        let counts: fpentropy_core::Histogram =
            [("1366x768x24", 4u64), ("1920x1080x24", 3), ("1280x1024x24", 2)]
                .into_iter()
                .collect();
        fpentropy_core::sweep(&counts, &presets::height_caps(), &SweepOptions::seeded(0)).unwrap()
    }

    #[test]
    fn test_write_csvs() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("csv");
        let paths = write_csvs(&out, &sample_report()).unwrap();
        assert_eq!(paths.len(), 6);
        assert!(paths.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_write_csvs_into_a_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("taken");
        std::fs::write(&blocker, "").unwrap();
        assert!(write_csvs(&blocker, &sample_report()).is_err());
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_json(&path, &serde_json::json!({ "results": [] })).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"results\""));

        // A directory cannot be overwritten with the report.
        assert!(write_json(dir.path(), &serde_json::json!({})).is_err());
    }
}
