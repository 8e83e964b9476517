//! Parameter sweeps: measure many resize configurations and rank them.
//!
//! A sweep is a pure computation over a histogram and a caller-supplied list
//! of configurations. The only source of non-determinism is toolbar noise,
//! which draws from a single RNG seeded through [`SweepOptions`].

use std::cmp::Ordering;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::aggregate::aggregate;
use crate::entropy::{min_entropy, shannon_entropy};
use crate::error::Result;
use crate::histogram::Histogram;
use crate::resize::ResizeConfig;

/// Entropy and utilization of one resize configuration.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MeasurementResult {
    pub config: ResizeConfig,
    /// Shannon entropy of the resized histogram in bits.
    pub entropy: f64,
    /// Min-entropy of the resized histogram in bits.
    pub min_entropy: f64,
    /// Mean per-entry utilization in [0, 1].
    pub utilization: f64,
    pub resized: Histogram,
}

impl MeasurementResult {
    /// `entropy * (1 - utilization)`: identifying bits weighted by lost area.
    pub fn combined_metric(&self) -> f64 {
        self.entropy * (1.0 - self.utilization)
    }

    pub fn sort_key(&self, key: RankKey) -> f64 {
        match key {
            RankKey::Entropy => self.entropy,
            RankKey::Utilization => 1.0 - self.utilization,
            RankKey::Combined => self.combined_metric(),
        }
    }
}

/// Ordering used to rank sweep results. All rankings are ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankKey {
    /// Lowest entropy first.
    Entropy,
    /// Highest utilization first.
    Utilization,
    /// Lowest `entropy * (1 - utilization)` first.
    Combined,
}

impl RankKey {
    pub const ALL: [RankKey; 3] = [RankKey::Entropy, RankKey::Utilization, RankKey::Combined];

    pub fn description(self) -> &'static str {
        match self {
            Self::Entropy => "entropy",
            Self::Utilization => "utilization",
            Self::Combined => "entropy * (1 - utilization)",
        }
    }
}

/// Options for a sweep run.
#[derive(Debug, Clone, Default)]
pub struct SweepOptions {
    /// Seed for toolbar noise. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl SweepOptions {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Resize `histogram` with `config` and measure the result.
pub fn measure<R: Rng>(
    histogram: &Histogram,
    config: &ResizeConfig,
    rng: &mut R,
) -> Result<MeasurementResult> {
    let aggregated = aggregate(histogram, config, rng)?;
    Ok(MeasurementResult {
        config: *config,
        entropy: shannon_entropy(&aggregated.histogram)?,
        min_entropy: min_entropy(&aggregated.histogram)?,
        utilization: aggregated.mean_utilization,
        resized: aggregated.histogram,
    })
}

/// Measure every configuration in order.
///
/// The first failing configuration aborts the sweep; an unusable dataset
/// fails on the first configuration.
pub fn sweep(
    histogram: &Histogram,
    configs: &[ResizeConfig],
    options: &SweepOptions,
) -> Result<SweepReport> {
    let mut rng = options.rng();
    let mut results = Vec::with_capacity(configs.len());
    for config in configs {
        let result = measure(histogram, config, &mut rng)?;
        log::debug!(
            "sweep: [{config}] {:.3} bits, {:.1}% utilization",
            result.entropy,
            result.utilization * 100.0
        );
        results.push(result);
    }
    Ok(SweepReport { results })
}

/// Load a sweep table from a JSON array of configurations.
///
/// Omitted fields take their [`ResizeConfig::default`] values. Every entry is
/// validated so a bad row fails before any work is done.
pub fn load_configs(path: impl AsRef<Path>) -> Result<Vec<ResizeConfig>> {
    let text = std::fs::read_to_string(path)?;
    let configs: Vec<ResizeConfig> = serde_json::from_str(&text)?;
    for config in &configs {
        config.validate()?;
    }
    Ok(configs)
}

/// Sweep results in sweep order, with ranked views.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    results: Vec<MeasurementResult>,
}

impl SweepReport {
    pub fn results(&self) -> &[MeasurementResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<MeasurementResult> {
        self.results
    }

    /// Results sorted ascending by `key`. Ties keep sweep order.
    pub fn ranked(&self, key: RankKey) -> Vec<&MeasurementResult> {
        let mut ranked: Vec<&MeasurementResult> = self.results.iter().collect();
        ranked.sort_by(|a, b| {
            a.sort_key(key)
                .partial_cmp(&b.sort_key(key))
                .unwrap_or(Ordering::Equal)
        });
        ranked
    }

    pub fn by_entropy(&self) -> Vec<&MeasurementResult> {
        self.ranked(RankKey::Entropy)
    }

    pub fn by_utilization(&self) -> Vec<&MeasurementResult> {
        self.ranked(RankKey::Utilization)
    }

    pub fn by_combined(&self) -> Vec<&MeasurementResult> {
        self.ranked(RankKey::Combined)
    }
}

/// Built-in sweep tables.
pub mod presets {
    use crate::resize::ResizeConfig;

    /// Names accepted by [`by_name`].
    pub const NAMES: [&str; 2] = ["aspect-noise", "height-caps"];

    /// Rounding steps, minimum aspect ratio for portrait screens, and toolbar
    /// noise, all with the 1000px width cap.
    pub fn aspect_and_noise() -> Vec<ResizeConfig> {
        // (w_round, h_round, toolbar, noise, min_aspect, force_above_h)
        const TABLE: [(i64, i64, i64, f64, f64, i64); 33] = [
            (200, 100, 140, 0.0, 0.0, 0),
            (150, 100, 140, 0.0, 0.0, 0),
            (100, 100, 140, 0.0, 0.0, 0),
            (200, 150, 140, 0.0, 0.0, 0),
            (200, 200, 140, 0.0, 0.0, 0),
            (200, 100, 140, 0.0, 1.1, 800),
            (200, 200, 140, 0.0, 1.1, 800),
            (200, 200, 140, 10.0, 1.1, 800),
            (200, 200, 140, 20.0, 1.1, 800),
            (200, 100, 140, 0.0, 1.2, 800),
            (200, 200, 140, 0.0, 1.2, 800),
            (200, 100, 140, 10.0, 1.2, 800),
            (200, 100, 140, 20.0, 1.2, 800),
            (200, 100, 140, 0.0, 1.1, 900),
            (200, 200, 140, 0.0, 1.1, 900),
            (200, 200, 140, 10.0, 1.1, 900),
            (200, 200, 140, 20.0, 1.1, 900),
            (200, 100, 140, 0.0, 1.2, 900),
            (200, 200, 140, 0.0, 1.2, 900),
            (200, 100, 140, 10.0, 1.2, 900),
            (200, 100, 140, 20.0, 1.2, 900),
            (200, 100, 140, 0.0, 1.1, 1000),
            (200, 200, 140, 0.0, 1.1, 1000),
            (200, 200, 140, 10.0, 1.1, 1000),
            (200, 200, 140, 20.0, 1.1, 1000),
            (200, 100, 140, 0.0, 1.2, 1000),
            (200, 200, 140, 0.0, 1.2, 1000),
            (200, 100, 140, 10.0, 1.2, 1000),
            (200, 100, 140, 20.0, 1.2, 1000),
            (200, 100, 140, 10.0, 0.0, 0),
            (200, 200, 140, 10.0, 0.0, 0),
            (200, 100, 140, 20.0, 0.0, 0),
            (200, 200, 140, 20.0, 0.0, 0),
        ];
        TABLE
            .iter()
            .map(|&(w, h, toolbar, noise, ratio, force)| {
                ResizeConfig::with_variants(w, h, toolbar, noise, ratio, force)
            })
            .collect()
    }

    /// Default rounding with no height cap, then caps from 900 to 1300px.
    pub fn height_caps() -> Vec<ResizeConfig> {
        [0, 900, 1000, 1100, 1200, 1300]
            .into_iter()
            .map(|max_h| ResizeConfig::capped(200, 100, 1000, max_h))
            .collect()
    }

    pub fn by_name(name: &str) -> Option<Vec<ResizeConfig>> {
        match name {
            "aspect-noise" => Some(aspect_and_noise()),
            "height-caps" => Some(height_caps()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn sample() -> Histogram {
        [
            ("1366x768x24", 400u64),
            ("1920x1080x24", 350),
            ("1280x1024x24", 150),
            ("1440x900x24", 100),
            ("1280x800x24", 90),
            ("1024x768x24", 60),
            ("1600x900x24", 50),
            ("800x600x24", 5),
            ("1080x1920x24", 3),
        ]
        .into_iter()
        .collect()
    }

    fn result(entropy: f64, utilization: f64) -> MeasurementResult {
        MeasurementResult {
            config: ResizeConfig::default(),
            entropy,
            min_entropy: 0.0,
            utilization,
            resized: Histogram::new(),
        }
    }

    #[test]
    fn sweep_keeps_config_order() {
        let configs = presets::height_caps();
        let report = sweep(&sample(), &configs, &SweepOptions::seeded(1)).unwrap();
        let swept: Vec<ResizeConfig> = report.results().iter().map(|r| r.config).collect();
        assert_eq!(swept, configs);
    }

    #[test]
    fn measurement_invariants() {
        let report = sweep(&sample(), &presets::aspect_and_noise(), &SweepOptions::seeded(7)).unwrap();
        for r in report.results() {
            let max_bits = (r.resized.len() as f64).log2();
            assert!(r.min_entropy >= 0.0);
            assert!(r.entropy <= max_bits + 1e-12, "{} > {max_bits}", r.entropy);
            // The rarest bin is at most as likely as a uniform one.
            assert!(r.min_entropy + 1e-12 >= max_bits);
            assert!((0.0..=1.0).contains(&r.utilization));
            assert_eq!(r.resized.total(), sample().total());
        }
    }

    #[test]
    fn resizing_reduces_entropy() {
        let original = shannon_entropy(&sample()).unwrap();
        let report = sweep(&sample(), &[ResizeConfig::default()], &SweepOptions::seeded(0)).unwrap();
        assert!(report.results()[0].entropy < original);
    }

    #[test]
    fn seeded_sweeps_are_reproducible() {
        let configs = presets::aspect_and_noise();
        let a = sweep(&sample(), &configs, &SweepOptions::seeded(99)).unwrap();
        let b = sweep(&sample(), &configs, &SweepOptions::seeded(99)).unwrap();
        assert_eq!(a.results(), b.results());
    }

    #[test]
    fn rankings_are_stable() {
        let report = SweepReport {
            results: vec![
                result(2.0, 0.5),
                result(1.0, 0.9),
                result(2.0, 0.5),
                result(1.0, 0.5),
            ],
        };
        let index = |ranked: Vec<&MeasurementResult>| -> Vec<usize> {
            ranked
                .iter()
                .map(|r| {
                    report
                        .results()
                        .iter()
                        .position(|x| std::ptr::eq(x, *r))
                        .unwrap()
                })
                .collect()
        };
        assert_eq!(index(report.by_entropy()), vec![1, 3, 0, 2]);
        assert_eq!(index(report.by_utilization()), vec![1, 0, 2, 3]);
        // Combined: 1.0, 0.1, 1.0, 0.5
        assert_eq!(index(report.by_combined()), vec![1, 3, 0, 2]);
    }

    #[test]
    fn combined_metric() {
        let r = result(4.0, 0.75);
        assert_eq!(r.combined_metric(), 1.0);
        assert_eq!(r.sort_key(RankKey::Utilization), 0.25);
    }

    #[test]
    fn unusable_dataset_fails_the_sweep() {
        let junk: Histogram = [("undefined", 3u64)].into_iter().collect();
        let err = sweep(&junk, &presets::height_caps(), &SweepOptions::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyHistogram));
    }

    #[test]
    fn empty_config_list_yields_empty_report() {
        let report = sweep(&sample(), &[], &SweepOptions::default()).unwrap();
        assert!(report.results().is_empty());
        assert!(report.by_combined().is_empty());
    }

    #[test]
    fn load_configs_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.json");
        std::fs::write(
            &path,
            r#"[{}, {"max_height": 900}, {"height_round_to": 200, "toolbar_noise": 10.0}]"#,
        )
        .unwrap();
        let configs = load_configs(&path).unwrap();
        assert_eq!(configs.len(), 3);
        assert_eq!(configs[0], ResizeConfig::default());
        assert_eq!(configs[1], ResizeConfig::capped(200, 100, 1000, 900));
        assert!(configs[2].is_noisy());
    }

    #[test]
    fn load_configs_errors() {
        let dir = tempfile::tempdir().unwrap();
        let bad_json = dir.path().join("bad.json");
        std::fs::write(&bad_json, "[{").unwrap();
        assert!(matches!(load_configs(&bad_json), Err(Error::Json(_))));

        let zero_step = dir.path().join("zero.json");
        std::fs::write(&zero_step, r#"[{"width_round_to": 0}]"#).unwrap();
        assert!(matches!(load_configs(&zero_step), Err(Error::InvalidConfig(_))));

        let missing = dir.path().join("missing.json");
        assert!(matches!(load_configs(&missing), Err(Error::Io(_))));
    }

    #[test]
    fn preset_tables() {
        assert_eq!(presets::aspect_and_noise().len(), 33);
        assert_eq!(presets::aspect_and_noise()[0], ResizeConfig::default());
        assert_eq!(presets::height_caps().len(), 6);
        assert_eq!(presets::height_caps()[0], ResizeConfig::default());
        for name in presets::NAMES {
            assert!(presets::by_name(name).is_some());
        }
        assert!(presets::by_name("nope").is_none());
    }
}
