//! Entropy estimators over resolution histograms.
//!
//! A histogram is treated as an empirical distribution: each bin's
//! probability is its count over the total number of observations.
//!
//! - **Shannon entropy** is the expected surprisal, i.e. the average number of
//!   identifying bits a resolution reveals.
//! - **Min-entropy** is the surprisal of the rarest bin: the number of bits
//!   the least common resolution gives away.

use std::f64::consts::E;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::histogram::Histogram;

/// Self-information `-log_base(prob)` of an observation with probability `prob`.
///
/// `base` selects the unit: 2 for bits, 10 for bans, `e` for nats.
pub fn surprisal(prob: f64, base: f64) -> f64 {
    let log = if base == 2.0 {
        prob.log2()
    } else if base == 10.0 {
        prob.log10()
    } else if base == E {
        prob.ln()
    } else {
        prob.ln() / base.ln()
    };
    -log
}

/// Total observations, checking every bin is populated.
fn checked_total(histogram: &Histogram) -> Result<u64> {
    if let Some((value, _)) = histogram.iter().find(|&(_, &count)| count == 0) {
        return Err(Error::ZeroCount(value.clone()));
    }
    match histogram.checked_total() {
        None => Err(Error::CountOverflow),
        Some(0) => Err(Error::EmptyHistogram),
        Some(total) => Ok(total),
    }
}

/// Shannon entropy in bits.
///
/// Computed as the count-weighted sum of per-bin surprisal divided by the
/// number of observations.
pub fn shannon_entropy(histogram: &Histogram) -> Result<f64> {
    let total = checked_total(histogram)? as f64;
    let total_surprisal: f64 = histogram
        .counts()
        .map(|count| {
            let count = count as f64;
            count * surprisal(count / total, 2.0)
        })
        .sum();
    Ok(total_surprisal / total)
}

/// Min-entropy in bits: `-log2(min(count) / total)`, the surprisal of the
/// least common bin.
pub fn min_entropy(histogram: &Histogram) -> Result<f64> {
    let total = checked_total(histogram)? as f64;
    let rarest = histogram.counts().min().ok_or(Error::EmptyHistogram)? as f64;
    Ok(surprisal(rarest / total, 2.0))
}

/// Headline statistics for one histogram.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EntropySummary {
    pub observations: u64,
    pub bins: usize,
    /// Shannon entropy in bits.
    pub shannon: f64,
    /// Min-entropy in bits.
    pub min_entropy: f64,
    /// `2^shannon`: on average one in this many users share the same value.
    pub anonymity_set: f64,
}

impl EntropySummary {
    pub fn from_histogram(histogram: &Histogram) -> Result<Self> {
        let shannon = shannon_entropy(histogram)?;
        Ok(Self {
            observations: histogram.total(),
            bins: histogram.len(),
            shannon,
            min_entropy: min_entropy(histogram)?,
            anonymity_set: shannon.exp2(),
        })
    }
}
