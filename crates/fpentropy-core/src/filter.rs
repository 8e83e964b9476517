//! Plausibility filtering of resolution histograms.

use serde::{Deserialize, Serialize};

use crate::histogram::Histogram;
use crate::resolution::Resolution;

/// Inclusive width/height bounds a resolution must satisfy to be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterBounds {
    pub min_width: i64,
    pub min_height: i64,
    pub max_width: i64,
    pub max_height: i64,
}

impl Default for FilterBounds {
    /// 640×480 minimum, no maximum.
    fn default() -> Self {
        Self::min_640x480()
    }
}

impl FilterBounds {
    /// Largest dimension considered a real screen by [`Self::plausible_800x600`].
    pub const MAX_PLAUSIBLE_DIMENSION: i64 = 16384;

    pub fn min_640x480() -> Self {
        Self {
            min_width: 640,
            min_height: 480,
            max_width: i64::MAX,
            max_height: i64::MAX,
        }
    }

    /// 800×600 minimum and 16384×16384 maximum, dropping unrealistic values.
    pub fn plausible_800x600() -> Self {
        Self {
            min_width: 800,
            min_height: 600,
            max_width: Self::MAX_PLAUSIBLE_DIMENSION,
            max_height: Self::MAX_PLAUSIBLE_DIMENSION,
        }
    }

    pub fn contains(&self, resolution: &Resolution) -> bool {
        (self.min_width..=self.max_width).contains(&resolution.width)
            && (self.min_height..=self.max_height).contains(&resolution.height)
    }
}

/// Keep only entries whose resolution parses and falls within `bounds`.
///
/// Dropped observations are lost, not reassigned to other bins.
pub fn filter(histogram: &Histogram, bounds: &FilterBounds) -> Histogram {
    let kept: Histogram = histogram
        .iter()
        .filter(|(value, _)| match Resolution::parse(value) {
            Ok(resolution) => bounds.contains(&resolution),
            Err(e) => {
                log::trace!("filter: skipping {e}");
                false
            }
        })
        .map(|(value, &count)| (value.clone(), count))
        .collect();
    log::debug!(
        "filter: kept {}/{} bins ({}/{} observations)",
        kept.len(),
        histogram.len(),
        kept.total(),
        histogram.total()
    );
    kept
}
