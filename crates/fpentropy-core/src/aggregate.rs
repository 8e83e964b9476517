//! Apply the resize heuristic to a whole histogram.

use rand::Rng;

use crate::error::{Error, Result};
use crate::histogram::Histogram;
use crate::resize::{ResizeConfig, resize};

/// A resized histogram and the mean utilization of its source entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregated {
    pub histogram: Histogram,
    /// Unweighted mean over transformed entries: each distinct input
    /// resolution counts once regardless of how often it was observed.
    pub mean_utilization: f64,
}

/// Resize every entry of `histogram`, summing counts of colliding outputs.
///
/// Entries that do not parse are skipped and do not take part in the
/// utilization average. Fails with [`Error::EmptyHistogram`] when no entry
/// could be transformed and with [`Error::CountOverflow`] when the input
/// total does not fit in a `u64`.
pub fn aggregate<R: Rng>(
    histogram: &Histogram,
    config: &ResizeConfig,
    rng: &mut R,
) -> Result<Aggregated> {
    config.validate()?;
    if histogram.checked_total().is_none() {
        return Err(Error::CountOverflow);
    }

    let mut resized = Histogram::new();
    let mut transformed = 0usize;
    let mut total_utilization = 0.0;
    for (value, &count) in histogram {
        let Some(r) = resize(value, config, rng) else {
            log::trace!("aggregate: skipping unparsable {value:?}");
            continue;
        };
        transformed += 1;
        total_utilization += r.utilization;
        resized.add(r.resolution, count);
    }

    if transformed == 0 {
        return Err(Error::EmptyHistogram);
    }
    log::debug!(
        "aggregate: {} entries → {} bins ({config})",
        transformed,
        resized.len()
    );
    Ok(Aggregated {
        histogram: resized,
        mean_utilization: total_utilization / transformed as f64,
    })
}
