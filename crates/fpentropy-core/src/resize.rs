//! Simulated window resizing.
//!
//! A privacy browser hides the real screen size by sizing the content window
//! to a rounded-down multiple of a fixed step, capped at a maximum. Several
//! screens then report the same inner size, which is exactly the information
//! loss we want to measure. This module reproduces that heuristic for a single
//! resolution string.
//!
//! Two optional strategy variants can be switched on per configuration:
//!
//! - **Aspect-ratio correction**: on tall (portrait) screens, cap the height
//!   so the window keeps at least a minimum width/height ratio.
//! - **Toolbar noise**: jitter the assumed toolbar height uniformly in
//!   `[-noise, +noise]` pixels so the rounding boundary moves between users.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::resolution::Resolution;

/// Color depth reported for every resized window.
pub const OUTPUT_COLOR_DEPTH: u32 = 24;

/// Height taken by toolbars and window decorations (GNOME on Ubuntu).
pub const DEFAULT_TOOLBAR_HEIGHT: i64 = 140;

/// Minimum-aspect-ratio correction for portrait screens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRatioCorrection {
    /// Minimum width/height ratio of the resized window.
    pub min_ratio: f64,
    /// Only screens strictly taller than this are corrected.
    pub force_above_height: i64,
}

/// Parameters of the resize heuristic.
///
/// `max_width` and `max_height` of `0` disable the corresponding cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    pub width_round_to: i64,
    pub height_round_to: i64,
    pub max_width: i64,
    pub max_height: i64,
    pub toolbar_height: i64,
    pub aspect_ratio: Option<AspectRatioCorrection>,
    /// Maximum absolute toolbar-height jitter in pixels.
    pub toolbar_noise: Option<f64>,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            width_round_to: 200,
            height_round_to: 100,
            max_width: 1000,
            max_height: 0,
            toolbar_height: DEFAULT_TOOLBAR_HEIGHT,
            aspect_ratio: None,
            toolbar_noise: None,
        }
    }
}

impl ResizeConfig {
    /// Rounding plus width/height caps, fixed toolbar, no optional variants.
    pub fn capped(width_round_to: i64, height_round_to: i64, max_width: i64, max_height: i64) -> Self {
        Self {
            width_round_to,
            height_round_to,
            max_width,
            max_height,
            ..Self::default()
        }
    }

    /// Rounding with a 1000px width cap and the optional variants.
    ///
    /// A `toolbar_noise` or `min_aspect_ratio` of zero leaves that variant off.
    pub fn with_variants(
        width_round_to: i64,
        height_round_to: i64,
        toolbar_height: i64,
        toolbar_noise: f64,
        min_aspect_ratio: f64,
        aspect_force_above_height: i64,
    ) -> Self {
        Self {
            width_round_to,
            height_round_to,
            toolbar_height,
            toolbar_noise: (toolbar_noise != 0.0).then_some(toolbar_noise),
            aspect_ratio: (min_aspect_ratio != 0.0).then_some(AspectRatioCorrection {
                min_ratio: min_aspect_ratio,
                force_above_height: aspect_force_above_height,
            }),
            ..Self::default()
        }
    }

    /// Whether resizing with this configuration consumes randomness.
    pub fn is_noisy(&self) -> bool {
        matches!(self.toolbar_noise, Some(n) if n != 0.0)
    }

    /// Reject configurations the heuristic cannot evaluate.
    pub fn validate(&self) -> Result<()> {
        if self.width_round_to == 0 {
            return Err(Error::InvalidConfig("width_round_to must be non-zero".into()));
        }
        if self.height_round_to == 0 {
            return Err(Error::InvalidConfig("height_round_to must be non-zero".into()));
        }
        if let Some(ar) = self.aspect_ratio {
            if !(ar.min_ratio.is_finite() && ar.min_ratio > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "min aspect ratio must be positive, got {}",
                    ar.min_ratio
                )));
            }
        }
        if let Some(noise) = self.toolbar_noise {
            if !noise.is_finite() {
                return Err(Error::InvalidConfig(format!(
                    "toolbar noise must be finite, got {noise}"
                )));
            }
        }
        Ok(())
    }

    /// Parameters joined with `_`, used to name per-configuration exports.
    ///
    /// The default configuration yields `200_100_1000_0`.
    pub fn label(&self) -> String {
        let mut label = format!(
            "{}_{}_{}_{}",
            self.width_round_to, self.height_round_to, self.max_width, self.max_height
        );
        if self.toolbar_height != DEFAULT_TOOLBAR_HEIGHT {
            label.push_str(&format!("_tb{}", self.toolbar_height));
        }
        if let Some(noise) = self.toolbar_noise {
            label.push_str(&format!("_noise{noise}"));
        }
        if let Some(ar) = self.aspect_ratio {
            label.push_str(&format!("_ar{}_{}", ar.min_ratio, ar.force_above_height));
        }
        label
    }
}

impl fmt::Display for ResizeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "round {}x{}, max {}x{}, toolbar {}px",
            self.width_round_to,
            self.height_round_to,
            self.max_width,
            self.max_height,
            self.toolbar_height
        )?;
        if let Some(noise) = self.toolbar_noise {
            write!(f, " ±{noise}px")?;
        }
        if let Some(ar) = self.aspect_ratio {
            write!(f, ", min aspect {} above {}px", ar.min_ratio, ar.force_above_height)?;
        }
        Ok(())
    }
}

/// Outcome of resizing one resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resized {
    /// `"<width>x<height>x24"`.
    pub resolution: String,
    pub width: i64,
    pub height: i64,
    /// Resized area over original area; `1.0` when the original area is zero.
    pub utilization: f64,
}

/// Round `value` down to a multiple of `step` (floor toward negative infinity).
fn floor_to_multiple(value: f64, step: i64) -> i64 {
    let step = step as f64;
    ((value / step).floor() * step) as i64
}

/// Resize one resolution string, or `None` if it does not parse.
///
/// The height is not clamped at zero: a screen shorter than the toolbar yields
/// a negative height unless a `max_height` cap applies.
pub fn resize<R: Rng>(resolution: &str, config: &ResizeConfig, rng: &mut R) -> Option<Resized> {
    let parsed = Resolution::parse(resolution).ok()?;
    let (w, h) = (parsed.width, parsed.height);
    let orig_area = parsed.area();

    let new_w = if config.max_width != 0 && w > config.max_width {
        config.max_width
    } else {
        floor_to_multiple(w as f64, config.width_round_to)
    };

    let mut h = h as f64;
    if let Some(ar) = config.aspect_ratio {
        if h > ar.force_above_height as f64 {
            let max_h = new_w as f64 / ar.min_ratio;
            if h > max_h {
                h = max_h;
            }
        }
    }

    let mut toolbar = config.toolbar_height as f64;
    if let Some(noise) = config.toolbar_noise.filter(|&n| n != 0.0) {
        toolbar += rng.random_range(-1.0..=1.0) * noise;
    }

    let mut new_h = floor_to_multiple(h - toolbar, config.height_round_to);
    if config.max_height != 0 && new_h > config.max_height {
        new_h = config.max_height;
    }

    let utilization = if orig_area != 0 {
        (new_w as f64 * new_h as f64) / orig_area as f64
    } else {
        1.0
    };

    Some(Resized {
        resolution: format!("{new_w}x{new_h}x{OUTPUT_COLOR_DEPTH}"),
        width: new_w,
        height: new_h,
        utilization,
    })
}
