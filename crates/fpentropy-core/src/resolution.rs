//! Resolution string parsing.
//!
//! Fingerprint dumps store screen resolutions as `"<width>x<height>x<depth>"`
//! (sometimes without the depth). Real data also contains junk such as
//! `undefined` or `permission denied`; parsing reports those as an explicit
//! [`ParseError`] so callers can skip them.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Why a string is not a resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing 'x' separator in {0:?}")]
    MissingSeparator(String),

    #[error("non-numeric dimension in {0:?}")]
    InvalidDimension(String),
}

/// A parsed screen resolution.
///
/// Dimensions are signed: dumps contain values like `-100x100x16` and the
/// resize simulation can legitimately produce negative heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: i64,
    pub height: i64,
    pub color_depth: Option<u32>,
}

impl Resolution {
    /// Parse the leading `width` and `height` fields of a resolution string.
    ///
    /// A numeric third field is kept as the color depth; any other trailing
    /// content is ignored.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let mut fields = s.split('x');
        let width = fields.next().unwrap_or_default();
        let height = fields
            .next()
            .ok_or_else(|| ParseError::MissingSeparator(s.to_string()))?;
        let width = parse_dimension(width).ok_or_else(|| ParseError::InvalidDimension(s.into()))?;
        let height =
            parse_dimension(height).ok_or_else(|| ParseError::InvalidDimension(s.into()))?;
        let color_depth = fields.next().and_then(|d| d.trim().parse().ok());
        Ok(Self {
            width,
            height,
            color_depth,
        })
    }

    /// Screen area in pixels.
    pub fn area(&self) -> i128 {
        i128::from(self.width) * i128::from(self.height)
    }
}

fn parse_dimension(field: &str) -> Option<i64> {
    field.trim().parse().ok()
}

impl FromStr for Resolution {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color_depth {
            Some(depth) => write!(f, "{}x{}x{}", self.width, self.height, depth),
            None => write!(f, "{}x{}", self.width, self.height),
        }
    }
}
