//! Snap-point resolution.
//!
//! A sheet is always laid out at its tallest configured height and then
//! translated downward. Every snap point therefore maps to an
//! "offset from max": how far the sheet must be pushed down so that exactly
//! that height stays visible. The tallest snap point has offset 0.

use std::fmt;
use std::str::FromStr;

/// One configured snap height.
///
/// Plain numbers follow the usual convention: values in `(0, 1]` are a
/// fraction of the viewport extent, larger values are absolute pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapPoint {
    /// Fraction of the viewport extent, `(0, 1]`.
    Fraction(f32),
    /// Absolute height in logical pixels.
    Pixels(f32),
    /// Percentage of the viewport extent, `(0, 100]`.
    Percent(f32),
}

impl SnapPoint {
    /// Height in pixels for the given viewport extent.
    ///
    /// Returns `None` for non-finite or non-positive results.
    pub fn resolve(&self, viewport_extent: f32) -> Option<f32> {
        let pixels = match *self {
            SnapPoint::Fraction(f) => f * viewport_extent,
            SnapPoint::Pixels(px) => px,
            SnapPoint::Percent(p) => p / 100.0 * viewport_extent,
        };
        (pixels.is_finite() && pixels > 0.0).then_some(pixels)
    }
}

impl From<f32> for SnapPoint {
    fn from(value: f32) -> Self {
        if value > 1.0 {
            SnapPoint::Pixels(value)
        } else {
            SnapPoint::Fraction(value)
        }
    }
}

/// Errors from parsing a snap point.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapPointError {
    /// The input was empty.
    Empty,
    /// The input was not a number or a percentage.
    InvalidNumber {
        /// The rejected input.
        input: String,
    },
    /// The value was zero, negative or not finite.
    NonPositive {
        /// The rejected value.
        value: f32,
    },
    /// A percentage outside `(0, 100]`.
    PercentOutOfRange {
        /// The rejected percentage.
        value: f32,
    },
}

impl fmt::Display for SnapPointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapPointError::Empty => write!(f, "Empty snap point"),
            SnapPointError::InvalidNumber { input } => {
                write!(f, "Invalid snap point '{}'", input)
            }
            SnapPointError::NonPositive { value } => {
                write!(f, "Snap point must be positive, got {}", value)
            }
            SnapPointError::PercentOutOfRange { value } => {
                write!(f, "Snap point percentage {}% is outside (0, 100]", value)
            }
        }
    }
}

impl std::error::Error for SnapPointError {}

impl FromStr for SnapPoint {
    type Err = SnapPointError;

    /// Parse `"50%"`, `"0.5"` or `"320"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SnapPointError::Empty);
        }

        let invalid = || SnapPointError::InvalidNumber {
            input: s.to_string(),
        };

        if let Some(number) = s.strip_suffix('%') {
            let value: f32 = number.trim().parse().map_err(|_| invalid())?;
            if !value.is_finite() {
                return Err(invalid());
            }
            if value <= 0.0 || value > 100.0 {
                return Err(SnapPointError::PercentOutOfRange { value });
            }
            return Ok(SnapPoint::Percent(value));
        }

        let value: f32 = s.parse().map_err(|_| invalid())?;
        if !value.is_finite() || value <= 0.0 {
            return Err(SnapPointError::NonPositive { value });
        }
        Ok(SnapPoint::from(value))
    }
}

/// Where a released drag should settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTarget {
    /// Settle at this snap index.
    Index(usize),
    /// The drag went far enough past the smallest snap point to dismiss.
    Close,
}

/// Normalized snap heights, strictly ascending, never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapPoints {
    pixels: Vec<f32>,
}

impl SnapPoints {
    /// Resolve a snap configuration against the viewport extent.
    ///
    /// Entries that do not resolve to a positive height are dropped with a
    /// warning. The rest are sorted ascending and deduplicated, so the
    /// configured order never matters. Returns `None` when nothing is left.
    pub fn normalize(spec: &[SnapPoint], viewport_extent: f32) -> Option<Self> {
        let mut pixels: Vec<f32> = spec
            .iter()
            .filter_map(|point| {
                let resolved = point.resolve(viewport_extent);
                if resolved.is_none() {
                    tracing::warn!(?point, viewport_extent, "dropping unusable snap point");
                }
                resolved
            })
            .collect();

        pixels.sort_by(f32::total_cmp);
        pixels.dedup_by(|a, b| (*a - *b).abs() < f32::EPSILON);

        if pixels.is_empty() {
            None
        } else {
            Some(Self { pixels })
        }
    }

    /// Snap heights in pixels, ascending.
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always false; an empty configuration does not produce `SnapPoints`.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Index of the tallest snap point.
    pub fn last_index(&self) -> usize {
        self.pixels.len() - 1
    }

    /// The tallest snap height.
    pub fn max(&self) -> f32 {
        self.pixels[self.last_index()]
    }

    /// Clamp an index into range.
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.last_index())
    }

    /// Offset from max that reveals exactly the snap height at `index`.
    ///
    /// Out-of-range indices are clamped.
    pub fn offset_for_index(&self, index: usize) -> f32 {
        self.max() - self.pixels[self.clamp_index(index)]
    }

    /// Resolve a resting offset to a snap index, or to [`SnapTarget::Close`]
    /// when it lies more than `drag_threshold` below the smallest snap point.
    ///
    /// Equidistant candidates resolve to the larger index.
    pub fn nearest_index(&self, offset: f32, drag_threshold: f32) -> SnapTarget {
        if offset > self.offset_for_index(0) + drag_threshold {
            return SnapTarget::Close;
        }

        let mut best = 0;
        let mut best_distance = f32::INFINITY;
        for index in 0..self.pixels.len() {
            let distance = (self.offset_for_index(index) - offset).abs();
            if distance <= best_distance {
                best = index;
                best_distance = distance;
            }
        }
        SnapTarget::Index(best)
    }
}
