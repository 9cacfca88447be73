// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel scales.
//!
//! Scale resolution produces a [`PixelScaleSpec`] in unit space (`[0, 1]`). At render time it
//! is instantiated against the drawable width, giving a [`PixelScale`] that maps domain values
//! to horizontal pixel offsets inside the bar.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::color_scale::ScaleKind;
use crate::domain::{Datum, extent};

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain maps everything to the middle of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        let t = if denom == 0.0 { 0.5 } else { (x - d0) / denom };
        r0 + t * (r1 - r0)
    }

    /// Returns “nice-ish” tick values for the domain.
    ///
    /// `count` is a hint; the result may hold a nearby number of ticks.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

/// A polylinear mapping through sorted `(domain, range)` anchor pairs.
///
/// Values outside the anchors extrapolate along the first/last segment.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalePiecewise {
    anchors: Vec<(f64, f64)>,
}

impl ScalePiecewise {
    /// Creates a scale from anchor pairs. Anchors are sorted by domain value and
    /// duplicate domain values keep their first occurrence.
    pub fn new(mut anchors: Vec<(f64, f64)>) -> Self {
        anchors.retain(|(d, r)| d.is_finite() && r.is_finite());
        anchors.sort_by(|a, b| a.0.total_cmp(&b.0));
        anchors.dedup_by(|b, a| a.0 == b.0);
        Self { anchors }
    }

    /// The sorted anchor pairs.
    pub fn anchors(&self) -> &[(f64, f64)] {
        &self.anchors
    }

    /// Maps a value from domain space into range space.
    ///
    /// Returns `None` if the scale has no anchors or `x` is not finite.
    pub fn map(&self, x: f64) -> Option<f64> {
        if !x.is_finite() {
            return None;
        }
        match self.anchors.as_slice() {
            [] => None,
            [(_, r)] => Some(*r),
            anchors => {
                let i = anchors
                    .partition_point(|(d, _)| *d <= x)
                    .clamp(1, anchors.len() - 1);
                let (d0, r0) = anchors[i - 1];
                let (d1, r1) = anchors[i];
                Some(ScaleLinear::new((d0, d1), (r0, r1)).map(x))
            }
        }
    }

    /// Returns a copy with every range value multiplied by `k`.
    pub fn scale_range(&self, k: f64) -> Self {
        Self {
            anchors: self.anchors.iter().map(|&(d, r)| (d, r * k)).collect(),
        }
    }
}

/// A discrete band scale with equal-width, unpadded bands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
}

impl ScaleBand {
    /// Creates a new band scale covering `count` bands over `range`.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self { range, count }
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let (r0, r1) = self.range;
        (r1 - r0).abs() / self.count as f64
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the x-position of the left edge of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let start = if r1 >= r0 { r0 } else { r1 };
        start + self.band_width() * index as f64
    }

    /// Returns the x-position of the center of the band at `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.x(index) + 0.5 * self.band_width()
    }
}

/// A resolved pixel scale in unit space (no width yet).
#[derive(Clone, Debug, PartialEq)]
pub enum PixelScaleSpec {
    /// Raw domain samples anchored at their relative position in `[min, max]`.
    Continuous {
        /// Domain extent `(min, max)`.
        extent: (f64, f64),
        /// Unit-space anchors, one per distinct raw domain value.
        anchors: ScalePiecewise,
    },
    /// One equal-width band per category.
    Discrete {
        /// Categories in display order.
        categories: Vec<String>,
    },
}

impl PixelScaleSpec {
    /// Builds a continuous spec from raw (possibly unsorted) domain samples.
    ///
    /// Returns `None` if the samples have no finite values.
    pub fn continuous(domain: &[f64]) -> Option<Self> {
        let extent = extent(domain)?;
        let unit = ScaleLinear::new(extent, (0.0, 1.0));
        let anchors = ScalePiecewise::new(domain.iter().map(|&d| (d, unit.map(d))).collect());
        Some(Self::Continuous { extent, anchors })
    }

    /// Builds a discrete spec from categories.
    pub fn discrete(categories: Vec<String>) -> Self {
        Self::Discrete { categories }
    }

    /// The scale kind.
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Continuous { .. } => ScaleKind::Continuous,
            Self::Discrete { .. } => ScaleKind::Discrete,
        }
    }

    /// Instantiates a concrete pixel scale over `[0, width]`.
    pub fn instantiate(&self, width: f64) -> PixelScale {
        let width = width.max(0.0);
        match self {
            Self::Continuous { extent, anchors } => PixelScale::Continuous {
                extent: *extent,
                scale: anchors.scale_range(width),
            },
            Self::Discrete { categories } => PixelScale::Discrete {
                categories: categories.clone(),
                bands: ScaleBand::new((0.0, width), categories.len()),
            },
        }
    }
}

/// A pixel scale bound to a drawable width.
#[derive(Clone, Debug, PartialEq)]
pub enum PixelScale {
    /// Continuous mapping through the raw domain anchors.
    Continuous {
        /// Domain extent `(min, max)`.
        extent: (f64, f64),
        /// Domain → pixel anchors.
        scale: ScalePiecewise,
    },
    /// Equal-width bands.
    Discrete {
        /// Categories in display order.
        categories: Vec<String>,
        /// Band geometry.
        bands: ScaleBand,
    },
}

impl PixelScale {
    /// Maps a datum to its pixel offset.
    ///
    /// Continuous scales return the value's position; discrete scales return the left edge of
    /// the category's band. Returns `None` for non-finite numbers, unknown categories, or a
    /// datum of the wrong kind.
    pub fn map(&self, datum: &Datum) -> Option<f64> {
        match (self, datum) {
            (Self::Continuous { scale, .. }, Datum::Number(v)) => scale.map(*v),
            (Self::Discrete { categories, bands }, Datum::Category(c)) => {
                let i = categories.iter().position(|x| x == c)?;
                Some(bands.x(i))
            }
            _ => None,
        }
    }

    /// Width of one band (discrete) or `0` (continuous).
    pub fn band_width(&self) -> f64 {
        match self {
            Self::Continuous { .. } => 0.0,
            Self::Discrete { bands, .. } => bands.band_width(),
        }
    }
}

/// Returns “nice” tick values covering `[min, max]` with roughly `count` ticks.
///
/// Steps are powers of ten times 1, 2, or 5, and only ticks inside the domain are returned.
pub fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step = nice_step(span / count as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).ceil();
    let stop = (max / step).floor();
    let n_f = (stop - start).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    // Multiply the integer index by the step (rather than accumulating) to limit drift.
    (0..=n).map(|i| (start + i as f64) * step).collect()
}

// Geometric midpoints between the 1/2/5/10 step multipliers (`sqrt(50)`, `sqrt(10)`).
const E10: f64 = 7.0710678118654755;
const E5: f64 = 3.1622776601683795;

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= core::f64::consts::SQRT_2 {
        2.0
    } else {
        1.0
    };
    nice * base
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn piecewise_matches_linear_for_proportional_anchors() {
        let spec = PixelScaleSpec::continuous(&[0.0, 25.0, 100.0]).expect("finite domain");
        let scale = spec.instantiate(200.0);
        let linear = ScaleLinear::new((0.0, 100.0), (0.0, 200.0));
        for v in [-10.0, 0.0, 12.5, 50.0, 99.0, 130.0] {
            let got = scale.map(&Datum::Number(v)).expect("mapped");
            assert!((got - linear.map(v)).abs() < 1e-9, "{v}: {got}");
        }
    }

    #[test]
    fn unsorted_domain_has_sorted_anchors_and_true_extent() {
        let spec = PixelScaleSpec::continuous(&[50.0, 0.0, 100.0, 50.0]).expect("finite domain");
        let PixelScaleSpec::Continuous { extent, anchors } = &spec else {
            panic!("expected a continuous spec");
        };
        assert_eq!(*extent, (0.0, 100.0));
        assert_eq!(anchors.anchors(), &[(0.0, 0.0), (50.0, 0.5), (100.0, 1.0)]);
    }

    #[test]
    fn degenerate_extent_maps_to_midpoint() {
        let spec = PixelScaleSpec::continuous(&[5.0]).expect("finite domain");
        let scale = spec.instantiate(80.0);
        assert_eq!(scale.map(&Datum::Number(5.0)), Some(40.0));
        assert_eq!(scale.map(&Datum::Number(7.0)), Some(40.0));
    }

    #[test]
    fn band_scale_splits_width_evenly() {
        let bands = ScaleBand::new((0.0, 90.0), 3);
        assert_eq!(bands.band_width(), 30.0);
        assert_eq!([bands.x(0), bands.x(1), bands.x(2)], [0.0, 30.0, 60.0]);
        assert_eq!(bands.center(1), 45.0);
        assert_eq!(ScaleBand::new((0.0, 90.0), 0).band_width(), 0.0);
    }

    #[test]
    fn discrete_pixel_scale_maps_categories_only() {
        let spec = PixelScaleSpec::discrete(vec!["a".into(), "b".into()]);
        let scale = spec.instantiate(100.0);
        assert_eq!(scale.map(&"b".into()), Some(50.0));
        assert_eq!(scale.map(&"z".into()), None);
        assert_eq!(scale.map(&Datum::Number(1.0)), None);
        assert_eq!(scale.band_width(), 50.0);
    }

    #[test]
    fn nice_ticks_stay_inside_domain() {
        assert_eq!(
            nice_ticks(0.0, 100.0, 7),
            vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]
        );
        let ticks = nice_ticks(-0.7, 3.29, 6);
        assert!(ticks.iter().all(|t| *t >= -0.7 && *t <= 3.29), "{ticks:?}");
        assert_eq!(nice_ticks(3.0, 3.0, 7), vec![3.0]);
        assert!(nice_ticks(0.0, 1.0, 0).is_empty());
    }
}
