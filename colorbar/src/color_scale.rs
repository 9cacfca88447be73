// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-supplied color scales.
//!
//! A [`ColorScale`] is the input a host hands to the colorbar: a domain plus a way of turning
//! domain values into colors. Whether the scale is continuous or discrete is an explicit tag,
//! fixed at construction.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use peniko::Color;

use crate::domain::{Domain, extent};

/// Whether a scale maps a numeric interval or a finite set of categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaleKind {
    /// Numeric domain rendered as a gradient.
    Continuous,
    /// Categorical domain rendered as equal-width swatches.
    Discrete,
}

/// A function mapping a numeric domain value to a color.
pub type ColorInterpolator = Arc<dyn Fn(f64) -> Color>;

/// Componentwise sRGB (and alpha) interpolation between `a` and `b`.
///
/// `t` is clamped to `[0, 1]`; non-finite `t` yields `a`.
pub fn lerp_srgb(a: Color, b: Color, t: f64) -> Color {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    #[allow(
        clippy::cast_possible_truncation,
        reason = "t is clamped to [0, 1], well within f32 precision needs for color"
    )]
    let t = t as f32;
    let mut out = [0.0_f32; 4];
    for (i, c) in out.iter_mut().enumerate() {
        *c = a.components[i] + (b.components[i] - a.components[i]) * t;
    }
    Color::new(out)
}

/// A continuous color scale: numeric domain samples plus a color function.
///
/// The color function is kept even when an explicit range is supplied, so a later domain
/// replacement can resample colors over the new extent.
#[derive(Clone)]
pub struct ContinuousColorScale {
    domain: Vec<f64>,
    range: Option<Vec<Color>>,
    interpolator: ColorInterpolator,
}

impl fmt::Debug for ContinuousColorScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContinuousColorScale")
            .field("domain", &self.domain)
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}

impl ContinuousColorScale {
    /// Creates a scale from raw domain samples and a color function.
    pub fn new(domain: impl Into<Vec<f64>>, interpolator: impl Fn(f64) -> Color + 'static) -> Self {
        Self {
            domain: domain.into(),
            range: None,
            interpolator: Arc::new(interpolator),
        }
    }

    /// Creates a two-color scale blending `from` → `to` across the domain extent.
    pub fn between(domain: impl Into<Vec<f64>>, from: Color, to: Color) -> Self {
        let domain = domain.into();
        let (min, max) = extent(&domain).unwrap_or((0.0, 1.0));
        let span = max - min;
        Self::new(domain, move |v| {
            let t = if span == 0.0 { 0.0 } else { (v - min) / span };
            lerp_srgb(from, to, t)
        })
    }

    /// Creates a piecewise scale: `colors[i]` at `domain[i]`, blended in between.
    ///
    /// The colors are also used verbatim as the explicit range.
    pub fn piecewise(domain: impl Into<Vec<f64>>, colors: impl Into<Vec<Color>>) -> Self {
        let domain = domain.into();
        let colors = colors.into();
        let mut stops: Vec<(f64, Color)> = domain
            .iter()
            .copied()
            .zip(colors.iter().copied())
            .filter(|(d, _)| d.is_finite())
            .collect();
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        let fallback = colors.first().copied().unwrap_or(Color::TRANSPARENT);
        Self {
            domain,
            range: Some(colors),
            interpolator: Arc::new(move |v| piecewise_color(&stops, v).unwrap_or(fallback)),
        }
    }

    /// Sets an explicit color range, used verbatim as gradient stops.
    pub fn with_range(mut self, colors: impl Into<Vec<Color>>) -> Self {
        self.range = Some(colors.into());
        self
    }

    /// The raw domain samples.
    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    /// The explicit color range, if any.
    pub fn range(&self) -> Option<&[Color]> {
        self.range.as_deref()
    }

    /// Evaluate the color function at `value`.
    pub fn color_at(&self, value: f64) -> Color {
        (self.interpolator)(value)
    }
}

fn piecewise_color(stops: &[(f64, Color)], v: f64) -> Option<Color> {
    let (first, last) = (stops.first()?, stops.last()?);
    if v <= first.0 {
        return Some(first.1);
    }
    if v >= last.0 {
        return Some(last.1);
    }
    let i = stops.partition_point(|(d, _)| *d <= v);
    let (d0, c0) = stops[i - 1];
    let (d1, c1) = stops[i];
    let span = d1 - d0;
    let t = if span == 0.0 { 0.0 } else { (v - d0) / span };
    Some(lerp_srgb(c0, c1, t))
}

/// A discrete color scale: one color per category.
#[derive(Clone, Debug, PartialEq)]
pub struct DiscreteColorScale {
    domain: Vec<String>,
    range: Vec<Color>,
}

impl DiscreteColorScale {
    /// Creates a scale from categories and their colors (in the same order).
    pub fn new<I, S>(categories: I, colors: impl Into<Vec<Color>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domain: categories.into_iter().map(Into::into).collect(),
            range: colors.into(),
        }
    }

    /// The categories, in display order.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// The colors, in display order.
    pub fn range(&self) -> &[Color] {
        &self.range
    }

    /// Color for `category`, if it is part of the domain.
    pub fn color_of(&self, category: &str) -> Option<Color> {
        let i = self.domain.iter().position(|c| c == category)?;
        self.range.get(i).copied()
    }
}

/// The color scale a colorbar is built from.
#[derive(Clone, Debug)]
pub enum ColorScale {
    /// Gradient legend over a numeric domain.
    Continuous(ContinuousColorScale),
    /// Swatch legend over categories.
    Discrete(DiscreteColorScale),
}

impl ColorScale {
    /// The kind of this scale.
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Continuous(_) => ScaleKind::Continuous,
            Self::Discrete(_) => ScaleKind::Discrete,
        }
    }

    /// The scale's own domain.
    pub fn domain(&self) -> Domain {
        match self {
            Self::Continuous(s) => Domain::Continuous(s.domain.clone()),
            Self::Discrete(s) => Domain::Discrete(s.domain.clone()),
        }
    }
}

impl From<ContinuousColorScale> for ColorScale {
    fn from(value: ContinuousColorScale) -> Self {
        Self::Continuous(value)
    }
}

impl From<DiscreteColorScale> for ColorScale {
    fn from(value: DiscreteColorScale) -> Self {
        Self::Discrete(value)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn lerp_hits_endpoints_and_clamps() {
        let a = Color::from_rgb8(0, 0, 0);
        let b = Color::from_rgb8(255, 255, 255);
        assert_eq!(lerp_srgb(a, b, 0.0), a);
        assert_eq!(lerp_srgb(a, b, 1.0), b);
        assert_eq!(lerp_srgb(a, b, 2.0), b);
        assert_eq!(lerp_srgb(a, b, f64::NAN), a);
        assert_eq!(lerp_srgb(a, b, 0.5).to_rgba8().r, 128);
    }

    #[test]
    fn between_uses_domain_extent_regardless_of_order() {
        let s = ContinuousColorScale::between(vec![100.0, 0.0], css::BLACK, css::WHITE);
        assert_eq!(s.color_at(0.0), css::BLACK);
        assert_eq!(s.color_at(100.0), css::WHITE);
    }

    #[test]
    fn piecewise_blends_between_stops() {
        let s = ContinuousColorScale::piecewise(vec![0.0, 10.0, 20.0], vec![
            css::BLACK,
            css::WHITE,
            css::BLACK,
        ]);
        assert_eq!(s.range().map(<[Color]>::len), Some(3));
        assert_eq!(s.color_at(10.0), css::WHITE);
        assert_eq!(s.color_at(-5.0), css::BLACK);
        assert_eq!(s.color_at(15.0).to_rgba8().r, 128);
    }

    #[test]
    fn discrete_lookup_by_category() {
        let s = DiscreteColorScale::new(["a", "b"], vec![css::RED, css::BLUE]);
        assert_eq!(s.color_of("b"), Some(css::BLUE));
        assert_eq!(s.color_of("c"), None);
        assert_eq!(ColorScale::from(s).kind(), ScaleKind::Discrete);
    }
}
