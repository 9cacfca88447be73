// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale resolution.
//!
//! Resolution turns a host [`ColorScale`] (plus, on domain replacement, a new [`Domain`]) into
//! the colors the bar displays and a unit-space [`PixelScaleSpec`]. It runs once at
//! construction and again on every domain replacement; rendering only ever reads its output.

extern crate alloc;

use alloc::vec::Vec;

use log::debug;
use peniko::Color;

use crate::color_scale::{ColorScale, ScaleKind};
use crate::domain::{Datum, Domain, extent};
use crate::error::ColorbarError;
use crate::scale::PixelScaleSpec;

/// Number of colors sampled from a continuous color function when no explicit range is given.
pub const COLOR_SAMPLES: usize = 10;

/// The output of resolving a color scale against a domain.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedScale {
    /// Continuous or discrete, fixed by the color scale.
    pub kind: ScaleKind,
    /// The domain as supplied (unsorted continuous samples are kept as-is).
    pub domain: Domain,
    /// Colors to display: gradient stops or one swatch per category.
    pub colors: Vec<Color>,
    /// Unit-space pixel scale, instantiated against the drawable width at render time.
    pub pixel_scale: PixelScaleSpec,
}

/// Resolves color scales into display colors and pixel scales.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScaleResolver;

impl ScaleResolver {
    /// Resolves `scale`, optionally against a replacement `domain`.
    ///
    /// With `domain = None` the scale's own domain and explicit range are used. A replacement
    /// domain drops the explicit range of a continuous scale (colors are resampled over the new
    /// extent); a discrete scale keeps its colors, which must still match the category count.
    pub fn resolve(
        scale: &ColorScale,
        domain: Option<&Domain>,
    ) -> Result<ResolvedScale, ColorbarError> {
        if let Some(domain) = domain
            && domain.kind() != scale.kind()
        {
            return Err(ColorbarError::KindMismatch {
                expected: scale.kind(),
                actual: domain.kind(),
            });
        }

        let resolved = match scale {
            ColorScale::Continuous(s) => {
                let samples = match domain {
                    Some(Domain::Continuous(values)) => values.clone(),
                    _ => s.domain().to_vec(),
                };
                let (min, max) = extent(&samples).ok_or(ColorbarError::EmptyDomain)?;
                let explicit = if domain.is_none() { s.range() } else { None };
                let colors = match explicit {
                    Some([]) => {
                        return Err(ColorbarError::MismatchedRange {
                            domain_len: samples.len(),
                            range_len: 0,
                        });
                    }
                    Some(colors) => colors.to_vec(),
                    None => sample_colors(min, max, |v| s.color_at(v)),
                };
                let pixel_scale =
                    PixelScaleSpec::continuous(&samples).ok_or(ColorbarError::EmptyDomain)?;
                ResolvedScale {
                    kind: ScaleKind::Continuous,
                    domain: Domain::Continuous(samples),
                    colors,
                    pixel_scale,
                }
            }
            ColorScale::Discrete(s) => {
                let categories = match domain {
                    Some(Domain::Discrete(categories)) => categories.clone(),
                    _ => s.domain().to_vec(),
                };
                if categories.is_empty() {
                    return Err(ColorbarError::EmptyDomain);
                }
                let colors = s.range();
                if colors.len() != categories.len() {
                    return Err(ColorbarError::MismatchedRange {
                        domain_len: categories.len(),
                        range_len: colors.len(),
                    });
                }
                ResolvedScale {
                    kind: ScaleKind::Discrete,
                    domain: Domain::Discrete(categories.clone()),
                    colors: colors.to_vec(),
                    pixel_scale: PixelScaleSpec::discrete(categories),
                }
            }
        };
        debug!(
            "colorbar: resolved {:?} scale with {} domain values and {} colors",
            resolved.kind,
            resolved.domain.len(),
            resolved.colors.len()
        );
        Ok(resolved)
    }
}

/// Samples `f` at [`COLOR_SAMPLES`] evenly spaced points across `[min, max]`.
fn sample_colors(min: f64, max: f64, f: impl Fn(f64) -> Color) -> Vec<Color> {
    let last = (COLOR_SAMPLES - 1) as f64;
    (0..COLOR_SAMPLES)
        .map(|i| {
            let t = i as f64 / last;
            f(min * (1.0 - t) + max * t)
        })
        .collect()
}

/// The widget's owned state: the host scale, its current resolution, and the marker value.
#[derive(Clone, Debug)]
pub struct ColorbarState {
    color_scale: ColorScale,
    resolved: ResolvedScale,
    marker: Option<Datum>,
}

impl ColorbarState {
    /// Resolves `color_scale` against its own domain.
    pub fn new(color_scale: ColorScale) -> Result<Self, ColorbarError> {
        let resolved = ScaleResolver::resolve(&color_scale, None)?;
        Ok(Self {
            color_scale,
            resolved,
            marker: None,
        })
    }

    /// Replaces the domain and re-resolves.
    ///
    /// On error the previous resolution is left untouched.
    pub fn replace_domain(&mut self, domain: &Domain) -> Result<(), ColorbarError> {
        let next = ScaleResolver::resolve(&self.color_scale, Some(domain))?;
        self.resolved = next;
        Ok(())
    }

    /// The current resolution.
    pub fn resolved(&self) -> &ResolvedScale {
        &self.resolved
    }

    /// The host color scale this state was built from.
    pub fn color_scale(&self) -> &ColorScale {
        &self.color_scale
    }

    /// The current marker value.
    pub fn marker(&self) -> Option<&Datum> {
        self.marker.as_ref()
    }

    /// Sets or clears the marker value.
    pub fn set_marker(&mut self, marker: Option<Datum>) {
        self.marker = marker;
    }
}
