// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A horizontal color legend built from `colorbar_scene` marks.
//!
//! A colorbar shows how data values map to colors: a gradient (continuous scales) or a row of
//! swatches (discrete scales), a bottom axis with tick labels, and an optional marker pointing
//! at a "current" value.
//!
//! The crate is split along the two halves of the problem:
//! - **Scale resolution** ([`ScaleResolver`]) turns a host [`ColorScale`] into the colors to
//!   display and a unit-space [`PixelScaleSpec`]. It runs at construction and on every
//!   [`HorizontalColorbar::set_domain`].
//! - **Layout** ([`ColorbarLayout`], [`AxisSpec`]) turns the resolved scale and the container
//!   size into geometry and marks on every [`HorizontalColorbar::render`].
//!
//! Rendering is diff-based: the widget owns a [`colorbar_scene::Scene`] and returns
//! `Enter`/`Update`/`Exit` diffs for a renderer to apply.
//!
//! ```
//! use colorbar::{ColorbarOptions, ContinuousColorScale, Datum, HorizontalColorbar};
//! use kurbo::Size;
//! use peniko::color::palette::css;
//!
//! let scale = ContinuousColorScale::between(vec![0.0, 100.0], css::BLACK, css::WHITE);
//! let mut bar = HorizontalColorbar::new(scale, ColorbarOptions::default())?;
//! let diffs = bar.render(Size::new(226.0, 40.0));
//! assert!(!diffs.is_empty());
//!
//! bar.set_marker(Some(Datum::Number(50.0)));
//! assert_eq!(bar.marker().x, 100.0);
//! # Ok::<(), colorbar::ColorbarError>(())
//! ```

#![no_std]

extern crate alloc;

mod axis;
mod color_scale;
mod domain;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod layout;
mod rect_mark;
mod resolve;
mod rule_mark;
mod scale;
mod widget;
mod z_order;

pub use axis::{AxisSpec, AxisStyle, AxisTick, StrokeStyle};
pub use color_scale::{
    ColorInterpolator, ColorScale, ContinuousColorScale, DiscreteColorScale, ScaleKind, lerp_srgb,
};
pub use domain::{Datum, Domain, extent};
pub use error::ColorbarError;
pub use format::{TickFormatter, format_datum, format_tick_with_step};
pub use kurbo::Size;
pub use layout::{ColorbarConfig, ColorbarLayout, ColorbarStyle};
pub use rect_mark::RectMarkSpec;
pub use resolve::{COLOR_SAMPLES, ColorbarState, ResolvedScale, ScaleResolver};
pub use rule_mark::RuleMarkSpec;
pub use scale::{PixelScale, PixelScaleSpec, ScaleBand, ScaleLinear, ScalePiecewise, nice_ticks};
pub use widget::{
    BarFill, ColorbarGeometry, ColorbarOptions, GradientStop, HorizontalColorbar, MarkerState,
    Swatch,
};
pub use z_order::*;
