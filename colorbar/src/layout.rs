// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Colorbar configuration and drawable-area arrangement.
//!
//! The container is split into a drawable bar area and surrounding padding: horizontal
//! padding leaves room for the first/last tick labels, vertical padding for the axis.

use kurbo::{Rect, Size};
use log::warn;
use peniko::Brush;
use peniko::color::palette::css;

use crate::axis::AxisStyle;

/// Numeric layout configuration.
///
/// All lengths are in scene units (pixels).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ColorbarConfig {
    /// Horizontal padding on each side of the bar.
    pub padding_x: f64,
    /// Vertical padding (counted twice: both are reserved below the bar for the axis).
    pub padding_y: f64,
    /// Approximate number of axis ticks for continuous scales.
    pub tick_count: usize,
    /// Gap between a tick's end and its label.
    pub tick_padding: f64,
    /// Border stroke width.
    pub border_width: f64,
    /// Marker stroke width.
    pub marker_width: f64,
    /// Tick label font size.
    pub label_font_size: f64,
}

impl Default for ColorbarConfig {
    fn default() -> Self {
        Self {
            padding_x: 13.0,
            padding_y: 10.0,
            tick_count: 7,
            tick_padding: 3.0,
            border_width: 1.0,
            marker_width: 2.0,
            label_font_size: 10.0,
        }
    }
}

impl ColorbarConfig {
    /// Set both paddings.
    pub fn with_padding(mut self, padding_x: f64, padding_y: f64) -> Self {
        self.padding_x = padding_x;
        self.padding_y = padding_y;
        self
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set the tick label padding.
    pub fn with_tick_padding(mut self, tick_padding: f64) -> Self {
        self.tick_padding = tick_padding;
        self
    }

    /// Set the border stroke width.
    pub fn with_border_width(mut self, border_width: f64) -> Self {
        self.border_width = border_width;
        self
    }

    /// Set the marker stroke width.
    pub fn with_marker_width(mut self, marker_width: f64) -> Self {
        self.marker_width = marker_width;
        self
    }

    /// Set the tick label font size.
    pub fn with_label_font_size(mut self, label_font_size: f64) -> Self {
        self.label_font_size = label_font_size;
        self
    }
}

/// Paints used by the colorbar.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorbarStyle {
    /// Border paint.
    pub border: Brush,
    /// Marker paint.
    pub marker: Brush,
    /// Tick and label paints.
    pub axis: AxisStyle,
}

impl Default for ColorbarStyle {
    fn default() -> Self {
        Self {
            border: Brush::Solid(css::GRAY),
            marker: Brush::Solid(css::GRAY),
            axis: AxisStyle::default(),
        }
    }
}

impl ColorbarStyle {
    /// Set the border paint.
    pub fn with_border(mut self, border: impl Into<Brush>) -> Self {
        self.border = border.into();
        self
    }

    /// Set the marker paint.
    pub fn with_marker(mut self, marker: impl Into<Brush>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Set the axis style.
    pub fn with_axis(mut self, axis: AxisStyle) -> Self {
        self.axis = axis;
        self
    }

    /// The axis style with the label font size taken from `config`.
    pub(crate) fn axis_for(&self, config: &ColorbarConfig) -> AxisStyle {
        AxisStyle {
            label_font_size: config.label_font_size,
            ..self.axis.clone()
        }
    }
}

/// The container split into a drawable bar area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorbarLayout {
    /// The container size this layout was computed for.
    pub size: Size,
    /// The bar's drawable area in container coordinates.
    pub drawable: Rect,
    /// The container was too small to fit the padding; the drawable area was clamped.
    pub degenerate: bool,
}

impl ColorbarLayout {
    /// Computes the drawable area for a container of `size`.
    ///
    /// The bar starts at `(padding_x, 0)` and is `size - 2 * padding` large. A non-positive
    /// result is clamped to zero and reported with a warning rather than as an error.
    pub fn arrange(size: Size, config: &ColorbarConfig) -> Self {
        let raw_w = size.width - 2.0 * config.padding_x;
        let raw_h = size.height - 2.0 * config.padding_y;
        let degenerate = raw_w.is_nan() || raw_h.is_nan() || raw_w <= 0.0 || raw_h <= 0.0;
        if degenerate {
            warn!(
                "colorbar: container {}x{} leaves no drawable area; clamping to zero",
                size.width, size.height
            );
        }
        let w = if raw_w > 0.0 { raw_w } else { 0.0 };
        let h = if raw_h > 0.0 { raw_h } else { 0.0 };
        let x0 = config.padding_x;
        Self {
            size,
            drawable: Rect::new(x0, 0.0, x0 + w, h),
            degenerate,
        }
    }

    /// Drawable width.
    pub fn width(&self) -> f64 {
        self.drawable.width()
    }

    /// Drawable height.
    pub fn height(&self) -> f64 {
        self.drawable.height()
    }

    /// Axis tick length: half the bar height.
    pub fn tick_size(&self) -> f64 {
        0.5 * self.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_padding_is_subtracted_twice() {
        let layout = ColorbarLayout::arrange(Size::new(226.0, 40.0), &ColorbarConfig::default());
        assert_eq!(layout.drawable, Rect::new(13.0, 0.0, 213.0, 20.0));
        assert_eq!(layout.width(), 200.0);
        assert_eq!(layout.tick_size(), 10.0);
        assert!(!layout.degenerate);
    }

    #[test]
    fn small_container_clamps_to_zero() {
        let config = ColorbarConfig::default();
        for size in [Size::new(20.0, 40.0), Size::new(226.0, 20.0), Size::ZERO] {
            let layout = ColorbarLayout::arrange(size, &config);
            assert!(layout.degenerate, "{size:?}");
            assert!(layout.width() >= 0.0 && layout.height() >= 0.0);
        }
        let layout = ColorbarLayout::arrange(Size::new(10.0, 10.0), &config);
        assert_eq!(layout.drawable, Rect::new(13.0, 0.0, 13.0, 0.0));
    }

    #[test]
    fn builders_override_defaults() {
        let config = ColorbarConfig::default()
            .with_padding(0.0, 0.0)
            .with_tick_count(3);
        let layout = ColorbarLayout::arrange(Size::new(50.0, 8.0), &config);
        assert_eq!(layout.drawable, Rect::new(0.0, 0.0, 50.0, 8.0));
        assert_eq!(config.tick_count, 3);
    }
}
