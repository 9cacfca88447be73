// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bottom axis generation.
//!
//! The colorbar draws a single axis under the bar. Tick selection happens against a
//! [`PixelScale`] (so ticks are always in the bar's drawable-local pixel space), and mark
//! generation places the resulting ticks under a bar rectangle in scene coordinates.
//!
//! No domain line is drawn: the bar border already outlines the axis extent.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use colorbar_scene::{Mark, MarkId, TextAnchor, TextBaseline};
use kurbo::Rect;
use log::warn;
use peniko::Brush;
use peniko::color::palette::css;

use crate::domain::Datum;
use crate::format::{TickFormatter, format_datum};
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{PixelScale, nice_ticks};
use crate::z_order;

/// A paint + width pair for stroked paths (ticks, borders, markers).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::GRAY, 1.0)
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            label_fill: rule.brush.clone(),
            rule,
            label_font_size: 10.0,
        }
    }
}

/// A tick selected for display.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    /// The tick's domain value.
    pub value: Datum,
    /// Offset from the left edge of the bar, in pixels.
    pub x: f64,
    /// Formatted label.
    pub label: String,
}

/// A bottom axis specification.
#[derive(Clone)]
pub struct AxisSpec {
    /// Stable-id base. Tick `i` uses `id_base + 1 + 2i` and its label `id_base + 2 + 2i`, so
    /// an axis with `n` ticks occupies `id_base + 1 ..= id_base + 2n`.
    pub id_base: u64,
    /// Approximate number of ticks for continuous scales.
    ///
    /// This is a hint: the nice-step algorithm may return a nearby count.
    pub tick_count: usize,
    /// Tick line length (in pixels), drawn downward from the bar's bottom edge.
    pub tick_size: f64,
    /// Padding between the tick end and the tick label.
    pub tick_padding: f64,
    /// Explicit tick values overriding automatic tick selection.
    pub tick_values: Option<Vec<Datum>>,
    /// Optional tick label formatter.
    ///
    /// The second argument is the tick step (best-effort; `0` for categories), which can be
    /// used for consistent decimal formatting.
    pub tick_formatter: Option<TickFormatter>,
    /// Axis styling.
    pub style: AxisStyle,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("id_base", &self.id_base)
            .field("tick_count", &self.tick_count)
            .field("tick_size", &self.tick_size)
            .field("tick_padding", &self.tick_padding)
            .field("tick_values", &self.tick_values)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .field("style", &self.style)
            .finish()
    }
}

impl AxisSpec {
    /// Creates a bottom axis with the colorbar defaults.
    ///
    /// The returned axis has:
    /// - `tick_count = 7`
    /// - `tick_size = 0` (the layout sets it to half the bar height)
    /// - `tick_padding = 3`
    /// - `style = AxisStyle::default()`
    /// - no explicit tick values and no custom formatter.
    pub fn bottom(id_base: u64) -> Self {
        Self {
            id_base,
            tick_count: 7,
            tick_size: 0.0,
            tick_padding: 3.0,
            tick_values: None,
            tick_formatter: None,
            style: AxisStyle::default(),
        }
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set the tick length.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Set the tick label padding.
    pub fn with_tick_padding(mut self, tick_padding: f64) -> Self {
        self.tick_padding = tick_padding;
        self
    }

    /// Use a fixed list of tick values instead of automatic selection.
    pub fn with_tick_values(mut self, values: impl Into<Vec<Datum>>) -> Self {
        self.tick_values = Some(values.into());
        self
    }

    /// Set a custom tick label formatter.
    pub fn with_tick_formatter(mut self, f: Option<TickFormatter>) -> Self {
        self.tick_formatter = f;
        self
    }

    /// Set the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Selects and formats ticks for `scale` instantiated over `[0, width]`.
    ///
    /// Continuous ticks falling outside the bar are dropped. Discrete ticks sit at band
    /// centers; explicit values naming unknown categories are dropped with a warning.
    pub fn ticks(&self, scale: &PixelScale, width: f64) -> Vec<AxisTick> {
        let (values, step) = self.tick_values(scale);
        let eps = 1.0e-9;
        let mut out = Vec::with_capacity(values.len());
        for value in values {
            let x = match scale {
                PixelScale::Continuous { .. } => scale.map(&value),
                PixelScale::Discrete { .. } => scale
                    .map(&value)
                    .map(|x0| x0 + 0.5 * scale.band_width()),
            };
            let Some(x) = x else {
                warn!("colorbar: ignoring tick value {value:?} not in the scale domain");
                continue;
            };
            if x < -eps || x > width + eps {
                continue;
            }
            let label = self.format_tick(&value, step);
            out.push(AxisTick { value, x, label });
        }
        out
    }

    fn tick_values(&self, scale: &PixelScale) -> (Vec<Datum>, f64) {
        match scale {
            PixelScale::Continuous { extent, .. } => {
                let numbers: Vec<f64> = match &self.tick_values {
                    Some(values) => values
                        .iter()
                        .filter_map(|value| {
                            let number = value.as_number();
                            if number.is_none() {
                                warn!("colorbar: ignoring non-numeric tick value {value:?}");
                            }
                            number
                        })
                        .collect(),
                    None => nice_ticks(extent.0, extent.1, self.tick_count),
                };
                let step = tick_step(&numbers);
                (numbers.into_iter().map(Datum::Number).collect(), step)
            }
            PixelScale::Discrete { categories, .. } => {
                let values = match &self.tick_values {
                    Some(values) => values.clone(),
                    None => categories.iter().cloned().map(Datum::Category).collect(),
                };
                (values, 0.0)
            }
        }
    }

    fn format_tick(&self, value: &Datum, step: f64) -> String {
        match &self.tick_formatter {
            Some(f) => (f)(value, step),
            None => format_datum(value, step),
        }
    }

    /// Ids of the rule and label for tick `i`, interleaved so no tick count can collide.
    fn tick_ids(&self, i: usize) -> (MarkId, MarkId) {
        let rule = MarkId::from_raw(self.id_base + 1 + 2 * i as u64);
        (rule, rule.offset(1))
    }

    /// Generates tick and label marks under `bar` (scene coordinates).
    pub fn marks(&self, ticks: &[AxisTick], bar: Rect) -> Vec<Mark> {
        let y = bar.y1;
        let tick_size = self.tick_size.abs();
        let label_y = y + tick_size + self.tick_padding.max(0.0);

        let mut out = Vec::with_capacity(ticks.len() * 2);
        for (i, tick) in ticks.iter().enumerate() {
            let x = bar.x0 + tick.x;
            let (rule_id, label_id) = self.tick_ids(i);
            out.push(
                RuleMarkSpec::vertical(rule_id, x, y, y + tick_size)
                    .with_stroke(self.style.rule.brush.clone(), self.style.rule.stroke_width)
                    .with_z_index(z_order::AXIS_RULES)
                    .mark(),
            );
            out.push(
                Mark::builder(label_id)
                    .text()
                    .z_index(z_order::AXIS_LABELS)
                    .position((x, label_y))
                    .content(tick.label.clone())
                    .text_anchor(TextAnchor::Middle)
                    .text_baseline(TextBaseline::Hanging)
                    .font_size(self.style.label_font_size)
                    .fill(self.style.label_fill.clone())
                    .build(),
            );
        }
        out
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    let step = ticks
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .filter(|d| *d > 0.0)
        .fold(f64::INFINITY, f64::min);
    if step.is_finite() { step } else { 0.0 }
}
