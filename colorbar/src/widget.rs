// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The horizontal colorbar widget.
//!
//! [`HorizontalColorbar`] owns its resolved scale state and a [`Scene`]. Every render computes a
//! [`ColorbarGeometry`] for the current container size, turns it into marks, and returns the
//! diffs against the previous frame. Marker updates touch only the marker mark.
//!
//! Mark ids are fixed per role so that re-renders update marks in place. Each role owns a
//! disjoint id range, whatever the number of swatches or ticks:
//!
//! | Role | Id |
//! |---|---|
//! | gradient bar | `1` |
//! | border | `2` |
//! | marker | `3` |
//! | swatch `i` | `2^32 + i` |
//! | tick `i` / label `i` | `2^33 + 1 + 2i` / `2^33 + 2 + 2i` |

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use colorbar_scene::{Mark, MarkDiff, MarkId, Scene};
use kurbo::{Rect, Size};
use log::{debug, warn};
use peniko::{Brush, Color};

use crate::axis::{AxisSpec, AxisTick};
use crate::color_scale::{ColorScale, ScaleKind};
use crate::domain::{Datum, Domain};
use crate::error::ColorbarError;
use crate::format::TickFormatter;
use crate::layout::{ColorbarConfig, ColorbarLayout, ColorbarStyle};
use crate::rect_mark::RectMarkSpec;
use crate::resolve::ColorbarState;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::PixelScale;
use crate::z_order;

const BAR_ID: MarkId = MarkId::from_raw(1);
const BORDER_ID: MarkId = MarkId::from_raw(2);
const MARKER_ID: MarkId = MarkId::from_raw(3);
const SWATCH_ID_BASE: MarkId = MarkId::from_raw(1 << 32);
const AXIS_ID_BASE: u64 = 1 << 33;

/// Construction options for [`HorizontalColorbar`].
#[derive(Clone, Default)]
pub struct ColorbarOptions {
    /// Numeric layout configuration.
    pub config: ColorbarConfig,
    /// Paints.
    pub style: ColorbarStyle,
    /// Custom tick label formatter.
    pub tick_format: Option<TickFormatter>,
    /// Explicit tick values, overriding automatic selection.
    pub tick_values: Option<Vec<Datum>>,
}

impl fmt::Debug for ColorbarOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorbarOptions")
            .field("config", &self.config)
            .field("style", &self.style)
            .field("tick_format", &self.tick_format.is_some())
            .field("tick_values", &self.tick_values)
            .finish()
    }
}

impl ColorbarOptions {
    /// Set the layout configuration.
    pub fn with_config(mut self, config: ColorbarConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the paints.
    pub fn with_style(mut self, style: ColorbarStyle) -> Self {
        self.style = style;
        self
    }

    /// Set a custom tick label formatter.
    pub fn with_tick_format(mut self, f: impl Fn(&Datum, f64) -> String + 'static) -> Self {
        self.tick_format = Some(Arc::new(f));
        self
    }

    /// Use a fixed list of tick values.
    pub fn with_tick_values(mut self, values: impl Into<Vec<Datum>>) -> Self {
        self.tick_values = Some(values.into());
        self
    }
}

/// One gradient stop: an offset in `[0, 1]` along the bar and its color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Fractional position along the bar.
    pub offset: f64,
    /// Stop color.
    pub color: Color,
}

/// One discrete swatch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Swatch {
    /// Swatch rectangle in container coordinates.
    pub rect: Rect,
    /// Fill color.
    pub color: Color,
}

/// How the bar is filled.
#[derive(Clone, Debug, PartialEq)]
pub enum BarFill {
    /// A single rectangle with a left-to-right gradient.
    Gradient(Vec<GradientStop>),
    /// Equal-width swatches, left to right in domain order.
    Swatches(Vec<Swatch>),
}

/// Marker placement in drawable-local pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MarkerState {
    /// Whether the marker is shown.
    pub visible: bool,
    /// Offset of the marker (continuous) or its band's left edge (discrete).
    pub x: f64,
    /// Band width for discrete markers; `0` for the continuous marker line.
    pub width: f64,
}

/// Everything computed by one render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorbarGeometry {
    /// Container split into the drawable area.
    pub layout: ColorbarLayout,
    /// Gradient stops or swatches.
    pub fill: BarFill,
    /// Border rectangle (the drawable area).
    pub border: Rect,
    /// Axis ticks, offsets relative to the drawable area.
    pub ticks: Vec<AxisTick>,
    /// Marker placement.
    pub marker: MarkerState,
}

/// A horizontal color legend: a gradient or swatch bar, a bottom axis, and an optional marker.
pub struct HorizontalColorbar {
    state: ColorbarState,
    options: ColorbarOptions,
    scene: Scene,
    geometry: Option<ColorbarGeometry>,
}

impl fmt::Debug for HorizontalColorbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HorizontalColorbar")
            .field("state", &self.state)
            .field("options", &self.options)
            .field("scene", &self.scene)
            .field("rendered", &self.geometry.is_some())
            .finish()
    }
}

impl HorizontalColorbar {
    /// Resolves `color_scale` and builds an unrendered colorbar.
    pub fn new(
        color_scale: impl Into<ColorScale>,
        options: ColorbarOptions,
    ) -> Result<Self, ColorbarError> {
        Ok(Self {
            state: ColorbarState::new(color_scale.into())?,
            options,
            scene: Scene::new(),
            geometry: None,
        })
    }

    /// Lays out the colorbar for a container of `size` and returns the mark diffs.
    ///
    /// Rendering never fails: a container smaller than the padding renders a zero-size bar.
    pub fn render(&mut self, size: Size) -> Vec<MarkDiff> {
        let config = &self.options.config;
        let layout = ColorbarLayout::arrange(size, config);
        let resolved = self.state.resolved();
        let pixel = resolved.pixel_scale.instantiate(layout.width());

        let fill = match &pixel {
            PixelScale::Continuous { .. } => BarFill::Gradient(gradient_stops(&resolved.colors)),
            PixelScale::Discrete { bands, .. } => BarFill::Swatches(
                resolved
                    .colors
                    .iter()
                    .enumerate()
                    .map(|(i, color)| {
                        let x0 = layout.drawable.x0 + bands.x(i);
                        Swatch {
                            rect: Rect::new(
                                x0,
                                layout.drawable.y0,
                                x0 + bands.band_width(),
                                layout.drawable.y1,
                            ),
                            color: *color,
                        }
                    })
                    .collect(),
            ),
        };
        let ticks = self.axis(&layout).ticks(&pixel, layout.width());
        let marker = place_marker(&pixel, self.state.marker());

        let geometry = ColorbarGeometry {
            layout,
            fill,
            border: layout.drawable,
            ticks,
            marker,
        };
        let marks = self.marks(&geometry);
        let diffs = self.scene.set_marks(marks);
        debug!(
            "colorbar: rendered {}x{} ({} diffs)",
            size.width,
            size.height,
            diffs.len()
        );
        self.geometry = Some(geometry);
        diffs
    }

    /// Replaces the domain and re-resolves colors and the pixel scale.
    ///
    /// Does not render. On error nothing changes.
    pub fn set_domain(&mut self, domain: Domain) -> Result<(), ColorbarError> {
        self.state.replace_domain(&domain)
    }

    /// Shows the marker at `value`, or hides it for `None`.
    ///
    /// Placement uses the current scale and the last rendered size; before the first render
    /// the value is only stored. Values outside the scale's domain (unknown categories,
    /// non-finite numbers) hide the marker.
    pub fn set_marker(&mut self, value: Option<Datum>) -> Vec<MarkDiff> {
        self.state.set_marker(value);
        let Some(pixel) = self.pixel_scale() else {
            return Vec::new();
        };
        let marker = place_marker(&pixel, self.state.marker());
        let Some(geometry) = &mut self.geometry else {
            return Vec::new();
        };
        geometry.marker = marker;
        self.sync_marker()
    }

    /// Sets the marker paint.
    pub fn set_marker_color(&mut self, color: Color) -> Vec<MarkDiff> {
        self.options.style.marker = Brush::Solid(color);
        self.sync_marker()
    }

    /// The current domain.
    pub fn domain(&self) -> &Domain {
        &self.state.resolved().domain
    }

    /// The colors shown: gradient stops or one per swatch.
    pub fn colors(&self) -> &[Color] {
        &self.state.resolved().colors
    }

    /// Continuous or discrete.
    pub fn kind(&self) -> ScaleKind {
        self.state.resolved().kind
    }

    /// The marker value last passed to [`Self::set_marker`].
    pub fn marker_value(&self) -> Option<&Datum> {
        self.state.marker()
    }

    /// Marker placement; hidden before the first render.
    pub fn marker(&self) -> MarkerState {
        self.geometry
            .as_ref()
            .map(|g| g.marker)
            .unwrap_or_default()
    }

    /// Geometry from the last render.
    pub fn geometry(&self) -> Option<&ColorbarGeometry> {
        self.geometry.as_ref()
    }

    /// The current pixel scale bound to the last rendered width.
    pub fn pixel_scale(&self) -> Option<PixelScale> {
        let width = self.geometry.as_ref()?.layout.width();
        Some(self.state.resolved().pixel_scale.instantiate(width))
    }

    /// The construction options (with any marker color change applied).
    pub fn options(&self) -> &ColorbarOptions {
        &self.options
    }

    /// The mark set produced by the last render, in paint order.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    fn axis(&self, layout: &ColorbarLayout) -> AxisSpec {
        let config = &self.options.config;
        AxisSpec {
            tick_values: self.options.tick_values.clone(),
            ..AxisSpec::bottom(AXIS_ID_BASE)
                .with_tick_count(config.tick_count)
                .with_tick_size(layout.tick_size())
                .with_tick_padding(config.tick_padding)
                .with_tick_formatter(self.options.tick_format.clone())
                .with_style(self.options.style.axis_for(config))
        }
    }

    fn marks(&self, geometry: &ColorbarGeometry) -> Vec<Mark> {
        let config = &self.options.config;
        let style = &self.options.style;
        let drawable = geometry.layout.drawable;
        let mut out = Vec::new();

        match &geometry.fill {
            BarFill::Gradient(stops) => out.push(
                RectMarkSpec::new(BAR_ID, drawable)
                    .with_fill(gradient_brush(stops, drawable))
                    .with_z_index(z_order::BAR_FILL)
                    .mark(),
            ),
            BarFill::Swatches(swatches) => {
                out.extend(swatches.iter().enumerate().map(|(i, s)| {
                    RectMarkSpec::new(SWATCH_ID_BASE.offset(i as u64), s.rect)
                        .with_fill(s.color)
                        .with_z_index(z_order::BAR_FILL)
                        .mark()
                }));
            }
        }

        out.push(
            RectMarkSpec::outline(
                BORDER_ID,
                geometry.border,
                style.border.clone(),
                config.border_width,
            )
            .with_z_index(z_order::BORDER)
            .mark(),
        );

        if let Some(marker) = self.marker_mark(geometry) {
            out.push(marker);
        }

        out.extend(self.axis(&geometry.layout).marks(&geometry.ticks, drawable));
        out
    }

    fn marker_mark(&self, geometry: &ColorbarGeometry) -> Option<Mark> {
        let marker = geometry.marker;
        if !marker.visible {
            return None;
        }
        let drawable = geometry.layout.drawable;
        let stroke = self.options.style.marker.clone();
        let stroke_width = self.options.config.marker_width;
        let x = drawable.x0 + marker.x;
        let mark = match geometry.fill {
            BarFill::Gradient(_) => RuleMarkSpec::vertical(MARKER_ID, x, drawable.y0, drawable.y1)
                .with_stroke(stroke, stroke_width)
                .with_crisp_edges(false)
                .with_z_index(z_order::MARKER)
                .mark(),
            BarFill::Swatches(_) => RectMarkSpec::outline(
                MARKER_ID,
                Rect::new(x, drawable.y0, x + marker.width, drawable.y1),
                stroke,
                stroke_width,
            )
            .with_z_index(z_order::MARKER)
            .mark(),
        };
        Some(mark)
    }

    /// Re-emits (or removes) the marker mark from the current geometry.
    fn sync_marker(&mut self) -> Vec<MarkDiff> {
        let Some(geometry) = &self.geometry else {
            return Vec::new();
        };
        match self.marker_mark(geometry) {
            Some(mark) => self.scene.upsert_mark(mark),
            None => self.scene.remove_mark(MARKER_ID).into_iter().collect(),
        }
    }
}

/// Stops at `i / (n - 1)`; a single color sits at offset `0`.
fn gradient_stops(colors: &[Color]) -> Vec<GradientStop> {
    let last = colors.len().saturating_sub(1).max(1) as f64;
    colors
        .iter()
        .enumerate()
        .map(|(i, color)| GradientStop {
            offset: i as f64 / last,
            color: *color,
        })
        .collect()
}

/// A left-to-right linear gradient across `rect`.
fn gradient_brush(stops: &[GradientStop], rect: Rect) -> Brush {
    if let [only] = stops {
        return Brush::Solid(only.color);
    }
    let stops: Vec<peniko::ColorStop> = stops
        .iter()
        .map(|s| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "offsets are in [0, 1], f32 is plenty"
            )]
            let offset = s.offset as f32;
            peniko::ColorStop::from((offset, s.color))
        })
        .collect();
    Brush::Gradient(peniko::Gradient {
        kind: peniko::GradientKind::Linear(peniko::LinearGradientPosition::new(
            (rect.x0, rect.y0),
            (rect.x1, rect.y0),
        )),
        stops: peniko::ColorStops::from(stops.as_slice()),
        ..peniko::Gradient::default()
    })
}

fn place_marker(pixel: &PixelScale, value: Option<&Datum>) -> MarkerState {
    let Some(value) = value else {
        return MarkerState::default();
    };
    match pixel.map(value) {
        Some(x) => MarkerState {
            visible: true,
            x,
            width: pixel.band_width(),
        },
        None => {
            warn!("colorbar: marker value {value:?} is not in the scale domain; hiding marker");
            MarkerState::default()
        }
    }
}
