// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical rules: axis ticks and the continuous-scale marker.

use colorbar_scene::{Mark, MarkId};
use kurbo::{BezPath, Line};
use peniko::{Brush, Color};

use crate::axis::StrokeStyle;
use crate::z_order;

/// A vertical stroked segment at `x` spanning `y0..y1`.
#[derive(Clone, Debug)]
pub struct RuleMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Horizontal position in scene coordinates.
    pub x: f64,
    /// Top end.
    pub y0: f64,
    /// Bottom end.
    pub y1: f64,
    /// Stroke paint and width.
    pub stroke: StrokeStyle,
    /// Snap the stroke to the pixel grid.
    pub crisp_edges: bool,
    /// Rendering order hint (`colorbar_scene::Mark::z_index`).
    pub z_index: i32,
}

impl RuleMarkSpec {
    /// A gray, pixel-snapped 1px rule drawn with the axis ticks.
    pub fn vertical(id: MarkId, x: f64, y0: f64, y1: f64) -> Self {
        Self {
            id,
            x,
            y0,
            y1,
            stroke: StrokeStyle::default(),
            crisp_edges: true,
            z_index: z_order::AXIS_RULES,
        }
    }

    /// Sets stroke paint and width.
    pub fn with_stroke(mut self, brush: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = StrokeStyle::solid(brush, stroke_width);
        self
    }

    /// Enables or disables pixel snapping.
    pub fn with_crisp_edges(mut self, crisp_edges: bool) -> Self {
        self.crisp_edges = crisp_edges;
        self
    }

    /// Sets the z-index.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// The segment in scene coordinates.
    pub fn line(&self) -> Line {
        Line::new((self.x, self.y0), (self.x, self.y1))
    }

    /// Generates the path mark.
    pub fn mark(&self) -> Mark {
        let line = self.line();
        let mut path = BezPath::new();
        path.move_to(line.p0);
        path.line_to(line.p1);
        Mark::builder(self.id)
            .path()
            .path_geometry(path)
            .z_index(self.z_index)
            .fill(Color::TRANSPARENT)
            .stroke(self.stroke.brush.clone(), self.stroke.stroke_width)
            .crisp_edges(self.crisp_edges)
            .build()
    }
}
