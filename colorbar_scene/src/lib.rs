// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `colorbar_scene`: a stable-identity mark model for guide rendering.
//!
//! This crate provides:
//! - stable mark identity ([`MarkId`])
//! - evaluated per-kind mark payloads ([`MarkPayload`])
//! - frame reconciliation with `Enter`/`Update`/`Exit` diffs ([`Scene`], [`MarkDiff`])
//!
//! Guide generators (like the colorbar in the `colorbar` crate) build a complete frame of
//! [`Mark`]s on every render. A [`Scene`] compares it against the previous frame, and
//! downstream renderers (SVG, GPU, DOM) only need to apply the resulting diffs.
//!
//! Text shaping and layout are out of scope; text marks store unshaped strings.

#![no_std]

extern crate alloc;

mod scene;

use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::{Brush, Color};

pub use scene::{MarkDiff, Scene};

/// Stable identifier for a [`Mark`].
///
/// `MarkId`s must remain stable across frames for the same conceptual visual item; this is what
/// enables `Enter/Update/Exit` diffs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Create a mark id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the id offset by `index` from this base id.
    pub const fn offset(self, index: u64) -> Self {
        Self(self.0 + index)
    }
}

/// The geometric "kind" of a mark, which determines how the payload is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// An axis-aligned rectangle using [`RectChannels`].
    Rect,
    /// A text item positioned at a point.
    Text,
    /// A vector path.
    Path,
}

/// Evaluated per-kind channels (payload) for a mark instance.
///
/// This is the render-facing data model: it is what downstream renderers consume, and it is
/// what appears in [`MarkDiff`]s.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// An axis-aligned rectangle.
    Rect(RectChannels),
    /// A text item positioned at a point.
    Text(TextChannels),
    /// A vector path.
    Path(PathChannels),
}

impl MarkPayload {
    /// Return the kind of this payload.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Text(_) => MarkKind::Text,
            Self::Path(_) => MarkKind::Path,
        }
    }

    /// Optional bounds hint for downstream damage calculation.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            // Text shaping is downstream; bounds are not known here.
            Self::Text(_) => None,
            Self::Path(p) => Some(p.path.bounding_box()),
        }
    }
}

/// Evaluated channels for [`MarkKind::Rect`].
#[derive(Clone, Debug, PartialEq)]
pub struct RectChannels {
    /// Rectangle geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint. Gradient fills are expressed in scene coordinates.
    pub fill: Brush,
    /// Outline paint.
    pub stroke: Brush,
    /// Outline width in scene coordinates; `0` disables the outline.
    pub stroke_width: f64,
    /// Hint that the outline should snap to the pixel grid (SVG `crispEdges`).
    pub crisp_edges: bool,
}

/// Evaluated channels for [`MarkKind::Text`].
#[derive(Clone, Debug, PartialEq)]
pub struct TextChannels {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Horizontal text anchoring relative to [`TextChannels::pos`].
    pub anchor: TextAnchor,
    /// Vertical alignment for text relative to [`TextChannels::pos`].
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// Horizontal anchoring for text.
///
/// In SVG terms, this maps to the `text-anchor` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Anchor at the start (left in LTR).
    Start,
    /// Anchor in the middle.
    Middle,
    /// Anchor at the end (right in LTR).
    End,
}

/// Vertical alignment for text.
///
/// In SVG terms, this maps to the `dominant-baseline` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// Baseline is centered on the anchor point.
    Middle,
    /// Baseline is the font’s alphabetic baseline.
    Alphabetic,
    /// Baseline is the font’s hanging baseline.
    Hanging,
}

/// Evaluated channels for [`MarkKind::Path`].
#[derive(Clone, Debug, PartialEq)]
pub struct PathChannels {
    /// The vector path geometry.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
    /// Hint that the stroke should snap to the pixel grid (SVG `crispEdges`).
    pub crisp_edges: bool,
}

impl Default for RectChannels {
    fn default() -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, 0.0, 0.0),
            fill: Brush::Solid(Color::from_rgba8(0, 0, 0, 255)),
            stroke: Brush::Solid(Color::TRANSPARENT),
            stroke_width: 0.0,
            crisp_edges: false,
        }
    }
}

impl Default for TextChannels {
    fn default() -> Self {
        Self {
            pos: Point::new(0.0, 0.0),
            text: String::new(),
            font_size: 10.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            fill: Brush::Solid(Color::from_rgba8(0, 0, 0, 255)),
        }
    }
}

impl Default for PathChannels {
    fn default() -> Self {
        Self {
            path: BezPath::new(),
            fill: Brush::Solid(Color::TRANSPARENT),
            stroke: Brush::default(),
            stroke_width: 0.0,
            crisp_edges: false,
        }
    }
}

/// A single evaluated mark with a stable id and a render-order hint.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identifier.
    pub id: MarkId,
    /// Z-ordering for rendering; higher values are drawn above lower values.
    ///
    /// Renderers should sort by `(z_index, id)` for a deterministic tie-break.
    pub z_index: i32,
    /// Evaluated channels.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a mark from an already evaluated payload.
    pub fn new(id: MarkId, z_index: i32, payload: MarkPayload) -> Self {
        Self {
            id,
            z_index,
            payload,
        }
    }

    /// Start building a mark with the given id.
    ///
    /// The builder defaults to a rect mark; call [`MarkBuilder::text`] or
    /// [`MarkBuilder::path`] to switch kinds before setting kind-specific channels.
    pub fn builder(id: MarkId) -> MarkBuilder {
        MarkBuilder {
            mark: Self::new(id, 0, MarkPayload::Rect(RectChannels::default())),
        }
    }

    /// Returns the kind of this mark.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }
}

/// Builder for [`Mark`].
///
/// Setters for channels that don't apply to the current kind are ignored.
#[derive(Debug)]
pub struct MarkBuilder {
    mark: Mark,
}

impl MarkBuilder {
    /// Set the mark z-index.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.mark.z_index = z_index;
        self
    }

    /// Switch to a rect mark.
    pub fn rect(mut self) -> Self {
        if self.mark.kind() != MarkKind::Rect {
            self.mark.payload = MarkPayload::Rect(RectChannels::default());
        }
        self
    }

    /// Switch to a text mark.
    pub fn text(mut self) -> Self {
        if self.mark.kind() != MarkKind::Text {
            self.mark.payload = MarkPayload::Text(TextChannels::default());
        }
        self
    }

    /// Switch to a path mark.
    pub fn path(mut self) -> Self {
        if self.mark.kind() != MarkKind::Path {
            self.mark.payload = MarkPayload::Path(PathChannels::default());
        }
        self
    }

    /// Set rect geometry.
    pub fn rect_geometry(mut self, rect: Rect) -> Self {
        if let MarkPayload::Rect(r) = &mut self.mark.payload {
            r.rect = rect;
        }
        self
    }

    /// Set path geometry.
    pub fn path_geometry(mut self, path: BezPath) -> Self {
        if let MarkPayload::Path(p) = &mut self.mark.payload {
            p.path = path;
        }
        self
    }

    /// Set the fill paint (rect, text, and path).
    pub fn fill(mut self, fill: impl Into<Brush>) -> Self {
        let fill = fill.into();
        match &mut self.mark.payload {
            MarkPayload::Rect(r) => r.fill = fill,
            MarkPayload::Text(t) => t.fill = fill,
            MarkPayload::Path(p) => p.fill = fill,
        }
        self
    }

    /// Set the stroke paint and width (rect and path).
    pub fn stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        let stroke = stroke.into();
        match &mut self.mark.payload {
            MarkPayload::Rect(r) => {
                r.stroke = stroke;
                r.stroke_width = stroke_width;
            }
            MarkPayload::Path(p) => {
                p.stroke = stroke;
                p.stroke_width = stroke_width;
            }
            MarkPayload::Text(_) => {}
        }
        self
    }

    /// Request pixel-snapped outlines (rect and path).
    pub fn crisp_edges(mut self, crisp: bool) -> Self {
        match &mut self.mark.payload {
            MarkPayload::Rect(r) => r.crisp_edges = crisp,
            MarkPayload::Path(p) => p.crisp_edges = crisp,
            MarkPayload::Text(_) => {}
        }
        self
    }

    /// Set the text position.
    pub fn position(mut self, pos: impl Into<Point>) -> Self {
        if let MarkPayload::Text(t) = &mut self.mark.payload {
            t.pos = pos.into();
        }
        self
    }

    /// Set the text content.
    pub fn content(mut self, text: impl Into<String>) -> Self {
        if let MarkPayload::Text(t) = &mut self.mark.payload {
            t.text = text.into();
        }
        self
    }

    /// Set the font size.
    pub fn font_size(mut self, font_size: f64) -> Self {
        if let MarkPayload::Text(t) = &mut self.mark.payload {
            t.font_size = font_size;
        }
        self
    }

    /// Set the horizontal text anchor.
    pub fn text_anchor(mut self, anchor: TextAnchor) -> Self {
        if let MarkPayload::Text(t) = &mut self.mark.payload {
            t.anchor = anchor;
        }
        self
    }

    /// Set the text baseline.
    pub fn text_baseline(mut self, baseline: TextBaseline) -> Self {
        if let MarkPayload::Text(t) = &mut self.mark.payload {
            t.baseline = baseline;
        }
        self
    }

    /// Finish building.
    pub fn build(self) -> Mark {
        self.mark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_ignores_channels_of_other_kinds() {
        let mark = Mark::builder(MarkId(1))
            .text()
            .rect_geometry(Rect::new(0.0, 0.0, 10.0, 10.0))
            .content("a")
            .build();
        let MarkPayload::Text(t) = &mark.payload else {
            panic!("expected a text payload");
        };
        assert_eq!(t.text, "a");
        assert_eq!(mark.kind(), MarkKind::Text);
    }

    #[test]
    fn switching_kind_resets_payload() {
        let mark = Mark::builder(MarkId(1))
            .rect_geometry(Rect::new(0.0, 0.0, 10.0, 10.0))
            .path()
            .rect()
            .build();
        assert_eq!(mark.payload.bounds(), Some(Rect::new(0.0, 0.0, 0.0, 0.0)));
    }
}
