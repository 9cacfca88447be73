// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangles: the gradient bar, swatches, the border and the discrete marker.

use colorbar_scene::{Mark, MarkId};
use kurbo::Rect;
use peniko::{Brush, Color};

use crate::axis::StrokeStyle;
use crate::z_order;

/// A filled and optionally outlined rectangle.
#[derive(Clone, Debug)]
pub struct RectMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Rectangle in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Outline, drawn pixel-snapped.
    pub outline: Option<StrokeStyle>,
    /// Rendering order hint (`colorbar_scene::Mark::z_index`).
    pub z_index: i32,
}

impl RectMarkSpec {
    /// A rectangle in the bar layer with the default brush and no outline.
    pub fn new(id: MarkId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            fill: Brush::default(),
            outline: None,
            z_index: z_order::BAR_FILL,
        }
    }

    /// A transparent rectangle with only an outline (border, band marker).
    pub fn outline(id: MarkId, rect: Rect, brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            fill: Brush::Solid(Color::TRANSPARENT),
            outline: Some(StrokeStyle::solid(brush, stroke_width)),
            ..Self::new(id, rect)
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the z-index.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        let builder = Mark::builder(self.id)
            .rect()
            .z_index(self.z_index)
            .rect_geometry(self.rect)
            .fill(self.fill.clone());
        match &self.outline {
            Some(o) if o.stroke_width > 0.0 => builder
                .stroke(o.brush.clone(), o.stroke_width)
                .crisp_edges(true)
                .build(),
            _ => builder.build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use colorbar_scene::MarkPayload;
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn outline_only_rect_is_transparent_and_snapped() {
        let rect = Rect::new(13.0, 0.0, 213.0, 20.0);
        let mark = RectMarkSpec::outline(MarkId(2), rect, css::GRAY, 1.0).mark();
        let MarkPayload::Rect(r) = &mark.payload else {
            panic!("expected a rect");
        };
        assert_eq!(r.rect, rect);
        assert_eq!(r.fill, Brush::Solid(Color::TRANSPARENT));
        assert_eq!(r.stroke, Brush::Solid(css::GRAY));
        assert_eq!(r.stroke_width, 1.0);
        assert!(r.crisp_edges);
    }

    #[test]
    fn plain_swatch_has_no_outline() {
        let mark = RectMarkSpec::new(MarkId(100), Rect::new(0.0, 0.0, 30.0, 20.0))
            .with_fill(css::RED)
            .mark();
        let MarkPayload::Rect(r) = &mark.payload else {
            panic!("expected a rect");
        };
        assert_eq!(r.stroke_width, 0.0);
        assert!(!r.crisp_edges);
    }
}
