// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG output for `colorbar_demo`.
//!
//! [`SvgScene`] mirrors a colorbar's marks by applying `colorbar_scene` diffs, then serializes
//! them as an SVG fragment. Gradient fills become `<linearGradient>` definitions.

use std::collections::HashMap;
use std::fmt::Write as _;

use colorbar_scene::{MarkDiff, MarkId, MarkPayload, TextAnchor, TextBaseline};
use peniko::color::Srgb;
use peniko::{Brush, Gradient, GradientKind};

#[derive(Debug)]
pub(crate) struct SvgScene {
    /// Prefix for element ids, so several scenes can share one document.
    prefix: String,
    marks: HashMap<MarkId, (i32, MarkPayload)>,
}

impl SvgScene {
    pub(crate) fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            marks: HashMap::new(),
        }
    }

    pub(crate) fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
        for diff in diffs {
            match diff {
                MarkDiff::Enter {
                    id, z_index, new, ..
                } => {
                    self.marks.insert(*id, (*z_index, (**new).clone()));
                }
                MarkDiff::Update {
                    id,
                    new_z_index,
                    new,
                    ..
                } => {
                    self.marks.insert(*id, (*new_z_index, (**new).clone()));
                }
                MarkDiff::Exit { id, .. } => {
                    self.marks.remove(id);
                }
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.marks.len()
    }

    /// Serializes the marks in paint order, wrapped in a translated `<g>`.
    pub(crate) fn to_svg_group(&self, dx: f64, dy: f64) -> String {
        let mut ordered: Vec<(&MarkId, &(i32, MarkPayload))> = self.marks.iter().collect();
        ordered.sort_by_key(|(id, (z, _))| (*z, id.0));

        let mut defs = String::new();
        let mut body = String::new();
        for (id, (_z, payload)) in ordered {
            match payload {
                MarkPayload::Rect(r) => {
                    let fill = self.paint(&mut defs, *id, "fill", &r.fill);
                    let _ = write!(
                        body,
                        r#"<rect x="{}" y="{}" width="{}" height="{}"{fill}"#,
                        r.rect.x0,
                        r.rect.y0,
                        r.rect.width(),
                        r.rect.height(),
                    );
                    if r.stroke_width > 0.0 {
                        body.push_str(&self.paint(&mut defs, *id, "stroke", &r.stroke));
                        let _ = write!(body, r#" stroke-width="{}""#, r.stroke_width);
                    }
                    if r.crisp_edges {
                        body.push_str(r#" shape-rendering="crispEdges""#);
                    }
                    body.push_str("/>\n");
                }
                MarkPayload::Text(t) => {
                    let baseline = match t.baseline {
                        TextBaseline::Middle => "middle",
                        TextBaseline::Alphabetic => "alphabetic",
                        TextBaseline::Hanging => "hanging",
                    };
                    let anchor = match t.anchor {
                        TextAnchor::Start => "start",
                        TextAnchor::Middle => "middle",
                        TextAnchor::End => "end",
                    };
                    let fill = self.paint(&mut defs, *id, "fill", &t.fill);
                    let _ = writeln!(
                        body,
                        r#"<text x="{}" y="{}" font-size="{}" font-family="sans-serif" dominant-baseline="{baseline}" text-anchor="{anchor}"{fill}>{}</text>"#,
                        t.pos.x,
                        t.pos.y,
                        t.font_size,
                        escape_xml(&t.text),
                    );
                }
                MarkPayload::Path(p) => {
                    let fill = self.paint(&mut defs, *id, "fill", &p.fill);
                    let _ = write!(body, r#"<path d="{}"{fill}"#, p.path.to_svg());
                    if p.stroke_width > 0.0 {
                        body.push_str(&self.paint(&mut defs, *id, "stroke", &p.stroke));
                        let _ = write!(body, r#" stroke-width="{}""#, p.stroke_width);
                    }
                    if p.crisp_edges {
                        body.push_str(r#" shape-rendering="crispEdges""#);
                    }
                    body.push_str("/>\n");
                }
            }
        }

        let mut out = format!("<g transform=\"translate({dx} {dy})\">\n");
        if !defs.is_empty() {
            let _ = write!(out, "<defs>\n{defs}</defs>\n");
        }
        out.push_str(&body);
        out.push_str("</g>\n");
        out
    }

    /// Returns ` {name}="..."` (plus opacity), registering gradient definitions in `defs`.
    fn paint(&self, defs: &mut String, id: MarkId, name: &str, brush: &Brush) -> String {
        match brush {
            Brush::Solid(color) => {
                let rgba = color.to_rgba8();
                let mut attr = format!(
                    r##" {name}="#{:02x}{:02x}{:02x}""##,
                    rgba.r, rgba.g, rgba.b
                );
                if rgba.a != 255 {
                    let _ = write!(attr, r#" {name}-opacity="{}""#, f64::from(rgba.a) / 255.0);
                }
                attr
            }
            Brush::Gradient(gradient) => {
                let gid = format!("{}-{name}-{}", self.prefix, id.0);
                match linear_gradient_def(&gid, gradient) {
                    Some(def) => {
                        defs.push_str(&def);
                        format!(r#" {name}="url(#{gid})""#)
                    }
                    None => format!(r#" {name}="none""#),
                }
            }
            _ => format!(r#" {name}="none""#),
        }
    }
}

/// Serializes a linear gradient in user-space coordinates; other kinds are unsupported.
fn linear_gradient_def(gid: &str, gradient: &Gradient) -> Option<String> {
    let GradientKind::Linear(pos) = &gradient.kind else {
        return None;
    };
    let mut out = format!(
        r#"<linearGradient id="{gid}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">"#,
        pos.start.x, pos.start.y, pos.end.x, pos.end.y
    );
    out.push('\n');
    for stop in gradient.stops.iter() {
        let rgba = stop.color.to_alpha_color::<Srgb>().to_rgba8();
        let _ = write!(
            out,
            r##"<stop offset="{}" stop-color="#{:02x}{:02x}{:02x}""##,
            stop.offset, rgba.r, rgba.g, rgba.b
        );
        if rgba.a != 255 {
            let _ = write!(out, r#" stop-opacity="{}""#, f64::from(rgba.a) / 255.0);
        }
        out.push_str("/>\n");
    }
    out.push_str("</linearGradient>\n");
    Some(out)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use colorbar::{ColorbarOptions, ContinuousColorScale, Datum, HorizontalColorbar, Size};
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn gradient_bar_emits_a_linear_gradient_definition() {
        let mut bar = HorizontalColorbar::new(
            ContinuousColorScale::between(vec![0.0, 1.0], css::BLACK, css::WHITE),
            ColorbarOptions::default(),
        )
        .expect("valid scale");
        let mut svg = SvgScene::new("cb");
        svg.apply_diffs(&bar.render(Size::new(226.0, 40.0)));

        let out = svg.to_svg_group(0.0, 0.0);
        assert!(out.contains(r#"<linearGradient id="cb-fill-1""#), "{out}");
        assert!(out.contains(r#"fill="url(#cb-fill-1)""#), "{out}");
        assert_eq!(out.matches("<stop ").count(), 10);
        assert!(out.contains(r#"shape-rendering="crispEdges""#));
    }

    #[test]
    fn exit_diffs_remove_elements() {
        let mut bar = HorizontalColorbar::new(
            ContinuousColorScale::between(vec![0.0, 1.0], css::BLACK, css::WHITE),
            ColorbarOptions::default(),
        )
        .expect("valid scale");
        let mut svg = SvgScene::new("cb");
        svg.apply_diffs(&bar.render(Size::new(226.0, 40.0)));
        let before = svg.len();
        svg.apply_diffs(&bar.set_marker(Some(Datum::Number(0.5))));
        assert_eq!(svg.len(), before + 1);
        svg.apply_diffs(&bar.set_marker(None));
        assert_eq!(svg.len(), before);
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(escape_xml("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    }
}
