// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of `HorizontalColorbar` through its public API.

use colorbar::{
    BarFill, COLOR_SAMPLES, ColorbarConfig, ColorbarError, ColorbarOptions, ContinuousColorScale,
    Datum, DiscreteColorScale, Domain, HorizontalColorbar, ScaleKind, Size,
};
use colorbar_scene::{MarkDiff, MarkPayload};
use float_cmp::assert_approx_eq;
use peniko::Color;
use peniko::color::palette::css;

/// A color function that encodes its input in the red channel, over `[0, 100]`.
fn red_ramp(domain: Vec<f64>) -> ContinuousColorScale {
    ContinuousColorScale::new(domain, |v| {
        #[allow(clippy::cast_possible_truncation, reason = "test values are small")]
        let r = (v / 100.0) as f32;
        Color::new([r, 0.0, 0.0, 1.0])
    })
}

fn rgb() -> DiscreteColorScale {
    DiscreteColorScale::new(["a", "b", "c"], vec![css::RED, css::GREEN, css::BLUE])
}

#[test]
fn continuous_domain_samples_ten_evenly_spaced_colors() {
    let bar = HorizontalColorbar::new(red_ramp(vec![0.0, 100.0]), ColorbarOptions::default())
        .expect("valid scale");
    assert_eq!(bar.kind(), ScaleKind::Continuous);
    assert_eq!(bar.colors().len(), COLOR_SAMPLES);
    for (i, color) in bar.colors().iter().enumerate() {
        assert_approx_eq!(f32, color.components[0], i as f32 / 9.0, epsilon = 1e-6);
    }
}

#[test]
fn midpoint_maps_to_middle_of_drawable_width() {
    let mut bar = HorizontalColorbar::new(red_ramp(vec![0.0, 100.0]), ColorbarOptions::default())
        .expect("valid scale");
    assert!(bar.pixel_scale().is_none());
    bar.render(Size::new(226.0, 40.0));

    let geometry = bar.geometry().expect("rendered");
    assert_approx_eq!(f64, geometry.layout.width(), 200.0);
    let scale = bar.pixel_scale().expect("rendered");
    assert_approx_eq!(f64, scale.map(&Datum::Number(50.0)).expect("mapped"), 100.0);
}

#[test]
fn unsorted_domain_uses_true_extent() {
    let mut sorted =
        HorizontalColorbar::new(red_ramp(vec![0.0, 50.0, 100.0]), ColorbarOptions::default())
            .expect("valid scale");
    let mut shuffled =
        HorizontalColorbar::new(red_ramp(vec![50.0, 100.0, 0.0]), ColorbarOptions::default())
            .expect("valid scale");
    sorted.render(Size::new(226.0, 40.0));
    shuffled.render(Size::new(226.0, 40.0));

    assert_eq!(sorted.colors(), shuffled.colors());
    let a = sorted.pixel_scale().expect("rendered");
    let b = shuffled.pixel_scale().expect("rendered");
    for v in [0.0, 25.0, 50.0, 100.0] {
        assert_approx_eq!(
            f64,
            a.map(&Datum::Number(v)).expect("mapped"),
            b.map(&Datum::Number(v)).expect("mapped")
        );
    }
}

#[test]
fn irregular_domain_keeps_proportional_anchors_and_even_stops() {
    let scale = red_ramp(vec![0.0, 10.0, 100.0]).with_range(vec![css::RED, css::GREEN, css::BLUE]);
    let mut bar = HorizontalColorbar::new(scale, ColorbarOptions::default()).expect("valid scale");
    bar.render(Size::new(226.0, 40.0));

    let px = bar.pixel_scale().expect("rendered");
    assert_approx_eq!(f64, px.map(&Datum::Number(10.0)).expect("mapped"), 20.0);

    let Some(BarFill::Gradient(stops)) = bar.geometry().map(|g| &g.fill) else {
        panic!("expected a gradient");
    };
    let offsets: Vec<f64> = stops.iter().map(|s| s.offset).collect();
    assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
    assert_eq!(stops[1].color, css::GREEN);
}

#[test]
fn discrete_swatches_split_the_bar_evenly() {
    let mut bar = HorizontalColorbar::new(rgb(), ColorbarOptions::default()).expect("valid scale");
    assert_eq!(bar.kind(), ScaleKind::Discrete);
    bar.render(Size::new(116.0, 40.0));

    let geometry = bar.geometry().expect("rendered");
    let BarFill::Swatches(swatches) = &geometry.fill else {
        panic!("expected swatches");
    };
    let x0 = geometry.layout.drawable.x0;
    let xs: Vec<f64> = swatches.iter().map(|s| s.rect.x0 - x0).collect();
    assert_eq!(xs, vec![0.0, 30.0, 60.0]);
    for s in swatches {
        assert_approx_eq!(f64, s.rect.width(), 30.0);
    }
    let colors: Vec<Color> = swatches.iter().map(|s| s.color).collect();
    assert_eq!(colors, vec![css::RED, css::GREEN, css::BLUE]);
}

#[test]
fn render_is_idempotent() {
    let mut bar = HorizontalColorbar::new(rgb(), ColorbarOptions::default()).expect("valid scale");
    let first = bar.render(Size::new(300.0, 50.0));
    assert!(first.iter().all(|d| matches!(d, MarkDiff::Enter { .. })));
    let geometry = bar.geometry().cloned();

    let second = bar.render(Size::new(300.0, 50.0));
    assert!(second.is_empty(), "unexpected diffs: {second:?}");
    assert_eq!(bar.geometry().cloned(), geometry);
}

#[test]
fn resize_updates_marks_in_place() {
    let mut bar = HorizontalColorbar::new(red_ramp(vec![0.0, 100.0]), ColorbarOptions::default())
        .expect("valid scale");
    bar.render(Size::new(226.0, 40.0));
    bar.set_marker(Some(Datum::Number(25.0)));
    assert_approx_eq!(f64, bar.marker().x, 50.0);

    let diffs = bar.render(Size::new(426.0, 40.0));
    assert!(
        diffs
            .iter()
            .any(|d| matches!(d, MarkDiff::Update { id, .. } if id.0 == 1)),
        "the gradient bar should be updated in place"
    );
    assert_approx_eq!(f64, bar.marker().x, 100.0);
}

#[test]
fn marker_round_trip() {
    let mut bar = HorizontalColorbar::new(red_ramp(vec![0.0, 100.0]), ColorbarOptions::default())
        .expect("valid scale");
    bar.render(Size::new(226.0, 40.0));

    let enter = bar.set_marker(Some(Datum::Number(75.0)));
    assert!(matches!(enter.as_slice(), [MarkDiff::Enter { .. }]));
    let marker = bar.marker();
    assert!(marker.visible);
    let expected = bar
        .pixel_scale()
        .and_then(|s| s.map(&Datum::Number(75.0)))
        .expect("mapped");
    assert_approx_eq!(f64, marker.x, expected);
    assert_eq!(bar.marker_value(), Some(&Datum::Number(75.0)));

    let exit = bar.set_marker(None);
    assert!(matches!(exit.as_slice(), [MarkDiff::Exit { .. }]));
    assert!(!bar.marker().visible);
    assert!(bar.set_marker(None).is_empty());
}

#[test]
fn continuous_marker_is_a_vertical_rule_spanning_the_bar() {
    let mut bar = HorizontalColorbar::new(red_ramp(vec![0.0, 100.0]), ColorbarOptions::default())
        .expect("valid scale");
    bar.render(Size::new(226.0, 40.0));
    let diffs = bar.set_marker(Some(Datum::Number(50.0)));
    let [MarkDiff::Enter { new, .. }] = diffs.as_slice() else {
        panic!("expected a single enter, got {diffs:?}");
    };
    let MarkPayload::Path(p) = new.as_ref() else {
        panic!("expected a path marker");
    };
    let bounds = kurbo::Shape::bounding_box(&p.path);
    assert_approx_eq!(f64, bounds.x0, 113.0);
    assert_approx_eq!(f64, bounds.x1, 113.0);
    assert_approx_eq!(f64, bounds.height(), 20.0);
    assert_approx_eq!(f64, p.stroke_width, 2.0);
    assert!(!p.crisp_edges);
}

#[test]
fn failed_set_domain_leaves_state_untouched() {
    let mut bar = HorizontalColorbar::new(rgb(), ColorbarOptions::default()).expect("valid scale");
    let domain = bar.domain().clone();
    let colors = bar.colors().to_vec();

    assert_eq!(
        bar.set_domain(Domain::Discrete(Vec::new())),
        Err(ColorbarError::EmptyDomain)
    );
    assert_eq!(
        bar.set_domain(Domain::categories(["x", "y"])),
        Err(ColorbarError::MismatchedRange {
            domain_len: 2,
            range_len: 3
        })
    );
    assert!(matches!(
        bar.set_domain(Domain::Continuous(vec![1.0])),
        Err(ColorbarError::KindMismatch { .. })
    ));
    assert_eq!(bar.domain(), &domain);
    assert_eq!(bar.colors(), colors.as_slice());

    bar.set_domain(Domain::categories(["x", "y", "z"]))
        .expect("same length is accepted");
    assert_eq!(bar.domain(), &Domain::categories(["x", "y", "z"]));
    assert_eq!(bar.colors(), colors.as_slice());
}

#[test]
fn set_domain_resamples_but_waits_for_render() {
    let mut bar = HorizontalColorbar::new(red_ramp(vec![0.0, 100.0]), ColorbarOptions::default())
        .expect("valid scale");
    bar.render(Size::new(226.0, 40.0));
    let before = bar.geometry().cloned();

    bar.set_domain(Domain::Continuous(vec![0.0, 50.0]))
        .expect("valid domain");
    assert_eq!(bar.colors().len(), COLOR_SAMPLES);
    assert_approx_eq!(f32, bar.colors()[9].components[0], 0.5, epsilon = 1e-6);
    assert_eq!(bar.geometry().cloned(), before);

    assert!(!bar.render(Size::new(226.0, 40.0)).is_empty());
    let px = bar.pixel_scale().expect("rendered");
    assert_approx_eq!(f64, px.map(&Datum::Number(50.0)).expect("mapped"), 200.0);
}

#[test]
fn empty_domain_aborts_construction() {
    assert_eq!(
        HorizontalColorbar::new(red_ramp(Vec::new()), ColorbarOptions::default()).err(),
        Some(ColorbarError::EmptyDomain)
    );
    let empty = DiscreteColorScale::new(Vec::<String>::new(), Vec::<Color>::new());
    assert_eq!(
        HorizontalColorbar::new(empty, ColorbarOptions::default()).err(),
        Some(ColorbarError::EmptyDomain)
    );
}

#[test]
fn degenerate_container_renders_zero_size_geometry() {
    let mut bar = HorizontalColorbar::new(rgb(), ColorbarOptions::default()).expect("valid scale");
    bar.render(Size::new(10.0, 5.0));
    let geometry = bar.geometry().expect("rendered");
    assert!(geometry.layout.degenerate);
    assert_approx_eq!(f64, geometry.layout.width(), 0.0);
    assert_approx_eq!(f64, geometry.layout.height(), 0.0);
    let BarFill::Swatches(swatches) = &geometry.fill else {
        panic!("expected swatches");
    };
    assert!(swatches.iter().all(|s| s.rect.width() == 0.0));
}

#[test]
fn tick_values_and_format_override_defaults() {
    let options = ColorbarOptions::default()
        .with_tick_values(vec![Datum::Number(0.0), Datum::Number(100.0)])
        .with_tick_format(|d, _step| format!("{}%", d.as_number().unwrap_or_default()));
    let mut bar = HorizontalColorbar::new(red_ramp(vec![0.0, 100.0]), options).expect("valid scale");
    bar.render(Size::new(226.0, 40.0));

    let ticks = &bar.geometry().expect("rendered").ticks;
    let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["0%", "100%"]);
    assert_approx_eq!(f64, ticks[1].x, 200.0);
}

#[test]
fn thousands_of_ticks_keep_distinct_marks_and_idempotent_renders() {
    let options =
        ColorbarOptions::default().with_config(ColorbarConfig::default().with_tick_count(2000));
    let mut bar = HorizontalColorbar::new(red_ramp(vec![0.0, 100.0]), options).expect("valid scale");
    let size = Size::new(2026.0, 40.0);

    let diffs = bar.render(size);
    let ticks = bar.geometry().expect("rendered").ticks.len();
    assert!(ticks > 1000, "{ticks} ticks");
    // Bar and border, then a rule and a label per tick.
    let expected = 2 + 2 * ticks;
    assert_eq!(bar.scene().len(), expected);
    assert_eq!(diffs.len(), expected);
    assert!(diffs.iter().all(|d| matches!(d, MarkDiff::Enter { .. })));

    assert!(bar.render(size).is_empty());
}

#[test]
fn many_categories_keep_distinct_swatch_and_axis_marks() {
    let categories: Vec<String> = (0..1200).map(|i| format!("c{i}")).collect();
    let colors = vec![css::TEAL; categories.len()];
    let mut bar = HorizontalColorbar::new(
        DiscreteColorScale::new(categories, colors),
        ColorbarOptions::default(),
    )
    .expect("valid scale");
    let size = Size::new(1226.0, 40.0);

    bar.render(size);
    // Swatches, border, and a rule and a label per category.
    assert_eq!(bar.scene().len(), 1200 + 1 + 2 * 1200);
    assert!(bar.render(size).is_empty());
}

#[test]
fn empty_explicit_range_is_a_mismatched_range() {
    let scale = red_ramp(vec![0.0, 50.0, 100.0]).with_range(Vec::<Color>::new());
    assert_eq!(
        HorizontalColorbar::new(scale, ColorbarOptions::default()).err(),
        Some(ColorbarError::MismatchedRange {
            domain_len: 3,
            range_len: 0
        })
    );
    let scale = DiscreteColorScale::new(["a", "b"], Vec::<Color>::new());
    assert_eq!(
        HorizontalColorbar::new(scale, ColorbarOptions::default()).err(),
        Some(ColorbarError::MismatchedRange {
            domain_len: 2,
            range_len: 0
        })
    );
}

#[test]
fn default_ticks_are_an_approximate_count() {
    let mut bar = HorizontalColorbar::new(red_ramp(vec![0.0, 100.0]), ColorbarOptions::default())
        .expect("valid scale");
    bar.render(Size::new(226.0, 40.0));
    let n = bar.geometry().expect("rendered").ticks.len();
    assert!((4..=11).contains(&n), "{n} ticks");
}

#[test]
fn custom_padding_moves_the_bar() {
    let options =
        ColorbarOptions::default().with_config(ColorbarConfig::default().with_padding(20.0, 5.0));
    let mut bar = HorizontalColorbar::new(rgb(), options).expect("valid scale");
    bar.render(Size::new(130.0, 40.0));
    let drawable = bar.geometry().expect("rendered").layout.drawable;
    assert_eq!(drawable, kurbo::Rect::new(20.0, 0.0, 110.0, 30.0));
}
