// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a few colorbars into one SVG file.
//!
//! Each colorbar is rendered through its mark diffs only: the initial render, then marker and
//! domain updates are applied incrementally to an [`svg::SvgScene`].

mod svg;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use clap::Parser;
use colorbar::{
    ColorbarConfig, ColorbarOptions, ContinuousColorScale, Datum, DiscreteColorScale, Domain,
    HorizontalColorbar, Size, lerp_srgb,
};
use log::info;
use peniko::Color;
use peniko::color::palette::css;

/// Render colorbar legends to a standalone SVG file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Container width of each colorbar, in pixels.
    #[arg(long, default_value_t = 400.0)]
    width: f64,

    /// Container height of each colorbar, in pixels.
    #[arg(long, default_value_t = 50.0)]
    height: f64,

    /// Output path for the SVG file.
    #[arg(short, long, default_value = "colorbar_demo.svg")]
    output: PathBuf,

    /// JSON file with layout overrides (any subset of the `ColorbarConfig` fields).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Marker value shown on the continuous colorbar.
    #[arg(long, default_value_t = 62.0)]
    marker: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    ensure!(
        cli.width.is_finite() && cli.height.is_finite(),
        "container size must be finite"
    );

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ColorbarConfig::default(),
    };
    let options = ColorbarOptions::default().with_config(config);
    let size = Size::new(cli.width, cli.height);

    let bars = [
        continuous_demo(&options, size, cli.marker)?,
        quantile_demo(&options, size)?,
        discrete_demo(&options, size)?,
        rescaled_demo(&options, size)?,
    ];

    let mut doc = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = cli.width,
        h = cli.height * bars.len() as f64,
    );
    doc.push('\n');
    for (i, bar) in bars.iter().enumerate() {
        doc.push_str(&bar.to_svg_group(0.0, cli.height * i as f64));
    }
    doc.push_str("</svg>\n");

    fs::write(&cli.output, doc)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!("wrote {}", cli.output.display());
    Ok(())
}

fn load_config(path: &Path) -> Result<ColorbarConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let config: ColorbarConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {} as a colorbar config", path.display()))?;
    info!("loaded config from {}: {config:?}", path.display());
    Ok(config)
}

/// A piecewise ramp whose stops double as the gradient colors, with a marker.
fn continuous_demo(options: &ColorbarOptions, size: Size, marker: f64) -> Result<svg::SvgScene> {
    let scale = ContinuousColorScale::piecewise(
        vec![0.0, 25.0, 50.0, 75.0, 100.0],
        vec![
            Color::from_rgb8(0x44, 0x01, 0x54),
            Color::from_rgb8(0x3b, 0x52, 0x8b),
            Color::from_rgb8(0x21, 0x90, 0x8c),
            Color::from_rgb8(0x5d, 0xc9, 0x63),
            Color::from_rgb8(0xfd, 0xe7, 0x25),
        ],
    );
    let mut bar = HorizontalColorbar::new(scale, options.clone())?;
    let mut out = svg::SvgScene::new("continuous");
    out.apply_diffs(&bar.render(size));
    out.apply_diffs(&bar.set_marker(Some(Datum::Number(marker))));
    out.apply_diffs(&bar.set_marker_color(css::BLACK));
    info!("continuous: {} marks, marker at {:?}", out.len(), bar.marker());
    Ok(out)
}

/// Irregular breakpoints: stops are evenly spaced, ticks follow the raw domain spacing.
fn quantile_demo(options: &ColorbarOptions, size: Size) -> Result<svg::SvgScene> {
    let breaks = vec![0.0, 5.0, 20.0, 100.0];
    let scale = ContinuousColorScale::between(breaks.clone(), css::WHITE, css::DARK_RED)
        .with_range(vec![
            Color::from_rgb8(0xfe, 0xe5, 0xd9),
            Color::from_rgb8(0xfc, 0xae, 0x91),
            Color::from_rgb8(0xfb, 0x6a, 0x4a),
            Color::from_rgb8(0xcb, 0x18, 0x1d),
        ]);
    let ticks: Vec<Datum> = breaks.into_iter().map(Datum::Number).collect();
    let options = options.clone().with_tick_values(ticks);
    let mut bar = HorizontalColorbar::new(scale, options)?;
    let mut out = svg::SvgScene::new("quantile");
    out.apply_diffs(&bar.render(size));
    info!("quantile: {} marks", out.len());
    Ok(out)
}

/// Categorical swatches with a band marker.
fn discrete_demo(options: &ColorbarOptions, size: Size) -> Result<svg::SvgScene> {
    let scale = DiscreteColorScale::new(
        ["coal", "gas", "hydro", "nuclear", "solar", "wind"],
        vec![
            Color::from_rgb8(0x54, 0x54, 0x54),
            Color::from_rgb8(0xbb, 0x28, 0x28),
            Color::from_rgb8(0x2a, 0x72, 0xb5),
            Color::from_rgb8(0xae, 0xb8, 0x00),
            Color::from_rgb8(0xf2, 0x7d, 0x0c),
            Color::from_rgb8(0x74, 0xcd, 0xb9),
        ],
    );
    let mut bar = HorizontalColorbar::new(scale, options.clone())?;
    let mut out = svg::SvgScene::new("discrete");
    out.apply_diffs(&bar.render(size));
    out.apply_diffs(&bar.set_marker(Some(Datum::from("hydro"))));
    info!("discrete: {} marks", out.len());
    Ok(out)
}

/// A domain replacement followed by a re-render, with a custom tick format.
///
/// The color function covers the full temperature range, so widening the domain resamples a
/// wider slice of the same ramp.
fn rescaled_demo(options: &ColorbarOptions, size: Size) -> Result<svg::SvgScene> {
    let (cold, hot) = (-30.0, 45.0);
    let scale = ContinuousColorScale::new(vec![0.0, 20.0], move |v| {
        lerp_srgb(css::STEEL_BLUE, css::ORANGE, (v - cold) / (hot - cold))
    });
    let options = options.clone().with_tick_format(|d, step| match d {
        Datum::Number(v) => format!("{}°", colorbar::format_tick_with_step(*v, step)),
        Datum::Category(c) => c.clone(),
    });
    let mut bar = HorizontalColorbar::new(scale, options)?;
    let mut out = svg::SvgScene::new("rescaled");
    out.apply_diffs(&bar.render(size));
    bar.set_domain(Domain::Continuous(vec![cold, hot]))?;
    let diffs = bar.render(size);
    info!("rescaled: {} diffs after set_domain", diffs.len());
    out.apply_diffs(&diffs);
    Ok(out)
}
