// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for colorbar marks.
//!
//! Renderers should sort by `(z_index, MarkId)` for a deterministic tie-break.

/// Gradient bar or discrete swatches.
pub const BAR_FILL: i32 = 0;
/// Outline around the drawable area.
pub const BORDER: i32 = 10;
/// Marker rule (continuous) or outlined band (discrete).
pub const MARKER: i32 = 20;
/// Axis tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
