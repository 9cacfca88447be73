// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::domain::Datum;

/// A custom tick label formatter.
///
/// Receives the tick datum and the tick step (`0` for categories and explicit single ticks).
pub type TickFormatter = Arc<dyn Fn(&Datum, f64) -> String>;

const MAX_DECIMALS: usize = 12;

/// Formats a numeric tick value with a decimal count derived from the tick step.
///
/// A step of `20` gives `"40"`, a step of `0.5` gives `"1.5"`, and a step of `0.25` gives
/// `"0.25"`. A zero or non-finite step falls back to the shortest round-trip representation.
/// Negative zero is printed as `"0"`.
pub fn format_tick_with_step(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let Some(decimals) = decimals_for_step(step) else {
        let value = if value == 0.0 { 0.0 } else { value };
        return format!("{value}");
    };
    let scale = 10_f64.powf(decimals as f64);
    let value = if (value * scale).round() == 0.0 {
        0.0
    } else {
        value
    };
    format!("{value:.decimals$}")
}

/// Formats any tick datum with the default policy.
pub fn format_datum(datum: &Datum, step: f64) -> String {
    match datum {
        Datum::Number(v) => format_tick_with_step(*v, step),
        Datum::Category(c) => c.clone(),
    }
}

/// Smallest decimal count that represents multiples of `step` exactly (up to a cap).
fn decimals_for_step(step: f64) -> Option<usize> {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return None;
    }
    let mut scaled = step;
    for decimals in 0..=MAX_DECIMALS {
        if (scaled - scaled.round()).abs() <= 1.0e-6 * scaled.max(1.0) {
            return Some(decimals);
        }
        scaled *= 10.0;
    }
    Some(MAX_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals_follow_step() {
        assert_eq!(format_tick_with_step(40.0, 20.0), "40");
        assert_eq!(format_tick_with_step(1.5, 0.5), "1.5");
        assert_eq!(format_tick_with_step(1.0, 0.5), "1.0");
        assert_eq!(format_tick_with_step(0.25, 0.25), "0.25");
        assert_eq!(format_tick_with_step(0.30000000000000004, 0.1), "0.3");
    }

    #[test]
    fn negative_zero_is_normalised() {
        assert_eq!(format_tick_with_step(-0.0, 1.0), "0");
        assert_eq!(format_tick_with_step(-1.0e-17, 0.1), "0.0");
        assert_eq!(format_tick_with_step(-0.0, 0.0), "0");
    }

    #[test]
    fn zero_step_uses_shortest_representation() {
        assert_eq!(format_tick_with_step(2.5, 0.0), "2.5");
        assert_eq!(format_datum(&Datum::Category("b".into()), 0.0), "b");
    }
}
