// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Domain values.
//!
//! A colorbar describes either a numeric (continuous) domain or a finite list of categories
//! (discrete). Raw continuous domains may be unsorted (for example the breakpoints of a
//! quantile scale); only their extent and the relative position of each sample matter.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::color_scale::ScaleKind;

/// A single domain value: a tick value, a marker value, or a domain sample.
#[derive(Clone, Debug, PartialEq)]
pub enum Datum {
    /// A numeric value (continuous scales).
    Number(f64),
    /// A category label (discrete scales).
    Category(String),
}

impl Datum {
    /// Returns the numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Category(_) => None,
        }
    }

    /// Returns the category label, if this is a category.
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Category(c) => Some(c),
        }
    }
}

impl From<f64> for Datum {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Datum {
    fn from(value: &str) -> Self {
        Self::Category(value.into())
    }
}

impl From<String> for Datum {
    fn from(value: String) -> Self {
        Self::Category(value)
    }
}

/// An ordered domain, either numeric samples or categories.
#[derive(Clone, Debug, PartialEq)]
pub enum Domain {
    /// Numeric samples. Order is irrelevant to the extent.
    Continuous(Vec<f64>),
    /// Categories in display order (left to right).
    Discrete(Vec<String>),
}

impl Domain {
    /// Convenience constructor for a discrete domain.
    pub fn categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Discrete(categories.into_iter().map(Into::into).collect())
    }

    /// The scale kind this domain belongs to.
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Continuous(_) => ScaleKind::Continuous,
            Self::Discrete(_) => ScaleKind::Discrete,
        }
    }

    /// Number of raw domain entries.
    pub fn len(&self) -> usize {
        match self {
            Self::Continuous(v) => v.len(),
            Self::Discrete(v) => v.len(),
        }
    }

    /// Returns `true` if the domain has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of `category` in a discrete domain.
    pub fn index_of(&self, category: &str) -> Option<usize> {
        match self {
            Self::Continuous(_) => None,
            Self::Discrete(v) => v.iter().position(|c| c == category),
        }
    }
}

impl From<Vec<f64>> for Domain {
    fn from(value: Vec<f64>) -> Self {
        Self::Continuous(value)
    }
}

/// Order-independent `(min, max)` of the finite values in `values`.
///
/// Returns `None` if no finite values are present.
pub fn extent(values: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn extent_ignores_input_order() {
        assert_eq!(extent(&[5.0, -2.0, 9.0, 0.0]), Some((-2.0, 9.0)));
        assert_eq!(extent(&[9.0, 5.0, -2.0]), extent(&[-2.0, 5.0, 9.0]));
    }

    #[test]
    fn extent_skips_non_finite_values() {
        assert_eq!(extent(&[f64::NAN, 3.0, f64::INFINITY, 1.0]), Some((1.0, 3.0)));
        assert_eq!(extent(&[f64::NAN]), None);
        assert_eq!(extent(&[]), None);
    }

    #[test]
    fn discrete_domain_lookup() {
        let d = Domain::categories(["a", "b", "c"]);
        assert_eq!(d.kind(), ScaleKind::Discrete);
        assert_eq!(d.index_of("c"), Some(2));
        assert_eq!(d.index_of("z"), None);
        assert_eq!(Domain::from(vec![1.0]).index_of("a"), None);
    }
}
