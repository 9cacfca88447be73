// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported synchronously by scale resolution.

use thiserror::Error;

use crate::color_scale::ScaleKind;

/// Validation failures from resolving a domain (and optional color range).
///
/// These are fatal to construction and to domain replacement; a failed domain replacement
/// leaves the previous state untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorbarError {
    /// The domain has no (finite) values.
    #[error("colorbar domain is empty")]
    EmptyDomain,

    /// An explicit color range cannot be assigned to the domain.
    ///
    /// Raised when the range has no colors (either scale kind), or when a discrete domain and
    /// its range disagree in length.
    #[error("color range has {range_len} colors for a domain of {domain_len} values")]
    MismatchedRange {
        /// Number of values (continuous samples or categories) in the domain.
        domain_len: usize,
        /// Number of colors in the explicit range.
        range_len: usize,
    },

    /// A replacement domain does not match the scale kind fixed at construction.
    #[error("expected a {expected:?} domain, got a {actual:?} domain")]
    KindMismatch {
        /// The kind the colorbar was constructed with.
        expected: ScaleKind,
        /// The kind of the rejected domain.
        actual: ScaleKind,
    },
}
