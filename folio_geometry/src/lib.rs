// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio Geometry: stateless matrix and rectangle helpers.
//!
//! Everything in this crate is a pure function over [`kurbo`] types. It is the
//! shared vocabulary of the other `folio_*` crates:
//!
//! - [`decompose`] / [`compose`]: split a 2D affine matrix into scale, rotation,
//!   skew and translation, and multiply matrices.
//! - [`round`] / [`round_rect`]: half-up decimal rounding used to avoid hairline
//!   seams when overlay rectangles are stroked.
//! - [`element_affine`]: the document placement of an element box, following the
//!   CSS model where the linear part of a `matrix(a, b, c, d, e, f)` is applied
//!   about the box centre and `(e, f)` is the box position.
//! - [`format_matrix`] / [`parse_matrix`]: the serialized `matrix(...)` form that is
//!   attached to elements as their current transform annotation.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Affine, Size};
//! use folio_geometry::{decompose, element_affine};
//!
//! let rotated = Affine::rotate(core::f64::consts::FRAC_PI_2).then_translate((10.0, 10.0).into());
//! let parts = decompose(rotated);
//! assert!((parts.rotate_deg - 90.0).abs() < 1e-9);
//! assert!((parts.translate_x - 10.0).abs() < 1e-9);
//!
//! // A 100x50 box at (10, 10): its top-left corner lands on the translation
//! // when the linear part is the identity.
//! let placed = element_affine(Affine::translate((10.0, 10.0)), Size::new(100.0, 50.0));
//! assert_eq!(placed * kurbo::Point::ZERO, kurbo::Point::new(10.0, 10.0));
//! ```

mod matrix;
mod rect;

pub use matrix::{
    Decomposed, ParseMatrixError, compose, decompose, element_affine, format_matrix,
    linear_part, parse_matrix,
};
pub use rect::{
    contains_rect, element_bounds, rect_from_corners, round, round_rect, transformed_bbox,
    union_all,
};
