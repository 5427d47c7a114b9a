// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: element identifiers, kinds, and frames.

use core::fmt;

use folio_geometry::{ParseMatrixError, element_affine, element_bounds, format_matrix, parse_matrix};
use kurbo::{Affine, Point, Rect, Size, Vec2};
use smallvec::SmallVec;

/// Identifier for an element in an [`ElementStore`](crate::ElementStore).
///
/// A slot index plus a generation counter. Removing an element frees its slot;
/// reusing the slot bumps the generation, so old ids stop matching.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    /// Builds an id from raw parts.
    ///
    /// Stores other than [`ElementArena`](crate::ElementArena) use this to mint
    /// handles for their own tables.
    #[must_use]
    pub const fn from_raw(slot: u32, generation: u32) -> Self {
        Self(slot, generation)
    }

    /// The slot index.
    #[must_use]
    pub const fn slot(self) -> u32 {
        self.0
    }

    /// The generation of the slot this id was minted for.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.1
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Hit-test results, topmost first. Most points hit a handful of elements.
pub type HitList = SmallVec<[ElementId; 4]>;

/// What an element is, as far as the surface cares.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ElementKind {
    /// A plain box, created by the rectangle tool.
    Rectangle,
    /// A text container, created by the frame-text tool.
    TextFrame,
    /// An image.
    Image,
    /// Any other content.
    Generic,
}

impl ElementKind {
    /// Type label shown in status messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rectangle => "Rectangle",
            Self::TextFrame => "Text frame",
            Self::Image => "Image",
            Self::Generic => "Element",
        }
    }
}

/// Geometry of one element in document space.
///
/// The element box is `(0, 0, width, height)`, positioned at the translation of
/// `transform`; the linear part of `transform` applies about the box centre.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ElementFrame {
    /// The element's own matrix.
    pub transform: Affine,
    /// Width and height of the untransformed box.
    pub size: Size,
}

impl ElementFrame {
    /// An untransformed box at `position`.
    #[must_use]
    pub fn new(position: Point, size: Size) -> Self {
        Self {
            transform: Affine::translate(position.to_vec2()),
            size,
        }
    }

    /// The box position (the matrix translation).
    #[must_use]
    pub fn position(&self) -> Point {
        self.transform.translation().to_point()
    }

    /// Returns a copy moved by `delta` in document space.
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            transform: self.transform.then_translate(delta),
            size: self.size,
        }
    }

    /// Maps the local box into document space.
    #[must_use]
    pub fn document_affine(&self) -> Affine {
        element_affine(self.transform, self.size)
    }

    /// Axis-aligned document-space bounds.
    #[must_use]
    pub fn document_bounds(&self) -> Rect {
        element_bounds(Affine::IDENTITY, self.transform, self.size)
    }

    /// Returns `true` if the transformed box contains `pt`, edges included.
    #[must_use]
    pub fn contains_document_point(&self, pt: Point) -> bool {
        let affine = self.document_affine();
        if affine.determinant().abs() <= f64::EPSILON {
            return false;
        }
        let local = affine.inverse() * pt;
        local.x >= 0.0
            && local.y >= 0.0
            && local.x <= self.size.width
            && local.y <= self.size.height
    }

    /// The serialized matrix annotation, `matrix(a, b, c, d, e, f)`.
    #[must_use]
    pub fn matrix_string(&self) -> String {
        format_matrix(self.transform)
    }

    /// Reads a frame back from its matrix annotation.
    ///
    /// `none` yields an untransformed box at the origin.
    pub fn from_matrix_string(text: &str, size: Size) -> Result<Self, ParseMatrixError> {
        Ok(Self {
            transform: parse_matrix(text)?,
            size,
        })
    }
}

/// A write was addressed to an element that is no longer live.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StaleElement(pub ElementId);

impl fmt::Display for StaleElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "element {}:{} is not live",
            self.0.slot(),
            self.0.generation()
        )
    }
}

impl core::error::Error for StaleElement {}
