// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Affine, Size, Vec2};

/// Components of a 2D affine matrix as produced by [`decompose`].
///
/// Angles are in degrees. Scale factors are the column norms of the linear part,
/// so a mirrored matrix reports positive scales; check [`Decomposed::is_flipped`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decomposed {
    /// Norm of the first column `(a, b)`.
    pub scale_x: f64,
    /// Norm of the second column `(c, d)`.
    pub scale_y: f64,
    /// Rotation of the first column, `atan2(b, a)`.
    pub rotate_deg: f64,
    /// Best-effort horizontal skew.
    pub skew_x_deg: f64,
    /// Always `0.0`; vertical skew is folded into rotation plus `skew_x_deg`.
    pub skew_y_deg: f64,
    /// Translation `e`.
    pub translate_x: f64,
    /// Translation `f`.
    pub translate_y: f64,
    determinant: f64,
}

impl Decomposed {
    /// Returns `true` when the linear part mirrors the plane (negative determinant).
    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.determinant < 0.0
    }

    /// Returns the translation components as a vector.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.translate_x, self.translate_y)
    }
}

/// Splits `matrix` into scale, rotation, skew and translation.
///
/// For the matrices this workspace produces (rotation, optional mirror, optional
/// single-axis skew) the rotation and translation are exact. The skew extraction
/// assumes the factorisation `R * SkewX * Scale` and is not guaranteed to
/// round-trip arbitrary input; singular matrices report zero skew.
#[must_use]
pub fn decompose(matrix: Affine) -> Decomposed {
    let [a, b, c, d, e, f] = matrix.as_coeffs();
    let determinant = a * d - b * c;
    let skew_x_deg = if determinant.abs() > f64::EPSILON {
        ((a * c + b * d) / determinant).atan().to_degrees()
    } else {
        0.0
    };
    Decomposed {
        scale_x: a.hypot(b),
        scale_y: c.hypot(d),
        rotate_deg: b.atan2(a).to_degrees(),
        skew_x_deg,
        skew_y_deg: 0.0,
        translate_x: e,
        translate_y: f,
        determinant,
    }
}

/// Multiplies two matrices: the result applies `m2` first, then `m1`.
#[must_use]
pub fn compose(m1: Affine, m2: Affine) -> Affine {
    m1 * m2
}

/// Returns `matrix` with its translation removed.
#[must_use]
pub fn linear_part(matrix: Affine) -> Affine {
    matrix.with_translation(Vec2::ZERO)
}

/// Maps an element's local box `(0, 0, w, h)` into document space.
///
/// `transform` is the element's own matrix: its translation is the box position
/// and its linear part is applied about the box centre.
#[must_use]
pub fn element_affine(transform: Affine, size: Size) -> Affine {
    let center = Vec2::new(size.width * 0.5, size.height * 0.5);
    Affine::translate(transform.translation() + center)
        * linear_part(transform)
        * Affine::translate(-center)
}

/// Serializes a matrix in the `matrix(a, b, c, d, e, f)` form.
#[must_use]
pub fn format_matrix(matrix: Affine) -> String {
    let [a, b, c, d, e, f] = matrix.as_coeffs();
    format!("matrix({a}, {b}, {c}, {d}, {e}, {f})")
}

/// Parses a `matrix(a, b, c, d, e, f)` string or `none`.
///
/// Components may be separated by commas, whitespace, or both.
pub fn parse_matrix(input: &str) -> Result<Affine, ParseMatrixError> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("none") {
        return Ok(Affine::IDENTITY);
    }
    let body = input
        .strip_prefix("matrix(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or(ParseMatrixError::NotAMatrix)?;

    let mut coeffs = [0.0_f64; 6];
    let mut count = 0;
    for token in body
        .split(|ch: char| ch == ',' || ch.is_whitespace())
        .filter(|token| !token.is_empty())
    {
        let value: f64 = token
            .parse()
            .map_err(|_| ParseMatrixError::InvalidNumber(token.to_owned()))?;
        if count < coeffs.len() {
            coeffs[count] = value;
        }
        count += 1;
    }
    if count != coeffs.len() {
        return Err(ParseMatrixError::WrongArity(count));
    }
    Ok(Affine::new(coeffs))
}

/// Failure to parse a serialized matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseMatrixError {
    /// The input is neither `none` nor wrapped in `matrix(...)`.
    NotAMatrix,
    /// The matrix did not have exactly six components.
    WrongArity(usize),
    /// A component was not a number.
    InvalidNumber(String),
}

impl fmt::Display for ParseMatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAMatrix => write!(f, "expected `none` or `matrix(a, b, c, d, e, f)`"),
            Self::WrongArity(count) => write!(f, "matrix has {count} components, expected 6"),
            Self::InvalidNumber(token) => write!(f, "invalid matrix component {token:?}"),
        }
    }
}

impl core::error::Error for ParseMatrixError {}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use kurbo::{Affine, Point, Size};

    use super::*;

    #[test]
    fn decompose_rotation_and_translation() {
        let m = Affine::translate((5.0, -3.0)) * Affine::rotate(FRAC_PI_2 / 3.0);
        let parts = decompose(m);
        assert!((parts.rotate_deg - 30.0).abs() < 1e-9);
        assert!((parts.scale_x - 1.0).abs() < 1e-12);
        assert!((parts.scale_y - 1.0).abs() < 1e-12);
        assert!(parts.skew_x_deg.abs() < 1e-9);
        assert_eq!(parts.translation(), Vec2::new(5.0, -3.0));
        assert!(!parts.is_flipped());
    }

    #[test]
    fn decompose_reports_mirror() {
        let parts = decompose(Affine::FLIP_X);
        assert!(parts.is_flipped());
        assert!((parts.scale_x - 1.0).abs() < 1e-12);
        assert!((parts.rotate_deg.abs() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn decompose_singular_matrix_is_best_effort() {
        let parts = decompose(Affine::scale_non_uniform(0.0, 2.0));
        assert_eq!(parts.skew_x_deg, 0.0);
        assert_eq!(parts.scale_x, 0.0);
    }

    #[test]
    fn compose_applies_right_operand_first() {
        let m = compose(Affine::translate((10.0, 0.0)), Affine::scale(2.0));
        assert_eq!(m * Point::new(1.0, 1.0), Point::new(12.0, 2.0));
    }

    #[test]
    fn element_affine_rotates_about_box_centre() {
        let size = Size::new(20.0, 10.0);
        let placed = element_affine(Affine::rotate(FRAC_PI_2 * 2.0), size);
        // A half turn about the centre swaps opposite corners.
        let corner = placed * Point::ZERO;
        assert!((corner.x - 20.0).abs() < 1e-9);
        assert!((corner.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn parse_accepts_commas_and_spaces() {
        let m = parse_matrix("matrix(1, 0 0,1, 30 5)").unwrap();
        assert_eq!(m, Affine::translate((30.0, 5.0)));
        assert_eq!(parse_matrix("none").unwrap(), Affine::IDENTITY);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(parse_matrix("scale(2)"), Err(ParseMatrixError::NotAMatrix));
        assert_eq!(
            parse_matrix("matrix(1, 0, 0, 1)"),
            Err(ParseMatrixError::WrongArity(4))
        );
        assert_eq!(
            parse_matrix("matrix(1, 0, 0, 1, x, 0)"),
            Err(ParseMatrixError::InvalidNumber("x".to_owned()))
        );
    }

    #[test]
    fn format_then_parse_preserves_coefficients() {
        let m = Affine::new([0.5, -0.25, 0.125, 2.0, 13.75, -4.5]);
        assert_eq!(parse_matrix(&format_matrix(m)).unwrap(), m);
    }
}
