// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use folio_overlay::{HandleLayout, OverlayStyle};
use folio_transform::RotateMode;
use folio_viewport::{MAX_SCALE, MIN_SCALE};
use peniko::Color;

/// Tunables of the editing surface.
///
/// Distances are in screen pixels and durations in milliseconds. Build one with
/// [`SurfaceConfig::default`] and adjust fields; [`Surface::new`](crate::Surface::new)
/// rejects values that fail [`SurfaceConfig::validate`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SurfaceConfig {
    /// Smallest allowed viewport scale.
    pub min_scale: f64,
    /// Largest allowed viewport scale.
    pub max_scale: f64,
    /// How long a click stays eligible for cycle selection.
    pub selection_delay_ms: u64,
    /// Quiet time after pan or zoom input before boxes are re-measured.
    pub settle_delay_ms: u64,
    /// Pointer travel (on either axis) that turns a click into a drag.
    pub drag_threshold: f64,
    /// Outer-rectangle width/height below which mid-edge handles are hidden.
    pub handle_min_extent: f64,
    /// Side of a handle square.
    pub handle_size: f64,
    /// Offset of rotate handles outside the corners.
    pub rotate_handle_offset: f64,
    /// Offset of shear handles outside the mid-edges.
    pub shear_handle_offset: f64,
    /// Logarithmic zoom per pixel of wheel delta.
    pub wheel_zoom_sensitivity: f64,
    /// Margin kept around the document by zoom-to-fit.
    pub fit_margin: f64,
    /// Rotate each element about its own centre instead of the shared pivot.
    pub independent_rotation: bool,
    /// Overlay colours, as RGBA bytes.
    pub colors: OverlayColors,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            selection_delay_ms: 250,
            settle_delay_ms: 250,
            drag_threshold: 2.0,
            handle_min_extent: 20.0,
            handle_size: 8.0,
            rotate_handle_offset: 14.0,
            shear_handle_offset: 12.0,
            wheel_zoom_sensitivity: 0.0015,
            fit_margin: 20.0,
            independent_rotation: false,
            colors: OverlayColors::default(),
        }
    }
}

/// RGBA colours of the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayColors {
    /// Element boxes.
    pub element: [u8; 4],
    /// Outer rectangle.
    pub outer: [u8; 4],
    /// Marquee.
    pub marquee: [u8; 4],
    /// Handle fill.
    pub handle_fill: [u8; 4],
    /// Handle stroke.
    pub handle_stroke: [u8; 4],
}

impl Default for OverlayColors {
    fn default() -> Self {
        Self {
            element: [0x1a, 0x73, 0xe8, 0x99],
            outer: [0x1a, 0x73, 0xe8, 0xff],
            marquee: [0x1a, 0x73, 0xe8, 0x66],
            handle_fill: [0xff, 0xff, 0xff, 0xff],
            handle_stroke: [0x1a, 0x73, 0xe8, 0xff],
        }
    }
}

fn color([r, g, b, a]: [u8; 4]) -> Color {
    Color::from_rgba8(r, g, b, a)
}

impl SurfaceConfig {
    /// Checks every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("drag_threshold", self.drag_threshold),
            ("handle_min_extent", self.handle_min_extent),
            ("handle_size", self.handle_size),
            ("rotate_handle_offset", self.rotate_handle_offset),
            ("shear_handle_offset", self.shear_handle_offset),
            ("wheel_zoom_sensitivity", self.wheel_zoom_sensitivity),
            ("fit_margin", self.fit_margin),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.min_scale <= 0.0 || self.min_scale > self.max_scale {
            return Err(ConfigError::ScaleRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if self.handle_size == 0.0 {
            return Err(ConfigError::Zero {
                field: "handle_size",
            });
        }
        if self.wheel_zoom_sensitivity == 0.0 {
            return Err(ConfigError::Zero {
                field: "wheel_zoom_sensitivity",
            });
        }
        Ok(())
    }

    /// Returns a copy with out-of-range values replaced by defaults, logging
    /// each replacement.
    ///
    /// Useful for settings loaded from disk, where rejecting the whole
    /// configuration would be worse than fixing a field.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let fix = |field: &'static str, value: &mut f64, fallback: f64, check: fn(f64) -> bool| {
            if !check(*value) {
                tracing::warn!(
                    field,
                    value = *value,
                    fallback,
                    "invalid surface setting replaced"
                );
                *value = fallback;
            }
        };
        let ok: fn(f64) -> bool = |v| v.is_finite() && v >= 0.0;
        let positive: fn(f64) -> bool = |v| v.is_finite() && v > 0.0;

        fix("min_scale", &mut self.min_scale, defaults.min_scale, positive);
        fix("max_scale", &mut self.max_scale, defaults.max_scale, positive);
        if self.min_scale > self.max_scale {
            tracing::warn!(
                min = self.min_scale,
                max = self.max_scale,
                "scale bounds swapped"
            );
            core::mem::swap(&mut self.min_scale, &mut self.max_scale);
        }
        fix("drag_threshold", &mut self.drag_threshold, defaults.drag_threshold, ok);
        fix(
            "handle_min_extent",
            &mut self.handle_min_extent,
            defaults.handle_min_extent,
            ok,
        );
        fix("handle_size", &mut self.handle_size, defaults.handle_size, positive);
        fix(
            "rotate_handle_offset",
            &mut self.rotate_handle_offset,
            defaults.rotate_handle_offset,
            ok,
        );
        fix(
            "shear_handle_offset",
            &mut self.shear_handle_offset,
            defaults.shear_handle_offset,
            ok,
        );
        fix(
            "wheel_zoom_sensitivity",
            &mut self.wheel_zoom_sensitivity,
            defaults.wheel_zoom_sensitivity,
            positive,
        );
        fix("fit_margin", &mut self.fit_margin, defaults.fit_margin, ok);
        self
    }

    /// Overlay style derived from the handle and colour settings.
    #[must_use]
    pub fn overlay_style(&self) -> OverlayStyle {
        OverlayStyle {
            element_color: color(self.colors.element),
            outer_color: color(self.colors.outer),
            marquee_color: color(self.colors.marquee),
            handle_fill: color(self.colors.handle_fill),
            handle_stroke: color(self.colors.handle_stroke),
            handles: HandleLayout {
                size: self.handle_size,
                rotate_offset: self.rotate_handle_offset,
                shear_offset: self.shear_handle_offset,
                min_extent: self.handle_min_extent,
            },
            ..OverlayStyle::default()
        }
    }

    /// The rotation mode selected by [`SurfaceConfig::independent_rotation`].
    #[must_use]
    pub fn rotate_mode(&self) -> RotateMode {
        if self.independent_rotation {
            RotateMode::Independent
        } else {
            RotateMode::Group
        }
    }
}

/// A [`SurfaceConfig`] field is out of range.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The field is NaN or infinite.
    NotFinite {
        /// Field name.
        field: &'static str,
    },
    /// The field must not be negative.
    Negative {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// The field must not be zero.
    Zero {
        /// Field name.
        field: &'static str,
    },
    /// `min_scale` must be positive and not above `max_scale`.
    ScaleRange {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFinite { field } => write!(f, "`{field}` must be finite"),
            Self::Negative { field, value } => {
                write!(f, "`{field}` must not be negative (got {value})")
            }
            Self::Zero { field } => write!(f, "`{field}` must not be zero"),
            Self::ScaleRange { min, max } => {
                write!(f, "invalid scale range {min}..={max}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
