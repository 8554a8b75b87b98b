// Copyright 2025 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry and falloff primitives for pointer-proximity effects.
//!
//! This crate provides the small, pure building blocks the rest of Limelight
//! computes with, built on top of [`kurbo`]. It is intentionally decoupled
//! from any particular card controller or coordinator.
//!
//! # Typical usage
//!
//! - Convert a pointer position into card-local glow coordinates with
//!   [`relative_position`].
//! - Measure how far the pointer is from a card's influence circle with
//!   [`edge_distance`].
//! - Grade that distance into a `[0, 1]` glow intensity with a
//!   [`FalloffBand`] derived from the spotlight radius.
//!
//! # Key types
//!
//! - [`FalloffBand`] – proximity/fade thresholds and the piecewise-linear
//!   intensity curve between them.
//! - [`Viewport`] – host viewport dimensions and the compact-viewport
//!   policy test used to disable effects on small screens.
//! - [`Rgb`] – a pass-through color triple for glow tinting; this crate
//!   performs no color math.
//!
//! ## Effective distance
//!
//! [`edge_distance`] measures the distance from a point to a rectangle's
//! *bounding influence circle*: the circle centered on the rect whose radius
//! is half the larger side. The result is floored at zero, so any pointer
//! inside or touching that circle reports distance 0. Degenerate rectangles
//! (zero-size, inverted, or non-finite) degrade to plain distance-to-center
//! rather than producing an error.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use limelight_glow::{edge_distance, FalloffBand};
//!
//! let card = Rect::new(100.0, 100.0, 300.0, 200.0);
//!
//! // Inside the card: effective distance is zero.
//! assert_eq!(edge_distance(Point::new(150.0, 150.0), card), 0.0);
//!
//! // A band derived from a 300px spotlight radius.
//! let band = FalloffBand::from_radius(300.0);
//! assert_eq!(band.intensity(100.0), 1.0);
//! assert_eq!(band.intensity(300.0), 0.0);
//! ```
//!
//! This crate is `no_std` and has no allocator requirement.

#![no_std]

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect};

/// Fraction of the spotlight radius inside which intensity is saturated.
pub const PROXIMITY_RATIO: f64 = 0.45;

/// Fraction of the spotlight radius at which intensity reaches zero.
pub const FADE_RATIO: f64 = 0.85;

/// Largest short side, in logical units, treated as a compact viewport.
pub const COMPACT_VIEWPORT_MAX: f64 = 768.0;

/// An RGB color triple used to tint glows and ripples.
///
/// Limelight never does color arithmetic; the triple is carried through to
/// the host's rendering sink untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Default for Rgb {
    /// The stock violet glow.
    fn default() -> Self {
        Self(132, 0, 255)
    }
}

/// Host viewport dimensions in logical units.
///
/// Used only for the compact-viewport disable policy; the engine does not
/// otherwise care how large the surface is.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport from width and height.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The shorter of the two dimensions.
    pub fn short_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Whether effects should be disabled under the compact-viewport policy.
    ///
    /// True when the short side is at most [`COMPACT_VIEWPORT_MAX`].
    pub fn is_compact(&self) -> bool {
        self.short_side() <= COMPACT_VIEWPORT_MAX
    }
}

/// Pointer position within `rect`, as percentages of its extent.
///
/// Returns `(x, y)` in `[0, 100]`, clamped. An axis with a degenerate
/// extent (zero, inverted, or non-finite) reports its midpoint, 50.
///
/// ```
/// use kurbo::{Point, Rect};
/// use limelight_glow::relative_position;
///
/// let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
/// assert_eq!(relative_position(Point::new(50.0, 75.0), rect), (25.0, 75.0));
/// // Clamped when the pointer is outside the rect.
/// assert_eq!(relative_position(Point::new(-10.0, 150.0), rect), (0.0, 100.0));
/// ```
pub fn relative_position(pointer: Point, rect: Rect) -> (f64, f64) {
    let axis = |offset: f64, extent: f64| -> f64 {
        if extent > 0.0 && extent.is_finite() {
            (offset / extent * 100.0).clamp(0.0, 100.0)
        } else {
            50.0
        }
    };
    (
        axis(pointer.x - rect.x0, rect.width()),
        axis(pointer.y - rect.y0, rect.height()),
    )
}

/// Whether `pointer` is inside `rect`, edges included.
///
/// Pointer containment for surfaces is edge-inclusive: a pointer resting
/// exactly on the boundary still counts as inside. Degenerate rects with a
/// negative extent contain nothing.
pub fn contains(pointer: Point, rect: Rect) -> bool {
    pointer.x >= rect.x0 && pointer.x <= rect.x1 && pointer.y >= rect.y0 && pointer.y <= rect.y1
}

/// Effective distance from `pointer` to the influence circle of `rect`.
///
/// Euclidean distance to the rect center, minus half of the larger side,
/// floored at zero. A pointer anywhere inside the rect (or inside the
/// circumscribing influence circle) reports 0. Degenerate rects contribute
/// no influence radius and degrade to distance-to-center.
pub fn edge_distance(pointer: Point, rect: Rect) -> f64 {
    let mut half_extent = 0.5 * rect.width().max(rect.height());
    if !half_extent.is_finite() || half_extent < 0.0 {
        half_extent = 0.0;
    }
    (pointer.distance(rect.center()) - half_extent).max(0.0)
}

/// Proximity/fade thresholds with a piecewise-linear intensity curve.
///
/// Intensity is 1 at or inside `proximity`, fades linearly to 0 at `fade`,
/// and is exactly 0 beyond. Both boundary comparisons are inclusive on the
/// near side, so intensities at the thresholds are exact.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FalloffBand {
    /// Distance at or inside which intensity saturates to 1.
    pub proximity: f64,
    /// Distance at which intensity reaches 0.
    pub fade: f64,
}

impl FalloffBand {
    /// Derive the band from a spotlight radius using the standard ratios.
    pub fn from_radius(radius: f64) -> Self {
        Self {
            proximity: radius * PROXIMITY_RATIO,
            fade: radius * FADE_RATIO,
        }
    }

    /// Piecewise-linear intensity for an effective distance.
    ///
    /// Monotonically non-increasing in `eff`; exactly 1 for
    /// `eff <= proximity`, exactly 0 for `eff > fade`.
    pub fn intensity(&self, eff: f64) -> f64 {
        if eff <= self.proximity {
            1.0
        } else if eff <= self.fade {
            (self.fade - eff) / (self.fade - self.proximity)
        } else {
            0.0
        }
    }
}

/// Quantize an intensity to two decimal places.
///
/// Coordinators publish intensities at this resolution so per-move updates
/// settle instead of churning on float noise.
pub fn quantize_intensity(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_position_is_percentage_of_extent() {
        let rect = Rect::new(100.0, 100.0, 300.0, 200.0);
        let (x, y) = relative_position(Point::new(150.0, 175.0), rect);
        assert_eq!(x, 25.0);
        assert_eq!(y, 75.0);
    }

    #[test]
    fn relative_position_clamps_outside_pointers() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(relative_position(Point::new(-50.0, -50.0), rect), (0.0, 0.0));
        assert_eq!(
            relative_position(Point::new(400.0, 300.0), rect),
            (100.0, 100.0)
        );
    }

    #[test]
    fn relative_position_degenerate_axis_reports_midpoint() {
        let flat = Rect::new(10.0, 10.0, 210.0, 10.0);
        let (x, y) = relative_position(Point::new(60.0, 10.0), flat);
        assert_eq!(x, 25.0);
        assert_eq!(y, 50.0);

        let inverted = Rect::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(relative_position(Point::new(5.0, 5.0), inverted), (50.0, 50.0));
    }

    #[test]
    fn edge_distance_zero_inside_rect() {
        let rect = Rect::new(100.0, 100.0, 300.0, 200.0);
        // Strictly interior points all report zero.
        for p in [
            Point::new(101.0, 101.0),
            Point::new(200.0, 150.0),
            Point::new(299.0, 199.0),
        ] {
            assert_eq!(edge_distance(p, rect), 0.0, "interior point {p:?}");
        }
    }

    #[test]
    fn edge_distance_zero_within_influence_circle() {
        // 200x100 card: influence radius is 100 around the center.
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(edge_distance(Point::new(100.0, 140.0), rect), 0.0);
    }

    #[test]
    fn edge_distance_measures_beyond_influence() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        // 150 to the right of center, influence radius 100.
        assert_eq!(edge_distance(Point::new(250.0, 50.0), rect), 50.0);
    }

    #[test]
    fn edge_distance_degenerate_rect_is_point_distance() {
        let point_rect = Rect::new(10.0, 20.0, 10.0, 20.0);
        assert_eq!(edge_distance(Point::new(13.0, 24.0), point_rect), 5.0);

        let nan_rect = Rect::new(0.0, 0.0, f64::NAN, 10.0);
        assert!(edge_distance(Point::new(3.0, 4.0), nan_rect).is_finite());
    }

    #[test]
    fn contains_is_edge_inclusive() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(contains(Point::new(0.0, 0.0), rect));
        assert!(contains(Point::new(100.0, 50.0), rect));
        assert!(contains(Point::new(50.0, 25.0), rect));
        assert!(!contains(Point::new(100.1, 25.0), rect));
        // Inverted rects contain nothing.
        assert!(!contains(Point::new(5.0, 5.0), Rect::new(10.0, 10.0, 0.0, 0.0)));
    }

    #[test]
    fn falloff_band_from_radius() {
        let band = FalloffBand::from_radius(300.0);
        assert_eq!(band.proximity, 135.0);
        assert_eq!(band.fade, 255.0);
    }

    #[test]
    fn falloff_exact_at_boundaries() {
        let band = FalloffBand::from_radius(300.0);
        assert_eq!(band.intensity(0.0), 1.0);
        assert_eq!(band.intensity(135.0), 1.0);
        assert_eq!(band.intensity(255.0), 0.0);
        assert_eq!(band.intensity(256.0), 0.0);
        assert_eq!(band.intensity(1000.0), 0.0);
    }

    #[test]
    fn falloff_scenario_radius_300() {
        let band = FalloffBand::from_radius(300.0);
        assert_eq!(band.intensity(100.0), 1.0);
        // (255 - 200) / (255 - 135) = 0.458…, published as 0.46.
        assert_eq!(quantize_intensity(band.intensity(200.0)), 0.46);
        assert_eq!(band.intensity(300.0), 0.0);
    }

    #[test]
    fn falloff_monotone_between_thresholds() {
        let band = FalloffBand::from_radius(300.0);
        let mut prev = band.intensity(band.proximity);
        let mut eff = band.proximity;
        while eff <= band.fade {
            let i = band.intensity(eff);
            assert!(i <= prev, "intensity must not increase at {eff}");
            prev = i;
            eff += 1.0;
        }
    }

    #[test]
    fn viewport_compact_policy() {
        assert!(Viewport::new(375.0, 812.0).is_compact());
        // The threshold itself counts as compact.
        assert!(Viewport::new(768.0, 1024.0).is_compact());
        assert!(!Viewport::new(1280.0, 800.0).is_compact());
    }
}
