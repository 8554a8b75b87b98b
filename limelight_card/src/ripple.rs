// Copyright 2025 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click ripples: independent, self-terminating radial pulses.

use kurbo::{Point, Rect};
use limelight_tween::{Easing, Track};

/// Lifetime of a ripple from spawn to removal, in milliseconds.
const RIPPLE_MS: u64 = 750;

/// One in-flight click ripple.
///
/// A ripple is spawned at the click point, sized so that its final radius
/// reaches the farthest corner of the card (full coverage wherever the
/// click lands), and animates scale 0→1 while fading opacity 1→0. Ripples
/// are independent: concurrent clicks spawn concurrent ripples and none of
/// them cancels another. A ripple owns its own tweens and is discarded by
/// the controller on the sample that completes them.
#[derive(Clone, Debug)]
pub struct Ripple {
    center: Point,
    radius: f64,
    scale: Track<f64>,
    opacity: Track<f64>,
}

impl Ripple {
    /// Spawn a ripple at a card-local click point.
    pub(crate) fn spawn(center: Point, rect: Rect, now: u64) -> Self {
        let mut scale = Track::new(0.0);
        scale.animate_to(1.0, RIPPLE_MS, Easing::CubicOut, now);
        let mut opacity = Track::new(1.0);
        opacity.animate_to(0.0, RIPPLE_MS, Easing::CubicOut, now);
        Self {
            center,
            radius: corner_reach(center, rect),
            scale,
            opacity,
        }
    }

    /// Advance both tweens; true when the ripple has finished and should be
    /// discarded.
    pub(crate) fn advance(&mut self, now: u64) -> bool {
        let done = self.scale.sample(now).finished;
        self.opacity.sample(now);
        done
    }

    /// Render snapshot.
    pub fn frame(&self) -> RippleFrame {
        RippleFrame {
            center: self.center,
            radius: self.radius,
            scale: self.scale.get(),
            opacity: self.opacity.get(),
        }
    }
}

/// Snapshot of one ripple for the host's rendering sink.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RippleFrame {
    /// Click point in card-local coordinates.
    pub center: Point,
    /// Final radius: the distance to the farthest card corner.
    pub radius: f64,
    /// Current scale in `[0, 1]`.
    pub scale: f64,
    /// Current opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Distance from a card-local point to the farthest of the card's four
/// corners. Guarantees a circle of this radius covers the whole card.
fn corner_reach(local: Point, rect: Rect) -> f64 {
    let w = rect.width().max(0.0);
    let h = rect.height().max(0.0);
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(0.0, h),
        Point::new(w, h),
    ];
    corners
        .iter()
        .map(|c| local.distance(*c))
        .fold(0.0, f64::max)
}
