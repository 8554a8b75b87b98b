// Copyright 2025 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic tween tracks and one-shot deadlines.
//!
//! There are no real timers here. Every operation takes an explicit
//! `now: u64` timestamp in milliseconds and all state is plain data, so
//! hosts drive animation from their own frame loop and tests simulate time
//! by passing timestamps. The crate has no knowledge of cards, spotlights,
//! or any other Limelight domain type.
//!
//! # Key types
//!
//! - [`Track`] – one animated property group: a current value plus *at most
//!   one* in-flight tween. Starting a new tween replaces the old one
//!   mid-flight (never queues), picking up from the currently sampled
//!   value.
//! - [`Easing`] – monotonic ease-out curves; [`Easing::CubicOut`] is the
//!   engine default.
//! - [`Deadline`] – a one-shot timer represented as data: arm it, cancel
//!   it, or let [`Deadline::fire`] report (exactly once) that it elapsed.
//! - [`Lerp`] – value interpolation for scalars, points, vectors, and
//!   pairs.
//!
//! # Completion
//!
//! [`Track::sample`] advances the track and reports a completion edge via
//! [`Step::finished`] on the sample that lands the tween. Owners of
//! transient objects (click ripples, for example) use that edge to retire
//! them; it is the deterministic equivalent of an on-complete callback.
//!
//! ```
//! use limelight_tween::{Easing, Track};
//!
//! let mut opacity = Track::new(0.0);
//! opacity.animate_to(1.0, 200, Easing::Linear, 1_000);
//!
//! assert_eq!(opacity.sample(1_100).value, 0.5);
//! let step = opacity.sample(1_200);
//! assert_eq!(step.value, 1.0);
//! assert!(step.finished);
//! ```
//!
//! This crate is `no_std` and has no allocator requirement.

#![no_std]

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

/// Monotonic easing curves mapping `t` in `[0, 1]` to `[0, 1]`.
///
/// All curves are ease-out: fast start, smooth settle. Inputs outside
/// `[0, 1]` are clamped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant velocity. Mostly useful in tests.
    Linear,
    /// `1 - (1 - t)^2`.
    QuadOut,
    /// `1 - (1 - t)^3`. The engine default.
    #[default]
    CubicOut,
}

impl Easing {
    /// Evaluate the curve at `t`, clamping `t` to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadOut => 1.0 - (1.0 - t).powi(2),
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// Linear interpolation between two values of a property group.
pub trait Lerp: Copy {
    /// Interpolate from `self` toward `to` by fraction `t` in `[0, 1]`.
    fn lerp(self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Point {
    fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for (f64, f64) {
    fn lerp(self, to: Self, t: f64) -> Self {
        (self.0.lerp(to.0, t), self.1.lerp(to.1, t))
    }
}

/// An in-flight interpolation toward a target value.
#[derive(Copy, Clone, Debug)]
struct Tween<V> {
    from: V,
    to: V,
    start: u64,
    duration: u64,
    easing: Easing,
}

impl<V: Lerp> Tween<V> {
    fn end(&self) -> u64 {
        self.start.saturating_add(self.duration)
    }

    fn value_at(&self, now: u64) -> V {
        let elapsed = now.saturating_sub(self.start);
        #[allow(
            clippy::cast_precision_loss,
            reason = "Durations are small (milliseconds); f64 is exact here."
        )]
        let t = elapsed as f64 / self.duration as f64;
        self.from.lerp(self.to, self.easing.apply(t))
    }
}

/// Result of advancing a [`Track`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Step<V> {
    /// The value after advancing.
    pub value: V,
    /// True exactly once, on the sample that completes a tween.
    pub finished: bool,
}

/// One animated property group: a value plus at most one in-flight tween.
///
/// Replacement semantics: [`Track::animate_to`] cancels any active tween
/// and starts the new one from the value sampled at that instant, so
/// animations never queue and never jump.
#[derive(Copy, Clone, Debug)]
pub struct Track<V> {
    value: V,
    tween: Option<Tween<V>>,
}

impl<V: Lerp> Track<V> {
    /// Create a track resting at `value`.
    pub const fn new(value: V) -> Self {
        Self { value, tween: None }
    }

    /// The value as of the last sample or set.
    pub fn get(&self) -> V {
        self.value
    }

    /// Where the track is headed: the tween target, or the resting value.
    pub fn target(&self) -> V {
        self.tween.map_or(self.value, |tw| tw.to)
    }

    /// Whether a tween is in flight.
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Snap to `value` immediately, cancelling any in-flight tween.
    pub fn set(&mut self, value: V) {
        self.value = value;
        self.tween = None;
    }

    /// Begin animating toward `target` over `duration_ms`.
    ///
    /// Any in-flight tween is replaced; the new tween starts from the value
    /// sampled at `now`. A zero duration snaps immediately.
    pub fn animate_to(&mut self, target: V, duration_ms: u64, easing: Easing, now: u64) {
        self.advance(now);
        if duration_ms == 0 {
            self.set(target);
            return;
        }
        self.tween = Some(Tween {
            from: self.value,
            to: target,
            start: now,
            duration: duration_ms,
            easing,
        });
    }

    /// Advance to `now` and report the value plus any completion edge.
    pub fn sample(&mut self, now: u64) -> Step<V> {
        let finished = self.advance(now);
        Step {
            value: self.value,
            finished,
        }
    }

    /// Cancel any in-flight tween, freezing at the value sampled at `now`.
    pub fn freeze(&mut self, now: u64) {
        self.advance(now);
        self.tween = None;
    }

    fn advance(&mut self, now: u64) -> bool {
        let Some(tw) = self.tween else {
            return false;
        };
        if now >= tw.end() {
            self.value = tw.to;
            self.tween = None;
            true
        } else {
            self.value = tw.value_at(now);
            false
        }
    }
}

/// A one-shot timer as data.
///
/// Arming replaces any pending deadline; there is never more than one. The
/// deadline reports elapse through [`Deadline::fire`], which returns true
/// at most once per arming, so late polls are harmless no-ops.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Deadline {
    at: Option<u64>,
}

impl Deadline {
    /// A deadline that is not armed.
    pub const fn idle() -> Self {
        Self { at: None }
    }

    /// Arm (or re-arm) the deadline to elapse at `at`.
    pub fn arm(&mut self, at: u64) {
        self.at = Some(at);
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.at = None;
    }

    /// Whether the deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.at.is_some()
    }

    /// The pending elapse time, if armed.
    pub fn when(&self) -> Option<u64> {
        self.at
    }

    /// Fire if due: returns true when `now` has reached the deadline, and
    /// disarms so subsequent polls return false.
    pub fn fire(&mut self, now: u64) -> bool {
        match self.at {
            Some(at) if now >= at => {
                self.at = None;
                true
            }
            _ => false,
        }
    }
}
