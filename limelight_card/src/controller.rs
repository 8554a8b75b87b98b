// Copyright 2025 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-card effect state machine.

use kurbo::{Point, Rect, Vec2};
use limelight_glow::{Rgb, Viewport, relative_position};
use limelight_tween::{Deadline, Easing, Track};
use smallvec::SmallVec;

use crate::ripple::{Ripple, RippleFrame};

/// Duration tilt remains responsive after a pointer enter, in milliseconds.
pub const TILT_ACTIVE_MS: u64 = 1_000;

/// Ease-back duration when the tilt window expires on its own.
const TILT_DECAY_MS: u64 = 400;
/// How quickly tilt follows the pointer inside the window.
const TILT_FOLLOW_MS: u64 = 120;
/// How quickly the magnetism offset follows the pointer.
const MAGNET_FOLLOW_MS: u64 = 280;
/// Settle duration for tilt, offset, and scale after a pointer leave.
const LEAVE_SETTLE_MS: u64 = 350;
/// Hover scale-up duration on pointer enter.
const ENTER_SCALE_MS: u64 = 180;

/// Hover scale target.
const HOVER_SCALE: f64 = 1.01;
/// Fraction of the pointer's offset from center applied as magnetism.
const MAGNET_PULL: f64 = 0.04;
/// Tilt degrees at the card edge.
const TILT_GAIN_DEG: f64 = 6.0;
/// Tilt clamp, in degrees, for small cards where the gain overshoots.
const TILT_MAX_DEG: f64 = 12.0;

bitflags::bitflags! {
    /// Which effects a card participates in.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EffectFlags: u8 {
        /// Time-limited 3D tilt toward the pointer.
        const TILT = 0b0000_0001;
        /// Positional pull toward the pointer.
        const MAGNETISM = 0b0000_0010;
        /// Radial ripple on click.
        const CLICK_RIPPLE = 0b0000_0100;
        /// Become inert on compact viewports.
        const DISABLE_ON_COMPACT = 0b0000_1000;
    }
}

impl Default for EffectFlags {
    /// Everything on.
    fn default() -> Self {
        Self::all()
    }
}

/// Host-supplied card configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CardConfig {
    /// Tint for the border glow and ripples; passed through to the host.
    pub glow_color: Rgb,
    /// Enabled effects.
    pub flags: EffectFlags,
}

/// Per-card mutable visual state and pointer handlers.
///
/// See the crate docs for the state machine and ownership rules. All
/// timestamps are milliseconds from the host's monotonic clock.
#[derive(Clone, Debug)]
pub struct CardEffects {
    config: CardConfig,
    /// Compact-viewport policy, decided once at construction.
    enabled: bool,
    rect: Rect,
    glow_origin: (f64, f64),
    /// Written only via [`CardEffects::set_glow_intensity`] (the
    /// coordinator path); pointer handlers never touch it.
    glow_intensity: f64,
    tilt_active: bool,
    tilt_deadline: Deadline,
    tilt: Track<(f64, f64)>,
    magnet: Track<Vec2>,
    scale: Track<f64>,
    ripples: SmallVec<[Ripple; 2]>,
}

impl CardEffects {
    /// Create a controller for a card occupying `rect`.
    ///
    /// If [`EffectFlags::DISABLE_ON_COMPACT`] is set and the viewport is
    /// compact, the controller is permanently inert: every handler is a
    /// no-op. The decision is made here, once; it does not track later
    /// viewport changes. The glow color is kept either way so the host can
    /// still tint the resting card.
    pub fn new(config: CardConfig, viewport: Viewport, rect: Rect) -> Self {
        let enabled =
            !(config.flags.contains(EffectFlags::DISABLE_ON_COMPACT) && viewport.is_compact());
        Self {
            config,
            enabled,
            rect,
            glow_origin: (50.0, 50.0),
            glow_intensity: 0.0,
            tilt_active: false,
            tilt_deadline: Deadline::idle(),
            tilt: Track::new((0.0, 0.0)),
            magnet: Track::new(Vec2::ZERO),
            scale: Track::new(1.0),
            ripples: SmallVec::new(),
        }
    }

    /// Whether pointer handlers are live (not disabled by policy).
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The card's current screen rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Update the card's screen rectangle after a layout change.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Whether the tilt window is currently open.
    pub fn is_tilt_active(&self) -> bool {
        self.tilt_active
    }

    /// Pointer entered the card: scale up and open a fresh tilt window.
    ///
    /// An already-open window is restarted, replacing its pending expiry.
    /// The window opens even if the pointer never moves afterwards.
    pub fn on_pointer_enter(&mut self, now: u64) {
        if !self.enabled {
            return;
        }
        self.advance_window(now);
        self.scale
            .animate_to(HOVER_SCALE, ENTER_SCALE_MS, Easing::CubicOut, now);
        self.tilt_active = true;
        self.tilt_deadline.arm(now + TILT_ACTIVE_MS);
    }

    /// Pointer moved within the card.
    ///
    /// Applies, in order and from the same input sample: glow origin,
    /// tilt (only while the window is open), magnetism. Each target is a
    /// pure function of the pointer and the rect; nothing accumulates.
    pub fn on_pointer_move(&mut self, pointer: Point, now: u64) {
        if !self.enabled {
            return;
        }
        self.advance_window(now);

        // Glow origin tracks the pointer unconditionally.
        self.glow_origin = relative_position(pointer, self.rect);

        let center = self.rect.center();
        let delta = pointer - center;

        if self.config.flags.contains(EffectFlags::TILT) && self.tilt_active {
            let half_w = self.rect.width() * 0.5;
            let half_h = self.rect.height() * 0.5;
            if half_w > 0.0 && half_h > 0.0 && half_w.is_finite() && half_h.is_finite() {
                let rotate_x =
                    (delta.y / half_h * -TILT_GAIN_DEG).clamp(-TILT_MAX_DEG, TILT_MAX_DEG);
                let rotate_y =
                    (delta.x / half_w * TILT_GAIN_DEG).clamp(-TILT_MAX_DEG, TILT_MAX_DEG);
                self.tilt
                    .animate_to((rotate_x, rotate_y), TILT_FOLLOW_MS, Easing::CubicOut, now);
            }
        }

        if self.config.flags.contains(EffectFlags::MAGNETISM) {
            // Replaces any in-flight magnetism tween: one per card, ever.
            self.magnet.animate_to(
                delta * MAGNET_PULL,
                MAGNET_FOLLOW_MS,
                Easing::CubicOut,
                now,
            );
        }
    }

    /// Pointer left the card: close the tilt window and settle to rest.
    ///
    /// Glow intensity is deliberately not touched; the coordinator owns it.
    pub fn on_pointer_leave(&mut self, now: u64) {
        if !self.enabled {
            return;
        }
        self.tilt_deadline.cancel();
        self.tilt_active = false;
        self.tilt
            .animate_to((0.0, 0.0), LEAVE_SETTLE_MS, Easing::CubicOut, now);
        self.magnet
            .animate_to(Vec2::ZERO, LEAVE_SETTLE_MS, Easing::CubicOut, now);
        self.scale
            .animate_to(1.0, LEAVE_SETTLE_MS, Easing::CubicOut, now);
    }

    /// Click on the card: spawn an independent ripple at the click point.
    pub fn on_click(&mut self, pointer: Point, now: u64) {
        if !self.enabled || !self.config.flags.contains(EffectFlags::CLICK_RIPPLE) {
            return;
        }
        let local = Point::new(pointer.x - self.rect.x0, pointer.y - self.rect.y0);
        self.ripples.push(Ripple::spawn(local, self.rect, now));
    }

    /// Coordinator-assigned glow intensity in `[0, 1]`.
    ///
    /// This is the spotlight coordinator's write path. Card handlers never
    /// call it, which is what keeps intensity stable across enter/leave.
    pub fn set_glow_intensity(&mut self, intensity: f64) {
        self.glow_intensity = intensity.clamp(0.0, 1.0);
    }

    /// Advance all pending work to `now`: fire a due tilt deadline, step
    /// every tween, and retire finished ripples.
    pub fn tick(&mut self, now: u64) {
        self.advance_window(now);
        self.tilt.sample(now);
        self.magnet.sample(now);
        self.scale.sample(now);
        self.ripples.retain(|r| !r.advance(now));
    }

    /// Render snapshot of the card's visual state.
    pub fn frame(&self) -> CardFrame {
        CardFrame {
            glow_origin: self.glow_origin,
            glow_intensity: self.glow_intensity,
            tilt: self.tilt.get(),
            magnet_offset: self.magnet.get(),
            scale: self.scale.get(),
            glow_color: self.config.glow_color,
        }
    }

    /// Render snapshots of the live ripples, oldest first.
    pub fn ripples(&self) -> impl Iterator<Item = RippleFrame> + '_ {
        self.ripples.iter().map(Ripple::frame)
    }

    /// Fire the tilt deadline if it is due. Handlers call this first so a
    /// move arriving after the window elapsed cannot apply stale tilt.
    fn advance_window(&mut self, now: u64) {
        if self.tilt_deadline.fire(now) {
            self.tilt_active = false;
            self.tilt
                .animate_to((0.0, 0.0), TILT_DECAY_MS, Easing::CubicOut, now);
        }
    }
}

/// Snapshot of a card's visual state for the host's rendering sink.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CardFrame {
    /// Pointer position within the card, as percentages in `[0, 100]`.
    pub glow_origin: (f64, f64),
    /// Coordinator-assigned glow intensity in `[0, 1]`.
    pub glow_intensity: f64,
    /// Current `(rotate_x, rotate_y)` tilt, in degrees.
    pub tilt: (f64, f64),
    /// Current magnetism offset.
    pub magnet_offset: Vec2,
    /// Current hover scale (1.0 at rest).
    pub scale: f64,
    /// Configured glow tint.
    pub glow_color: Rgb,
}
