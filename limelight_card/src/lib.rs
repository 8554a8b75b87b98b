// Copyright 2025 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-card pointer effect controller.
//!
//! One [`CardEffects`] instance owns the mutable visual state of one
//! rectangular card: glow origin, a time-limited 3D tilt window, a
//! magnetism offset pulling the card toward the pointer, a hover scale,
//! and a pool of self-terminating click ripples.
//!
//! ## Tilt window
//!
//! Tilt responds to pointer movement for exactly [`TILT_ACTIVE_MS`]
//! milliseconds after each pointer enter. When the window elapses the card
//! eases back to flat and stays flat until the pointer leaves and
//! re-enters. Re-entering while a window is still open *restarts* it; the
//! pending expiry is replaced, never stacked.
//!
//! ```text
//! Idle --enter--> WindowOpen{deadline} --deadline|leave--> Idle
//! ```
//!
//! ## Glow intensity
//!
//! The per-card glow *origin* follows the pointer through this controller,
//! but glow *intensity* is owned by the spotlight coordinator: nothing in
//! this crate's pointer handlers writes it. [`CardEffects::set_glow_intensity`]
//! exists solely for the coordinator path.
//!
//! ## Time and teardown
//!
//! Handlers take explicit millisecond timestamps and all pending work
//! (the tilt deadline, in-flight tweens, live ripples) is plain data owned
//! by the controller, advanced by [`CardEffects::tick`]. Dropping the
//! controller is cancellation; there is no callback that can outlive it.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use limelight_card::{CardConfig, CardEffects, TILT_ACTIVE_MS};
//! use limelight_glow::Viewport;
//!
//! let viewport = Viewport::new(1440.0, 900.0);
//! let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
//! let mut card = CardEffects::new(CardConfig::default(), viewport, rect);
//!
//! card.on_pointer_enter(1_000);
//! card.on_pointer_move(Point::new(150.0, 25.0), 1_016);
//! assert!(card.is_tilt_active());
//!
//! // The window expires on its own.
//! card.tick(1_000 + TILT_ACTIVE_MS);
//! assert!(!card.is_tilt_active());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

mod controller;
mod ripple;

pub use controller::{CardConfig, CardEffects, CardFrame, EffectFlags, TILT_ACTIVE_MS};
pub use ripple::{Ripple, RippleFrame};
