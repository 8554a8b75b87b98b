// Copyright 2025 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The spotlight coordinator: one shared ambient light over many cards.
//!
//! A [`Spotlight`] is bound to a root surface and owns two things:
//!
//! - a [`Registry`] of the live card regions, keyed by generational
//!   [`CardId`] handles, and
//! - the shared ambient light state (position and opacity, both tweened).
//!
//! On every pointer move inside the root, the coordinator scans all
//! registered regions, grades each one's [effective distance] through the
//! configured falloff band, and stores the resulting glow intensity next
//! to the region. The shared light follows the pointer and its opacity is
//! driven by the *minimum* effective distance across all cards. When the
//! pointer is outside the root (or leaves the document), every intensity
//! is zeroed and the light fades out.
//!
//! Intensity is recomputed from absolute geometry on every move; nothing
//! accumulates between moves, so dropped frames cannot cause drift and
//! replaying the same pointer position is idempotent.
//!
//! The coordinator is the *sole owner* of glow intensities: cards read the
//! value assigned to them and never write it.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use limelight_glow::Viewport;
//! use limelight_spotlight::{Spotlight, SpotlightConfig};
//!
//! let viewport = Viewport::new(1440.0, 900.0);
//! let mut spot = Spotlight::new(SpotlightConfig::default(), viewport);
//! spot.set_root(Some(Rect::new(0.0, 0.0, 1000.0, 1000.0)));
//!
//! let card = spot.register(Rect::new(0.0, 0.0, 100.0, 100.0));
//!
//! // Pointer well within the proximity band: full intensity.
//! spot.on_pointer_move(Point::new(120.0, 50.0), 1_000);
//! assert_eq!(spot.intensity(card), Some(1.0));
//!
//! // Pointer outside the root: everything zeroes.
//! spot.on_pointer_move(Point::new(-50.0, -50.0), 1_100);
//! assert_eq!(spot.intensity(card), Some(0.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod coordinator;
mod registry;

pub use coordinator::{LightFrame, Spotlight, SpotlightConfig};
pub use registry::{CardId, Registry};
