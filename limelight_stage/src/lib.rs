// Copyright 2025 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root-surface plumbing: one spotlight, many cards, one event stream.
//!
//! A [`Stage`] binds a [`Spotlight`] coordinator and any number of
//! [`CardEffects`] controllers to a root surface and routes a single
//! pointer-event stream to all of them. Hosts that only have a
//! document-level move stream get per-card enter/leave synthesized from
//! containment transitions; hosts with native per-card events can instead
//! drive the controllers directly and use the stage for lifecycle and
//! intensity application only.
//!
//! ## Dispatch order
//!
//! For a single pointer move the stage guarantees the order the engine's
//! state model assumes:
//!
//! 1. per-card hover transitions and handler updates (glow origin, tilt,
//!    magnetism, all from the same input sample),
//! 2. the coordinator's proximity scan,
//! 3. application of the scanned intensities to the cards.
//!
//! No tween advances between those steps; animation only moves on
//! [`Stage::tick`].
//!
//! ## Lifecycle
//!
//! [`Stage::mount_card`] registers the region with the coordinator and
//! creates its controller; [`Stage::unmount_card`] removes the controller
//! *first* (dropping its pending deadline and tweens, which is the
//! cancellation) and then the registry entry, so nothing can deliver a
//! late callback to a destroyed card. Unmounting an unknown or stale id is
//! a no-op.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use limelight_card::CardConfig;
//! use limelight_glow::Viewport;
//! use limelight_spotlight::SpotlightConfig;
//! use limelight_stage::Stage;
//!
//! let mut stage = Stage::new(SpotlightConfig::default(), Viewport::new(1440.0, 900.0));
//! stage.set_root(Some(Rect::new(0.0, 0.0, 1000.0, 1000.0)));
//! let card = stage.mount_card(Rect::new(100.0, 100.0, 300.0, 200.0), CardConfig::default());
//!
//! // Entering the card opens its tilt window and lights its glow.
//! stage.on_pointer_move(Point::new(200.0, 150.0), 1_000);
//! let frame = stage.card(card).unwrap().frame();
//! assert_eq!(frame.glow_intensity, 1.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Rect};
use limelight_card::{CardConfig, CardEffects};
use limelight_glow::{Viewport, contains};
use limelight_spotlight::{CardId, LightFrame, Spotlight, SpotlightConfig};

/// Event plumbing for one root surface.
///
/// Owns the coordinator and all card controllers; see the crate docs for
/// dispatch ordering and lifecycle rules.
#[derive(Clone, Debug)]
pub struct Stage {
    viewport: Viewport,
    spotlight: Spotlight,
    cards: HashMap<CardId, CardEffects>,
    hovered: HashSet<CardId>,
}

impl Stage {
    /// Create a stage for a surface mounted in `viewport`.
    ///
    /// The same viewport decides the compact policy for the coordinator
    /// now and for every card mounted later.
    pub fn new(config: SpotlightConfig, viewport: Viewport) -> Self {
        Self {
            viewport,
            spotlight: Spotlight::new(config, viewport),
            cards: HashMap::new(),
            hovered: HashSet::new(),
        }
    }

    /// Set or clear the root surface's bounding rectangle.
    pub fn set_root(&mut self, root: Option<Rect>) {
        self.spotlight.set_root(root);
    }

    /// Mount a card: register its region with the coordinator and create
    /// its effect controller.
    pub fn mount_card(&mut self, rect: Rect, config: CardConfig) -> CardId {
        let id = self.spotlight.register(rect);
        self.cards
            .insert(id, CardEffects::new(config, self.viewport, rect));
        id
    }

    /// Unmount a card, cancelling its pending work.
    ///
    /// The controller is dropped before the registry entry is removed;
    /// its tilt deadline and tweens are owned data, so dropping it *is*
    /// the cancellation. Safe for unknown or stale ids, and safe while a
    /// tilt window is still pending.
    pub fn unmount_card(&mut self, id: CardId) {
        self.cards.remove(&id);
        self.hovered.remove(&id);
        self.spotlight.unregister(id);
    }

    /// Propagate a layout change to the controller and the registry.
    pub fn set_card_rect(&mut self, id: CardId, rect: Rect) {
        if let Some(card) = self.cards.get_mut(&id) {
            card.set_rect(rect);
        }
        self.spotlight.update_region(id, rect);
    }

    /// Number of mounted cards.
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Read access to a card's controller (frames, ripples, tilt state).
    pub fn card(&self, id: CardId) -> Option<&CardEffects> {
        self.cards.get(&id)
    }

    /// Render snapshot of the shared ambient light.
    pub fn light_frame(&self) -> LightFrame {
        self.spotlight.frame()
    }

    /// Read access to the coordinator.
    pub fn spotlight(&self) -> &Spotlight {
        &self.spotlight
    }

    /// Process a pointer move in document coordinates.
    ///
    /// Synthesizes per-card enter/leave from containment transitions, then
    /// runs the coordinator scan, then applies intensities. Every card
    /// containing the pointer is hovered; containment is edge-inclusive.
    pub fn on_pointer_move(&mut self, pointer: Point, now: u64) {
        for (id, card) in &mut self.cards {
            let inside = contains(pointer, card.rect());
            let was_hovered = self.hovered.contains(id);
            if inside {
                if !was_hovered {
                    self.hovered.insert(*id);
                    card.on_pointer_enter(now);
                }
                card.on_pointer_move(pointer, now);
            } else if was_hovered {
                self.hovered.remove(id);
                card.on_pointer_leave(now);
            }
        }

        self.spotlight.on_pointer_move(pointer, now);
        self.apply_intensities();
    }

    /// Route a click to every card containing the pointer.
    pub fn on_click(&mut self, pointer: Point, now: u64) {
        for card in self.cards.values_mut() {
            if contains(pointer, card.rect()) {
                card.on_click(pointer, now);
            }
        }
    }

    /// The pointer left the document: leave all hovered cards, zero every
    /// intensity, and fade the shared light.
    pub fn on_pointer_exit(&mut self, now: u64) {
        for id in self.hovered.drain() {
            if let Some(card) = self.cards.get_mut(&id) {
                card.on_pointer_leave(now);
            }
        }
        self.spotlight.on_pointer_exit_root(now);
        self.apply_intensities();
    }

    /// Advance every controller and the shared light to `now`.
    pub fn tick(&mut self, now: u64) {
        for card in self.cards.values_mut() {
            card.tick(now);
        }
        self.spotlight.tick(now);
    }

    /// The coordinator's write path: copy scanned intensities onto the
    /// card controllers. Cards never write their own.
    fn apply_intensities(&mut self) {
        for (id, card) in &mut self.cards {
            if let Some(intensity) = self.spotlight.intensity(*id) {
                card.set_glow_intensity(intensity);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use limelight_card::TILT_ACTIVE_MS;

    fn stage() -> Stage {
        let mut stage = Stage::new(SpotlightConfig::default(), Viewport::new(1440.0, 900.0));
        stage.set_root(Some(Rect::new(0.0, 0.0, 1000.0, 1000.0)));
        stage
    }

    #[test]
    fn move_into_card_synthesizes_enter() {
        let mut s = stage();
        let id = s.mount_card(Rect::new(100.0, 100.0, 300.0, 200.0), CardConfig::default());

        s.on_pointer_move(Point::new(200.0, 150.0), 0);
        let card = s.card(id).unwrap();
        assert!(card.is_tilt_active());
        assert_eq!(card.frame().glow_origin, (50.0, 50.0));
    }

    #[test]
    fn move_out_synthesizes_leave() {
        let mut s = stage();
        let id = s.mount_card(Rect::new(100.0, 100.0, 300.0, 200.0), CardConfig::default());

        s.on_pointer_move(Point::new(200.0, 150.0), 0);
        s.on_pointer_move(Point::new(600.0, 600.0), 100);
        assert!(!s.card(id).unwrap().is_tilt_active());

        // Transforms settle back to rest.
        s.tick(100 + 350);
        let frame = s.card(id).unwrap().frame();
        assert_eq!(frame.tilt, (0.0, 0.0));
        assert_eq!(frame.scale, 1.0);
    }

    #[test]
    fn quick_reentry_restarts_the_window() {
        let mut s = stage();
        let id = s.mount_card(Rect::new(100.0, 100.0, 300.0, 200.0), CardConfig::default());

        s.on_pointer_move(Point::new(200.0, 150.0), 0);
        s.on_pointer_move(Point::new(600.0, 600.0), 200);
        s.on_pointer_move(Point::new(200.0, 150.0), TILT_ACTIVE_MS / 2);

        // Active well past the first enter's would-be deadline.
        s.tick(TILT_ACTIVE_MS + 100);
        assert!(s.card(id).unwrap().is_tilt_active());
        s.tick(TILT_ACTIVE_MS / 2 + TILT_ACTIVE_MS);
        assert!(!s.card(id).unwrap().is_tilt_active());
    }

    #[test]
    fn scan_intensities_land_on_card_frames() {
        let mut s = stage();
        let near = s.mount_card(Rect::new(0.0, 0.0, 100.0, 100.0), CardConfig::default());
        let far = s.mount_card(Rect::new(800.0, 800.0, 900.0, 900.0), CardConfig::default());

        // Effective distance 200 from the near card's influence circle.
        s.on_pointer_move(Point::new(50.0, 300.0), 0);
        assert_eq!(s.card(near).unwrap().frame().glow_intensity, 0.46);
        assert_eq!(s.card(far).unwrap().frame().glow_intensity, 0.0);
    }

    #[test]
    fn pointer_outside_root_zeroes_every_card() {
        let mut s = stage();
        let a = s.mount_card(Rect::new(0.0, 0.0, 100.0, 100.0), CardConfig::default());
        let b = s.mount_card(Rect::new(200.0, 0.0, 300.0, 100.0), CardConfig::default());

        s.on_pointer_move(Point::new(120.0, 50.0), 0);
        assert_eq!(s.card(a).unwrap().frame().glow_intensity, 1.0);

        s.on_pointer_move(Point::new(-10.0, -10.0), 100);
        assert_eq!(s.card(a).unwrap().frame().glow_intensity, 0.0);
        assert_eq!(s.card(b).unwrap().frame().glow_intensity, 0.0);
        s.tick(100 + 250);
        assert_eq!(s.light_frame().opacity, 0.0);
    }

    #[test]
    fn document_exit_leaves_hovered_cards_and_zeroes() {
        let mut s = stage();
        let id = s.mount_card(Rect::new(100.0, 100.0, 300.0, 200.0), CardConfig::default());

        s.on_pointer_move(Point::new(200.0, 150.0), 0);
        assert!(s.card(id).unwrap().is_tilt_active());

        s.on_pointer_exit(50);
        assert!(!s.card(id).unwrap().is_tilt_active());
        assert_eq!(s.card(id).unwrap().frame().glow_intensity, 0.0);
    }

    #[test]
    fn unmount_with_pending_tilt_window_is_safe() {
        let mut s = stage();
        let id = s.mount_card(Rect::new(100.0, 100.0, 300.0, 200.0), CardConfig::default());

        s.on_pointer_move(Point::new(200.0, 150.0), 0);
        assert!(s.card(id).unwrap().is_tilt_active());

        // Unmount while the deactivation deadline is pending, then let
        // time pass: nothing fires, nothing panics, nothing resurrects.
        s.unmount_card(id);
        s.tick(TILT_ACTIVE_MS + 500);
        s.on_pointer_move(Point::new(200.0, 150.0), TILT_ACTIVE_MS + 600);
        assert!(s.card(id).is_none());
        assert_eq!(s.spotlight().intensity(id), None);
        assert_eq!(s.card_count(), 0);
    }

    #[test]
    fn unmount_is_idempotent() {
        let mut s = stage();
        let id = s.mount_card(Rect::new(0.0, 0.0, 100.0, 100.0), CardConfig::default());
        s.unmount_card(id);
        s.unmount_card(id);
        assert_eq!(s.card_count(), 0);
    }

    #[test]
    fn click_routes_to_containing_cards_only() {
        let mut s = stage();
        let hit = s.mount_card(Rect::new(0.0, 0.0, 200.0, 100.0), CardConfig::default());
        let miss = s.mount_card(Rect::new(500.0, 500.0, 700.0, 600.0), CardConfig::default());

        s.on_click(Point::new(0.0, 0.0), 0);
        assert_eq!(s.card(hit).unwrap().ripples().count(), 1);
        assert_eq!(s.card(miss).unwrap().ripples().count(), 0);

        // Corner click: the ripple reaches the far corner of the card.
        let ripple = s.card(hit).unwrap().ripples().next().unwrap();
        assert!((ripple.radius - 223.6).abs() < 0.1);
    }

    #[test]
    fn overlapping_cards_are_hovered_together() {
        let mut s = stage();
        let a = s.mount_card(Rect::new(0.0, 0.0, 200.0, 200.0), CardConfig::default());
        let b = s.mount_card(Rect::new(100.0, 100.0, 300.0, 300.0), CardConfig::default());

        s.on_pointer_move(Point::new(150.0, 150.0), 0);
        assert!(s.card(a).unwrap().is_tilt_active());
        assert!(s.card(b).unwrap().is_tilt_active());

        // Leaving the overlap leaves only the card that lost containment.
        s.on_pointer_move(Point::new(250.0, 250.0), 100);
        assert!(!s.card(a).unwrap().is_tilt_active());
        assert!(s.card(b).unwrap().is_tilt_active());
    }

    #[test]
    fn layout_change_moves_both_views_of_the_region() {
        let mut s = stage();
        let id = s.mount_card(Rect::new(0.0, 0.0, 100.0, 100.0), CardConfig::default());
        s.set_card_rect(id, Rect::new(400.0, 400.0, 500.0, 500.0));

        assert_eq!(s.card(id).unwrap().rect(), Rect::new(400.0, 400.0, 500.0, 500.0));
        // The scan sees the new geometry immediately.
        s.on_pointer_move(Point::new(450.0, 450.0), 0);
        assert_eq!(s.card(id).unwrap().frame().glow_intensity, 1.0);
    }
}
