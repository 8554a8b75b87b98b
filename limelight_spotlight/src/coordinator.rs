// Copyright 2025 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The coordinator: proximity scan and shared light control.

use kurbo::{Point, Rect};
use limelight_glow::{FalloffBand, Rgb, Viewport, contains, edge_distance, quantize_intensity};
use limelight_tween::{Easing, Track};

use crate::registry::{CardId, Registry};

/// Fade duration when the pointer moves outside the root or leaves the
/// document.
const OUTSIDE_FADE_MS: u64 = 250;
/// How quickly the light's position follows the pointer.
const FOLLOW_MS: u64 = 80;
/// How quickly the light's opacity tracks the minimum card distance.
const OPACITY_MS: u64 = 120;

/// Host-supplied spotlight configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpotlightConfig {
    /// Radius of the ambient light, in logical units. The proximity and
    /// fade thresholds are derived from it.
    pub radius: f64,
    /// Light tint; passed through to the host.
    pub glow_color: Rgb,
    /// Opacity when the pointer is within the proximity threshold of the
    /// nearest card.
    pub max_opacity: f64,
    /// Become inert on compact viewports.
    pub disable_on_compact: bool,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            radius: 300.0,
            glow_color: Rgb::default(),
            max_opacity: 0.9,
            disable_on_compact: true,
        }
    }
}

/// Snapshot of the shared ambient light for the host's rendering sink.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightFrame {
    /// Current light center.
    pub position: Point,
    /// Current opacity in `[0, 1]`.
    pub opacity: f64,
    /// Configured radius.
    pub radius: f64,
    /// Configured tint.
    pub color: Rgb,
}

/// The process-wide spotlight coordinator. One instance per mounted root.
///
/// See the crate docs for the scan semantics. All timestamps are
/// milliseconds from the host's monotonic clock.
#[derive(Clone, Debug)]
pub struct Spotlight {
    config: SpotlightConfig,
    band: FalloffBand,
    /// Compact-viewport policy, decided once at construction.
    enabled: bool,
    root: Option<Rect>,
    registry: Registry,
    position: Track<Point>,
    opacity: Track<f64>,
    warned_missing_root: bool,
}

impl Spotlight {
    /// Create a coordinator for a surface mounted in `viewport`.
    ///
    /// With `disable_on_compact` set and a compact viewport, the
    /// coordinator is permanently inert: regions may still register, but
    /// no scan runs and the light never turns on.
    pub fn new(config: SpotlightConfig, viewport: Viewport) -> Self {
        let enabled = !(config.disable_on_compact && viewport.is_compact());
        Self {
            config,
            band: FalloffBand::from_radius(config.radius),
            enabled,
            root: None,
            registry: Registry::new(),
            position: Track::new(Point::ZERO),
            opacity: Track::new(0.0),
            warned_missing_root: false,
        }
    }

    /// Whether the scan is live (not disabled by policy).
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The falloff thresholds derived from the configured radius.
    pub fn band(&self) -> FalloffBand {
        self.band
    }

    /// Set or clear the root surface's bounding rectangle.
    pub fn set_root(&mut self, root: Option<Rect>) {
        self.root = root;
    }

    /// Register a card region. See [`Registry::register`].
    pub fn register(&mut self, rect: Rect) -> CardId {
        self.registry.register(rect)
    }

    /// Unregister a card region. Safe with stale handles and during
    /// teardown after the surface is gone.
    pub fn unregister(&mut self, id: CardId) {
        self.registry.unregister(id);
    }

    /// Update a registered region's rectangle.
    pub fn update_region(&mut self, id: CardId, rect: Rect) {
        self.registry.update_rect(id, rect);
    }

    /// The intensity last assigned to a region, if it is live.
    pub fn intensity(&self, id: CardId) -> Option<f64> {
        self.registry.intensity(id)
    }

    /// Read access to the region registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Process a pointer move in document coordinates.
    ///
    /// Outside the root, this behaves like [`Spotlight::on_pointer_exit_root`].
    /// Inside, the light follows the pointer and every registered region's
    /// intensity is recomputed from its current geometry over a stable
    /// snapshot of the registry.
    pub fn on_pointer_move(&mut self, pointer: Point, now: u64) {
        if !self.enabled {
            return;
        }
        let Some(root) = self.root else {
            if !self.warned_missing_root {
                log::warn!("spotlight coordinator has no root surface; ignoring pointer moves");
                self.warned_missing_root = true;
            }
            return;
        };
        if !contains(pointer, root) {
            self.fade_out(now);
            return;
        }

        self.position
            .animate_to(pointer, FOLLOW_MS, Easing::CubicOut, now);

        let mut min_eff = f64::INFINITY;
        for (id, rect) in self.registry.snapshot() {
            let eff = edge_distance(pointer, rect);
            min_eff = min_eff.min(eff);
            self.registry
                .set_intensity(id, quantize_intensity(self.band.intensity(eff)));
        }

        // With no cards, min_eff stays infinite and the light fades out.
        let target = self.band.intensity(min_eff) * self.config.max_opacity;
        self.opacity
            .animate_to(target, OPACITY_MS, Easing::CubicOut, now);
    }

    /// The pointer left the document entirely: zero every intensity and
    /// fade the light out.
    pub fn on_pointer_exit_root(&mut self, now: u64) {
        if !self.enabled {
            return;
        }
        self.fade_out(now);
    }

    /// Advance the light's tweens to `now`.
    pub fn tick(&mut self, now: u64) {
        self.position.sample(now);
        self.opacity.sample(now);
    }

    /// Render snapshot of the shared light.
    pub fn frame(&self) -> LightFrame {
        LightFrame {
            position: self.position.get(),
            opacity: self.opacity.get(),
            radius: self.config.radius,
            color: self.config.glow_color,
        }
    }

    fn fade_out(&mut self, now: u64) {
        self.opacity
            .animate_to(0.0, OUTSIDE_FADE_MS, Easing::CubicOut, now);
        self.registry.zero_intensities();
    }
}
