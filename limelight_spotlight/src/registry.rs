// Copyright 2025 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region registry with generational handles.

use alloc::vec::Vec;
use kurbo::Rect;
use smallvec::SmallVec;

/// Generational handle for a registered card region.
///
/// Slots are reused after unregistration, but each reuse bumps the
/// generation, so a stale `CardId` held past its card's teardown never
/// aliases a newer card: it simply stops resolving.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CardId(u32, u32);

impl CardId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Registry slots are intentionally 32-bit."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Entry {
    generation: u32,
    rect: Rect,
    intensity: f64,
}

/// The coordinator's non-owning view of the live card regions.
///
/// The registry stores each region's screen rectangle and the glow
/// intensity most recently assigned by the coordinator's scan. It does not
/// own card controllers; hosts associate the returned [`CardId`] with
/// whatever per-card state they keep. All operations on stale handles are
/// safe no-ops, which makes unregistration idempotent and teardown-order
/// independent.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: Vec<Option<Entry>>,
    /// Last generation per slot (persists across frees).
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl Registry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Register a region. Returns a stable generational handle.
    pub fn register(&mut self, rect: Rect) -> CardId {
        if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].wrapping_add(1);
            self.generations[idx] = generation;
            self.entries[idx] = Some(Entry {
                generation,
                rect,
                intensity: 0.0,
            });
            CardId::new(idx, generation)
        } else {
            self.entries.push(Some(Entry {
                generation: 1,
                rect,
                intensity: 0.0,
            }));
            self.generations.push(1);
            CardId::new(self.entries.len() - 1, 1)
        }
    }

    /// Remove a region. Safe to call with a stale handle, and safe to call
    /// again after the surface is already gone.
    pub fn unregister(&mut self, id: CardId) {
        if self.entry(id).is_some() {
            self.entries[id.idx()] = None;
            self.free_list.push(id.idx());
        }
    }

    /// Update a region's rectangle after a layout change. No-op for stale
    /// handles.
    pub fn update_rect(&mut self, id: CardId, rect: Rect) {
        if let Some(e) = self.entry_mut(id) {
            e.rect = rect;
        }
    }

    /// The region's rectangle, if the handle is live.
    pub fn rect(&self, id: CardId) -> Option<Rect> {
        self.entry(id).map(|e| e.rect)
    }

    /// The intensity most recently assigned by the coordinator, if the
    /// handle is live.
    pub fn intensity(&self, id: CardId) -> Option<f64> {
        self.entry(id).map(|e| e.intensity)
    }

    /// Coordinator write path for intensities. No-op for stale handles.
    pub(crate) fn set_intensity(&mut self, id: CardId, intensity: f64) {
        if let Some(e) = self.entry_mut(id) {
            e.intensity = intensity;
        }
    }

    /// Zero every region's intensity.
    pub(crate) fn zero_intensities(&mut self) {
        for e in self.entries.iter_mut().flatten() {
            e.intensity = 0.0;
        }
    }

    /// Number of live regions.
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    /// Whether no regions are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A stable snapshot of the live `(id, rect)` pairs.
    ///
    /// Scans iterate this snapshot rather than the registry itself, so a
    /// region unregistered mid-scan degrades to a stale-handle no-op
    /// instead of invalidating the iteration.
    pub fn snapshot(&self) -> SmallVec<[(CardId, Rect); 8]> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| {
                slot.as_ref()
                    .map(|e| (CardId::new(idx, e.generation), e.rect))
            })
            .collect()
    }

    fn entry(&self, id: CardId) -> Option<&Entry> {
        self.entries
            .get(id.idx())
            .and_then(|slot| slot.as_ref())
            .filter(|e| e.generation == id.1)
    }

    fn entry_mut(&mut self, id: CardId) -> Option<&mut Entry> {
        self.entries
            .get_mut(id.idx())
            .and_then(|slot| slot.as_mut())
            .filter(|e| e.generation == id.1)
    }
}
