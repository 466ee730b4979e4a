//! Platform field: initial ladder generation and recycling
//!
//! The field keeps a fixed number of platforms. Platforms that scroll off the
//! bottom are reused one slot above the current topmost platform.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::platform::Platform;
use super::state::Viewport;
use super::width::choose_platform_width;
use crate::consts::{FIRST_SLOT_OFFSET, PLATFORM_HEIGHT};
use crate::tuning::Tuning;

/// Hands out platform indices. Indices are never reused within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSequence {
    next: u64,
}

impl Default for IndexSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexSequence {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_index(&mut self) -> u64 {
        let index = self.next;
        self.next += 1;
        index
    }

    /// Index the next call to `next_index` will return
    pub fn peek(&self) -> u64 {
        self.next
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlatformField {
    /// In creation order, not spatial order
    pub platforms: Vec<Platform>,
    sequence: IndexSequence,
    /// Slots where no overlap-free placement was found
    pub placement_failures: u32,
}

impl PlatformField {
    /// Empty field (platforms are pushed by the caller)
    pub fn empty() -> Self {
        Self {
            platforms: Vec::new(),
            sequence: IndexSequence::new(),
            placement_failures: 0,
        }
    }

    /// Build the starting ladder: one platform per slot, slots
    /// `slot_spacing` apart going up from just above the floor.
    ///
    /// Each slot retries random width/x until the box overlaps nothing
    /// already placed. After `placement_attempts` misses the last candidate
    /// is kept anyway.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, tuning: &Tuning) -> Self {
        let mut field = Self::empty();

        for slot in 0..tuning.platform_count {
            let y = viewport.height - slot as f32 * tuning.slot_spacing - FIRST_SLOT_OFFSET;

            let mut placed = None;
            let mut last = (0.0, 0.0);
            for _ in 0..tuning.placement_attempts {
                let width = choose_platform_width(rng, viewport.width);
                let x = rng.random::<f32>() * (viewport.width - width);
                last = (x, width);

                let candidate =
                    Aabb::from_rect(Vec2::new(x, y), Vec2::new(width, PLATFORM_HEIGHT));
                if !field.platforms.iter().any(|p| p.bounds().overlaps(&candidate)) {
                    placed = Some((x, width));
                    break;
                }
            }

            let (x, width) = placed.unwrap_or_else(|| {
                log::warn!(
                    "Could not place platform {slot} without overlap after {} attempts",
                    tuning.placement_attempts
                );
                field.placement_failures += 1;
                last
            });

            let index = field.sequence.next_index();
            field
                .platforms
                .push(Platform::spawn_at(rng, index, Vec2::new(x, y), width, tuning));
        }

        field
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Platform> {
        self.platforms.iter_mut()
    }

    /// Next index the field will hand out
    pub fn next_index(&self) -> u64 {
        self.sequence.peek()
    }

    /// Smallest base `y` (the topmost platform)
    pub fn highest_y(&self) -> Option<f32> {
        self.platforms.iter().map(|p| p.pos.y).reduce(f32::min)
    }

    /// Per-frame platform motion (oscillation, sinking) without scrolling
    pub fn update(&mut self, tuning: &Tuning) {
        for platform in &mut self.platforms {
            platform.update(tuning);
        }
    }

    /// Camera scroll: move every platform (after its own motion) down by
    /// `amount`, then recycle whatever fell past the bottom.
    ///
    /// Returns the new indices of recycled platforms.
    pub fn scroll<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        amount: f32,
        viewport: Viewport,
        tuning: &Tuning,
    ) -> Vec<u64> {
        for platform in &mut self.platforms {
            platform.update(tuning);
            platform.shift(amount);
        }
        self.recycle_below(rng, viewport, tuning)
    }

    /// Recycle every platform whose base `y` is past the bottom edge, each
    /// to exactly one slot above the platform that is topmost at that moment.
    pub fn recycle_below<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        viewport: Viewport,
        tuning: &Tuning,
    ) -> Vec<u64> {
        let mut recycled = Vec::new();
        for i in 0..self.platforms.len() {
            if self.platforms[i].pos.y <= viewport.height {
                continue;
            }
            // Non-empty: we are looking at one of its platforms
            let Some(highest) = self.highest_y() else {
                break;
            };
            let index = self.sequence.next_index();
            let old_index = self.platforms[i].index;
            self.platforms[i].recycle(rng, index, highest - tuning.slot_spacing, viewport, tuning);
            log::debug!(
                "Recycled platform {old_index} -> {index} at y={}",
                self.platforms[i].pos.y
            );
            recycled.push(index);
        }
        recycled
    }
}
