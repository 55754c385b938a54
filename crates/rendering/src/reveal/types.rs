use std::time::Duration;

use bevy::prelude::*;

use crate::easing::{EASE_IN_OUT, EASE_OUT};

/// Length of the stroke reveal.
pub const REVEAL_SECONDS: f32 = 2.0;

/// How long one vertex marker takes to pop in.
pub const MARKER_POP_SECONDS: f32 = 0.4;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// How a card should draw its outline this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealPhase {
    Static,
    Revealing { elapsed: f32 },
}

impl RevealPhase {
    pub fn is_revealing(&self) -> bool {
        matches!(self, RevealPhase::Revealing { .. })
    }

    /// Visible share of the closed outline, eased.
    pub fn stroke_fraction(&self) -> f32 {
        match *self {
            RevealPhase::Static => 1.0,
            RevealPhase::Revealing { elapsed } => EASE_IN_OUT.sample(elapsed / REVEAL_SECONDS),
        }
    }

    /// Delay before marker `vertex` of `count` starts popping in.
    pub fn marker_delay(vertex: usize, count: usize) -> f32 {
        if count == 0 {
            return 0.0;
        }
        vertex as f32 / count as f32 * REVEAL_SECONDS
    }

    /// Marker radius multiplier in `[0, 1]`.
    ///
    /// The pop is shortened for late markers so every marker is fully grown
    /// when the reveal ends.
    pub fn marker_scale(&self, vertex: usize, count: usize) -> f32 {
        let RevealPhase::Revealing { elapsed } = *self else {
            return 1.0;
        };
        let delay = Self::marker_delay(vertex, count);
        let window = MARKER_POP_SECONDS.min(REVEAL_SECONDS - delay);
        if window <= 0.0 {
            return 1.0;
        }
        EASE_OUT.sample((elapsed - delay) / window)
    }
}

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct RevealSlot {
    index: usize,
    generation: u64,
    timer: Timer,
}

/// The one reveal currently running, if any.
#[derive(Resource, Debug, Default)]
pub struct RevealState {
    slot: Option<RevealSlot>,
    generation: u64,
}

impl RevealState {
    /// Reveal the card at list position `index`, superseding any other.
    /// Returns the generation of the new reveal.
    pub fn start(&mut self, index: usize) -> u64 {
        self.generation += 1;
        self.slot = Some(RevealSlot {
            index,
            generation: self.generation,
            timer: Timer::from_seconds(REVEAL_SECONDS, TimerMode::Once),
        });
        self.generation
    }

    pub fn phase_for(&self, index: usize) -> RevealPhase {
        match &self.slot {
            Some(slot) if slot.index == index => RevealPhase::Revealing {
                elapsed: slot.timer.elapsed_secs(),
            },
            _ => RevealPhase::Static,
        }
    }

    pub fn revealing_index(&self) -> Option<usize> {
        self.slot.as_ref().map(|slot| slot.index)
    }

    pub fn is_revealing(&self) -> bool {
        self.slot.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance the running reveal. Returns the index that just went static.
    pub fn tick(&mut self, delta: Duration) -> Option<usize> {
        let slot = self.slot.as_mut()?;
        slot.timer.tick(delta);
        if !slot.timer.finished() {
            return None;
        }
        let (index, generation) = (slot.index, slot.generation);
        self.complete(generation).then_some(index)
    }

    /// Release the slot if it still belongs to `generation`.
    pub fn complete(&mut self, generation: u64) -> bool {
        match &self.slot {
            Some(slot) if slot.generation == generation => {
                self.slot = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the running reveal without completing it.
    pub fn cancel(&mut self) {
        self.slot = None;
    }
}
