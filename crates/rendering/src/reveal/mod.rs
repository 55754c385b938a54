//! Stroke-reveal animation for the newest parcel card.
//!
//! A single slot remembers which list position is revealing and since when.
//! Starting a new reveal replaces the slot and bumps the generation, so a
//! completion belonging to an older reveal is ignored.

mod systems;
pub mod types;

pub use systems::{cancel_reveal, start_reveal, tick_reveal};
pub use types::{RevealPhase, RevealState, MARKER_POP_SECONDS, REVEAL_SECONDS};
