//! Placeholder parcel outlines.
//!
//! No survey data is available when a parcel is entered, so each new record
//! gets a randomly perturbed polygon around a fixed center. Vertices are laid
//! out at strictly increasing angles, which makes every outline star-shaped
//! and therefore never self-intersecting.

use std::f64::consts::TAU;

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{
    SHAPE_CENTER, SHAPE_JITTER_MAX, SHAPE_JITTER_MIN, SHAPE_MAX_VERTICES, SHAPE_MIN_VERTICES,
    SHAPE_RADIUS_MAX, SHAPE_RADIUS_MIN,
};
use crate::record::Coordinate;

/// Random source for shape generation.
///
/// Seeded from OS entropy in the running app; tests build it with
/// [`ShapeRng::from_seed_u64`] so outlines are reproducible.
#[derive(Resource)]
pub struct ShapeRng(pub ChaCha8Rng);

impl Default for ShapeRng {
    fn default() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }
}

impl ShapeRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

/// Generate a closed outline with 4 to 7 vertices, rounded to whole units.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Vec<Coordinate> {
    let vertex_count = rng.gen_range(SHAPE_MIN_VERTICES..=SHAPE_MAX_VERTICES);
    let radius = rng.gen_range(SHAPE_RADIUS_MIN..SHAPE_RADIUS_MAX);
    let [cx, cy] = SHAPE_CENTER;

    (0..vertex_count)
        .map(|i| {
            let angle = i as f64 / vertex_count as f64 * TAU;
            let jitter = rng.gen_range(SHAPE_JITTER_MIN..SHAPE_JITTER_MAX);
            let r = radius * jitter;
            [
                (cx + angle.cos() * r).round(),
                (cy + angle.sin() * r).round(),
            ]
        })
        .collect()
}
