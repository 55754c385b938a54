use bevy::prelude::*;

use parcels::{ParcelAdded, ParcelsLoaded};

use super::types::RevealState;

/// Promote the head of the list whenever it changes.
pub fn start_reveal(
    mut added: EventReader<ParcelAdded>,
    mut loaded: EventReader<ParcelsLoaded>,
    mut reveal: ResMut<RevealState>,
) {
    let added_any = added.read().count() > 0;
    let loaded_any = loaded.read().filter(|event| event.count > 0).count() > 0;
    if added_any || loaded_any {
        let generation = reveal.start(0);
        debug!("Revealing newest parcel (generation {generation})");
    }
}

pub fn tick_reveal(time: Res<Time>, mut reveal: ResMut<RevealState>) {
    if let Some(index) = reveal.tick(time.delta()) {
        debug!("Reveal of card {index} finished");
    }
}

/// The card grid is going away; nothing is left to reveal.
pub fn cancel_reveal(mut reveal: ResMut<RevealState>) {
    reveal.cancel();
}
