//! Lifecycle of the working set.
//!
//! The card grid only exists in [`LoadState::Ready`]. Leaving that state
//! (a manual reload) is what tears the grid down, and anything tied to it,
//! such as a pending reveal animation, is released on `OnExit`.

use bevy::prelude::*;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadState {
    /// A `fetch_recent` round trip is outstanding; the grid shows a spinner.
    #[default]
    Loading,
    /// The working set is populated (possibly empty) and displayed.
    Ready,
}
