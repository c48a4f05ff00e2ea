use super::intent::Intent;
use super::state::UiState;

/// Pure `(state, intent) -> state` step run by store updates.
///
/// Each intent variant only writes the fields its source owns, so updates
/// from concurrent pipelines never overwrite each other.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
