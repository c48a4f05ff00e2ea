use crate::mvi::Reducer;

use super::intent::LibraryIntent;
use super::state::{LibraryFilter, LibraryViewState};

/// Field-merge rules for the library screen.
///
/// Each intent owns a disjoint set of fields. Failed emissions keep the
/// previous value of optional fields; a failed auth emission reads as
/// logged out.
pub struct LibraryReducer;

impl Reducer for LibraryReducer {
    type State = LibraryViewState;
    type Intent = LibraryIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            LibraryIntent::Initialize => LibraryViewState {
                allowed_filters: LibraryFilter::VALUES.to_vec(),
                filter: LibraryFilter::DEFAULT,
                ..state
            },
            LibraryIntent::SelectFilter(filter) => {
                if !state.is_filter_allowed(filter) {
                    tracing::warn!(?filter, allowed = ?state.allowed_filters, "filter not allowed, ignored");
                    return state;
                }
                LibraryViewState { filter, ..state }
            }
            LibraryIntent::ImageProviderResolved(provider) => {
                // Never cleared once present: empty or failed emissions keep
                // the previous provider.
                let image_url_provider = provider
                    .get()
                    .cloned()
                    .flatten()
                    .or(state.image_url_provider);
                LibraryViewState {
                    image_url_provider,
                    ..state
                }
            }
            LibraryIntent::UserDetailsLoaded(user) => {
                let user = user.get().cloned().or(state.user);
                LibraryViewState { user, ..state }
            }
            LibraryIntent::AuthStateChanged(auth) => LibraryViewState {
                auth_state: auth.get().copied().unwrap_or_default(),
                ..state
            },
        }
    }
}
