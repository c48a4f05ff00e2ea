use crate::mvi::Intent;
use crate::pipeline::Async;

use super::state::{AuthState, ImageUrlProvider, LibraryFilter, UserProfile};

#[derive(Debug, Clone)]
pub enum LibraryIntent {
    /// Screen opened: publish the allowed filters and select the default.
    Initialize,
    /// User picked a filter.
    SelectFilter(LibraryFilter),
    /// Image provider source emitted.
    ImageProviderResolved(Async<Option<ImageUrlProvider>>),
    /// User details operation completed.
    UserDetailsLoaded(Async<UserProfile>),
    /// Auth state source emitted.
    AuthStateChanged(Async<AuthState>),
}

impl Intent for LibraryIntent {}
