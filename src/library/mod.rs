//! The library screen: its view state, merge rules, collaborators and the
//! view model exposing user actions.

pub mod collaborators;
mod intent;
mod reducer;
mod state;
mod view_model;

pub use collaborators::{
    AuthManager, AuthServiceHandle, HomeNavigator, ImageProviderSource, UserDetailsExecuteParams,
    UserDetailsInteractor, UserDetailsParams,
};
pub use intent::LibraryIntent;
pub use reducer::LibraryReducer;
pub use state::{AuthState, ImageUrlProvider, LibraryFilter, LibraryViewState, UserProfile};
pub use view_model::LibraryViewModel;
