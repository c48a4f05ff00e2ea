//! Contracts of the external collaborators the library screen talks to.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::operation::Interactor;
use crate::pipeline::SourceStream;

use super::state::{AuthState, ImageUrlProvider, UserProfile};

/// Emits the image URL provider whenever it is (re)resolved.
///
/// May emit `None` while the provider configuration is unavailable.
pub trait ImageProviderSource: Send + Sync {
    fn image_providers(&self) -> SourceStream<Option<ImageUrlProvider>>;
}

/// Authorization collaborator: an infinite stream of auth states plus the
/// entry point that starts an interactive authorization.
pub trait AuthManager: Send + Sync {
    fn auth_states(&self) -> SourceStream<AuthState>;

    /// Fire-and-forget; the outcome arrives later through `auth_states`.
    fn start_auth(&self, request_code: i32, service: &AuthServiceHandle);
}

/// Navigation collaborator of the home screens.
pub trait HomeNavigator: Send + Sync {
    fn show_settings(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetailsParams {
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserDetailsExecuteParams {
    pub force_refresh: bool,
}

/// Operation fetching the signed-in user's profile.
pub trait UserDetailsInteractor:
    Interactor<
    Params = UserDetailsParams,
    ExecuteParams = UserDetailsExecuteParams,
    Output = UserProfile,
>
{
}

impl<T> UserDetailsInteractor for T where
    T: Interactor<
        Params = UserDetailsParams,
        ExecuteParams = UserDetailsExecuteParams,
        Output = UserProfile,
    >
{
}

/// Opaque handle to the platform authorization service.
///
/// The store only passes it through to [`AuthManager::start_auth`].
#[derive(Clone)]
pub struct AuthServiceHandle {
    service: Arc<dyn Any + Send + Sync>,
}

impl AuthServiceHandle {
    pub fn new<T: Any + Send + Sync>(service: T) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.service.downcast_ref::<T>()
    }
}

impl fmt::Debug for AuthServiceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthServiceHandle").finish_non_exhaustive()
    }
}
