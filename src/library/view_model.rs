//! State holder of the library screen.
//!
//! Wires three asynchronous sources into one [`StateStore`]:
//!
//! ```text
//! image providers ─ delay ────────────────────────────────┐
//! user details ───────────────────────────────────────────┼─→ LibraryReducer ─→ store
//! auth states ──── distinct ─ LoggedIn? → refresh user ───┘
//! ```

use std::sync::Arc;

use crate::config::LibraryConfig;
use crate::error::SourceError;
use crate::mvi::Reducer;
use crate::operation::OperationHandle;
use crate::pipeline::{Pipeline, PipelineHandle, SideEffect};
use crate::store::{DispatchContext, StateStore, Subscription};

use super::collaborators::{
    AuthManager, AuthServiceHandle, HomeNavigator, ImageProviderSource, UserDetailsExecuteParams,
    UserDetailsInteractor, UserDetailsParams,
};
use super::intent::LibraryIntent;
use super::reducer::LibraryReducer;
use super::state::{AuthState, LibraryFilter, LibraryViewState};

pub struct LibraryViewModel<U: UserDetailsInteractor> {
    store: StateStore<LibraryViewState>,
    auth_manager: Arc<dyn AuthManager>,
    update_user_details: OperationHandle<U>,
    pipelines: Vec<PipelineHandle>,
    config: LibraryConfig,
}

impl<U: UserDetailsInteractor> LibraryViewModel<U> {
    /// Build the store and subscribe every source.
    ///
    /// Must be called from within a tokio runtime. User detail fetches are
    /// published according to `config.stale_results`.
    pub fn new(
        config: LibraryConfig,
        context: Arc<dyn DispatchContext>,
        image_source: Arc<dyn ImageProviderSource>,
        auth_manager: Arc<dyn AuthManager>,
        user_details: U,
    ) -> Self {
        let update_user_details = OperationHandle::with_policy(user_details, config.stale_results);
        let store = StateStore::new(LibraryViewState::default(), context);
        store.update(|state| LibraryReducer::reduce(state, LibraryIntent::Initialize));

        let image_providers = Pipeline::new("image_provider", image_source.image_providers())
            .delay(config.image_provider_delay())
            .execute(&store, |state, provider| {
                LibraryReducer::reduce(state, LibraryIntent::ImageProviderResolved(provider))
            });

        update_user_details.set_params(UserDetailsParams {
            username: config.user_id.clone(),
        });
        let user_details = Pipeline::new("user_details", update_user_details.results())
            .execute(&store, |state, user| {
                LibraryReducer::reduce(state, LibraryIntent::UserDetailsLoaded(user))
            });

        let refresh = {
            let update_user_details = update_user_details.clone();
            SideEffect::new(
                &store,
                "refresh_user_on_login",
                |auth: &Result<AuthState, SourceError>| matches!(auth, Ok(AuthState::LoggedIn)),
                move || {
                    update_user_details.invoke(UserDetailsExecuteParams {
                        force_refresh: false,
                    });
                },
            )
        };
        let auth_states = Pipeline::new("auth_state", auth_manager.auth_states())
            .distinct_until_changed()
            .on_transition(refresh)
            .execute(&store, |state, auth| {
                LibraryReducer::reduce(state, LibraryIntent::AuthStateChanged(auth))
            });

        tracing::debug!(
            user_id = %config.user_id,
            operation = %update_user_details.id(),
            stale_results = ?update_user_details.policy(),
            "library view model created"
        );

        Self {
            store,
            auth_manager,
            update_user_details,
            pipelines: vec![image_providers, user_details, auth_states],
            config,
        }
    }

    /// Current view state.
    pub fn state(&self) -> LibraryViewState {
        self.store.read()
    }

    /// Current view state followed by every update.
    pub fn subscribe(&self) -> Subscription<LibraryViewState> {
        self.store.subscribe()
    }

    /// Underlying store, for hosts that drive their own pipelines.
    pub fn store(&self) -> &StateStore<LibraryViewState> {
        &self.store
    }

    pub fn on_filter_selected(&self, filter: LibraryFilter) {
        self.store
            .update(move |state| LibraryReducer::reduce(state, LibraryIntent::SelectFilter(filter)));
    }

    pub fn on_login_item_clicked(&self, service: &AuthServiceHandle) {
        self.auth_manager
            .start_auth(self.config.login_request_code, service);
    }

    pub fn on_settings_clicked(&self, navigator: &dyn HomeNavigator) {
        navigator.show_settings();
    }

    pub fn on_profile_item_clicked(&self) {
        // TODO: open the profile screen once it exists.
        tracing::trace!("profile item clicked");
    }

    /// Re-fetch the user profile. Returns the invocation sequence number.
    ///
    /// May be called from any thread; the fetch runs on the runtime the
    /// view model was built in.
    pub fn refresh_user(&self, force_refresh: bool) -> u64 {
        self.update_user_details
            .invoke(UserDetailsExecuteParams { force_refresh })
    }

    /// Unsubscribe every source and stop publishing.
    ///
    /// In-flight fetches run to completion; their results are discarded.
    pub fn teardown(&self) {
        self.store.teardown();
    }

    /// Tear down and wait for every pipeline task to exit.
    pub async fn shutdown(mut self) {
        self.store.teardown();
        for pipeline in std::mem::take(&mut self.pipelines) {
            pipeline.join().await;
        }
    }
}

impl<U: UserDetailsInteractor> Drop for LibraryViewModel<U> {
    fn drop(&mut self) {
        self.store.teardown();
    }
}
