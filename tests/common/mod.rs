//! Shared fakes for the library view model integration tests.

#![allow(dead_code, unused_imports)]

use async_trait::async_trait;
use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures::stream::{self, StreamExt};
use library_view::config::LibraryConfig;
use library_view::error::SourceError;
use library_view::library::{
    AuthManager, AuthServiceHandle, AuthState, HomeNavigator, ImageProviderSource,
    ImageUrlProvider, LibraryViewModel, LibraryViewState, UserDetailsExecuteParams,
    UserDetailsParams, UserProfile,
};
use library_view::operation::Interactor;
use library_view::pipeline::SourceStream;
use library_view::store::{DispatchContext, Immediate, Subscription};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

pub type ImageSender = UnboundedSender<Result<Option<ImageUrlProvider>, SourceError>>;
pub type AuthSender = UnboundedSender<Result<AuthState, SourceError>>;

// -- Sources ------------------------------------------------------------------

/// Image provider source fed from the test through a channel.
pub struct FakeImageSource {
    receiver: Mutex<Option<UnboundedReceiver<Result<Option<ImageUrlProvider>, SourceError>>>>,
}

impl FakeImageSource {
    pub fn new() -> (Arc<Self>, ImageSender) {
        let (tx, rx) = unbounded();
        let source = Arc::new(Self {
            receiver: Mutex::new(Some(rx)),
        });
        (source, tx)
    }
}

impl ImageProviderSource for FakeImageSource {
    fn image_providers(&self) -> SourceStream<Option<ImageUrlProvider>> {
        match self.receiver.lock().take() {
            Some(rx) => rx.boxed(),
            None => stream::empty().boxed(),
        }
    }
}

/// Auth collaborator fed from the test; records `start_auth` calls.
pub struct FakeAuthManager {
    receiver: Mutex<Option<UnboundedReceiver<Result<AuthState, SourceError>>>>,
    pub started: Mutex<Vec<(i32, Option<String>)>>,
}

impl FakeAuthManager {
    pub fn new() -> (Arc<Self>, AuthSender) {
        let (tx, rx) = unbounded();
        let manager = Arc::new(Self {
            receiver: Mutex::new(Some(rx)),
            started: Mutex::new(Vec::new()),
        });
        (manager, tx)
    }
}

impl AuthManager for FakeAuthManager {
    fn auth_states(&self) -> SourceStream<AuthState> {
        match self.receiver.lock().take() {
            Some(rx) => rx.boxed(),
            None => stream::empty().boxed(),
        }
    }

    fn start_auth(&self, request_code: i32, service: &AuthServiceHandle) {
        let service = service.downcast_ref::<String>().cloned();
        self.started.lock().push((request_code, service));
    }
}

// -- Operations ---------------------------------------------------------------

pub type UserCalls = Arc<Mutex<Vec<(UserDetailsParams, UserDetailsExecuteParams)>>>;

/// Latency and display name of one scripted user details fetch.
pub type UserScript = Arc<Mutex<VecDeque<(Duration, &'static str)>>>;

/// User details interactor answering from memory.
///
/// Scripted entries are consumed one per call; unscripted calls answer
/// `profile(username)` after `latency`.
pub struct FakeUserDetails {
    pub calls: UserCalls,
    pub failing: Arc<Mutex<bool>>,
    pub script: UserScript,
    pub latency: Duration,
}

impl FakeUserDetails {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(Mutex::new(false)),
            script: Arc::new(Mutex::new(VecDeque::new())),
            latency: Duration::from_millis(5),
        }
    }
}

#[async_trait]
impl Interactor for FakeUserDetails {
    type Params = UserDetailsParams;
    type ExecuteParams = UserDetailsExecuteParams;
    type Output = UserProfile;

    fn name(&self) -> &'static str {
        "update_user_details"
    }

    async fn execute(
        &self,
        params: UserDetailsParams,
        execute: UserDetailsExecuteParams,
    ) -> Result<UserProfile, SourceError> {
        self.calls.lock().push((params.clone(), execute));
        let scripted = self.script.lock().pop_front();
        let latency = scripted.map_or(self.latency, |(latency, _)| latency);
        tokio::time::sleep(latency).await;
        if *self.failing.lock() {
            return Err(SourceError::failed("trakt", "503"));
        }
        let mut user = profile(&params.username);
        if let Some((_, name)) = scripted {
            user.name = Some(name.to_string());
        }
        Ok(user)
    }
}

/// Navigator counting `show_settings` calls.
#[derive(Default)]
pub struct RecordingNavigator {
    pub settings_shown: Mutex<u32>,
}

impl HomeNavigator for RecordingNavigator {
    fn show_settings(&self) {
        *self.settings_shown.lock() += 1;
    }
}

// -- Fixtures -----------------------------------------------------------------

pub fn profile(username: &str) -> UserProfile {
    UserProfile {
        username: username.to_string(),
        name: Some("Chris Banes".to_string()),
        location: None,
        avatar_url: None,
        vip: false,
    }
}

pub fn provider(base_url: &str) -> ImageUrlProvider {
    ImageUrlProvider {
        base_url: base_url.to_string(),
        poster_sizes: vec!["w154".to_string(), "original".to_string()],
        backdrop_sizes: vec!["w780".to_string(), "original".to_string()],
        logo_sizes: Vec::new(),
    }
}

/// View model wired to fakes, with the handles tests drive it through.
pub struct Harness {
    pub view_model: LibraryViewModel<FakeUserDetails>,
    pub images: ImageSender,
    pub auth: AuthSender,
    pub auth_manager: Arc<FakeAuthManager>,
    pub user_calls: UserCalls,
    pub user_failing: Arc<Mutex<bool>>,
    pub user_script: UserScript,
}

pub fn harness() -> Harness {
    harness_with(LibraryConfig::default(), Arc::new(Immediate))
}

pub fn harness_with(config: LibraryConfig, context: Arc<dyn DispatchContext>) -> Harness {
    let (image_source, images) = FakeImageSource::new();
    let (auth_manager, auth) = FakeAuthManager::new();
    let interactor = FakeUserDetails::new();
    let user_calls = Arc::clone(&interactor.calls);
    let user_failing = Arc::clone(&interactor.failing);
    let user_script = Arc::clone(&interactor.script);
    let view_model = LibraryViewModel::new(
        config,
        context,
        image_source,
        auth_manager.clone(),
        interactor,
    );
    Harness {
        view_model,
        images,
        auth,
        auth_manager,
        user_calls,
        user_failing,
        user_script,
    }
}

/// Receive states until one matches `predicate`.
pub async fn wait_for<F>(sub: &mut Subscription<LibraryViewState>, predicate: F) -> LibraryViewState
where
    F: Fn(&LibraryViewState) -> bool,
{
    let fut = async {
        while let Some(state) = sub.recv().await {
            if predicate(&state) {
                return state;
            }
        }
        panic!("subscription ended before the expected state");
    };
    tokio::time::timeout(Duration::from_secs(5), fut)
        .await
        .expect("timed out waiting for state")
}

/// Let spawned tasks and timers run for `duration` of (paused) test time.
pub async fn run_for(duration: Duration) {
    tokio::time::sleep(duration).await;
}
