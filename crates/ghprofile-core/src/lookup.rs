// ── Profile lookup ──
//
// Runs the two dependent calls (profile, then repositories) and publishes
// each state transition through a `watch` channel. Every lookup takes a
// new generation number; a publication is accepted only while its
// generation is still the newest, checked under the channel's write lock.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, error, warn};
use url::Url;

use ghprofile_api::transport::{TlsMode, TransportConfig};
use ghprofile_api::{GitHubClient, REPOS_PER_PAGE};

use crate::config::LookupConfig;
use crate::error::{CoreError, LookupError};
use crate::model::{ProfileQuery, ProfileRecord, RepositoryRecord};
use crate::state::UiState;

/// Entry point for front ends.
///
/// Cheaply cloneable via `Arc`; clones share the state channel and the
/// generation counter, so lookups spawned from different tasks still
/// resolve to last-request-wins.
#[derive(Clone)]
pub struct ProfileLookupClient {
    inner: Arc<LookupInner>,
}

struct LookupInner {
    api: GitHubClient,
    generation: AtomicU64,
    state: watch::Sender<UiState>,
}

impl ProfileLookupClient {
    /// Build a client (and its HTTP transport) from configuration.
    pub fn new(config: &LookupConfig) -> Result<Self, CoreError> {
        let transport = build_transport(config);
        let api = GitHubClient::new(config.base_url.clone(), &transport)?;
        Ok(Self::with_api(api))
    }

    /// Wrap an already-built API client.
    pub fn with_api(api: GitHubClient) -> Self {
        let (state, _) = watch::channel(UiState::Idle);
        Self {
            inner: Arc::new(LookupInner {
                api,
                generation: AtomicU64::new(0),
                state,
            }),
        }
    }

    pub fn base_url(&self) -> &Url {
        self.inner.api.base_url()
    }

    /// Subscribe to every published state transition.
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.inner.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> UiState {
        self.inner.state.borrow().clone()
    }

    /// Generation of the most recently started lookup (0 before the first).
    pub fn current_generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    /// Run one lookup for raw user input.
    ///
    /// Returns the final state of *this* lookup. If a newer lookup started
    /// meanwhile, that state is returned but not published.
    pub async fn lookup(&self, raw: &str) -> UiState {
        let query = match ProfileQuery::parse(raw) {
            Ok(query) => query,
            Err(err) => {
                let generation = self.begin(UiState::failed(err.clone(), None));
                debug!(generation, "rejected empty username");
                return UiState::failed(err, None);
            }
        };

        let generation = self.begin(UiState::Loading);
        let _loading = LoadingGuard {
            client: self,
            generation,
        };
        debug!(generation, username = query.username(), "lookup started");

        let outcome = self.run(generation, &query).await;
        if !self.publish(generation, outcome.clone()) {
            warn!(
                generation,
                username = query.username(),
                "discarding result of superseded lookup"
            );
        }
        outcome
    }

    async fn run(&self, generation: u64, query: &ProfileQuery) -> UiState {
        let username = query.username();

        let profile = match self.inner.api.get_user(username).await {
            Ok(user) => ProfileRecord::from(user),
            Err(err) => {
                let failure = LookupError::from_profile_error(&err, username);
                log_failure(&failure, &err, "profile");
                return UiState::failed(failure, None);
            }
        };

        self.publish(
            generation,
            UiState::ProfileShown {
                profile: profile.clone(),
            },
        );

        match self.inner.api.list_user_repos(username).await {
            Ok(repos) => {
                let repositories: Vec<RepositoryRecord> = repos
                    .into_iter()
                    .take(REPOS_PER_PAGE)
                    .map(RepositoryRecord::from)
                    .collect();
                debug!(generation, count = repositories.len(), "lookup loaded");
                UiState::Loaded {
                    profile,
                    repositories,
                }
            }
            Err(err) => {
                let failure = LookupError::from_repositories_error(&err);
                log_failure(&failure, &err, "repositories");
                UiState::failed(failure, Some(profile))
            }
        }
    }

    /// Allocate a new generation and publish its first state atomically.
    fn begin(&self, initial: UiState) -> u64 {
        let mut generation = 0;
        self.inner.state.send_modify(|state| {
            generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = initial;
        });
        generation
    }

    /// Publish `next` if `generation` is still the newest lookup.
    fn publish(&self, generation: u64, next: UiState) -> bool {
        let inner = &self.inner;
        inner.state.send_if_modified(|state| {
            if inner.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            debug!(generation, state = next.label(), "state transition");
            *state = next;
            true
        })
    }
}

/// Clears the loading indicator if a lookup exits without publishing a
/// final state (its future was dropped mid-flight).
struct LoadingGuard<'a> {
    client: &'a ProfileLookupClient,
    generation: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let inner = &self.client.inner;
        inner.state.send_if_modified(|state| {
            if inner.generation.load(Ordering::SeqCst) != self.generation || !state.is_in_flight() {
                return false;
            }
            debug!(generation = self.generation, "lookup abandoned while loading");
            *state = UiState::Idle;
            true
        });
    }
}

fn log_failure(failure: &LookupError, source: &ghprofile_api::Error, call: &str) {
    if failure.is_unexpected() {
        error!(call, error = %source, "network or parsing error");
    } else {
        warn!(call, error = %source, "lookup failed");
    }
}

fn build_transport(config: &LookupConfig) -> TransportConfig {
    let tls = config
        .ca_cert
        .clone()
        .map_or(TlsMode::System, TlsMode::CustomCa);

    TransportConfig {
        tls,
        ..TransportConfig::default()
    }
    .with_timeout(config.timeout)
    .with_user_agent(config.user_agent.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ProfileLookupClient {
        // Nothing listens on port 9; these tests never reach the network.
        let config = LookupConfig {
            base_url: Url::parse("http://127.0.0.1:9").expect("valid url"),
            ..LookupConfig::default()
        };
        ProfileLookupClient::new(&config).expect("client builds")
    }

    #[test]
    fn transport_follows_lookup_config() {
        let config = LookupConfig {
            timeout: std::time::Duration::from_secs(7),
            user_agent: "agent/1".into(),
            ca_cert: Some("/etc/ghprofile/ca.pem".into()),
            ..LookupConfig::default()
        };
        let transport = build_transport(&config);
        assert_eq!(transport.timeout, std::time::Duration::from_secs(7));
        assert_eq!(transport.user_agent, "agent/1");
        assert!(matches!(
            transport.tls,
            TlsMode::CustomCa(ref path) if path.as_path() == std::path::Path::new("/etc/ghprofile/ca.pem")
        ));
    }

    #[test]
    fn stale_generation_is_not_published() {
        let client = client();
        let first = client.begin(UiState::Loading);
        let second = client.begin(UiState::Loading);
        assert_eq!(client.current_generation(), second);

        assert!(!client.publish(first, UiState::failed(LookupError::NetworkOrParseFailure, None)));
        assert_eq!(client.state(), UiState::Loading);

        assert!(client.publish(second, UiState::Idle));
        assert_eq!(client.state(), UiState::Idle);
    }

    #[test]
    fn dropped_guard_clears_loading() {
        let client = client();
        let generation = client.begin(UiState::Loading);
        drop(LoadingGuard {
            client: &client,
            generation,
        });
        assert_eq!(client.state(), UiState::Idle);
    }

    #[test]
    fn dropped_guard_leaves_newer_lookup_alone() {
        let client = client();
        let older = client.begin(UiState::Loading);
        client.begin(UiState::Loading);
        drop(LoadingGuard {
            client: &client,
            generation: older,
        });
        assert_eq!(client.state(), UiState::Loading);
    }

    #[test]
    fn dropped_guard_keeps_final_state() {
        let client = client();
        let generation = client.begin(UiState::Loading);
        client.publish(generation, UiState::failed(LookupError::EmptyInput, None));
        drop(LoadingGuard {
            client: &client,
            generation,
        });
        assert_eq!(client.state().error(), Some(&LookupError::EmptyInput));
    }

    #[test]
    fn subscribers_see_transitions() {
        let client = client();
        let mut rx = client.subscribe();
        assert!(!rx.has_changed().expect("sender alive"));

        client.begin(UiState::Loading);
        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(*rx.borrow_and_update(), UiState::Loading);
    }

    #[test]
    fn transport_uses_custom_ca_when_configured() {
        let config = LookupConfig {
            ca_cert: Some("/tmp/ca.pem".into()),
            ..LookupConfig::default()
        };
        let transport = build_transport(&config);
        assert!(matches!(transport.tls, TlsMode::CustomCa(_)));
        assert_eq!(transport.timeout, config.timeout);
    }
}
