//! Request interception and generation lifecycle.

use super::http::{CacheKey, Method, NetworkError, Request, Response, Transport};
use super::storage::CacheStorage;
use crate::config::CacheConfig;
use parking_lot::RwLock;
use regex::Regex;
use std::sync::Arc;

/// Lifecycle of a [`MediaCache`]. Only `Active` caches intercept requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Installing,
    Activating,
    Active,
}

/// What the caller should do with a request.
#[derive(Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Not ours: let the request go to the network as if no cache existed.
    PassThrough,
    /// Answered by the cache layer, from storage or from the network.
    Respond(Result<Response, NetworkError>),
}

impl FetchOutcome {
    pub fn is_pass_through(&self) -> bool {
        matches!(self, FetchOutcome::PassThrough)
    }

    pub fn into_response(self) -> Option<Result<Response, NetworkError>> {
        match self {
            FetchOutcome::PassThrough => None,
            FetchOutcome::Respond(result) => Some(result),
        }
    }
}

/// Cache-first handler for one generation of the optimized tree.
pub struct MediaCache<S: CacheStorage, T: Transport> {
    generation: String,
    pattern: Regex,
    storage: Arc<S>,
    transport: T,
    state: RwLock<WorkerState>,
}

impl<S: CacheStorage, T: Transport> MediaCache<S, T> {
    /// `url_prefix` is matched literally anywhere in the request URL.
    pub fn new(
        generation: impl Into<String>,
        url_prefix: &str,
        storage: Arc<S>,
        transport: T,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            generation: generation.into(),
            pattern: Regex::new(&regex::escape(url_prefix))?,
            storage,
            transport,
            state: RwLock::new(WorkerState::Installing),
        })
    }

    pub fn from_config(
        config: &CacheConfig,
        storage: Arc<S>,
        transport: T,
    ) -> Result<Self, regex::Error> {
        Self::new(&config.name, &config.url_prefix, storage, transport)
    }

    pub fn generation(&self) -> &str {
        &self.generation
    }

    pub fn state(&self) -> WorkerState {
        *self.state.read()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Finish installation without waiting for older generations to retire.
    pub fn install(&self) {
        let mut state = self.state.write();
        if *state == WorkerState::Installing {
            *state = WorkerState::Activating;
            tracing::debug!("{} installed, skipping wait", self.generation);
        }
    }

    /// Delete every generation other than ours, then start serving.
    ///
    /// Returns the names of the evicted generations. Calling this on an
    /// active cache is a no-op.
    pub fn activate(&self) -> Vec<String> {
        {
            let mut state = self.state.write();
            if *state == WorkerState::Active {
                return Vec::new();
            }
            *state = WorkerState::Activating;
        }

        let evicted: Vec<String> = self
            .storage
            .keys()
            .into_iter()
            .filter(|name| name != &self.generation)
            .filter(|name| self.storage.delete(name))
            .collect();
        if !evicted.is_empty() {
            tracing::info!("evicted cache generations: {}", evicted.join(", "));
        }

        *self.state.write() = WorkerState::Active;
        evicted
    }

    /// Whether a request belongs to the optimized tree.
    pub fn should_intercept(&self, request: &Request) -> bool {
        request.method == Method::Get && self.pattern.is_match(&request.url)
    }

    pub fn handle(&self, request: &Request) -> FetchOutcome {
        if self.state() != WorkerState::Active || !self.should_intercept(request) {
            return FetchOutcome::PassThrough;
        }

        let key = CacheKey::from(request);
        self.storage.open(&self.generation);
        if let Some(cached) = self.storage.lookup(&self.generation, &key) {
            tracing::debug!("cache hit: {}", key);
            return FetchOutcome::Respond(Ok(cached));
        }

        match self.transport.fetch(request) {
            Ok(response) => {
                if response.is_ok() {
                    self.storage
                        .put(&self.generation, key, response.clone());
                } else {
                    tracing::debug!("not caching {} ({})", key, response.status);
                }
                FetchOutcome::Respond(Ok(response))
            }
            // Another request may have stored the entry since our lookup.
            Err(e) => match self.storage.lookup(&self.generation, &key) {
                Some(cached) => {
                    tracing::warn!("{} failed ({}), serving cached copy", key, e);
                    FetchOutcome::Respond(Ok(cached))
                }
                None => FetchOutcome::Respond(Err(e)),
            },
        }
    }
}
