//! Runtime media cache: cache-first delivery of the optimized tree.
//!
//! The pipeline writes `pics-optimized/`; at runtime, requests for that tree
//! are served from a named cache generation and only go to the network on a
//! miss. Everything else passes through untouched.
//!
//! ```text
//! Request ──► MediaCache::handle
//!               │ not GET / no prefix match / not active
//!               ├──────────────────────────────────────► PassThrough
//!               │ hit
//!               ├──► CacheStorage::lookup ─────────────► Respond(cached)
//!               │ miss
//!               └──► Transport::fetch ─► put if 2xx ───► Respond(response)
//!                            │ error
//!                            └─► lookup again ─────────► Respond(cached | error)
//! ```
//!
//! ## Generations
//!
//! A generation is a named cache (`[cache] name`, e.g. `media-cache-v1`).
//! Bumping the name on deploy invalidates everything: activation deletes
//! every generation except the current one before the cache starts serving.
//! There is no per-entry expiry.
//!
//! The same semantics are available as a browser service worker through
//! [`render_service_worker`], for deployments that serve the tree statically.

pub mod http;
pub mod script;
pub mod storage;
pub mod worker;

pub use http::{CacheKey, Method, NetworkError, Request, Response, Transport};
pub use script::render_service_worker;
pub use storage::{CacheStorage, MemoryStorage};
pub use worker::{FetchOutcome, MediaCache, WorkerState};
