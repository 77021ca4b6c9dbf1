//! Data-fetch controller.
//!
//! Wraps an asynchronous backend operation `op(token, options, args)` with
//! observable async state: `data`, a tri-state `loading`, and `error`.
//! Each invocation mints a fresh access token from the injected session —
//! the whole call fails when nothing is signed in — then runs the
//! operation with the fixed options and the call-time arguments.
//!
//! Concurrent invocations race freely: there is no retry, no deduplication,
//! no timeout, and no cancellation. A per-instance generation counter
//! settles the race deterministically — a completion belonging to a stale
//! generation is discarded, so the latest-started invocation's outcome is
//! the one observed, regardless of resolution order.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use jobdeck_auth::{AccessToken, SharedSession};

use crate::error::{ApiCallError, ApiCallResult};

/// Boxed operation future.
pub type OpFuture<T> = Pin<Box<dyn Future<Output = ApiCallResult<T>> + Send>>;

type Operation<A, O, T> = dyn Fn(AccessToken, O, A) -> OpFuture<T> + Send + Sync;

/// Loading tri-state: never run, in flight, or settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Settled,
}

struct Slot<T> {
    data: Option<T>,
    loading: LoadState,
    error: Option<Arc<ApiCallError>>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: LoadState::Idle,
            error: None,
        }
    }
}

/// Async-state wrapper around one backend operation.
///
/// `O` is the fixed options value handed to every call; it is cloned per
/// invocation and never mutated by call-time arguments.
pub struct Fetcher<A, O, T> {
    session: SharedSession,
    options: O,
    op: Arc<Operation<A, O, T>>,
    slot: Arc<Mutex<Slot<T>>>,
    generation: Arc<AtomicU64>,
}

impl<A, O: Clone, T> Clone for Fetcher<A, O, T> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            options: self.options.clone(),
            op: Arc::clone(&self.op),
            slot: Arc::clone(&self.slot),
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<A, O, T> Fetcher<A, O, T>
where
    O: Clone + Send + Sync + 'static,
    T: Clone + Send + 'static,
    A: Send + 'static,
{
    /// Create a controller over `op` with a fixed options value.
    pub fn new<F>(session: SharedSession, options: O, op: F) -> Self
    where
        F: Fn(AccessToken, O, A) -> OpFuture<T> + Send + Sync + 'static,
    {
        Self {
            session,
            options,
            op: Arc::new(op),
            slot: Arc::new(Mutex::new(Slot::default())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Run the operation once with the given call-time arguments.
    ///
    /// Returns this invocation's own result; the observable state keeps the
    /// result of the latest-started invocation only.
    pub async fn invoke(&self, args: A) -> Result<T, Arc<ApiCallError>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut slot = self.slot.lock().expect("fetch slot poisoned");
            slot.loading = LoadState::Loading;
            slot.error = None;
        }

        let result = match self.session.access_token().await {
            Ok(token) => (self.op)(token, self.options.clone(), args).await,
            Err(e) => Err(ApiCallError::from(e)),
        };
        let result = result.map_err(Arc::new);

        let mut slot = self.slot.lock().expect("fetch slot poisoned");
        if self.generation.load(Ordering::SeqCst) == generation {
            match &result {
                Ok(value) => {
                    slot.data = Some(value.clone());
                    slot.error = None;
                }
                Err(e) => slot.error = Some(Arc::clone(e)),
            }
            slot.loading = LoadState::Settled;
        }
        result
    }

    pub fn data(&self) -> Option<T> {
        self.slot.lock().expect("fetch slot poisoned").data.clone()
    }

    pub fn loading(&self) -> LoadState {
        self.slot.lock().expect("fetch slot poisoned").loading
    }

    pub fn error(&self) -> Option<Arc<ApiCallError>> {
        self.slot
            .lock()
            .expect("fetch slot poisoned")
            .error
            .clone()
    }

    /// The fixed options value.
    pub fn options(&self) -> &O {
        &self.options
    }
}
