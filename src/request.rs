//! Request-keyed state for values loaded from the service.
//!
//! Every fetch is issued through [`Tracked::begin`], which hands out a
//! monotonically increasing [`RequestId`]. Only the response carrying the
//! latest id is applied; anything older is reported as stale and dropped, so
//! overlapping requests can never overwrite newer state.

use leptos::prelude::*;
use tracing::debug;

/// Identity of one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Outcome of settling a response against the current state.
#[derive(Debug, Clone, PartialEq)]
pub enum Settled<T> {
    /// The response was for the latest request; this is the next state.
    Applied(Tracked<T>),
    /// A newer request was issued (or the state was reset) after this one.
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tracked<T> {
    issued: u64,
    pending: Option<RequestId>,
    value: Option<T>,
    error: Option<String>,
}

impl<T> Default for Tracked<T> {
    fn default() -> Self {
        Self {
            issued: 0,
            pending: None,
            value: None,
            error: None,
        }
    }
}

impl<T: Clone> Tracked<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new request. The previous value stays visible until the new
    /// one arrives; any earlier error is cleared.
    pub fn begin(&self) -> (Self, RequestId) {
        let id = RequestId(self.issued + 1);
        let next = Self {
            issued: id.0,
            pending: Some(id),
            value: self.value.clone(),
            error: None,
        };
        (next, id)
    }

    /// Apply the response for `id`, unless it has been superseded.
    pub fn settle(&self, id: RequestId, outcome: Result<T, String>) -> Settled<T> {
        if self.pending != Some(id) {
            return Settled::Stale;
        }
        let next = match outcome {
            Ok(value) => Self {
                issued: self.issued,
                pending: None,
                value: Some(value),
                error: None,
            },
            Err(message) => Self {
                issued: self.issued,
                pending: None,
                value: self.value.clone(),
                error: Some(message),
            },
        };
        Settled::Applied(next)
    }

    /// Forget the value and invalidate anything in flight. The id counter
    /// keeps counting so old responses still read as stale.
    pub fn reset(&self) -> Self {
        Self {
            issued: self.issued,
            ..Self::default()
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

// -- Reactive glue --

/// Start a request against the state held in `signal`. `None` once the owning
/// view has been disposed.
pub fn begin_in<T>(signal: RwSignal<Tracked<T>>) -> Option<RequestId>
where
    T: Clone + Send + Sync + 'static,
{
    signal.try_update(|state| {
        let (next, id) = state.begin();
        *state = next;
        id
    })
}

/// Settle the response for `id` into `signal`. Returns `true` when it was
/// applied; a superseded response leaves the signal untouched and notifies
/// nobody.
pub fn settle_in<T>(signal: RwSignal<Tracked<T>>, id: RequestId, outcome: Result<T, String>) -> bool
where
    T: Clone + Send + Sync + 'static,
{
    signal
        .try_maybe_update(|state| match state.settle(id, outcome) {
            Settled::Applied(next) => {
                *state = next;
                (true, true)
            }
            Settled::Stale => {
                debug!("Dropping stale response for request #{}", id.get());
                (false, false)
            }
        })
        .unwrap_or(false)
}

/// Drop the value held in `signal` and invalidate anything in flight.
pub fn reset_in<T>(signal: RwSignal<Tracked<T>>)
where
    T: Clone + Send + Sync + 'static,
{
    let _ = signal.try_update(|state| *state = state.reset());
}
