//! Debounced stop search.
//!
//! Keystrokes arrive far faster than the stop finder should be queried.
//! [`SearchDebouncer`] waits for a quiet period after the latest trigger
//! before issuing a lookup, and numbers every lookup it issues so that a
//! slow response to an older query can never replace the candidates of a
//! newer one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::Stop;
use crate::stopfinder::StopFinder;

/// Default quiet period before a search is issued.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// The candidate list as seen by the UI layer.
///
/// Every state except `Idle` carries the generation of the search that
/// produced it. Completed states replace each other wholesale.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    /// No search issued yet.
    #[default]
    Idle,

    /// A search is in flight.
    Searching { generation: u64, query: String },

    /// The latest search returned candidates.
    Found {
        generation: u64,
        query: String,
        stops: Vec<Stop>,
    },

    /// The latest search matched nothing.
    NoMatches { generation: u64, query: String },

    /// The latest search failed.
    Failed {
        generation: u64,
        query: String,
        error: String,
    },
}

impl SearchState {
    /// Generation of the search this state belongs to.
    pub fn generation(&self) -> Option<u64> {
        match self {
            SearchState::Idle => None,
            SearchState::Searching { generation, .. }
            | SearchState::Found { generation, .. }
            | SearchState::NoMatches { generation, .. }
            | SearchState::Failed { generation, .. } => Some(*generation),
        }
    }

    /// Candidate stops, empty unless the latest search found some.
    pub fn stops(&self) -> &[Stop] {
        match self {
            SearchState::Found { stops, .. } => stops,
            _ => &[],
        }
    }

    /// User-facing status line for states that have one.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SearchState::Idle | SearchState::Found { .. } => None,
            SearchState::Searching { .. } => Some("Suche läuft..."),
            SearchState::NoMatches { .. } => Some(
                "Keine Haltestellen für diese Adresse gefunden. Bitte versuchen Sie eine andere Adresse.",
            ),
            SearchState::Failed { .. } => Some("Fehler bei der Suche"),
        }
    }
}

/// Debouncing scheduler for stop searches.
///
/// Call [`trigger`](Self::trigger) on every edit of the address. Each call
/// cancels the pending timer and starts a new one; only a trigger that
/// survives the whole quiet period issues a lookup. Lookups already in
/// flight are never cancelled, but their results are dropped unless they
/// belong to the most recently issued generation.
///
/// Must be used from within a tokio runtime.
pub struct SearchDebouncer<F> {
    finder: Arc<F>,
    quiet_period: Duration,
    pending: Option<JoinHandle<()>>,
    issued: Arc<AtomicU64>,
    state: Arc<watch::Sender<SearchState>>,
}

impl<F: StopFinder + 'static> SearchDebouncer<F> {
    /// Create a debouncer around a stop finder.
    pub fn new(finder: Arc<F>, quiet_period: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::Idle);
        Self {
            finder,
            quiet_period,
            pending: None,
            issued: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
        }
    }

    /// Subscribe to candidate list updates.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Snapshot of the current candidate list state.
    pub fn current(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Generation of the most recently issued search (0 if none).
    pub fn latest_generation(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// The configured quiet period.
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Whether a timer is waiting to issue a search.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Record a new address value, restarting the quiet period.
    ///
    /// Blank addresses (after trimming) never issue a search.
    pub fn trigger(&mut self, address: impl Into<String>) {
        self.cancel();

        let address = address.into();
        let finder = Arc::clone(&self.finder);
        let issued = Arc::clone(&self.issued);
        let state = Arc::clone(&self.state);
        let quiet_period = self.quiet_period;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;

            if address.trim().is_empty() {
                debug!("address is blank, not searching");
                return;
            }

            // No await past this point, so an abort cannot split issuing
            // the generation from spawning its lookup.
            let generation = issued.fetch_add(1, Ordering::SeqCst) + 1;
            debug!(generation, query = %address, "issuing stop search");

            publish(
                &state,
                &issued,
                generation,
                SearchState::Searching {
                    generation,
                    query: address.clone(),
                },
            );

            tokio::spawn(run_search(finder, state, issued, generation, address));
        }));
    }

    /// Cancel the pending timer, if any. In-flight lookups continue.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<F> Drop for SearchDebouncer<F> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

/// Run one lookup and publish its outcome if it is still the latest.
async fn run_search<F: StopFinder>(
    finder: Arc<F>,
    state: Arc<watch::Sender<SearchState>>,
    issued: Arc<AtomicU64>,
    generation: u64,
    query: String,
) {
    let outcome = finder.find(&query).await;
    let next = match outcome {
        Ok(stops) if stops.is_empty() => SearchState::NoMatches { generation, query },
        Ok(stops) => SearchState::Found {
            generation,
            query,
            stops,
        },
        Err(e) => {
            warn!(generation, query = %query, error = %e, "stop search failed");
            SearchState::Failed {
                generation,
                query,
                error: e.to_string(),
            }
        }
    };

    if !publish(&state, &issued, generation, next) {
        debug!(
            generation,
            latest = issued.load(Ordering::SeqCst),
            "discarding stale search result"
        );
    }
}

/// Replace the published state if `generation` is still the latest issued.
///
/// The check runs under the channel lock, so a result can only land while
/// no newer search has been issued; any newer search publishes after it.
fn publish(
    state: &watch::Sender<SearchState>,
    issued: &AtomicU64,
    generation: u64,
    next: SearchState,
) -> bool {
    state.send_if_modified(|current| {
        if issued.load(Ordering::SeqCst) != generation {
            return false;
        }
        *current = next;
        true
    })
}
