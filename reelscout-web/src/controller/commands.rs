//! Messages accepted by the search controller actor.

use reelscout_search::{FetchError, Movie};
use reelscout_trending::{AnalyticsError, TrendingEntry};
use tokio::sync::oneshot;

/// Commands that can be sent to the search controller actor.
#[derive(Debug)]
pub enum ControllerCommand {
    /// Raw input changed.
    SetSearchTerm {
        /// Current contents of the search field
        raw: String,
    },
    /// Re-read the trending list from the analytics store.
    RefreshTrending,
    /// Stop the actor, dropping any pending commit.
    Shutdown {
        /// Signalled once the actor has stopped
        responder: oneshot::Sender<()>,
    },
}

/// Completions reported by tasks the actor spawned.
#[derive(Debug)]
pub(crate) enum ControllerEvent {
    FetchSettled {
        generation: u64,
        term: String,
        outcome: Result<Vec<Movie>, FetchError>,
    },
    TrendingLoaded {
        outcome: Result<Vec<TrendingEntry>, AnalyticsError>,
    },
}
