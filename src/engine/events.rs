//! Event stream from the engine to its consumer
//!
//! Events are delivered on an unbounded channel so emitting never blocks the
//! engine; a slow consumer only grows the queue. Delivery is fire-and-forget:
//! send failures (consumer gone) are ignored.

use tokio::sync::mpsc;

use crate::models::SearchResult;

/// Notification emitted by the crawl engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    /// A worker was launched for this URL
    TaskStarted {
        /// The dispatched URL
        url: String,
    },

    /// Terminal result for one attempted URL; exactly one per URL
    Result(SearchResult),

    /// The pause took effect: no worker remains in flight
    Paused,

    /// The crawl is over, naturally or by stop; emitted exactly once
    Finished,
}

/// Sending half of the event stream
pub type EventSender = mpsc::UnboundedSender<CrawlEvent>;

/// Receiving half of the event stream
pub type EventReceiver = mpsc::UnboundedReceiver<CrawlEvent>;

/// Create the event channel connecting an engine to its consumer
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
