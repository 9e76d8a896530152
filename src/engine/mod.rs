//! Crawl engine: worker-pool dispatch and the pause/stop/restart protocol
//!
//! The engine is a single-owner actor task. It owns the [`Frontier`] and the
//! state machine outright, and both control commands and worker outcomes
//! arrive over one mpsc channel, so every frontier update is one atomic step
//! and no lock is ever held across I/O. Workers are plain spawned tasks that
//! fetch, classify, and report back through the channel; they never share
//! mutable state with each other.
//!
//! State machine:
//!
//! ```text
//! Idle -> Running -> (Pausing -> Paused -> Running)* -> Stopping -> Stopped
//!                 \-> Finished
//! ```
//!
//! `pause` is cooperative (in-flight fetches finish and report), `stop` is
//! best-effort (the frontier is cleared at once, late reports are absorbed).

mod events;
mod frontier;

pub use events::{event_channel, CrawlEvent, EventReceiver, EventSender};
pub use frontier::Frontier;

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::sync::mpsc;
use url::Url;

use crate::crawler::{worker, LinkExtractor, PageFetcher};
use crate::error::EngineError;
use crate::models::TaskOutcome;

/// Lifecycle of one crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No crawl started yet; [`start`] leaves this state immediately
    Idle,
    /// Dispatching and fetching
    Running,
    /// Pause requested; draining in-flight workers
    Pausing,
    /// All workers drained; waiting for restart or stop
    Paused,
    /// Stop requested while workers were in flight; draining
    Stopping,
    /// Stopped by request (terminal)
    Stopped,
    /// Frontier exhausted naturally (terminal)
    Finished,
}

/// Parameters for one crawl
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Seed URL; must be well-formed with scheme `http`
    pub seed: String,
    /// Worker-pool capacity; at least 1
    pub workers: usize,
    /// Maximum distinct URLs to admit, seed included; at least 1
    pub max_pages: usize,
    /// Exact substring to search page bodies for; may be empty
    pub search_text: String,
}

/// Control commands accepted by a running engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Pause,
    Restart,
    Stop,
}

enum EngineMsg {
    Control(Control),
    Outcome(TaskOutcome),
}

/// Handle to a running crawl engine
///
/// Control effects are asynchronous; observe them through the event stream.
/// Dropping the handle does not stop the crawl.
#[derive(Debug)]
pub struct EngineHandle {
    tx: mpsc::UnboundedSender<EngineMsg>,
}

impl EngineHandle {
    /// Request a pause; valid while running
    pub fn pause(&self) {
        let _ = self.tx.send(EngineMsg::Control(Control::Pause));
    }

    /// Resume dispatch from the paused frontier; valid while paused
    pub fn restart(&self) {
        let _ = self.tx.send(EngineMsg::Control(Control::Restart));
    }

    /// Discard all queued work and finish as soon as workers drain
    pub fn stop(&self) {
        let _ = self.tx.send(EngineMsg::Control(Control::Stop));
    }
}

/// Start a crawl and return its control handle
///
/// Validates the seed URL synchronously: it must parse and use the `http`
/// scheme. Worker count and page budget are asserted preconditions, not
/// runtime errors. Must be called from within a tokio runtime.
///
/// # Errors
///
/// Returns [`EngineError::InvalidSeed`] if the seed URL is rejected.
pub fn start(
    options: CrawlOptions,
    fetcher: Arc<dyn PageFetcher>,
    events: EventSender,
) -> Result<EngineHandle, EngineError> {
    assert!(options.workers >= 1, "worker count must be at least 1");
    assert!(options.max_pages >= 1, "page budget must be at least 1");

    let seed = validate_seed(&options.seed)?;

    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut engine = Engine {
        // The seed consumes the first budget unit up front.
        frontier: Frontier::new(options.max_pages - 1),
        state: EngineState::Idle,
        capacity: options.workers,
        active_workers: 0,
        search_text: options.search_text,
        fetcher,
        extractor: Arc::new(LinkExtractor::new()),
        events,
        outcome_tx: tx.clone(),
    };

    tracing::info!(
        seed = %seed,
        workers = engine.capacity,
        max_pages = options.max_pages,
        "starting crawl"
    );

    engine.state = EngineState::Running;
    engine.frontier.admit_seed(&seed);
    engine.emit(CrawlEvent::TaskStarted { url: seed.clone() });
    engine.spawn_worker(seed);

    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if engine.handle(msg).is_break() {
                break;
            }
        }
        tracing::debug!(state = ?engine.state, "engine task exiting");
    });

    Ok(EngineHandle { tx })
}

fn validate_seed(raw: &str) -> Result<String, EngineError> {
    let parsed = Url::parse(raw).map_err(|err| EngineError::InvalidSeed {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    if parsed.scheme() != "http" {
        return Err(EngineError::InvalidSeed {
            url: raw.to_string(),
            reason: format!("unsupported scheme {:?}, only http is crawled", parsed.scheme()),
        });
    }
    Ok(raw.to_string())
}

struct Engine {
    frontier: Frontier,
    state: EngineState,

    /// Worker-pool capacity; at most this many fetches run concurrently
    capacity: usize,

    /// Workers currently in flight
    active_workers: usize,

    search_text: String,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<LinkExtractor>,
    events: EventSender,

    /// Cloned into each worker so outcomes come back through the actor
    outcome_tx: mpsc::UnboundedSender<EngineMsg>,
}

impl Engine {
    fn handle(&mut self, msg: EngineMsg) -> ControlFlow<()> {
        match msg {
            EngineMsg::Control(control) => self.handle_control(control),
            EngineMsg::Outcome(outcome) => self.handle_outcome(outcome),
        }
    }

    fn handle_control(&mut self, control: Control) -> ControlFlow<()> {
        match (control, self.state) {
            (Control::Pause, EngineState::Running) => {
                self.state = EngineState::Pausing;
                tracing::info!("pause requested; draining in-flight workers");
                if self.active_workers == 0 {
                    self.state = EngineState::Paused;
                    self.emit(CrawlEvent::Paused);
                }
                ControlFlow::Continue(())
            }
            (Control::Restart, EngineState::Paused) => {
                self.state = EngineState::Running;
                tracing::info!("restarting from paused frontier");
                self.dispatch();
                if self.active_workers == 0 {
                    // Nothing was left to resume; the crawl is over.
                    return self.finish(EngineState::Finished);
                }
                ControlFlow::Continue(())
            }
            (Control::Stop, state)
                if state != EngineState::Stopped && state != EngineState::Finished =>
            {
                self.frontier.clear();
                if self.active_workers == 0 {
                    // Nothing to drain (paused or never dispatched further).
                    return self.finish(EngineState::Stopped);
                }
                self.state = EngineState::Stopping;
                tracing::info!(
                    active = self.active_workers,
                    "stop requested; absorbing in-flight workers"
                );
                ControlFlow::Continue(())
            }
            (control, state) => {
                debug_assert!(false, "{control:?} is not valid in state {state:?}");
                tracing::warn!(?control, ?state, "ignoring control command in invalid state");
                ControlFlow::Continue(())
            }
        }
    }

    fn handle_outcome(&mut self, outcome: TaskOutcome) -> ControlFlow<()> {
        self.active_workers -= 1;
        let admitted = self
            .frontier
            .complete(&outcome.result.url, &outcome.new_urls);

        tracing::debug!(
            url = %outcome.result.url,
            status = ?outcome.result.status,
            http_code = outcome.result.http_code,
            discovered = outcome.new_urls.len(),
            admitted,
            budget = self.frontier.budget(),
            "task completed"
        );

        self.emit(CrawlEvent::Result(outcome.result));

        match self.state {
            EngineState::Running => {
                self.dispatch();
                if self.active_workers == 0 {
                    return self.finish(EngineState::Finished);
                }
                ControlFlow::Continue(())
            }
            EngineState::Pausing => {
                if self.active_workers == 0 {
                    self.state = EngineState::Paused;
                    self.emit(CrawlEvent::Paused);
                    tracing::info!(ready = self.frontier.has_ready(), "crawl paused");
                }
                ControlFlow::Continue(())
            }
            EngineState::Stopping => {
                if self.active_workers == 0 {
                    return self.finish(EngineState::Stopped);
                }
                ControlFlow::Continue(())
            }
            state => {
                debug_assert!(false, "outcome received in state {state:?}");
                ControlFlow::Continue(())
            }
        }
    }

    /// Fill free worker slots from the current wave
    fn dispatch(&mut self) {
        let slots = self.capacity.saturating_sub(self.active_workers);
        if slots == 0 {
            return;
        }
        for url in self.frontier.next_batch(slots) {
            self.emit(CrawlEvent::TaskStarted { url: url.clone() });
            self.spawn_worker(url);
        }
    }

    fn spawn_worker(&mut self, url: String) {
        self.active_workers += 1;
        let fetcher = Arc::clone(&self.fetcher);
        let extractor = Arc::clone(&self.extractor);
        let search_text = self.search_text.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = worker::process(fetcher.as_ref(), &extractor, &url, &search_text).await;
            // The engine may already be gone after stop; late reports are dropped.
            let _ = tx.send(EngineMsg::Outcome(outcome));
        });
    }

    fn finish(&mut self, terminal: EngineState) -> ControlFlow<()> {
        self.state = terminal;
        self.emit(CrawlEvent::Finished);
        tracing::info!(
            visited = self.frontier.seen_count(),
            state = ?terminal,
            "crawl finished"
        );
        ControlFlow::Break(())
    }

    fn emit(&self, event: CrawlEvent) {
        // Fire and forget: a departed consumer must not wedge the engine.
        let _ = self.events.send(event);
    }
}
