//! Frontier and shared crawl state
//!
//! The frontier owns the URL sets and the admission budget. It is reached
//! only from the engine actor task, so every update is a single atomic step
//! from the workers' point of view.
//!
//! Set roles:
//! - `seen` is the dedup authority: a URL enters it the instant it is
//!   admitted and never leaves, so no URL is ever dispatched twice.
//! - `in_flight` holds URLs currently assigned to a worker.
//! - `pending` holds admitted URLs waiting for the next wave.
//! - `active` is the wave currently being drained by dispatch.
//!
//! Dispatch is wave-batched: `pending` is promoted into `active` only once
//! both `active` and `in_flight` have drained, rather than streaming every
//! discovery straight into dispatch.

use std::collections::HashSet;

/// Shared crawl state: URL sets plus remaining admission budget
#[derive(Debug, Default)]
pub struct Frontier {
    /// Every URL ever admitted; never shrinks during a crawl
    seen: HashSet<String>,

    /// URLs currently assigned to a worker
    in_flight: HashSet<String>,

    /// Admitted URLs waiting for the next dispatch wave
    pending: HashSet<String>,

    /// The wave currently being drained
    active: HashSet<String>,

    /// Remaining admissions; decremented once per accepted URL
    budget: usize,
}

impl Frontier {
    /// Create a frontier with the given admission budget
    ///
    /// The budget counts URLs admitted *after* the seed; callers admit the
    /// seed through [`Frontier::admit_seed`], which does not consume budget.
    pub fn new(budget: usize) -> Self {
        Self {
            budget,
            ..Self::default()
        }
    }

    /// Admit the seed URL directly into `seen` and `in_flight`
    pub fn admit_seed(&mut self, url: &str) {
        self.seen.insert(url.to_string());
        self.in_flight.insert(url.to_string());
    }

    /// Apply one completed task: retire the source URL and admit discoveries
    ///
    /// Each discovered URL is accepted iff it has never been seen and budget
    /// remains; acceptance decrements the budget. When this completion drains
    /// the current wave (`active` and `in_flight` both empty), `pending` is
    /// promoted into `active`. Returns the number of URLs admitted.
    pub fn complete(&mut self, source_url: &str, discovered: &HashSet<String>) -> usize {
        self.in_flight.remove(source_url);

        let mut admitted = 0;
        for url in discovered {
            if self.budget == 0 {
                break;
            }
            if self.seen.contains(url) {
                continue;
            }
            self.seen.insert(url.clone());
            self.pending.insert(url.clone());
            self.budget -= 1;
            admitted += 1;
        }

        if self.in_flight.is_empty() && self.active.is_empty() {
            self.active = std::mem::take(&mut self.pending);
        }

        admitted
    }

    /// Move up to `limit` URLs from the active wave into `in_flight`
    ///
    /// Selection order within the wave is unspecified (set semantics).
    pub fn next_batch(&mut self, limit: usize) -> Vec<String> {
        let mut batch = Vec::new();
        while batch.len() < limit {
            let Some(url) = self.active.iter().next().cloned() else {
                break;
            };
            self.active.remove(&url);
            self.in_flight.insert(url.clone());
            batch.push(url);
        }
        batch
    }

    /// Whether any URL is ready for dispatch in the current wave
    pub fn has_ready(&self) -> bool {
        !self.active.is_empty()
    }

    /// Discard all state and zero the budget (stop semantics)
    ///
    /// Late worker reports against a cleared frontier are absorbed: their
    /// source URL is no longer tracked and no discovery can be admitted.
    pub fn clear(&mut self) {
        self.seen.clear();
        self.in_flight.clear();
        self.pending.clear();
        self.active.clear();
        self.budget = 0;
    }

    /// Remaining admission budget
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Total number of URLs ever admitted (seed included)
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    #[cfg(test)]
    fn holds_invariants(&self) -> bool {
        let disjoint = self.in_flight.is_disjoint(&self.pending)
            && self.in_flight.is_disjoint(&self.active)
            && self.pending.is_disjoint(&self.active);
        let covered = self
            .in_flight
            .iter()
            .chain(&self.pending)
            .chain(&self.active)
            .all(|url| self.seen.contains(url));
        disjoint && covered
    }
}
