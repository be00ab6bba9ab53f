//! Live-typing conversion session with debounced, last-request-wins lookups.
//!
//! `LiveSession` owns the latest input snapshot and a generation counter.
//! It never performs I/O itself: edits schedule a debounce timer through the
//! injected [`Scheduler`], a fired timer yields a [`LookupRequest`] for the
//! host to run, and the host hands the lookup result back tagged with its
//! generation. Results for superseded snapshots are dropped.

mod generation;
mod scheduler;
mod types;

#[cfg(test)]
mod tests;

use std::time::Duration;

use harf_core::converter::{resolve, ConversionResult};
use harf_core::dict::{DictionaryMapping, LookupError};
use harf_core::settings::SessionSettings;
use harf_core::tokenizer::{distinct_keys, tokenize, Token};
use tracing::{debug, warn};

pub use generation::Generation;
pub use scheduler::{ManualScheduler, Scheduler, TimerId};
pub use types::{DebounceOutcome, LookupRequest, Rendered};

pub struct LiveSession<S: Scheduler> {
    scheduler: S,
    generation: Generation,
    debounce: Duration,

    // Latest snapshot
    text: String,
    tokens: Vec<Token>,

    pending_timer: Option<TimerId>,
    /// Generation of the lookup currently in flight, if any.
    in_flight: Option<u64>,
    rendered: Option<Rendered>,
}

impl<S: Scheduler> LiveSession<S> {
    pub fn new(scheduler: S, debounce: Duration) -> Self {
        Self {
            scheduler,
            generation: Generation::new(),
            debounce,
            text: String::new(),
            tokens: Vec::new(),
            pending_timer: None,
            in_flight: None,
            rendered: None,
        }
    }

    pub fn from_settings(scheduler: S, settings: &SessionSettings) -> Self {
        Self::new(scheduler, settings.debounce())
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Shared handle to the generation counter.
    pub fn generation(&self) -> Generation {
        self.generation.clone()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Last output applied for a current snapshot.
    pub fn rendered(&self) -> Option<&Rendered> {
        self.rendered.as_ref()
    }

    pub fn is_waiting(&self) -> bool {
        self.pending_timer.is_some() || self.in_flight.is_some()
    }

    /// Replace the input snapshot and restart the debounce window.
    ///
    /// Returns the generation assigned to the new snapshot. Any timer or
    /// lookup issued for an earlier snapshot becomes stale.
    pub fn edit(&mut self, text: impl Into<String>) -> u64 {
        self.text = text.into();
        self.tokens = tokenize(&self.text);
        let gen = self.generation.advance();

        if let Some(id) = self.pending_timer.take() {
            self.scheduler.cancel(id);
        }
        self.in_flight = None;
        self.pending_timer = Some(self.scheduler.schedule(self.debounce, gen));
        gen
    }

    /// Invalidate everything outstanding without a new snapshot.
    pub fn cancel(&mut self) {
        if let Some(id) = self.pending_timer.take() {
            self.scheduler.cancel(id);
        }
        self.in_flight = None;
        self.generation.advance();
    }

    /// Called by the host when a debounce timer fires.
    ///
    /// Only the first firing for the current generation counts; repeats
    /// (e.g. a timer that fired after cancellation) are `Stale`.
    pub fn on_timer(&mut self, generation: u64) -> DebounceOutcome {
        if !self.generation.is_current(generation) {
            debug!(generation, current = self.generation.current(), "stale debounce timer");
            return DebounceOutcome::Stale;
        }
        if self.pending_timer.take().is_none() {
            debug!(generation, "debounce timer already handled");
            return DebounceOutcome::Stale;
        }

        let words = distinct_keys(&self.tokens);
        if words.is_empty() {
            let result = resolve(&self.tokens, &DictionaryMapping::new());
            return DebounceOutcome::Rendered(self.store(generation, result));
        }

        self.in_flight = Some(generation);
        DebounceOutcome::Lookup(LookupRequest { generation, words })
    }

    /// Apply a lookup result. Returns `None` if `generation` is stale.
    ///
    /// A failed lookup renders every word with the fallback.
    pub fn on_lookup(
        &mut self,
        generation: u64,
        result: Result<DictionaryMapping, LookupError>,
    ) -> Option<Rendered> {
        if !self.generation.is_current(generation) || self.in_flight != Some(generation) {
            debug!(generation, current = self.generation.current(), "dropping stale lookup result");
            return None;
        }
        self.in_flight = None;

        let conversion = match result {
            Ok(mapping) => resolve(&self.tokens, &mapping),
            Err(e) => {
                warn!(error = %e, generation, "dictionary lookup failed; using fallback");
                let mut c = resolve(&self.tokens, &DictionaryMapping::new());
                c.degraded = true;
                c
            }
        };
        Some(self.store(generation, conversion))
    }

    /// Synchronous fallback-only rendering of the latest snapshot.
    ///
    /// Useful as interim display while a lookup is pending; never stored as
    /// the session's rendered output.
    pub fn preview(&self) -> String {
        resolve(&self.tokens, &DictionaryMapping::new()).text()
    }

    fn store(&mut self, generation: u64, result: ConversionResult) -> Rendered {
        let rendered = Rendered {
            generation,
            input: self.text.clone(),
            result,
        };
        self.rendered = Some(rendered.clone());
        rendered
    }
}
