
use std::time::Duration;

use harf_core::dict::DictionaryMapping;

use super::{DebounceOutcome, LiveSession, LookupRequest, ManualScheduler};

pub(super) const DEBOUNCE: Duration = Duration::from_millis(250);

pub(super) fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

pub(super) fn make_session() -> LiveSession<ManualScheduler> {
    LiveSession::new(ManualScheduler::new(), DEBOUNCE)
}

pub(super) fn test_mapping() -> DictionaryMapping {
    [("kitap", "كتاب"), ("mektup", "مكتوب")].into_iter().collect()
}

/// Answer a lookup request from `mapping`, the way a dictionary service would.
pub(super) fn answer(req: &LookupRequest, mapping: &DictionaryMapping) -> DictionaryMapping {
    req.words
        .iter()
        .filter_map(|w| mapping.get(w).map(|s| (w.clone(), s.to_string())))
        .collect()
}

/// Advance the clock and feed every fired timer back into the session.
pub(super) fn tick(session: &mut LiveSession<ManualScheduler>, by: Duration) -> Vec<DebounceOutcome> {
    let fired = session.scheduler_mut().advance(by);
    fired.into_iter().map(|g| session.on_timer(g)).collect()
}

/// Expect exactly one lookup request among the outcomes.
pub(super) fn single_lookup(outcomes: Vec<DebounceOutcome>) -> LookupRequest {
    let mut lookups: Vec<LookupRequest> = outcomes
        .into_iter()
        .filter_map(|o| match o {
            DebounceOutcome::Lookup(req) => Some(req),
            _ => None,
        })
        .collect();
    assert_eq!(lookups.len(), 1, "expected exactly one lookup");
    lookups.remove(0)
}
