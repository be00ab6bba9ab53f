use harf_core::converter::ConversionResult;

/// Batch lookup the host must perform for a debounced snapshot.
///
/// The result goes back through `LiveSession::on_lookup` together with
/// `generation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub generation: u64,
    /// Distinct case-folded words, first-seen order.
    pub words: Vec<String>,
}

/// Converted output for one input snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub generation: u64,
    pub input: String,
    pub result: ConversionResult,
}

impl Rendered {
    pub fn output(&self) -> String {
        self.result.text()
    }
}

/// What the host should do after a debounce timer fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceOutcome {
    /// The timer belongs to a superseded edit.
    Stale,
    /// Issue this lookup.
    Lookup(LookupRequest),
    /// Nothing to look up (no words); output is ready.
    Rendered(Rendered),
}
