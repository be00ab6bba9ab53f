use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use harf_core::converter::{convert, ConversionResult};
use harf_core::dict::DictionaryClient;
use harf_session::Generation;
use tracing::debug;

// ---------------------------------------------------------------------------
// Work / Result types
// ---------------------------------------------------------------------------

struct ConversionWork {
    text: String,
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct ConversionOutput {
    pub generation: u64,
    pub input: String,
    pub result: ConversionResult,
}

impl ConversionOutput {
    pub fn output(&self) -> String {
        self.result.text()
    }
}

// ---------------------------------------------------------------------------
// LookupWorker
// ---------------------------------------------------------------------------

/// Background conversion thread for hosts with real threads.
///
/// Submissions are debounced, converted with one batch lookup each, and
/// tagged with a generation. Anything superseded by a later `submit` is
/// dropped before, after, and on receipt of the lookup.
pub struct LookupWorker {
    work_tx: mpsc::Sender<ConversionWork>,
    result_rx: Mutex<mpsc::Receiver<ConversionOutput>>,
    generation: Generation,
}

impl LookupWorker {
    pub fn new(client: Arc<dyn DictionaryClient>, debounce: Duration) -> io::Result<Self> {
        let generation = Generation::new();
        let (work_tx, work_rx) = mpsc::channel::<ConversionWork>();
        let (result_tx, result_rx) = mpsc::channel::<ConversionOutput>();
        {
            let gen = generation.clone();
            thread::Builder::new()
                .name("harf-lookup".into())
                .spawn(move || conversion_worker(work_rx, result_tx, gen, client, debounce))?;
        }

        Ok(Self {
            work_tx,
            result_rx: Mutex::new(result_rx),
            generation,
        })
    }

    /// Queue a new input snapshot. Returns its generation.
    pub fn submit(&self, text: impl Into<String>) -> u64 {
        let gen = self.generation.advance();
        let _ = self.work_tx.send(ConversionWork {
            text: text.into(),
            generation: gen,
        });
        gen
    }

    pub fn invalidate(&self) {
        self.generation.advance();
    }

    pub fn generation(&self) -> u64 {
        self.generation.current()
    }

    /// Take the latest finished conversion, if any. Stale outputs are skipped.
    pub fn try_recv(&self) -> Option<ConversionOutput> {
        let rx = self.result_rx.lock().ok()?;
        while let Ok(out) = rx.try_recv() {
            if self.generation.is_current(out.generation) {
                return Some(out);
            }
        }
        None
    }

    /// Block up to `timeout` for a current conversion.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ConversionOutput> {
        let deadline = Instant::now() + timeout;
        let rx = self.result_rx.lock().ok()?;
        loop {
            let remaining = deadline.checked_duration_since(Instant::now())?;
            match rx.recv_timeout(remaining) {
                Ok(out) if self.generation.is_current(out.generation) => return Some(out),
                Ok(_) => continue,
                Err(_) => return None,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Worker thread
// ---------------------------------------------------------------------------

fn conversion_worker(
    rx: mpsc::Receiver<ConversionWork>,
    tx: mpsc::Sender<ConversionOutput>,
    gen: Generation,
    client: Arc<dyn DictionaryClient>,
    debounce: Duration,
) {
    while let Ok(work) = rx.recv() {
        // Debounce: every newer submission restarts the quiet period
        let mut latest = work;
        loop {
            match rx.recv_timeout(debounce) {
                Ok(newer) => latest = newer,
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }

        // Check staleness before doing work
        if !gen.is_current(latest.generation) {
            debug!(generation = latest.generation, "skipping stale submission");
            continue;
        }

        let result = convert(&latest.text, client.as_ref());

        // Check staleness after the lookup
        if !gen.is_current(latest.generation) {
            debug!(generation = latest.generation, "dropping stale conversion");
            continue;
        }

        let _ = tx.send(ConversionOutput {
            generation: latest.generation,
            input: latest.text,
            result,
        });
    }
}
