use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use harf_core::converter::{convert, ConversionResult, Source};
use harf_core::dict::DictionaryClient;
use harf_core::fallback::{harmony_class, HarmonyClass};
use harf_core::settings::Settings;
use harf_core::store::WordStore;
use harf_core::tokenizer::{tokenize, TokenKind};
use harf_engine::async_worker::LookupWorker;

use super::CliError;

/// Where the CLI gets its dictionary from.
#[derive(Debug, Default, Clone, Copy)]
pub struct DictionarySource<'a> {
    /// Binary word store (`harftool dict` format).
    pub store: Option<&'a Path>,
    /// JSON object `{ word: script }`; takes precedence over `store`.
    pub json: Option<&'a Path>,
}

pub fn load_dictionary(
    source: DictionarySource<'_>,
    settings: &Settings,
) -> Result<Arc<dyn DictionaryClient>, CliError> {
    if let Some(json) = source.json {
        let store = WordStore::from_json_map(&fs::read_to_string(json)?)?;
        return Ok(Arc::new(store));
    }
    Ok(harf_engine::open_dictionary(&settings.lookup, source.store)?)
}

pub fn convert_text(text: &str, client: &dyn DictionaryClient) -> ConversionResult {
    convert(text, client)
}

/// One line of `harftool explain` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplainRow {
    pub input: String,
    pub kind: TokenKind,
    pub source: Source,
    pub harmony: Option<HarmonyClass>,
    pub output: String,
}

pub fn explain(text: &str, client: &dyn DictionaryClient) -> (Vec<ExplainRow>, bool) {
    let tokens = tokenize(text);
    let result = convert(text, client);
    let rows = tokens
        .into_iter()
        .zip(result.segments)
        .map(|(token, seg)| ExplainRow {
            harmony: (token.kind == TokenKind::Word).then(|| harmony_class(&token.text)),
            input: token.text,
            kind: token.kind,
            source: seg.source,
            output: seg.output,
        })
        .collect();
    (rows, result.degraded)
}

fn source_label(source: Source) -> &'static str {
    match source {
        Source::DictionaryHit => "dict",
        Source::Fallback => "fallback",
        Source::Passthrough => "pass",
    }
}

fn harmony_label(h: Option<HarmonyClass>) -> &'static str {
    match h {
        Some(HarmonyClass::Back) => "back",
        Some(HarmonyClass::Front) => "front",
        None => "-",
    }
}

/// Render explain rows as an aligned text table. Whitespace tokens are
/// shown escaped.
pub fn format_explain(rows: &[ExplainRow]) -> String {
    let shown: Vec<String> = rows
        .iter()
        .map(|r| format!("{:?}", r.input).trim_matches('"').to_string())
        .collect();
    let width = shown.iter().map(|s| s.width()).max().unwrap_or(0);

    let mut out = String::new();
    for (row, input) in rows.iter().zip(&shown) {
        let pad = " ".repeat(width - input.width());
        out.push_str(&format!(
            "{input}{pad}  {:<8}  {:<5}  {}\n",
            source_label(row.source),
            harmony_label(row.harmony),
            row.output
        ));
    }
    out
}

const LIVE_POLL: Duration = Duration::from_millis(10);

/// Feed each input line to a background worker as a new snapshot of the
/// text, printing whichever conversions are current when they arrive.
///
/// Lines are read on their own thread so results print during pauses in
/// the input. Lines that arrive within the debounce window of each other
/// collapse into a single lookup. The final snapshot's output is always
/// printed.
pub fn live<I>(
    client: Arc<dyn DictionaryClient>,
    settings: &Settings,
    lines: I,
    mut out: impl Write,
) -> Result<(), CliError>
where
    I: IntoIterator<Item = io::Result<String>>,
    I::IntoIter: Send + 'static,
{
    let worker = LookupWorker::new(client, settings.session.debounce())?;
    let (line_tx, line_rx) = mpsc::channel::<io::Result<String>>();
    let lines = lines.into_iter();
    thread::Builder::new()
        .name("harf-live-input".into())
        .spawn(move || {
            for line in lines {
                if line_tx.send(line).is_err() {
                    break;
                }
            }
        })?;

    let mut submitted = false;
    let mut printed: Option<u64> = None;

    loop {
        match line_rx.recv_timeout(LIVE_POLL) {
            Ok(line) => {
                worker.submit(line?);
                submitted = true;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        while let Some(done) = worker.try_recv() {
            writeln!(out, "{}", done.output())?;
            printed = Some(done.generation);
        }
    }

    if submitted && printed != Some(worker.generation()) {
        let wait = settings.session.debounce() + settings.lookup.timeout() + Duration::from_secs(1);
        match worker.recv_timeout(wait) {
            Some(done) => writeln!(out, "{}", done.output())?,
            None => {
                return Err(CliError::Io(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "no conversion result",
                )))
            }
        }
    }
    Ok(())
}
