use std::path::Path;

use harf_core::settings::LogSettings;

/// Where trace events go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceTarget<'a> {
    /// JSON lines in `<dir>/<log.file>`, written off-thread.
    Directory(&'a Path),
    /// Human-readable lines on stderr.
    Stderr,
}

impl<'a> TraceTarget<'a> {
    /// A directory target if `dir` is given, stderr otherwise.
    pub fn from_dir(dir: Option<&'a Path>) -> Self {
        dir.map_or(TraceTarget::Stderr, TraceTarget::Directory)
    }
}

/// Install the global subscriber once. `RUST_LOG` overrides `log.filter`.
///
/// Returns `false` if tracing is compiled out or was already installed.
#[cfg(feature = "trace")]
pub fn init_tracing(settings: &LogSettings, target: TraceTarget<'_>) -> bool {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();
    let mut installed = false;

    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&settings.filter));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true);

        let result = match target {
            TraceTarget::Directory(dir) => {
                let appender = tracing_appender::rolling::never(dir, &settings.file);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                // keep the writer flushing for the life of the process
                std::mem::forget(guard);
                builder.json().with_writer(writer).try_init()
            }
            TraceTarget::Stderr => builder.compact().with_writer(std::io::stderr).try_init(),
        };
        installed = result.is_ok();
    });
    installed
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_settings: &LogSettings, _target: TraceTarget<'_>) -> bool {
    false
}
