//! Global tracing subscriber: console output plus the log file.
use std::path::Path;

use super::file::FileLayer;
use super::render::{EventFields, Style, render};

/// Writes events to the console in the installer's line format.
#[derive(Debug)]
struct ConsoleFormat {
    style: Style,
}

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormat
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let fields = EventFields::of(event);
        let level = *event.metadata().level();
        let line = render(fields.kind, level, &fields.message, self.style);
        writeln!(writer, "{line}")
    }
}

/// Install the global subscriber for a run of `command`.
///
/// The console shows info and above (debug with `verbose`), warnings and
/// errors on stderr.  When `log_file` is given, every event down to debug is
/// also written there.  Call once at startup.
pub fn init_subscriber(verbose: bool, command: &str, log_file: Option<&Path>) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));
    let console = fmt::layer()
        .event_format(ConsoleFormat {
            style: Style::Color,
        })
        .with_writer(writer)
        .with_filter(console_level);

    let (file, file_error) = match log_file.map(|path| (path, FileLayer::create(path, command))) {
        Some((_, Ok(layer))) => (Some(layer.with_filter(LevelFilter::DEBUG)), None),
        Some((path, Err(e))) => (None, Some(format!("{}: {e}", path.display()))),
        None => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).init();

    if let Some(err) = file_error {
        tracing::debug!("no log file: {err}");
    }
}
