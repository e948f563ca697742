//! Log sink for mock test runs.
//!
//! The tester never touches the global subscriber; callers hand it a
//! [`Dispatch`] built here (or any other).

use std::fmt::{self, Write as _};
use std::io;

use chrono::Local;
use tracing::{Dispatch, Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::registry::LookupSpan;

/// Timestamp format of each log line, millisecond precision.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Tag placed between the timestamp and the message.
pub const LOG_TAG: &str = "[MOCK]";

/// Formats events as `<timestamp> - [MOCK] - <message>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockFormat;

impl<S, N> FormatEvent<S, N> for MockFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "{} - {LOG_TAG} - ",
            Local::now().format(LOG_TIMESTAMP_FORMAT)
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// INFO-level mock log sink writing to `make_writer`.
pub fn mock_dispatch<W>(make_writer: W) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_writer(make_writer)
        .event_format(MockFormat)
        .finish();
    Dispatch::new(subscriber)
}

/// Mock log sink on stderr.
pub fn stderr_dispatch() -> Dispatch {
    mock_dispatch(io::stderr)
}
