//! Logging Setup
//!
//! `tracing-subscriber` with an env filter, written through a non-blocking
//! appender. The session layer of the WhatsApp stack is chatty about
//! decrypt retries and ratchet state; those lines are dropped before they
//! reach the terminal unless filtering is turned off.

use std::io::{self, Write};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, prelude::*};

/// Substrings marking a log line as session noise.
pub const NOISE_PATTERNS: &[&str] = &[
    "Bad MAC",
    "Failed to decrypt message",
    "Session error",
    "Closing open session",
    "Signal",
    "registrationId",
    "currentRatchet",
    "chainKey",
    "messageKeys",
];

/// Library targets capped at `error` regardless of the configured level.
const QUIET_TARGETS: &[&str] = &["whatsapp_rust", "wacore", "wacore_binary", "waproto"];

pub fn is_noise(line: &str) -> bool {
    NOISE_PATTERNS.iter().any(|p| line.contains(p))
}

/// Writer that swallows noise lines and forwards everything else.
pub struct NoiseFilterWriter<W: Write> {
    inner: W,
    enabled: bool,
}

impl<W: Write> Write for NoiseFilterWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.enabled && is_noise(&String::from_utf8_lossy(buf)) {
            // Report the whole buffer as written so the formatter does not retry.
            return Ok(buf.len());
        }
        self.inner.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// `MakeWriter` wrapper producing [`NoiseFilterWriter`]s.
#[derive(Clone)]
pub struct NoiseFilter<M> {
    make_inner: M,
    enabled: bool,
}

impl<M> NoiseFilter<M> {
    pub const fn new(make_inner: M, enabled: bool) -> Self {
        Self {
            make_inner,
            enabled,
        }
    }
}

impl<'a, M> MakeWriter<'a> for NoiseFilter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = NoiseFilterWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        NoiseFilterWriter {
            inner: self.make_inner.make_writer(),
            enabled: self.enabled,
        }
    }
}

/// Filter directives: `RUST_LOG` wins, otherwise `level` plus the quiet library targets.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: &str) -> String {
    let mut directives = level.to_string();
    for target in QUIET_TARGETS {
        directives.push_str(&format!(",{target}=error"));
    }
    directives
}

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the process or buffered lines are lost on exit.
pub fn init(level: &str, json: bool, filter_noise: bool) -> anyhow::Result<WorkerGuard> {
    let (appender, guard) = tracing_appender::non_blocking(io::stdout());
    let writer = NoiseFilter::new(appender, filter_noise);

    let plain = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(writer.clone()));
    let structured = json.then(|| tracing_subscriber::fmt::layer().json().with_writer(writer));

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(plain)
        .with(structured)
        .try_init()?;

    Ok(guard)
}
