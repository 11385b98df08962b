//! Process-wide `tracing` setup for the scraper service.
//!
//! Everything is driven by environment variables:
//!
//! - `LOG_LEVEL`: default filter when `RUST_LOG` is unset (default `info`)
//! - `LOG_FORMAT`: `human` (pretty) or `json`
//! - `LOG_OUTPUT`: `console`, `file` or `both`
//! - `LOG_FILE_PATH`: base path of the daily rolling log file

use std::{
    env,
    ffi::OsString,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::Directive, fmt::MakeWriter, prelude::*, registry, EnvFilter,
};

const DEFAULT_LOG_FILE: &str = "/tmp/aptoide-scraper.log";

// Writes every line to both sinks, e.g. stdout and the rolling file.
struct Tee<A, B> {
    a: A,
    b: B,
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let res_a = self.a.write(buf);
        let res_b = self.b.write(buf);
        res_a.or(res_b)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.a.flush()?;
        self.b.flush()
    }
}

#[derive(Clone)]
struct MakeTee<A, B> {
    make_a: A,
    make_b: B,
}

impl<'a, A, B> MakeWriter<'a> for MakeTee<A, B>
where
    A: MakeWriter<'a>,
    B: MakeWriter<'a>,
{
    type Writer = Tee<A::Writer, B::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        Tee {
            a: self.make_a.make_writer(),
            b: self.make_b.make_writer(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Console,
    File,
    Both,
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
    pub output: LogOutput,
    pub file_path: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Unknown values fall back
    /// to the defaults instead of failing.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = lookup("LOG_LEVEL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());

        let format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Human,
        };

        let output = match lookup("LOG_OUTPUT").as_deref().map(str::trim) {
            Some(o) if o.eq_ignore_ascii_case("file") => LogOutput::File,
            Some(o) if o.eq_ignore_ascii_case("both") => LogOutput::Both,
            _ => LogOutput::Console,
        };

        let file_path = lookup("LOG_FILE_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Self {
            level,
            format,
            output,
            file_path,
        }
    }

    /// Directory and file name prefix handed to the rolling appender.
    pub fn file_parts(&self) -> (PathBuf, OsString) {
        let dir = self
            .file_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        let name = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("aptoide-scraper.log"));
        (dir, name)
    }

    fn env_filter(&self) -> EnvFilter {
        let mut filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        for quiet in ["hyper=warn", "hyper_util=warn", "tokio=warn"] {
            if let Ok(directive) = quiet.parse::<Directive>() {
                filter = filter.add_directive(directive);
            }
        }
        filter
    }
}

fn install<W>(filter: EnvFilter, writer: W, format: LogFormat)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let subscriber = registry().with(filter);
    let layer = tracing_subscriber::fmt::layer().with_writer(writer);
    match format {
        LogFormat::Json => subscriber.with(layer.json()).init(),
        LogFormat::Human => subscriber.with(layer.pretty()).init(),
    }
}

/// Installs the global subscriber. The returned guard must be held for the
/// lifetime of the process when file output is enabled, otherwise buffered
/// lines are lost.
pub fn init_subscriber(settings: &LogSettings) -> Option<WorkerGuard> {
    let filter = settings.env_filter();

    match settings.output {
        LogOutput::Console => {
            install(filter, io::stdout, settings.format);
            None
        }
        LogOutput::File => {
            let (dir, name) = settings.file_parts();
            let appender = tracing_appender::rolling::daily(dir, name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            install(filter, non_blocking, settings.format);
            Some(guard)
        }
        LogOutput::Both => {
            let (dir, name) = settings.file_parts();
            let appender = tracing_appender::rolling::daily(dir, name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let tee = MakeTee {
                make_a: io::stdout,
                make_b: non_blocking,
            };
            install(filter, tee, settings.format);
            Some(guard)
        }
    }
}

/// Shorthand for `init_subscriber(&LogSettings::from_env())`.
pub fn init_from_env() -> Option<WorkerGuard> {
    init_subscriber(&LogSettings::from_env())
}
