use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use getset::{CopyGetters, Getters};
use strum::Display;
use supacheck::config::DEFAULT_ENV_FILE;
use tracing::metadata::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;

/// Check that a Supabase project is reachable with the configured URL and API key.
///
/// The URL and key are read from `SUPABASE_URL` and `SUPABASE_KEY`,
/// either in the environment or in a `.env` settings file.
/// Values already present in the environment take precedence over the file.
#[derive(Debug, Parser, Getters, CopyGetters)]
#[clap(version)]
pub struct Opts {
    /// The settings file to read `SUPABASE_URL` and `SUPABASE_KEY` from.
    ///
    /// It is not an error for this file to be missing,
    /// as long as the values are present in the environment.
    #[clap(long, default_value = DEFAULT_ENV_FILE)]
    #[getset(get = "pub")]
    env_file: PathBuf,

    /// Enable span traces alongside log lines.
    ///
    /// Generally spans correlate to functions; in other words when a function is entered a span is also entered.
    #[clap(long, default_value_t = Span::None)]
    #[getset(get_copy = "pub")]
    trace_spans: Span,

    /// Set the minimum level for log lines.
    ///
    /// Log lines are written to stderr, interleaved with the check's own report.
    #[clap(long, default_value_t = Level::Off)]
    #[getset(get_copy = "pub")]
    trace_level: Level,

    /// The formatter to use for trace data.
    #[clap(short, long, default_value_t = Format::Text)]
    #[getset(get_copy = "pub")]
    format: Format,
}

impl Opts {
    pub fn level_filter(&self) -> LevelFilter {
        self.trace_level.into()
    }

    pub fn fmt_span(&self) -> FmtSpan {
        self.trace_spans.into()
    }
}

/// The log formatting to use.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Display)]
pub enum Format {
    /// Output text formatted logs and traces for humans.
    #[strum(serialize = "text")]
    Text,

    /// Output JSON formatted logs and traces for machines.
    #[strum(serialize = "json")]
    Json,
}

/// The minimum level to output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Display)]
pub enum Level {
    /// Emit no log lines (this is the default).
    #[strum(serialize = "off")]
    Off,

    /// Emit events that are this level or higher.
    #[strum(serialize = "error")]
    Error,

    /// Emit events that are this level or higher.
    #[strum(serialize = "warn")]
    Warn,

    /// Emit events that are this level or higher.
    #[strum(serialize = "info")]
    Info,

    /// Emit events that are this level or higher.
    #[strum(serialize = "debug")]
    Debug,

    /// Emit events that are this level or higher.
    #[strum(serialize = "trace")]
    Trace,
}

impl From<Level> for LevelFilter {
    fn from(value: Level) -> Self {
        match value {
            Level::Off => LevelFilter::OFF,
            Level::Error => LevelFilter::ERROR,
            Level::Info => LevelFilter::INFO,
            Level::Warn => LevelFilter::WARN,
            Level::Debug => LevelFilter::DEBUG,
            Level::Trace => LevelFilter::TRACE,
        }
    }
}

/// Which parts of span traces to output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Display)]
pub enum Span {
    /// one event when span is created
    #[strum(serialize = "new")]
    New,

    /// one event per enter of a span
    #[strum(serialize = "enter")]
    Enter,

    /// one event per exit of a span
    #[strum(serialize = "exit")]
    Exit,

    /// one event when the span is dropped
    #[strum(serialize = "close")]
    Close,

    /// spans are ignored (this is the default)
    #[strum(serialize = "none")]
    None,

    /// one event per enter/exit of a span
    #[strum(serialize = "active")]
    Active,

    /// events at all points (new, enter, exit, drop)
    #[strum(serialize = "full")]
    Full,
}

impl From<Span> for FmtSpan {
    fn from(val: Span) -> Self {
        match val {
            Span::New => FmtSpan::NEW,
            Span::Enter => FmtSpan::ENTER,
            Span::Exit => FmtSpan::EXIT,
            Span::Close => FmtSpan::CLOSE,
            Span::None => FmtSpan::NONE,
            Span::Active => FmtSpan::ACTIVE,
            Span::Full => FmtSpan::FULL,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Opts::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let opts = Opts::parse_from(["supacheck"]);
        assert_eq!(opts.env_file(), &PathBuf::from(".env"));
        assert_eq!(opts.trace_level(), Level::Off);
        assert_eq!(opts.trace_spans(), Span::None);
        assert_eq!(opts.format(), Format::Text);
        assert_eq!(opts.level_filter(), LevelFilter::OFF);
    }

    #[test]
    fn custom_env_file() {
        let opts = Opts::parse_from(["supacheck", "--env-file", "config/staging.env"]);
        assert_eq!(opts.env_file(), &PathBuf::from("config/staging.env"));
    }
}
