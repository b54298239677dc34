use std::process::ExitCode;

use clap::Parser;
use cmd::{Format, Opts};
use stable_eyre::{eyre::Context, Result};
use supacheck::{
    api::prelude::*,
    check,
    config::{EnvFile, Environment, Layered},
    report::Transcript,
};
use tracing::debug;
use tracing_subscriber::{prelude::*, Layer, Registry};

mod cmd;

fn main() -> Result<ExitCode> {
    stable_eyre::install()?;

    let opts = Opts::parse();
    match opts.format() {
        Format::Text => tracing::subscriber::set_global_default(
            Registry::default().with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_file(false)
                    .with_line_number(false)
                    .with_span_events(opts.fmt_span())
                    .with_filter(opts.level_filter()),
            ),
        ),
        Format::Json => tracing::subscriber::set_global_default(
            Registry::default().with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_span_events(opts.fmt_span())
                    .with_filter(opts.level_filter()),
            ),
        ),
    }
    .wrap_err("set tracing subscriber")?;

    // Values already in the environment win over the settings file.
    let env_file = EnvFile::read(opts.env_file()).wrap_err("load settings")?;
    debug!(path = %env_file.path().display(), "loaded settings file");
    let source = Layered::new().then(Environment).then(env_file);

    let outcome = check::run(&source, &ApiConnectorV1, &mut Transcript::stdio())
        .wrap_err("write report")?;
    debug!(%outcome, "check complete");

    Ok(ExitCode::from(outcome.exit_code()))
}
