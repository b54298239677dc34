//! Runs the connectivity check.

use std::io::{self, Write};

use tracing::{info, warn};

use crate::{
    api::{types::Error, Client, Connector},
    config::{ConfigPair, Source},
    report::Transcript,
};

/// How a check ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// The service answered the session lookup.
    Passed,

    /// The endpoint or credential was not configured; nothing was contacted.
    MissingConfig,

    /// Building the client or the session lookup failed.
    Failed,
}

impl Outcome {
    /// Whether the check passed.
    pub fn is_success(self) -> bool {
        self == Self::Passed
    }

    /// The process exit status for this outcome.
    pub fn exit_code(self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Check that the service configured in `source` is reachable,
/// writing the transcript as the check progresses.
///
/// Each call builds its own client; nothing carries over between runs.
///
/// The only errors returned are failures to write the transcript.
/// Configuration and connectivity problems are reported in the transcript
/// and reflected in the returned [`Outcome`].
#[tracing::instrument(skip_all)]
pub fn run<C, O, E>(
    source: &impl Source,
    connector: &C,
    transcript: &mut Transcript<O, E>,
) -> io::Result<Outcome>
where
    C: Connector,
    O: Write,
    E: Write,
{
    transcript.banner()?;

    let config = match ConfigPair::load(source) {
        Ok(config) => config,
        Err(err) => {
            warn!(missing = ?err.missing(), "configuration incomplete");
            transcript.missing_config()?;
            return Ok(Outcome::MissingConfig);
        }
    };

    transcript.connecting(config.endpoint())?;
    match probe(connector, &config, transcript) {
        Ok(Ok(())) => {
            transcript.passed()?;
            info!("check passed");
            Ok(Outcome::Passed)
        }
        Ok(Err(err)) => {
            warn!(%err, "check failed");
            transcript.failed(&err)?;
            Ok(Outcome::Failed)
        }
        Err(err) => Err(err),
    }
}

/// Connect and look up the session, narrating each step.
///
/// The outer result carries transcript write failures, the inner one the check itself.
fn probe<C, O, E>(
    connector: &C,
    config: &ConfigPair,
    transcript: &mut Transcript<O, E>,
) -> io::Result<Result<(), Error>>
where
    C: Connector,
    O: Write,
    E: Write,
{
    let client = match connector.connect(config) {
        Ok(client) => client,
        Err(err) => return Ok(Err(err)),
    };
    transcript.client_created()?;

    transcript.probing()?;
    match client.session() {
        Ok(session) => {
            info!(%session, "service answered session lookup");
            transcript.reachable()?;
            Ok(Ok(()))
        }
        Err(err) => Ok(Err(err)),
    }
}
