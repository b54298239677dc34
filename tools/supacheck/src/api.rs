//! Communicates with the Supabase backend.

use std::time::Duration;

use ureq::{Agent, AgentBuilder};

use crate::config::ConfigPair;

pub mod types;
pub mod v1;

/// Constructs clients bound to an endpoint and credential.
///
/// Connecting only prepares the client; no network traffic happens until
/// the client is used.
pub trait Connector {
    /// The client produced by this connector.
    type Client: Client;

    /// Create a client for the given configuration.
    fn connect(&self, config: &ConfigPair) -> Result<Self::Client, types::Error>;
}

/// Describes a client for the Supabase service.
pub trait Client {
    /// Look up the current session.
    ///
    /// Succeeds whenever the service answers, even if no user is signed in.
    fn session(&self) -> Result<types::Session, types::Error>;
}

/// Provides types commonly used in the API module.
///
/// Many types are prefixed with `Api` when imported via the prelude to reduce collision
/// and to improve readability.
///
/// ```no_run
/// use supacheck::api::prelude::*;
/// ```
pub mod prelude {
    pub use crate::url::BaseUrl;

    pub use super::v1::Client as ApiClientV1;
    pub use super::v1::Connector as ApiConnectorV1;
    pub use super::Client as ApiClient;
    pub use super::Connector as ApiConnector;

    pub use super::types::Error as ApiError;
    pub use super::types::Session as ApiSession;
    pub use super::types::TransportError as ApiTransportError;
    pub use super::types::TransportErrorKind as ApiTransportErrorKind;
}

fn build_default_agent() -> Agent {
    let app_name = env!("CARGO_PKG_NAME");
    let app_version = env!("CARGO_PKG_VERSION");
    AgentBuilder::new()
        .user_agent(&format!("{app_name}/{app_version}"))
        // Not based on anything specific but seems reasonable.
        .timeout(Duration::from_secs(30))
        .build()
}
