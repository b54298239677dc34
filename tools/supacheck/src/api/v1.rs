//! Communicates with v1 of the Supabase auth API.

use secrecy::Secret;
use ureq::Agent;

use crate::{config::ConfigPair, url::BaseUrl};

mod session;

use super::types::*;

/// Builds [`Client`] instances for v1 of the auth API.
#[derive(Debug, Clone, Copy, Default)]
pub struct Connector;

impl super::Connector for Connector {
    type Client = Client;

    #[tracing::instrument(skip_all, fields(endpoint = %config.endpoint()))]
    fn connect(&self, config: &ConfigPair) -> Result<Client, Error> {
        let base_url = BaseUrl::parse(config.endpoint())
            .map_err(|err| Error::InvalidEndpoint(config.endpoint().to_owned(), err))?;
        Ok(Client::new(&base_url, config.credential().clone()))
    }
}

/// Implements the client for v1 of the auth API.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: BaseUrl,
    credential: Secret<String>,
    agent: Agent,
}

impl Client {
    /// Construct a new client instance authenticating with `credential`.
    pub fn new(base_url: &BaseUrl, credential: Secret<String>) -> Self {
        Self {
            base_url: base_url.to_owned(),
            credential,
            agent: super::build_default_agent(),
        }
    }
}

impl super::Client for Client {
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    fn session(&self) -> Result<Session, Error> {
        session::run(&self.agent, &self.base_url, &self.credential)
    }
}
