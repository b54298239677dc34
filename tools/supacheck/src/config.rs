//! Locates the endpoint and credential used for the check.
//!
//! Values come from a [`Source`], which keeps the decision about *whether*
//! the check can run separate from *where* the values physically live.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use getset::Getters;
use secrecy::Secret;
use tracing::debug;

/// The variable holding the endpoint address.
pub const ENDPOINT_VAR: &str = "SUPABASE_URL";

/// The variable holding the access credential.
pub const CREDENTIAL_VAR: &str = "SUPABASE_KEY";

/// The settings file read when none is specified.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Provides configuration values by name.
pub trait Source {
    /// Look up the value for `key`, if this source has one.
    fn get(&self, key: &str) -> Option<String>;
}

impl<S: Source + ?Sized> Source for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl Source for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Reads values from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Environment;

impl Source for Environment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Values read from a dotenv formatted settings file.
///
/// Reading the file does not modify the process environment.
#[derive(Debug, Clone, Default, Getters)]
#[getset(get = "pub")]
pub struct EnvFile {
    /// The file that was read.
    path: PathBuf,

    /// The values parsed out of the file.
    values: HashMap<String, String>,
}

/// Errors reading an [`EnvFile`].
#[derive(Debug, thiserror::Error)]
#[error("read settings file '{}'", .0.display())]
pub struct EnvFileError(PathBuf, #[source] dotenv::Error);

impl EnvFile {
    /// Read the settings file at `path`.
    ///
    /// A file that doesn't exist is not an error; it simply provides no values.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn read(path: impl AsRef<Path>) -> Result<Self, EnvFileError> {
        let path = path.as_ref().to_path_buf();
        let iter = match dotenv::from_path_iter(&path) {
            Ok(iter) => iter,
            Err(err) if err.not_found() => {
                debug!("settings file not found");
                return Ok(Self { path, values: HashMap::new() });
            }
            Err(err) => return Err(EnvFileError(path, err)),
        };

        let values = iter
            .collect::<Result<HashMap<_, _>, _>>()
            .map_err(|err| EnvFileError(path.clone(), err))?;
        debug!(count = values.len(), "read settings file");
        Ok(Self { path, values })
    }
}

impl Source for EnvFile {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Consults each source in order, returning the first value found.
#[derive(Default)]
pub struct Layered {
    sources: Vec<Box<dyn Source>>,
}

impl Layered {
    /// Create an empty layered source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source to consult after the ones already present.
    pub fn then(mut self, source: impl Source + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl Source for Layered {
    fn get(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.get(key))
    }
}

impl std::fmt::Debug for Layered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layered")
            .field("sources", &self.sources.len())
            .finish()
    }
}

/// The endpoint and credential required to run the check.
///
/// Both values are guaranteed to be non-empty.
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct ConfigPair {
    /// The address of the remote service.
    endpoint: String,

    /// The key used to authenticate with the remote service.
    credential: Secret<String>,
}

/// Returned when required configuration values are absent or empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required configuration: {}", .missing.join(", "))]
pub struct MissingConfigError {
    missing: Vec<&'static str>,
}

impl MissingConfigError {
    /// The names of the values that were missing, in lookup order.
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }
}

impl ConfigPair {
    /// Load the pair from `source`.
    ///
    /// Values are trimmed, and a value that is empty after trimming is treated as absent.
    pub fn load(source: &impl Source) -> Result<Self, MissingConfigError> {
        let lookup = |key: &str| {
            source
                .get(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        match (lookup(ENDPOINT_VAR), lookup(CREDENTIAL_VAR)) {
            (Some(endpoint), Some(credential)) => Ok(Self {
                endpoint,
                credential: Secret::new(credential),
            }),
            (endpoint, credential) => {
                let missing = [(ENDPOINT_VAR, endpoint), (CREDENTIAL_VAR, credential)]
                    .into_iter()
                    .filter(|(_, value)| value.is_none())
                    .map(|(key, _)| key)
                    .collect();
                Err(MissingConfigError { missing })
            }
        }
    }
}
