//! Concrete types for API communications, independent of API version.

mod error;
pub use error::*;

use serde::Deserialize;

/// The result of a session lookup.
///
/// Either variant proves the service is reachable and accepted the key.
#[derive(Debug, Clone, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Session {
    /// The credential resolved to a signed in user.
    Active {
        /// The user's ID, if the service reported one.
        user_id: Option<String>,
    },

    /// The service answered, but no user session exists for the credential.
    /// This is the normal case for anonymous and service keys.
    Anonymous,
}

/// The error body returned by the auth service and its gateway.
///
/// The auth service and the gateway in front of it use different field names,
/// so everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct ErrorBody {
    /// Machine readable code, such as `bad_jwt`.
    pub(crate) error_code: Option<String>,

    /// Human readable message from the auth service.
    pub(crate) msg: Option<String>,

    /// Human readable message from the gateway.
    pub(crate) message: Option<String>,

    /// Older auth service releases report the code here.
    pub(crate) error: Option<String>,

    /// Older auth service releases report the message here.
    pub(crate) error_description: Option<String>,
}

impl ErrorBody {
    /// Error codes the auth service returns when the request carries no user session.
    const NO_SESSION_CODES: &'static [&'static str] = &[
        "no_authorization",
        "session_not_found",
        "session_expired",
    ];

    /// Message reported when the request has no session at all.
    const NO_SESSION_MESSAGE: &'static str = "Auth session missing!";

    /// `bad_jwt` covers any token the auth service refuses, including forged ones.
    /// Only the variant for a validly signed key that names no user (anon, service role)
    /// means "no session".
    const NO_SUBJECT_CODE: &'static str = "bad_jwt";
    const NO_SUBJECT_MESSAGE: &'static str = "missing sub claim";

    /// Parse the body, tolerating anything that isn't the expected JSON.
    pub(crate) fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// Whether this body describes a request without a user session,
    /// as opposed to a request rejected outright.
    pub(crate) fn is_missing_session(&self) -> bool {
        let code = self.error_code.as_deref().or(self.error.as_deref());
        let message = self
            .msg
            .as_deref()
            .or(self.message.as_deref())
            .or(self.error_description.as_deref());

        let no_subject = code == Some(Self::NO_SUBJECT_CODE)
            && message.is_some_and(|message| message.contains(Self::NO_SUBJECT_MESSAGE));

        no_subject
            || code.is_some_and(|code| Self::NO_SESSION_CODES.contains(&code))
            || message == Some(Self::NO_SESSION_MESSAGE)
    }

    /// The most descriptive human readable message in the body, if any.
    pub(crate) fn describe(&self) -> Option<&str> {
        self.msg
            .as_deref()
            .or(self.message.as_deref())
            .or(self.error_description.as_deref())
            .or(self.error_code.as_deref())
            .or(self.error.as_deref())
    }
}
