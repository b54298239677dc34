use std::io::Read;

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use tap::TapFallible;
use tracing::{debug, warn};
use ureq::Agent;

use super::{Error, ErrorBody, Session};
use crate::{ext::api::declare_route, url::BaseUrl};

declare_route!("auth/v1/user");

/// Longest response body excerpt carried in an error.
const BODY_EXCERPT_LEN: usize = 200;

/// Most bytes read from a response body.
/// Only the start of the body is needed to describe the session.
const BODY_READ_LIMIT: u64 = 64 * 1024;

/// The parts of the user object used to describe an active session.
#[derive(Debug, Deserialize)]
struct User {
    id: Option<String>,
}

#[tracing::instrument(skip_all, fields(status, url))]
pub fn run(agent: &Agent, base: &BaseUrl, credential: &Secret<String>) -> Result<Session, Error> {
    let url = route_url(base);
    let url = url.as_str();
    tracing::Span::current().record("url", url);

    let key = credential.expose_secret();
    let response = match agent
        .get(url)
        .set("apikey", key)
        .set("Authorization", &format!("Bearer {key}"))
        .call()
    {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(transport)) => {
            let err = Error::from(transport);
            if let Error::Transport(_, ref transport) = err {
                warn!(kind = %transport.kind(), "session lookup failed in transport");
            }
            return Err(err);
        }
    };

    let status = response.status();
    tracing::Span::current().record("status", status);

    let mut body = Vec::new();
    let read = response
        .into_reader()
        .take(BODY_READ_LIMIT)
        .read_to_end(&mut body);
    match read {
        Ok(_) => {}
        // The status already proves the service answered.
        Err(err) if is_success(status) => debug!(%err, "ignoring unreadable body"),
        Err(err) => return Err(Error::ReadResponseBody(url.to_string(), err)),
    }
    let body = String::from_utf8_lossy(&body);

    classify(url, status, &body).tap_ok(|session| debug!(%session, "session lookup answered"))
}

/// Decide whether a session lookup response proves the service is reachable.
///
/// Any successful response counts, whatever its shape.
/// Refusals that only mean "no user is signed in" count too.
fn classify(url: &str, status: u16, body: &str) -> Result<Session, Error> {
    match status {
        status if is_success(status) => {
            let user_id = serde_json::from_str::<User>(body)
                .ok()
                .and_then(|user| user.id);
            Ok(Session::Active { user_id })
        }
        401 | 403 if ErrorBody::parse(body).is_missing_session() => Ok(Session::Anonymous),
        _ => Err(Error::Status(url.to_string(), status, describe(body))),
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Render a short description of an error response body.
fn describe(body: &str) -> String {
    if let Some(message) = ErrorBody::parse(body).describe() {
        return message.to_string();
    }

    let body = body.trim();
    if body.is_empty() {
        return String::from("<empty body>");
    }

    match body.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}
