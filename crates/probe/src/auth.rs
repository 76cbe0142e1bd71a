//! Authentication bootstrap — try configured admin credentials, then the
//! known fallback pairs, and capture a bearer token from the first login
//! that both classifies as a pass and yields a recognizable token.

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::envelope;
use crate::executor::{HttpMethod, Transport};
use crate::result::ProbeStatus;
use crate::session::ProbeSession;

pub const LOGIN_PATH: &str = "/auth/login";

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    fn payload(&self) -> Value {
        json!({ "email": self.email, "password": self.password })
    }
}

/// The well-known seed accounts tried when no credentials are configured
/// or the configured pair does not authenticate.
pub fn fallback_credentials() -> Vec<Credentials> {
    vec![
        Credentials::new("admin@sgms.com", "admin123"),
        Credentials::new("admin@test.com", "admin123"),
        Credentials::new("test@admin.com", "Test@123"),
    ]
}

/// Walk the credential ladder. Every attempt is an ordinary recorded probe;
/// returns true once a token is captured. A fully failed ladder is not
/// fatal - subsequent authenticated probes simply collect 401s.
pub fn login<T: Transport>(
    session: &mut ProbeSession<'_, T>,
    configured: Option<Credentials>,
) -> bool {
    let mut candidates = Vec::new();
    match configured {
        Some(credentials) => {
            info!("using configured admin credentials");
            candidates.push(credentials);
        }
        None => warn!("no admin credentials configured, trying defaults"),
    }
    candidates.extend(fallback_credentials());

    for credentials in candidates {
        info!(email = %credentials.email, "attempting login");
        let status = session.probe(
            LOGIN_PATH,
            HttpMethod::Post,
            false,
            Some(credentials.payload()),
        );
        if status != ProbeStatus::Pass {
            continue;
        }

        match session.raw(LOGIN_PATH, HttpMethod::Post, Some(credentials.payload())) {
            Some(body) => match envelope::access_token(&body) {
                Some(token) => {
                    session.set_token(token);
                    info!("bearer token obtained");
                    return true;
                }
                None => warn!("login response carried no recognizable token"),
            },
            None => warn!("token extraction request failed"),
        }
    }

    warn!("could not authenticate - authenticated probes will fail");
    false
}
