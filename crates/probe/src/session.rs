//! Probe session — joins paths onto the API base, attaches the bearer
//! token, classifies through the executor, and records into the run log.

use serde_json::Value;
use tracing::warn;

use crate::executor::{classify, HttpMethod, ProbeRequest, Transport};
use crate::result::{log_result, ProbeLog, ProbeStatus};

pub struct ProbeSession<'a, T: Transport> {
    transport: &'a T,
    api_base: String,
    token: Option<String>,
    pub log: ProbeLog,
}

impl<'a, T: Transport> ProbeSession<'a, T> {
    pub fn new(transport: &'a T, api_base_url: &str) -> Self {
        Self {
            transport,
            api_base: api_base_url.trim_end_matches('/').to_string(),
            token: None,
            log: ProbeLog::new(),
        }
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Issue one classifying probe; the outcome is recorded and echoed to
    /// the console regardless of how it went.
    pub fn probe(
        &mut self,
        path: &str,
        method: HttpMethod,
        requires_auth: bool,
        payload: Option<Value>,
    ) -> ProbeStatus {
        let request = ProbeRequest {
            url: format!("{}{}", self.api_base, path),
            method,
            body: payload,
            bearer: if requires_auth {
                self.token.clone()
            } else {
                None
            },
        };
        let result = classify(path, method, self.transport.send(&request));
        log_result(&result);
        let status = result.status;
        self.log.push(result);
        status
    }

    /// Re-issue a request outside the classification path, purely to read
    /// the raw body (identifier or token extraction). Uses the same
    /// transport and therefore the same timeout as classifying probes.
    /// Failures are logged and surface as `None`, never as probe results.
    pub fn raw(&self, path: &str, method: HttpMethod, payload: Option<Value>) -> Option<String> {
        let request = ProbeRequest {
            url: format!("{}{}", self.api_base, path),
            method,
            body: payload,
            bearer: self.token.clone(),
        };
        match self.transport.send(&request) {
            Ok(response) => Some(response.body),
            Err(err) => {
                warn!(%path, error = %err, "raw extraction request failed");
                None
            }
        }
    }
}
