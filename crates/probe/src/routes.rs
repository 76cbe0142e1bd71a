//! Fixed probe tables: backend read-only endpoints and frontend routes.

use crate::executor::{HttpMethod, ProbeRequest, Transport, TransportError};
use crate::result::{log_result, ProbeLog, ProbeResult};
use crate::session::ProbeSession;

/// Read-only backend probes: path, method, requires-auth.
pub const READ_ENDPOINTS: &[(&str, HttpMethod, bool)] = &[
    ("/guards", HttpMethod::Get, true),
    ("/clients", HttpMethod::Get, true),
    ("/sites", HttpMethod::Get, true),
    ("/site-posts", HttpMethod::Get, true),
    ("/assignments", HttpMethod::Get, true),
    ("/assignments/shift-types", HttpMethod::Get, true),
    ("/attendance/today-summary", HttpMethod::Get, true),
    ("/auth/me", HttpMethod::Get, true),
];

/// Frontend routes expected to serve the SPA shell.
pub const FRONTEND_ROUTES: &[&str] = &[
    "/portal",
    "/login/admin",
    "/login/manager",
    "/login/client",
    "/login/guard",
];

/// Probe every read-only backend endpoint in order.
pub fn run_read_probes<T: Transport>(session: &mut ProbeSession<'_, T>) {
    for &(path, method, requires_auth) in READ_ENDPOINTS {
        session.probe(path, method, requires_auth, None);
    }
}

/// Check each frontend route. Unlike API probes these expect an HTML page,
/// so only the status code matters: 200 passes, 404 points at the
/// client-side router, anything else fails with the code.
pub fn run_frontend_checks<T: Transport>(
    transport: &T,
    frontend_base_url: &str,
    log: &mut ProbeLog,
) {
    let base = frontend_base_url.trim_end_matches('/');
    for &route in FRONTEND_ROUTES {
        let request = ProbeRequest {
            url: format!("{base}{route}"),
            method: HttpMethod::Get,
            body: None,
            bearer: None,
        };
        let result = match transport.send(&request) {
            Ok(response) if response.status == 200 => {
                ProbeResult::pass(route, HttpMethod::Get, 200, response.latency_ms)
            }
            Ok(response) if response.status == 404 => ProbeResult::fail(
                route,
                HttpMethod::Get,
                Some(404),
                Some(response.latency_ms),
                "Route not found - check client-side router config",
            ),
            Ok(response) => ProbeResult::fail(
                route,
                HttpMethod::Get,
                Some(response.status),
                Some(response.latency_ms),
                format!("HTTP {}", response.status),
            ),
            Err(TransportError::Connect) => ProbeResult::fail(
                route,
                HttpMethod::Get,
                None,
                None,
                "Frontend server not running",
            ),
            Err(err) => ProbeResult::fail(route, HttpMethod::Get, None, None, err.to_string()),
        };
        log_result(&result);
        log.push(result);
    }
}
