//! Best-effort diagnosis for failing probes, matched on status code and
//! error text. These are triage hints pointing at the usual suspects in the
//! target stack, not proofs.

use crate::result::ProbeResult;
use crate::routes::FRONTEND_ROUTES;

/// Suggest the probable source of a failure.
pub fn diagnose(result: &ProbeResult) -> String {
    match result.status_code {
        Some(401) => {
            return "AuthController -> JwtAuthenticationFilter -> check JWT token validity".into()
        }
        Some(403) => return "SecurityConfig -> @PreAuthorize -> check role-based authorization".into(),
        Some(404) => {
            if FRONTEND_ROUTES.contains(&result.endpoint.as_str()) {
                return "Frontend router -> check route configuration in App.jsx".into();
            }
            return "Controller -> check @RequestMapping path".into();
        }
        Some(500) => {
            return "Service layer -> check for null pointer, database connection, or logic errors"
                .into()
        }
        _ => {}
    }

    let error = result.error.as_deref().unwrap_or("");
    let lowered = error.to_lowercase();
    if lowered.contains("timeout") {
        "Database query -> check for missing indexes or N+1 queries".into()
    } else if lowered.contains("connection") {
        "Server not running -> check that the backend/frontend dev server is up".into()
    } else if error.contains("JSON") {
        "Controller -> DTO mapping error -> check return types".into()
    } else {
        "Unknown error -> check server logs".into()
    }
}
