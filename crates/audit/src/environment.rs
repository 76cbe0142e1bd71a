//! Environment-variable presence checks, behind a lookup seam so tests can
//! inject a fixed environment.

use tracing::info;

use crate::finding::AuditLog;

/// Environment lookup seam. Empty values count as unset.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
pub struct SystemEnv;

impl EnvSource for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

/// Variables that block deployment when absent.
pub const REQUIRED_VARS: &[(&str, &str)] = &[
    (
        "APP_SECURITY_JWT_SECRET",
        "JWT signing secret for authentication",
    ),
    ("DATABASE_URL", "PostgreSQL connection string (for prod)"),
];

/// Variables worth setting but not blocking.
pub const OPTIONAL_VARS: &[(&str, &str)] = &[
    ("SPRING_PROFILES_ACTIVE", "Should be 'local' or 'prod'"),
    ("CORS_ALLOWED_ORIGINS", "Frontend URLs for CORS"),
    (
        "JWT_ACCESS_TTL_SECONDS",
        "Token expiry time (default: 86400)",
    ),
    ("VITE_API_BASE_URL", "Backend API URL for frontend"),
];

pub fn check_environment(log: &mut AuditLog, env: &dyn EnvSource) {
    info!("checking environment variables");

    for &(var, description) in REQUIRED_VARS {
        if env.var(var).is_none() {
            log.critical(
                "Environment",
                format!("Missing required environment variable: {var}"),
                format!("Set {var}: {description}"),
            );
        } else {
            log.success("Environment", format!("{var} is set"));
        }
    }

    for &(var, description) in OPTIONAL_VARS {
        if env.var(var).is_none() {
            log.info(
                "Environment",
                format!("Optional variable not set: {var}"),
                Some(format!("Consider setting {var}: {description}")),
            );
        } else {
            log.success("Environment", format!("{var} is set"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Severity;
    use std::collections::HashMap;

    pub struct MapEnv(pub HashMap<String, String>);

    impl EnvSource for MapEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned().filter(|v| !v.is_empty())
        }
    }

    #[test]
    fn test_bare_environment_yields_two_criticals_and_four_infos() {
        let mut log = AuditLog::new();
        check_environment(&mut log, &MapEnv(HashMap::new()));

        assert_eq!(log.count(Severity::Critical), 2);
        assert_eq!(log.count(Severity::Info), 4);
        assert_eq!(log.count(Severity::Success), 0);
    }

    #[test]
    fn test_fully_populated_environment_is_all_success() {
        let mut vars = HashMap::new();
        for &(var, _) in REQUIRED_VARS.iter().chain(OPTIONAL_VARS) {
            vars.insert(var.to_string(), "value".to_string());
        }
        let mut log = AuditLog::new();
        check_environment(&mut log, &MapEnv(vars));

        assert_eq!(log.count(Severity::Critical), 0);
        assert_eq!(log.count(Severity::Info), 0);
        assert_eq!(log.count(Severity::Success), 6);
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        let mut vars = HashMap::new();
        vars.insert("DATABASE_URL".to_string(), String::new());
        let mut log = AuditLog::new();
        check_environment(&mut log, &MapEnv(vars));

        assert_eq!(log.count(Severity::Critical), 2);
    }
}
