//! Migration file sequence integrity: versioned SQL files must form a
//! contiguous 1..=max sequence.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::info;

use crate::finding::AuditLog;

pub const MIGRATION_SUBDIR: &str = "src/main/resources/db/migration";

pub fn check_migrations(log: &mut AuditLog, backend_root: &Path) {
    info!("checking database migrations");

    let migration_dir = backend_root.join(MIGRATION_SUBDIR);
    let entries = match fs::read_dir(&migration_dir) {
        Ok(entries) => entries,
        Err(_) => {
            log.critical(
                "Database",
                "Migration directory not found",
                format!("Create directory: {}", migration_dir.display()),
            );
            return;
        }
    };

    let pattern = Regex::new(r"^V(\d+)__.*\.sql$").expect("literal pattern");
    let mut versions: Vec<u32> = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name();
        if let Some(captures) = name.to_str().and_then(|n| pattern.captures(n)) {
            if let Ok(version) = captures[1].parse::<u32>() {
                versions.push(version);
            }
        }
    }
    versions.sort_unstable();

    if versions.is_empty() {
        log.critical(
            "Database",
            "No migration files found",
            "Add versioned migration SQL files to db/migration/",
        );
        return;
    }

    log.success(
        "Database",
        format!("Found {} migration files", versions.len()),
    );

    let gaps = version_gaps(&versions);
    if !gaps.is_empty() {
        log.warning(
            "Database",
            format!("Migration version gaps detected: {gaps:?}"),
            Some("Check if migrations were accidentally deleted".into()),
        );
    }
}

/// Versions missing from the contiguous 1..=max sequence.
pub fn version_gaps(versions: &[u32]) -> Vec<u32> {
    let Some(&max) = versions.iter().max() else {
        return Vec::new();
    };
    let present: BTreeSet<u32> = versions.iter().copied().collect();
    (1..=max).filter(|v| !present.contains(v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Severity;
    use std::fs::File;
    use tempfile::TempDir;

    fn backend_with_migrations(names: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        let migration_dir = dir.path().join(MIGRATION_SUBDIR);
        fs::create_dir_all(&migration_dir).unwrap();
        for name in names {
            File::create(migration_dir.join(name)).unwrap();
        }
        dir
    }

    #[test]
    fn test_gap_detection_is_a_warning_not_critical() {
        let backend = backend_with_migrations(&["V1__x.sql", "V2__y.sql", "V4__z.sql"]);
        let mut log = AuditLog::new();
        check_migrations(&mut log, backend.path());

        assert_eq!(log.count(Severity::Critical), 0);
        assert_eq!(log.count(Severity::Warning), 1);
        let warning = log.in_bucket(Severity::Warning).next().unwrap();
        assert!(warning.message.contains("[3]"));
    }

    #[test]
    fn test_contiguous_sequence_is_clean() {
        let backend = backend_with_migrations(&["V1__a.sql", "V2__b.sql", "V3__c.sql"]);
        let mut log = AuditLog::new();
        check_migrations(&mut log, backend.path());

        assert_eq!(log.count(Severity::Warning), 0);
        assert_eq!(log.count(Severity::Success), 1);
    }

    #[test]
    fn test_missing_directory_is_critical() {
        let dir = TempDir::new().unwrap();
        let mut log = AuditLog::new();
        check_migrations(&mut log, dir.path());

        assert_eq!(log.count(Severity::Critical), 1);
    }

    #[test]
    fn test_empty_directory_is_critical() {
        let backend = backend_with_migrations(&[]);
        let mut log = AuditLog::new();
        check_migrations(&mut log, backend.path());

        assert_eq!(log.count(Severity::Critical), 1);
    }

    #[test]
    fn test_non_migration_files_are_ignored() {
        let backend =
            backend_with_migrations(&["V1__a.sql", "README.md", "V2__b.sql.bak", "notes.sql"]);
        let mut log = AuditLog::new();
        check_migrations(&mut log, backend.path());

        let success = log.in_bucket(Severity::Success).next().unwrap();
        assert!(success.message.contains("1 migration"));
    }

    #[test]
    fn test_version_gaps_pure() {
        assert_eq!(version_gaps(&[1, 2, 4]), vec![3]);
        assert_eq!(version_gaps(&[2, 5]), vec![1, 3, 4]);
        assert!(version_gaps(&[1, 2, 3]).is_empty());
        assert!(version_gaps(&[]).is_empty());
    }
}
