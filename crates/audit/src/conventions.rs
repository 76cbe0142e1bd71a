//! Source-convention checks over controller files. These are text
//! heuristics (regex over source, not parsing) and therefore low-confidence:
//! they flag likely problems, they do not prove correctness.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::info;

use crate::finding::AuditLog;
use crate::walk::files_with_suffix;

pub const BACKEND_SOURCE_SUBDIR: &str = "src/main/java/com/sgms";

const CONTROLLER_SUFFIX: &str = "Controller.java";

/// Controllers must carry the REST annotations the framework routes by.
pub fn check_controllers(log: &mut AuditLog, backend_root: &Path) {
    info!("checking API controller conventions");

    let source_root = backend_root.join(BACKEND_SOURCE_SUBDIR);
    if !source_root.is_dir() {
        log.critical("API", "Source directory not found", "Create the backend source tree");
        return;
    }

    let controllers = files_with_suffix(&source_root, CONTROLLER_SUFFIX);
    if controllers.is_empty() {
        log.warning(
            "API",
            "No controllers found",
            Some("Create REST controllers for API endpoints".into()),
        );
        return;
    }
    log.success("API", format!("Found {} controllers", controllers.len()));

    for controller in &controllers {
        let name = controller
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("controller");
        let Ok(content) = fs::read_to_string(controller) else {
            log.warning("API", format!("{name} could not be read"), None);
            continue;
        };

        if !content.contains("@RestController") {
            log.warning(
                "API",
                format!("{name} missing @RestController annotation"),
                None,
            );
        }
        if !content.contains("@RequestMapping") {
            log.warning(
                "API",
                format!("{name} missing @RequestMapping annotation"),
                None,
            );
        }
    }
}

/// Controllers returning persistence entities leak internal types across the
/// API boundary - an architecture defect, not a style nit.
pub fn check_entity_exposure(log: &mut AuditLog, backend_root: &Path) {
    info!("checking for entity exposure in controllers");

    let source_root = backend_root.join(BACKEND_SOURCE_SUBDIR);
    if !source_root.is_dir() {
        return;
    }

    let entity_return = Regex::new(r"return\s+\w+Entity").expect("literal pattern");
    let mut exposures = 0usize;

    for controller in files_with_suffix(&source_root, CONTROLLER_SUFFIX) {
        let name = controller
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("controller")
            .to_string();
        let Ok(content) = fs::read_to_string(&controller) else {
            continue;
        };

        let hits = entity_return.find_iter(&content).count();
        if hits > 0 {
            exposures += hits;
            log.critical(
                "Architecture",
                format!("{name} returns Entity directly"),
                "Create DTO classes and map entities to DTOs",
            );
        }
    }

    if exposures == 0 {
        log.success("Architecture", "No entity exposure detected");
    }
}
