//! Recursive source-tree walks for the census and convention checks.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// All files under `root` whose name ends with `suffix`, sorted for
/// deterministic findings. Ignore rules are disabled on purpose: the target
/// repository's gitignore must not hide files from the audit.
pub fn files_with_suffix(root: &Path, suffix: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkBuilder::new(root)
        .standard_filters(false)
        .build()
        .flatten()
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(suffix))
        })
        .collect();
    files.sort();
    files
}
