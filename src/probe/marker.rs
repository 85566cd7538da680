use std::path::{Path, PathBuf};

use crate::probe::InterpreterFacts;

pub const MARKER_FILE: &str = "EXTERNALLY-MANAGED";

pub fn candidate_dirs(facts: &InterpreterFacts) -> Vec<PathBuf> {
    let discovered = facts
        .purelib
        .iter()
        .chain(facts.platlib.iter())
        .chain(facts.site_packages.iter())
        .chain(facts.user_site.iter());

    let mut out: Vec<PathBuf> = Vec::new();
    for dir in discovered {
        if dir.is_empty() {
            continue;
        }
        let dir = PathBuf::from(dir);
        if !out.contains(&dir) {
            out.push(dir);
        }
    }
    out
}

pub fn is_externally_managed(dirs: &[PathBuf]) -> bool {
    for base in dirs {
        let parent = base.parent();
        for candidate in std::iter::once(base.as_path()).chain(parent) {
            if marker_present(&candidate.join(MARKER_FILE)) {
                tracing::debug!(dir = %candidate.display(), "externally-managed marker found");
                return true;
            }
        }
    }
    false
}

fn marker_present(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file(),
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), %err, "marker probe failed");
            }
            false
        }
    }
}
