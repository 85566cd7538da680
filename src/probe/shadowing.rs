use std::collections::BTreeSet;
use std::path::Path;

use walkdir::WalkDir;

use crate::core::normalize_import_name;

pub const POPULAR_PACKAGES: [&str; 12] = [
    "requests",
    "numpy",
    "pandas",
    "matplotlib",
    "scipy",
    "typer",
    "click",
    "flask",
    "django",
    "pytest",
    "yaml",
    "pip",
];

const SCRIPT_EXTENSION: &str = "py";

pub fn detect(project_path: &Path, project_name: Option<&str>) -> Vec<String> {
    collisions(top_level_candidates(project_path), project_name)
}

pub fn top_level_candidates(dir: &Path) -> Vec<String> {
    let mut out = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(dir = %dir.display(), %err, "directory listing failed");
                continue;
            }
        };
        let path = entry.path();
        if path.is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                out.push(name.to_string());
            }
        } else if path.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(SCRIPT_EXTENSION)
        {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                out.push(stem.to_string());
            }
        }
    }
    out
}

pub fn collisions<I, S>(candidates: I, project_name: Option<&str>) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let own = project_name
        .filter(|n| !n.is_empty())
        .map(normalize_import_name);

    let found: BTreeSet<String> = candidates
        .into_iter()
        .filter(|c| {
            let c: &str = c.as_ref();
            POPULAR_PACKAGES.contains(&c) || own.as_deref() == Some(c)
        })
        .map(|c| c.as_ref().to_string())
        .collect();
    found.into_iter().collect()
}
