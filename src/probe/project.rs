use std::path::{Path, PathBuf};

use crate::core::{Importability, ProjectInfo, normalize_import_name};
use crate::platform::ProbeError;
use crate::probe::ModuleResolver;

pub const MANIFEST_FILE: &str = "pyproject.toml";

pub fn inspect(project_path: &Path, resolver: &dyn ModuleResolver) -> ProjectInfo {
    let path = absolute(project_path);
    let manifest = path.join(MANIFEST_FILE);
    let pyproject = manifest.is_file();

    let project_name = match read_manifest(&manifest) {
        Ok(Some(table)) => declared_name(&table),
        Ok(None) => None,
        Err(err) => {
            tracing::debug!(%err, "manifest ignored");
            None
        }
    };

    let package_importable = match &project_name {
        Some(name) => check_importable(&normalize_import_name(name), resolver),
        None => Importability::Unknown,
    };

    ProjectInfo {
        path: path.display().to_string(),
        pyproject,
        project_name,
        package_importable,
        shadowing: Vec::new(),
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

pub fn read_manifest(path: &Path) -> Result<Option<toml::Table>, ProbeError> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = std::fs::read(path).map_err(|e| ProbeError::io(path, e))?;
    let text = String::from_utf8(bytes).map_err(|e| ProbeError::Malformed {
        command: path.display().to_string(),
        message: e.to_string(),
    })?;
    let table = text
        .parse::<toml::Table>()
        .map_err(|e| ProbeError::Malformed {
            command: path.display().to_string(),
            message: e.to_string(),
        })?;
    Ok(Some(table))
}

pub fn declared_name(table: &toml::Table) -> Option<String> {
    let name = table.get("project")?.as_table()?.get("name")?.as_str()?.trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn check_importable(import_name: &str, resolver: &dyn ModuleResolver) -> Importability {
    match resolver.find_module(import_name) {
        Ok(true) => Importability::Importable,
        Ok(false) => Importability::NotImportable,
        Err(err) => {
            tracing::debug!(module = import_name, %err, "import resolution failed");
            Importability::NotImportable
        }
    }
}
