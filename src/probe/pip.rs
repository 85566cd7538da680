use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::core::{PipBinary, PipInfo, major_minor};
use crate::platform::{self, ProbeError};

static PIP_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"pip\s+(?P<pver>[\w.]+)\s+from\s+(?P<path>\S+)\s+\(python\s+(?P<pyver>[\w.]+)\)")
        .expect("PIP_VERSION_RE must compile")
});

pub fn candidate_names(runtime_version: &str) -> Vec<String> {
    let mut names = vec!["pip".to_string(), "pip3".to_string()];
    if let Some(mm) = major_minor(runtime_version) {
        names.push(format!("pip{mm}"));
        let full = runtime_version.trim();
        if full != mm {
            names.push(format!("pip{full}"));
        }
    }
    names
}

pub fn collect(names: &[String], runtime_version: &str, timeout: Duration) -> PipInfo {
    let resolved = names
        .iter()
        .filter_map(|name| platform::which(name).map(|path| (name.clone(), path)));
    collect_resolved(resolved, runtime_version, timeout)
}

pub fn collect_resolved<I>(resolved: I, runtime_version: &str, timeout: Duration) -> PipInfo
where
    I: IntoIterator<Item = (String, PathBuf)>,
{
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut binaries = Vec::new();
    for (name, path) in resolved {
        let key = std::fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if !seen.insert(key) {
            tracing::debug!(%name, path = %path.display(), "skipping alias of an earlier binary");
            continue;
        }
        binaries.push(inspect_binary(&name, &path, timeout));
    }
    PipInfo::from_binaries(binaries, major_minor(runtime_version).as_deref())
}

fn inspect_binary(name: &str, path: &Path, timeout: Duration) -> PipBinary {
    let mut binary = PipBinary::new(name, path.display().to_string());

    match platform::run_command(path, &["--version"], timeout) {
        Ok(output) => {
            if let Some((pip_version, python_version)) = parse_version_output(&output.combined()) {
                binary.pip_version = Some(pip_version);
                binary.python_version = Some(python_version);
            } else {
                tracing::debug!(%name, exit_code = output.exit_code, "unrecognized --version output");
            }
        }
        Err(err) => tracing::debug!(%name, %err, "version probe failed"),
    }

    match read_shebang(path) {
        Ok(shebang) => binary.shebang_python = shebang,
        Err(err) => tracing::debug!(%name, %err, "shebang probe failed"),
    }

    binary
}

pub fn parse_version_output(text: &str) -> Option<(String, String)> {
    let caps = PIP_VERSION_RE.captures(text)?;
    Some((caps["pver"].to_string(), caps["pyver"].to_string()))
}

pub fn read_shebang(path: &Path) -> Result<Option<String>, ProbeError> {
    let file = std::fs::File::open(path).map_err(|e| ProbeError::io(path, e))?;
    let mut head = Vec::with_capacity(256);
    file.take(256)
        .read_to_end(&mut head)
        .map_err(|e| ProbeError::io(path, e))?;
    Ok(parse_shebang(&head))
}

fn parse_shebang(head: &[u8]) -> Option<String> {
    let rest = head.strip_prefix(b"#!")?;
    let line = rest.split(|b| *b == b'\n').next()?;
    let line = String::from_utf8_lossy(line).trim().to_string();
    (!line.is_empty()).then_some(line)
}
