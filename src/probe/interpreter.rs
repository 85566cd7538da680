use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::platform::{self, CommandRunOptions, PlatformProfile, ProbeError};

const FACTS_SCRIPT: &str = r#"import json, platform, site, sys, sysconfig

def safe(fn, default):
    try:
        return fn()
    except Exception:
        return default

paths = safe(lambda: sysconfig.get_paths(), {})
print(json.dumps({
    "executable": sys.executable,
    "version": platform.python_version(),
    "implementation": platform.python_implementation(),
    "prefix": sys.prefix,
    "base_prefix": getattr(sys, "base_prefix", sys.prefix),
    "purelib": paths.get("purelib"),
    "platlib": paths.get("platlib"),
    "site_packages": safe(lambda: list(site.getsitepackages()), []),
    "user_site": safe(lambda: site.getusersitepackages(), None),
    "release": platform.release(),
}))
"#;

const FIND_SPEC_SCRIPT: &str = r#"import importlib.util, sys
try:
    found = importlib.util.find_spec(sys.argv[1]) is not None
except Exception:
    found = False
print("yes" if found else "no")
"#;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InterpreterFacts {
    pub executable: String,
    pub version: String,
    pub implementation: String,
    pub prefix: String,
    pub base_prefix: String,
    #[serde(default)]
    pub purelib: Option<String>,
    #[serde(default)]
    pub platlib: Option<String>,
    #[serde(default)]
    pub site_packages: Vec<String>,
    #[serde(default)]
    pub user_site: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
}

pub trait ModuleResolver {
    fn find_module(&self, name: &str) -> Result<bool, ProbeError>;
}

#[derive(Debug, Clone)]
pub struct Interpreter {
    path: PathBuf,
    timeout: Duration,
}

impl Interpreter {
    pub fn locate(
        configured: Option<&str>,
        profile: &PlatformProfile,
        timeout: Duration,
    ) -> Result<Self, ProbeError> {
        let path = match configured.map(str::trim).filter(|s| !s.is_empty()) {
            Some(name) => platform::which(name).ok_or_else(|| ProbeError::NotFound {
                name: name.to_string(),
            })?,
            None => profile
                .interpreter_candidates
                .iter()
                .find_map(|name| platform::which(name))
                .ok_or_else(|| ProbeError::NotFound {
                    name: profile.interpreter_candidates.join("|"),
                })?,
        };
        // Module lookups run from another directory, so the path must not be relative.
        let path = std::path::absolute(&path).map_err(|e| ProbeError::io(&path, e))?;
        Ok(Self { path, timeout })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn facts(&self) -> Result<InterpreterFacts, ProbeError> {
        let output = platform::run_command(&self.path, &["-c", FACTS_SCRIPT], self.timeout)?;
        let command = format!("{} -c <facts>", self.path.display());
        if output.exit_code != 0 {
            return Err(ProbeError::Exit {
                command,
                code: output.exit_code,
            });
        }
        parse_facts(&output.stdout).map_err(|message| ProbeError::Malformed { command, message })
    }
}

impl ModuleResolver for Interpreter {
    fn find_module(&self, name: &str) -> Result<bool, ProbeError> {
        let options = CommandRunOptions {
            current_dir: Some(std::env::temp_dir()),
        };
        let output = platform::run_command_with_options(
            &self.path,
            &["-c", FIND_SPEC_SCRIPT, name],
            self.timeout,
            &options,
        )?;
        let command = format!("{} -c <find_spec> {name}", self.path.display());
        if output.exit_code != 0 {
            return Err(ProbeError::Exit {
                command,
                code: output.exit_code,
            });
        }
        match last_line(&output.stdout) {
            Some("yes") => Ok(true),
            Some("no") => Ok(false),
            other => Err(ProbeError::Malformed {
                command,
                message: format!("expected yes|no, got {other:?}"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoInterpreter;

impl ModuleResolver for NoInterpreter {
    fn find_module(&self, _name: &str) -> Result<bool, ProbeError> {
        Err(ProbeError::NotFound {
            name: "python interpreter".to_string(),
        })
    }
}

fn last_line(stdout: &str) -> Option<&str> {
    stdout.lines().map(str::trim).rfind(|l| !l.is_empty())
}

/// Parses the facts object from the last non-empty stdout line; startup
/// hooks may print before it.
pub fn parse_facts(stdout: &str) -> Result<InterpreterFacts, String> {
    let line = last_line(stdout).ok_or_else(|| "empty output".to_string())?;
    serde_json::from_str(line).map_err(|e| e.to_string())
}
