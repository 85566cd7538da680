use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub system: String,
    pub release: String,
    pub distro: Option<String>,
}

impl PlatformInfo {
    pub fn display_detail(&self) -> &str {
        self.distro.as_deref().unwrap_or(&self.release)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvironmentKind {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "venv")]
    VirtualEnv,
    #[serde(rename = "conda")]
    ManagedEnv,
    #[serde(rename = "pyenv")]
    VersionManager,
    #[serde(rename = "unknown")]
    Unknown,
}

impl EnvironmentKind {
    /// Resolves the single classification from the detector flags.
    ///
    /// Priority: virtual-env > managed-env > version-manager >
    /// externally-managed marker (reported as `system`) > unknown.
    pub const fn classify(
        is_venv: bool,
        is_conda: bool,
        is_pyenv: bool,
        externally_managed: bool,
    ) -> Self {
        if is_venv {
            EnvironmentKind::VirtualEnv
        } else if is_conda {
            EnvironmentKind::ManagedEnv
        } else if is_pyenv {
            EnvironmentKind::VersionManager
        } else if externally_managed {
            EnvironmentKind::System
        } else {
            EnvironmentKind::Unknown
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EnvironmentKind::System => "system",
            EnvironmentKind::VirtualEnv => "venv",
            EnvironmentKind::ManagedEnv => "conda",
            EnvironmentKind::VersionManager => "pyenv",
            EnvironmentKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeInfo {
    pub executable: String,
    pub version: String,
    pub implementation: String,
    pub environment_type: EnvironmentKind,
    pub is_venv: bool,
    pub is_conda: bool,
    pub is_pyenv: bool,
    pub pep668_externally_managed: bool,
    pub platform: PlatformInfo,
}

impl RuntimeInfo {
    pub fn major_minor(&self) -> Option<String> {
        major_minor(&self.version)
    }
}

pub fn major_minor(version: &str) -> Option<String> {
    let mut parts = version.trim().split('.');
    let major = parts.next().filter(|p| is_numeric(p))?;
    let minor = parts.next().filter(|p| is_numeric(p))?;
    Some(format!("{major}.{minor}"))
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
