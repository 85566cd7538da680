use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(format!(
                "invalid severity: {other} (expected info|warning|error)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueCode {
    #[serde(rename = "PIP_PYTHON_MISMATCH")]
    Mismatch,
    #[serde(rename = "PEP668_SYSTEM_PYTHON")]
    SystemManaged,
    #[serde(rename = "NO_VENV_FOR_PROJECT")]
    NoIsolatedEnv,
    #[serde(rename = "PROJECT_NOT_IMPORTABLE")]
    NotImportable,
    #[serde(rename = "PATH_SHADOWING_PACKAGE")]
    Shadowing,
    #[serde(rename = "WINDOWS_STORE_PYTHON")]
    StoreRuntime,
}

impl IssueCode {
    /// Evaluation order; advice is generated in the same order.
    pub const ALL: [IssueCode; 6] = [
        IssueCode::Mismatch,
        IssueCode::SystemManaged,
        IssueCode::NoIsolatedEnv,
        IssueCode::NotImportable,
        IssueCode::Shadowing,
        IssueCode::StoreRuntime,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            IssueCode::Mismatch => "PIP_PYTHON_MISMATCH",
            IssueCode::SystemManaged => "PEP668_SYSTEM_PYTHON",
            IssueCode::NoIsolatedEnv => "NO_VENV_FOR_PROJECT",
            IssueCode::NotImportable => "PROJECT_NOT_IMPORTABLE",
            IssueCode::Shadowing => "PATH_SHADOWING_PACKAGE",
            IssueCode::StoreRuntime => "WINDOWS_STORE_PYTHON",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub code: IssueCode,
    pub severity: Severity,
    pub details: Option<String>,
}

impl Issue {
    pub fn new(code: IssueCode, severity: Severity) -> Self {
        Self {
            code,
            severity,
            details: None,
        }
    }

    pub fn with_details(code: IssueCode, severity: Severity, details: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            details: Some(details.into()),
        }
    }
}
