use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Why a single probe could not produce a value.
///
/// Collectors log these and fall back to a documented default; they never
/// abort a check.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("not found: {name}")]
    NotFound { name: String },

    #[error("failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for {command}: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out after {timeout:?}: {command}")]
    Timeout { command: String, timeout: Duration },

    #[error("{command} exited with code {code}")]
    Exit { command: String, code: i32 },

    #[error("unexpected output from {command}: {message}")]
    Malformed { command: String, message: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProbeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProbeError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_names_command() {
        let err = ProbeError::Timeout {
            command: "/usr/bin/pip --version".to_string(),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(err.to_string(), "timed out after 5s: /usr/bin/pip --version");
    }
}
