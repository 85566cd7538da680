use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipBinary {
    pub name: String,
    pub path: String,
    pub pip_version: Option<String>,
    pub python_version: Option<String>,
    pub shebang_python: Option<String>,
}

impl PipBinary {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            pip_version: None,
            python_version: None,
            shebang_python: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipInfo {
    pub binaries: Vec<PipBinary>,
    pub mismatches: Vec<String>,
}

impl PipInfo {
    pub fn from_binaries(binaries: Vec<PipBinary>, current_major_minor: Option<&str>) -> Self {
        let mismatches = match current_major_minor {
            Some(current) => binaries
                .iter()
                .filter_map(|b| {
                    let found = b.python_version.as_deref()?;
                    (found != current)
                        .then(|| format!("{} -> Python {found} (current {current})", b.name))
                })
                .collect(),
            None => Vec::new(),
        };
        Self {
            binaries,
            mismatches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary(name: &str, python_version: Option<&str>) -> PipBinary {
        PipBinary {
            python_version: python_version.map(str::to_string),
            ..PipBinary::new(name, format!("/usr/bin/{name}"))
        }
    }

    #[test]
    fn mismatch_names_both_versions() {
        let info = PipInfo::from_binaries(vec![binary("pip", Some("3.11"))], Some("3.12"));
        assert_eq!(info.mismatches, vec!["pip -> Python 3.11 (current 3.12)"]);
    }

    #[test]
    fn matching_and_unparsed_binaries_are_not_mismatches() {
        let info = PipInfo::from_binaries(
            vec![
                binary("pip", Some("3.12")),
                binary("pip3", None),
                binary("pip3.12", Some("3.10")),
            ],
            Some("3.12"),
        );
        assert_eq!(info.binaries.len(), 3);
        assert_eq!(
            info.mismatches,
            vec!["pip3.12 -> Python 3.10 (current 3.12)"]
        );
    }

    #[test]
    fn unknown_runtime_version_yields_no_mismatches() {
        let info = PipInfo::from_binaries(vec![binary("pip", Some("3.11"))], None);
        assert!(info.mismatches.is_empty());
    }
}
