use serde::{Deserialize, Serialize};

/// Whether the declared project resolves in the runtime's module search.
///
/// Serialized as `null` / `true` / `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Importability {
    #[default]
    Unknown,
    Importable,
    NotImportable,
}

impl Importability {
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Importability::Unknown => None,
            Importability::Importable => Some(true),
            Importability::NotImportable => Some(false),
        }
    }
}

impl From<Option<bool>> for Importability {
    fn from(v: Option<bool>) -> Self {
        match v {
            None => Importability::Unknown,
            Some(true) => Importability::Importable,
            Some(false) => Importability::NotImportable,
        }
    }
}

impl From<Importability> for Option<bool> {
    fn from(v: Importability) -> Self {
        v.as_bool()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub path: String,
    pub pyproject: bool,
    pub project_name: Option<String>,
    pub package_importable: Importability,
    pub shadowing: Vec<String>,
}

impl ProjectInfo {
    pub fn import_name(&self) -> Option<String> {
        self.project_name.as_deref().map(normalize_import_name)
    }
}

pub fn normalize_import_name(name: &str) -> String {
    name.replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn importability_serializes_as_nullable_bool() {
        let cases = [
            (Importability::Unknown, serde_json::Value::Null),
            (Importability::Importable, serde_json::json!(true)),
            (Importability::NotImportable, serde_json::json!(false)),
        ];
        for (value, expected) in cases {
            assert_eq!(serde_json::to_value(value).expect("serialize"), expected);
        }
    }

    #[test]
    fn import_name_replaces_hyphens() {
        let info = ProjectInfo {
            path: "/tmp/p".to_string(),
            pyproject: true,
            project_name: Some("demo-project".to_string()),
            package_importable: Importability::Unknown,
            shadowing: vec![],
        };
        assert_eq!(info.import_name().as_deref(), Some("demo_project"));
    }
}
