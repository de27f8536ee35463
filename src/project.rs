//! Project records.
//!
//! Projects are named containers that tasks refer to by a copied name. They
//! are created once and never renamed or removed.

use serde::{Deserialize, Serialize};

/// A named work site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    #[serde(alias = "nome")]
    pub name: String,
}

impl Project {
    pub(crate) fn new(id: u64, name: &str) -> Self {
        Project {
            id,
            name: name.trim().to_string(),
        }
    }
}

/// Normalise a user-supplied project name. Returns `None` when nothing is left
/// after trimming.
pub fn normalise_project_name(name: &str) -> Option<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_project_name() {
        assert_eq!(normalise_project_name("  Cantiere A "), Some("Cantiere A"));
        assert_eq!(normalise_project_name("Via Roma"), Some("Via Roma"));
        assert_eq!(normalise_project_name("   "), None);
        assert_eq!(normalise_project_name(""), None);
        assert_eq!(normalise_project_name("\t\n"), None);
    }

    #[test]
    fn new_trims_name() {
        let p = Project::new(4, "  Ponte  ");
        assert_eq!(p, Project { id: 4, name: "Ponte".into() });
    }

    #[test]
    fn accepts_legacy_name_field() {
        let p: Project = serde_json::from_str(r#"{"id":1,"nome":"Cantiere B"}"#).unwrap();
        assert_eq!(p.name, "Cantiere B");
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"{"id":1,"name":"Cantiere B"}"#);
    }
}
