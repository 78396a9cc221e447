use thiserror::Error;

/// A single data-integrity defect found while loading the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityViolation {
    DuplicateId(String),
    DuplicatePath { path: String, id: String },
    EmptyField { id: String, field: &'static str },
    RelativePath { id: String, path: String },
    UnknownOverride(String),
}

impl std::fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegrityViolation::DuplicateId(id) => write!(f, "duplicate calculator id '{}'", id),
            IntegrityViolation::DuplicatePath { path, id } => {
                write!(f, "path '{}' of '{}' is already taken", path, id)
            }
            IntegrityViolation::EmptyField { id, field } => {
                write!(f, "calculator '{}' has an empty {}", id, field)
            }
            IntegrityViolation::RelativePath { id, path } => {
                write!(f, "calculator '{}' path '{}' is not root-relative", id, path)
            }
            IntegrityViolation::UnknownOverride(id) => {
                write!(f, "SEO override for unknown calculator '{}'", id)
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("XML write failed: {0}")]
    Xml(String),

    #[error("Invalid listen address: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Catalog integrity check failed: {}", join_violations(.0))]
    Integrity(Vec<IntegrityViolation>),
}

fn join_violations(violations: &[IntegrityViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrity_error_lists_every_violation() {
        let err = CatalogError::Integrity(vec![
            IntegrityViolation::DuplicateId("ohms-law".to_string()),
            IntegrityViolation::EmptyField {
                id: "velocity".to_string(),
                field: "title",
            },
        ]);

        let message = err.to_string();
        assert!(message.contains("duplicate calculator id 'ohms-law'"));
        assert!(message.contains("calculator 'velocity' has an empty title"));
    }
}
