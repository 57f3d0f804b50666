//! Error types for scaffold-presets

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] scaffold_core::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] scaffold_fs::Error),

    #[error("Expected a {kind} component at {path}")]
    ComponentMissing { kind: &'static str, path: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_display_transparently() {
        let err = Error::from(scaffold_core::Error::DuplicateTask {
            name: "install".to_string(),
        });
        assert_eq!(err.to_string(), "Duplicate task: install");
    }

    #[test]
    fn component_missing_display() {
        let err = Error::ComponentMissing {
            kind: "Pip",
            path: "app/Pip".to_string(),
        };
        assert!(err.to_string().contains("app/Pip"));
    }
}
