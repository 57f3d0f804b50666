//! Package providers
//!
//! A provider is a filtered view over a dependency registry that is
//! evaluated when asked, never when built. Manifest synthesizers hold one
//! and pull from it during synthesis, so declarations made after the
//! synthesizer was constructed still reach the manifest.

use crate::dependencies::{Dependencies, Dependency, DependencyType};

/// Source of the packages a manifest lists
pub trait PackageProvider {
    /// The matching dependencies at the moment of the call, in
    /// declaration order.
    fn packages(&self) -> Vec<Dependency>;
}

/// Provider selecting every dependency of one [`DependencyType`]
#[derive(Debug, Clone)]
pub struct TypedPackageProvider {
    deps: Dependencies,
    kind: DependencyType,
}

impl TypedPackageProvider {
    pub fn new(deps: Dependencies, kind: DependencyType) -> Self {
        Self { deps, kind }
    }

    /// Runtime dependencies of the registry.
    pub fn runtime(deps: Dependencies) -> Self {
        Self::new(deps, DependencyType::Runtime)
    }

    /// Development-environment dependencies of the registry.
    pub fn devenv(deps: Dependencies) -> Self {
        Self::new(deps, DependencyType::Devenv)
    }

    pub fn kind(&self) -> DependencyType {
        self.kind
    }
}

impl PackageProvider for TypedPackageProvider {
    fn packages(&self) -> Vec<Dependency> {
        self.deps.of_type(self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_sees_later_declarations() {
        let deps = Dependencies::new();
        let provider = TypedPackageProvider::runtime(deps.clone());
        assert!(provider.packages().is_empty());

        deps.add_dependency("requests@^2.0", DependencyType::Runtime)
            .unwrap();

        let names: Vec<_> = provider
            .packages()
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        assert_eq!(names, vec!["requests"]);
    }

    #[test]
    fn provider_is_usable_as_trait_object() {
        let deps = Dependencies::new();
        deps.add_dependency("pytest", DependencyType::Devenv).unwrap();
        let provider: Box<dyn PackageProvider> = Box::new(TypedPackageProvider::devenv(deps));
        assert_eq!(provider.packages().len(), 1);
    }
}
