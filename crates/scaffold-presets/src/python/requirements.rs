//! pip requirements file synthesizer

use scaffold_core::{
    Component, ComponentTree, Dependency, NodeId, PackageProvider, Project, Result, SynthContext,
};

/// Options for [`RequirementsFile::new`]
pub struct RequirementsFileOptions {
    /// Where the listed packages come from, evaluated at synthesis time
    pub package_provider: Box<dyn PackageProvider>,
}

/// A requirements file listing one package per line.
///
/// Bound to a single provider and a single file name for its whole life.
/// Each synthesis pulls the provider's current packages and overwrites the
/// file under the enclosing project's outdir.
pub struct RequirementsFile {
    file_name: String,
    provider: Box<dyn PackageProvider>,
}

impl RequirementsFile {
    /// Attach a requirements file under `scope`.
    ///
    /// # Errors
    ///
    /// Fails if `scope` has no enclosing project, or a sibling already uses
    /// `file_name`.
    pub fn new(
        tree: &mut ComponentTree,
        scope: NodeId,
        file_name: impl Into<String>,
        options: RequirementsFileOptions,
    ) -> Result<NodeId> {
        Project::of(tree, scope)?;
        let file_name = file_name.into();
        let file = Self {
            file_name: file_name.clone(),
            provider: options.package_provider,
        };
        tree.add(scope, file_name, file)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The file content for the provider's current packages.
    pub fn render(&self) -> String {
        let mut content = String::new();
        for dep in self.provider.packages() {
            content.push_str(&format_requirement(&dep));
            content.push('\n');
        }
        content
    }
}

impl Component for RequirementsFile {
    fn synthesize(&self, ctx: &SynthContext<'_>) -> Result<()> {
        ctx.write_text(&self.file_name, &self.render())?;
        Ok(())
    }
}

/// Render a dependency as a requirements line.
///
/// - unconstrained: `name`
/// - caret or tilde range (`^2.0`, `~1.4`): rewritten as a PEP 440 range
/// - other operator-led requirement (`>=2.0`, `~=1.4`, ...): appended verbatim
/// - bare version: pinned with `==`
pub fn format_requirement(dep: &Dependency) -> String {
    if dep.is_unconstrained() {
        return dep.name().to_string();
    }

    let requirement = dep.requirement();
    if let Some(range) = pep440_range(requirement) {
        return format!("{}{}", dep.name(), range);
    }

    let operator_led = requirement
        .chars()
        .next()
        .is_some_and(|c| matches!(c, '=' | '<' | '>' | '~' | '!' | '^'));
    if operator_led {
        format!("{}{}", dep.name(), requirement)
    } else {
        format!("{}=={}", dep.name(), requirement)
    }
}

/// `^X.Y.Z` and `~X.Y.Z` as `>=X.Y.Z,<upper`.
///
/// Returns `None` for anything else, including `~=` and versions with
/// non-numeric segments, which are then passed through unchanged.
fn pep440_range(requirement: &str) -> Option<String> {
    let (caret, version) = if let Some(version) = requirement.strip_prefix('^') {
        (true, version)
    } else if let Some(version) = requirement.strip_prefix('~') {
        if version.starts_with('=') {
            return None;
        }
        (false, version)
    } else {
        return None;
    };

    let version = version.trim();
    let parts = version
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;

    // Index of the segment that is bumped for the exclusive upper bound.
    let bump = if caret {
        parts
            .iter()
            .position(|&part| part != 0)
            .unwrap_or(parts.len() - 1)
    } else {
        parts.len().min(2) - 1
    };

    let mut upper = parts[..=bump].to_vec();
    upper[bump] += 1;
    let upper = upper
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(".");
    Some(format!(">={version},<{upper}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffold_core::DependencyType;

    fn dep(spec: &str) -> Dependency {
        Dependency::parse(spec, DependencyType::Runtime).unwrap()
    }

    #[test]
    fn unconstrained_is_bare_name() {
        assert_eq!(format_requirement(&dep("pytest@*")), "pytest");
        assert_eq!(format_requirement(&dep("pytest")), "pytest");
    }

    #[test]
    fn operator_requirement_is_verbatim() {
        assert_eq!(format_requirement(&dep("flask@>=3.0,<4")), "flask>=3.0,<4");
        assert_eq!(format_requirement(&dep("black@~=24.1")), "black~=24.1");
    }

    #[test]
    fn caret_becomes_pep440_range() {
        assert_eq!(format_requirement(&dep("requests@^2.0")), "requests>=2.0,<3");
        assert_eq!(format_requirement(&dep("attrs@^0.2.3")), "attrs>=0.2.3,<0.3");
        assert_eq!(format_requirement(&dep("tiny@^0.0.3")), "tiny>=0.0.3,<0.0.4");
    }

    #[test]
    fn tilde_becomes_pep440_range() {
        assert_eq!(format_requirement(&dep("rich@~13.7.1")), "rich>=13.7.1,<13.8");
        assert_eq!(format_requirement(&dep("rich@~13")), "rich>=13,<14");
    }

    #[test]
    fn unparseable_range_is_verbatim() {
        assert_eq!(format_requirement(&dep("pkg@^2.0rc1")), "pkg^2.0rc1");
    }

    #[test]
    fn bare_version_is_pinned() {
        assert_eq!(format_requirement(&dep("requests@2.31.0")), "requests==2.31.0");
    }
}
