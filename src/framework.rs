//! Framework version resolution: inspect a project descriptor file and, when
//! the declared target framework is recognized, produce a transform rule
//! pinning the matching SDK version.
//!
//! Every failure mode here — no project file, several candidates, unreadable
//! file, property indirection instead of a literal framework token, an
//! unrecognized token — degrades silently to "no pin". A missing pin is an
//! acceptable outcome of provisioning, never a failure.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::transform::TransformRule;
use crate::types::DOTNET_VERSION_PLACEHOLDER;

/// Target-framework token → pinned SDK version.
static SDK_PINS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("netcoreapp3.1", "3.1.417"),
        ("net5.0", "5.0.406"),
        ("net6.0", "6.0.201"),
    ])
});

/// Raw `<TargetFramework>` extraction. No MSBuild evaluation: a project that
/// routes the value through a property yields no match here, by design.
static TARGET_FRAMEWORK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<TargetFramework>\s*([^<\s]+)\s*</TargetFramework>")
        .expect("target framework pattern is valid")
});

/// Resolve an optional version-pin rule for the project under `project_root`.
///
/// Returns `Some` only when exactly one `.csproj` exists directly under the
/// root, it declares a literal target framework, and that framework is in the
/// pin table.
pub async fn resolve(project_root: &Path) -> Option<TransformRule> {
    let project_file = locate_project_file(project_root).await?;

    let content = match tokio::fs::read_to_string(&project_file).await {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %project_file.display(), error = %e, "project file unreadable, skipping version pin");
            return None;
        }
    };

    let token = TARGET_FRAMEWORK
        .captures(&content)
        .map(|caps| caps[1].to_owned())?;

    pin_for_framework(&token)
}

/// Map a raw framework token to a pin rule via the static table.
pub fn pin_for_framework(token: &str) -> Option<TransformRule> {
    match SDK_PINS.get(token) {
        Some(version) => Some(TransformRule::literal(
            DOTNET_VERSION_PLACEHOLDER,
            format!("DOTNET_VERSION: '{}'", version),
        )),
        None => {
            debug!(%token, "no SDK pin for target framework");
            None
        }
    }
}

/// Find the project descriptor under `root`. Policy: exactly one `.csproj`
/// directly under the root, or nothing — ambiguity is not guessed at.
async fn locate_project_file(root: &Path) -> Option<PathBuf> {
    let mut rd = match tokio::fs::read_dir(root).await {
        Ok(rd) => rd,
        Err(_) => return None,
    };

    let mut found: Option<PathBuf> = None;
    while let Ok(Some(entry)) = rd.next_entry().await {
        let path = entry.path();
        let extension = path.extension().and_then(|s| s.to_str());
        if extension.map(|s| s.eq_ignore_ascii_case("csproj")) != Some(true) {
            continue;
        }
        if found.is_some() {
            debug!(root = %root.display(), "multiple project files, skipping version pin");
            return None;
        }
        found = Some(path);
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_project(dir: &Path, name: &str, framework: &str) {
        let body = format!(
            "<Project Sdk=\"Microsoft.NET.Sdk.Web\">\n  <PropertyGroup>\n    <TargetFramework>{}</TargetFramework>\n  </PropertyGroup>\n</Project>\n",
            framework
        );
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_known_framework_produces_pin() {
        let rule = pin_for_framework("net6.0").unwrap();
        assert_eq!(
            rule.pattern.replace("DOTNET_VERSION: '5'", rule.replacement.as_str()),
            "DOTNET_VERSION: '6.0.201'"
        );
    }

    #[test]
    fn test_unknown_framework_produces_no_pin() {
        assert!(pin_for_framework("net7.0").is_none());
    }

    #[tokio::test]
    async fn test_resolve_single_project_file() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path(), "app.csproj", "net5.0");

        let rule = resolve(dir.path()).await.unwrap();
        assert_eq!(rule.replacement, "DOTNET_VERSION: '5.0.406'");
    }

    #[tokio::test]
    async fn test_resolve_no_project_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve(dir.path()).await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_ambiguous_project_files() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path(), "a.csproj", "net5.0");
        write_project(dir.path(), "b.csproj", "net6.0");

        assert!(resolve(dir.path()).await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_property_indirection_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path(), "app.csproj", "$(AppTargetFramework)");

        assert!(resolve(dir.path()).await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_missing_root_yields_none() {
        assert!(resolve(Path::new("/nonexistent/project/root")).await.is_none());
    }
}
