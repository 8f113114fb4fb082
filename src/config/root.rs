//! Project root discovery.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use derive_more::Display;
use log::debug;

pub const VCS_MARKER: &str = ".git";

/// Files that mark the top of a project when no repository is found.
pub const MANIFEST_FILES: &[&str] = &["package.json", "Cargo.toml", "pyproject.toml", "go.mod"];

/// Conventional monorepo container directories.
const WORKSPACE_DIRS: &[&str] = &["packages", "apps", "crates"];

/// What identified the project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RootMarker {
    #[display("git repository")]
    Git,
    #[display("package manifest")]
    Manifest,
    #[display("filesystem root")]
    Filesystem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    pub path: PathBuf,
    pub marker: RootMarker,
    pub is_monorepo: bool,
    pub subprojects: Vec<PathBuf>,
}

/// Walks upward from `start` to the nearest repository or manifest root.
///
/// A repository marker wins over manifests at every level. When neither is
/// found the filesystem root is returned.
pub fn discover(start: &Path) -> io::Result<ProjectRoot> {
    let start = start.canonicalize()?;
    let start = if start.is_file() {
        start.parent().map_or_else(|| start.clone(), Path::to_path_buf)
    } else {
        start
    };

    for dir in start.ancestors() {
        if dir.join(VCS_MARKER).exists() {
            return Ok(project_root(dir, RootMarker::Git));
        }
        if has_manifest(dir) {
            return Ok(project_root(dir, RootMarker::Manifest));
        }
    }

    let top = start.ancestors().last().unwrap_or(start.as_path()).to_path_buf();
    debug!("No project marker above {}, using {}", start.display(), top.display());
    Ok(ProjectRoot {
        path: top,
        marker: RootMarker::Filesystem,
        is_monorepo: false,
        subprojects: Vec::new(),
    })
}

fn project_root(dir: &Path, marker: RootMarker) -> ProjectRoot {
    let subprojects = find_subprojects(dir);
    let is_monorepo = declares_workspace(dir) || !subprojects.is_empty();
    debug!(
        "Project root {} ({marker}), monorepo: {is_monorepo}",
        dir.display()
    );
    ProjectRoot {
        path: dir.to_path_buf(),
        marker,
        is_monorepo,
        subprojects,
    }
}

fn has_manifest(dir: &Path) -> bool {
    MANIFEST_FILES.iter().any(|name| dir.join(name).is_file())
}

/// Whether a manifest at `dir` declares workspace members.
fn declares_workspace(dir: &Path) -> bool {
    if dir.join("pnpm-workspace.yaml").is_file() || dir.join("lerna.json").is_file() {
        return true;
    }

    let package_json = fs::read_to_string(dir.join("package.json"))
        .ok()
        .and_then(|text| serde_json::from_str::<serde_json::Value>(&text).ok())
        .is_some_and(|value| value.get("workspaces").is_some());
    if package_json {
        return true;
    }

    fs::read_to_string(dir.join("Cargo.toml"))
        .ok()
        .and_then(|text| toml::from_str::<toml::Table>(&text).ok())
        .is_some_and(|table| table.contains_key("workspace"))
}

fn find_subprojects(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for container in WORKSPACE_DIRS {
        let Ok(entries) = fs::read_dir(dir.join(container)) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() && has_manifest(&path) {
                found.push(path);
            }
        }
    }
    found.sort();
    found
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_git_root_wins_over_nested_manifest() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir(root.join(".git")).unwrap();
        let nested = root.join("tools/cli");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.join("tools/package.json"), "{}").unwrap();

        // The manifest in `tools` is closer, so it is found first.
        let found = discover(&nested).unwrap();
        assert_eq!(found.path, root.join("tools"));
        assert_eq!(found.marker, RootMarker::Manifest);

        fs::remove_file(root.join("tools/package.json")).unwrap();
        let found = discover(&nested).unwrap();
        assert_eq!(found.path, root);
        assert_eq!(found.marker, RootMarker::Git);
    }

    #[test]
    fn test_git_marker_beats_manifest_in_same_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join("Cargo.toml"), "[package]\n").unwrap();

        let found = discover(&root).unwrap();
        assert_eq!(found.marker, RootMarker::Git);
        assert!(!found.is_monorepo);
    }

    #[test]
    fn test_file_start_uses_parent() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::write(root.join("go.mod"), "module x\n").unwrap();
        fs::write(root.join("main.go"), "").unwrap();

        let found = discover(&root.join("main.go")).unwrap();
        assert_eq!(found.path, root);
    }

    #[test]
    fn test_monorepo_detection() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::write(root.join("package.json"), r#"{"workspaces": ["packages/*"]}"#).unwrap();
        fs::create_dir_all(root.join("packages/web")).unwrap();
        fs::write(root.join("packages/web/package.json"), "{}").unwrap();
        fs::create_dir_all(root.join("packages/notes")).unwrap();

        let found = discover(&root).unwrap();
        assert!(found.is_monorepo);
        assert_eq!(found.subprojects, vec![root.join("packages/web")]);
    }

    #[test]
    fn test_cargo_workspace_is_monorepo() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::write(root.join("Cargo.toml"), "[workspace]\nmembers = []\n").unwrap();

        assert!(discover(&root).unwrap().is_monorepo);
    }

    #[test]
    fn test_cargo_workspace_header_variants_are_monorepos() {
        for manifest in [
            "[workspace] # members below\nmembers = [\"a\"]\n",
            "[ workspace ]\nmembers = []\n",
            "workspace.members = [\"crates/*\"]\n",
        ] {
            let dir = TempDir::new().unwrap();
            let root = dir.path().canonicalize().unwrap();
            fs::write(root.join("Cargo.toml"), manifest).unwrap();

            assert!(discover(&root).unwrap().is_monorepo, "{manifest}");
        }
    }

    #[test]
    fn test_plain_or_broken_cargo_manifest_is_not_a_monorepo() {
        for manifest in ["[package]\nname = \"app\"\n", "[workspace\n"] {
            let dir = TempDir::new().unwrap();
            let root = dir.path().canonicalize().unwrap();
            fs::write(root.join("Cargo.toml"), manifest).unwrap();

            assert!(!discover(&root).unwrap().is_monorepo, "{manifest}");
        }
    }

    #[test]
    fn test_missing_start_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(discover(&dir.path().join("nope")).is_err());
    }
}
