//! Scratch site directories, one per trial.
//!
//! A [`SiteWorkspace`] owns a temporary directory for as long as it lives and
//! removes it when dropped, so a trial that fails, panics or times out still
//! leaves nothing behind. The process working directory is never changed;
//! callers pass [`SiteWorkspace::root`] explicitly.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;

/// Directories a Hugo site expects, relative to the site root.
pub const SCAFFOLD_DIRS: &[&str] = &["data", "content", "static", "assets/images/logos"];

/// Where copied theme assets land, relative to the site root.
pub const THEMES_DIR: &str = "themes";

/// Options for creating a workspace.
#[derive(Debug, Clone)]
pub struct WorkspaceOptions {
    /// Theme directory copied into every workspace. A missing directory is skipped.
    pub theme_dir: Option<PathBuf>,

    /// Name prefix for the temporary directory
    pub prefix: String,
}

impl WorkspaceOptions {
    /// The configured theme directory, if it does not exist.
    pub fn missing_theme(&self) -> Option<&Path> {
        self.theme_dir.as_deref().filter(|dir| !dir.is_dir())
    }
}

impl Default for WorkspaceOptions {
    fn default() -> Self {
        Self {
            theme_dir: Some(PathBuf::from(THEMES_DIR)),
            prefix: "webstack_fidelity_".to_string(),
        }
    }
}

/// Errors that can occur while preparing or removing a workspace.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    #[error("Failed to create scratch directory: {0}")]
    CreateError(String),

    #[error("Failed to copy theme from {path}: {message}")]
    CopyError { path: String, message: String },

    #[error("Failed to create site directory {path}: {message}")]
    ScaffoldError { path: String, message: String },

    #[error("Failed to remove scratch directory: {0}")]
    CleanupError(String),
}

/// A temporary site root seeded with theme assets and the directory skeleton.
#[derive(Debug)]
pub struct SiteWorkspace {
    dir: TempDir,
}

impl SiteWorkspace {
    /// Create a fresh workspace.
    pub fn setup(options: &WorkspaceOptions) -> Result<Self, EnvironmentError> {
        let dir = tempfile::Builder::new()
            .prefix(&options.prefix)
            .tempdir()
            .map_err(|e| EnvironmentError::CreateError(e.to_string()))?;

        // Dropping `workspace` on any error below removes the directory
        let workspace = Self { dir };

        if let Some(theme_dir) = &options.theme_dir {
            workspace.copy_theme(theme_dir)?;
        }
        workspace.scaffold()?;

        tracing::debug!("Prepared workspace {}", workspace.root().display());

        Ok(workspace)
    }

    /// Site root of this workspace.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the workspace and everything written into it.
    pub fn teardown(self) -> Result<(), EnvironmentError> {
        let root = self.root().to_path_buf();
        self.dir
            .close()
            .map_err(|e| EnvironmentError::CleanupError(e.to_string()))?;
        tracing::debug!("Removed workspace {}", root.display());
        Ok(())
    }

    /// Copy `source` verbatim into `<root>/themes`.
    fn copy_theme(&self, source: &Path) -> Result<(), EnvironmentError> {
        if !source.is_dir() {
            tracing::debug!("Skipping missing theme directory {}", source.display());
            return Ok(());
        }

        let target_root = self.root().join(THEMES_DIR);
        let to_error = |message: String| EnvironmentError::CopyError {
            path: source.display().to_string(),
            message,
        };

        let mut files = 0;
        for entry in WalkDir::new(source).follow_links(true) {
            let entry = entry.map_err(|e| to_error(e.to_string()))?;
            let relative = entry
                .path()
                .strip_prefix(source)
                .map_err(|e| to_error(e.to_string()))?;
            let target = target_root.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).map_err(|e| to_error(e.to_string()))?;
            } else {
                fs::copy(entry.path(), &target).map_err(|e| to_error(e.to_string()))?;
                files += 1;
            }
        }

        tracing::debug!("Copied {} theme files from {}", files, source.display());
        Ok(())
    }

    fn scaffold(&self) -> Result<(), EnvironmentError> {
        for dir in SCAFFOLD_DIRS {
            let path = self.root().join(dir);
            fs::create_dir_all(&path).map_err(|e| EnvironmentError::ScaffoldError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::panic::{self, AssertUnwindSafe};
    use tempfile::tempdir;

    fn no_theme() -> WorkspaceOptions {
        WorkspaceOptions {
            theme_dir: None,
            ..Default::default()
        }
    }

    #[test]
    fn creates_site_skeleton() {
        let workspace = SiteWorkspace::setup(&no_theme()).unwrap();

        for dir in SCAFFOLD_DIRS {
            assert!(workspace.root().join(dir).is_dir(), "missing {dir}");
        }
        assert!(!workspace.root().join(THEMES_DIR).exists());
    }

    #[test]
    fn copies_theme_verbatim() {
        let source = tempdir().unwrap();
        let layouts = source.path().join("WebStack-Hugo").join("layouts");
        fs::create_dir_all(&layouts).unwrap();
        fs::write(layouts.join("index.html"), "<h1>{{ .Site.Title }}</h1>").unwrap();

        let workspace = SiteWorkspace::setup(&WorkspaceOptions {
            theme_dir: Some(source.path().to_path_buf()),
            ..Default::default()
        })
        .unwrap();

        let copied = workspace
            .root()
            .join("themes/WebStack-Hugo/layouts/index.html");
        assert_eq!(
            fs::read_to_string(copied).unwrap(),
            "<h1>{{ .Site.Title }}</h1>"
        );
    }

    #[test]
    fn tolerates_missing_theme() {
        let workspace = SiteWorkspace::setup(&WorkspaceOptions {
            theme_dir: Some(PathBuf::from("/nonexistent/webstack/themes")),
            ..Default::default()
        })
        .unwrap();

        assert!(workspace.root().join("data").is_dir());
        assert!(!workspace.root().join(THEMES_DIR).exists());
    }

    #[test]
    fn reports_missing_theme_only_when_absent() {
        let theme = tempdir().unwrap();
        let present = WorkspaceOptions {
            theme_dir: Some(theme.path().to_path_buf()),
            ..Default::default()
        };
        let absent = WorkspaceOptions {
            theme_dir: Some(PathBuf::from("/nonexistent/webstack/themes")),
            ..Default::default()
        };

        assert_eq!(present.missing_theme(), None);
        assert_eq!(
            absent.missing_theme(),
            Some(Path::new("/nonexistent/webstack/themes"))
        );
        assert_eq!(no_theme().missing_theme(), None);
    }

    #[test]
    fn teardown_removes_build_output() {
        let original = env::current_dir().unwrap();
        let workspace = SiteWorkspace::setup(&no_theme()).unwrap();
        let root = workspace.root().to_path_buf();
        fs::create_dir_all(root.join("public")).unwrap();
        fs::write(root.join("public/index.html"), "<html></html>").unwrap();

        workspace.teardown().unwrap();

        assert!(!root.exists());
        assert_eq!(env::current_dir().unwrap(), original);
    }

    #[test]
    fn drop_cleans_up_after_panic() {
        let mut seen = None;

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let workspace = SiteWorkspace::setup(&no_theme()).unwrap();
            seen = Some(workspace.root().to_path_buf());
            panic!("trial failed");
        }));

        assert!(result.is_err());
        let root = seen.unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn workspaces_are_distinct() {
        let first = SiteWorkspace::setup(&no_theme()).unwrap();
        let second = SiteWorkspace::setup(&no_theme()).unwrap();

        assert_ne!(first.root(), second.root());
    }
}
