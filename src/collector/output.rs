//! Session output directory.

use std::path::{Path, PathBuf};

use log::info;

use crate::config::VERBOSE_LOG_FILE;
use crate::error_handling::PersistError;
use crate::filter::FilterMode;
use crate::identity::sanitize_filename_part;
use crate::ledger::Decision;

/// Directory name used when the target has no usable host.
const UNKNOWN_DOMAIN_DIR: &str = "unknown";

/// `output_root/<domain>/<filter-mode>/`, where one session writes its assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    pub fn for_session(root: &Path, domain: &str, mode: FilterMode) -> Self {
        let mut domain_dir = sanitize_filename_part(domain);
        if domain_dir.is_empty() {
            domain_dir = UNKNOWN_DOMAIN_DIR.to_string();
        }
        Self {
            path: root.join(domain_dir).join(mode.as_str()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the directory, removing what was there first if `clear` is set.
    ///
    /// On Unix the leaf directory is restricted to its owner (0700).
    pub async fn prepare(&self, clear: bool) -> std::io::Result<()> {
        if clear && tokio::fs::try_exists(&self.path).await? {
            tokio::fs::remove_dir_all(&self.path).await?;
            info!("🗑 Cleared output directory: {}", self.path.display());
        }
        tokio::fs::create_dir_all(&self.path).await?;
        restrict_permissions(&self.path).await?;
        info!("📂 Saving JS files to: {}/", self.path.display());
        Ok(())
    }

    /// Writes `bytes` to `filename` inside the directory, replacing any file
    /// of the same name.
    pub async fn persist(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, PersistError> {
        let path = self.path.join(filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| PersistError {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }

    /// Writes the decision log (saves, skips and errors), one line per
    /// entry, to `verbose.log`.
    pub async fn write_verbose_log(&self, decisions: &[Decision]) -> Result<PathBuf, PersistError> {
        let mut contents = String::new();
        for decision in decisions {
            contents.push_str(&decision.to_string());
            contents.push('\n');
        }
        self.persist(VERBOSE_LOG_FILE, contents.as_bytes()).await
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700)).await
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{DecisionKind, SkipReason};
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_for_session_layout() {
        let dir = OutputDir::for_session(Path::new("out"), "example.com", FilterMode::Relaxed);
        assert_eq!(dir.path(), Path::new("out/example.com/relaxed"));

        let dir = OutputDir::for_session(Path::new("out"), "", FilterMode::Strict);
        assert_eq!(dir.path(), Path::new("out/unknown/strict"));
    }

    #[tokio::test]
    async fn test_prepare_and_persist() {
        let root = TempDir::new().expect("temp dir");
        let dir = OutputDir::for_session(root.path(), "example.com", FilterMode::Strict);
        dir.prepare(false).await.expect("prepare");

        let path = dir.persist("a.js", b"console.log(1)").await.expect("persist");
        assert_eq!(std::fs::read(&path).expect("read back"), b"console.log(1)");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(dir.path()).expect("metadata").permissions().mode();
            assert_eq!(mode & 0o777, 0o700);
        }
    }

    #[tokio::test]
    async fn test_prepare_clear_removes_previous_files() {
        let root = TempDir::new().expect("temp dir");
        let dir = OutputDir::for_session(root.path(), "example.com", FilterMode::Strict);
        dir.prepare(false).await.expect("prepare");
        dir.persist("old.js", b"old").await.expect("persist");

        dir.prepare(false).await.expect("prepare again");
        assert!(dir.path().join("old.js").exists());

        dir.prepare(true).await.expect("prepare with clear");
        assert!(!dir.path().join("old.js").exists());
        assert!(dir.path().is_dir());
    }

    #[tokio::test]
    async fn test_persist_into_missing_directory_fails() {
        let root = TempDir::new().expect("temp dir");
        let dir = OutputDir::for_session(root.path(), "example.com", FilterMode::Strict);
        let err = dir.persist("a.js", b"x").await.expect_err("directory was never created");
        assert!(err.path.ends_with("a.js"));
    }

    #[tokio::test]
    async fn test_write_verbose_log() {
        let root = TempDir::new().expect("temp dir");
        let dir = OutputDir::for_session(root.path(), "example.com", FilterMode::Strict);
        dir.prepare(false).await.expect("prepare");

        let decisions = vec![
            Decision {
                at: Utc::now(),
                kind: DecisionKind::Saved {
                    filename: "example.com_app_0123abcd.js".into(),
                },
                source: "https://example.com/app.js".into(),
            },
            Decision {
                at: Utc::now(),
                kind: DecisionKind::Skipped(SkipReason::TooSmall),
                source: "inline:example.com".into(),
            },
        ];
        let path = dir.write_verbose_log(&decisions).await.expect("write log");
        let contents = std::fs::read_to_string(path).expect("read log");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("SAVED - example.com_app_0123abcd.js"));
        assert!(lines[1].contains("SKIPPED (small) - inline:example.com"));
    }
}
