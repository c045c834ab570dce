//! Per-run working directory bookkeeping.
//!
//! Each run owns one directory named after the feed day, holding the
//! downloaded archive and whatever it extracts to. Creating the directory is
//! the first side-effecting step of the pipeline and doubles as the
//! repeat-run guard: if it already exists the run aborts before anything is
//! downloaded.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::{IoResultExt, NrdscanError, Result};

/// Run context owning the dated working directory and the artifact paths
/// inside it. The matcher never touches this; only the pipeline does.
#[derive(Debug)]
pub struct Workdir {
    stamp: String,
    path: PathBuf,
}

impl Workdir {
    /// Create `<root>/<stamp>`, creating `root` itself if needed.
    ///
    /// Fails with [`NrdscanError::WorkdirExists`] when the dated directory is
    /// already present from an earlier run.
    pub fn create(root: &Path, stamp: &str) -> Result<Self> {
        fs::create_dir_all(root).with_path(root.to_string_lossy(), "create directory")?;

        let path = root.join(stamp);
        match fs::create_dir(&path) {
            Ok(()) => Ok(Self {
                stamp: stamp.to_string(),
                path,
            }),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(NrdscanError::workdir_exists(path.to_string_lossy()))
            }
            Err(e) => Err(NrdscanError::io(
                path.to_string_lossy(),
                "create directory",
                e,
            )),
        }
    }

    /// The feed day this directory belongs to, `YYYY-MM-DD`.
    pub fn stamp(&self) -> &str {
        &self.stamp
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the downloaded feed archive lands.
    pub fn archive_path(&self) -> PathBuf {
        self.path.join(format!("{}.zip", self.stamp))
    }

    /// Remove the run artifacts and then the directory itself.
    ///
    /// Failures come back as warnings rather than errors: results were
    /// already delivered by the time cleanup runs. The directory goes away
    /// via `remove_dir`, so files this run did not create block the removal
    /// instead of being destroyed.
    pub fn cleanup(&self, extracted_list: &Path) -> Vec<String> {
        let mut warnings = Vec::new();

        for file in [self.archive_path(), extracted_list.to_path_buf()] {
            if let Err(e) = fs::remove_file(&file) {
                warnings.push(format!("could not remove {}: {}", file.display(), e));
            }
        }

        if let Err(e) = fs::remove_dir(&self.path) {
            warnings.push(format!("could not remove {}: {}", self.path.display(), e));
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_dated_directory() {
        let root = tempdir().unwrap();
        let workdir = Workdir::create(root.path(), "2024-01-02").unwrap();

        assert!(workdir.path().is_dir());
        assert_eq!(workdir.stamp(), "2024-01-02");
        assert!(workdir
            .archive_path()
            .to_string_lossy()
            .ends_with("2024-01-02.zip"));
    }

    #[test]
    fn creates_missing_root() {
        let root = tempdir().unwrap();
        let nested = root.path().join("scans/daily");
        let workdir = Workdir::create(&nested, "2024-01-02").unwrap();
        assert!(workdir.path().is_dir());
    }

    #[test]
    fn repeat_run_aborts() {
        let root = tempdir().unwrap();
        Workdir::create(root.path(), "2024-01-02").unwrap();

        let err = Workdir::create(root.path(), "2024-01-02").unwrap_err();
        assert!(matches!(err, NrdscanError::WorkdirExists { .. }));
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn cleanup_removes_artifacts_and_directory() {
        let root = tempdir().unwrap();
        let workdir = Workdir::create(root.path(), "2024-01-02").unwrap();
        let list = workdir.path().join("domain-names.txt");
        fs::write(workdir.archive_path(), b"zip").unwrap();
        fs::write(&list, b"example.com\n").unwrap();

        let warnings = workdir.cleanup(&list);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert!(!workdir.path().exists());
    }

    #[test]
    fn cleanup_leaves_foreign_files_in_place() {
        let root = tempdir().unwrap();
        let workdir = Workdir::create(root.path(), "2024-01-02").unwrap();
        let list = workdir.path().join("domain-names.txt");
        fs::write(workdir.archive_path(), b"zip").unwrap();
        fs::write(&list, b"example.com\n").unwrap();
        let foreign = workdir.path().join("notes.txt");
        fs::write(&foreign, b"keep me").unwrap();

        let warnings = workdir.cleanup(&list);
        assert!(!warnings.is_empty());
        assert!(foreign.exists());
        assert!(workdir.path().exists());
    }
}
