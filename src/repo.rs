use std::path::{Path, PathBuf};

use git2::Repository;

use crate::error::{AppError, Result};

pub const MERGE_HEAD: &str = "MERGE_HEAD";
pub const REBASE_APPLY: &str = "rebase-apply";

/// Location of a repository's metadata directory (usually `.git`).
///
/// The in-progress checks read marker files fresh on every call; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContext {
    git_dir: PathBuf,
}

impl RepoContext {
    pub fn new(git_dir: impl Into<PathBuf>) -> Self {
        Self {
            git_dir: git_dir.into(),
        }
    }

    /// Find the metadata directory for the repository containing `path`.
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)?;
        let git_dir = repo.path().to_path_buf();
        tracing::debug!(path = %path.display(), git_dir = %git_dir.display(), "Discovered repository");
        Ok(Self { git_dir })
    }

    /// [`RepoContext::discover`] on the blocking pool, for async callers.
    pub async fn locate(path: &Path) -> Result<Self> {
        let path = path.to_path_buf();

        tokio::task::spawn_blocking(move || Self::discover(&path))
            .await
            .map_err(|e| AppError::Repository(format!("Discovery task panicked: {e}")))?
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    pub fn merge_in_progress(&self) -> bool {
        self.git_dir.join(MERGE_HEAD).exists()
    }

    pub fn rebase_in_progress(&self) -> bool {
        self.git_dir.join(REBASE_APPLY).exists()
    }
}
