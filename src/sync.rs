use std::sync::Arc;

use crate::classify::{
    classify_merge, classify_push, classify_rebase, classify_rebase_continue,
    classify_rebase_skip, CommandResult,
};
use crate::error::{AppError, Result};
use crate::exec::GitExecutor;
use crate::outcome::{Outcome, Severity};
use crate::repo::RepoContext;

/// Reject refs and remotes starting with `-` so they cannot be read as
/// options by git.
fn validate_ref(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AppError::InvalidArgument(format!("Empty {kind}")));
    }
    if name.starts_with('-') {
        return Err(AppError::InvalidArgument(format!(
            "Invalid {kind} (starts with '-'): {name}"
        )));
    }
    Ok(())
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

fn report(operation: &str, outcome: Outcome) -> Outcome {
    match outcome.severity() {
        Severity::NeedsAttention => {
            tracing::warn!(operation, code = %outcome.code, "Sync needs attention");
        }
        Severity::Clean | Severity::NoOp => {
            tracing::info!(operation, code = %outcome.code, "Sync finished");
        }
    }
    outcome
}

/// Runs sync primitives against one repository and classifies the results.
///
/// Each call issues exactly one git command and waits for it. Callers must
/// not run two operations on the same working tree at once.
pub struct Syncer {
    git: Arc<dyn GitExecutor>,
    repo: RepoContext,
}

impl Syncer {
    pub fn new(git: Arc<dyn GitExecutor>, repo: RepoContext) -> Self {
        Self { git, repo }
    }

    pub fn repo(&self) -> &RepoContext {
        &self.repo
    }

    async fn run(&self, args: Vec<String>) -> Result<CommandResult> {
        self.git.execute(&args).await
    }

    /// Merge `src` into the current branch.
    pub async fn merge(&self, src: &str) -> Result<Outcome> {
        validate_ref("merge source", src)?;
        let result = self.run(argv(&["merge", src])).await?;
        Ok(report("merge", classify_merge(&result)))
    }

    /// Fetch `branch` from `remote` and merge it.
    pub async fn pull_merge(&self, remote: &str, branch: &str) -> Result<Outcome> {
        validate_ref("remote", remote)?;
        validate_ref("branch", branch)?;
        let result = self.run(argv(&["pull", remote, branch])).await?;
        Ok(report("pull", classify_merge(&result)))
    }

    /// Abort an in-progress merge. Best effort: failures are logged and
    /// dropped.
    pub async fn abort_merge(&self) {
        let _ = self.git.execute_safe(&argv(&["merge", "--abort"])).await;
    }

    pub fn merge_in_progress(&self) -> bool {
        self.repo.merge_in_progress()
    }

    /// Rebase the current branch onto `new_base`.
    pub async fn rebase(&self, new_base: &str) -> Result<Outcome> {
        validate_ref("rebase base", new_base)?;
        let result = self.run(argv(&["rebase", new_base])).await?;
        Ok(report("rebase", classify_rebase(&result)))
    }

    /// Fetch `branch` from `remote` and rebase onto it.
    pub async fn pull_rebase(&self, remote: &str, branch: &str) -> Result<Outcome> {
        validate_ref("remote", remote)?;
        validate_ref("branch", branch)?;
        let result = self.run(argv(&["pull", "--rebase", remote, branch])).await?;
        Ok(report("pull --rebase", classify_rebase(&result)))
    }

    pub async fn continue_rebase(&self) -> Result<Outcome> {
        let result = self.run(argv(&["rebase", "--continue"])).await?;
        Ok(report("rebase --continue", classify_rebase_continue(&result)))
    }

    pub async fn skip_rebase_commit(&self) -> Result<Outcome> {
        let result = self.run(argv(&["rebase", "--skip"])).await?;
        Ok(report("rebase --skip", classify_rebase_skip(&result)))
    }

    /// Abort an in-progress rebase. Best effort: failures are logged and
    /// dropped.
    pub async fn abort_rebase(&self) {
        let _ = self.git.execute_safe(&argv(&["rebase", "--abort"])).await;
    }

    pub fn rebase_in_progress(&self) -> bool {
        self.repo.rebase_in_progress()
    }

    /// Push local `src_branch` to `dst_branch` on `dst_remote`.
    pub async fn push(
        &self,
        src_branch: &str,
        dst_remote: &str,
        dst_branch: &str,
    ) -> Result<Outcome> {
        validate_ref("source branch", src_branch)?;
        validate_ref("remote", dst_remote)?;
        validate_ref("destination branch", dst_branch)?;
        let refspec = format!("{src_branch}:{dst_branch}");
        let result = self.run(argv(&["push", dst_remote, &refspec])).await?;
        Ok(report("push", classify_push(&result)))
    }

    /// Commit `files` with `message`, returning git's stdout.
    pub async fn commit(&self, files: &[String], message: &str) -> String {
        let mut args = argv(&["commit", "-m", message]);
        args.extend(files.iter().cloned());
        let (stdout, _) = self.git.execute_safe(&args).await;
        stdout
    }

    /// Stage `files` on top of what is already staged, then commit.
    pub async fn commit_include(&self, files: &[String], message: &str) -> String {
        let mut args = argv(&["commit", "-m", message, "-i"]);
        args.extend(files.iter().cloned());
        let (stdout, _) = self.git.execute_safe(&args).await;
        stdout
    }
}
