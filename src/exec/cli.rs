use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;

use crate::classify::CommandResult;
use crate::config::{default_binary, GitConfig};
use crate::error::{AppError, Result};
use crate::exec::GitExecutor;

/// Locale forced on every git child so messages stay in the English the
/// classifiers match. Configured `git.env` entries are applied afterwards.
const LOCALE_ENV: [(&str, &str); 2] = [("LC_ALL", "C"), ("LANGUAGE", "C")];

/// Runs the `git` binary as a child process inside a working tree.
#[derive(Debug, Clone)]
pub struct GitCli {
    binary: PathBuf,
    work_dir: PathBuf,
    env: Vec<(String, String)>,
}

impl GitCli {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            binary: default_binary(),
            work_dir: work_dir.into(),
            env: Vec::new(),
        }
    }

    pub fn from_config(config: &GitConfig, work_dir: &Path) -> Result<Self> {
        Ok(Self {
            binary: config.binary.clone(),
            work_dir: work_dir.to_path_buf(),
            env: config.env_pairs()?,
        })
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }
}

#[async_trait]
impl GitExecutor for GitCli {
    async fn execute(&self, args: &[String]) -> Result<CommandResult> {
        tracing::debug!(binary = %self.binary.display(), args = ?args, "Running git");

        let output = tokio::process::Command::new(&self.binary)
            .args(args)
            .envs(LOCALE_ENV)
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| AppError::Spawn(format!("{}: {e}", self.binary.display())))?;

        let result = CommandResult {
            ok: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        tracing::debug!(
            args = ?args,
            status = ?output.status.code(),
            ok = result.ok,
            "git finished"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let tmp = tempfile::tempdir().unwrap();
        let git = GitCli::new(tmp.path()).with_binary(tmp.path().join("no-such-git"));

        let err = git.execute(&args(&["status"])).await.unwrap_err();
        assert!(matches!(err, AppError::Spawn(_)));
    }

    #[tokio::test]
    async fn test_safe_execute_swallows_spawn_error() {
        let tmp = tempfile::tempdir().unwrap();
        let git = GitCli::new(tmp.path()).with_binary(tmp.path().join("no-such-git"));

        let (stdout, stderr) = git.execute_safe(&args(&["merge", "--abort"])).await;
        assert!(stdout.is_empty());
        assert!(stderr.contains("no-such-git"));
    }

    #[test]
    fn test_new_uses_default_binary() {
        let git = GitCli::new("/work");
        assert_eq!(git.binary, GitConfig::default().binary);
    }

    fn env_lines(stdout: &str) -> Vec<&str> {
        stdout.lines().collect()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_child_runs_in_c_locale() {
        let tmp = tempfile::tempdir().unwrap();
        // `env` with no arguments prints the environment it was given.
        let git = GitCli::new(tmp.path()).with_binary("env");

        let result = git.execute(&[]).await.unwrap();
        assert!(result.ok);
        let lines = env_lines(&result.stdout);
        assert!(lines.contains(&"LC_ALL=C"), "stdout: {}", result.stdout);
        assert!(lines.contains(&"LANGUAGE=C"), "stdout: {}", result.stdout);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_configured_env_applied_after_locale() {
        let tmp = tempfile::tempdir().unwrap();
        let config = GitConfig {
            binary: PathBuf::from("env"),
            env: vec!["LANGUAGE=en".to_string(), "GIT_TERMINAL_PROMPT=0".to_string()],
        };
        let git = GitCli::from_config(&config, tmp.path()).unwrap();

        let result = git.execute(&[]).await.unwrap();
        let lines = env_lines(&result.stdout);
        assert!(lines.contains(&"LC_ALL=C"));
        assert!(lines.contains(&"LANGUAGE=en"));
        assert!(!lines.contains(&"LANGUAGE=C"));
        assert!(lines.contains(&"GIT_TERMINAL_PROMPT=0"));
    }

    #[test]
    fn test_from_config() {
        let config = GitConfig {
            binary: PathBuf::from("/opt/git/bin/git"),
            env: vec!["GIT_TERMINAL_PROMPT=0".to_string()],
        };
        let git = GitCli::from_config(&config, Path::new("/work")).unwrap();
        assert_eq!(git.binary, PathBuf::from("/opt/git/bin/git"));
        assert_eq!(git.work_dir(), Path::new("/work"));
        assert_eq!(git.env, vec![("GIT_TERMINAL_PROMPT".to_string(), "0".to_string())]);
    }
}
