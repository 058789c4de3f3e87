pub mod cli;
#[cfg(test)]
pub(crate) mod scripted;

use async_trait::async_trait;

use crate::classify::CommandResult;
use crate::error::Result;

pub use cli::GitCli;

/// Runs git sub-commands for the sync layer.
#[async_trait]
pub trait GitExecutor: Send + Sync {
    /// Run `git <args>` and wait for it to finish.
    ///
    /// A non-zero exit status is reported through `CommandResult::ok`; an
    /// `Err` means git could not be run at all.
    async fn execute(&self, args: &[String]) -> Result<CommandResult>;

    /// Like [`GitExecutor::execute`] but never fails. Spawn errors are
    /// folded into the returned stderr.
    async fn execute_safe(&self, args: &[String]) -> (String, String) {
        match self.execute(args).await {
            Ok(result) => {
                if !result.ok {
                    tracing::debug!(args = ?args, stderr = %result.stderr, "Ignoring git failure");
                }
                (result.stdout, result.stderr)
            }
            Err(e) => {
                tracing::debug!(args = ?args, error = %e, "Ignoring git spawn failure");
                (String::new(), e.to_string())
            }
        }
    }
}
