use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::classify::CommandResult;
use crate::error::{AppError, Result};
use crate::exec::GitExecutor;

/// Replays canned results in order and records every call.
#[derive(Clone, Default)]
pub(crate) struct ScriptedGit {
    responses: Arc<Mutex<VecDeque<Result<CommandResult>>>>,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl ScriptedGit {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, result: CommandResult) -> Self {
        self.responses.lock().unwrap().push_back(Ok(result));
        self
    }

    pub(crate) fn fail_to_spawn(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(AppError::Spawn(message.to_string())));
        self
    }

    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitExecutor for ScriptedGit {
    async fn execute(&self, args: &[String]) -> Result<CommandResult> {
        self.calls.lock().unwrap().push(args.to_vec());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Spawn(format!("no scripted response for {args:?}"))))
    }
}
