//! Printing outcomes and mapping them to process exit codes.

use serde::Serialize;

use crate::error::Result;
use crate::outcome::{Outcome, Severity};

/// Exit code for infrastructure failures (git missing, bad config, ...).
pub const EXIT_ERROR: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// In-progress state of a repository, as printed by `gitsync status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RepoStatus {
    pub merge_in_progress: bool,
    pub rebase_in_progress: bool,
}

pub fn exit_code(severity: Severity) -> u8 {
    match severity {
        Severity::Clean | Severity::NoOp => 0,
        Severity::NeedsAttention => 1,
    }
}

pub fn render_outcome(outcome: &Outcome, mode: OutputMode) -> Result<String> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string(outcome)?),
        OutputMode::Human => {
            let mut out = outcome.code.to_string();
            for line in outcome.detail_lines() {
                out.push_str("\n  ");
                out.push_str(line);
            }
            Ok(out)
        }
    }
}

pub fn render_status(status: &RepoStatus, mode: OutputMode) -> Result<String> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string(status)?),
        OutputMode::Human => Ok(format!(
            "merge in progress: {}\nrebase in progress: {}",
            yes_no(status.merge_in_progress),
            yes_no(status.rebase_in_progress)
        )),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
