use std::fmt;

use serde::Serialize;

/// Canonical result of a sync operation, independent of git's wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeCode {
    Success,
    LocalChangesWouldBeLost,
    NothingToMerge,
    NothingToRebase,
    Conflict,
    NothingToPush,
    PushFail,
}

/// How much a caller has to care about an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The operation did its work.
    Clean,
    /// Nothing needed doing. Terminal, not an error.
    NoOp,
    /// The caller has to decide on remediation (abort, stash, force).
    NeedsAttention,
}

impl OutcomeCode {
    pub const ALL: [OutcomeCode; 7] = [
        OutcomeCode::Success,
        OutcomeCode::LocalChangesWouldBeLost,
        OutcomeCode::NothingToMerge,
        OutcomeCode::NothingToRebase,
        OutcomeCode::Conflict,
        OutcomeCode::NothingToPush,
        OutcomeCode::PushFail,
    ];

    /// Stable numeric id, starting at 1 in declaration order.
    pub fn id(self) -> u8 {
        match self {
            OutcomeCode::Success => 1,
            OutcomeCode::LocalChangesWouldBeLost => 2,
            OutcomeCode::NothingToMerge => 3,
            OutcomeCode::NothingToRebase => 4,
            OutcomeCode::Conflict => 5,
            OutcomeCode::NothingToPush => 6,
            OutcomeCode::PushFail => 7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeCode::Success => "SUCCESS",
            OutcomeCode::LocalChangesWouldBeLost => "LOCAL_CHANGES_WOULD_BE_LOST",
            OutcomeCode::NothingToMerge => "NOTHING_TO_MERGE",
            OutcomeCode::NothingToRebase => "NOTHING_TO_REBASE",
            OutcomeCode::Conflict => "CONFLICT",
            OutcomeCode::NothingToPush => "NOTHING_TO_PUSH",
            OutcomeCode::PushFail => "PUSH_FAIL",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            OutcomeCode::Success => Severity::Clean,
            OutcomeCode::NothingToMerge
            | OutcomeCode::NothingToRebase
            | OutcomeCode::NothingToPush => Severity::NoOp,
            OutcomeCode::Conflict
            | OutcomeCode::LocalChangesWouldBeLost
            | OutcomeCode::PushFail => Severity::NeedsAttention,
        }
    }
}

impl fmt::Display for OutcomeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra information attached to an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Detail {
    /// One entry per line, e.g. files whose local changes are at risk.
    Lines(Vec<String>),
    /// Raw tool output, passed through untouched.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub code: OutcomeCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Detail>,
}

impl Outcome {
    pub fn new(code: OutcomeCode) -> Self {
        Self { code, detail: None }
    }

    pub fn with_detail(code: OutcomeCode, detail: Detail) -> Self {
        Self {
            code,
            detail: Some(detail),
        }
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Detail rendered as display lines.
    pub fn detail_lines(&self) -> Vec<&str> {
        match &self.detail {
            Some(Detail::Lines(lines)) => lines.iter().map(String::as_str).collect(),
            Some(Detail::Text(text)) => text.lines().collect(),
            None => Vec::new(),
        }
    }
}
