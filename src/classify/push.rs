//! `git push`.
//!
//! git reports push progress on stderr even when the push succeeds, so the
//! rules look only at stderr and ignore both stdout and the exit status.

use super::{no_detail, stderr_text, CommandResult, Fallback, Rule, RuleTable};
use crate::outcome::{Outcome, OutcomeCode};

pub const EVERYTHING_UP_TO_DATE: &str = "Everything up-to-date\n";
pub const BEHIND_REMOTE: &str =
    "Updates were rejected because a pushed branch tip is behind its remote";

pub static PUSH_RULES: RuleTable = RuleTable {
    operation: "push",
    rules: &[
        Rule {
            name: "everything-up-to-date",
            applies: up_to_date,
            code: OutcomeCode::NothingToPush,
            detail: no_detail,
        },
        Rule {
            name: "behind-remote",
            applies: rejected,
            code: OutcomeCode::PushFail,
            detail: no_detail,
        },
    ],
    fallback: Fallback {
        name: "pushed",
        code: OutcomeCode::Success,
        detail: stderr_text,
    },
};

pub fn classify_push(result: &CommandResult) -> Outcome {
    PUSH_RULES.classify(result)
}

fn up_to_date(result: &CommandResult) -> bool {
    result.stderr == EVERYTHING_UP_TO_DATE
}

fn rejected(result: &CommandResult) -> bool {
    result.stderr.contains(BEHIND_REMOTE)
}
