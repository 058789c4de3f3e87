//! `git rebase`, `git pull --rebase` and the rebase continuation commands.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{failed, no_detail, stdout_text, CommandResult, Fallback, Rule, RuleTable};
use crate::outcome::{Detail, Outcome, OutcomeCode};

pub const UNSTAGED_CHANGES: &str =
    "Cannot rebase: You have unstaged changes.\nPlease commit or stash them.\n";
pub const UNTRACKED_OVERWRITTEN: &str =
    "The following untracked working tree files would be overwritten";

/// Placeholder detail reported when `rebase --skip` fails.
pub const SKIP_CONFLICT_PLACEHOLDER: [&str; 2] = ["tbd1", "tbd2"];

// Anchored at the start only; anything after the newline is ignored.
static UP_TO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Current branch \w+ is up to date.\n").expect("Invalid regex pattern")
});

// TODO: list the at-risk files for the local-changes rules, as merge does.
pub static REBASE_RULES: RuleTable = RuleTable {
    operation: "rebase",
    rules: &[
        Rule {
            name: "unstaged-changes",
            applies: unstaged_changes,
            code: OutcomeCode::LocalChangesWouldBeLost,
            detail: no_detail,
        },
        Rule {
            name: "untracked-overwritten",
            applies: untracked_overwritten,
            code: OutcomeCode::LocalChangesWouldBeLost,
            detail: no_detail,
        },
        Rule {
            name: "failed",
            applies: failed,
            code: OutcomeCode::Conflict,
            detail: no_detail,
        },
        Rule {
            name: "up-to-date",
            applies: up_to_date,
            code: OutcomeCode::NothingToRebase,
            detail: no_detail,
        },
    ],
    fallback: Fallback {
        name: "rebased",
        code: OutcomeCode::Success,
        detail: stdout_text,
    },
};

pub static CONTINUE_RULES: RuleTable = RuleTable {
    operation: "rebase --continue",
    rules: &[Rule {
        name: "failed",
        applies: failed,
        code: OutcomeCode::Conflict,
        detail: no_detail,
    }],
    fallback: Fallback {
        name: "continued",
        code: OutcomeCode::Success,
        detail: stdout_text,
    },
};

pub static SKIP_RULES: RuleTable = RuleTable {
    operation: "rebase --skip",
    rules: &[Rule {
        name: "failed",
        applies: failed,
        code: OutcomeCode::Conflict,
        detail: skip_placeholder,
    }],
    fallback: Fallback {
        name: "skipped",
        code: OutcomeCode::Success,
        detail: stdout_text,
    },
};

pub fn classify_rebase(result: &CommandResult) -> Outcome {
    REBASE_RULES.classify(result)
}

pub fn classify_rebase_continue(result: &CommandResult) -> Outcome {
    CONTINUE_RULES.classify(result)
}

pub fn classify_rebase_skip(result: &CommandResult) -> Outcome {
    SKIP_RULES.classify(result)
}

fn unstaged_changes(result: &CommandResult) -> bool {
    !result.ok && result.stderr == UNSTAGED_CHANGES
}

fn untracked_overwritten(result: &CommandResult) -> bool {
    !result.ok && result.stderr.contains(UNTRACKED_OVERWRITTEN)
}

fn up_to_date(result: &CommandResult) -> bool {
    result.ok && UP_TO_DATE.is_match(&result.stdout)
}

fn skip_placeholder(_: &CommandResult) -> Option<Detail> {
    Some(Detail::Lines(
        SKIP_CONFLICT_PLACEHOLDER
            .iter()
            .map(|s| s.to_string())
            .collect(),
    ))
}
