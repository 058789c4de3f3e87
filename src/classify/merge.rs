//! `git merge` and `git pull` (merge mode).

use super::{failed, no_detail, split_lines, CommandResult, Fallback, Rule, RuleTable};
use crate::outcome::{Detail, Outcome, OutcomeCode};

pub const CONFLICT_MARKER: &str =
    "Automatic merge failed; fix conflicts and then commit the result.";
pub const ALREADY_UP_TO_DATE: &str = "Already up-to-date.\n";

pub static MERGE_RULES: RuleTable = RuleTable {
    operation: "merge",
    rules: &[
        Rule {
            name: "conflict-marker",
            applies: conflicted,
            code: OutcomeCode::Conflict,
            detail: no_detail,
        },
        // Any other failure: git refused to touch the working tree.
        Rule {
            name: "refused",
            applies: failed,
            code: OutcomeCode::LocalChangesWouldBeLost,
            detail: at_risk_files,
        },
        Rule {
            name: "already-up-to-date",
            applies: up_to_date,
            code: OutcomeCode::NothingToMerge,
            detail: no_detail,
        },
    ],
    fallback: Fallback {
        name: "merged",
        code: OutcomeCode::Success,
        detail: no_detail,
    },
};

pub fn classify_merge(result: &CommandResult) -> Outcome {
    MERGE_RULES.classify(result)
}

fn conflicted(result: &CommandResult) -> bool {
    !result.ok && result.stdout.contains(CONFLICT_MARKER)
}

fn up_to_date(result: &CommandResult) -> bool {
    result.ok && result.stdout == ALREADY_UP_TO_DATE
}

/// The refusal diagnostic is a one-line header, the file list, then a
/// two-line footer.
fn at_risk_files(result: &CommandResult) -> Option<Detail> {
    let lines = split_lines(&result.stderr);
    let files = if lines.len() > 3 {
        lines[1..lines.len() - 2]
            .iter()
            .map(|line| line.to_string())
            .collect()
    } else {
        Vec::new()
    };
    Some(Detail::Lines(files))
}
