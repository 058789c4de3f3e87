//! Outcome classification.
//!
//! Each operation family owns an ordered [`RuleTable`]. Rules are evaluated
//! top to bottom and the first one whose predicate holds decides the
//! [`OutcomeCode`] and how the detail is extracted. When no rule matches the
//! table's fallback applies, so every table is total over [`CommandResult`].
//!
//! Classification is pure: it reads only the result passed in.

pub mod merge;
pub mod push;
pub mod rebase;

use serde::Serialize;

use crate::outcome::{Detail, Outcome, OutcomeCode};

pub use merge::classify_merge;
pub use push::classify_push;
pub use rebase::{classify_rebase, classify_rebase_continue, classify_rebase_skip};

/// Raw result of a single git invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CommandResult {
    pub ok: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn new(ok: bool, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            ok,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn success(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::new(true, stdout, stderr)
    }

    pub fn failure(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::new(false, stdout, stderr)
    }
}

pub type Predicate = fn(&CommandResult) -> bool;
pub type DetailExtractor = fn(&CommandResult) -> Option<Detail>;

/// One `(predicate) -> code` entry of a rule table.
pub struct Rule {
    pub name: &'static str,
    pub applies: Predicate,
    pub code: OutcomeCode,
    pub detail: DetailExtractor,
}

/// The outcome used when no rule in a table matches.
pub struct Fallback {
    pub name: &'static str,
    pub code: OutcomeCode,
    pub detail: DetailExtractor,
}

pub struct RuleTable {
    pub operation: &'static str,
    pub rules: &'static [Rule],
    pub fallback: Fallback,
}

impl RuleTable {
    /// Name of the rule that decides `result`.
    pub fn matching_rule(&self, result: &CommandResult) -> &'static str {
        self.rules
            .iter()
            .find(|rule| (rule.applies)(result))
            .map_or(self.fallback.name, |rule| rule.name)
    }

    pub fn classify(&self, result: &CommandResult) -> Outcome {
        let (name, code, detail) = match self.rules.iter().find(|rule| (rule.applies)(result)) {
            Some(rule) => (rule.name, rule.code, rule.detail),
            None => (self.fallback.name, self.fallback.code, self.fallback.detail),
        };

        tracing::trace!(operation = self.operation, rule = name, code = %code, "Classified");

        Outcome {
            code,
            detail: detail(result),
        }
    }
}

pub(crate) fn failed(result: &CommandResult) -> bool {
    !result.ok
}

pub(crate) fn no_detail(_: &CommandResult) -> Option<Detail> {
    None
}

pub(crate) fn stdout_text(result: &CommandResult) -> Option<Detail> {
    Some(Detail::Text(result.stdout.clone()))
}

pub(crate) fn stderr_text(result: &CommandResult) -> Option<Detail> {
    Some(Detail::Text(result.stderr.clone()))
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split tool output into lines on every line boundary, not just `\n`.
///
/// `\r\n` counts as one break. A trailing break does not produce an empty
/// last line.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(_: &CommandResult) -> bool {
        true
    }

    static SHADOWED: RuleTable = RuleTable {
        operation: "test",
        rules: &[
            Rule {
                name: "first",
                applies: failed,
                code: OutcomeCode::Conflict,
                detail: no_detail,
            },
            Rule {
                name: "second",
                applies: always,
                code: OutcomeCode::PushFail,
                detail: stderr_text,
            },
        ],
        fallback: Fallback {
            name: "unreachable",
            code: OutcomeCode::Success,
            detail: no_detail,
        },
    };

    static EMPTY: RuleTable = RuleTable {
        operation: "empty",
        rules: &[],
        fallback: Fallback {
            name: "fallback",
            code: OutcomeCode::Success,
            detail: stdout_text,
        },
    };

    #[test]
    fn test_split_lines_boundaries() {
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\r\nb\rc"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("a\r\r\nb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("a\u{2028}b\x0cc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_first_match_wins() {
        let result = CommandResult::failure("", "boom");
        assert_eq!(SHADOWED.matching_rule(&result), "first");
        assert_eq!(SHADOWED.classify(&result), Outcome::new(OutcomeCode::Conflict));
    }

    #[test]
    fn test_later_rule_applies_when_earlier_does_not() {
        let result = CommandResult::success("", "boom");
        assert_eq!(SHADOWED.matching_rule(&result), "second");
        assert_eq!(
            SHADOWED.classify(&result),
            Outcome::with_detail(OutcomeCode::PushFail, Detail::Text("boom".into()))
        );
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        let result = CommandResult::failure("out", "err");
        assert_eq!(EMPTY.matching_rule(&result), "fallback");
        assert_eq!(
            EMPTY.classify(&result),
            Outcome::with_detail(OutcomeCode::Success, Detail::Text("out".into()))
        );
    }
}
