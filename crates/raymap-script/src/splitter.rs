//! Recognizes the outer `IF <op>(<args>) THEN <op>(<args>)` shape of a line.
//!
//! The keyword alternations are generated from the operator enums, so the
//! pattern can never drift from the grammar table.

use std::sync::LazyLock;

use raymap_types::{ActionOp, ConditionOp};
use regex::Regex;
use strum::IntoEnumIterator;

use crate::error::ScriptError;

/// Condition arguments never contain parentheses, so the first `)` closes
/// them. Action arguments run to the last `)` on the line, which lets dialog
/// text carry its own parentheses.
fn script_pattern(conditions: &str, actions: &str) -> String {
    format!(
        r"(?i)^\s*IF\s+({conditions})\s*(\([^()]*\))\s+THEN\s+({actions})\s*(\(.*\))\s*$"
    )
}

fn alternation<'a>(keywords: impl Iterator<Item = &'a str>) -> String {
    keywords.map(regex::escape).collect::<Vec<_>>().join("|")
}

static SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    let conditions = alternation(ConditionOp::iter().map(ConditionOp::keyword));
    let actions = alternation(ActionOp::iter().map(ActionOp::keyword));
    Regex::new(&script_pattern(&conditions, &actions)).expect("generated script pattern")
});

/// Same shape with any word in the operator slots, to tell a misspelled
/// operator apart from a line that is not a script at all.
static SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&script_pattern(r"\w+", r"\w+")).expect("script shape pattern"));

/// The four raw pieces of a script line. Argument slices keep their
/// surrounding parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawScript<'a> {
    pub condition: &'a str,
    pub condition_args: &'a str,
    pub action: &'a str,
    pub action_args: &'a str,
}

/// Split a line into its raw pieces.
///
/// Fails with [`ScriptError::GrammarMismatch`] when the line is not shaped
/// like a script, or with `UnknownCondition`/`UnknownAction` when it is but
/// names an operator the grammar does not have.
pub fn split_line(line: &str) -> Result<RawScript<'_>, ScriptError> {
    if let Some(caps) = SCRIPT.captures(line) {
        return Ok(RawScript {
            condition: caps.get(1).map_or("", |m| m.as_str()),
            condition_args: caps.get(2).map_or("", |m| m.as_str()),
            action: caps.get(3).map_or("", |m| m.as_str()),
            action_args: caps.get(4).map_or("", |m| m.as_str()),
        });
    }

    let caps = SHAPE.captures(line).ok_or(ScriptError::GrammarMismatch)?;
    let condition = caps.get(1).map_or("", |m| m.as_str());
    if condition.parse::<ConditionOp>().is_err() {
        return Err(ScriptError::UnknownCondition(condition.to_string()));
    }
    let action = caps.get(3).map_or("", |m| m.as_str());
    Err(ScriptError::UnknownAction(action.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_four_parts() {
        let raw = split_line("IF GET(AND; [1, 2]; IN_ORDER; ONCE) THEN DIALOG(Hello there)")
            .expect("script");
        assert_eq!(raw.condition, "GET");
        assert_eq!(raw.condition_args, "(AND; [1, 2]; IN_ORDER; ONCE)");
        assert_eq!(raw.action, "DIALOG");
        assert_eq!(raw.action_args, "(Hello there)");
    }

    #[test]
    fn keywords_case_insensitive() {
        let raw = split_line("  if time_elapsed (5000)   then Win ( )  ").expect("script");
        assert_eq!(raw.condition, "time_elapsed");
        assert_eq!(raw.condition_args, "(5000)");
        assert_eq!(raw.action, "Win");
        assert_eq!(raw.action_args, "( )");
    }

    #[test]
    fn action_args_run_to_last_paren() {
        let raw = split_line("IF TIME_ELAPSED(1) THEN DIALOG(Run (now)!)").expect("script");
        assert_eq!(raw.action_args, "(Run (now)!)");
    }

    #[test]
    fn not_a_script() {
        for line in [
            "",
            "   ",
            "hello world",
            "IF TIME_ELAPSED(5000)",
            "IF TIME_ELAPSED(5000) THEN WIN() trailing",
            "IF TIME_ELAPSED(5000)THEN WIN()",
            "prefix IF TIME_ELAPSED(5000) THEN WIN()",
            "IF TIME_ELAPSED 5000 THEN WIN()",
        ] {
            assert_eq!(split_line(line), Err(ScriptError::GrammarMismatch), "{line:?}");
        }
    }

    #[test]
    fn unknown_operators() {
        assert_eq!(
            split_line("IF BOGUS_OP(1) THEN WIN()"),
            Err(ScriptError::UnknownCondition("BOGUS_OP".into()))
        );
        assert_eq!(
            split_line("IF TIME_ELAPSED(1) THEN EXPLODE()"),
            Err(ScriptError::UnknownAction("EXPLODE".into()))
        );
        // Operators from the other family are unknown in this slot.
        assert_eq!(
            split_line("IF OPEN([{1.1}]) THEN WIN()"),
            Err(ScriptError::UnknownCondition("OPEN".into()))
        );
    }
}
