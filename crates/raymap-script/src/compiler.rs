//! Text to [`Script`] compilation.
//!
//! The reverse direction is `Script`'s `Display` impl; rendering and then
//! compiling any valid script gives back an equal script.

use std::str::FromStr;

use raymap_types::{ActionOp, ConditionOp, FieldKind, Spawn, TileType};

use crate::args::{self, RawSpawn};
use crate::error::ScriptError;
use crate::script::{Action, Condition, FieldValue, Script};
use crate::splitter::{RawScript, split_line};

/// Build a script from the pieces found by [`split_line`].
///
/// Nothing is returned unless every field of both halves parses and passes
/// validation.
pub fn compile(raw: &RawScript<'_>) -> Result<Script, ScriptError> {
    let condition_op: ConditionOp = raw
        .condition
        .trim()
        .parse()
        .map_err(|_| ScriptError::UnknownCondition(raw.condition.to_string()))?;
    let action_op: ActionOp = raw
        .action
        .trim()
        .parse()
        .map_err(|_| ScriptError::UnknownAction(raw.action.to_string()))?;

    let fields = parse_fields(
        condition_op.keyword(),
        condition_op.schema(),
        raw.condition_args,
    )?;
    let condition = Condition::from_fields(condition_op, fields)?;

    let fields = parse_fields(action_op.keyword(), action_op.schema(), raw.action_args)?;
    let action = Action::from_fields(action_op, fields)?;

    let script = Script { condition, action };
    script.validate()?;
    Ok(script)
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        compile(&split_line(line)?)
    }
}

fn parse_fields(
    op: &'static str,
    schema: &[FieldKind],
    args: &str,
) -> Result<Vec<FieldValue>, ScriptError> {
    let tokens = args::split_args(args, schema.len()).ok_or(ScriptError::GrammarMismatch)?;
    if tokens.len() > schema.len() {
        return Err(ScriptError::ExtraField { op });
    }

    let mut values = Vec::with_capacity(schema.len());
    for (index, &expected) in schema.iter().enumerate() {
        let token = match tokens.get(index) {
            Some(token) if !token.is_empty() => *token,
            _ => {
                return Err(ScriptError::MissingField {
                    op,
                    index,
                    expected,
                });
            }
        };
        // Only text may swallow further separators.
        if index + 1 == schema.len() && expected != FieldKind::Text && token.contains(';') {
            return Err(ScriptError::ExtraField { op });
        }
        values.push(parse_field(op, index, expected, token)?);
    }
    Ok(values)
}

fn parse_field(
    op: &'static str,
    index: usize,
    expected: FieldKind,
    token: &str,
) -> Result<FieldValue, ScriptError> {
    let value = match expected {
        FieldKind::AndOr => args::parse_keyword(token).map(FieldValue::AndOr),
        FieldKind::IdList => args::parse_id_list(token).map(FieldValue::Ids),
        FieldKind::CellList => args::parse_cell_list(token).map(FieldValue::Cells),
        FieldKind::SpawnList => match args::parse_spawn_list(token) {
            Some(raw) => Some(FieldValue::Spawns(resolve_spawns(&raw)?)),
            None => None,
        },
        FieldKind::Order => args::parse_keyword(token).map(FieldValue::Order),
        FieldKind::Repeat => args::parse_keyword(token).map(FieldValue::Repeat),
        FieldKind::Millis => args::parse_u32(token).map(FieldValue::Millis),
        FieldKind::MapIndex => args::parse_u8(token).map(FieldValue::MapIndex),
        FieldKind::Cell => args::parse_cell(token).map(FieldValue::Cell),
        FieldKind::Text => args::parse_text(token).map(|text| FieldValue::Text(text.to_string())),
    };
    value.ok_or_else(|| ScriptError::FieldParse {
        op,
        index,
        expected,
        token: token.to_string(),
    })
}

fn resolve_spawns(raw: &[RawSpawn<'_>]) -> Result<Vec<Spawn>, ScriptError> {
    raw.iter()
        .map(|spawn| {
            let kind = TileType::from_name(spawn.name)
                .ok_or_else(|| ScriptError::UnknownSpawnType(spawn.name.to_string()))?;
            Ok(Spawn {
                kind,
                id: spawn.id,
                cell: spawn.cell,
            })
        })
        .collect()
}

/// Outcome of compiling one line of a script listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineReport {
    /// 1-based line number.
    pub number: usize,
    pub text: String,
    pub result: Result<Script, ScriptError>,
}

impl LineReport {
    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn script(&self) -> Option<&Script> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ScriptError> {
        self.result.as_ref().err()
    }
}

/// Compile every line independently; a bad line never stops the batch.
pub fn compile_lines(input: &str) -> Vec<LineReport> {
    input
        .lines()
        .enumerate()
        .map(|(i, line)| LineReport {
            number: i + 1,
            text: line.to_string(),
            result: line.parse(),
        })
        .collect()
}
