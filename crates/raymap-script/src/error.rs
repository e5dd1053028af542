use raymap_types::{FieldKind, TileType};

/// Coarse classification of a [`ScriptError`], for callers that only need to
/// tell "not a script" apart from "a script with bad arguments".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The line does not have the `IF ... THEN ...` shape.
    GrammarMismatch,
    /// A field token is malformed or a field is missing.
    FieldParse,
    /// A field is well-formed but breaks a rule of its operator.
    SchemaViolation,
}

/// A rule broken by otherwise well-formed script fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaViolation {
    #[error("{field} must list at least one element")]
    EmptyList { field: FieldKind },
    #[error("{field} lists {len} elements, at most 255 fit")]
    ListTooLong { field: FieldKind, len: usize },
    #[error("spawn type {0} is not an object")]
    NotAnObject(TileType),
    #[error("dialog text {reason}")]
    InvalidText { reason: &'static str },
    #[error("field values do not fit the {op} schema")]
    Mismatch { op: &'static str },
}

/// Why a line of text did not compile to a script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("not a script, expected IF <condition>(...) THEN <action>(...)")]
    GrammarMismatch,
    #[error("unknown condition {0:?}")]
    UnknownCondition(String),
    #[error("unknown action {0:?}")]
    UnknownAction(String),
    #[error("{op}: field {} is missing, expected {expected}", .index + 1)]
    MissingField {
        op: &'static str,
        index: usize,
        expected: FieldKind,
    },
    #[error("{op}: unexpected arguments after the last field")]
    ExtraField { op: &'static str },
    #[error("{op}: field {} {token:?} is not a valid {expected}", .index + 1)]
    FieldParse {
        op: &'static str,
        index: usize,
        expected: FieldKind,
        token: String,
    },
    #[error("unknown spawn type {0:?}")]
    UnknownSpawnType(String),
    #[error(transparent)]
    Invalid(#[from] SchemaViolation),
}

impl ScriptError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::GrammarMismatch => ErrorKind::GrammarMismatch,
            Self::MissingField { .. } | Self::ExtraField { .. } | Self::FieldParse { .. } => {
                ErrorKind::FieldParse
            }
            Self::UnknownCondition(_)
            | Self::UnknownAction(_)
            | Self::UnknownSpawnType(_)
            | Self::Invalid(_) => ErrorKind::SchemaViolation,
        }
    }
}

/// Why a binary script payload could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("unexpected end of data at offset {offset}")]
    UnexpectedEof { offset: usize },
    #[error("unknown operator {value} at offset {offset}")]
    UnknownOperator { value: u8, offset: usize },
    #[error("unknown {field} value {value} at offset {offset}")]
    UnknownKeyword {
        field: FieldKind,
        value: u8,
        offset: usize,
    },
    #[error("unknown tile type {value:#04x} at offset {offset}")]
    UnknownTileType { value: u8, offset: usize },
    #[error("text at offset {offset} is not ASCII")]
    InvalidText { offset: usize },
    #[error("{count} trailing bytes after the action")]
    TrailingBytes { count: usize },
    #[error("decoded script is invalid: {0}")]
    Invalid(#[from] SchemaViolation),
}
