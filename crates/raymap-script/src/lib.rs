//! Compiler for ray map trigger scripts.
//!
//! A script is one line of the form `IF <op>(<args>) THEN <op>(<args>)`.
//! [`splitter`] recognizes that outer shape, [`args`] parses the individual
//! argument tokens, [`compiler`] assembles a typed [`Script`] (and renders it
//! back to canonical text) and [`codec`] converts scripts to and from the
//! byte layout read by the game.

pub mod args;
pub mod codec;
pub mod compiler;
pub mod error;
pub mod script;
pub mod splitter;

pub use codec::ByteReader;
pub use compiler::{LineReport, compile, compile_lines};
pub use error::{ErrorKind, FormatError, SchemaViolation, ScriptError};
pub use script::{Action, Condition, FieldValue, Script, Trigger};
pub use splitter::{RawScript, split_line};
