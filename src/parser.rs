//! Building a [`Pipeline`] from a raw input line.

use crate::command::{Command, Pipeline};
use crate::lexer;
use std::fmt;

/// Errors that can occur while building a pipeline from a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The line contains no commands at all (empty or pipes only).
    EmptyLine,
    /// A pipe-delimited stage contains no words, e.g. `a | | b`.
    EmptyCommand,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyLine => write!(f, "empty command line"),
            ParseError::EmptyCommand => write!(f, "empty command in pipeline"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Split `line` into pipe-delimited stages and each stage into words.
///
/// The stage count is taken up front via [`lexer::count`] so command
/// storage is sized once; the subsequent split fills it. A stage that
/// tokenizes to zero words aborts the whole line, so every command in a
/// returned pipeline has a non-empty argument vector.
pub fn parse_pipeline(line: &str) -> Result<Pipeline, ParseError> {
    let stages = lexer::count(line, '|');
    if stages == 0 {
        return Err(ParseError::EmptyLine);
    }

    let mut commands = Vec::with_capacity(stages);
    for stage in lexer::split(line, '|') {
        let words = lexer::split(stage, ' ');
        if words.is_empty() {
            return Err(ParseError::EmptyCommand);
        }
        commands.push(Command::new(
            words.into_iter().map(str::to_owned).collect(),
        ));
    }

    Ok(Pipeline::new(commands))
}
