//! A minimal interactive pipeline shell.
//!
//! This crate reads a line at a time, splits it on `|` into a pipeline
//! of external commands, connects adjacent commands with OS pipes and
//! forks one child per command with the right pipe ends duplicated onto
//! its standard streams. The interesting part is the descriptor
//! discipline: every pipe end is closed exactly once in the parent and
//! in every child that does not consume it, so downstream readers
//! reliably observe end-of-stream.
//!
//! There is no shell language here: no quoting, expansion, redirection
//! or built-ins. The entry point is [`Shell`], which owns the
//! read-eval loop; the [`command`], [`parser`], [`pipes`] and
//! [`launcher`] modules expose the pieces individually.

pub mod command;
pub mod launcher;
mod lexer;
pub mod parser;
pub mod pipes;

mod interpreter;

pub use interpreter::{DEFAULT_PROMPT, Shell};
