//! Data model for one input line: commands and the pipeline they form.

use std::os::fd::RawFd;

/// One stage of a pipeline: an argument vector plus the descriptor
/// redirections wiring assigns by position.
///
/// The fd fields are raw views into the pipeline's
/// [`PipeSet`](crate::pipes::PipeSet); the set keeps ownership, so a
/// `Command` never closes anything itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Argument vector; element 0 is the program name. Never empty for
    /// a command built by the parser.
    pub args: Vec<String>,
    /// Descriptor to duplicate onto the child's stdin, if any.
    pub fd_in: Option<RawFd>,
    /// Descriptor to duplicate onto the child's stdout, if any.
    pub fd_out: Option<RawFd>,
}

impl Command {
    pub fn new(args: Vec<String>) -> Self {
        debug_assert!(!args.is_empty());
        Self {
            args,
            fd_in: None,
            fd_out: None,
        }
    }

    /// Program name, i.e. the first argument.
    pub fn program(&self) -> &str {
        &self.args[0]
    }
}

/// The ordered commands of one input line, left to right in data-flow
/// order. Owned by the run loop for exactly one iteration.
#[derive(Debug, PartialEq, Eq)]
pub struct Pipeline {
    commands: Vec<Command>,
}

impl Pipeline {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut [Command] {
        &mut self.commands
    }
}
