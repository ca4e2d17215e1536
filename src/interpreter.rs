//! The interactive run loop: parse, allocate pipes, wire, launch,
//! close, reap, prompt again.

use crate::launcher::{self, SpawnOutcome, spawn};
use crate::parser::parse_pipeline;
use crate::pipes::{self, PipeSet};
use anyhow::{Context, Result};
use nix::sys::wait::waitpid;
use nix::unistd::Pid;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Default interactive prompt.
pub const DEFAULT_PROMPT: &str = "% ";

/// An interactive shell that executes pipelines of external commands.
///
/// Example
/// ```no_run
/// use pipesh::Shell;
/// Shell::new("% ").repl().unwrap();
/// ```
pub struct Shell {
    prompt: String,
}

impl Shell {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    /// Read lines until end of input, executing each as a pipeline.
    ///
    /// Blank lines are skipped without building anything. A failed line
    /// is reported and the loop continues; only end of input (or a
    /// readline failure) ends the shell.
    pub fn repl(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        loop {
            match rl.readline(&self.prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line)?;
                    if let Err(e) = self.run_line(line) {
                        eprintln!("pipesh: {e:#}");
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e).context("reading input"),
            }
        }

        Ok(())
    }

    /// Execute one non-empty input line to completion.
    ///
    /// All per-line state lives in this scope: pipeline, pipe set and
    /// launched pids are created, used and released before the next
    /// prompt, so no line can alias another's descriptors.
    pub fn run_line(&mut self, line: &str) -> Result<()> {
        let mut pipeline = parse_pipeline(line)?;

        let pipes = if pipeline.len() > 1 {
            let set =
                PipeSet::allocate(pipeline.len() - 1).context("creating pipes")?;
            pipes::wire(&mut pipeline, &set);
            Some(set)
        } else {
            None
        };

        // Everything is launched before anything is waited on, so a
        // downstream child blocked on a pipe read cannot stall an
        // upstream launch.
        let mut children = Vec::with_capacity(pipeline.len());
        for cmd in pipeline.commands() {
            match spawn(cmd, pipes.as_ref()) {
                SpawnOutcome::Launched(pid) => children.push(pid),
                SpawnOutcome::CreationFailed(errno) => {
                    eprintln!("pipesh: {}: {errno}", cmd.program());
                }
            }
        }

        // The parent's pipe ends must close before reaping: readers
        // only see EOF once every copy of the upstream write end is
        // gone, and the parent holds one of each.
        drop(pipes);

        reap(&children);
        Ok(())
    }
}

/// Block until every launched child of the current line has terminated,
/// ignoring individual exit statuses.
fn reap(children: &[Pid]) {
    for &pid in children {
        let _ = launcher::syscall(|| waitpid(pid, None));
    }
}
