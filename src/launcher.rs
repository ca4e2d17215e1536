//! Forking and exec'ing one child per pipeline command.

use crate::command::Command;
use crate::pipes::PipeSet;
use nix::errno::Errno;
use nix::libc::{STDIN_FILENO, STDOUT_FILENO};
use nix::unistd::{self, ForkResult, Pid, dup2, execvp, fork};
use std::ffi::CString;
use std::process;

/// Result of one spawn attempt.
///
/// A creation failure is data rather than an `Err` so the run loop can
/// log it, skip the command and keep launching its siblings.
#[derive(Debug)]
pub enum SpawnOutcome {
    /// Child created; the orchestrator reaps the handle later.
    Launched(Pid),
    /// No child exists for this command.
    CreationFailed(Errno),
}

/// Retry a syscall while it reports EINTR.
pub(crate) fn syscall<T>(mut f: impl FnMut() -> nix::Result<T>) -> nix::Result<T> {
    loop {
        match f() {
            Err(Errno::EINTR) => continue,
            result => return result,
        }
    }
}

/// Fork a child for `cmd`.
///
/// The parent returns immediately with the outcome; it does not wait.
/// The child never returns: it either becomes the command's program or
/// exits with a failure status.
pub fn spawn(cmd: &Command, pipes: Option<&PipeSet>) -> SpawnOutcome {
    // Built before forking so the child allocates nothing on its way
    // to exec. An interior NUL cannot come out of the tokenizer, but a
    // caller-built argv could carry one.
    let argv: Vec<CString> = match cmd
        .args
        .iter()
        .map(|arg| CString::new(arg.as_str()))
        .collect()
    {
        Ok(argv) => argv,
        Err(_) => return SpawnOutcome::CreationFailed(Errno::EINVAL),
    };

    match unsafe { fork() } {
        Ok(ForkResult::Parent { child }) => SpawnOutcome::Launched(child),
        Ok(ForkResult::Child) => exec_child(cmd, &argv, pipes),
        Err(errno) => SpawnOutcome::CreationFailed(errno),
    }
}

/// Child-side entry: redirect standard streams, drop every pipe
/// descriptor, then replace the process image. Every path ends in exec
/// or a process exit; control never flows back to the run loop.
fn exec_child(cmd: &Command, argv: &[CString], pipes: Option<&PipeSet>) -> ! {
    if let Some(fd) = cmd.fd_in {
        if let Err(e) = syscall(|| dup2(fd, STDIN_FILENO)) {
            eprintln!("pipesh: {}: dup2 stdin: {e}", cmd.program());
            process::exit(1);
        }
    }
    if let Some(fd) = cmd.fd_out {
        if let Err(e) = syscall(|| dup2(fd, STDOUT_FILENO)) {
            eprintln!("pipesh: {}: dup2 stdout: {e}", cmd.program());
            process::exit(1);
        }
    }

    // Duplication made independent copies of the two ends this child
    // uses, so all originals go: any pipe end left open here would keep
    // a sibling's reader from ever seeing EOF.
    if let Some(pipes) = pipes {
        for fd in pipes.raw_fds() {
            let _ = unistd::close(fd);
        }
    }

    match execvp(&argv[0], argv) {
        Err(e) => {
            eprintln!("pipesh: {}: {e}", cmd.program());
            process::exit(127);
        }
        Ok(infallible) => match infallible {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::parser::parse_pipeline;
    use crate::pipes::{self, PipeSet};
    use nix::sys::wait::waitpid;
    use nix::unistd::pipe;
    use std::fs::File;
    use std::io::Read;
    use std::os::fd::AsRawFd;

    /// Run `line` as a pipeline with the final stage's stdout sent into
    /// a test-owned pipe; returns whatever the pipeline wrote.
    fn run_capturing(line: &str) -> String {
        let mut pipeline = parse_pipeline(line).expect("parse");
        let pipes = if pipeline.len() > 1 {
            let set = PipeSet::allocate(pipeline.len() - 1).expect("pipes");
            pipes::wire(&mut pipeline, &set);
            Some(set)
        } else {
            None
        };

        let (capture_rd, capture_wr) = pipe().expect("capture pipe");
        let last = pipeline.len() - 1;
        pipeline.commands_mut()[last].fd_out = Some(capture_wr.as_raw_fd());

        let mut children = Vec::new();
        for cmd in pipeline.commands() {
            match spawn(cmd, pipes.as_ref()) {
                SpawnOutcome::Launched(pid) => children.push(pid),
                SpawnOutcome::CreationFailed(e) => panic!("fork failed: {e}"),
            }
        }

        // Parent copies must close before reading, or EOF never comes.
        drop(pipes);
        drop(capture_wr);

        let mut out = String::new();
        File::from(capture_rd)
            .read_to_string(&mut out)
            .expect("read pipeline output");
        for pid in children {
            syscall(|| waitpid(pid, None)).expect("waitpid");
        }
        out
    }

    #[test]
    fn single_command_writes_to_its_stdout() {
        assert_eq!(run_capturing("echo hi"), "hi\n");
    }

    #[test]
    fn two_stage_pipeline_emits_output_exactly_once() {
        assert_eq!(run_capturing("printf a|cat"), "a");
    }

    #[test]
    fn middle_stage_passes_data_through() {
        assert_eq!(run_capturing("printf a\\nb\\nc\\n|cat|wc -l").trim(), "3");
    }

    #[test]
    fn missing_program_fails_alone() {
        // The first child exits 127 without ever writing; its sibling
        // still runs, sees EOF and completes normally.
        assert_eq!(run_capturing("pipesh-no-such-program|cat"), "");
    }

    #[test]
    fn argv_with_interior_nul_is_a_creation_failure() {
        let cmd = Command::new(vec!["echo".into(), "a\0b".into()]);
        match spawn(&cmd, None) {
            SpawnOutcome::CreationFailed(errno) => assert_eq!(errno, Errno::EINVAL),
            SpawnOutcome::Launched(pid) => {
                let _ = syscall(|| waitpid(pid, None));
                panic!("expected creation failure");
            }
        }
    }
}
