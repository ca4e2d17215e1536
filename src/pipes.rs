//! Pipe allocation and descriptor wiring.

use crate::command::Pipeline;
use nix::unistd::pipe;
use std::os::fd::{AsRawFd, OwnedFd, RawFd};

/// The OS pipes connecting adjacent commands of one pipeline, in
/// creation order: pair `i` joins command `i` to command `i + 1`.
///
/// Each end is an [`OwnedFd`], so dropping the set closes every
/// descriptor the parent still holds exactly once, on every exit path.
#[derive(Debug)]
pub struct PipeSet {
    pairs: Vec<(OwnedFd, OwnedFd)>,
}

impl PipeSet {
    /// Create `n` pipes.
    ///
    /// Any individual `pipe()` failure aborts the whole allocation and
    /// the line that asked for it; pairs created before the failure are
    /// closed on drop.
    pub fn allocate(n: usize) -> nix::Result<Self> {
        let mut pairs = Vec::with_capacity(n);
        for _ in 0..n {
            pairs.push(pipe()?);
        }
        Ok(Self { pairs })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Read end of pair `i`.
    pub fn read_end(&self, i: usize) -> RawFd {
        self.pairs[i].0.as_raw_fd()
    }

    /// Write end of pair `i`.
    pub fn write_end(&self, i: usize) -> RawFd {
        self.pairs[i].1.as_raw_fd()
    }

    /// Raw views of every descriptor, read end before write end per
    /// pair. Ownership stays with the set.
    pub fn raw_fds(&self) -> impl Iterator<Item = RawFd> + '_ {
        self.pairs
            .iter()
            .flat_map(|(r, w)| [r.as_raw_fd(), w.as_raw_fd()])
    }
}

/// Assign pipe ends to commands by position.
///
/// Command `i` writes into pair `i` when it has a successor and reads
/// from pair `i - 1` when it has a predecessor. The first command's
/// input and the last command's output stay unset so those children
/// inherit the shell's own streams. Each pipe end is handed to exactly
/// one command.
pub fn wire(pipeline: &mut Pipeline, pipes: &PipeSet) {
    debug_assert_eq!(pipes.len() + 1, pipeline.len());
    let last = pipeline.len() - 1;
    for (i, cmd) in pipeline.commands_mut().iter_mut().enumerate() {
        if i < last {
            cmd.fd_out = Some(pipes.write_end(i));
        }
        if i > 0 {
            cmd.fd_in = Some(pipes.read_end(i - 1));
        }
    }
}
