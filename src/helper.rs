//! Guard around an external gzip helper (`pigz`, `gzip`, ...).
//!
//! The guard owns the child. Whoever holds the child's pipe must drop it
//! before the guard so the helper sees EOF/EPIPE and can exit; `Drop` then
//! reaps it. Callers encode that order by declaring the pipe field first.

use crate::error::CleanError;

use std::io;
use std::process::{Child, ChildStdin, ChildStdout, Command};

pub(crate) struct HelperProcess {
    program: String,
    child: Option<Child>,
}

impl HelperProcess {
    pub(crate) fn spawn(program: &str, cmd: &mut Command) -> Result<Self, CleanError> {
        let child = cmd.spawn().map_err(|source| CleanError::Spawn {
            program: program.to_string(),
            source,
        })?;
        log::debug!("started helper '{program}' (pid {})", child.id());
        Ok(Self {
            program: program.to_string(),
            child: Some(child),
        })
    }

    pub(crate) fn take_stdout(&mut self) -> Result<ChildStdout, CleanError> {
        self.child
            .as_mut()
            .and_then(|c| c.stdout.take())
            .ok_or_else(|| self.missing_pipe("stdout"))
    }

    pub(crate) fn take_stdin(&mut self) -> Result<ChildStdin, CleanError> {
        self.child
            .as_mut()
            .and_then(|c| c.stdin.take())
            .ok_or_else(|| self.missing_pipe("stdin"))
    }

    fn missing_pipe(&self, which: &str) -> CleanError {
        CleanError::Spawn {
            program: self.program.clone(),
            source: io::Error::new(io::ErrorKind::BrokenPipe, format!("no {which} pipe")),
        }
    }

    /// Wait for the helper and turn a failing exit status into an error.
    /// The helper's pipes must already be closed.
    pub(crate) fn finish(mut self) -> Result<(), CleanError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child.wait().map_err(|source| CleanError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        log::debug!("helper '{}' exited: {status}", self.program);
        if status.success() {
            Ok(())
        } else {
            Err(CleanError::Helper {
                program: std::mem::take(&mut self.program),
                status,
            })
        }
    }
}

impl Drop for HelperProcess {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            drop(child.stdin.take());
            drop(child.stdout.take());
            match child.wait() {
                Ok(status) => log::debug!("helper '{}' exited: {status}", self.program),
                Err(e) => log::debug!("could not reap helper '{}': {e}", self.program),
            }
        }
    }
}
