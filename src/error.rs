use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Position in the input stream when an error was raised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineContext {
    pub byte_pos: u64,
    pub line_num: u64,
}

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("cannot open input {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot create output {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error at line {} (byte {}): {source}", .ctx.line_num, .ctx.byte_pos)]
    Io {
        #[source]
        source: io::Error,
        ctx: LineContext,
    },
    #[error("cannot start helper '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("helper '{program}' failed: {status}")]
    Helper { program: String, status: ExitStatus },
    #[error("output {} would overwrite the input", .path.display())]
    SameFile { path: PathBuf },
    #[error("gzip input {} requires the `gzip` feature or an external helper", .path.display())]
    GzipDisabled { path: PathBuf },
    #[error("external helpers are not supported by the async cleaner")]
    UnsupportedCodec,
}

impl CleanError {
    pub(crate) fn io_err(source: io::Error, ctx: LineContext) -> Self {
        Self::Io { source, ctx }
    }
}
