use crate::error::{CleanError, LineContext};
use crate::helper::HelperProcess;
use crate::policy::{CleanOptions, Codec};

use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::{ChildStdin, Command, Stdio};

const BUF_CAPACITY: usize = 256 * 1024;

/// Gzip output: flate2 in-process, or a helper whose stdout is the file.
pub(crate) enum OutputSink {
    InProcess(GzEncoder<BufWriter<File>>),
    External {
        // dropped before `helper`
        stdin: BufWriter<ChildStdin>,
        helper: HelperProcess,
    },
}

impl OutputSink {
    /// Create (or truncate) `path` and attach the compressor to it.
    pub(crate) fn create(path: &Path, opts: &CleanOptions) -> Result<Self, CleanError> {
        let file = File::create(path).map_err(|source| CleanError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let level = opts.level.min(9);

        match &opts.codec {
            Codec::InProcess => {
                log::info!("writing gzip output {} (level {level})", path.display());
                let w = BufWriter::with_capacity(BUF_CAPACITY, file);
                Ok(Self::InProcess(GzEncoder::new(w, Compression::new(level))))
            }
            Codec::External(program) => {
                // gzip has no -0
                let level = level.max(1);
                let mut helper = HelperProcess::spawn(
                    program,
                    Command::new(program)
                        .arg("-c")
                        .arg(format!("-{level}"))
                        .stdin(Stdio::piped())
                        .stdout(file),
                )?;
                let stdin = helper.take_stdin()?;
                log::info!("writing {} through '{program}'", path.display());
                Ok(Self::External {
                    stdin: BufWriter::with_capacity(BUF_CAPACITY, stdin),
                    helper,
                })
            }
        }
    }

    /// Flush everything, write the gzip trailer (or close the helper's
    /// stdin) and reap the helper.
    pub(crate) fn finish(self, ctx: LineContext) -> Result<(), CleanError> {
        let io_err = |e| CleanError::io_err(e, ctx);
        match self {
            Self::InProcess(enc) => {
                let mut w = enc.finish().map_err(io_err)?;
                w.flush().map_err(io_err)
            }
            Self::External { mut stdin, helper } => {
                let flushed = stdin.flush();
                drop(stdin);
                // reap first: a dead helper explains a broken pipe better
                helper.finish()?;
                flushed.map_err(io_err)
            }
        }
    }
}

impl OutputSink {
    /// Release after a failed write: close the stream without finishing it
    /// and reap the helper. A helper that exited non-zero is returned as
    /// [`CleanError::Helper`].
    pub(crate) fn abort(self) -> Result<(), CleanError> {
        match self {
            // GzEncoder's drop still writes the trailer; the partial file stays
            Self::InProcess(enc) => {
                drop(enc);
                Ok(())
            }
            Self::External { stdin, helper } => {
                drop(stdin);
                helper.finish()
            }
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::InProcess(enc) => enc.write(buf),
            Self::External { stdin, .. } => stdin.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Self::InProcess(enc) => enc.write_all(buf),
            Self::External { stdin, .. } => stdin.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::InProcess(enc) => enc.flush(),
            Self::External { stdin, .. } => stdin.flush(),
        }
    }
}
