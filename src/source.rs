use crate::error::CleanError;
use crate::helper::HelperProcess;
use crate::policy::Codec;
use crate::util::{has_gz_extension, looks_like_gzip};

#[cfg(feature = "gzip")]
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};

const BUF_CAPACITY: usize = 256 * 1024;

/// Input side of a cleaning run: a line source plus, for helper
/// decompression, the helper that feeds it.
pub(crate) struct InputStream {
    // dropped before `helper`
    rdr: Box<dyn BufRead + Send>,
    helper: Option<HelperProcess>,
    pub(crate) gzip: bool,
}

impl InputStream {
    /// Open `path`. `.gz` is detected by extension or magic bytes.
    pub(crate) fn open(path: &Path, codec: &Codec) -> Result<Self, CleanError> {
        let open_err = |source| CleanError::Open {
            path: path.to_path_buf(),
            source,
        };
        let f = File::open(path).map_err(open_err)?;
        let is_gz = has_gz_extension(path) || looks_like_gzip(&f).unwrap_or(false);

        if is_gz {
            if let Codec::External(program) = codec {
                drop(f);
                let mut helper = HelperProcess::spawn(
                    program,
                    Command::new(program)
                        .arg("-dc")
                        .arg(path)
                        .stdin(Stdio::null())
                        .stdout(Stdio::piped()),
                )?;
                let stdout = helper.take_stdout()?;
                log::info!("reading {} through '{program}'", path.display());
                return Ok(Self {
                    rdr: Box::new(BufReader::with_capacity(BUF_CAPACITY, stdout)),
                    helper: Some(helper),
                    gzip: true,
                });
            }

            #[cfg(feature = "gzip")]
            {
                log::info!("reading gzip input {}", path.display());
                let dec = MultiGzDecoder::new(f);
                return Ok(Self {
                    rdr: Box::new(BufReader::with_capacity(BUF_CAPACITY, dec)),
                    helper: None,
                    gzip: true,
                });
            }
            #[cfg(not(feature = "gzip"))]
            {
                return Err(CleanError::GzipDisabled {
                    path: path.to_path_buf(),
                });
            }
        }

        log::info!("reading plain input {}", path.display());
        #[cfg(feature = "mmap")]
        let rdr: Box<dyn BufRead + Send> = {
            use memmap2::Mmap;
            use std::io::Cursor;
            // Safety: the input is only read; concurrent truncation by
            // another process is outside what this tool guards against.
            let mmap = unsafe { Mmap::map(&f) }.map_err(open_err)?;
            Box::new(Cursor::new(mmap))
        };
        #[cfg(not(feature = "mmap"))]
        let rdr: Box<dyn BufRead + Send> = Box::new(BufReader::with_capacity(BUF_CAPACITY, f));

        Ok(Self {
            rdr,
            helper: None,
            gzip: false,
        })
    }

    pub(crate) fn reader(&mut self) -> &mut (dyn BufRead + Send) {
        self.rdr.as_mut()
    }

    /// Close the stream, then reap the helper and check its status.
    pub(crate) fn finish(self) -> Result<(), CleanError> {
        let Self { rdr, helper, .. } = self;
        drop(rdr);
        match helper {
            Some(h) => h.finish(),
            None => Ok(()),
        }
    }
}
