use crate::error::{CleanError, LineContext};
use crate::header::{clean_header_into, is_header_line};
use crate::path::derive_output_path;
use crate::policy::{CleanOptions, SpacePolicy};
use crate::report::{CleanReport, CleanStats};
use crate::sink::OutputSink;
use crate::source::InputStream;
use crate::util::same_file;

use std::io::{BufRead, ErrorKind, Write};
use std::path::Path;

/// Streaming header cleaner over any `BufRead`/`Write` pair.
///
/// Lines are classified purely by position: line `i` is a header when
/// `i % 4 == 0`. Headers go through [`clean_header_into`]; every other
/// line is copied byte for byte, terminator included.
#[derive(Debug)]
pub struct HeaderCleaner {
    policy: SpacePolicy,
    line_num: u64,
    byte_pos: u64,
    headers: u64,
    line: Vec<u8>,
    header: Vec<u8>,
}

impl HeaderCleaner {
    pub fn new(policy: SpacePolicy) -> Self {
        Self {
            policy,
            line_num: 0,
            byte_pos: 0,
            headers: 0,
            line: Vec::with_capacity(256),
            header: Vec::with_capacity(256),
        }
    }

    /// Copy `rdr` to `out`, cleaning header lines. Does not flush `out`.
    pub fn clean<R, W>(&mut self, rdr: &mut R, out: &mut W) -> Result<CleanStats, CleanError>
    where
        R: BufRead + ?Sized,
        W: Write + ?Sized,
    {
        self.line_num = 0;
        self.byte_pos = 0;
        self.headers = 0;

        loop {
            self.line.clear();
            let ctx = self.ctx();
            let n = rdr
                .read_until(b'\n', &mut self.line)
                .map_err(|e| CleanError::io_err(e, ctx))?;
            if n == 0 {
                break;
            }

            let written = if is_header_line(self.line_num) {
                self.header.clear();
                clean_header_into(&self.line, self.policy, &mut self.header);
                self.headers += 1;
                out.write_all(&self.header)
            } else {
                out.write_all(&self.line)
            };
            written.map_err(|e| CleanError::io_err(e, ctx))?;

            self.line_num += 1;
            self.byte_pos += n as u64;
        }

        Ok(self.stats())
    }

    #[inline]
    pub fn stats(&self) -> CleanStats {
        CleanStats {
            lines: self.line_num,
            headers: self.headers,
        }
    }

    #[inline]
    fn ctx(&self) -> LineContext {
        LineContext {
            byte_pos: self.byte_pos,
            line_num: self.line_num + 1,
        }
    }
}

/// Clean the headers of the FASTQ file at `input` into a gzip file.
///
/// The output path comes from [`derive_output_path`]. The input is opened
/// before the output is created, so a missing input leaves no file behind.
/// A failure mid-stream leaves the partial output on disk.
pub fn clean_file<P: AsRef<Path>>(
    input: P,
    output: Option<&Path>,
    opts: &CleanOptions,
) -> Result<CleanReport, CleanError> {
    let input = input.as_ref();
    let out_path = derive_output_path(input, output);
    if same_file(input, &out_path) {
        return Err(CleanError::SameFile { path: out_path });
    }

    let mut src = InputStream::open(input, &opts.codec)?;
    let mut sink = OutputSink::create(&out_path, opts)?;
    let mut cleaner = HeaderCleaner::new(opts.space_policy);

    let stats = match cleaner.clean(src.reader(), &mut sink) {
        Ok(stats) => stats,
        Err(err) => return Err(release_after_error(err, src, sink)),
    };
    let input_gzip = src.gzip;
    let end = LineContext {
        byte_pos: cleaner.byte_pos,
        line_num: stats.lines,
    };

    src.finish()?;
    sink.finish(end)?;

    if stats.partial_record() {
        log::debug!(
            "{}: {} lines is not a whole number of records",
            input.display(),
            stats.lines
        );
    }
    log::info!(
        "cleaned {} headers over {} lines into {}",
        stats.headers,
        stats.lines,
        out_path.display()
    );

    Ok(CleanReport {
        output: out_path,
        input_gzip,
        stats,
    })
}

/// Close both ends after the loop failed: input and its helper first, then
/// output and its helper. A broken pipe towards a compression helper that
/// exited non-zero is reported as that helper's failure.
fn release_after_error(err: CleanError, src: InputStream, sink: OutputSink) -> CleanError {
    if let Err(e) = src.finish() {
        log::debug!("input released after error: {e}");
    }
    let out = sink.abort();
    match (err, out) {
        (CleanError::Io { source, .. }, Err(helper @ CleanError::Helper { .. }))
            if source.kind() == ErrorKind::BrokenPipe =>
        {
            helper
        }
        (err, out) => {
            if let Err(e) = out {
                log::debug!("output released after error: {e}");
            }
            err
        }
    }
}
