#![cfg(feature = "async")]

use crate::error::{CleanError, LineContext};
use crate::header::{clean_header_into, is_header_line};
use crate::path::derive_output_path;
use crate::policy::{CleanOptions, Codec};
use crate::report::{CleanReport, CleanStats};
use crate::util::{has_gz_extension, same_file};

use async_compression::Level;
use async_compression::tokio::bufread::GzipDecoder;
use async_compression::tokio::write::GzipEncoder;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::io::{AsyncReadExt, AsyncSeekExt, SeekFrom};

const BUF_CAPACITY: usize = 256 * 1024;

/// Async counterpart of [`clean_file`](crate::clean_file). In-process gzip only.
pub async fn clean_file_async<P: AsRef<Path>>(
    input: P,
    output: Option<&Path>,
    opts: &CleanOptions,
) -> Result<CleanReport, CleanError> {
    if opts.codec != Codec::InProcess {
        return Err(CleanError::UnsupportedCodec);
    }
    let input = input.as_ref();
    let out_path = derive_output_path(input, output);
    if same_file(input, &out_path) {
        return Err(CleanError::SameFile { path: out_path });
    }

    let mut f = File::open(input).await.map_err(|source| CleanError::Open {
        path: input.to_path_buf(),
        source,
    })?;
    let input_gzip =
        has_gz_extension(input) || looks_like_gzip_async(&mut f).await.unwrap_or(false);

    let mut rdr: Box<dyn AsyncBufRead + Unpin + Send> = if input_gzip {
        let mut gz = GzipDecoder::new(BufReader::with_capacity(BUF_CAPACITY, f));
        gz.multiple_members(true);
        Box::new(BufReader::with_capacity(BUF_CAPACITY, gz))
    } else {
        Box::new(BufReader::with_capacity(BUF_CAPACITY, f))
    };

    let out = File::create(&out_path)
        .await
        .map_err(|source| CleanError::Create {
            path: out_path.clone(),
            source,
        })?;
    let level = Level::Precise(opts.level.min(9) as i32);
    let mut enc = GzipEncoder::with_quality(BufWriter::with_capacity(BUF_CAPACITY, out), level);

    let mut line = Vec::with_capacity(256);
    let mut header = Vec::with_capacity(256);
    let mut ctx = LineContext::default();
    let mut stats = CleanStats::default();

    loop {
        line.clear();
        let at = LineContext {
            line_num: ctx.line_num + 1,
            ..ctx
        };
        let n = rdr
            .read_until(b'\n', &mut line)
            .await
            .map_err(|e| CleanError::io_err(e, at))?;
        if n == 0 {
            break;
        }

        let written = if is_header_line(stats.lines) {
            header.clear();
            clean_header_into(&line, opts.space_policy, &mut header);
            stats.headers += 1;
            enc.write_all(&header).await
        } else {
            enc.write_all(&line).await
        };
        written.map_err(|e| CleanError::io_err(e, at))?;

        stats.lines += 1;
        ctx.line_num += 1;
        ctx.byte_pos += n as u64;
    }

    drop(rdr);
    // writes the gzip trailer and flushes the file
    enc.shutdown().await.map_err(|e| CleanError::io_err(e, ctx))?;

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

async fn looks_like_gzip_async(f: &mut File) -> io::Result<bool> {
    let pos = f.stream_position().await?;
    let mut magic = [0u8; 2];
    let n = f.read(&mut magic).await?;
    f.seek(SeekFrom::Start(pos)).await?;
    Ok(n >= 2 && magic == [0x1F, 0x8B])
}
