//! Streaming FASTQ header cleaner.
//!
//! - Plain and `.gz` input (auto-detect by extension or magic bytes).
//! - Every 4th line (the read header) is trimmed and its spaces replaced
//!   with `_` (or removed, see [`SpacePolicy`]); other lines pass through
//!   byte for byte.
//! - Output is always gzip, written by flate2 or by an external helper
//!   such as `pigz` ([`Codec::External`]).
//! - Streaming, line by line (no full-file buffering).
//! - Optional `mmap` for plain files; `zlib` feature for the system zlib.
//! - Optional async API behind `async` feature.

pub mod cleaner;
pub mod error;
pub mod header;
mod helper;
pub mod path;
pub mod policy;
pub mod report;
mod sink;
mod source;
mod util;

#[cfg(feature = "async")]
pub mod async_cleaner;

pub use crate::cleaner::{HeaderCleaner, clean_file};
pub use crate::error::{CleanError, LineContext};
pub use crate::header::{clean_header, clean_header_into, is_header_line};
pub use crate::path::derive_output_path;
pub use crate::policy::{CleanOptions, Codec, SpacePolicy};
pub use crate::report::{CleanReport, CleanStats};

#[cfg(feature = "async")]
pub use crate::async_cleaner::clean_file_async;
