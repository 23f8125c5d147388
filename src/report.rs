use std::path::PathBuf;

/// Counts from one pass over a line stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    /// Lines read (and written).
    pub lines: u64,
    /// Header lines rewritten, i.e. lines at index `0 mod 4`.
    pub headers: u64,
}

impl CleanStats {
    /// Input did not end on a record boundary.
    #[inline]
    pub fn partial_record(&self) -> bool {
        self.lines % 4 != 0
    }
}

/// Result of [`clean_file`](crate::clean_file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanReport {
    pub output: PathBuf,
    pub input_gzip: bool,
    pub stats: CleanStats,
}
