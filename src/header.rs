use crate::policy::SpacePolicy;

/// Clean one header line into `out` (appending).
///
/// Leading and trailing ASCII whitespace (newline and `\r` included) is
/// trimmed, spaces are handled per `policy`, and exactly one `\n` is added.
/// Applying it to an already-cleaned header changes nothing.
///
/// Trimming follows `u8::is_ascii_whitespace`: space, `\t`, `\n`, `\x0C`
/// and `\r`. A vertical tab (`\x0B`) is kept, unlike Python's `str.strip()`.
pub fn clean_header_into(line: &[u8], policy: SpacePolicy, out: &mut Vec<u8>) {
    let trimmed = line.trim_ascii();
    out.reserve(trimmed.len() + 1);
    match policy {
        SpacePolicy::Underscore => {
            out.extend(trimmed.iter().map(|&b| if b == b' ' { b'_' } else { b }));
        }
        SpacePolicy::Delete => {
            out.extend(trimmed.iter().copied().filter(|&b| b != b' '));
        }
    }
    out.push(b'\n');
}

/// Owned variant of [`clean_header_into`].
#[inline]
pub fn clean_header(line: &[u8], policy: SpacePolicy) -> Vec<u8> {
    let mut out = Vec::with_capacity(line.len() + 1);
    clean_header_into(line, policy, &mut out);
    out
}

/// Line `index` (0-based) is a header when it opens a 4-line record.
#[inline]
pub fn is_header_line(index: u64) -> bool {
    index % 4 == 0
}
