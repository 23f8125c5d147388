use std::ffi::OsString;
use std::path::{Path, PathBuf};

const GZ: &str = ".gz";
const CLEANED: &str = ".cleaned";
const FASTQ_SUFFIXES: [&str; 2] = [".fastq", ".fq"];

/// Resolve where the cleaned output goes.
///
/// An explicit `output` is kept as given. Otherwise the name is built from
/// `input` next to it: a trailing `.gz` is dropped and `.cleaned` is put in
/// front of a `.fastq`/`.fq` suffix (or appended when there is none).
/// Either way the result ends in `.gz`.
///
/// `sample.fastq` and `sample.fastq.gz` both give `sample.cleaned.fastq.gz`.
pub fn derive_output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    let base = match output {
        Some(out) => out.to_path_buf(),
        None => cleaned_sibling(input),
    };
    ensure_gz(base)
}

fn cleaned_sibling(input: &Path) -> PathBuf {
    let Some(name) = input.file_name() else {
        // "" or "..": nothing to rename, just tag it
        let mut s = input.as_os_str().to_owned();
        s.push(CLEANED);
        return PathBuf::from(s);
    };
    let new_name = match name.to_str() {
        Some(name) => {
            let stem = name.strip_suffix(GZ).unwrap_or(name);
            match FASTQ_SUFFIXES
                .iter()
                .find_map(|sfx| stem.strip_suffix(sfx).map(|head| (head, sfx)))
            {
                Some((head, sfx)) => OsString::from(format!("{head}{CLEANED}{sfx}")),
                None => OsString::from(format!("{stem}{CLEANED}")),
            }
        }
        None => {
            // non-UTF-8 names: no suffix surgery
            let mut s = name.to_owned();
            s.push(CLEANED);
            s
        }
    };
    input.with_file_name(new_name)
}

fn ensure_gz(path: PathBuf) -> PathBuf {
    if path.as_os_str().as_encoded_bytes().ends_with(GZ.as_bytes()) {
        return path;
    }
    let mut s = path.into_os_string();
    s.push(GZ);
    PathBuf::from(s)
}
