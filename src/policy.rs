/// What happens to space characters inside a header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpacePolicy {
    /// Replace every space with `_` (`read one` -> `read_one`).
    #[default]
    Underscore,
    /// Drop spaces entirely (`read one` -> `readone`).
    Delete,
}

/// Who does the gzip work.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Codec {
    /// flate2, inside this process.
    #[default]
    InProcess,
    /// An external gzip-compatible program such as `pigz` or `gzip`.
    /// Called as `<program> -dc <input>` and `<program> -c -<level>`.
    External(String),
}

#[derive(Debug, Clone)]
pub struct CleanOptions {
    pub space_policy: SpacePolicy,
    pub codec: Codec,
    /// gzip level, 0..=9.
    pub level: u32,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            space_policy: SpacePolicy::Underscore,
            codec: Codec::InProcess,
            level: 6, // gzip/pigz default
        }
    }
}
