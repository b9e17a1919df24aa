/*!
    Source configuration and seek flags.
*/

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/**
    Configuration for opening a media source.
*/
#[derive(Clone, Debug, Default)]
pub struct SourceConfig {
    /// Print the container description to stderr after opening.
    pub dump_format: bool,
}

impl SourceConfig {
    /**
        Enable or disable dumping the container description on open.
    */
    pub fn with_dump_format(mut self, dump_format: bool) -> Self {
        self.dump_format = dump_format;
        self
    }
}

/**
    Flags controlling how a seek lands.

    Values match FFmpeg's `AVSEEK_FLAG_*` constants and are passed through
    unchanged. Combine them with `|`.
*/
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SeekFlags(i32);

impl SeekFlags {
    /// Seek to the nearest keyframe at or after the timestamp.
    pub const NONE: Self = Self(0);
    /// Seek to the nearest keyframe at or before the timestamp.
    pub const BACKWARD: Self = Self(1);
    /// Interpret the timestamp as a byte offset.
    pub const BYTE: Self = Self(2);
    /// Allow landing on non-keyframes.
    pub const ANY: Self = Self(4);
    /// Interpret the timestamp as a frame number.
    pub const FRAME: Self = Self(8);

    /**
        Raw flag bits, as passed to `av_seek_frame`.
    */
    pub const fn bits(self) -> i32 {
        self.0
    }

    /**
        Returns true if all flags in `other` are set.
    */
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for SeekFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SeekFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for SeekFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::BACKWARD, "BACKWARD"),
            (Self::BYTE, "BYTE"),
            (Self::ANY, "ANY"),
            (Self::FRAME, "FRAME"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        if set.is_empty() {
            write!(f, "SeekFlags(NONE)")
        } else {
            write!(f, "SeekFlags({})", set.join(" | "))
        }
    }
}
