//! Contains the [`Version`] struct.
//!
//! See the struct level documentation [`Version`].

use std::{fmt::Display, str::FromStr};

use crate::error::{Result, VersionError};

mod pattern {
    use regex::Regex;
    use std::sync::LazyLock;

    pub const KERNEL_RELEASE_: &str = r"^([0-9]+)\.([0-9]+)\.([0-9]+)";

    pub static KERNEL_RELEASE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(KERNEL_RELEASE_).unwrap());
}

/// A `major.minor.patch` version, as used by the Linux kernel.
///
/// Ordering compares `major`, then `minor`, then `patch` as unsigned integers.
/// The segments are not bounded; only [`Version::kernel()`] squeezes them into
/// 8 bits each.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(pub u32, pub u32, pub u32);

impl Version {
    /// Creates a new [`Version`] with the given segments.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self(major, minor, patch)
    }

    /// Unpacks a `LINUX_VERSION_CODE` style code, 8 bits per segment.
    ///
    /// Bits above 23 are ignored.
    pub const fn from_code(code: u32) -> Self {
        Self((code >> 16) & 0xff, (code >> 8) & 0xff, code & 0xff)
    }

    /// Extracts the version at the start of a kernel release string, as
    /// reported by `uname -r`.
    ///
    /// Everything after the leading `major.minor.patch` is ignored, so
    /// `6.7.9-200.fc39.x86_64` yields `6.7.9`.
    ///
    /// # Errors
    /// [`VersionError::InvalidFormat`] carrying the whole `release` when it does
    /// not start with three dot separated numbers.
    pub fn from_kernel_release(release: &str) -> Result<Self> {
        let invalid = || VersionError::InvalidFormat(release.to_owned());

        let prefix = pattern::KERNEL_RELEASE
            .find(release)
            .ok_or_else(invalid)?
            .as_str();
        log::trace!(
            "Kernel release {:?}: version {}, ignoring {:?}",
            release,
            prefix,
            &release[prefix.len()..]
        );

        prefix.parse().map_err(|_| invalid())
    }

    /// Returns the `major` number.
    pub const fn major(self) -> u32 {
        self.0
    }
    /// Returns the `minor` number.
    pub const fn minor(self) -> u32 {
        self.1
    }
    /// Returns the `patch` number.
    pub const fn patch(self) -> u32 {
        self.2
    }

    /// Checks whether `self` sorts strictly before `other`.
    pub fn less(self, other: Self) -> bool {
        self < other
    }

    /// Packs the version the way the kernel's `KERNEL_VERSION()` macro does.
    ///
    /// Kernels 4.4 and 4.9 have a SUBLEVEL above 255, which the kernel clamps
    /// to 255. `major` and `minor` are not clamped, they are truncated to their
    /// low 8 bits like the macro's plain shifts would.
    pub const fn kernel(self) -> u32 {
        let patch = if self.2 > 0xff { 0xff } else { self.2 };
        ((self.0 & 0xff) << 16) | ((self.1 & 0xff) << 8) | patch
    }
}

impl FromStr for Version {
    type Err = VersionError;

    /// Parses `major[.minor[.patch]]`, missing segments are 0.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || VersionError::InvalidFormat(s.to_owned());

        let mut segments = [0; 3];
        for (i, part) in s.split('.').enumerate() {
            let segment = segments.get_mut(i).ok_or_else(invalid)?;
            *segment = parse_segment(part).ok_or_else(invalid)?;
        }

        Ok(segments.into())
    }
}

// `u32::from_str` accepts a leading `+`, a segment is digits only.
fn parse_segment(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.0, self.1, self.2)
    }
}

impl From<(u32, u32, u32)> for Version {
    fn from(vals: (u32, u32, u32)) -> Self {
        Self(vals.0, vals.1, vals.2)
    }
}

impl From<Version> for (u32, u32, u32) {
    fn from(v: Version) -> Self {
        (v.0, v.1, v.2)
    }
}

impl From<[u32; 3]> for Version {
    fn from(vals: [u32; 3]) -> Self {
        Self(vals[0], vals[1], vals[2])
    }
}

impl From<Version> for [u32; 3] {
    fn from(v: Version) -> Self {
        [v.0, v.1, v.2]
    }
}
