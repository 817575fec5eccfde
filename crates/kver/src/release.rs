//! Sources for the raw kernel release string.
//!
//! See [`ReleaseSource`].

use std::io;

/// Supplies the release string of the running kernel, e.g. `6.7.9-200.fc39.x86_64`.
///
/// Every closure returning [`io::Result<String>`] is a [`ReleaseSource`], which
/// makes it easy to substitute a fixed release:
///
/// ```
/// use kver::{kernel_version_from, Version};
///
/// let source = || -> std::io::Result<String> { Ok(String::from("5.4.0-65-generic")) };
/// assert_eq!(kernel_version_from(&source).unwrap(), Version(5, 4, 0));
/// ```
pub trait ReleaseSource {
    /// Queries the release string.
    ///
    /// # Errors
    /// Whatever the underlying query fails with.
    fn release(&self) -> io::Result<String>;
}

impl<F> ReleaseSource for F
where
    F: Fn() -> io::Result<String>,
{
    fn release(&self) -> io::Result<String> {
        self()
    }
}

/// Reads the `release` field of `uname(2)`, the same string `uname -r` prints.
#[cfg(unix)]
#[derive(Debug, Default, Clone, Copy)]
pub struct Uname;

#[cfg(unix)]
impl ReleaseSource for Uname {
    fn release(&self) -> io::Result<String> {
        let uts = nix::sys::utsname::uname()?;
        uts.release()
            .to_str()
            .map(str::to_owned)
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidData, "release is not valid UTF-8")
            })
    }
}

/// Always reports the same release string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedRelease(pub String);

impl ReleaseSource for FixedRelease {
    fn release(&self) -> io::Result<String> {
        Ok(self.0.clone())
    }
}

impl From<&str> for FixedRelease {
    fn from(release: &str) -> Self {
        Self(release.to_owned())
    }
}
