//! Queries about the running kernel.
//!
//! Nothing is cached, every call asks the [`ReleaseSource`] again.

use crate::{
    error::{KernelError, Result},
    release::ReleaseSource,
    version::Version,
};

/// Returns the raw release string of the running kernel, as `uname -r` prints it.
///
/// # Errors
/// [`KernelError::Query`] when `uname(2)` fails or its release is not UTF-8.
#[cfg(unix)]
pub fn kernel_release() -> Result<String, KernelError> {
    kernel_release_from(&crate::release::Uname)
}

/// Returns the version of the running kernel.
///
/// # Errors
/// - [`KernelError::Query`] when the release string can not be queried
/// - [`KernelError::Parse`] when the release string does not start with a version
#[cfg(unix)]
pub fn kernel_version() -> Result<Version, KernelError> {
    kernel_version_from(&crate::release::Uname)
}

/// Same as [`kernel_release()`], but asks `source` for the release.
///
/// # Errors
/// [`KernelError::Query`] wrapping the error of `source`.
pub fn kernel_release_from<S>(source: &S) -> Result<String, KernelError>
where
    S: ReleaseSource + ?Sized,
{
    let release = source.release().map_err(KernelError::Query)?;
    log::debug!("Kernel release: {}", release);
    Ok(release)
}

/// Same as [`kernel_version()`], but asks `source` for the release.
///
/// # Errors
/// - [`KernelError::Query`] wrapping the error of `source`
/// - [`KernelError::Parse`] when the release does not start with a version
pub fn kernel_version_from<S>(source: &S) -> Result<Version, KernelError>
where
    S: ReleaseSource + ?Sized,
{
    let release = kernel_release_from(source)?;
    let version = Version::from_kernel_release(&release)?;
    log::debug!("Kernel version: {} (code {:#08x})", version, version.kernel());
    Ok(version)
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, io};

    use super::*;
    use crate::{error::VersionError, release::FixedRelease};

    #[test]
    fn version_from_fixed_release() {
        let v = kernel_version_from(&FixedRelease::from("6.7.9-200.fc39.x86_64")).unwrap();
        assert_eq!(v, Version(6, 7, 9));
        assert_eq!(v.kernel(), 0x060709);
    }

    #[test]
    fn release_is_passed_through() {
        let release = kernel_release_from(&FixedRelease::from("5.4.0-65-generic")).unwrap();
        assert_eq!(release, "5.4.0-65-generic");
    }

    #[test]
    fn unparsable_release() {
        let err = kernel_version_from(&FixedRelease::from("5.4")).unwrap_err();
        assert!(matches!(
            &err,
            KernelError::Parse(VersionError::InvalidFormat(s)) if s == "5.4"
        ));
        assert_eq!(err.to_string(), "failed to parse kernel release: invalid version: 5.4");
    }

    #[test]
    fn failing_source() {
        let source = || -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "uname denied"))
        };

        let err = kernel_release_from(&source).unwrap_err();
        assert!(matches!(&err, KernelError::Query(e) if e.kind() == io::ErrorKind::PermissionDenied));
        assert_eq!(err.to_string(), "failed to query kernel release: uname denied");

        let err = kernel_version_from(&source).unwrap_err();
        assert!(matches!(err, KernelError::Query(_)));
    }

    #[test]
    fn source_is_queried_every_time() {
        let calls = Cell::new(0);
        let source = || -> io::Result<String> {
            calls.set(calls.get() + 1);
            Ok(String::from("6.1.0"))
        };

        kernel_version_from(&source).unwrap();
        kernel_version_from(&source).unwrap();
        kernel_release_from(&source).unwrap();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn dyn_source() {
        let source: Box<dyn ReleaseSource> = Box::new(FixedRelease::from("4.9.337"));
        let v = kernel_version_from(source.as_ref()).unwrap();
        assert_eq!(v, Version(4, 9, 337));
        assert_eq!(v.kernel(), 0x0409ff);
    }
}
