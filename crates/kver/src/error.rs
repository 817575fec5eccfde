//! This module contains all errors that can be returned by functions in this crate.

use std::io;

use thiserror::Error;

/// Result alias for version parsing.
pub type Result<T, E = VersionError> = ::std::result::Result<T, E>;

/// Returned when a string can not be turned into a [`Version`](crate::Version).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The input has the wrong number of segments, a non-numeric segment,
    /// or no leading version could be extracted from it.
    #[error("invalid version: {0}")]
    InvalidFormat(String),
}

/// Contains all possible errors returned by the running kernel queries in
/// [`kernel`](crate::kernel).
#[derive(Debug, Error)]
pub enum KernelError {
    /// The [`ReleaseSource`](crate::ReleaseSource) failed.
    #[error("failed to query kernel release: {0}")]
    Query(#[source] io::Error),
    /// The release string did not start with a kernel version.
    #[error("failed to parse kernel release: {0}")]
    Parse(#[from] VersionError),
}
