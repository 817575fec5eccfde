#![warn(
    missing_docs,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::missing_safety_doc
)]

//! Kernel style versions.
//!
//! Parses dotted versions, `LINUX_VERSION_CODE` style packed codes and kernel
//! release strings into a [`Version`], and packs a [`Version`] back into the
//! code the kernel itself would compute.

pub mod error;
pub mod kernel;
pub mod release;
#[cfg(feature = "serde-serialize")]
mod serde;
pub mod version;

pub use error::{KernelError, Result, VersionError};
#[cfg(unix)]
pub use kernel::{kernel_release, kernel_version};
pub use kernel::{kernel_release_from, kernel_version_from};
#[cfg(unix)]
pub use release::Uname;
pub use release::{FixedRelease, ReleaseSource};
pub use version::Version;
