mod fallback;
#[cfg(unix)]
mod posix;

pub use fallback::NoPermissions;
#[cfg(unix)]
pub use posix::PosixPermissions;

use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};

use crate::zip::PermissionSet;

/// Permission capability of the host filesystem.
pub trait PermissionCapability {
    /// Whether permission bits are actually read and written.
    ///
    /// When this is `false`, [`read`](Self::read) always yields `None` and
    /// [`apply`](Self::apply) is a no-op.
    fn is_supported(&self) -> bool;

    /// Capture the permission bits of a filesystem object.
    fn read(&self, metadata: &Metadata) -> Option<PermissionSet>;

    /// Apply permission bits to the object at `path`.
    fn apply(&self, path: &Path, permissions: PermissionSet) -> io::Result<()>;
}

/// The capability matching the compilation target.
#[cfg(unix)]
pub type NativePermissions = PosixPermissions;

/// The capability matching the compilation target.
#[cfg(not(unix))]
pub type NativePermissions = NoPermissions;

/// Create a symbolic link at `link` pointing to `target`.
///
/// Fails if anything already exists at `link`.
pub fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    {
        std::os::windows::fs::symlink_file(target, link)
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = (target, link);
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "symbolic links are not supported",
        ))
    }
}

/// Raw bytes of a link target, as stored in a symlink marker.
pub fn target_to_bytes(target: &Path) -> Vec<u8> {
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        target.as_os_str().as_bytes().to_vec()
    }

    #[cfg(not(unix))]
    {
        target.to_string_lossy().into_owned().into_bytes()
    }
}

/// Inverse of [`target_to_bytes`].
pub fn target_from_bytes(bytes: &[u8]) -> PathBuf {
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
    }

    #[cfg(not(unix))]
    {
        PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
    }
}
