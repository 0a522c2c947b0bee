use std::fs::{self, Metadata};
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use super::PermissionCapability;
use crate::zip::PermissionSet;

/// POSIX mode bits via `std::os::unix`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PosixPermissions;

impl PermissionCapability for PosixPermissions {
    fn is_supported(&self) -> bool {
        true
    }

    fn read(&self, metadata: &Metadata) -> Option<PermissionSet> {
        Some(PermissionSet::from_mode(metadata.permissions().mode()))
    }

    fn apply(&self, path: &Path, permissions: PermissionSet) -> io::Result<()> {
        fs::set_permissions(path, fs::Permissions::from_mode(permissions.mode()))
    }
}
