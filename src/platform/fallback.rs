use std::fs::Metadata;
use std::io;
use std::path::Path;

use super::PermissionCapability;
use crate::zip::PermissionSet;

/// For filesystems without POSIX modes: nothing is captured or applied.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPermissions;

impl PermissionCapability for NoPermissions {
    fn is_supported(&self) -> bool {
        false
    }

    fn read(&self, _metadata: &Metadata) -> Option<PermissionSet> {
        None
    }

    fn apply(&self, _path: &Path, _permissions: PermissionSet) -> io::Result<()> {
        Ok(())
    }
}
