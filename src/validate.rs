//! Path checks performed before a tail session opens its handle.

use crate::error::{Result, ValidationError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Check that `path` exists, is readable, is not a directory and is a regular
/// file, in that order.
///
/// On unix nothing is opened: a pipe without a writer would block the caller.
pub(crate) fn validate_path(path: &Path) -> Result<()> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ValidationError::NotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        Err(e) => return Err(e.into()),
    };

    if !is_readable(path, &metadata)? {
        return Err(ValidationError::NotReadable {
            path: path.to_path_buf(),
        }
        .into());
    }

    if metadata.is_dir() {
        return Err(ValidationError::IsDirectory {
            path: path.to_path_buf(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(ValidationError::NotRegularFile {
            path: path.to_path_buf(),
        }
        .into());
    }

    Ok(())
}

#[cfg(unix)]
fn is_readable(path: &Path, _metadata: &fs::Metadata) -> Result<bool> {
    use nix::errno::Errno;
    use nix::unistd::{AccessFlags, access};

    match access(path, AccessFlags::R_OK) {
        Ok(()) => Ok(true),
        Err(Errno::EACCES) | Err(Errno::EPERM) => Ok(false),
        Err(errno) => Err(std::io::Error::from(errno).into()),
    }
}

#[cfg(not(unix))]
fn is_readable(path: &Path, metadata: &fs::Metadata) -> Result<bool> {
    // Only regular files and directories are opened; anything else is
    // rejected by the regular-file check without being opened.
    let opened = if metadata.is_dir() {
        fs::read_dir(path).map(drop)
    } else if metadata.is_file() {
        fs::File::open(path).map(drop)
    } else {
        Ok(())
    };

    match opened {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => Ok(false),
        Err(e) => Err(e.into()),
    }
}
