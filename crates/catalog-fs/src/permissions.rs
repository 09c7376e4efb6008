//! Executable-bit checks for catalog scripts

use std::path::Path;

use crate::{Error, Result};

/// Whether `path` carries any executable permission bit.
///
/// On platforms without POSIX modes every regular file counts as executable.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> Result<bool> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path).map_err(|e| Error::io(path, e))?;
    Ok(metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> Result<bool> {
    let metadata = std::fs::metadata(path).map_err(|e| Error::io(path, e))?;
    Ok(metadata.is_file())
}

/// Add `u+x,g+x,o+x` to the file's mode. No-op off Unix.
#[cfg(unix)]
pub fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path).map_err(|e| Error::io(path, e))?;
    let mut permissions = metadata.permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    std::fs::set_permissions(path, permissions).map_err(|e| Error::io(path, e))
}

#[cfg(not(unix))]
pub fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    #[test]
    fn plain_file_is_not_executable() {
        let temp = TempDir::new().unwrap();
        let script = temp.path().join("functions.sh");
        std::fs::write(&script, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o644)).unwrap();

        assert!(!is_executable(&script).unwrap());
    }

    #[test]
    fn set_executable_adds_bits() {
        let temp = TempDir::new().unwrap();
        let script = temp.path().join("postcreate.sh");
        std::fs::write(&script, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o644)).unwrap();

        set_executable(&script).unwrap();

        assert!(is_executable(&script).unwrap());
        let mode = std::fs::metadata(&script).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn directory_is_not_executable_file() {
        let temp = TempDir::new().unwrap();
        assert!(!is_executable(temp.path()).unwrap());
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = is_executable(&temp.path().join("absent.sh")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
