//! Path handling for layer discovery.

use crate::ConfigError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Canonical form of `path`; a path that does not exist yet is kept as given.
pub(super) fn normalize_path(path: &Path) -> Result<PathBuf, ConfigError> {
    path.canonicalize().or_else(|source| match source.kind() {
        ErrorKind::NotFound => Ok(path.to_path_buf()),
        _ => Err(ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        }),
    })
}

/// Key used to skip a file reached through two layers.
pub(super) fn unique_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Nearest ancestor of `cwd` (itself included) holding one of `markers`.
pub(super) fn find_project_root(cwd: &Path, markers: &[String]) -> Option<PathBuf> {
    cwd.ancestors()
        .find(|dir| markers.iter().any(|marker| dir.join(marker).exists()))
        .map(Path::to_path_buf)
}
