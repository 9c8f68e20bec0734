use std::path::{Component, Path, PathBuf};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("no such file")]
    NotFound,

    #[error("path escapes the document root")]
    Forbidden,

    #[error("malformed request target")]
    BadPath,
}

/// Maps a request target onto a regular file under `root`.
///
/// The query string is dropped and the remainder percent-decoded once.
/// Targets naming a directory are answered with `index_file` inside it.
/// Anything that would leave `root` (`..`, absolute paths, symlinks
/// pointing outside) is rejected.
pub fn resolve_path(root: &Path, target: &str, index_file: &str) -> Result<PathBuf, ResolveError> {
    if !target.starts_with('/') {
        return Err(ResolveError::BadPath);
    }

    let path = target.split_once('?').map_or(target, |(path, _)| path);
    let decoded = percent_encoding::percent_decode_str(path)
        .decode_utf8()
        .map_err(|_| ResolveError::BadPath)?;
    let relative = PathBuf::from(decoded.trim_start_matches('/'));

    for component in relative.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => return Err(ResolveError::Forbidden),
        }
    }

    let root = root.canonicalize().map_err(|_| ResolveError::NotFound)?;
    let mut full = root
        .join(&relative)
        .canonicalize()
        .map_err(|_| ResolveError::NotFound)?;

    if !full.starts_with(&root) {
        return Err(ResolveError::Forbidden);
    }

    if full.is_dir() {
        // The index may itself be a symlink leading out of the root.
        full = full
            .join(index_file)
            .canonicalize()
            .map_err(|_| ResolveError::NotFound)?;
        if !full.starts_with(&root) {
            return Err(ResolveError::Forbidden);
        }
    }

    if !full.is_file() {
        return Err(ResolveError::NotFound);
    }

    Ok(full)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_relative_target() {
        let root = std::env::temp_dir();
        assert_eq!(resolve_path(&root, "index.html", "index.html"), Err(ResolveError::BadPath));
    }

    #[test]
    fn rejects_parent_components() {
        let root = std::env::temp_dir();
        assert_eq!(
            resolve_path(&root, "/../etc/passwd", "index.html"),
            Err(ResolveError::Forbidden)
        );
        assert_eq!(
            resolve_path(&root, "/%2e%2e/etc/passwd", "index.html"),
            Err(ResolveError::Forbidden)
        );
    }
}
