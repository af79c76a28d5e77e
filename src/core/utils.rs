use std::path::{Component, Path, PathBuf};

/// Normalizes a path lexically: drops `.` components and redundant or trailing
/// separators, resolves `..` against the preceding component. `..` above the
/// filesystem root is clamped. Does not touch the filesystem.
pub fn normalize<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(parent) = result.parent() {
                    result = parent.to_path_buf();
                }
            }
            _ => result.push(component),
        }
    }
    result
}

/// Joins a forward-slash separated key onto `base` segment by segment, so a
/// leading slash in the key never replaces `base`.
pub fn join_key<P: AsRef<Path>>(base: P, key: &str) -> PathBuf {
    key.split('/')
        .filter(|segment| !segment.is_empty())
        .fold(base.as_ref().to_path_buf(), |path, segment| path.join(segment))
}

/// Builds a key from a path relative to the root.
/// Returns `None` if any name is not valid UTF-8.
pub fn key_from_relative<P: AsRef<Path>>(relative: P) -> Option<String> {
    let mut segments = Vec::new();
    for component in relative.as_ref().components() {
        if let Component::Normal(name) = component {
            segments.push(name.to_str()?);
        }
    }
    Some(segments.join("/"))
}

/// Normalizes a key the same way `compute_path` does, without a root.
pub fn normalize_key(key: &str) -> String {
    // built from a &str, so every segment is UTF-8
    key_from_relative(normalize(join_key("/", key))).unwrap_or_default()
}
