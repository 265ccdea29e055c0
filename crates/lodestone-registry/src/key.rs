//! Canonical artifact keys

use std::any;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Canonical cache key: (absolute normalized path, type signature).
///
/// Two relative spellings of the same artifact resolve to the same key,
/// and registries for different artifact types never collide because the
/// type signature participates in equality and hashing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactKey {
    path: PathBuf,
    type_name: &'static str,
}

impl ArtifactKey {
    /// Build the key for `relative` under `root`, for artifact type `A`.
    pub fn of<A: 'static>(root: &Path, relative: impl AsRef<Path>) -> Self {
        Self {
            path: canonical_path(root, relative.as_ref()),
            type_name: any::type_name::<A>(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.path.display(), self.type_name)
    }
}

/// Join `relative` to `root` (absolute inputs stand alone) and fold the
/// result lexically: `.` components drop, `..` pops its parent.
///
/// Purely lexical, so keys exist for artifacts not yet on disk and the
/// computation never fails.
pub fn canonical_path(root: &Path, relative: &Path) -> PathBuf {
    let joined = if relative.is_absolute() {
        relative.to_path_buf()
    } else {
        root.join(relative)
    };
    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // cannot climb above the filesystem root
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
