//! Mapping of (collection, resource) pairs onto filesystem paths.
//!
//! Every record lives at `<root>/<collection>/<resource>.json`. Names are used
//! verbatim as single path segments; nothing is escaped, so callers must pass
//! names that are safe on the underlying filesystem.
//!
//! [`stat_record`] is deliberately two-step: the candidate is first checked
//! as-is (a collection directory) and then with the `.json` suffix (a
//! resource file). This lets a single existence check serve both whole
//! collections and individual resources.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

pub(crate) const RECORD_EXTENSION: &str = ".json";
pub(crate) const STAGING_EXTENSION: &str = ".tmp";

/// Directory holding every resource of `collection`.
pub fn collection_dir(root: &Path, collection: &str) -> PathBuf {
    root.join(collection)
}

/// Final location of a single record.
pub fn record_path(root: &Path, collection: &str, resource: &str) -> PathBuf {
    with_suffix(&collection_dir(root, collection).join(resource), RECORD_EXTENSION)
}

/// Sibling file a record is written to before being renamed into place.
pub fn staging_path(record_path: &Path) -> PathBuf {
    with_suffix(record_path, STAGING_EXTENSION)
}

/// Appends `suffix` to the final component without treating dots specially.
///
/// `Path::with_extension` would replace everything after the last dot, which
/// breaks resource names like `v1.2`.
pub(crate) fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Lexically normalize a root path: drops `.` components and redundant
/// separators. `..` is kept as-is since resolving it needs the filesystem.
pub fn clean(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();

    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

/// The result of a successful [`stat_record`].
#[derive(Debug)]
pub struct Resolved {
    /// The path that exists: either the candidate itself or the candidate
    /// with `.json` appended.
    pub path: PathBuf,
    pub metadata: fs::Metadata,
}

impl Resolved {
    pub fn is_dir(&self) -> bool {
        self.metadata.is_dir()
    }
}

/// Stat `candidate` as-is, falling back to `candidate.json` when the first
/// lookup reports not-found.
///
/// Returns the not-found error of the second lookup when neither exists. Any
/// other error from the first lookup is returned without trying the suffix.
pub fn stat_record(candidate: &Path) -> io::Result<Resolved> {
    match fs::metadata(candidate) {
        Ok(metadata) => Ok(Resolved {
            path: candidate.to_path_buf(),
            metadata,
        }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let path = with_suffix(candidate, RECORD_EXTENSION);
            let metadata = fs::metadata(&path)?;
            Ok(Resolved { path, metadata })
        }
        Err(err) => Err(err),
    }
}

/// Reject an empty collection or resource name before touching the disk.
pub(crate) fn ensure_name(kind: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::InvalidArgument {
            message: format!("missing {} name", kind),
        });
    }
    Ok(())
}

/// Human-readable `collection/resource` label for error messages.
pub(crate) fn display_name(collection: &str, resource: &str) -> String {
    if resource.is_empty() {
        collection.to_string()
    } else {
        format!("{}/{}", collection, resource)
    }
}
