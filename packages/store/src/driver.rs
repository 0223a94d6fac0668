//! The record store.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::logger::Logger;
use crate::options::Options;
use crate::path::{self, RECORD_EXTENSION};
use crate::registry::{self, MutexRegistry};

/// A store of JSON records kept as one file per record under a root directory.
///
/// `Driver` is `Send + Sync`; share it between threads by reference or `Arc`.
/// Writes and deletes on the same collection are serialized against each
/// other. Reads take no lock and rely on the write-then-rename protocol to
/// never observe a partially written record.
pub struct Driver {
    root: PathBuf,
    locks: MutexRegistry,
    log: Arc<dyn Logger>,
    #[cfg_attr(not(unix), allow(dead_code))]
    dir_mode: u32,
    #[cfg_attr(not(unix), allow(dead_code))]
    file_mode: u32,
}

impl Driver {
    /// Opens the store rooted at `root`, creating the directory (and parents)
    /// when it does not exist yet.
    pub fn open(root: impl AsRef<Path>, options: Options) -> Result<Driver> {
        let root = path::clean(root.as_ref());
        let log = options.logger_or_default();

        let driver = Driver {
            root: root.clone(),
            locks: MutexRegistry::new(),
            log,
            dir_mode: options.dir_mode,
            file_mode: options.file_mode,
        };

        match fs::metadata(&root) {
            Ok(attr) if attr.is_dir() => {
                driver.log.debug(format_args!(
                    "Using '{}' (database already exists)",
                    root.display()
                ));
                Ok(driver)
            }
            Ok(_) => Err(Error::RootPathInvalid {
                path: root,
                error: io::Error::other("Root path must be a directory."),
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                driver
                    .log
                    .debug(format_args!("Creating the database at '{}'...", root.display()));
                driver
                    .create_dir_all(&root)
                    .map_err(|error| Error::RootPathInvalid { path: root, error })?;
                Ok(driver)
            }
            Err(error) => Err(Error::RootPathInvalid { path: root, error }),
        }
    }

    /// Opens the store with default [`Options`].
    pub fn open_default(root: impl AsRef<Path>) -> Result<Driver> {
        Self::open(root, Options::default())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of collections that have been written to or deleted from
    /// through this driver.
    pub fn locked_collections(&self) -> usize {
        self.locks.len()
    }

    /// Stores `value` as `<root>/<collection>/<resource>.json`, replacing any
    /// previous record.
    ///
    /// The record is written to a staging file and renamed into place, so a
    /// reader sees either the old or the new record, never a mix.
    pub fn write<T: Serialize + ?Sized>(
        &self,
        collection: &str,
        resource: &str,
        value: &T,
    ) -> Result<()> {
        path::ensure_name("collection", collection)?;
        path::ensure_name("resource", resource)?;

        let lock = self.locks.lock_for(collection);
        let _guard = registry::acquire(&lock);

        let dir = path::collection_dir(&self.root, collection);
        let final_path = path::record_path(&self.root, collection, resource);
        let tmp_path = path::staging_path(&final_path);

        self.create_dir_all(&dir)
            .map_err(|err| Error::io(&dir, err))?;

        let mut bytes =
            serde_json::to_vec_pretty(value).map_err(|source| Error::Encode { source })?;
        bytes.push(b'\n');

        self.log.trace(format_args!(
            "Writing {} bytes to {}...",
            bytes.len(),
            final_path.display()
        ));

        if let Err(err) = self.write_staging(&tmp_path, &bytes) {
            let _ = fs::remove_file(&tmp_path);
            return Err(Error::io(&tmp_path, err));
        }

        if let Err(err) = fs::rename(&tmp_path, &final_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(Error::io(&final_path, err));
        }

        self.log
            .debug(format_args!("Wrote {}/{}", collection, resource));
        Ok(())
    }

    /// Reads and decodes a single record.
    pub fn read<T: DeserializeOwned>(&self, collection: &str, resource: &str) -> Result<T> {
        path::ensure_name("collection", collection)?;
        path::ensure_name("resource", resource)?;

        let record = path::collection_dir(&self.root, collection).join(resource);
        self.resolve(&record, collection, resource)?;

        let file_path = path::with_suffix(&record, RECORD_EXTENSION);
        self.log
            .trace(format_args!("Reading {}...", file_path.display()));

        let bytes = fs::read(&file_path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                not_found(collection, resource)
            } else {
                Error::io(&file_path, err)
            }
        })?;

        serde_json::from_slice(&bytes).map_err(|source| Error::Decode {
            path: file_path,
            source,
        })
    }

    /// Like [`read`](Self::read), but decodes into an existing value.
    pub fn read_into<T: DeserializeOwned>(
        &self,
        collection: &str,
        resource: &str,
        out: &mut T,
    ) -> Result<()> {
        *out = self.read(collection, resource)?;
        Ok(())
    }

    /// Returns the raw text of every record in `collection`, ordered by
    /// resource name.
    ///
    /// Records are not parsed. Staging files from in-flight writes and
    /// anything that is not a `.json` file are skipped. The first read failure
    /// aborts the whole call.
    pub fn read_all(&self, collection: &str) -> Result<Vec<String>> {
        Ok(self
            .read_records(collection)?
            .into_iter()
            .map(|(_, text)| text)
            .collect())
    }

    /// Reads every record in `collection` and decodes each one as `T`.
    pub fn read_all_as<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        self.read_records(collection)?
            .into_iter()
            .map(|(path, text)| {
                serde_json::from_str(&text).map_err(|source| Error::Decode { path, source })
            })
            .collect()
    }

    fn read_records(&self, collection: &str) -> Result<Vec<(PathBuf, String)>> {
        path::ensure_name("collection", collection)?;

        let dir = path::collection_dir(&self.root, collection);
        // A stray `<collection>.json` satisfies the existence check but is not
        // a collection.
        if !self.resolve(&dir, collection, "")?.is_dir() {
            return Err(not_found(collection, ""));
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|err| Error::io(&dir, err))? {
            let entry = entry.map_err(|err| Error::io(&dir, err))?;
            let file_type = entry.file_type().map_err(|err| Error::io(entry.path(), err))?;
            if !file_type.is_file() || !is_record_file(&entry.file_name().to_string_lossy()) {
                continue;
            }
            files.push(entry.path());
        }
        files.sort();

        self.log.trace(format_args!(
            "Reading {} records from {}...",
            files.len(),
            dir.display()
        ));

        files
            .into_iter()
            .map(|file| match fs::read_to_string(&file) {
                Ok(text) => Ok((file, text)),
                Err(err) => Err(Error::io(&file, err)),
            })
            .collect()
    }

    /// Deletes one record, or the whole collection when `resource` is empty.
    ///
    /// The collection's lock stays registered after the collection is gone.
    pub fn delete(&self, collection: &str, resource: &str) -> Result<()> {
        path::ensure_name("collection", collection)?;

        let lock = self.locks.lock_for(collection);
        let _guard = registry::acquire(&lock);

        let mut target = path::collection_dir(&self.root, collection);
        if !resource.is_empty() {
            target.push(resource);
        }

        let resolved = self.resolve(&target, collection, resource)?;

        if resolved.is_dir() {
            self.log
                .debug(format_args!("Removing directory {}", resolved.path.display()));
            fs::remove_dir_all(&resolved.path).map_err(|err| Error::io(&resolved.path, err))
        } else {
            self.log
                .debug(format_args!("Removing file {}", resolved.path.display()));
            fs::remove_file(&resolved.path).map_err(|err| Error::io(&resolved.path, err))
        }
    }

    fn resolve(&self, candidate: &Path, collection: &str, resource: &str) -> Result<path::Resolved> {
        path::stat_record(candidate).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                not_found(collection, resource)
            } else {
                Error::io(candidate, err)
            }
        })
    }

    fn write_staging(&self, tmp_path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(self.file_mode);
        }

        let mut file = options.open(tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()
    }

    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(self.dir_mode);
        }
        builder.create(dir)
    }
}

impl std::fmt::Debug for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("root", &self.root)
            .field("locks", &self.locks)
            .finish_non_exhaustive()
    }
}

fn not_found(collection: &str, resource: &str) -> Error {
    Error::NotFound {
        path: path::display_name(collection, resource),
    }
}

fn is_record_file(name: &str) -> bool {
    name.ends_with(RECORD_EXTENSION)
}
