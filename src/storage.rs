//! File access used by the converter.
//!
//! The conversion pipeline never touches `std::fs` directly; it goes through a
//! [`FileSystem`] so it can run against the real disk, an in-memory tree or a dry run.

use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    fs, io,
    path::{Path, PathBuf},
};

use crate::error::Error;

pub trait FileSystem {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, Error>;

    /// Replaces the whole file at `path`. The parent directory must exist.
    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), Error>;

    /// Names of the entries directly inside `path`.
    fn list_directory(&self, path: &Path) -> Result<Vec<String>, Error>;

    /// Creates `path` and any missing parent.
    fn create_directory(&self, path: &Path) -> Result<(), Error>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, Error> {
        (**self).read_bytes(path)
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), Error> {
        (**self).write_bytes(path, bytes)
    }

    fn list_directory(&self, path: &Path) -> Result<Vec<String>, Error> {
        (**self).list_directory(path)
    }

    fn create_directory(&self, path: &Path) -> Result<(), Error> {
        (**self).create_directory(path)
    }
}

/// The local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, Error> {
        fs::read(path).map_err(|e| Error::file_system(path, e))
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), Error> {
        fs::write(path, bytes).map_err(|e| Error::file_system(path, e))
    }

    fn list_directory(&self, path: &Path) -> Result<Vec<String>, Error> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| Error::file_system(path, e))? {
            let entry = entry.map_err(|e| Error::file_system(path, e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn create_directory(&self, path: &Path) -> Result<(), Error> {
        fs::create_dir_all(path).map_err(|e| Error::file_system(path, e))
    }
}

/// An in-memory file tree.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
    directories: RefCell<BTreeSet<PathBuf>>,
    read_only: RefCell<BTreeSet<PathBuf>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_directory(parent);
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.as_ref().to_vec());
        self
    }

    pub fn with_directory(self, path: impl AsRef<Path>) -> Self {
        self.add_directory(path.as_ref());
        self
    }

    /// Makes every write to `path` fail with `PermissionDenied`.
    pub fn with_read_only(self, path: impl AsRef<Path>) -> Self {
        self.read_only
            .borrow_mut()
            .insert(path.as_ref().to_path_buf());
        self
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// Contents of a file as UTF-8 text.
    pub fn text(&self, path: impl AsRef<Path>) -> Option<String> {
        self.file(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn contains_file(&self, path: impl AsRef<Path>) -> bool {
        self.files.borrow().contains_key(path.as_ref())
    }

    pub fn contains_directory(&self, path: impl AsRef<Path>) -> bool {
        self.directories.borrow().contains(path.as_ref())
    }

    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.files.borrow().keys().cloned().collect()
    }

    fn add_directory(&self, path: &Path) {
        let mut directories = self.directories.borrow_mut();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            directories.insert(ancestor.to_path_buf());
        }
    }

    fn not_found(path: &Path) -> Error {
        Error::file_system(path, io::Error::from(io::ErrorKind::NotFound))
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, Error> {
        self.file(path).ok_or_else(|| Self::not_found(path))
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), Error> {
        if self.read_only.borrow().contains(path) {
            return Err(Error::file_system(
                path,
                io::Error::from(io::ErrorKind::PermissionDenied),
            ));
        }
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !self.contains_directory(parent) => {
                Err(Self::not_found(parent))
            }
            _ => {
                self.files
                    .borrow_mut()
                    .insert(path.to_path_buf(), bytes.to_vec());
                Ok(())
            }
        }
    }

    fn list_directory(&self, path: &Path) -> Result<Vec<String>, Error> {
        if !self.contains_directory(path) {
            return Err(Self::not_found(path));
        }

        let child_name = |candidate: &PathBuf| {
            (candidate.parent() == Some(path))
                .then(|| candidate.file_name())
                .flatten()
                .map(|name| name.to_string_lossy().into_owned())
        };

        let mut names: BTreeSet<String> =
            self.directories.borrow().iter().filter_map(child_name).collect();
        names.extend(self.files.borrow().keys().filter_map(child_name));
        Ok(names.into_iter().collect())
    }

    fn create_directory(&self, path: &Path) -> Result<(), Error> {
        if self.contains_file(path) {
            return Err(Error::file_system(
                path,
                io::Error::from(io::ErrorKind::AlreadyExists),
            ));
        }
        self.add_directory(path);
        Ok(())
    }
}

/// Reads through to another file system and only records what would be written.
#[derive(Debug)]
pub struct DryRunFileSystem<F> {
    inner: F,
    writes: RefCell<Vec<(PathBuf, usize)>>,
}

impl<F: FileSystem> DryRunFileSystem<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            writes: RefCell::new(Vec::new()),
        }
    }

    /// Every skipped write, with its size in bytes.
    pub fn writes(&self) -> Vec<(PathBuf, usize)> {
        self.writes.borrow().clone()
    }
}

impl<F: FileSystem> FileSystem for DryRunFileSystem<F> {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, Error> {
        self.inner.read_bytes(path)
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), Error> {
        tracing::info!(path = %path.display(), bytes = bytes.len(), "dry run: would write file");
        self.writes
            .borrow_mut()
            .push((path.to_path_buf(), bytes.len()));
        Ok(())
    }

    fn list_directory(&self, path: &Path) -> Result<Vec<String>, Error> {
        self.inner.list_directory(path)
    }

    fn create_directory(&self, path: &Path) -> Result<(), Error> {
        tracing::info!(path = %path.display(), "dry run: would create directory");
        Ok(())
    }
}
