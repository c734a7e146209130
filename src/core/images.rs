//! Product photo storage on the local filesystem.
//!
//! Photos live in one flat directory; the store keeps only the relative
//! path string. Copying a photo in never overwrites an existing file, and
//! removing one is always best-effort: a missing or locked file must not
//! fail the product operation that triggered the cleanup.

use crate::{config::ImagesConfig, errors::Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Filesystem half of the product photo lifecycle.
#[derive(Debug, Clone)]
pub struct ImageStore {
    products_dir: PathBuf,
    placeholder: PathBuf,
}

impl ImageStore {
    /// Builds a store over an explicit photo directory and placeholder.
    #[must_use]
    pub fn new(products_dir: impl Into<PathBuf>, placeholder: impl Into<PathBuf>) -> Self {
        Self {
            products_dir: products_dir.into(),
            placeholder: placeholder.into(),
        }
    }

    /// Builds a store from the images section of the app config.
    #[must_use]
    pub fn from_config(config: &ImagesConfig) -> Self {
        Self::new(&config.products_dir, &config.placeholder)
    }

    /// Copies a picked file into the photo directory and returns the path
    /// to store.
    ///
    /// An existing file with the same name is never overwritten; the copy
    /// gets a `_1`, `_2`, ... suffix instead.
    ///
    /// # Errors
    /// Returns an I/O error when the directory cannot be created or the
    /// copy fails.
    pub fn import(&self, source: &Path) -> Result<PathBuf> {
        fs::create_dir_all(&self.products_dir)?;

        let destination = self.vacant_destination(source);
        fs::copy(source, &destination)?;
        tracing::debug!(from = %source.display(), to = %destination.display(), "imported product photo");
        Ok(destination)
    }

    /// Path to display for a stored photo reference.
    ///
    /// Falls back to the placeholder when the reference is unset or the
    /// file has gone missing on disk.
    #[must_use]
    pub fn resolve(&self, photo_path: Option<&str>) -> PathBuf {
        match photo_path {
            Some(stored) if Path::new(stored).is_file() => PathBuf::from(stored),
            _ => self.placeholder.clone(),
        }
    }

    /// Deletes a photo file, swallowing any failure.
    ///
    /// The record is already gone or repointed by the time this runs, so a
    /// failed delete only leaves an orphaned file behind. It is logged and
    /// otherwise ignored.
    pub fn remove_quietly(&self, photo_path: &str) {
        if let Err(error) = fs::remove_file(photo_path) {
            tracing::warn!(path = photo_path, %error, "could not remove product photo");
        }
    }

    /// First non-colliding destination for the source file name.
    fn vacant_destination(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        let extension = source.extension().map(|e| e.to_string_lossy().into_owned());

        let with_name = |name: &str| match &extension {
            Some(ext) => self.products_dir.join(format!("{name}.{ext}")),
            None => self.products_dir.join(name),
        };

        let plain = with_name(&stem);
        if !plain.exists() {
            return plain;
        }
        let mut counter = 1;
        loop {
            let candidate = with_name(&format!("{stem}_{counter}"));
            if !candidate.exists() {
                return candidate;
            }
            counter += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> ImageStore {
        ImageStore::new(dir.join("products"), dir.join("placeholder.png"))
    }

    #[test]
    fn test_import_copies_into_photo_directory() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let source = dir.path().join("boots.png");
        fs::write(&source, b"png bytes").unwrap();

        let stored = store.import(&source).unwrap();
        assert_eq!(stored, dir.path().join("products").join("boots.png"));
        assert_eq!(fs::read(&stored).unwrap(), b"png bytes");
        // The picked file stays where it was
        assert!(source.exists());
    }

    #[test]
    fn test_import_suffixes_instead_of_overwriting() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let first = dir.path().join("boots.png");
        fs::write(&first, b"first").unwrap();
        let second = dir.path().join("boots.png");

        let stored_first = store.import(&first).unwrap();
        fs::write(&second, b"second").unwrap();
        let stored_second = store.import(&second).unwrap();
        let stored_third = store.import(&second).unwrap();

        assert_eq!(stored_first.file_name().unwrap(), "boots.png");
        assert_eq!(stored_second.file_name().unwrap(), "boots_1.png");
        assert_eq!(stored_third.file_name().unwrap(), "boots_2.png");
        // Original content untouched
        assert_eq!(fs::read(&stored_first).unwrap(), b"first");
        assert_eq!(fs::read(&stored_second).unwrap(), b"second");
    }

    #[test]
    fn test_resolve_prefers_existing_file() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let photo = dir.path().join("products").join("real.png");
        fs::create_dir_all(photo.parent().unwrap()).unwrap();
        fs::write(&photo, b"x").unwrap();

        let stored = photo.to_string_lossy().into_owned();
        assert_eq!(store.resolve(Some(&stored)), photo);
    }

    #[test]
    fn test_resolve_falls_back_to_placeholder() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        assert_eq!(store.resolve(None), dir.path().join("placeholder.png"));
        assert_eq!(
            store.resolve(Some("resources/products/vanished.png")),
            dir.path().join("placeholder.png")
        );
    }

    #[test]
    fn test_remove_quietly_tolerates_missing_file() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        // Nothing to assert beyond "does not panic or error"
        store.remove_quietly("resources/products/never-existed.png");

        let photo = dir.path().join("gone.png");
        fs::write(&photo, b"x").unwrap();
        store.remove_quietly(&photo.to_string_lossy());
        assert!(!photo.exists());
    }
}
