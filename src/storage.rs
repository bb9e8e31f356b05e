//! Storage
//!
//! A product catalog lives in one named slot holding a JSON array of products.
//! Records are decoded one at a time: a record that does not fit the product model
//! is skipped with a warning instead of failing the whole slot.

use std::{
    cell::RefCell,
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, warn};

use crate::products::Product;

/// Default slot name.
pub const DEFAULT_SLOT: &str = "products";

/// Errors reading or writing the product slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The slot could not be read or written.
    #[error("failed to access product slot: {0}")]
    Io(#[from] io::Error),

    /// The slot contents are not a valid product list.
    #[error("failed to parse product slot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence port for the product collection.
#[cfg_attr(test, mockall::automock)]
pub trait ProductStorage {
    /// Reads the whole collection. An absent slot is an empty collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be read or parsed.
    fn load(&self) -> Result<Vec<Product>, StorageError>;

    /// Overwrites the slot with the whole collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be written.
    fn save(&self, products: &[Product]) -> Result<(), StorageError>;
}

impl<T: ProductStorage + ?Sized> ProductStorage for &T {
    fn load(&self) -> Result<Vec<Product>, StorageError> {
        (**self).load()
    }

    fn save(&self, products: &[Product]) -> Result<(), StorageError> {
        (**self).save(products)
    }
}

fn decode(contents: &str) -> Result<(Vec<Product>, usize), serde_json::Error> {
    let records: Vec<serde_json::Value> = serde_json::from_str(contents)?;
    let mut products = Vec::with_capacity(records.len());
    let mut skipped = 0;

    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Product>(record) {
            Ok(product) => products.push(product),
            Err(error) => {
                warn!(index, %error, "skipping unreadable product record");
                skipped += 1;
            }
        }
    }

    Ok((products, skipped))
}

/// A slot stored as `<dir>/<slot>.json`.
///
/// When the slot holds anything that cannot be loaded, its raw contents are copied to
/// `<dir>/<slot>.json.corrupt` before the catalog gets a chance to overwrite it.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Creates storage for `slot` inside `dir`.
    pub fn new(dir: impl AsRef<Path>, slot: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{slot}.json")),
        }
    }

    /// Path of the slot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where unloadable slot contents are preserved
    pub fn corrupt_path(&self) -> PathBuf {
        self.path.with_extension("json.corrupt")
    }

    fn preserve(&self) {
        let target = self.corrupt_path();

        match fs::copy(&self.path, &target) {
            Ok(_) => warn!(path = %target.display(), "preserved unreadable product slot"),
            Err(error) => warn!(%error, path = %target.display(), "failed to preserve product slot"),
        }
    }
}

impl ProductStorage for FileStorage {
    fn load(&self) -> Result<Vec<Product>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "product slot absent");
                return Ok(Vec::new());
            }
            Err(error) => return Err(error.into()),
        };

        let (products, skipped) = match decode(&contents) {
            Ok(decoded) => decoded,
            Err(error) => {
                self.preserve();
                return Err(error.into());
            }
        };

        if skipped > 0 {
            self.preserve();
        }

        debug!(path = %self.path.display(), count = products.len(), skipped, "loaded product slot");

        Ok(products)
    }

    fn save(&self, products: &[Product]) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        // Stage beside the slot, then rename over it.
        let staging = self.path.with_extension("json.tmp");

        fs::write(&staging, serde_json::to_vec(products)?)?;
        fs::rename(&staging, &self.path)?;

        debug!(path = %self.path.display(), count = products.len(), "saved product slot");

        Ok(())
    }
}

/// A slot held in memory as serialized text.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: RefCell<Option<String>>,
}

impl MemoryStorage {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot that already holds `contents`.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(contents.into())),
        }
    }

    /// Current raw slot contents
    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl ProductStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<Product>, StorageError> {
        match self.slot.borrow().as_deref() {
            Some(contents) => Ok(decode(contents)?.0),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, products: &[Product]) -> Result<(), StorageError> {
        let contents = serde_json::to_string(products)?;

        self.slot.replace(Some(contents));

        Ok(())
    }
}
