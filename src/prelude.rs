//! Katalog prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError, DeleteOutcome, Submitted},
    clock::{Clock, ManualClock, SystemClock},
    draft::Draft,
    listing::ListingError,
    notifications::{Notification, Notifier, Severity},
    products::{Category, Product, ProductData, ProductId},
    storage::{FileStorage, MemoryStorage, ProductStorage, StorageError},
    validation::{Field, FieldError, ValidationErrors, validate},
};
