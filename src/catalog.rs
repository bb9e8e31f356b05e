//! Catalog
//!
//! The product store together with the form that edits it. The collection is loaded
//! once when the catalog is opened and the whole of it is written back after every
//! create, update and delete.

use jiff::SignedDuration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    clock::{Clock, SystemClock},
    draft::Draft,
    notifications::{Notification, Notifier, Severity},
    products::{Product, ProductData, ProductId},
    storage::{ProductStorage, StorageError},
    validation::ValidationErrors,
};

const PRODUCT_ADDED: &str = "Product added.";
const PRODUCT_UPDATED: &str = "Product updated.";
const PRODUCT_DELETED: &str = "Product deleted.";
const CHECK_INPUT: &str = "Please check your input.";

/// Errors returned by catalog mutations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product has the given identifier.
    #[error("no product with id {0}")]
    NotFound(ProductId),

    /// The draft failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

/// What a successful submit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    /// A new product was added.
    Created(ProductId),

    /// An existing product was replaced.
    Updated(ProductId),
}

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The product was removed.
    Deleted(Product),

    /// Confirmation was refused; nothing changed.
    Declined,

    /// No product has the identifier; nothing changed.
    NotFound,
}

/// Product store with its editing form and notification.
#[derive(Debug)]
pub struct Catalog<S, C = SystemClock> {
    storage: S,
    clock: C,
    products: Vec<Product>,
    draft: Draft,
    errors: ValidationErrors,
    editing: Option<ProductId>,
    notifier: Notifier,
    last_id: i64,
    dirty: bool,
}

impl<S: ProductStorage, C: Clock> Catalog<S, C> {
    /// Opens the catalog, loading the collection from `storage`.
    ///
    /// A slot that cannot be read or parsed is treated as empty.
    pub fn open(storage: S, clock: C) -> Self {
        let products = storage.load().unwrap_or_else(|error| {
            warn!(%error, "product slot unusable, starting with an empty catalog");
            Vec::new()
        });

        let last_id = products
            .iter()
            .map(|product| product.id().get())
            .max()
            .unwrap_or(0);

        info!(count = products.len(), "catalog opened");

        Self {
            storage,
            clock,
            products,
            draft: Draft::default(),
            errors: ValidationErrors::default(),
            editing: None,
            notifier: Notifier::default(),
            last_id,
            dirty: false,
        }
    }

    /// Sets how long notifications stay visible.
    #[must_use]
    pub fn with_notification_timeout(mut self, timeout: SignedDuration) -> Self {
        self.notifier = Notifier::new(timeout);
        self
    }

    /// Products, newest first
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by identifier.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id() == id)
    }

    /// Current form input
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Mutable access to the form input
    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Field errors from the last failed submit
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Product being edited, if any
    pub fn editing(&self) -> Option<ProductId> {
        self.editing
    }

    /// Whether the form is editing an existing product
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Whether the last write to storage failed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Notification visible right now, if any.
    pub fn notification(&self) -> Option<&Notification> {
        self.notifier.visible(self.clock.now())
    }

    /// Drops the notification once its timeout has elapsed.
    pub fn tick(&mut self) {
        self.notifier.expire(self.clock.now());
    }

    /// Hides the notification immediately.
    pub fn dismiss_notification(&mut self) {
        self.notifier.dismiss();
    }

    /// Loads a product into the form for editing.
    ///
    /// Returns `false`, leaving the form untouched, when no product has the identifier.
    pub fn begin_edit(&mut self, id: ProductId) -> bool {
        let Some(product) = self.product(id) else {
            return false;
        };

        self.draft = Draft::from_product(product);
        self.errors = ValidationErrors::default();
        self.editing = Some(id);

        debug!(%id, "editing product");

        true
    }

    /// Abandons the current edit.
    pub fn cancel_edit(&mut self) {
        self.reset_form();
    }

    /// Clears the form, its errors and the edit target.
    pub fn reset_form(&mut self) {
        self.draft.reset();
        self.errors = ValidationErrors::default();
        self.editing = None;
    }

    /// Validates the form and adds or updates a product.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Validation`]: the form is invalid. The errors are kept for
    ///   display, a danger notification is shown and the form is left as it was.
    /// - [`CatalogError::NotFound`]: the product being edited no longer exists.
    pub fn submit(&mut self) -> Result<Submitted, CatalogError> {
        let data = match self.draft.validate(self.clock.today()) {
            Ok(data) => data,
            Err(errors) => {
                debug!(fields = errors.len(), "submit rejected");

                self.errors = errors.clone();
                self.notify(CHECK_INPUT, Severity::Danger);

                return Err(errors.into());
            }
        };

        match self.editing {
            None => Ok(Submitted::Created(self.create(data))),
            Some(id) => {
                self.update(id, data)?;

                Ok(Submitted::Updated(id))
            }
        }
    }

    /// Adds a product at the front of the collection and returns its new identifier.
    pub fn create(&mut self, data: ProductData) -> ProductId {
        let id = self.next_id();

        self.products.insert(0, Product::new(id, data));
        self.persist();

        info!(%id, "product added");

        self.notify(PRODUCT_ADDED, Severity::Success);
        self.reset_form();

        id
    }

    /// Replaces a product in place, keeping its identifier and position.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no product has the identifier.
    pub fn update(&mut self, id: ProductId, data: ProductData) -> Result<(), CatalogError> {
        let product = self
            .products
            .iter_mut()
            .find(|product| product.id() == id)
            .ok_or(CatalogError::NotFound(id))?;

        product.replace(data);
        self.persist();

        info!(%id, "product updated");

        self.notify(PRODUCT_UPDATED, Severity::Success);
        self.reset_form();

        Ok(())
    }

    /// Removes a product once `confirm` agrees.
    ///
    /// Unknown identifiers are ignored without asking. Deleting the product being
    /// edited also clears the form.
    pub fn delete(&mut self, id: ProductId, confirm: impl FnOnce(&Product) -> bool) -> DeleteOutcome {
        let Some(index) = self.products.iter().position(|product| product.id() == id) else {
            return DeleteOutcome::NotFound;
        };

        let confirmed = self.products.get(index).is_some_and(confirm);

        if !confirmed {
            debug!(%id, "delete declined");
            return DeleteOutcome::Declined;
        }

        let removed = self.products.remove(index);

        if self.editing == Some(id) {
            self.reset_form();
        }

        self.persist();

        info!(%id, "product deleted");

        self.notify(PRODUCT_DELETED, Severity::Success);

        DeleteOutcome::Deleted(removed)
    }

    /// Writes the collection to storage now.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the write fails; the catalog is then dirty.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        if let Err(error) = self.storage.save(&self.products) {
            self.dirty = true;
            return Err(error);
        }

        self.dirty = false;

        Ok(())
    }

    fn persist(&mut self) {
        if let Err(error) = self.flush() {
            warn!(%error, "failed to save products, keeping changes in memory");
        }
    }

    fn notify(&mut self, message: &str, severity: Severity) {
        self.notifier.show(message, severity, self.clock.now());
    }

    fn next_id(&mut self) -> ProductId {
        let id = self
            .clock
            .now()
            .as_millisecond()
            .max(self.last_id.saturating_add(1));

        self.last_id = id;

        ProductId::new(id)
    }
}
