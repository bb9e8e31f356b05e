//! Katalog
//!
//! Katalog is a product catalog manager: a validated product form, a newest-first
//! product list with edit and delete actions, transient notifications, and a single
//! persisted slot that is rewritten after every change.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod draft;
pub mod listing;
pub mod logging;
pub mod notifications;
pub mod prelude;
pub mod products;
pub mod storage;
pub mod validation;
