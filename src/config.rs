//! Configuration

use std::path::PathBuf;

use clap::Args;
use jiff::SignedDuration;
use rusty_money::iso::Currency;

use crate::{
    listing::{ListingError, parse_currency},
    storage::{DEFAULT_SLOT, FileStorage},
};

/// Catalog settings, read from flags with environment fallbacks.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Directory holding the product slot
    #[arg(long, env = "KATALOG_DATA_DIR", default_value = ".", global = true)]
    pub data_dir: PathBuf,

    /// Name of the product slot
    #[arg(long, env = "KATALOG_SLOT", default_value = DEFAULT_SLOT, global = true)]
    pub slot: String,

    /// ISO 4217 currency used to display prices
    #[arg(long, env = "KATALOG_CURRENCY", default_value = "IDR", global = true)]
    pub currency: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// How long notifications stay visible, in milliseconds
    #[arg(
        long,
        env = "KATALOG_NOTIFICATION_TIMEOUT_MS",
        default_value_t = 3000,
        global = true
    )]
    pub notification_timeout_ms: u64,
}

impl Config {
    /// Storage for the configured slot.
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.data_dir, &self.slot)
    }

    /// Currency used to display prices.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::UnknownCurrency`] if the code is not supported.
    pub fn currency(&self) -> Result<&'static Currency, ListingError> {
        parse_currency(&self.currency)
    }

    /// Notification display timeout.
    pub fn notification_timeout(&self) -> SignedDuration {
        SignedDuration::from_millis(i64::try_from(self.notification_timeout_ms).unwrap_or(i64::MAX))
    }
}
