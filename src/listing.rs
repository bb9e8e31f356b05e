//! Listing

use std::io;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, IDR, USD},
};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::products::Product;

/// Shown in place of the table when there are no products.
pub const EMPTY_MESSAGE: &str = "No products yet.";

/// Errors that can occur while rendering the product list.
#[derive(Debug, Error)]
pub enum ListingError {
    /// The currency code is not supported.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A price cannot be expressed in minor currency units.
    #[error("Price out of range: {0}")]
    PriceOutOfRange(Decimal),

    /// Writing the table failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Resolves an ISO 4217 currency code.
///
/// # Errors
///
/// Returns [`ListingError::UnknownCurrency`] if the code is not supported.
pub fn parse_currency(code: &str) -> Result<&'static Currency, ListingError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "IDR" => Ok(IDR),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        "GBP" => Ok(GBP),
        other => Err(ListingError::UnknownCurrency(other.to_string())),
    }
}

/// Formats a price in `currency`.
///
/// # Errors
///
/// Returns [`ListingError::PriceOutOfRange`] if the price does not fit in minor units.
pub fn format_price(price: Decimal, currency: &'static Currency) -> Result<String, ListingError> {
    let minor_units = price
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or(ListingError::PriceOutOfRange(price))?;

    Ok(Money::from_minor(minor_units, currency).to_string())
}

/// Writes the product table to `out`.
///
/// # Errors
///
/// Returns an error if a price cannot be formatted or the output cannot be written.
pub fn write_to(
    mut out: impl io::Write,
    products: &[Product],
    currency: &'static Currency,
) -> Result<(), ListingError> {
    if products.is_empty() {
        writeln!(out, "{EMPTY_MESSAGE}")?;
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["#", "Name", "Price", "Category", "Status"]);

    for (idx, product) in products.iter().enumerate() {
        builder.push_record([
            (idx + 1).to_string(),
            product.name().to_string(),
            format_price(product.price(), currency)?,
            product.category().to_string(),
            status_label(product).to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..3), Alignment::right());
    table.modify(Columns::first(), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "{table}")?;

    Ok(())
}

/// Writes every field of a single product to `out`.
///
/// # Errors
///
/// Returns an error if the price cannot be formatted or the output cannot be written.
pub fn write_details(
    mut out: impl io::Write,
    product: &Product,
    currency: &'static Currency,
) -> Result<(), ListingError> {
    let release_date = product
        .release_date()
        .map_or_else(|| "-".to_string(), |date| date.to_string());

    writeln!(out, "id:           {}", product.id())?;
    writeln!(out, "name:         {}", product.name())?;
    writeln!(out, "description:  {}", product.description())?;
    writeln!(out, "price:        {}", format_price(product.price(), currency)?)?;
    writeln!(out, "category:     {}", product.category())?;
    writeln!(out, "release date: {release_date}")?;
    writeln!(out, "stock:        {}", product.stock())?;
    writeln!(out, "status:       {}", status_label(product))?;

    Ok(())
}

fn status_label(product: &Product) -> &'static str {
    if product.is_active() { "Active" } else { "Inactive" }
}
