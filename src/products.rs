//! Products

use std::{fmt, num::ParseIntError, str::FromStr};

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Product identifier, derived from the creation timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Wraps a raw identifier value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Returned when a string does not name a known [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// Product category.
///
/// The variant names are also the persisted and displayed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Electronics
    Elektronik,

    /// Clothing
    Pakaian,

    /// Food
    Makanan,
}

impl Category {
    /// Every category, in the order they are offered for selection.
    pub const ALL: [Category; 3] = [Category::Elektronik, Category::Pakaian, Category::Makanan];

    /// Name of the category as stored and displayed.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Elektronik => "Elektronik",
            Category::Pakaian => "Pakaian",
            Category::Makanan => "Makanan",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Validated product fields, without an identifier.
///
/// Only produced by [`Draft::validate`](crate::draft::Draft::validate), so holding one
/// means every field constraint has already been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductData {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) price: Decimal,
    pub(crate) category: Category,
    pub(crate) release_date: Option<Date>,
    pub(crate) stock: u32,
    pub(crate) active: bool,
}

impl ProductData {
    /// Trimmed product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Stock on hand
    pub fn stock(&self) -> u32 {
        self.stock
    }
}

/// A product record in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    category: Category,
    #[serde(default, with = "iso_date")]
    release_date: Option<Date>,
    stock: u32,
    active: bool,
}

impl Product {
    /// Creates a product record from an identifier and validated fields.
    pub fn new(id: ProductId, data: ProductData) -> Self {
        let ProductData {
            name,
            description,
            price,
            category,
            release_date,
            stock,
            active,
        } = data;

        Self {
            id,
            name,
            description,
            price,
            category,
            release_date,
            stock,
            active,
        }
    }

    /// Replaces every field except the identifier.
    pub(crate) fn replace(&mut self, data: ProductData) {
        *self = Self::new(self.id, data);
    }

    /// Product identifier
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product description, empty when none was given
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Product price
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Product category
    pub fn category(&self) -> Category {
        self.category
    }

    /// Release date, if known
    pub fn release_date(&self) -> Option<Date> {
        self.release_date
    }

    /// Stock on hand
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Whether the product is active
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Release dates are stored as `YYYY-MM-DD`, with an empty string for "no date".
mod iso_date {
    use jiff::civil::Date;
    use serde::{Deserialize, Deserializer, Serializer, de};

    #[expect(clippy::ref_option, reason = "signature required by serde `with`")]
    pub(super) fn serialize<S: Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.collect_str(date),
            None => serializer.serialize_str(""),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Date>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;

        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value.parse().map(Some).map_err(de::Error::custom),
        }
    }
}
