//! Validation
//!
//! Every field is checked independently and every failure is reported, so a form
//! can mark all invalid inputs at once.

use std::collections::{BTreeMap, btree_map};

use jiff::civil::Date;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use thiserror::Error;

use crate::{
    draft::Draft,
    products::{Category, ProductData},
};

/// Longest accepted product name, in characters.
pub const NAME_MAX_CHARS: usize = 100;

/// Shortest accepted non-empty description, in characters.
pub const DESCRIPTION_MIN_CHARS: usize = 20;

/// Largest accepted stock level.
pub const STOCK_MAX: u32 = 10_000;

/// Form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Product name
    Name,

    /// Description
    Description,

    /// Price
    Price,

    /// Category
    Category,

    /// Release date
    ReleaseDate,

    /// Stock
    Stock,
}

impl Field {
    /// Field key as used in the persisted layout.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::Price => "price",
            Field::Category => "category",
            Field::ReleaseDate => "releaseDate",
            Field::Stock => "stock",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Nothing was entered.
    #[error("is required")]
    Required,

    /// Input is longer than allowed.
    #[error("must be at most {max} characters")]
    TooLong {
        /// Maximum number of characters
        max: usize,
    },

    /// Input is present but shorter than allowed.
    #[error("must be at least {min} characters")]
    TooShort {
        /// Minimum number of characters
        min: usize,
    },

    /// Input could not be read as the expected kind of value.
    #[error("must be {expected}")]
    Invalid {
        /// Description of the accepted input
        expected: &'static str,
    },

    /// Date lies after today.
    #[error("must not be in the future")]
    FutureDate,

    /// Number is larger than allowed.
    #[error("must not exceed {max}")]
    ExceedsMaximum {
        /// Largest accepted value
        max: u32,
    },
}

/// Field-keyed validation failures. Empty means the draft can be committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    /// Whether no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failure for a single field, if any.
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// Whether the given field failed.
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Iterates failures in field order.
    pub fn iter(&self) -> btree_map::Iter<'_, Field, FieldError> {
        self.0.iter()
    }

    fn record<T>(&mut self, field: Field, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.0.insert(field, error);
                None
            }
        }
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = (&'a Field, &'a FieldError);
    type IntoIter = btree_map::Iter<'a, Field, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Validates a draft against `today`, returning every failed field.
pub fn validate(draft: &Draft, today: Date) -> ValidationErrors {
    check(draft, today).err().unwrap_or_default()
}

/// Validates a draft and converts it into trimmed, parsed product fields.
pub(crate) fn check(draft: &Draft, today: Date) -> Result<ProductData, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = errors.record(Field::Name, name(&draft.name));
    let description = errors.record(Field::Description, description(&draft.description));
    let price = errors.record(Field::Price, price(&draft.price));
    let category = errors.record(Field::Category, category(&draft.category));
    let release_date = errors.record(Field::ReleaseDate, release_date(&draft.release_date, today));
    let stock = errors.record(Field::Stock, stock(&draft.stock));

    match (name, description, price, category, release_date, stock) {
        (
            Some(name),
            Some(description),
            Some(price),
            Some(category),
            Some(release_date),
            Some(stock),
        ) => Ok(ProductData {
            name,
            description,
            price,
            category,
            release_date,
            stock,
            active: draft.active,
        }),
        _ => Err(errors),
    }
}

fn name(raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(FieldError::Required);
    }

    if trimmed.chars().count() > NAME_MAX_CHARS {
        return Err(FieldError::TooLong {
            max: NAME_MAX_CHARS,
        });
    }

    Ok(trimmed.to_string())
}

fn description(raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    let chars = trimmed.chars().count();

    if chars > 0 && chars < DESCRIPTION_MIN_CHARS {
        return Err(FieldError::TooShort {
            min: DESCRIPTION_MIN_CHARS,
        });
    }

    Ok(trimmed.to_string())
}

fn price(raw: &str) -> Result<Decimal, FieldError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(FieldError::Required);
    }

    let invalid = FieldError::Invalid {
        expected: "a number greater than 0",
    };

    match number(trimmed) {
        Some(value) if value > Decimal::ZERO => Ok(value),
        _ => Err(invalid),
    }
}

fn category(raw: &str) -> Result<Category, FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::Required);
    }

    raw.parse().map_err(|_unknown| FieldError::Invalid {
        expected: "one of Elektronik, Pakaian or Makanan",
    })
}

fn release_date(raw: &str, today: Date) -> Result<Option<Date>, FieldError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Ok(None);
    }

    let date = trimmed
        .parse::<Date>()
        .map_err(|_err| FieldError::Invalid {
            expected: "a date in YYYY-MM-DD form",
        })?;

    if date > today {
        return Err(FieldError::FutureDate);
    }

    Ok(Some(date))
}

fn stock(raw: &str) -> Result<u32, FieldError> {
    let trimmed = raw.trim();

    // A cleared stock input counts as zero.
    if trimmed.is_empty() {
        return Ok(0);
    }

    let invalid = FieldError::Invalid {
        expected: "a whole number of at least 0",
    };

    let value = number(trimmed).ok_or_else(|| invalid.clone())?;

    if value < Decimal::ZERO || !value.fract().is_zero() {
        return Err(invalid);
    }

    if value > Decimal::from(STOCK_MAX) {
        return Err(FieldError::ExceedsMaximum { max: STOCK_MAX });
    }

    value.to_u32().ok_or(invalid)
}

/// Parses plain or exponent notation, so `"5.0"` and `"1e3"` are both numbers.
fn number(raw: &str) -> Option<Decimal> {
    raw.parse::<Decimal>()
        .or_else(|_err| Decimal::from_scientific(raw))
        .ok()
}
