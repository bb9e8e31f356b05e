//! Draft
//!
//! The editable form state: raw field input as typed by the user, before validation.

use jiff::civil::Date;

use crate::{
    products::{Product, ProductData},
    validation::{self, ValidationErrors},
};

/// Raw form input for a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    /// Product name
    pub name: String,

    /// Multi-line description
    pub description: String,

    /// Price as typed
    pub price: String,

    /// Selected category name, empty when nothing is selected
    pub category: String,

    /// Release date as `YYYY-MM-DD`, empty when not set
    pub release_date: String,

    /// Stock as typed
    pub stock: String,

    /// Active toggle
    pub active: bool,
}

impl Draft {
    /// Seeds a draft from an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name().to_string(),
            description: product.description().to_string(),
            price: product.price().normalize().to_string(),
            category: product.category().to_string(),
            release_date: product
                .release_date()
                .map(|date| date.to_string())
                .unwrap_or_default(),
            stock: product.stock().to_string(),
            active: product.is_active(),
        }
    }

    /// Clears every field back to the blank defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validates the draft against `today`.
    ///
    /// # Errors
    ///
    /// Returns every field that failed validation.
    pub fn validate(&self, today: Date) -> Result<ProductData, ValidationErrors> {
        validation::check(self, today)
    }
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: String::new(),
            release_date: String::new(),
            stock: "0".to_string(),
            active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;
    use crate::products::{Category, ProductId};

    #[test]
    fn default_draft_is_blank_and_active() {
        let draft = Draft::default();

        assert!(draft.name.is_empty());
        assert!(draft.price.is_empty());
        assert!(draft.category.is_empty());
        assert_eq!(draft.stock, "0");
        assert!(draft.active);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut draft = Draft {
            name: "Widget".to_string(),
            stock: "12".to_string(),
            active: false,
            ..Draft::default()
        };

        draft.reset();

        assert_eq!(draft, Draft::default());
    }

    #[test]
    fn from_product_round_trips_through_validation() -> TestResult {
        let today = date(2026, 10, 18);
        let draft = Draft {
            name: "Kaos Polos".to_string(),
            description: "Kaos katun lengan pendek warna putih".to_string(),
            price: "75000.50".to_string(),
            category: "Pakaian".to_string(),
            release_date: "2025-03-01".to_string(),
            stock: "40".to_string(),
            active: false,
        };

        let product = Product::new(ProductId::new(1), draft.validate(today)?);
        let seeded = Draft::from_product(&product);

        assert_eq!(seeded.price, "75000.5");
        assert_eq!(seeded.release_date, "2025-03-01");
        assert_eq!(seeded.category, Category::Pakaian.as_str());
        assert_eq!(seeded.validate(today)?.price(), Decimal::new(7_500_050, 2));

        Ok(())
    }

    #[test]
    fn from_product_without_release_date_leaves_field_empty() -> TestResult {
        let draft = Draft {
            name: "Widget".to_string(),
            price: "10".to_string(),
            category: "Elektronik".to_string(),
            ..Draft::default()
        };

        let product = Product::new(ProductId::new(1), draft.validate(date(2026, 1, 1))?);

        assert!(Draft::from_product(&product).release_date.is_empty());

        Ok(())
    }
}
