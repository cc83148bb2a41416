//! # Value Objects
//!
//! Self-validating, immutable values that make up products.
//!
//! ## Construction Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw input ──► Type::new(raw) ──┬──► Ok(value)   always valid after     │
//! │                                 │                 this point            │
//! │                                 └──► Err(ValidationError::Invalid*)    │
//! │                                                                         │
//! │  Deserialization goes through the same checks (`try_from`).            │
//! │  There is no way to build an invalid StockKeepingUnit, Price, ...      │
//! │  Updates go through `with_*`, which validate again.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::validation::{
    is_valid_product_text, is_valid_sku, is_valid_stock, is_valid_tax_percentage,
    is_valid_weight,
};

// =============================================================================
// StockKeepingUnit
// =============================================================================

/// Product SKU: non-blank, ASCII letters and digits only.
///
/// The SKU is the business key shared by all three product facets.
///
/// ## Example
/// ```rust
/// use prodman_core::value_objects::StockKeepingUnit;
///
/// let sku = StockKeepingUnit::new("ABC123").unwrap();
/// assert_eq!(sku.as_str(), "ABC123");
/// assert!(StockKeepingUnit::new("ABC-123").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StockKeepingUnit(String);

impl StockKeepingUnit {
    pub fn new(value: impl Into<String>) -> ValidationResult<Self> {
        let value = value.into();
        if !is_valid_sku(&value) {
            return Err(ValidationError::InvalidSku);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StockKeepingUnit {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StockKeepingUnit> for String {
    fn from(sku: StockKeepingUnit) -> Self {
        sku.0
    }
}

impl fmt::Display for StockKeepingUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// ProductName / ProductDescription
// =============================================================================

/// Product name: non-blank, letters, digits and spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductName(String);

impl ProductName {
    pub fn new(value: impl Into<String>) -> ValidationResult<Self> {
        let value = value.into();
        if !is_valid_product_text(&value) {
            return Err(ValidationError::InvalidProductName);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProductName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductName> for String {
    fn from(name: ProductName) -> Self {
        name.0
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Product description: same character rules as [`ProductName`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductDescription(String);

impl ProductDescription {
    pub fn new(value: impl Into<String>) -> ValidationResult<Self> {
        let value = value.into();
        if !is_valid_product_text(&value) {
            return Err(ValidationError::InvalidDescription);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProductDescription {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductDescription> for String {
    fn from(description: ProductDescription) -> Self {
        description.0
    }
}

// =============================================================================
// ProductStock / ProductWeight
// =============================================================================

/// Units on hand. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct ProductStock(i32);

impl ProductStock {
    pub fn new(value: i32) -> ValidationResult<Self> {
        if !is_valid_stock(value) {
            return Err(ValidationError::InvalidStock);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for ProductStock {
    type Error = ValidationError;

    fn try_from(value: i32) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl From<ProductStock> for i32 {
    fn from(stock: ProductStock) -> Self {
        stock.0
    }
}

/// Shipping weight. Finite and never negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ProductWeight(f64);

impl ProductWeight {
    pub fn new(value: f64) -> ValidationResult<Self> {
        if !is_valid_weight(value) {
            return Err(ValidationError::InvalidWeight);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ProductWeight {
    type Error = ValidationError;

    fn try_from(value: f64) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl From<ProductWeight> for f64 {
    fn from(weight: ProductWeight) -> Self {
        weight.0
    }
}

// =============================================================================
// Price
// =============================================================================

/// Sales pricing: cost, net price and tax percentage, validated together.
///
/// ## Rules (checked in this order)
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. cost > 0                     else InvalidCost                       │
/// │  2. net_price > 0                else InvalidNetPrice { "0" }           │
/// │  3. net_price > cost             else InvalidNetPrice { "cost" }        │
/// │  4. tax_percentage >= 0          else InvalidTaxPercentage              │
/// │  5. tax_percentage < 100         else InvalidTaxPercentage              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Example
/// ```rust
/// use prodman_core::money::Money;
/// use prodman_core::value_objects::Price;
///
/// let price = Price::new(Money::from_cents(1000), Money::from_cents(1500), 23).unwrap();
/// assert_eq!(price.net_price().cents(), 1500);
///
/// // net price must exceed cost
/// assert!(Price::new(Money::from_cents(1000), Money::from_cents(1000), 23).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPrice")]
pub struct Price {
    cost: Money,
    net_price: Money,
    tax_percentage: i32,
}

impl Price {
    pub fn new(cost: Money, net_price: Money, tax_percentage: i32) -> ValidationResult<Self> {
        if !cost.is_positive() {
            return Err(ValidationError::InvalidCost);
        }
        if !net_price.is_positive() {
            return Err(ValidationError::InvalidNetPrice { bound: "0" });
        }
        if net_price <= cost {
            return Err(ValidationError::InvalidNetPrice { bound: "cost" });
        }
        if tax_percentage < 0 {
            return Err(ValidationError::InvalidTaxPercentage {
                reason: "less than 0",
            });
        }
        if !is_valid_tax_percentage(tax_percentage) {
            return Err(ValidationError::InvalidTaxPercentage {
                reason: "greater than or equal to 100",
            });
        }

        Ok(Self {
            cost,
            net_price,
            tax_percentage,
        })
    }

    pub fn cost(&self) -> Money {
        self.cost
    }

    pub fn net_price(&self) -> Money {
        self.net_price
    }

    pub fn tax_percentage(&self) -> i32 {
        self.tax_percentage
    }

    /// Net price with tax added, rounded half up to the cent.
    pub fn gross_price(&self) -> Money {
        self.net_price.apply_tax_percentage(self.tax_percentage)
    }

    /// Replaces the cost, re-checking it against the current net price.
    pub fn with_cost(&self, cost: Money) -> ValidationResult<Self> {
        Self::new(cost, self.net_price, self.tax_percentage)
    }

    /// Replaces the net price, re-checking it against the current cost.
    pub fn with_net_price(&self, net_price: Money) -> ValidationResult<Self> {
        Self::new(self.cost, net_price, self.tax_percentage)
    }

    pub fn with_tax_percentage(&self, tax_percentage: i32) -> ValidationResult<Self> {
        Self::new(self.cost, self.net_price, tax_percentage)
    }
}

/// Unchecked wire shape of [`Price`].
#[derive(Deserialize)]
struct RawPrice {
    cost: Money,
    net_price: Money,
    tax_percentage: i32,
}

impl TryFrom<RawPrice> for Price {
    type Error = ValidationError;

    fn try_from(raw: RawPrice) -> ValidationResult<Self> {
        Price::new(raw.cost, raw.net_price, raw.tax_percentage)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
