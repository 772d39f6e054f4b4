//! Record types for the storefront schema
//!
//! Four record types, each mapped to one table:
//! - `Customer`: name, email, postal address and a 2-letter country code
//! - `CreditCard`: card number owned by exactly one customer
//! - `Product`: catalogue entry with a non-negative price
//! - `Order`: a quantity of one product bought by one customer
//!
//! Each type has an insert form (`New*`) without an id. Insert forms are
//! validated before they reach the store.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of `customer.name`, `product.name` and `product.category`
pub const MAX_NAME_LEN: usize = 100;

/// Exact length of `customer.country_code`
pub const COUNTRY_CODE_LEN: usize = 2;

/// Maximum length of `credit_card.number`
pub const MAX_CARD_NUMBER_LEN: usize = 19;

/// A stored customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email_address: String,
    pub address: String,
    pub country_code: String,
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Customer(name={:?})>", self.name)
    }
}

/// A customer ready to be inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email_address: String,
    pub address: String,
    pub country_code: String,
}

impl NewCustomer {
    pub fn new(
        name: impl Into<String>,
        email_address: impl Into<String>,
        address: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email_address: email_address.into(),
            address: address.into(),
            country_code: country_code.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_bounded("customer name", &self.name, MAX_NAME_LEN)?;
        validate_country_code(&self.country_code)
    }

    /// Attach the id assigned by the store
    pub fn with_id(self, id: i64) -> Customer {
        Customer {
            id,
            name: self.name,
            email_address: self.email_address,
            address: self.address,
            country_code: self.country_code,
        }
    }
}

/// A stored credit card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: i64,
    pub customer_id: i64,
    pub number: String,
}

impl fmt::Display for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<CreditCard(number={:?})>", self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCreditCard {
    pub customer_id: i64,
    pub number: String,
}

impl NewCreditCard {
    pub fn new(customer_id: i64, number: impl Into<String>) -> Self {
        Self {
            customer_id,
            number: number.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let len = self.number.chars().count();
        if len == 0 || len > MAX_CARD_NUMBER_LEN {
            return Err(Error::InvalidRecord(format!(
                "card number must have 1..={} digits, got {}",
                MAX_CARD_NUMBER_LEN, len
            )));
        }
        if !self.number.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidRecord(format!(
                "card number must be digits only: {:?}",
                self.number
            )));
        }
        Ok(())
    }

    pub fn with_id(self, id: i64) -> CreditCard {
        CreditCard {
            id,
            customer_id: self.customer_id,
            number: self.number,
        }
    }
}

/// A stored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: String,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Product(name={:?})>", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: String,
}

impl NewProduct {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            description: description.into(),
            category: category.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_bounded("product name", &self.name, MAX_NAME_LEN)?;
        check_bounded("product category", &self.category, MAX_NAME_LEN)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(Error::InvalidRecord(format!(
                "product price must be a finite value >= 0, got {}",
                self.price
            )));
        }
        Ok(())
    }

    pub fn with_id(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            description: self.description,
            category: self.category,
        }
    }
}

/// A stored order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    pub quantity: u32,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Order(quantity={})>", self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: i64,
    pub product_id: i64,
    pub quantity: u32,
}

impl NewOrder {
    pub fn new(customer_id: i64, product_id: i64, quantity: u32) -> Self {
        Self {
            customer_id,
            product_id,
            quantity,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.quantity < 1 {
            return Err(Error::InvalidRecord(
                "order quantity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_id(self, id: i64) -> Order {
        Order {
            id,
            customer_id: self.customer_id,
            product_id: self.product_id,
            quantity: self.quantity,
        }
    }
}

/// Check that a country code is exactly two ASCII letters
pub fn validate_country_code(code: &str) -> Result<()> {
    if code.len() != COUNTRY_CODE_LEN || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(Error::InvalidRecord(format!(
            "country code must be {} letters, got {:?}",
            COUNTRY_CODE_LEN, code
        )));
    }
    Ok(())
}

fn check_bounded(field: &str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(Error::InvalidRecord(format!(
            "{} is {} chars, limit is {}",
            field, len, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_customer() -> NewCustomer {
        NewCustomer::new("Ada Lovelace", "ada@example.org", "12 St James's Square, London", "GB")
    }

    #[test]
    fn test_customer_validation() {
        assert!(sample_customer().validate().is_ok());

        let mut bad = sample_customer();
        bad.country_code = "GBR".to_string();
        assert!(matches!(bad.validate(), Err(Error::InvalidRecord(_))));

        bad.country_code = "1A".to_string();
        assert!(bad.validate().is_err());

        let mut long_name = sample_customer();
        long_name.name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(long_name.validate().is_err());
    }

    #[test]
    fn test_product_price_bounds() {
        assert!(NewProduct::new("Free sample", 0.0, "", "Misc").validate().is_ok());
        assert!(NewProduct::new("Refund", -0.01, "", "Misc").validate().is_err());
        assert!(NewProduct::new("Broken", f64::NAN, "", "Misc").validate().is_err());
        assert!(NewProduct::new("Broken", f64::INFINITY, "", "Misc").validate().is_err());
    }

    #[test]
    fn test_order_quantity() {
        assert!(NewOrder::new(1, 1, 1).validate().is_ok());
        assert!(NewOrder::new(1, 1, 0).validate().is_err());
    }

    #[test]
    fn test_card_number() {
        assert!(NewCreditCard::new(1, "4111111111111111").validate().is_ok());
        assert!(NewCreditCard::new(1, "").validate().is_err());
        assert!(NewCreditCard::new(1, "4111-1111-1111-1111").validate().is_err());
        assert!(NewCreditCard::new(1, "1".repeat(20)).validate().is_err());
    }

    #[test]
    fn test_display_matches_repr() {
        let customer = sample_customer().with_id(7);
        assert_eq!(customer.to_string(), "<Customer(name=\"Ada Lovelace\")>");
        assert_eq!(NewOrder::new(1, 2, 3).with_id(1).to_string(), "<Order(quantity=3)>");
    }
}
