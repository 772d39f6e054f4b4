//! Query engine implementation
//!
//! Provides the read-side queries over the storefront schema:
//! - Customer listing, optionally filtered by country code
//! - Customer counts grouped by country code
//! - Customer name / card number pairs (inner join)
//! - Order counts per customer (inner join + group by)

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::Result;
use crate::model::Customer;
use crate::storage::SqliteStore;
use crate::storage::sqlite::{row_to_customer, CUSTOMER_COLUMNS};

/// A customer's name next to one of their card numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCard {
    pub name: String,
    pub number: String,
}

/// Number of orders placed by one customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOrderCount {
    pub customer_id: i64,
    pub orders: usize,
}

/// Query engine over one store session
pub struct QueryEngine<'a> {
    store: &'a SqliteStore,
}

impl<'a> QueryEngine<'a> {
    /// Create a new query engine
    pub fn new(store: &'a SqliteStore) -> Self {
        Self { store }
    }

    /// All customers in storage order
    pub fn list_customers(&self) -> Result<Vec<Customer>> {
        tracing::debug!("SELECT customer");
        let mut stmt = self
            .store
            .conn()
            .prepare(&format!("SELECT {} FROM customer", CUSTOMER_COLUMNS))?;

        let customers = stmt
            .query_map([], row_to_customer)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(customers)
    }

    /// Customers whose country code equals `code` exactly
    pub fn list_customers_by_country(&self, code: &str) -> Result<Vec<Customer>> {
        tracing::debug!("SELECT customer WHERE country_code = {}", code);
        let mut stmt = self.store.conn().prepare(&format!(
            "SELECT {} FROM customer WHERE country_code = ?1",
            CUSTOMER_COLUMNS
        ))?;

        let customers = stmt
            .query_map([code], row_to_customer)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(customers)
    }

    /// Number of customers per country code
    pub fn count_customers_by_country(&self) -> Result<BTreeMap<String, usize>> {
        tracing::debug!("SELECT country_code, COUNT(*) FROM customer GROUP BY country_code");
        let mut stmt = self.store.conn().prepare(
            "SELECT country_code, COUNT(country_code) FROM customer GROUP BY country_code",
        )?;

        let counts = stmt
            .query_map([], |row| {
                let code: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((code, count as usize))
            })?
            .collect::<rusqlite::Result<BTreeMap<_, _>>>()?;
        Ok(counts)
    }

    /// Name and card number for every customer that has a card
    pub fn customers_with_card_numbers(&self) -> Result<Vec<CustomerCard>> {
        tracing::debug!("SELECT customer JOIN credit_card");
        let mut stmt = self.store.conn().prepare(
            r#"
            SELECT customer.name, credit_card.number
            FROM customer
            JOIN credit_card ON credit_card.customer_id = customer.id
            "#,
        )?;

        let pairs = stmt
            .query_map([], |row| {
                Ok(CustomerCard {
                    name: row.get(0)?,
                    number: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(pairs)
    }

    /// Order count for every customer with at least one order
    pub fn order_counts_by_customer(&self) -> Result<Vec<CustomerOrderCount>> {
        tracing::debug!("SELECT customer JOIN order GROUP BY customer.id");
        let mut stmt = self.store.conn().prepare(
            r#"
            SELECT customer.id, COUNT("order".id)
            FROM customer
            JOIN "order" ON "order".customer_id = customer.id
            GROUP BY customer.id
            "#,
        )?;

        let counts = stmt
            .query_map([], |row| {
                let count: i64 = row.get(1)?;
                Ok(CustomerOrderCount {
                    customer_id: row.get(0)?,
                    orders: count as usize,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewCreditCard, NewCustomer, NewOrder, NewProduct};
    use crate::seed::SampleGenerator;

    fn customer(store: &SqliteStore, name: &str, country: &str) -> Customer {
        store
            .insert_customer(NewCustomer::new(name, "x@example.com", "1 Main St", country))
            .unwrap()
    }

    #[test]
    fn test_filter_by_country() {
        let store = SqliteStore::open_in_memory().unwrap();
        customer(&store, "Ann", "LU");
        customer(&store, "Bob", "DE");
        customer(&store, "Cid", "LU");
        customer(&store, "Dee", "lu");

        let engine = QueryEngine::new(&store);
        let lu = engine.list_customers_by_country("LU").unwrap();
        let names: Vec<_> = lu.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Cid"]);

        assert!(engine.list_customers_by_country("FR").unwrap().is_empty());
        assert_eq!(engine.list_customers().unwrap().len(), 4);
    }

    #[test]
    fn test_count_by_country() {
        let store = SqliteStore::open_in_memory().unwrap();
        customer(&store, "Ann", "LU");
        customer(&store, "Bob", "DE");
        customer(&store, "Cid", "LU");

        let counts = QueryEngine::new(&store).count_customers_by_country().unwrap();
        assert_eq!(counts.get("LU"), Some(&2));
        assert_eq!(counts.get("DE"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_card_join_excludes_cardless() {
        let store = SqliteStore::open_in_memory().unwrap();
        let ann = customer(&store, "Ann", "LU");
        customer(&store, "Bob", "DE");
        store
            .insert_credit_card(NewCreditCard::new(ann.id, "4111111111111111"))
            .unwrap();

        let pairs = QueryEngine::new(&store).customers_with_card_numbers().unwrap();
        assert_eq!(
            pairs,
            vec![CustomerCard { name: "Ann".into(), number: "4111111111111111".into() }]
        );
    }

    #[test]
    fn test_order_counts_exclude_customers_without_orders() {
        let store = SqliteStore::open_in_memory().unwrap();
        let ann = customer(&store, "Ann", "LU");
        let bob = customer(&store, "Bob", "DE");
        customer(&store, "Cid", "FR");
        let mug = store
            .insert_product(NewProduct::new("Mug", 9.99, "ABC", "XYZ"))
            .unwrap();

        for _ in 0..3 {
            store.insert_order(NewOrder::new(ann.id, mug.id, 1)).unwrap();
        }
        store.insert_order(NewOrder::new(bob.id, mug.id, 2)).unwrap();

        let mut counts = QueryEngine::new(&store).order_counts_by_customer().unwrap();
        counts.sort_by_key(|c| c.customer_id);
        assert_eq!(
            counts,
            vec![
                CustomerOrderCount { customer_id: ann.id, orders: 3 },
                CustomerOrderCount { customer_id: bob.id, orders: 1 },
            ]
        );
    }

    #[test]
    fn test_queries_on_empty_store() {
        let store = SqliteStore::open_in_memory().unwrap();
        let engine = QueryEngine::new(&store);
        assert!(engine.list_customers().unwrap().is_empty());
        assert!(engine.count_customers_by_country().unwrap().is_empty());
        assert!(engine.customers_with_card_numbers().unwrap().is_empty());
        assert!(engine.order_counts_by_customer().unwrap().is_empty());
    }

    #[test]
    fn test_seeded_data_properties() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .seed_sample_data(&mut SampleGenerator::with_seed(5), 25)
            .unwrap();
        let engine = QueryEngine::new(&store);

        let customers = engine.list_customers().unwrap();
        assert_eq!(customers.len(), 25);

        let counts = engine.count_customers_by_country().unwrap();
        assert_eq!(counts.values().sum::<usize>(), customers.len());
        for (code, count) in &counts {
            let filtered = engine.list_customers_by_country(code).unwrap();
            assert_eq!(filtered.len(), *count);
            assert!(filtered.iter().all(|c| &c.country_code == code));
        }

        let pairs = engine.customers_with_card_numbers().unwrap();
        assert_eq!(pairs.len(), customers.len());

        let orders = engine.order_counts_by_customer().unwrap();
        assert_eq!(orders.len(), customers.len());
        assert!(orders.iter().all(|o| o.orders == 1));
    }
}
