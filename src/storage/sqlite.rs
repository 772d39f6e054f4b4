//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params};
use serde::Serialize;
use crate::{Result, Error};
use crate::model::{
    Customer, CreditCard, NewCreditCard, NewCustomer, NewOrder, NewProduct, Order, Product,
};
use crate::seed::SampleGenerator;
use super::schema;

/// Column list shared by every customer query
pub(crate) const CUSTOMER_COLUMNS: &str =
    "customer.id, customer.name, customer.email_address, customer.address, customer.country_code";

/// SQLite-backed storage for the storefront schema.
///
/// One store is one session: the connection is released when the store is
/// dropped.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| Error::Connection {
            target: path.display().to_string(),
            source,
        })?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::Connection {
            target: ":memory:".to_string(),
            source,
        })?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Create the four tables if absent and check existing ones.
    ///
    /// Safe to call any number of times. An existing table missing one of the
    /// declared columns is reported as `Error::SchemaConflict`, and in that
    /// case nothing is created.
    pub fn ensure_schema(&self) -> Result<()> {
        self.check_schema()?;
        for stmt in schema::CREATE_TABLES {
            self.conn.execute(stmt, [])?;
        }
        for stmt in schema::CREATE_INDEXES {
            self.conn.execute(stmt, [])?;
        }
        tracing::debug!("Schema ready");
        Ok(())
    }

    fn check_schema(&self) -> Result<()> {
        for (table, expected) in schema::EXPECTED_COLUMNS {
            let mut stmt = self
                .conn
                .prepare(&format!("PRAGMA table_info(\"{}\")", table))?;
            let columns: Vec<String> = stmt
                .query_map([], |row| row.get(1))?
                .collect::<rusqlite::Result<_>>()?;

            // Absent tables are created afterwards
            if columns.is_empty() {
                continue;
            }

            let missing: Vec<&str> = expected
                .iter()
                .copied()
                .filter(|col| !columns.iter().any(|c| c == col))
                .collect();

            if !missing.is_empty() {
                return Err(Error::SchemaConflict {
                    table: table.to_string(),
                    detail: format!(
                        "missing column(s) {} (found: {})",
                        missing.join(", "),
                        columns.join(", ")
                    ),
                });
            }
        }
        Ok(())
    }

    // ========== Inserts ==========

    /// Validate and insert a customer
    pub fn insert_customer(&self, customer: NewCustomer) -> Result<Customer> {
        insert_customer(&self.conn, customer)
    }

    /// Validate and insert a credit card; the customer must exist
    pub fn insert_credit_card(&self, card: NewCreditCard) -> Result<CreditCard> {
        insert_credit_card(&self.conn, card)
    }

    /// Validate and insert a product
    pub fn insert_product(&self, product: NewProduct) -> Result<Product> {
        insert_product(&self.conn, product)
    }

    /// Validate and insert an order; customer and product must exist
    pub fn insert_order(&self, order: NewOrder) -> Result<Order> {
        insert_order(&self.conn, order)
    }

    // ========== Seeding ==========

    /// Insert the product catalogue plus `count` customers, each with one
    /// credit card and one order, in a single transaction.
    ///
    /// Nothing is written if any insert fails. Running it again appends a
    /// second copy of everything.
    pub fn seed_sample_data(
        &mut self,
        generator: &mut SampleGenerator,
        count: usize,
    ) -> Result<SeedReport> {
        let tx = self.conn.transaction()?;
        let mut report = SeedReport::default();

        let mut product_ids = Vec::new();
        for product in generator.products() {
            product_ids.push(insert_product(&tx, product)?.id);
        }
        report.products = product_ids.len();

        for _ in 0..count {
            let customer = insert_customer(&tx, generator.customer())?;
            insert_credit_card(&tx, NewCreditCard::new(customer.id, generator.card_number()))?;

            let product_id = generator.pick_product(&product_ids).ok_or_else(|| {
                Error::InvalidRecord("no products available for sample orders".to_string())
            })?;
            insert_order(&tx, NewOrder::new(customer.id, product_id, generator.quantity()))?;

            report.customers += 1;
            report.credit_cards += 1;
            report.orders += 1;
        }

        tx.commit()?;
        tracing::info!(
            "Seeded {} customers, {} products",
            report.customers,
            report.products
        );
        Ok(report)
    }

    // ========== Stats ==========

    fn count_rows(&self, table: &str) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM \"{}\"", table),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Count all customers
    pub fn count_customers(&self) -> Result<usize> {
        self.count_rows("customer")
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            customers: self.count_rows("customer")?,
            credit_cards: self.count_rows("credit_card")?,
            products: self.count_rows("product")?,
            orders: self.count_rows("order")?,
        })
    }
}

fn insert_customer(conn: &Connection, customer: NewCustomer) -> Result<Customer> {
    customer.validate()?;
    tracing::debug!("INSERT INTO customer ({})", customer.name);
    conn.execute(
        r#"
        INSERT INTO customer (name, email_address, address, country_code)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![
            customer.name,
            customer.email_address,
            customer.address,
            customer.country_code,
        ],
    )?;
    Ok(customer.with_id(conn.last_insert_rowid()))
}

fn insert_credit_card(conn: &Connection, card: NewCreditCard) -> Result<CreditCard> {
    card.validate()?;
    tracing::debug!("INSERT INTO credit_card (customer {})", card.customer_id);
    conn.execute(
        "INSERT INTO credit_card (customer_id, number) VALUES (?1, ?2)",
        params![card.customer_id, card.number],
    )?;
    Ok(card.with_id(conn.last_insert_rowid()))
}

fn insert_product(conn: &Connection, product: NewProduct) -> Result<Product> {
    product.validate()?;
    tracing::debug!("INSERT INTO product ({})", product.name);
    conn.execute(
        r#"
        INSERT INTO product (name, price, description, category)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![
            product.name,
            product.price,
            product.description,
            product.category,
        ],
    )?;
    Ok(product.with_id(conn.last_insert_rowid()))
}

fn insert_order(conn: &Connection, order: NewOrder) -> Result<Order> {
    order.validate()?;
    tracing::debug!(
        "INSERT INTO order (customer {}, product {})",
        order.customer_id,
        order.product_id
    );
    conn.execute(
        r#"INSERT INTO "order" (customer_id, product_id, quantity) VALUES (?1, ?2, ?3)"#,
        params![order.customer_id, order.product_id, order.quantity],
    )?;
    Ok(order.with_id(conn.last_insert_rowid()))
}

/// Convert a row selected with `CUSTOMER_COLUMNS` to a Customer
pub(crate) fn row_to_customer(row: &rusqlite::Row) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get(0)?,
        name: row.get(1)?,
        email_address: row.get(2)?,
        address: row.get(3)?,
        country_code: row.get(4)?,
    })
}

/// Rows written by one seed run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub customers: usize,
    pub credit_cards: usize,
    pub products: usize,
    pub orders: usize,
}

/// Database statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DbStats {
    pub customers: usize,
    pub credit_cards: usize,
    pub products: usize,
    pub orders: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_customer(name: &str, country: &str) -> NewCustomer {
        NewCustomer::new(name, "someone@example.com", "1 Main Street, Springfield", country)
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();

        let tables: i64 = store
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' \
                 AND name IN ('customer', 'credit_card', 'product', 'order')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 4);
    }

    #[test]
    fn test_insert_assigns_ids() {
        let store = SqliteStore::open_in_memory().unwrap();

        let first = store.insert_customer(sample_customer("Ann", "LU")).unwrap();
        let second = store.insert_customer(sample_customer("Bob", "DE")).unwrap();
        assert_ne!(first.id, second.id);

        let card = store
            .insert_credit_card(NewCreditCard::new(first.id, "4111111111111111"))
            .unwrap();
        assert_eq!(card.customer_id, first.id);
        assert_eq!(store.count_customers().unwrap(), 2);
    }

    #[test]
    fn test_dangling_references_rejected() {
        let store = SqliteStore::open_in_memory().unwrap();

        let err = store
            .insert_credit_card(NewCreditCard::new(999, "4111111111111111"))
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)), "{err:?}");

        let customer = store.insert_customer(sample_customer("Ann", "LU")).unwrap();
        let err = store
            .insert_order(NewOrder::new(customer.id, 42, 1))
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)), "{err:?}");
    }

    #[test]
    fn test_invalid_records_never_reach_the_store() {
        let store = SqliteStore::open_in_memory().unwrap();

        let err = store.insert_customer(sample_customer("Ann", "LUX")).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));

        let err = store
            .insert_product(NewProduct::new("Refund", -1.0, "", "Misc"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));

        assert_eq!(store.stats().unwrap().customers, 0);
        assert_eq!(store.stats().unwrap().products, 0);
    }

    #[test]
    fn test_check_constraints_hold_for_raw_sql() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = store
            .conn
            .execute(
                "INSERT INTO customer (name, email_address, address, country_code) \
                 VALUES ('x', 'x', 'x', 'XYZ')",
                [],
            )
            .map_err(Error::from)
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));
    }

    #[test]
    fn test_seed_sample_data() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let mut generator = SampleGenerator::with_seed(11);

        let report = store.seed_sample_data(&mut generator, 5).unwrap();
        assert_eq!(
            report,
            SeedReport { customers: 5, credit_cards: 5, products: 10, orders: 5 }
        );

        let stats = store.stats().unwrap();
        assert_eq!(stats.customers, 5);
        assert_eq!(stats.credit_cards, 5);
        assert_eq!(stats.products, 10);
        assert_eq!(stats.orders, 5);

        // A second run duplicates everything
        store.seed_sample_data(&mut generator, 5).unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.customers, 10);
        assert_eq!(stats.products, 20);
    }

    #[test]
    fn test_seed_zero_customers() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let report = store
            .seed_sample_data(&mut SampleGenerator::with_seed(1), 0)
            .unwrap();
        assert_eq!(report.customers, 0);
        assert_eq!(store.count_customers().unwrap(), 0);
        assert_eq!(store.stats().unwrap().products, 10);
    }

    #[test]
    fn test_seed_rolls_back_on_failure() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .conn
            .execute_batch(
                r#"
                CREATE TRIGGER reject_third_order BEFORE INSERT ON "order"
                WHEN (SELECT COUNT(*) FROM "order") >= 2
                BEGIN
                    SELECT RAISE(ABORT, 'order limit reached');
                END
                "#,
            )
            .unwrap();

        let err = store
            .seed_sample_data(&mut SampleGenerator::with_seed(4), 5)
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)), "{err:?}");

        assert_eq!(
            store.stats().unwrap(),
            DbStats { customers: 0, credit_cards: 0, products: 0, orders: 0 }
        );
    }

    #[test]
    fn test_schema_conflict_detected() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE customer (id INTEGER PRIMARY KEY, name TEXT)")
            .unwrap();

        let err = SqliteStore::from_connection(conn).err().unwrap();
        match err {
            Error::SchemaConflict { table, detail } => {
                assert_eq!(table, "customer");
                assert!(detail.contains("country_code"));
            }
            other => panic!("expected schema conflict, got {other:?}"),
        }
    }
}
