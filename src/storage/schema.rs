//! Database schema definitions

/// SQL to create the customer table
pub const CREATE_CUSTOMER_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS customer (
    id INTEGER PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    email_address TEXT NOT NULL,
    address TEXT NOT NULL,
    country_code VARCHAR(2) NOT NULL CHECK (length(country_code) = 2)
)
"#;

/// SQL to create the credit_card table
pub const CREATE_CREDIT_CARD_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS credit_card (
    id INTEGER PRIMARY KEY,
    customer_id INTEGER NOT NULL REFERENCES customer(id),
    number VARCHAR(19) NOT NULL
)
"#;

/// SQL to create the product table
pub const CREATE_PRODUCT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS product (
    id INTEGER PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    price REAL NOT NULL CHECK (price >= 0),
    description TEXT NOT NULL,
    category VARCHAR(100) NOT NULL
)
"#;

/// SQL to create the order table
/// `order` is a keyword, so the name is always quoted
pub const CREATE_ORDER_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS "order" (
    id INTEGER PRIMARY KEY,
    customer_id INTEGER NOT NULL REFERENCES customer(id),
    product_id INTEGER NOT NULL REFERENCES product(id),
    quantity INTEGER NOT NULL CHECK (quantity >= 1)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_customer_country ON customer(country_code)",
    "CREATE INDEX IF NOT EXISTS idx_credit_card_customer ON credit_card(customer_id)",
    r#"CREATE INDEX IF NOT EXISTS idx_order_customer ON "order"(customer_id)"#,
    r#"CREATE INDEX IF NOT EXISTS idx_order_product ON "order"(product_id)"#,
];

/// Declared column names per table, checked against existing tables
pub const EXPECTED_COLUMNS: &[(&str, &[&str])] = &[
    ("customer", &["id", "name", "email_address", "address", "country_code"]),
    ("credit_card", &["id", "customer_id", "number"]),
    ("product", &["id", "name", "price", "description", "category"]),
    ("order", &["id", "customer_id", "product_id", "quantity"]),
];

/// Table creation statements, in dependency order
pub const CREATE_TABLES: &[&str] = &[
    CREATE_CUSTOMER_TABLE,
    CREATE_CREDIT_CARD_TABLE,
    CREATE_PRODUCT_TABLE,
    CREATE_ORDER_TABLE,
];
