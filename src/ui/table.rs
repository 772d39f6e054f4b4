use std::collections::BTreeMap;
use tabled::{settings::Style, Table, Tabled};
use crate::model::Customer;
use crate::query::{CustomerCard, CustomerOrderCount};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

#[derive(Tabled)]
struct CustomerRow<'a> {
    #[tabled(rename = "Id")]
    id: i64,
    #[tabled(rename = "Name")]
    name: &'a str,
    #[tabled(rename = "Email")]
    email: &'a str,
    #[tabled(rename = "Country")]
    country: &'a str,
    #[tabled(rename = "Address")]
    address: String,
}

pub fn customer_table(customers: &[Customer]) -> String {
    let rows = customers.iter().map(|c| CustomerRow {
        id: c.id,
        name: &c.name,
        email: &c.email_address,
        country: &c.country_code,
        address: c.address.replace('\n', ", "),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct CountryRow<'a> {
    #[tabled(rename = "Country")]
    country: &'a str,
    #[tabled(rename = "Customers")]
    customers: usize,
}

pub fn country_count_table(counts: &BTreeMap<String, usize>) -> String {
    let rows = counts.iter().map(|(country, customers)| CountryRow {
        country: country.as_str(),
        customers: *customers,
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct CardRow<'a> {
    #[tabled(rename = "Customer")]
    name: &'a str,
    #[tabled(rename = "Card number")]
    number: &'a str,
}

pub fn card_table(pairs: &[CustomerCard]) -> String {
    let rows = pairs.iter().map(|p| CardRow {
        name: &p.name,
        number: &p.number,
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct OrderCountRow {
    #[tabled(rename = "Customer id")]
    customer_id: i64,
    #[tabled(rename = "Orders")]
    orders: usize,
}

pub fn order_count_table(counts: &[CustomerOrderCount]) -> String {
    let rows = counts.iter().map(|c| OrderCountRow {
        customer_id: c.customer_id,
        orders: c.orders,
    });
    Table::new(rows).with(Style::rounded()).to_string()
}
