//! Small reference dataset of customers, their cities, and purchased items.
//!
//! `cust_id` determines `name`, `city`, and `city_population`; `city` and
//! `city_population` determine each other; `name` is shared by two
//! customers and `item` varies freely.

use crate::input::{record, Record, Value};

/// Field names of [`customer_purchases`], in order.
pub const CUSTOMER_FIELDS: [&str; 5] = ["cust_id", "name", "city", "city_population", "item"];

const ROWS: [(i64, &str, &str, i64, &str); 12] = [
    (0, "Bill Jones", "Boston", 100000, "bat"),
    (1, "Sara Smith", "Boston", 100000, "ball"),
    (2, "Roger Rose", "New York", 900000, "glove"),
    (3, "Mike Manning", "Chicago", 770000, "glove"),
    (0, "Bill Jones", "Boston", 100000, "glove"),
    (0, "Bill Jones", "Boston", 100000, "hat"),
    (1, "Sara Smith", "Boston", 100000, "hat"),
    (1, "Sara Smith", "Boston", 100000, "glove"),
    (2, "Roger Rose", "New York", 900000, "bat"),
    (3, "Mike Manning", "Chicago", 770000, "bat"),
    (4, "Bill Jones", "Grand Rapids", 22200, "bat"),
    (1, "Sara Smith", "Boston", 100000, "ball"),
];

/// The twelve purchase records.
pub fn customer_purchases() -> Vec<Record> {
    ROWS.iter()
        .map(|&(cust_id, name, city, population, item)| {
            record([
                (CUSTOMER_FIELDS[0], Value::from(cust_id)),
                (CUSTOMER_FIELDS[1], Value::from(name)),
                (CUSTOMER_FIELDS[2], Value::from(city)),
                (CUSTOMER_FIELDS[3], Value::from(population)),
                (CUSTOMER_FIELDS[4], Value::from(item)),
            ])
        })
        .collect()
}
